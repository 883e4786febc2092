use criterion::{criterion_group, criterion_main, Criterion};
use toyslr::Engine;

criterion_main!(benches);
criterion_group!(benches, bench_construct, bench_parse);

fn bench_construct(c: &mut Criterion) {
    c.bench_function("construct", |b| {
        b.iter(|| Engine::new().unwrap());
    });
}

fn bench_parse(c: &mut Criterion) {
    let engine = Engine::new().unwrap();
    let statement = "while ( ID < NUM ) { if ( ID == NUM ) then ID = ID + NUM ; else ID = ( ID - NUM ) * NUM ; }\n";
    let accepted = format!("{{\n{}}}\n", statement.repeat(4));
    let rejected = accepted.replace(" ; else", " else");

    let mut group = c.benchmark_group("parse");
    for (name, source) in [("accepted", &accepted), ("rejected", &rejected)] {
        let tokens = engine.tokenize(source);
        group.bench_function(name, |b| {
            b.iter(|| engine.parse(&tokens));
        });
    }
    group.finish();
}
