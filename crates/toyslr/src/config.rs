//! Engine configuration.

/// The default bound on the number of driver steps per parse.
pub const DEFAULT_MAX_STEPS: usize = 1000;

#[derive(Debug, Clone)]
pub struct EngineConfig {
    max_steps: usize,
    semicolon_repair: bool,
}

impl EngineConfig {
    pub const fn new() -> Self {
        Self {
            max_steps: DEFAULT_MAX_STEPS,
            semicolon_repair: true,
        }
    }

    /// Set the hard ceiling on shift/reduce/recovery steps of a single parse.
    ///
    /// Reaching it aborts the parse as unsuccessful. A value of zero is
    /// raised to one so that every parse can at least inspect its first
    /// token.
    pub fn max_steps(&mut self, max_steps: usize) -> &mut Self {
        self.max_steps = max_steps.max(1);
        self
    }

    /// Enable or disable the insertion of a single missing `;`.
    ///
    /// When disabled, every syntax error goes through panic-mode recovery.
    pub fn semicolon_repair(&mut self, enabled: bool) -> &mut Self {
        self.semicolon_repair = enabled;
        self
    }

    pub fn get_max_steps(&self) -> usize {
        self.max_steps
    }

    pub fn is_semicolon_repair_enabled(&self) -> bool {
        self.semicolon_repair
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new()
    }
}
