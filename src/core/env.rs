use std::env;

/// Read-only view of the process environment. Injected into the expander,
/// the prompt generator, and the builtins so tests can substitute a fake
/// instead of touching process-wide state.
pub trait Environment {
    fn var(&self, name: &str) -> Option<String>;

    /// All defined variables. Callers impose their own ordering; this
    /// method makes no guarantee beyond completeness.
    fn vars(&self) -> Vec<(String, String)>;
}

/// The real process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsEnvironment;

impl OsEnvironment {
    pub fn new() -> Self {
        Self
    }
}

impl Environment for OsEnvironment {
    fn var(&self, name: &str) -> Option<String> {
        env::var(name).ok()
    }

    fn vars(&self) -> Vec<(String, String)> {
        env::vars().collect()
    }
}
