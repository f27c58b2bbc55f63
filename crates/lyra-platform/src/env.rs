//! Environment variable abstraction and native implementation.
//!
//! Config discovery reads `LYRA_CONFIG` through the [`Environment`] trait so
//! tests can supply an in-memory map instead of mutating the process
//! environment.

/// Read-only environment variable access.
pub trait Environment: Send + Sync {
    /// Get the value of an environment variable, or `None` if it is not set
    /// or empty.
    fn get_var(&self, name: &str) -> Option<String>;
}

/// Native environment implementation using [`std::env`].
pub struct NativeEnvironment;

impl Environment for NativeEnvironment {
    fn get_var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok().filter(|v| !v.is_empty())
    }
}

impl Environment for std::collections::HashMap<String, String> {
    fn get_var(&self, name: &str) -> Option<String> {
        self.get(name).filter(|v| !v.is_empty()).cloned()
    }
}
