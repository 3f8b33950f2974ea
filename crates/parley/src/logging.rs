//! Logging capability handed to components that emit advisory messages.
//!
//! Components never reach for a global logger; they receive a [`Logger`] at
//! construction. [`TracingLogger`] forwards to `tracing`, [`NoopLogger`]
//! discards everything.
use std::sync::Arc;

pub trait Logger: Send + Sync {
    fn warn(&self, message: &str);
}

/// Forwards to the `tracing` subscriber installed by the application
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingLogger;

impl Logger for TracingLogger {
    fn warn(&self, message: &str) {
        tracing::warn!("{}", message);
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NoopLogger;

impl Logger for NoopLogger {
    fn warn(&self, _message: &str) {}
}

pub type SharedLogger = Arc<dyn Logger>;

pub fn default_logger() -> SharedLogger {
    Arc::new(TracingLogger)
}


#[cfg(test)]
mod tests {
    use super::*;
    use tracing_test::traced_test;

    #[test]
    #[traced_test]
    fn test_tracing_logger_emits_warning() {
        TracingLogger.warn("only one system message is supported");
        assert!(logs_contain("only one system message is supported"));
    }
}
