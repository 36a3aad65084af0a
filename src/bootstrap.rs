//! Root context construction from configuration.

use scopekit_config::ContextConfig;
use scopekit_core::Context;
use tracing::debug;

/// Build the application's root context.
///
/// Every configured value is bound under its name as a `serde_json::Value`.
///
/// # Panics
///
/// When a timeout is configured the context is wrapped in it, which panics
/// outside a Tokio runtime.
pub fn root_context(config: &ContextConfig) -> Context {
    let ctx = config
        .values
        .iter()
        .fold(Context::root(), |ctx, (key, value)| {
            ctx.with_value(key.clone(), value.clone())
        });

    debug!(values = config.values.len(), timeout_ms = ?config.timeout_ms, "Building root context");
    match config.timeout() {
        Some(timeout) => ctx.with_timeout(timeout),
        None => ctx,
    }
}
