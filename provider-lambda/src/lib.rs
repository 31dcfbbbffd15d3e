//! AWS Lambda entrypoint for provider distributions.
//!
//! A distribution binary links its plugin and calls [`run`] from `main`:
//!
//! ```ignore
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     provider_lambda::run().await
//! }
//! ```
//!
//! Startup failures (no linked distribution, missing configuration, broken
//! manifest) abort the cold start instead of serving invocations.

#![warn(missing_docs, clippy::pedantic)]

use std::sync::Arc;

use anyhow::Context as _;
use lambda_runtime::{Context, LambdaEvent, service_fn};
use provider_config::ProcessEnv;
use provider_runtime::{InvocationContext, Runtime, bootstrap_linked};
use provider_telemetry::TelemetryConfig;
use serde_json::Value;
use tracing::{error, info, warn};

/// Boxed error type expected by `lambda_runtime`.
pub type Error = lambda_runtime::Error;

/// Initializes logging, builds the runtime and serves invocations until the
/// platform shuts the process down.
///
/// # Errors
///
/// Returns an error when logging cannot be configured, when the provider
/// fails to start, or when the Lambda runtime loop exits with an error.
pub async fn run() -> anyhow::Result<()> {
    let telemetry =
        TelemetryConfig::from_env(&ProcessEnv).context("invalid logging configuration")?;
    provider_telemetry::init(&telemetry).context("failed to initialize logging")?;

    let runtime = bootstrap_linked(&ProcessEnv)
        .inspect_err(|err| {
            error!(error = %err, packaging = err.is_packaging_error(), "provider startup failed");
        })
        .context("provider startup failed")?;
    info!(provider = %runtime.manifest(), "serving lambda invocations");

    let runtime = Arc::new(runtime);
    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| {
        let runtime = Arc::clone(&runtime);
        async move { lambda_handler(&runtime, event).await }
    }))
    .await
    .map_err(|err| anyhow::anyhow!(err))
}

/// Handles one Lambda invocation.
///
/// # Errors
///
/// Propagates any error returned by the runtime.
pub async fn lambda_handler(runtime: &Runtime, event: LambdaEvent<Value>) -> Result<Value, Error> {
    let ctx = invocation_context(&event.context);
    handle_invocation(runtime, event.payload, &ctx).await
}

/// Passes an event through to the runtime, converting the error for the host.
///
/// # Errors
///
/// Propagates any error returned by [`Runtime::handle`].
pub async fn handle_invocation(
    runtime: &Runtime,
    payload: Value,
    ctx: &InvocationContext,
) -> Result<Value, Error> {
    runtime.handle(payload, ctx).await.map_err(|err| {
        warn!(request_id = ctx.request_id(), error = %err, "invocation failed");
        Error::from(err)
    })
}

/// Extracts the invocation metadata the runtime cares about.
#[must_use]
pub fn invocation_context(context: &Context) -> InvocationContext {
    let mut ctx = InvocationContext::new(context.request_id.clone());
    if !context.invoked_function_arn.is_empty() {
        ctx = ctx.with_function_arn(context.invoked_function_arn.clone());
    }
    if context.deadline > 0 {
        ctx = ctx.with_deadline_ms(context.deadline);
    }
    ctx
}
