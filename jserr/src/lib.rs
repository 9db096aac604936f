/**
 * jserr — uncaught script error reporter.
 *
 * This is the crate hosts should depend on. It re-exports the core API and
 * wires the default platform pieces (process-wide error channel, `ureq`
 * transport) behind a single `init` call.
 *
 * # Quick start
 *
 * ```ignore
 * use std::sync::Arc;
 *
 * let environment = Arc::new(jserr::StaticEnvironment::new(user_agent, "https://app.example/"));
 * let _reporter = jserr::init("https://collector.example/report", jserr::Options::default(), environment)?;
 *
 * // wherever the host learns about an uncaught script error:
 * jserr::dispatch_error(jserr::ErrorOccurrence::new("x is not defined", "https://app.example/app.js", 10, 5));
 * ```
 */

use std::sync::Arc;

use tracing::debug;

// ---------------------------------------------------------------------------
// Re-exports from jserr_core — the public surface area
// ---------------------------------------------------------------------------

pub use jserr_core::{
    deliver, global_channel, Body, ConfigError, Encoding, Environment, ErrorChannel, ErrorEvent,
    ErrorEventTarget, ErrorOccurrence, FieldMapping, Filter, HeaderList, Host, HttpTransport, Listener,
    ListenerId, ListenerOptions, Options, PatternList, Report, Reporter, Request, Response,
    StaticEnvironment, SubmitError, Transport, Verdict,
};

// ---------------------------------------------------------------------------
// init
// ---------------------------------------------------------------------------

/**
 * Creates a reporter on the default host and starts listening.
 *
 * Keep the returned `Reporter` around if you want to inspect its
 * configuration; the listener itself stays registered on the process-wide
 * channel either way.
 *
 * # Errors
 * `ConfigError::InvalidEndpoint` if `endpoint` is not an http(s) URL.
 */
pub fn init(
    endpoint: &str,
    options: Options,
    environment: Arc<dyn Environment>,
) -> Result<Reporter, ConfigError> {
    let reporter = Reporter::new(endpoint, options, Host::with_environment(environment))?;

    if reporter.init().is_some() {
        debug!(endpoint = %reporter.endpoint(), "error reporter listening");
    }

    Ok(reporter)
}

/**
 * Delivers an uncaught error to the process-wide channel.
 *
 * Returns `false` if a non-passive listener prevented the default
 * handling.
 */
pub fn dispatch_error(occurrence: ErrorOccurrence) -> bool {
    global_channel().dispatch(occurrence)
}
