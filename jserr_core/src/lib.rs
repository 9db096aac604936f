/*!
 * jserr core — the reporting engine.
 *
 * Watches an uncaught-script-error channel, filters occurrences by client
 * identity and script filename, and POSTs qualifying ones to a collection
 * endpoint. End users normally depend on the `jserr` facade crate, which
 * wires the default host pieces behind a single `init` call.
 *
 * # Module structure
 *
 * - `protocol/` — what we send: occurrence, field mapping, report, framing
 * - `transport/` — how we deliver: `ureq` client, per-report submission thread
 * - `filter` — deny/allow pattern lists
 * - `events` — error-event channel and listener registration
 * - `host` — environment capabilities (user agent, location)
 * - `options` — configuration surface
 * - `reporter` — lifecycle: construct, init, per-event pipeline
 */

mod error;
mod events;
mod filter;
mod host;
mod options;
mod protocol;
mod reporter;
mod transport;

#[cfg(test)]
mod test_support;

// ---------------------------------------------------------------------------
// Re-exports
// ---------------------------------------------------------------------------

pub use error::{ConfigError, SubmitError};
pub use events::{global as global_channel, ErrorChannel, ErrorEvent, ErrorEventTarget, Listener, ListenerId, ListenerOptions};
pub use filter::{Filter, PatternList, Verdict};
pub use host::{Environment, Host, StaticEnvironment};
pub use options::Options;
pub use protocol::encoding::{Body, Encoding, Request};
pub use protocol::headers::HeaderList;
pub use protocol::types::{ErrorOccurrence, FieldMapping, Report};
pub use reporter::Reporter;
pub use transport::{deliver, HttpTransport, Response, Transport};
