/**
 * Transport layer — how reports reach the collector.
 *
 * - `http` — `Transport` trait, status validation, `ureq` implementation
 * - `dispatch` — one fire-and-forget thread per submission
 */

pub mod dispatch;
pub mod http;

pub use http::{deliver, HttpTransport, Response, Transport};
