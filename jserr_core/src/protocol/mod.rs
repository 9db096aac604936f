/*!
 * Protocol layer — what we send to the collection endpoint.
 *
 * - `types` — ErrorOccurrence, FieldMapping, Report
 * - `headers` — case-insensitive header list
 * - `encoding` — form / JSON framing and the outgoing `Request`
 * - `constants` — media types, default field names, accepted schemes
 */

pub mod constants;
pub mod encoding;
pub mod headers;
pub mod types;
