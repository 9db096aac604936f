/**
 * Wire-level constants shared by the payload builder and the transport.
 */

/// Name of the header that the JSON encoding forces.
pub const CONTENT_TYPE: &str = "Content-Type";

/// Media type forced when the report is sent as a JSON object.
pub const JSON_MEDIA_TYPE: &str = "application/json";

/// Media type forced when form encoding is requested explicitly.
pub const FORM_MEDIA_TYPE: &str = "application/x-www-form-urlencoded";

/// Content type a browser `fetch()` attaches to a `URLSearchParams` body
/// when the caller did not set one. `HttpTransport` mirrors that default.
pub const FORM_DEFAULT_CONTENT_TYPE: &str = "application/x-www-form-urlencoded;charset=UTF-8";

/// Default wire names of the five report fields.
pub const DEFAULT_LOCATION_FIELD: &str = "location";
pub const DEFAULT_MESSAGE_FIELD: &str = "message";
pub const DEFAULT_FILENAME_FIELD: &str = "filename";
pub const DEFAULT_LINENO_FIELD: &str = "lineno";
pub const DEFAULT_COLNO_FIELD: &str = "colno";

/// Only scripts loaded over these schemes are reported.
pub const NETWORK_SCHEMES: [&str; 2] = ["https", "http"];
