/**
 * Report framing: URL-encoded form or JSON object.
 *
 * `Request::build` is the single place that decides body, content type
 * and header precedence:
 *
 * - `Encoding::Json` → JSON object body, `Content-Type: application/json`
 *   forced over any caller-supplied content type.
 * - `Encoding::Form` → form body, `Content-Type:
 *   application/x-www-form-urlencoded` forced.
 * - no encoding → form body, caller headers untouched; the transport may
 *   apply its own default content type.
 */
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::SubmitError;

use super::constants::{CONTENT_TYPE, FORM_DEFAULT_CONTENT_TYPE, FORM_MEDIA_TYPE, JSON_MEDIA_TYPE};
use super::headers::HeaderList;
use super::types::Report;

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Encoding {
    #[serde(rename = "application/x-www-form-urlencoded", alias = "form")]
    Form,

    #[serde(rename = "application/json", alias = "json")]
    Json,
}

impl Encoding {
    pub fn media_type(self) -> &'static str {
        match self {
            Encoding::Form => FORM_MEDIA_TYPE,
            Encoding::Json => JSON_MEDIA_TYPE,
        }
    }
}

// ---------------------------------------------------------------------------
// Body
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    Form(String),
    Json(String),
}

impl Body {
    pub fn as_str(&self) -> &str {
        match self {
            Body::Form(s) | Body::Json(s) => s,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.as_str().as_bytes()
    }

    /// Content type the platform would attach when the request has none.
    pub fn default_content_type(&self) -> &'static str {
        match self {
            Body::Form(_) => FORM_DEFAULT_CONTENT_TYPE,
            Body::Json(_) => JSON_MEDIA_TYPE,
        }
    }
}

/// Serializes every pair, duplicates included, as `application/x-www-form-urlencoded`.
pub fn encode_form(report: &Report) -> String {
    url::form_urlencoded::Serializer::new(String::new())
        .extend_pairs(report.fields().iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .finish()
}

/// Serializes the report as a flat JSON object. A repeated name keeps its last value.
pub fn encode_json(report: &Report) -> Result<String, serde_json::Error> {
    let mut object = serde_json::Map::new();
    for (name, value) in report.fields() {
        object.insert(name.clone(), serde_json::Value::String(value.clone()));
    }
    serde_json::to_string(&object)
}

// ---------------------------------------------------------------------------
// Request
// ---------------------------------------------------------------------------

/**
 * A fully framed POST, ready to hand to a `Transport`.
 */
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    pub url: Url,
    pub headers: HeaderList,
    pub body: Body,
}

impl Request {
    /**
     * # Errors
     * `SubmitError::Encode` when the JSON body cannot be serialized.
     */
    pub fn build(
        endpoint: &Url,
        report: &Report,
        encoding: Option<Encoding>,
        extra_headers: &HeaderList,
    ) -> Result<Self, SubmitError> {
        let mut headers = extra_headers.clone();
        if let Some(encoding) = encoding {
            headers.set(CONTENT_TYPE, encoding.media_type());
        }

        let body = match encoding {
            Some(Encoding::Json) => Body::Json(encode_json(report)?),
            Some(Encoding::Form) | None => Body::Form(encode_form(report)),
        };

        Ok(Self {
            url: endpoint.clone(),
            headers,
            body,
        })
    }

    pub fn content_type(&self) -> Option<&str> {
        self.headers.get(CONTENT_TYPE)
    }
}
