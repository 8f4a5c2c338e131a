//! Configuration portal
//!
//! Serves the credentials form and turns its submissions into
//! [`WifiCredentials`] for the provisioning flow.

#[cfg(feature = "firmware")]
mod http;
mod page;

#[cfg(feature = "firmware")]
pub use http::PortalHttpController;

use crate::{
    core::net::{
        form::{FormError, decode_component, form_fields},
        http::{ContentHeaders, ContentType, HttpMethod, ResponseHeaders, TextEncoding},
    },
    domain::entity::{PASSWORD_MAX_LEN, SSID_MAX_LEN, WifiCredentials},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialsFormError {
    MissingSsid,
    Form(FormError),
}

impl From<FormError> for CredentialsFormError {
    fn from(error: FormError) -> Self {
        CredentialsFormError::Form(error)
    }
}

/// Outcome of a portal request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortalReply {
    Form,
    Saved(WifiCredentials),
    Rejected(CredentialsFormError),
    NotFound,
}

impl PortalReply {
    /// Response headers and body to send back
    pub fn response(&self) -> (ResponseHeaders, &'static [u8]) {
        let (headers, body) = match self {
            PortalReply::Form => (ResponseHeaders::success(), page::FORM_HTML),
            PortalReply::Saved(_) => (ResponseHeaders::success(), page::SAVED_HTML),
            PortalReply::Rejected(CredentialsFormError::MissingSsid) => {
                (ResponseHeaders::bad_request(), page::MISSING_SSID_HTML)
            }
            PortalReply::Rejected(CredentialsFormError::Form(FormError::TooLong)) => {
                (ResponseHeaders::bad_request(), page::TOO_LONG_HTML)
            }
            PortalReply::Rejected(CredentialsFormError::Form(FormError::Encoding)) => {
                (ResponseHeaders::bad_request(), page::ENCODING_HTML)
            }
            PortalReply::NotFound => return (ResponseHeaders::not_found(), &[]),
        };
        let content = ContentHeaders::new(ContentType::TextHtml)
            .with_text_encoding(TextEncoding::Utf8)
            .with_length(body.len());
        (headers.with_content(content), body.as_bytes())
    }
}

/// Route a fully received request
pub fn route_request(method: HttpMethod, path: &str, body: &[u8]) -> PortalReply {
    match (method, path) {
        (HttpMethod::Get, "/") => PortalReply::Form,
        (HttpMethod::Post, "/save") => match parse_credentials_form(body) {
            Ok(credentials) => PortalReply::Saved(credentials),
            Err(e) => PortalReply::Rejected(e),
        },
        _ => PortalReply::NotFound,
    }
}

/// Parse the `ssid` and `password` fields of the portal form
///
/// Unknown fields are ignored and a missing password means an open network.
pub fn parse_credentials_form(body: &[u8]) -> Result<WifiCredentials, CredentialsFormError> {
    let mut ssid = None;
    let mut password = heapless::String::<PASSWORD_MAX_LEN>::new();

    for (key, value) in form_fields(body) {
        match key {
            b"ssid" => ssid = Some(decode_component::<SSID_MAX_LEN>(value)?),
            b"password" => password = decode_component(value)?,
            _ => {}
        }
    }

    let ssid = ssid
        .filter(|ssid| !ssid.is_empty())
        .ok_or(CredentialsFormError::MissingSsid)?;
    Ok(WifiCredentials { ssid, password })
}
