//! Minimal HTTP/1.1 server plumbing for the configuration portal

#[cfg(feature = "firmware")]
pub(crate) mod connection;
pub mod headers;

#[cfg(feature = "firmware")]
pub(crate) use connection::HttpConnection;
pub use headers::{ContentHeaders, ContentType, HttpMethod, ResponseHeaders, TextEncoding};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    Closed,
    Parse,
    TooLarge,
    FormatHeaders,
}

impl From<core::fmt::Error> for Error {
    fn from(_error: core::fmt::Error) -> Self {
        Error::FormatHeaders
    }
}

#[cfg(feature = "firmware")]
impl From<embassy_net::tcp::Error> for Error {
    fn from(err: embassy_net::tcp::Error) -> Self {
        match err {
            embassy_net::tcp::Error::ConnectionReset => Error::Closed,
        }
    }
}

pub type HttpResult = Result<(), Error>;
