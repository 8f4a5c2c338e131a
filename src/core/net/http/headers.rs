use core::fmt::Write;

pub type StatusCode = u16;

fn reason_phrase(code: StatusCode) -> &'static str {
    match code {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        413 => "Request Entity Too Large",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}

/// HTTP Content Type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    TextHtml,
}

impl ContentType {
    pub(super) fn as_str(self) -> &'static str {
        match self {
            ContentType::TextHtml => "text/html",
        }
    }
}

/// Text Encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    Utf8,
}

impl TextEncoding {
    pub fn as_str(self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "utf-8",
        }
    }
}

/// HTTP socket connection policy.
#[derive(Debug, Clone, Copy)]
pub(super) enum ConnectionPolicy {
    Close,
}

impl ConnectionPolicy {
    pub(super) fn as_str(self) -> &'static str {
        match self {
            ConnectionPolicy::Close => "close",
        }
    }
}

pub trait TargetWriter {
    fn write_to(&self, writer: &mut impl Write) -> Result<(), core::fmt::Error>;
}

/// HTTP Content Headers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContentHeaders {
    content_type: ContentType,
    content_length: Option<usize>,
    text_encoding: Option<TextEncoding>,
}

impl ContentHeaders {
    pub const fn new(content_type: ContentType) -> Self {
        Self {
            content_type,
            content_length: None,
            text_encoding: None,
        }
    }

    #[must_use]
    pub const fn with_length(mut self, length: usize) -> Self {
        self.content_length = Some(length);
        self
    }

    #[must_use]
    pub const fn with_text_encoding(mut self, text_encoding: TextEncoding) -> Self {
        self.text_encoding = Some(text_encoding);
        self
    }
}

impl TargetWriter for ContentHeaders {
    fn write_to(&self, writer: &mut impl Write) -> Result<(), core::fmt::Error> {
        write!(writer, "Content-Type: {}", self.content_type.as_str())?;
        if let Some(text_encoding) = self.text_encoding {
            write!(writer, "; charset={}", text_encoding.as_str())?;
        }
        write!(writer, "\r\n")?;
        if let Some(content_length) = self.content_length {
            write!(writer, "Content-Length: {content_length}\r\n")?;
        }
        Ok(())
    }
}

/// Response Headers.
#[derive(Debug, Clone, Copy)]
pub struct ResponseHeaders {
    status: StatusCode,
    connection: ConnectionPolicy,
    content: Option<ContentHeaders>,
}

impl ResponseHeaders {
    pub const fn from_code(code: StatusCode) -> Self {
        Self {
            status: code,
            content: None,
            connection: ConnectionPolicy::Close,
        }
    }

    pub const fn success() -> Self {
        Self::from_code(200)
    }

    pub const fn not_found() -> Self {
        Self::from_code(404)
    }

    pub const fn bad_request() -> Self {
        Self::from_code(400)
    }

    pub const fn payload_too_large() -> Self {
        Self::from_code(413)
    }

    pub const fn status(&self) -> StatusCode {
        self.status
    }

    #[must_use]
    pub const fn with_content(mut self, content: ContentHeaders) -> Self {
        self.content = Some(content);
        self
    }
}

impl TargetWriter for ResponseHeaders {
    fn write_to(&self, writer: &mut impl Write) -> Result<(), core::fmt::Error> {
        let reason = reason_phrase(self.status);
        write!(writer, "HTTP/1.1 {} {}\r\n", self.status, reason)?;
        if let Some(content) = &self.content {
            content.write_to(writer)?;
        }

        write!(writer, "Connection: {}\r\n", self.connection.as_str())?;
        write!(writer, "\r\n")?;
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Patch,
    Options,
    Head,
}

impl HttpMethod {
    pub(super) fn parse(s: &str) -> Option<Self> {
        Some(match s {
            "GET" => HttpMethod::Get,
            "POST" => HttpMethod::Post,
            "PUT" => HttpMethod::Put,
            "DELETE" => HttpMethod::Delete,
            "PATCH" => HttpMethod::Patch,
            "OPTIONS" => HttpMethod::Options,
            "HEAD" => HttpMethod::Head,
            _ => return None,
        })
    }
}

/// Parse the request line from the header string.
///
/// Returns the method, the path without its query string, and the rest of
/// the header string.
pub fn parse_request_line(header_str: &str) -> Option<(HttpMethod, &str, &str)> {
    let line_end = header_str.find("\r\n").unwrap_or(header_str.len());
    let first_line = &header_str[..line_end];
    let mut parts = first_line.split_whitespace();
    let method = parts.next().and_then(HttpMethod::parse)?;
    let target = parts.next()?;
    let path = target.split_once('?').map_or(target, |(path, _)| path);
    let rest = header_str.get(line_end + 2..).unwrap_or("");

    Some((method, path, rest))
}

/// Position just past the blank line that ends the request head
pub fn find_header_end(buffer: &[u8]) -> Option<usize> {
    buffer
        .windows(4)
        .position(|w| w == b"\r\n\r\n")
        .map(|pos| pos + 4)
}

/// Find the content length in the header string.
///
/// Returns the content length if found, otherwise None.
pub fn find_content_length(header: &str) -> Option<usize> {
    const TARGET: &str = "content-length:";
    header.lines().find_map(|line| {
        let name = line.get(..TARGET.len())?;
        if !name.eq_ignore_ascii_case(TARGET) {
            return None;
        }
        line[TARGET.len()..].trim().parse().ok()
    })
}
