use embassy_net::tcp::TcpSocket;
use embedded_io_async::Write as _;
use heapless::{String, Vec};

use super::{
    Error,
    HttpResult,
    headers::{
        HttpMethod,
        ResponseHeaders,
        TargetWriter as _,
        find_content_length,
        find_header_end,
        parse_request_line,
    },
};

const REQUEST_BUFFER_SIZE: usize = 1024;
const HEADER_OUT_SIZE: usize = 256;
const STREAM_CHUNK_SIZE: usize = 512;

/// HTTP connection with a fully buffered request
pub(crate) struct HttpConnection<'a> {
    pub method: HttpMethod,
    pub path: String<64>,

    socket: TcpSocket<'a>,
    request: Vec<u8, REQUEST_BUFFER_SIZE>,
    body_start: usize,
}

impl<'a> HttpConnection<'a> {
    /// Read the request head and body from an accepted socket.
    pub(crate) async fn from_socket(mut socket: TcpSocket<'a>) -> Result<Self, Error> {
        let mut buffer = [0u8; REQUEST_BUFFER_SIZE];
        let mut filled = 0;

        let header_end = loop {
            if filled == buffer.len() {
                return Err(Error::TooLarge);
            }
            let n = socket.read(&mut buffer[filled..]).await?;
            if n == 0 {
                return Err(Error::Closed);
            }
            filled += n;
            if let Some(end) = find_header_end(&buffer[..filled]) {
                break end;
            }
        };

        let head = core::str::from_utf8(&buffer[..header_end]).map_err(|_| Error::Parse)?;
        let (method, raw_path, rest_headers) = parse_request_line(head).ok_or(Error::Parse)?;
        let content_length = find_content_length(rest_headers).unwrap_or(0);
        let mut path = String::new();
        path.push_str(raw_path).map_err(|()| Error::TooLarge)?;

        let total = header_end + content_length;
        if total > buffer.len() {
            return Err(Error::TooLarge);
        }
        while filled < total {
            let n = socket.read(&mut buffer[filled..total]).await?;
            if n == 0 {
                return Err(Error::Closed);
            }
            filled += n;
        }

        let request = Vec::from_slice(&buffer[..total]).map_err(|()| Error::TooLarge)?;
        Ok(Self {
            method,
            path,
            socket,
            request,
            body_start: header_end,
        })
    }

    /// Get request method and path
    pub(crate) fn route(&self) -> (HttpMethod, &'_ str) {
        (self.method, self.path.as_str())
    }

    pub(crate) fn body(&self) -> &[u8] {
        &self.request[self.body_start..]
    }

    /// Write headers and body, then close the connection
    pub(crate) async fn respond(mut self, headers: &ResponseHeaders, body: &[u8]) -> HttpResult {
        let mut head: String<HEADER_OUT_SIZE> = String::new();
        headers.write_to(&mut head)?;
        self.socket.write_all(head.as_bytes()).await?;
        for chunk in body.chunks(STREAM_CHUNK_SIZE) {
            self.socket.write_all(chunk).await?;
        }
        self.socket.flush().await?;
        self.socket.close();
        Ok(())
    }
}
