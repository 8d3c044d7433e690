use bytes::Bytes;
use tokio::io::{self, AsyncWrite, AsyncWriteExt};

use crate::http::protocol::{header::HeaderKey, status::StatusCode, version::HttpVersion};

pub const APPLICATION_JSON: &str = "application/json";
pub const TEXT_PLAIN: &str = "text/plain";

/// A bare 1xx head, e.g. the reply to `Expect: 100-continue`.
pub fn interim(status: StatusCode) -> Vec<u8> {
    format!("{} {}\r\n\r\n", HttpVersion::Http11, status).into_bytes()
}

#[derive(Debug, Clone)]
pub struct Response {
    pub status: StatusCode,
    pub version: HttpVersion,
    pub headers: Vec<(HeaderKey, String)>,
    pub body: Bytes,
}

impl Response {
    pub fn new(status: StatusCode) -> Self {
        Self {
            status,
            version: HttpVersion::Http11,
            headers: Vec::new(),
            body: Bytes::new(),
        }
    }

    pub fn header(mut self, key: HeaderKey, value: impl Into<String>) -> Self {
        self.headers.push((key, value.into()));
        self
    }

    pub fn body(self, content_type: &str, body: Bytes) -> Self {
        let mut res = self.header(HeaderKey::ContentType, content_type);
        res.body = body;
        res
    }

    pub fn keep_alive(self, keep_alive: bool) -> Self {
        let value = if keep_alive { "keep-alive" } else { "close" };
        self.header(HeaderKey::Connection, value)
    }

    /// The fixture reply: 200 with the shared JSON body.
    pub fn json(body: Bytes, keep_alive: bool) -> Self {
        Self::new(StatusCode::Ok)
            .body(APPLICATION_JSON, body)
            .keep_alive(keep_alive)
    }

    /// Reply sent before dropping a connection whose request could not be framed.
    pub fn failure(status: StatusCode) -> Self {
        let body = format!("Error: {}", status.to_str());
        Self::new(status)
            .body(TEXT_PLAIN, Bytes::from(body))
            .keep_alive(false)
    }

    /// Status line and headers, `Content-Length` included, up to the blank line.
    pub fn head_bytes(&self) -> Vec<u8> {
        let mut head = format!("{} {}\r\n", self.version, self.status);
        for (k, v) in &self.headers {
            head.push_str(&format!("{}: {}\r\n", k, v));
        }
        head.push_str(&format!(
            "{}: {}\r\n\r\n",
            HeaderKey::ContentLength,
            self.body.len()
        ));
        head.into_bytes()
    }

    /// Writes the response and flushes. `include_body` is false for HEAD.
    pub async fn write_to<W>(&self, writer: &mut W, include_body: bool) -> io::Result<()>
    where
        W: AsyncWrite + Unpin,
    {
        writer.write_all(&self.head_bytes()).await?;
        if include_body {
            writer.write_all(&self.body).await?;
        }
        writer.flush().await
    }
}
