use std::collections::HashMap;
use std::collections::hash_map::Entry;

use thiserror::Error;
use tokio::io::{self, AsyncBufRead, AsyncBufReadExt, AsyncReadExt};

use crate::config::RequestLimits;
use crate::http::protocol::{
    header::{HeaderKey, has_token},
    method::HttpMethod,
    status::StatusCode,
    version::HttpVersion,
};

/// Clients may send a stray CRLF after a previous body; tolerate a few.
const MAX_LEADING_EMPTY_LINES: usize = 4;

#[derive(Debug, Error)]
pub enum RequestError {
    /// Peer went away, either before a request started or in the middle of one.
    #[error("connection closed")]
    Closed,
    #[error("malformed request: {0}")]
    Malformed(&'static str),
    #[error("request header fields too large")]
    HeadersTooLarge,
    /// A request head started arriving but did not complete in time.
    #[error("request head timed out")]
    Timeout,
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl RequestError {
    /// Status to answer with before closing, `None` when no reply is possible.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            RequestError::Malformed(_) => Some(StatusCode::BadRequest),
            RequestError::HeadersTooLarge => Some(StatusCode::RequestHeaderFieldsTooLarge),
            RequestError::Timeout => Some(StatusCode::RequestTimeout),
            RequestError::Closed | RequestError::Io(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BodyKind {
    Empty,
    Length(u64),
    Chunked,
}

#[derive(Debug, Clone)]
pub struct RequestHead {
    pub method: HttpMethod,
    pub target: String,
    pub version: HttpVersion,
    pub headers: HashMap<HeaderKey, String>,
}

impl RequestHead {
    /// Reads a full request head (request line and headers) off the stream.
    /// The request line is validated before any header is read, so a garbage
    /// line is rejected without waiting for the end of the head.
    pub async fn read_from<R>(reader: &mut R, limits: &RequestLimits) -> Result<Self, RequestError>
    where
        R: AsyncBufRead + Unpin,
    {
        let mut request_line = read_line(reader, limits.max_line_length)
            .await?
            .ok_or(RequestError::Closed)?;
        let mut skipped = 0;
        while request_line.is_empty() {
            skipped += 1;
            if skipped > MAX_LEADING_EMPTY_LINES {
                return Err(RequestError::Malformed("missing request line"));
            }
            request_line = read_line(reader, limits.max_line_length)
                .await?
                .ok_or(RequestError::Closed)?;
        }

        let (method, target, version) = parse_request_line(&request_line)?;
        let headers = read_headers(reader, limits).await?;

        Ok(Self {
            method,
            target,
            version,
            headers,
        })
    }

    pub fn header(&self, key: &HeaderKey) -> Option<&str> {
        self.headers.get(key).map(String::as_str)
    }

    /// How the request body is framed. A `Transfer-Encoding` always wins over
    /// `Content-Length`.
    pub fn body_kind(&self) -> Result<BodyKind, RequestError> {
        if let Some(te) = self.header(&HeaderKey::TransferEncoding) {
            let last = te.rsplit(',').next().map(str::trim).unwrap_or_default();
            if last.eq_ignore_ascii_case("chunked") {
                return Ok(BodyKind::Chunked);
            }
            return Err(RequestError::Malformed("unsupported transfer coding"));
        }

        let Some(raw) = self.header(&HeaderKey::ContentLength) else {
            return Ok(BodyKind::Empty);
        };

        // Repeated Content-Length headers are folded into a list; they must agree.
        let mut length: Option<u64> = None;
        for value in raw.split(',') {
            let value = value.trim();
            if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
                return Err(RequestError::Malformed("invalid content-length"));
            }
            let n: u64 = value
                .parse()
                .map_err(|_| RequestError::Malformed("invalid content-length"))?;
            if length.is_some_and(|prev| prev != n) {
                return Err(RequestError::Malformed("conflicting content-length"));
            }
            length = Some(n);
        }

        Ok(match length {
            None | Some(0) => BodyKind::Empty,
            Some(n) => BodyKind::Length(n),
        })
    }

    pub fn keep_alive(&self) -> bool {
        match self.header(&HeaderKey::Connection) {
            Some(v) if has_token(v, "close") => false,
            Some(v) if has_token(v, "keep-alive") => true,
            _ => self.version.persistent_by_default(),
        }
    }

    pub fn expects_continue(&self) -> bool {
        self.version == HttpVersion::Http11
            && self
                .header(&HeaderKey::Expect)
                .is_some_and(|v| has_token(v, "100-continue"))
    }
}

fn parse_request_line(line: &str) -> Result<(HttpMethod, String, HttpVersion), RequestError> {
    let mut parts = line.split_whitespace();
    let (Some(method), Some(target), Some(version), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(RequestError::Malformed("invalid request line"));
    };

    let method = HttpMethod::from_str(method).ok_or(RequestError::Malformed("unknown method"))?;
    let version =
        HttpVersion::from_str(version).ok_or(RequestError::Malformed("unsupported version"))?;

    Ok((method, target.to_string(), version))
}

async fn read_headers<R>(
    reader: &mut R,
    limits: &RequestLimits,
) -> Result<HashMap<HeaderKey, String>, RequestError>
where
    R: AsyncBufRead + Unpin,
{
    let mut headers: HashMap<HeaderKey, String> = HashMap::new();
    let mut count = 0;

    loop {
        let line = read_line(reader, limits.max_line_length)
            .await?
            .ok_or(RequestError::Closed)?;
        if line.is_empty() {
            return Ok(headers);
        }

        count += 1;
        if count > limits.max_headers {
            return Err(RequestError::HeadersTooLarge);
        }
        if line.starts_with([' ', '\t']) {
            return Err(RequestError::Malformed("obsolete header line folding"));
        }

        let (name, value) = line
            .split_once(':')
            .ok_or(RequestError::Malformed("header without colon"))?;
        if name.is_empty() || name.ends_with([' ', '\t']) {
            return Err(RequestError::Malformed("invalid header name"));
        }

        let value = value.trim();
        match headers.entry(HeaderKey::from_str(name)) {
            Entry::Occupied(mut e) => {
                let joined = e.get_mut();
                joined.push_str(", ");
                joined.push_str(value);
            }
            Entry::Vacant(e) => {
                e.insert(value.to_string());
            }
        }
    }
}

/// Reads and discards the request body. Returns the number of body bytes
/// consumed (chunk framing excluded).
pub async fn drain_body<R>(
    reader: &mut R,
    body: BodyKind,
    limits: &RequestLimits,
) -> Result<u64, RequestError>
where
    R: AsyncBufRead + Unpin,
{
    match body {
        BodyKind::Empty => Ok(0),
        BodyKind::Length(len) => discard_exact(reader, len).await,
        BodyKind::Chunked => {
            let mut total = 0;
            loop {
                let line = read_line(reader, limits.max_line_length)
                    .await?
                    .ok_or(RequestError::Closed)?;
                let size = line.split(';').next().unwrap_or_default().trim();
                if size.is_empty() || !size.bytes().all(|b| b.is_ascii_hexdigit()) {
                    return Err(RequestError::Malformed("invalid chunk size"));
                }
                let size = u64::from_str_radix(size, 16)
                    .map_err(|_| RequestError::Malformed("invalid chunk size"))?;
                if size == 0 {
                    break;
                }

                total += discard_exact(reader, size).await?;
                let terminator = read_line(reader, limits.max_line_length)
                    .await?
                    .ok_or(RequestError::Closed)?;
                if !terminator.is_empty() {
                    return Err(RequestError::Malformed("missing chunk terminator"));
                }
            }

            // trailer section
            let mut trailers = 0;
            loop {
                let line = read_line(reader, limits.max_line_length)
                    .await?
                    .ok_or(RequestError::Closed)?;
                if line.is_empty() {
                    return Ok(total);
                }
                trailers += 1;
                if trailers > limits.max_headers {
                    return Err(RequestError::HeadersTooLarge);
                }
            }
        }
    }
}

async fn discard_exact<R>(reader: &mut R, len: u64) -> Result<u64, RequestError>
where
    R: AsyncBufRead + Unpin,
{
    let mut limited = (&mut *reader).take(len);
    let copied = io::copy_buf(&mut limited, &mut io::sink()).await?;
    if copied < len {
        return Err(RequestError::Closed);
    }
    Ok(copied)
}

/// Reads one LF terminated line and strips the terminator (CRLF or bare LF).
/// `Ok(None)` means the stream ended before any byte of the line.
async fn read_line<R>(reader: &mut R, limit: usize) -> Result<Option<String>, RequestError>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf = Vec::with_capacity(128);
    let mut limited = (&mut *reader).take(limit as u64);
    let n = limited.read_until(b'\n', &mut buf).await?;

    if n == 0 {
        return Ok(None);
    }
    if buf.last() != Some(&b'\n') {
        if n >= limit {
            return Err(RequestError::HeadersTooLarge);
        }
        return Err(RequestError::Closed);
    }

    buf.pop();
    if buf.last() == Some(&b'\r') {
        buf.pop();
    }
    Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}
