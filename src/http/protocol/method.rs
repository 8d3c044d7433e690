use std::fmt;

#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    GET = 0,
    HEAD,
    POST,
    PUT,
    DELETE,
    CONNECT,
    OPTIONS,
    TRACE,
    PATCH,
    QUERY,
    // WebDAV
    PROPFIND,
    PROPPATCH,
    MKCOL,
    MKCALENDAR,
    COPY,
    MOVE,
    LOCK,
    UNLOCK,
    SEARCH,
    ACL,
    BIND,
    REBIND,
    UNBIND,
    REPORT,
    // Subversion
    MKACTIVITY,
    CHECKOUT,
    MERGE,
    // UPnP
    MSEARCH,
    NOTIFY,
    SUBSCRIBE,
    UNSUBSCRIBE,
    // RFC 2068 / Icecast
    LINK,
    UNLINK,
    PURGE,
    SOURCE,
}

pub const HTTP_METHODS: [HttpMethod; 35] = [
    HttpMethod::GET,
    HttpMethod::HEAD,
    HttpMethod::POST,
    HttpMethod::PUT,
    HttpMethod::DELETE,
    HttpMethod::CONNECT,
    HttpMethod::OPTIONS,
    HttpMethod::TRACE,
    HttpMethod::PATCH,
    HttpMethod::QUERY,
    HttpMethod::PROPFIND,
    HttpMethod::PROPPATCH,
    HttpMethod::MKCOL,
    HttpMethod::MKCALENDAR,
    HttpMethod::COPY,
    HttpMethod::MOVE,
    HttpMethod::LOCK,
    HttpMethod::UNLOCK,
    HttpMethod::SEARCH,
    HttpMethod::ACL,
    HttpMethod::BIND,
    HttpMethod::REBIND,
    HttpMethod::UNBIND,
    HttpMethod::REPORT,
    HttpMethod::MKACTIVITY,
    HttpMethod::CHECKOUT,
    HttpMethod::MERGE,
    HttpMethod::MSEARCH,
    HttpMethod::NOTIFY,
    HttpMethod::SUBSCRIBE,
    HttpMethod::UNSUBSCRIBE,
    HttpMethod::LINK,
    HttpMethod::UNLINK,
    HttpMethod::PURGE,
    HttpMethod::SOURCE,
];

impl HttpMethod {
    /// Method names are case-sensitive; `get` is not `GET`.
    pub fn from_str(s: &str) -> Option<Self> {
        HTTP_METHODS.iter().copied().find(|m| m.to_str() == s)
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            HttpMethod::GET => "GET",
            HttpMethod::HEAD => "HEAD",
            HttpMethod::POST => "POST",
            HttpMethod::PUT => "PUT",
            HttpMethod::DELETE => "DELETE",
            HttpMethod::CONNECT => "CONNECT",
            HttpMethod::OPTIONS => "OPTIONS",
            HttpMethod::TRACE => "TRACE",
            HttpMethod::PATCH => "PATCH",
            HttpMethod::QUERY => "QUERY",
            HttpMethod::PROPFIND => "PROPFIND",
            HttpMethod::PROPPATCH => "PROPPATCH",
            HttpMethod::MKCOL => "MKCOL",
            HttpMethod::MKCALENDAR => "MKCALENDAR",
            HttpMethod::COPY => "COPY",
            HttpMethod::MOVE => "MOVE",
            HttpMethod::LOCK => "LOCK",
            HttpMethod::UNLOCK => "UNLOCK",
            HttpMethod::SEARCH => "SEARCH",
            HttpMethod::ACL => "ACL",
            HttpMethod::BIND => "BIND",
            HttpMethod::REBIND => "REBIND",
            HttpMethod::UNBIND => "UNBIND",
            HttpMethod::REPORT => "REPORT",
            HttpMethod::MKACTIVITY => "MKACTIVITY",
            HttpMethod::CHECKOUT => "CHECKOUT",
            HttpMethod::MERGE => "MERGE",
            HttpMethod::MSEARCH => "M-SEARCH",
            HttpMethod::NOTIFY => "NOTIFY",
            HttpMethod::SUBSCRIBE => "SUBSCRIBE",
            HttpMethod::UNSUBSCRIBE => "UNSUBSCRIBE",
            HttpMethod::LINK => "LINK",
            HttpMethod::UNLINK => "UNLINK",
            HttpMethod::PURGE => "PURGE",
            HttpMethod::SOURCE => "SOURCE",
        }
    }

    /// HEAD responses carry the full head but never a body.
    #[inline]
    pub fn sends_body(&self) -> bool {
        *self != HttpMethod::HEAD
    }

    /// CONNECT asks for a tunnel, which this server never provides.
    #[inline]
    pub fn is_tunnel(&self) -> bool {
        *self == HttpMethod::CONNECT
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.to_str())
    }
}
