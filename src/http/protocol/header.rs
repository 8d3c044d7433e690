use std::fmt;
use std::hash::Hash;
use std::hash::Hasher;

macro_rules! define_header_keys {
    ($($name:ident => $string:expr),* $(,)?) => {
        /// Header names the fixture server reads or writes. Everything else
        /// is kept verbatim as `Custom`.
        #[derive(Debug, Clone)]
        pub enum HeaderKey {
            $($name,)*
            Custom(String),
        }

        impl HeaderKey {
            pub fn from_str(s: &str) -> Self {
                let trimmed = s.trim();
                $(
                    if trimmed.eq_ignore_ascii_case($string) {
                        return HeaderKey::$name;
                    }
                )*
                HeaderKey::Custom(trimmed.to_string())
            }

            pub fn as_str(&self) -> &str {
                match self {
                    $(
                        HeaderKey::$name => $string,
                    )*
                    HeaderKey::Custom(s) => s.as_str(),
                }
            }
        }

        // Names compare case-insensitively, storage keeps the original spelling.
        impl PartialEq for HeaderKey {
            fn eq(&self, other: &Self) -> bool {
                self.as_str().eq_ignore_ascii_case(other.as_str())
            }
        }

        impl Eq for HeaderKey {}

        impl Hash for HeaderKey {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.as_str().to_ascii_lowercase().hash(state);
            }
        }
    };
}

define_header_keys! {
    Connection => "Connection",
    TransferEncoding => "Transfer-Encoding",
    Expect => "Expect",
    ContentLength => "Content-Length",
    ContentType => "Content-Type",
}

impl fmt::Display for HeaderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// True when a comma separated header value lists `token`, ignoring case.
pub fn has_token(value: &str, token: &str) -> bool {
    value
        .split(',')
        .any(|part| part.trim().eq_ignore_ascii_case(token))
}
