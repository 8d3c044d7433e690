#[cfg(test)]
mod tests {
    use hostconfig_fixture::http::protocol::version::HttpVersion;

    #[test]
    fn test_http_version_as_str() {
        assert_eq!(HttpVersion::Http10.as_str(), "HTTP/1.0");
        assert_eq!(HttpVersion::Http11.as_str(), "HTTP/1.1");
    }

    #[test]
    fn test_http_version_from_str() {
        assert_eq!(HttpVersion::from_str("HTTP/1.0"), Some(HttpVersion::Http10));
        assert_eq!(HttpVersion::from_str("HTTP/1.1"), Some(HttpVersion::Http11));
        assert_eq!(HttpVersion::from_str("http/1.1"), Some(HttpVersion::Http11));

        // only HTTP/1.x framing is spoken
        assert_eq!(HttpVersion::from_str("HTTP/2.0"), None);
        assert_eq!(HttpVersion::from_str("HTTP/0.9"), None);
        assert_eq!(HttpVersion::from_str("INVALID"), None);
        assert_eq!(HttpVersion::from_str(""), None);
    }

    #[test]
    fn test_persistence_defaults() {
        assert!(HttpVersion::Http11.persistent_by_default());
        assert!(!HttpVersion::Http10.persistent_by_default());
    }

    #[test]
    fn test_http_version_display() {
        assert_eq!(format!("{}", HttpVersion::Http10), "HTTP/1.0");
        assert_eq!(format!("{}", HttpVersion::Http11), "HTTP/1.1");
    }
}
