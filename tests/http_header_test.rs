#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use hostconfig_fixture::http::protocol::header::{HeaderKey, has_token};

    #[test]
    fn test_known_keys_ignore_case() {
        assert_eq!(HeaderKey::from_str("content-type"), HeaderKey::ContentType);
        assert_eq!(HeaderKey::from_str("CONTENT-LENGTH"), HeaderKey::ContentLength);
        assert_eq!(HeaderKey::from_str("  Expect "), HeaderKey::Expect);
        assert!(matches!(HeaderKey::from_str("connection"), HeaderKey::Connection));
    }

    #[test]
    fn test_custom_keys_keep_spelling() {
        let key = HeaderKey::from_str("X-Request-Id");
        assert!(matches!(key, HeaderKey::Custom(_)));
        assert_eq!(key.as_str(), "X-Request-Id");
        assert_eq!(key, HeaderKey::from_str("x-request-id"));
    }

    #[test]
    fn test_hash_map_lookup_is_case_insensitive() {
        let mut map = HashMap::new();
        map.insert(HeaderKey::from_str("X-Trace"), "abc".to_string());
        map.insert(HeaderKey::ContentType, "application/json".to_string());

        assert_eq!(map.get(&HeaderKey::from_str("x-trace")).unwrap(), "abc");
        assert_eq!(
            map.get(&HeaderKey::Custom("content-type".into())).unwrap(),
            "application/json"
        );
    }

    #[test]
    fn test_display_uses_canonical_name() {
        assert_eq!(HeaderKey::from_str("content-type").to_string(), "Content-Type");
        assert_eq!(HeaderKey::TransferEncoding.to_string(), "Transfer-Encoding");
    }

    #[test]
    fn test_has_token() {
        assert!(has_token("keep-alive, Upgrade", "upgrade"));
        assert!(has_token("Close", "close"));
        assert!(!has_token("closed", "close"));
        assert!(!has_token("", "close"));
    }
}
