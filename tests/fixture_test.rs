#[cfg(test)]
mod tests {
    use hostconfig_fixture::fixture::HostConfigFixture;
    use serde_json::{Value, json};

    fn expected() -> Value {
        json!({"hostconfigs": {"hostconfig": [
            {"host-id": "devstack",
             "host-type": "ODL L2",
             "config": {
                 "supported_vnic_types": [
                     {"vnic_type": "normal", "vif_type": "ovs", "vif_details": {}}
                 ],
                 "allowed_network_types": ["local", "vlan", "vxlan", "gre"],
                 "bridge_mappings": {"physnet1": "br-ex"}
             }}
        ]}})
    }

    #[test]
    fn test_devstack_document_shape() {
        let body = HostConfigFixture::devstack().to_json().unwrap();
        let parsed: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(parsed, expected());
    }

    #[test]
    fn test_default_is_devstack() {
        assert_eq!(HostConfigFixture::default(), HostConfigFixture::devstack());
    }

    #[test]
    fn test_field_order_is_preserved() {
        let body = HostConfigFixture::devstack().to_json().unwrap();
        let text = std::str::from_utf8(&body).unwrap();

        let host_id = text.find("\"host-id\"").unwrap();
        let host_type = text.find("\"host-type\"").unwrap();
        let config = text.find("\"config\"").unwrap();
        assert!(host_id < host_type && host_type < config);

        let vnic = text.find("\"supported_vnic_types\"").unwrap();
        let allowed = text.find("\"allowed_network_types\"").unwrap();
        let bridges = text.find("\"bridge_mappings\"").unwrap();
        assert!(vnic < allowed && allowed < bridges);

        assert!(text.contains(r#"["local","vlan","vxlan","gre"]"#));
    }

    #[test]
    fn test_hyphenated_keys_round_trip_into_typed_model() {
        let parsed: HostConfigFixture = serde_json::from_value(expected()).unwrap();
        let entry = &parsed.hostconfigs.hostconfig[0];
        assert_eq!(entry.host_id, "devstack");
        assert_eq!(entry.host_type, "ODL L2");
        assert_eq!(entry.config.bridge_mappings["physnet1"], "br-ex");
        assert!(entry.config.supported_vnic_types[0].vif_details.is_empty());
        assert_eq!(parsed, HostConfigFixture::devstack());
    }

    #[test]
    fn test_serialization_is_stable() {
        let fixture = HostConfigFixture::devstack();
        assert_eq!(fixture.to_json().unwrap(), fixture.to_json().unwrap());
    }
}
