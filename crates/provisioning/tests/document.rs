use pretty_assertions::assert_eq;
use provisioning::{ButtonFunction, ProvisionError, SerializeOptions, Session};

fn minimal_session() -> Session {
    let mut session = Session::new();
    assert!(session.set_value("device", "00:07:a1-B2.c3d4"));
    assert!(session.set_value("processNodeName1", "192.168.1.10"));
    session
}

fn render(session: &Session) -> String {
    session
        .serialize(&SerializeOptions::default())
        .expect("document renders")
        .as_str()
        .to_string()
}

/// Slice of the document between `<tag>` and `</tag>`, both included.
fn block<'a>(xml: &'a str, tag: &str) -> &'a str {
    let open = format!("<{tag}>");
    let close = format!("</{tag}>");
    let start = xml.find(&open).unwrap_or_else(|| panic!("no <{tag}> in document"));
    let end = xml[start..].find(&close).expect("unclosed element") + start + close.len();
    &xml[start..end]
}

#[test]
fn minimal_session_renders_defaults_only() {
    let expected = r#"<?xml version="1.0" encoding="UTF-8"?>
<device>
  <deviceProtocol>SIP</deviceProtocol>
  <callManagerGroup>
    <members>
      <member priority="0">
        <callManager>
          <ports>
            <ethernetPhonePort>5060</ethernetPhonePort>
          </ports>
          <processNodeName>192.168.1.10</processNodeName>
        </callManager>
      </member>
    </members>
  </callManagerGroup>
  <dateTimeSetting>
    <timeZone>Pacific Standard/Daylight Time</timeZone>
    <dateTemplate>M/D/Y</dateTemplate>
    <timeFormat>12</timeFormat>
  </dateTimeSetting>
  <sipStack>
    <transportLayerProtocol>1</transportLayerProtocol>
  </sipStack>
  <userLocale>
    <name>United_States</name>
    <langCode>United_States</langCode>
  </userLocale>
  <networkLocale>United_States</networkLocale>
  <ethernetConfig>
  </ethernetConfig>
  <sipLines>
    <line button="1">
      <featureID>9</featureID>
    </line>
  </sipLines>
  <vendorConfig>
    <settingsAccess>1</settingsAccess>
    <webAccess>1</webAccess>
    <sshAccess>0</sshAccess>
    <pcPort>1</pcPort>
    <pcVoiceVlanAccess>0</pcVoiceVlanAccess>
    <spanToPCPort>0</spanToPCPort>
    <gratuitousARP>1</gratuitousARP>
    <bluetooth>1</bluetooth>
    <bluetoothProfile>Handsfree,Headset</bluetoothProfile>
    <preferredCodec>PCMU</preferredCodec>
    <advertiseG722Codec>1</advertiseG722Codec>
    <videoCapability>true</videoCapability>
    <autoTransmitVideo>false</autoTransmitVideo>
    <videoBitRate>1500</videoBitRate>
    <rtcp>1</rtcp>
    <dndControl>1</dndControl>
    <dndCallAlert>5</dndCallAlert>
  </vendorConfig>
</device>
"#;
    let session = minimal_session();
    let doc = session.serialize(&SerializeOptions::default()).unwrap();
    assert_eq!(doc.file_name(), "SEP0007A1B2C3D4.cnf.xml");
    assert_eq!(doc.as_str(), expected);
}

#[test]
fn backup_servers_add_members_in_priority_order() {
    let mut session = minimal_session();
    session.set_value("processNodeName2", "192.168.1.11");
    session.set_value("processNodeName3", "192.168.1.12");
    session.set_value("voipControlPort", "5070");

    let xml = render(&session);
    let members = block(&xml, "members");
    let p0 = members.find(r#"priority="0""#).unwrap();
    let p1 = members.find(r#"priority="1""#).unwrap();
    let p2 = members.find(r#"priority="2""#).unwrap();
    assert!(p0 < p1 && p1 < p2);
    assert_eq!(members.matches("<ethernetPhonePort>5070</ethernetPhonePort>").count(), 3);
    assert!(members.contains("<processNodeName>192.168.1.12</processNodeName>"));
}

#[test]
fn nat_elements_only_when_nat_enabled() {
    let mut session = minimal_session();
    session.set_value("natAddress", "203.0.113.7");
    let xml = render(&session);
    assert!(!xml.contains("natEnabled"));
    assert!(!xml.contains("natAddress"));

    session.select_key("natEnabled", 1);
    let xml = render(&session);
    let sip_stack = block(&xml, "sipStack");
    assert!(sip_stack.contains("<natEnabled>true</natEnabled>"));
    assert!(sip_stack.contains("<natAddress>203.0.113.7</natAddress>"));
}

#[test]
fn snmp_community_follows_snmp_enable() {
    let mut session = minimal_session();
    session.select_key("snmpEnabled", 1);
    let xml = render(&session);
    let vendor = block(&xml, "vendorConfig");
    assert!(vendor.contains("<snmpEnable>1</snmpEnable>"));
    assert!(!vendor.contains("snmpCommunity"));

    session.set_value("snmpCommunity", "public");
    session.set_value("syslogAddr", "192.168.1.50");
    let xml = render(&session);
    let vendor = block(&xml, "vendorConfig");
    let community = vendor.find("<snmpCommunity>public</snmpCommunity>").unwrap();
    let syslog = vendor.find("<syslogAddr>").unwrap();
    assert!(community < syslog);
}

#[test]
fn line_buttons_read_their_own_fields() {
    let mut session = minimal_session();
    let buttons = session.registry().buttons().to_vec();
    let (first, second, third) = (buttons[0], buttons[1], buttons[2]);

    session.commit_text(first.extension, "1001");
    session.commit_text(first.label, "Reception");
    session.commit_text(first.voicemail, "*97");
    session.select(first.auto_answer, 1);

    session.select(second.key_function, ButtonFunction::Line.index());
    session.commit_text(second.extension, "1002");
    session.commit_text(second.auth_id, "u1002");
    session.commit_text(second.password, "s3cret");
    session.commit_text(second.voicemail, "*98");

    session.select(third.key_function, ButtonFunction::SpeedDial.index());
    session.commit_text(third.extension, "5551234");
    session.commit_text(third.label, "Pizza");

    let xml = render(&session);
    let lines = block(&xml, "sipLines");
    let expected = r#"<sipLines>
    <line button="1">
      <featureID>9</featureID>
      <name>1001</name>
      <displayName>Reception</displayName>
      <autoAnswerEnabled>2</autoAnswerEnabled>
      <autoAnswerTimer>1</autoAnswerTimer>
      <voiceMailPilot>*97</voiceMailPilot>
    </line>
    <line button="2">
      <featureID>9</featureID>
      <name>1002</name>
      <authName>u1002</authName>
      <authPassword>s3cret</authPassword>
      <voiceMailPilot>*98</voiceMailPilot>
    </line>
    <line button="3">
      <featureID>21</featureID>
      <name>5551234</name>
      <displayName>Pizza</displayName>
    </line>
  </sipLines>"#;
    assert_eq!(lines, expected);
}

#[test]
fn non_line_buttons_skip_line_only_values_even_when_filled() {
    let mut session = minimal_session();
    let first = session.registry().buttons()[0];
    session.commit_text(first.auth_id, "stale");
    session.select(first.key_function, ButtonFunction::Blf.index());

    let xml = render(&session);
    let lines = block(&xml, "sipLines");
    assert!(lines.contains("<featureID>21</featureID>"));
    assert!(!lines.contains("authName"));
}

#[test]
fn hidden_text_values_are_still_written() {
    let mut session = minimal_session();
    session.select_key("pcVoiceVlanAccess", 2);
    session.set_value("pcPortVlanId", "20");
    session.select_key("pcVoiceVlanAccess", 0);

    let vlan = session.registry().find("pcPortVlanId").unwrap();
    assert!(session.field(vlan).is_hidden());
    assert_eq!(session.hidden_values(), vec![vlan]);

    let xml = render(&session);
    assert!(block(&xml, "ethernetConfig").contains("<pcPortVlanId>20</pcPortVlanId>"));
}

#[test]
fn media_ports_are_emitted_independently() {
    let mut session = minimal_session();
    session.set_value("stopMediaPort", "32766");
    let xml = render(&session);
    assert!(!xml.contains("startMediaPort"));
    assert!(xml.contains("<stopMediaPort>32766</stopMediaPort>"));
}

#[test]
fn mtu_follows_vendor_config() {
    let mut session = minimal_session();
    session.set_value("mtu", "1400");
    let xml = render(&session);
    assert!(xml.contains("  </vendorConfig>\n  <mtu>1400</mtu>\n</device>\n"));
}

#[test]
fn invalid_mac_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = Session::new();
    session.set_value("device", "00:07:a1");
    session.set_value("processNodeName1", "pbx");

    let err = session
        .save(&SerializeOptions::default(), dir.path())
        .unwrap_err();
    assert!(matches!(err, ProvisionError::InvalidMac { .. }));
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn save_writes_and_overwrites_the_device_file() {
    let dir = tempfile::tempdir().unwrap();
    let mut session = minimal_session();

    let path = session.save(&SerializeOptions::default(), dir.path()).unwrap();
    assert_eq!(path, dir.path().join("SEP0007A1B2C3D4.cnf.xml"));
    let first = std::fs::read_to_string(&path).unwrap();
    assert!(!first.contains("deviceLabel"));

    session.set_value("deviceLabel", "Lobby");
    session.save(&SerializeOptions::default(), dir.path()).unwrap();
    let second = std::fs::read_to_string(&path).unwrap();
    assert!(second.contains("<deviceLabel>Lobby</deviceLabel>"));
}

#[test]
fn save_into_missing_directory_reports_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope");
    let err = minimal_session()
        .save(&SerializeOptions::default(), &missing)
        .unwrap_err();
    match err {
        ProvisionError::Io { path, .. } => {
            assert_eq!(path, missing.join("SEP0007A1B2C3D4.cnf.xml"))
        }
        other => panic!("expected io error, got {other:?}"),
    }
}
