//! Field registry: the ordered catalog of every configurable setting.
//!
//! The registry is built once through [`RegistryBuilder`], which records
//! section boundaries, button groups and visibility rules as data while the
//! fields are appended. After `build()` no field is added or removed; only
//! values, selections and `hidden` flags change (through `Session`).
//!
//! The lookup layer lives here too: [`Registry::value`] and
//! [`Registry::encoded_value`] resolve an XML key to the first matching field
//! and fall back to an empty string, since almost every setting is optional.

use std::ops::Range;

use crate::catalog::{self, ButtonFunction};
use crate::field::{Choice, Field, FieldId, FieldKind, TextFilter};
use crate::visibility::{Condition, DependencyTable, Rule};

/// A titled run of fields, introduced by a header field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    pub help: &'static str,
    pub header: FieldId,
    range: Range<usize>,
}

impl Section {
    /// Fields after the header, up to the next section.
    pub fn fields(&self) -> impl Iterator<Item = FieldId> {
        self.range.clone().map(FieldId)
    }

    pub fn contains(&self, id: FieldId) -> bool {
        id == self.header || self.range.contains(&id.index())
    }
}

/// One programmable line key. The nine fields share XML keys with the other
/// buttons, so they are only ever addressed through this struct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonGroup {
    pub number: u8,
    pub key_function: FieldId,
    pub extension: FieldId,
    pub label: FieldId,
    pub auth_id: FieldId,
    pub password: FieldId,
    pub auto_answer: FieldId,
    pub forward_all: FieldId,
    pub pickup_group: FieldId,
    pub voicemail: FieldId,
}

impl ButtonGroup {
    /// Shown unless the key is `Disabled`.
    pub fn identity_fields(&self) -> [FieldId; 2] {
        [self.extension, self.label]
    }

    /// Shown only while the key is a `Line`.
    pub fn line_fields(&self) -> [FieldId; 6] {
        [
            self.auth_id,
            self.password,
            self.auto_answer,
            self.forward_all,
            self.pickup_group,
            self.voicemail,
        ]
    }

    pub fn sub_fields(&self) -> [FieldId; 8] {
        let [extension, label] = self.identity_fields();
        let [auth_id, password, auto_answer, forward_all, pickup_group, voicemail] =
            self.line_fields();
        [
            extension,
            label,
            auth_id,
            password,
            auto_answer,
            forward_all,
            pickup_group,
            voicemail,
        ]
    }
}

#[derive(Debug, Clone)]
pub struct Registry {
    pub(crate) fields: Vec<Field>,
    pub(crate) dependencies: DependencyTable,
    sections: Vec<Section>,
    buttons: Vec<ButtonGroup>,
    mac: Option<FieldId>,
}

impl Registry {
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Ids are only handed out by the builder of this registry, so indexing
    /// cannot go out of bounds.
    pub fn field(&self, id: FieldId) -> &Field {
        &self.fields[id.index()]
    }

    pub fn get(&self, id: FieldId) -> Option<&Field> {
        self.fields.get(id.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldId, &Field)> {
        self.fields
            .iter()
            .enumerate()
            .map(|(index, field)| (FieldId(index), field))
    }

    /// Fields the operator is currently offered, headers included.
    pub fn visible(&self) -> impl Iterator<Item = (FieldId, &Field)> {
        self.iter().filter(|(_, field)| !field.is_hidden())
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn section_of(&self, id: FieldId) -> Option<&Section> {
        self.sections.iter().find(|section| section.contains(id))
    }

    pub fn buttons(&self) -> &[ButtonGroup] {
        &self.buttons
    }

    pub fn mac_field(&self) -> Option<FieldId> {
        self.mac
    }

    pub fn dependencies(&self) -> &DependencyTable {
        &self.dependencies
    }

    pub fn button_function(&self, button: &ButtonGroup) -> ButtonFunction {
        self.field(button.key_function)
            .selected_index()
            .and_then(ButtonFunction::from_repr)
            .unwrap_or(ButtonFunction::Disabled)
    }

    // --- Lookup layer -----------------------------------------------------------------------

    /// First field carrying `key`, in registry order. Headers have no key and
    /// are never matched.
    pub fn find(&self, key: &str) -> Option<FieldId> {
        if key.is_empty() {
            return None;
        }
        self.iter()
            .find(|(_, field)| field.key() == key)
            .map(|(id, _)| id)
    }

    /// Raw value of the first field with `key`, or `""`.
    pub fn value(&self, key: &str) -> &str {
        self.find(key).map_or("", |id| self.field(id).raw_value())
    }

    /// Encoded value of the selected option of the first field with `key`, or
    /// `""` for text fields and unknown keys.
    pub fn encoded_value(&self, key: &str) -> &'static str {
        self.find(key).map_or("", |id| self.field(id).encoded_value())
    }

    pub fn selected_index(&self, key: &str) -> Option<usize> {
        self.find(key).and_then(|id| self.field(id).selected_index())
    }

    // --- Navigation helpers for the shell ----------------------------------------------------

    pub fn first_editable(&self) -> Option<FieldId> {
        self.iter()
            .find(|(_, field)| field.is_editable())
            .map(|(id, _)| id)
    }

    /// Next editable field after `from`; `None` at the end of the form.
    pub fn next_editable(&self, from: FieldId) -> Option<FieldId> {
        self.iter()
            .skip(from.index() + 1)
            .find(|(_, field)| field.is_editable())
            .map(|(id, _)| id)
    }

    /// Previous editable field before `from`; `None` at the start of the form.
    pub fn prev_editable(&self, from: FieldId) -> Option<FieldId> {
        self.fields[..from.index().min(self.fields.len())]
            .iter()
            .enumerate()
            .rev()
            .find(|(_, field)| field.is_editable())
            .map(|(index, _)| FieldId(index))
    }
}

#[derive(Debug, Default)]
pub struct RegistryBuilder {
    fields: Vec<Field>,
    sections: Vec<Section>,
    buttons: Vec<ButtonGroup>,
    dependencies: DependencyTable,
    mac: Option<FieldId>,
}

impl RegistryBuilder {
    fn push(&mut self, field: Field) -> FieldId {
        let id = FieldId(self.fields.len());
        self.fields.push(field);
        id
    }

    fn close_section(&mut self) {
        let end = self.fields.len();
        if let Some(section) = self.sections.last_mut() {
            section.range.end = end;
        }
    }

    /// Append a `=== TITLE ===` header and start a new section after it.
    pub fn begin_section(&mut self, title: impl Into<String>, help: &'static str) -> FieldId {
        self.close_section();
        let title = title.into();
        let header = self.push(Field::text(
            format!("=== {title} ==="),
            "",
            FieldKind::Header,
            help,
        ));
        let start = header.index() + 1;
        self.sections.push(Section {
            title,
            help,
            header,
            range: start..start,
        });
        header
    }

    pub fn define_field(
        &mut self,
        label: impl Into<String>,
        key: &'static str,
        kind: FieldKind,
        help: &'static str,
    ) -> FieldId {
        self.push(Field::text(label, key, kind, help))
    }

    /// Panics if `default` is not a valid index into `options`.
    pub fn define_dropdown(
        &mut self,
        label: impl Into<String>,
        key: &'static str,
        help: &'static str,
        options: &'static [Choice],
        default: usize,
    ) -> FieldId {
        self.push(Field::dropdown(label, key, help, options, default))
    }

    /// The device MAC: required, sanitized on every commit, and the one field
    /// that gates saving.
    pub fn define_mac(
        &mut self,
        label: impl Into<String>,
        key: &'static str,
        help: &'static str,
    ) -> FieldId {
        let id = self.push(
            Field::text(label, key, FieldKind::Required, help).with_filter(TextFilter::MacAddress),
        );
        self.mac = Some(id);
        id
    }

    pub fn depend(
        &mut self,
        trigger: FieldId,
        show_when: Condition,
        dependents: impl IntoIterator<Item = FieldId>,
    ) {
        self.dependencies.add(Rule {
            trigger,
            show_when,
            dependents: dependents.into_iter().collect(),
        });
    }

    /// Append a `BUTTON n` section with its nine fields and visibility rules.
    pub fn define_button(&mut self, number: u8, default: ButtonFunction) -> ButtonGroup {
        self.begin_section(format!("BUTTON {number}"), "Line Configuration");
        let key_function = self.define_dropdown(
            "Key Function",
            "lineType",
            "Choose 'Line' for a standard extension, 'SpeedDial' for 1-touch calling, \
             or 'BLF' to monitor if a colleague is on the phone.",
            catalog::BUTTON_FUNCTIONS,
            default.index(),
        );
        let button = ButtonGroup {
            number,
            key_function,
            extension: self.define_field(
                "Extension",
                "name",
                FieldKind::Optional,
                "The phone number for this line (e.g. 1001).",
            ),
            label: self.define_field(
                "Label",
                "displayName",
                FieldKind::Optional,
                "Label shown next to the button (e.g. 'Line 1').",
            ),
            auth_id: self.define_field(
                "Auth ID",
                "authName",
                FieldKind::Optional,
                "SIP Username (Often the same as Extension, but check provider).",
            ),
            password: self.define_field(
                "SIP Password",
                "authPassword",
                FieldKind::Optional,
                "SIP Password for this extension.",
            ),
            auto_answer: self.define_dropdown(
                "Auto Answer",
                "autoAnswerEnabled",
                "If Enabled, the phone answers calls automatically on speaker.",
                catalog::DISABLED_ENABLED,
                0,
            ),
            forward_all: self.define_field(
                "Forward All",
                "callForwardURI",
                FieldKind::Optional,
                "Number to forward calls to unconditionally.",
            ),
            pickup_group: self.define_field(
                "Pickup Group",
                "callPickupGroupURI",
                FieldKind::Optional,
                "Code to dial to pick up a call ringing in your group.",
            ),
            voicemail: self.define_field(
                "Voicemail #",
                "voiceMailPilot",
                FieldKind::Optional,
                "Number dialed when the 'Messages' button is pressed.",
            ),
        };
        self.depend(
            key_function,
            Condition::NotSelected(ButtonFunction::Disabled.index()),
            button.identity_fields(),
        );
        self.depend(
            key_function,
            Condition::Selected(ButtonFunction::Line.index()),
            button.line_fields(),
        );
        self.buttons.push(button);
        button
    }

    pub fn build(mut self) -> Registry {
        self.close_section();
        Registry {
            fields: self.fields,
            dependencies: self.dependencies,
            sections: self.sections,
            buttons: self.buttons,
            mac: self.mac,
        }
    }
}

impl Registry {
    /// The complete Cisco 8945 SIP form, in firmware document order.
    ///
    /// Visibility is not evaluated here; `Session` does that on construction.
    pub fn cisco_8945() -> Self {
        use catalog::*;
        use FieldKind::{Optional, Required};

        let mut b = Registry::builder();

        b.begin_section("IDENTITY & NETWORK", "Core System Settings");
        b.define_mac(
            "MAC Address",
            "device",
            "REQUIRED: The unique 12-char ID on the back of the phone.",
        );
        b.define_field(
            "Phone Label",
            "deviceLabel",
            Optional,
            "Custom text shown in the top status bar (e.g. 'Reception').",
        );
        b.define_field(
            "Primary PBX IP",
            "processNodeName1",
            Required,
            "REQUIRED: IP Address of your SIP Server / PBX (e.g. 192.168.1.10).",
        );
        b.define_field(
            "Secondary PBX",
            "processNodeName2",
            Optional,
            "Backup Server IP (e.g. 192.168.1.11). Leave blank if none.",
        );
        b.define_field(
            "Tertiary PBX",
            "processNodeName3",
            Optional,
            "Second Backup Server IP. Leave blank if none.",
        );
        b.define_dropdown(
            "Transport",
            "transportLayerProtocol",
            "Network Protocol. UDP (Standard) is faster with lower overhead. Use TCP/TLS only \
             if your provider requires reliable or encrypted signaling.",
            TRANSPORTS,
            0,
        );
        b.define_field(
            "Firmware Load",
            "loadInformation",
            Optional,
            "Specific firmware version to load (e.g. sip8941_45.9-4-2-13). Leave blank to use \
             the default load defined in the TFTP server config.",
        );
        b.define_field(
            "SIP Port",
            "voipControlPort",
            Optional,
            "Port for SIP Signaling. Default is 5060. Changing this may require firewall \
             adjustments.",
        );

        b.begin_section("ETHERNET & VLAN", "Network Layer 2 Settings");
        b.define_field(
            "Voice VLAN ID",
            "adminVlanId",
            Optional,
            "VLAN ID for Voice traffic. Leave blank if Network Port is untagged.",
        );
        let pc_vlan_mode = b.define_dropdown(
            "PC Port VLAN Mode",
            "pcVoiceVlanAccess",
            "Determines which VLAN the computer connected to the phone will use.",
            PC_VLAN_MODES,
            0,
        );
        let pc_vlan_id = b.define_field(
            "PC VLAN ID",
            "pcPortVlanId",
            Optional,
            "Enter the VLAN ID for the computer (Data VLAN).",
        );
        b.depend(pc_vlan_mode, Condition::Selected(PC_VLAN_SPECIFIC), [pc_vlan_id]);
        b.define_dropdown(
            "Span to PC",
            "spanToPCPort",
            "Advanced: Copies all phone audio/traffic to the PC port. Used for \
             Wireshark/Packet Capture. WARNING: Can reduce network performance.",
            DISABLED_ENABLED,
            0,
        );
        b.define_dropdown(
            "Gratuitous ARP",
            "gratuitousARP",
            "Send ARP updates on boot. Critical for scenarios where the Router might not know \
             where the phone is (e.g. redundant links). (Rec: Enabled)",
            DISABLED_ENABLED,
            1,
        );
        b.define_field(
            "MTU Size",
            "mtu",
            Optional,
            "Max Transmission Unit. 1500 is Ethernet Standard. Use 1300-1400 for VPNs to \
             prevent packet fragmentation and dropped calls.",
        );

        b.begin_section("SECURITY & ACCESS", "Device Access Control");
        b.define_dropdown(
            "Settings Lock",
            "settingsAccess",
            "Locks the 'Settings' menu on the phone screen to prevent changes.",
            DISABLED_ENABLED,
            1,
        );
        b.define_dropdown(
            "Web Access",
            "webAccess",
            "Enables the phone's web page for viewing/changing settings.",
            DISABLED_ENABLED,
            1,
        );
        b.define_dropdown(
            "SSH Access",
            "sshAccess",
            "Enables SSH for advanced remote administration.",
            DISABLED_ENABLED,
            0,
        );
        b.define_field("SSH Username", "sshUserId", Optional, "Username for SSH login.");
        b.define_field("SSH Password", "sshPassword", Optional, "Password for SSH login.");
        b.define_field(
            "Admin Password",
            "adminPassword",
            Optional,
            "Password to unlock the Settings menu or Web Interface.",
        );
        b.define_dropdown(
            "PC Port",
            "pcPort",
            "Enable/Disable the PC Ethernet port.",
            DISABLED_ENABLED,
            1,
        );

        b.begin_section("HARDWARE", "Physical Peripherals");
        b.define_dropdown(
            "Bluetooth",
            "bluetooth",
            "Enable Bluetooth Radio.",
            DISABLED_ENABLED,
            1,
        );
        b.define_dropdown(
            "BT Profiles",
            "bluetoothProfile",
            "Allowed BT Profiles (Handsfree/Headset).",
            BLUETOOTH_PROFILES,
            2,
        );

        b.begin_section("AUDIO & VIDEO", "Codecs and Call Quality");
        b.define_dropdown(
            "Preferred Codec",
            "preferredCodec",
            "Audio quality. G.711 is standard. G.729 is compressed.",
            CODECS,
            0,
        );
        b.define_dropdown(
            "Advertise G.722",
            "advertiseG722Codec",
            "Advertise G.722 support for High Definition calls.",
            DISABLED_ENABLED,
            1,
        );
        b.define_field(
            "Audio DSCP",
            "dscpForAudio",
            Optional,
            "QoS Packet Tagging. 184 (EF - Expedited Forwarding) is the industry standard for \
             Voice. Ensure your Switch/Router respects this tag.",
        );
        b.define_field(
            "RTP Min Port",
            "startMediaPort",
            Optional,
            "Start of UDP Port range for Audio/Video. Default 16384. Ensure your Firewall \
             allows this range inbound/outbound.",
        );
        b.define_field(
            "RTP Max Port",
            "stopMediaPort",
            Optional,
            "End of UDP Port range for Audio/Video. Default 32766. Range must be large enough \
             to handle concurrent calls.",
        );
        b.define_dropdown(
            "Video Enable",
            "videoCapability",
            "Enable the built-in camera for video calls. Requires a PBX that supports Video \
             (H.264).",
            NO_YES,
            1,
        );
        b.define_dropdown(
            "Start Video on Answer",
            "autoTransmitVideo",
            "Control if video starts automatically when you answer. 'No' provides privacy \
             (Audio only) until you press the Video button. 'Yes' sends video immediately upon \
             answering.",
            NO_YES,
            0,
        );
        b.define_dropdown(
            "Video Quality",
            "videoBitRate",
            "Max bandwidth/quality for Video. Select based on your upload speed. 1.5M+ \
             recommended for HD 720p.",
            VIDEO_BITRATES,
            2,
        );
        b.define_field(
            "Video DSCP",
            "dscpForVideo",
            Optional,
            "QoS Tag for Video. 136 (AF41) is standard. Set lower priority than Audio to \
             prioritize voice clarity.",
        );
        b.define_dropdown(
            "RTCP Stats",
            "rtcp",
            "Send detailed call quality reports (Jitter/Latency constraints) to the SIP Server.",
            DISABLED_ENABLED,
            1,
        );

        b.begin_section("FEATURES", "Do Not Disturb & User Features");
        b.define_dropdown(
            "Do Not Disturb",
            "dndControl",
            "Show the 'Do Not Disturb' button on the main screen.",
            DISABLED_ENABLED,
            1,
        );
        b.define_dropdown(
            "DND Alert",
            "dndCallAlert",
            "How to notify you of incoming calls when DND is active.",
            DND_ALERTS,
            1,
        );
        b.define_field(
            "DND Timer",
            "dndReminderTimer",
            Optional,
            "Play a reminder tone every X minutes when DND is active.",
        );
        let nat_enabled = b.define_dropdown(
            "NAT Enabled",
            "natEnabled",
            "Select 'Yes' if this phone is behind a home router/firewall. Essential for remote \
             phones.",
            NO_YES,
            0,
        );
        let nat_address = b.define_field(
            "NAT Address",
            "natAddress",
            Optional,
            "The Public IP Address of your internet connection. PRO TIP: If you have 'One-Way \
             Audio' (can't hear caller), setting this usually fixes it.",
        );
        b.depend(nat_enabled, Condition::Selected(1), [nat_address]);

        b.begin_section("MONITORING", "SNMP & Syslog");
        let snmp_enabled = b.define_dropdown(
            "SNMP Enable",
            "snmpEnabled",
            "Enable Remote Monitoring.",
            DISABLED_ENABLED,
            0,
        );
        let snmp_community = b.define_field(
            "Community String",
            "snmpCommunity",
            Optional,
            "SNMP Password (e.g. public).",
        );
        b.depend(snmp_enabled, Condition::Selected(1), [snmp_community]);
        b.define_field(
            "Syslog Server",
            "syslogAddr",
            Optional,
            "IP Address for sending Debug Logs (e.g. 192.168.1.50).",
        );

        b.begin_section("REGION & TIME", "Localization");
        b.define_dropdown(
            "Language",
            "userLocale",
            "Screen Language (Load from Server).",
            USER_LOCALES,
            0,
        );
        b.define_dropdown(
            "Dial Tones",
            "networkLocale",
            "Sets the specific frequencies for Dial Tone, Busy Signal, and Ringback. Must match \
             your region (e.g. US vs UK) or calls may sound 'wrong'.",
            NETWORK_LOCALES,
            0,
        );
        b.define_field(
            "Dial Plan",
            "dialTemplate",
            Optional,
            "Dialing Rules File (e.g. dialplan.xml).",
        );
        b.define_dropdown(
            "Time Zone",
            "timeZone",
            "Local Time Zone.",
            TIME_ZONES,
            DEFAULT_TIME_ZONE,
        );
        b.define_field(
            "NTP Server",
            "ntpServerAddr",
            Optional,
            "Time Server IP (e.g. pool.ntp.org or 4.2.2.2).",
        );
        b.define_dropdown("Date Format", "dateTemplate", "Display format.", DATE_FORMATS, 0);
        b.define_dropdown("Time Format", "timeFormat", "Clock format.", TIME_FORMATS, 0);

        b.begin_section("EXTERNAL URLS", "Integration Links");
        b.define_field(
            "Directory URL",
            "directoryURL",
            Optional,
            "URL for the Corporate Phonebook.",
        );
        b.define_field("Services URL", "servicesURL", Optional, "URL for the Services Menu.");
        b.define_field(
            "Auth URL",
            "authenticationURL",
            Optional,
            "URL for validating Services.",
        );
        b.define_field(
            "Info URL",
            "informationURL",
            Optional,
            "URL for the '?' Help button.",
        );
        b.define_field(
            "Softkey Template",
            "softKeyFile",
            Optional,
            "XML file on TFTP server defining button layouts (e.g. softkeys.xml). Allows \
             removing/reordering buttons like 'Redial'.",
        );
        b.define_field(
            "Idle/Saver URL",
            "idleURL",
            Optional,
            "URL to an XML file for the screensaver. Activated when phone is idle for the \
             Timeout duration.",
        );
        b.define_field(
            "Saver Timeout",
            "idleTimeout",
            Optional,
            "Time in seconds before the screensaver starts (e.g. 300 = 5 Minutes). Set to 0 to \
             disable.",
        );
        b.define_field(
            "Wallpaper URL",
            "backgroundImage",
            Optional,
            "URL to a Background Image. SPECS: 640x480 resolution, PNG format, 24-bit Color \
             Depth. Other formats (JPG/BMP) will NOT work.",
        );

        for number in 1..=4 {
            let default = if number == 1 {
                ButtonFunction::Line
            } else {
                ButtonFunction::Disabled
            };
            b.define_button(number, default);
        }

        b.build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sections_are_recorded_in_order() {
        let registry = Registry::cisco_8945();
        let titles: Vec<&str> = registry.sections().iter().map(|s| s.title.as_str()).collect();
        assert_eq!(
            titles,
            [
                "IDENTITY & NETWORK",
                "ETHERNET & VLAN",
                "SECURITY & ACCESS",
                "HARDWARE",
                "AUDIO & VIDEO",
                "FEATURES",
                "MONITORING",
                "REGION & TIME",
                "EXTERNAL URLS",
                "BUTTON 1",
                "BUTTON 2",
                "BUTTON 3",
                "BUTTON 4",
            ]
        );
        let covered: usize = registry
            .sections()
            .iter()
            .map(|s| s.fields().count() + 1)
            .sum();
        assert_eq!(covered, registry.len());
    }

    #[test]
    fn buttons_are_contiguous_groups_of_nine() {
        let registry = Registry::cisco_8945();
        assert_eq!(registry.buttons().len(), 4);
        for button in registry.buttons() {
            let section = registry.section_of(button.key_function).unwrap();
            let ids: Vec<FieldId> = section.fields().collect();
            let mut expected = vec![button.key_function];
            expected.extend(button.sub_fields());
            assert_eq!(ids, expected);
            assert_eq!(section.title, format!("BUTTON {}", button.number));
        }
    }

    #[test]
    fn button_defaults() {
        let registry = Registry::cisco_8945();
        let functions: Vec<ButtonFunction> = registry
            .buttons()
            .iter()
            .map(|b| registry.button_function(b))
            .collect();
        assert_eq!(
            functions,
            [
                ButtonFunction::Line,
                ButtonFunction::Disabled,
                ButtonFunction::Disabled,
                ButtonFunction::Disabled
            ]
        );
    }

    #[test]
    fn keys_are_unique_outside_button_groups() {
        let registry = Registry::cisco_8945();
        let button_fields: Vec<FieldId> = registry
            .buttons()
            .iter()
            .flat_map(|b| std::iter::once(b.key_function).chain(b.sub_fields()))
            .collect();
        let mut seen = std::collections::HashSet::new();
        for (id, field) in registry.iter() {
            if field.is_header() || button_fields.contains(&id) {
                continue;
            }
            assert!(seen.insert(field.key()), "duplicate key {}", field.key());
        }
    }

    #[test]
    fn lookup_resolves_first_match_and_misses_to_empty() {
        let registry = Registry::cisco_8945();
        assert_eq!(registry.value("timeZone"), "Pacific Standard/Daylight Time (GMT-8)");
        assert_eq!(registry.encoded_value("timeZone"), "Pacific Standard/Daylight Time");
        assert_eq!(registry.encoded_value("lineType"), "1");
        assert_eq!(registry.find("lineType"), Some(registry.buttons()[0].key_function));
        assert_eq!(registry.value("doesNotExist"), "");
        assert_eq!(registry.encoded_value("deviceLabel"), "");
        assert_eq!(registry.find(""), None);
        assert_eq!(registry.selected_index("bluetoothProfile"), Some(2));
    }

    #[test]
    fn mac_field_is_required_and_filtered() {
        let registry = Registry::cisco_8945();
        let mac = registry.mac_field().unwrap();
        let field = registry.field(mac);
        assert_eq!(field.key(), "device");
        assert!(field.is_required());
        assert_eq!(field.filter(), TextFilter::MacAddress);
    }

    #[test]
    fn navigation_skips_headers() {
        let registry = Registry::cisco_8945();
        let first = registry.first_editable().unwrap();
        assert_eq!(registry.field(first).key(), "device");
        assert_eq!(registry.prev_editable(first), None);

        let label = registry.find("mtu").unwrap();
        let next = registry.next_editable(label).unwrap();
        assert_eq!(registry.field(next).key(), "settingsAccess");
        assert_eq!(registry.prev_editable(next), Some(label));
    }

    #[test]
    fn builder_closes_trailing_section() {
        let mut b = Registry::builder();
        b.begin_section("ONLY", "help");
        let a = b.define_field("A", "a", FieldKind::Optional, "");
        let c = b.define_dropdown("C", "c", "", catalog::NO_YES, 1);
        let registry = b.build();
        let section = &registry.sections()[0];
        assert_eq!(section.fields().collect::<Vec<_>>(), [a, c]);
        assert_eq!(registry.field(section.header).label(), "=== ONLY ===");
        assert_eq!(registry.mac_field(), None);
    }
}
