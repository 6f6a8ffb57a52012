//! `SEP<MAC>.cnf.xml` serializer.
//!
//! Walks the registry in a fixed element order and writes one `<device>`
//! document. Optional leaves are emitted only when their effective value is
//! non-empty; dropdown-backed leaves always carry a value. The `hidden` flag is
//! never consulted.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use quick_xml::escape::partial_escape;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use tracing::{debug, info};

use crate::catalog::ButtonFunction;
use crate::errors::{ProvisionError, Result};
use crate::field::FieldId;
use crate::mac::{is_complete_mac, sanitize_mac};
use crate::registry::{ButtonGroup, Registry};

/// Port written into every `callManager` when the SIP port field is empty.
pub const DEFAULT_SIP_PORT: &str = "5060";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerializeOptions {
    /// Escape `<`, `>` and `&` in field values. When off, values are written
    /// verbatim and may produce malformed XML.
    pub escape_values: bool,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            escape_values: true,
        }
    }
}

/// A rendered provisioning document, not yet on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    mac: String,
    file_name: String,
    xml: String,
}

impl Document {
    pub fn mac(&self) -> &str {
        &self.mac
    }

    /// `SEP<MAC>.cnf.xml`
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn as_str(&self) -> &str {
        &self.xml
    }

    pub fn as_bytes(&self) -> &[u8] {
        self.xml.as_bytes()
    }

    /// Write into `dir`, replacing any existing file of the same name.
    pub fn write_to(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        let path = dir.as_ref().join(&self.file_name);
        fs::write(&path, self.as_bytes()).map_err(|source| ProvisionError::Io {
            path: path.clone(),
            source,
        })?;
        info!(path = %path.display(), bytes = self.xml.len(), "provisioning file written");
        Ok(path)
    }
}

pub fn file_name_for(mac: &str) -> String {
    format!("SEP{mac}.cnf.xml")
}

/// Render the registry into a document.
///
/// Fails with [`ProvisionError::InvalidMac`] unless the MAC field sanitizes to
/// exactly twelve hex digits.
pub fn serialize(registry: &Registry, options: &SerializeOptions) -> Result<Document> {
    let raw_mac = registry
        .mac_field()
        .map_or("", |id| registry.field(id).raw_value());
    let mac = sanitize_mac(raw_mac);
    if !is_complete_mac(&mac) {
        debug!(mac = %mac, "refusing to serialize without a complete MAC");
        return Err(ProvisionError::InvalidMac { sanitized: mac });
    }

    let mut w = DocWriter::new(options.escape_values);
    w.declaration()?;
    w.element("device", |w| write_device(w, registry))?;
    let xml = w.finish()?;

    debug!(mac = %mac, bytes = xml.len(), "provisioning document rendered");
    Ok(Document {
        file_name: file_name_for(&mac),
        mac,
        xml,
    })
}

/// Serialize and write into `dir`. Nothing is written on validation failure.
pub fn save(
    registry: &Registry,
    options: &SerializeOptions,
    dir: impl AsRef<Path>,
) -> Result<PathBuf> {
    serialize(registry, options)?.write_to(dir)
}

fn write_device(w: &mut DocWriter, r: &Registry) -> io::Result<()> {
    w.leaf("deviceProtocol", "SIP")?;
    w.optional_leaf("deviceLabel", r.value("deviceLabel"))?;
    w.optional_leaf("loadInformation", r.value("loadInformation"))?;

    write_call_manager_group(w, r)?;

    w.element("dateTimeSetting", |w| {
        w.optional_leaf("ntpServerAddr", r.value("ntpServerAddr"))?;
        w.leaf("timeZone", r.encoded_value("timeZone"))?;
        w.optional_leaf("dateTemplate", r.encoded_value("dateTemplate"))?;
        w.optional_leaf("timeFormat", r.encoded_value("timeFormat"))
    })?;

    w.element("sipStack", |w| {
        w.leaf("transportLayerProtocol", r.encoded_value("transportLayerProtocol"))?;
        if r.selected_index("natEnabled") == Some(1) {
            w.leaf("natEnabled", "true")?;
            w.optional_leaf("natAddress", r.value("natAddress"))?;
        }
        Ok(())
    })?;

    let locale = r.encoded_value("userLocale");
    w.element("userLocale", |w| {
        w.leaf("name", locale)?;
        w.leaf("langCode", locale)
    })?;
    w.leaf("networkLocale", r.encoded_value("networkLocale"))?;

    w.element("ethernetConfig", |w| {
        w.optional_leaf("adminVlanId", r.value("adminVlanId"))?;
        w.optional_leaf("pcPortVlanId", r.value("pcPortVlanId"))
    })?;

    w.element("sipLines", |w| {
        for button in r.buttons() {
            write_line(w, r, button)?;
        }
        Ok(())
    })?;

    w.element("vendorConfig", |w| write_vendor_config(w, r))?;

    w.optional_leaf("mtu", r.value("mtu"))
}

fn write_call_manager_group(w: &mut DocWriter, r: &Registry) -> io::Result<()> {
    let port = match r.value("voipControlPort") {
        "" => DEFAULT_SIP_PORT,
        port => port,
    };
    let servers = [
        ("0", r.value("processNodeName1")),
        ("1", r.value("processNodeName2")),
        ("2", r.value("processNodeName3")),
    ];

    w.element("callManagerGroup", |w| {
        w.element("members", |w| {
            for (priority, host) in servers {
                // The primary member is always present, backups only when set.
                if priority != "0" && host.is_empty() {
                    continue;
                }
                let member = BytesStart::new("member").with_attributes([("priority", priority)]);
                w.element_with(member, |w| {
                    w.element("callManager", |w| {
                        w.element("ports", |w| w.leaf("ethernetPhonePort", port))?;
                        w.leaf("processNodeName", host)
                    })
                })?;
            }
            Ok(())
        })
    })
}

fn write_line(w: &mut DocWriter, r: &Registry, button: &ButtonGroup) -> io::Result<()> {
    let function = r.button_function(button);
    if function == ButtonFunction::Disabled {
        return Ok(());
    }
    let value = move |id: FieldId| r.field(id).raw_value();
    let number = button.number.to_string();
    let line = BytesStart::new("line").with_attributes([("button", number.as_str())]);

    w.element_with(line, |w| {
        w.leaf("featureID", function.feature_id())?;
        w.optional_leaf("name", value(button.extension))?;
        w.optional_leaf("displayName", value(button.label))?;
        if function != ButtonFunction::Line {
            return Ok(());
        }
        w.optional_leaf("authName", value(button.auth_id))?;
        w.optional_leaf("authPassword", value(button.password))?;
        if r.field(button.auto_answer).selected_index() == Some(1) {
            w.leaf("autoAnswerEnabled", "2")?;
            w.leaf("autoAnswerTimer", "1")?;
        }
        w.optional_leaf("callForwardURI", value(button.forward_all))?;
        w.optional_leaf("callPickupGroupURI", value(button.pickup_group))?;
        w.optional_leaf("voiceMailPilot", value(button.voicemail))
    })
}

fn write_vendor_config(w: &mut DocWriter, r: &Registry) -> io::Result<()> {
    let encoded = |w: &mut DocWriter, key: &str| w.leaf(key, r.encoded_value(key));
    let text = |w: &mut DocWriter, key: &str| w.optional_leaf(key, r.value(key));

    encoded(w, "settingsAccess")?;
    encoded(w, "webAccess")?;
    encoded(w, "sshAccess")?;
    text(w, "sshUserId")?;
    text(w, "sshPassword")?;
    text(w, "adminPassword")?;
    encoded(w, "pcPort")?;
    encoded(w, "pcVoiceVlanAccess")?;
    encoded(w, "spanToPCPort")?;
    encoded(w, "gratuitousARP")?;

    encoded(w, "bluetooth")?;
    encoded(w, "bluetoothProfile")?;

    encoded(w, "preferredCodec")?;
    encoded(w, "advertiseG722Codec")?;
    text(w, "dscpForAudio")?;
    text(w, "startMediaPort")?;
    text(w, "stopMediaPort")?;
    encoded(w, "videoCapability")?;
    encoded(w, "autoTransmitVideo")?;
    encoded(w, "videoBitRate")?;
    text(w, "dscpForVideo")?;
    encoded(w, "rtcp")?;

    encoded(w, "dndControl")?;
    encoded(w, "dndCallAlert")?;
    text(w, "dndReminderTimer")?;

    if r.selected_index("snmpEnabled") == Some(1) {
        w.leaf("snmpEnable", "1")?;
        text(w, "snmpCommunity")?;
    }
    text(w, "syslogAddr")?;

    for key in [
        "directoryURL",
        "servicesURL",
        "authenticationURL",
        "informationURL",
        "dialTemplate",
        "softKeyFile",
        "idleURL",
        "idleTimeout",
        "backgroundImage",
    ] {
        text(w, key)?;
    }
    Ok(())
}

/// Thin layer over the quick-xml writer: nested elements through closures,
/// leaves with the configured escaping.
struct DocWriter {
    writer: Writer<Vec<u8>>,
    escape: bool,
}

impl DocWriter {
    fn new(escape: bool) -> Self {
        Self {
            writer: Writer::new_with_indent(Vec::new(), b' ', 2),
            escape,
        }
    }

    fn declaration(&mut self) -> io::Result<()> {
        self.writer
            .write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))
    }

    fn element(
        &mut self,
        name: &str,
        body: impl FnOnce(&mut Self) -> io::Result<()>,
    ) -> io::Result<()> {
        self.element_with(BytesStart::new(name), body)
    }

    fn element_with(
        &mut self,
        start: BytesStart<'_>,
        body: impl FnOnce(&mut Self) -> io::Result<()>,
    ) -> io::Result<()> {
        let end = start.to_end().into_owned();
        self.writer.write_event(Event::Start(start))?;
        body(self)?;
        self.writer.write_event(Event::End(end))
    }

    fn leaf(&mut self, name: &str, value: &str) -> io::Result<()> {
        let text = if self.escape {
            BytesText::from_escaped(partial_escape(value))
        } else {
            BytesText::from_escaped(value)
        };
        self.writer.write_event(Event::Start(BytesStart::new(name)))?;
        self.writer.write_event(Event::Text(text))?;
        self.writer.write_event(Event::End(BytesEnd::new(name)))
    }

    fn optional_leaf(&mut self, name: &str, value: &str) -> io::Result<()> {
        if value.is_empty() {
            return Ok(());
        }
        self.leaf(name, value)
    }

    fn finish(self) -> Result<String> {
        let mut bytes = self.writer.into_inner();
        bytes.push(b'\n');
        Ok(String::from_utf8(bytes)?)
    }
}
