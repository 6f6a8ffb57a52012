//! Form engine and XML serializer for Cisco 8945 SIP provisioning files.
//!
//! A [`Session`] owns the field [`Registry`]; the terminal shell reads the
//! visible fields and writes operator input back through the session, which
//! keeps visibility current. Saving renders `SEP<MAC>.cnf.xml`.

pub mod catalog;
pub mod errors;
pub mod field;
pub mod mac;
pub mod registry;
pub mod serializer;
pub mod session;
pub mod visibility;

pub use catalog::ButtonFunction;
pub use errors::{ProvisionError, Result};
pub use field::{Choice, Field, FieldId, FieldKind, FieldValue, TextFilter};
pub use mac::{is_complete_mac, sanitize_mac, MAC_LEN};
pub use registry::{ButtonGroup, Registry, RegistryBuilder, Section};
pub use serializer::{serialize, Document, SerializeOptions};
pub use session::Session;
pub use visibility::{Condition, DependencyTable, Rule};
