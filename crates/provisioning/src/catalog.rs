//! Static option catalogs understood by the 8945 SIP firmware.
//!
//! Labels are what the operator sees, values are what lands in the
//! `SEP<MAC>.cnf.xml` document. Both halves must stay byte-for-byte stable.

use strum::{Display, EnumIter, FromRepr};

use crate::field::Choice;

pub const DISABLED_ENABLED: &[Choice] =
    &[Choice::new("Disabled", "0"), Choice::new("Enabled", "1")];

pub const NO_YES: &[Choice] = &[Choice::new("No", "false"), Choice::new("Yes", "true")];

pub const TRANSPORTS: &[Choice] = &[
    Choice::new("UDP", "1"),
    Choice::new("TCP", "2"),
    Choice::new("TLS", "3"),
];

pub const CODECS: &[Choice] = &[
    Choice::new("G.711u (Standard US)", "PCMU"),
    Choice::new("G.711a (Standard EU)", "PCMA"),
    Choice::new("G.722 (HD Audio)", "G722"),
    Choice::new("G.729 (Compressed)", "G729"),
];

pub const DATE_FORMATS: &[Choice] = &[
    Choice::new("M/D/Y", "M/D/Y"),
    Choice::new("D/M/Y", "D/M/Y"),
    Choice::new("Y/M/D", "Y/M/D"),
];

pub const TIME_FORMATS: &[Choice] = &[Choice::new("12 Hour", "12"), Choice::new("24 Hour", "24")];

pub const VIDEO_BITRATES: &[Choice] = &[
    Choice::new("384k", "384"),
    Choice::new("768k", "768"),
    Choice::new("1.5M", "1500"),
    Choice::new("2.5M", "2500"),
    Choice::new("4M", "4000"),
];

/// Display name → Cisco internal time zone name.
pub const TIME_ZONES: &[Choice] = &[
    Choice::new("Dateline Standard Time (GMT-12)", "Dateline Standard Time"),
    Choice::new("Samoa Standard Time (GMT-11)", "Samoa Standard Time"),
    Choice::new("Hawaiian Standard Time (GMT-10)", "Hawaiian Standard Time"),
    Choice::new("Alaskan Standard Time (GMT-9)", "Alaskan Standard Time"),
    Choice::new("Pacific Standard/Daylight Time (GMT-8)", "Pacific Standard/Daylight Time"),
    Choice::new("Mountain Standard/Daylight Time (GMT-7)", "Mountain Standard/Daylight Time"),
    Choice::new("US Mountain Standard Time (GMT-7)", "US Mountain Standard Time"),
    Choice::new("Central Standard/Daylight Time (GMT-6)", "Central Standard/Daylight Time"),
    Choice::new("Mexico Standard/Daylight Time (GMT-6)", "Mexico Standard/Daylight Time"),
    Choice::new("Canada Central Standard Time (GMT-6)", "Canada Central Standard Time"),
    Choice::new("SA Pacific Standard Time (GMT-5)", "SA Pacific Standard Time"),
    Choice::new("Eastern Standard/Daylight Time (GMT-5)", "Eastern Standard/Daylight Time"),
    Choice::new("US Eastern Standard Time (GMT-5)", "US Eastern Standard Time"),
    Choice::new("Atlantic Standard Time (GMT-4)", "Atlantic Standard Time"),
    Choice::new("SA Western Standard Time (GMT-4)", "SA Western Standard Time"),
    Choice::new("Newfoundland Standard Time (GMT-3.5)", "Newfoundland Standard Time"),
    Choice::new("E. South America Standard Time (GMT-3)", "E. South America Standard Time"),
    Choice::new("SA Eastern Standard Time (GMT-3)", "SA Eastern Standard Time"),
    Choice::new("Mid-Atlantic Standard Time (GMT-2)", "Mid-Atlantic Standard Time"),
    Choice::new("Azores Standard Time (GMT-1)", "Azores Standard Time"),
    Choice::new("GMT Standard/Daylight Time (GMT)", "GMT Standard/Daylight Time"),
    Choice::new("Greenwich Standard Time (GMT)", "Greenwich Standard Time"),
    Choice::new("W. Europe Standard/Daylight Time (GMT+1)", "W. Europe Standard/Daylight Time"),
    Choice::new("GTB Standard/Daylight Time (GMT+2)", "GTB Standard/Daylight Time"),
    Choice::new("Egypt Standard/Daylight Time (GMT+2)", "Egypt Standard/Daylight Time"),
    Choice::new("E. Europe Standard/Daylight Time (GMT+2)", "E. Europe Standard/Daylight Time"),
    Choice::new("Romance Standard/Daylight Time (GMT+2)", "Romance Standard/Daylight Time"),
    Choice::new("Russian Standard Time (GMT+3)", "Russian Standard Time"),
    Choice::new("Near East Standard/Daylight Time (GMT+3)", "Near East Standard/Daylight Time"),
    Choice::new("Iran Standard Time (GMT+3.5)", "Iran Standard Time"),
    Choice::new("Arabian Standard Time (GMT+4)", "Arabian Standard Time"),
    Choice::new("Caucasus Standard/Daylight Time (GMT+4)", "Caucasus Standard/Daylight Time"),
    Choice::new(
        "Transitional Islamic State of Afghanistan Standard Time (GMT+4.5)",
        "Transitional Islamic State of Afghanistan Standard Time",
    ),
    Choice::new("Ekaterinburg Standard Time (GMT+5)", "Ekaterinburg Standard Time"),
    Choice::new("West Asia Standard Time (GMT+5)", "West Asia Standard Time"),
    Choice::new("India Standard Time (GMT+5.5)", "India Standard Time"),
    Choice::new("Nepal Standard Time (GMT+5.75)", "Nepal Standard Time"),
    Choice::new("Central Asia Standard Time (GMT+6)", "Central Asia Standard Time"),
    Choice::new("Sri Lanka Standard Time (GMT+6)", "Sri Lanka Standard Time"),
    Choice::new("N. Central Asia Standard Time (GMT+6)", "N. Central Asia Standard Time"),
    Choice::new("Myanmar Standard Time (GMT+6.5)", "Myanmar Standard Time"),
    Choice::new("SE Asia Standard Time (GMT+7)", "SE Asia Standard Time"),
    Choice::new("North Asia Standard Time (GMT+7)", "North Asia Standard Time"),
    Choice::new("China Standard/Daylight Time (GMT+8)", "China Standard/Daylight Time"),
    Choice::new("Singapore Standard Time (GMT+8)", "Singapore Standard Time"),
    Choice::new("Taipei Standard Time (GMT+8)", "Taipei Standard Time"),
    Choice::new("W. Australia Standard Time (GMT+8)", "W. Australia Standard Time"),
    Choice::new("North Asia East Standard Time (GMT+8)", "North Asia East Standard Time"),
    Choice::new("Korea Standard Time (GMT+9)", "Korea Standard Time"),
    Choice::new("Tokyo Standard Time (GMT+9)", "Tokyo Standard Time"),
    Choice::new("Yakutsk Standard Time (GMT+9)", "Yakutsk Standard Time"),
    Choice::new("Aus Central Standard Time (GMT+9.5)", "Aus Central Standard Time"),
    Choice::new(
        "Cen. Australia Standard/Daylight Time (GMT+9.5)",
        "Cen. Australia Standard/Daylight Time",
    ),
    Choice::new(
        "Aus Eastern Standard/Daylight Time (GMT+10)",
        "Aus Eastern Standard/Daylight Time",
    ),
    Choice::new("E. Australia Standard Time (GMT+10)", "E. Australia Standard Time"),
    Choice::new("Vladivostok Standard Time (GMT+10)", "Vladivostok Standard Time"),
    Choice::new("Tasmania Standard/Daylight Time (GMT+10)", "Tasmania Standard/Daylight Time"),
    Choice::new("Central Pacific Standard Time (GMT+11)", "Central Pacific Standard Time"),
];

/// Index of "Pacific Standard/Daylight Time" in [`TIME_ZONES`].
pub const DEFAULT_TIME_ZONE: usize = 4;

pub const USER_LOCALES: &[Choice] = &[
    Choice::new("US (English)", "United_States"),
    Choice::new("UK (English)", "United_Kingdom"),
    Choice::new("France (French)", "France"),
    Choice::new("Germany (German)", "Germany"),
    Choice::new("Spain (Spanish)", "Spain"),
];

pub const NETWORK_LOCALES: &[Choice] = &[
    Choice::new("United States", "United_States"),
    Choice::new("United Kingdom", "United_Kingdom"),
    Choice::new("France", "France"),
    Choice::new("Germany", "Germany"),
    Choice::new("Spain", "Spain"),
];

pub const BLUETOOTH_PROFILES: &[Choice] = &[
    Choice::new("Handsfree Only", "Handsfree"),
    Choice::new("Headset Only", "Headset"),
    Choice::new("Both", "Handsfree,Headset"),
];

pub const DND_ALERTS: &[Choice] = &[
    Choice::new("None", "0"),
    Choice::new("Flash Screen", "5"),
    Choice::new("Beep", "1"),
    Choice::new("Flash & Beep", "2"),
];

pub const PC_VLAN_MODES: &[Choice] = &[
    Choice::new("Native / Untagged", "0"),
    Choice::new("Tag with Voice VLAN", "1"),
    Choice::new("Tag with Specific VLAN", "2"),
];

/// Index of "Tag with Specific VLAN" in [`PC_VLAN_MODES`].
pub const PC_VLAN_SPECIFIC: usize = 2;

pub const BUTTON_FUNCTIONS: &[Choice] = &[
    Choice::new("Disabled", "0"),
    Choice::new("Line", "1"),
    Choice::new("SpeedDial", "2"),
    Choice::new("BLF", "3"),
];

/// Typed view over [`BUTTON_FUNCTIONS`]; the discriminant is the option index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, FromRepr)]
#[repr(usize)]
pub enum ButtonFunction {
    Disabled = 0,
    Line = 1,
    SpeedDial = 2,
    #[strum(to_string = "BLF")]
    Blf = 3,
}

impl ButtonFunction {
    pub fn index(self) -> usize {
        self as usize
    }

    /// `featureID` written into the `<line>` element.
    pub fn feature_id(self) -> &'static str {
        match self {
            ButtonFunction::Line => "9",
            _ => "21",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn time_zone_catalog_has_58_entries() {
        assert_eq!(TIME_ZONES.len(), 58);
        assert_eq!(
            TIME_ZONES[DEFAULT_TIME_ZONE].value,
            "Pacific Standard/Daylight Time"
        );
        assert_eq!(
            TIME_ZONES.last().map(|c| c.value),
            Some("Central Pacific Standard Time")
        );
    }

    #[test]
    fn button_functions_match_catalog_order() {
        for function in ButtonFunction::iter() {
            assert_eq!(BUTTON_FUNCTIONS[function.index()].label, function.to_string());
            assert_eq!(ButtonFunction::from_repr(function.index()), Some(function));
        }
        assert_eq!(ButtonFunction::Line.feature_id(), "9");
        assert_eq!(ButtonFunction::Blf.feature_id(), "21");
    }

    #[test]
    fn every_catalog_encodes_non_empty_values() {
        let catalogs = [
            DISABLED_ENABLED,
            NO_YES,
            TRANSPORTS,
            CODECS,
            DATE_FORMATS,
            TIME_FORMATS,
            VIDEO_BITRATES,
            TIME_ZONES,
            USER_LOCALES,
            NETWORK_LOCALES,
            BLUETOOTH_PROFILES,
            DND_ALERTS,
            PC_VLAN_MODES,
            BUTTON_FUNCTIONS,
        ];
        for catalog in catalogs {
            assert!(catalog.iter().all(|c| !c.value.is_empty() && !c.label.is_empty()));
        }
    }
}
