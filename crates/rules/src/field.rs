use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The closed catalog of output fields. Every variant here, and no others,
/// can appear in a [`FieldMap`](crate) / parse `Result`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Field {
    DeviceClass,
    DeviceName,
    DeviceBrand,
    DeviceCpu,
    DeviceCpuBits,
    OperatingSystemClass,
    OperatingSystemName,
    OperatingSystemVersion,
    OperatingSystemVersionMajor,
    OperatingSystemNameVersion,
    OperatingSystemNameVersionMajor,
    LayoutEngineClass,
    LayoutEngineName,
    LayoutEngineVersion,
    LayoutEngineVersionMajor,
    LayoutEngineNameVersion,
    LayoutEngineNameVersionMajor,
    AgentClass,
    AgentName,
    AgentVersion,
    AgentVersionMajor,
    AgentNameVersion,
    AgentNameVersionMajor,
    AgentLanguage,
    AgentLanguageCode,
    AgentSecurity,
}

/// Whether a field's default sentinel is the categorical `"Unknown"` or the
/// version-shaped `"??"`. See §4.4 of the field resolver contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Categorical,
    Version,
}

impl Field {
    /// The full, ordered field catalog. Order here is the order returned by
    /// `Result::allFieldNames`.
    pub const ALL: &'static [Field] = &[
        Field::DeviceClass,
        Field::DeviceName,
        Field::DeviceBrand,
        Field::DeviceCpu,
        Field::DeviceCpuBits,
        Field::OperatingSystemClass,
        Field::OperatingSystemName,
        Field::OperatingSystemVersion,
        Field::OperatingSystemVersionMajor,
        Field::OperatingSystemNameVersion,
        Field::OperatingSystemNameVersionMajor,
        Field::LayoutEngineClass,
        Field::LayoutEngineName,
        Field::LayoutEngineVersion,
        Field::LayoutEngineVersionMajor,
        Field::LayoutEngineNameVersion,
        Field::LayoutEngineNameVersionMajor,
        Field::AgentClass,
        Field::AgentName,
        Field::AgentVersion,
        Field::AgentVersionMajor,
        Field::AgentNameVersion,
        Field::AgentNameVersionMajor,
        Field::AgentLanguage,
        Field::AgentLanguageCode,
        Field::AgentSecurity,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            Field::DeviceClass => "DeviceClass",
            Field::DeviceName => "DeviceName",
            Field::DeviceBrand => "DeviceBrand",
            Field::DeviceCpu => "DeviceCpu",
            Field::DeviceCpuBits => "DeviceCpuBits",
            Field::OperatingSystemClass => "OperatingSystemClass",
            Field::OperatingSystemName => "OperatingSystemName",
            Field::OperatingSystemVersion => "OperatingSystemVersion",
            Field::OperatingSystemVersionMajor => "OperatingSystemVersionMajor",
            Field::OperatingSystemNameVersion => "OperatingSystemNameVersion",
            Field::OperatingSystemNameVersionMajor => "OperatingSystemNameVersionMajor",
            Field::LayoutEngineClass => "LayoutEngineClass",
            Field::LayoutEngineName => "LayoutEngineName",
            Field::LayoutEngineVersion => "LayoutEngineVersion",
            Field::LayoutEngineVersionMajor => "LayoutEngineVersionMajor",
            Field::LayoutEngineNameVersion => "LayoutEngineNameVersion",
            Field::LayoutEngineNameVersionMajor => "LayoutEngineNameVersionMajor",
            Field::AgentClass => "AgentClass",
            Field::AgentName => "AgentName",
            Field::AgentVersion => "AgentVersion",
            Field::AgentVersionMajor => "AgentVersionMajor",
            Field::AgentNameVersion => "AgentNameVersion",
            Field::AgentNameVersionMajor => "AgentNameVersionMajor",
            Field::AgentLanguage => "AgentLanguage",
            Field::AgentLanguageCode => "AgentLanguageCode",
            Field::AgentSecurity => "AgentSecurity",
        }
    }

    /// Version-shaped fields default to `"??"`; everything else is categorical
    /// and defaults to `"Unknown"`. Only the base (non-composed) version
    /// fields are version-shaped — the `NameVersion`/`NameVersionMajor`
    /// composites are always produced by a calculator, never left unresolved.
    pub const fn kind(self) -> FieldKind {
        match self {
            Field::OperatingSystemVersion
            | Field::OperatingSystemVersionMajor
            | Field::LayoutEngineVersion
            | Field::LayoutEngineVersionMajor
            | Field::AgentVersion
            | Field::AgentVersionMajor => FieldKind::Version,
            _ => FieldKind::Categorical,
        }
    }

    pub const fn default_sentinel(self) -> &'static str {
        match self.kind() {
            FieldKind::Categorical => "Unknown",
            FieldKind::Version => "??",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .iter()
            .copied()
            .find(|field| field.as_str() == s)
            .ok_or(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_display_and_from_str() {
        for &field in Field::ALL {
            assert_eq!(field.as_str().parse::<Field>().unwrap(), field);
        }
    }

    #[test]
    fn unknown_name_fails_to_parse() {
        assert!("NoSuchField".parse::<Field>().is_err());
    }

    #[test]
    fn version_fields_default_to_double_question_mark() {
        assert_eq!(Field::AgentVersion.default_sentinel(), "??");
        assert_eq!(Field::AgentVersionMajor.default_sentinel(), "??");
        assert_eq!(Field::AgentNameVersion.default_sentinel(), "Unknown");
    }
}
