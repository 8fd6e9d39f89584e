use rules::Field;

use super::Calculator;
use crate::resolver::FieldMap;

const PAIRS: &[(Field, Field)] = &[
    (Field::OperatingSystemVersion, Field::OperatingSystemVersionMajor),
    (Field::LayoutEngineVersion, Field::LayoutEngineVersionMajor),
    (Field::AgentVersion, Field::AgentVersionMajor),
];

const READS: &[Field] = &[
    Field::OperatingSystemVersion,
    Field::LayoutEngineVersion,
    Field::AgentVersion,
];
const WRITES: &[Field] = &[
    Field::OperatingSystemVersionMajor,
    Field::LayoutEngineVersionMajor,
    Field::AgentVersionMajor,
];

/// Derives each `*VersionMajor` field from its full version by truncating at
/// the first `.` (§4.5 "minimal-version-trimming"-style calculator). Leaves
/// the major field untouched if the full version is still at its default
/// sentinel.
pub struct VersionCalculator;

impl VersionCalculator {
    pub fn boxed() -> Box<dyn Calculator> {
        Box::new(Self)
    }
}

impl Calculator for VersionCalculator {
    fn name(&self) -> &'static str {
        "version-major"
    }

    fn reads(&self) -> &[Field] {
        READS
    }

    fn writes(&self) -> &[Field] {
        WRITES
    }

    fn apply(&self, fields: &mut FieldMap) {
        for &(full, major) in PAIRS {
            if fields.is_default(full) {
                continue;
            }
            let value = fields.get(full);
            let truncated = value.split('.').next().unwrap_or(value).to_string();
            fields.set(major, truncated);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::resolve;

    #[test]
    fn truncates_at_first_dot() {
        let mut fields = resolve(&[]);
        fields.set(Field::AgentVersion, "100.0.4896.127");
        VersionCalculator.apply(&mut fields);
        assert_eq!(fields.get(Field::AgentVersionMajor), "100");
    }

    #[test]
    fn leaves_default_version_untouched() {
        let mut fields = resolve(&[]);
        VersionCalculator.apply(&mut fields);
        assert_eq!(fields.get(Field::AgentVersionMajor), "??");
    }
}
