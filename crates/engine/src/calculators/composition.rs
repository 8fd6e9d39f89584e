use rules::Field;

use super::Calculator;
use crate::resolver::FieldMap;

struct Triple {
    name: Field,
    version: Field,
    version_major: Field,
    name_version: Field,
    name_version_major: Field,
}

const TRIPLES: &[Triple] = &[
    Triple {
        name: Field::OperatingSystemName,
        version: Field::OperatingSystemVersion,
        version_major: Field::OperatingSystemVersionMajor,
        name_version: Field::OperatingSystemNameVersion,
        name_version_major: Field::OperatingSystemNameVersionMajor,
    },
    Triple {
        name: Field::LayoutEngineName,
        version: Field::LayoutEngineVersion,
        version_major: Field::LayoutEngineVersionMajor,
        name_version: Field::LayoutEngineNameVersion,
        name_version_major: Field::LayoutEngineNameVersionMajor,
    },
    Triple {
        name: Field::AgentName,
        version: Field::AgentVersion,
        version_major: Field::AgentVersionMajor,
        name_version: Field::AgentNameVersion,
        name_version_major: Field::AgentNameVersionMajor,
    },
];

const READS: &[Field] = &[
    Field::OperatingSystemName,
    Field::OperatingSystemVersion,
    Field::OperatingSystemVersionMajor,
    Field::LayoutEngineName,
    Field::LayoutEngineVersion,
    Field::LayoutEngineVersionMajor,
    Field::AgentName,
    Field::AgentVersion,
    Field::AgentVersionMajor,
];
const WRITES: &[Field] = &[
    Field::OperatingSystemNameVersion,
    Field::OperatingSystemNameVersionMajor,
    Field::LayoutEngineNameVersion,
    Field::LayoutEngineNameVersionMajor,
    Field::AgentNameVersion,
    Field::AgentNameVersionMajor,
];

/// Joins each `Name`/`Version` pair into `"Name Version"` composites (§4.5).
/// Runs after [`super::VersionCalculator`] so the `*VersionMajor` half is
/// already populated.
pub struct CompositionCalculator;

impl CompositionCalculator {
    pub fn boxed() -> Box<dyn Calculator> {
        Box::new(Self)
    }
}

impl Calculator for CompositionCalculator {
    fn name(&self) -> &'static str {
        "name-version-composition"
    }

    fn reads(&self) -> &[Field] {
        READS
    }

    fn writes(&self) -> &[Field] {
        WRITES
    }

    fn apply(&self, fields: &mut FieldMap) {
        for triple in TRIPLES {
            let name = fields.get(triple.name).to_string();
            let version = fields.get(triple.version).to_string();
            let version_major = fields.get(triple.version_major).to_string();
            fields.set(triple.name_version, format!("{name} {version}"));
            fields.set(triple.name_version_major, format!("{name} {version_major}"));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::resolve;

    #[test]
    fn composes_name_and_version() {
        let mut fields = resolve(&[]);
        fields.set(Field::AgentName, "Chrome");
        fields.set(Field::AgentVersion, "100.0.4896.127");
        fields.set(Field::AgentVersionMajor, "100");
        CompositionCalculator.apply(&mut fields);
        assert_eq!(fields.get(Field::AgentNameVersion), "Chrome 100.0.4896.127");
        assert_eq!(fields.get(Field::AgentNameVersionMajor), "Chrome 100");
    }

    #[test]
    fn composes_with_default_sentinels_when_unset() {
        let mut fields = resolve(&[]);
        CompositionCalculator.apply(&mut fields);
        assert_eq!(fields.get(Field::AgentNameVersion), "Unknown ??");
    }
}
