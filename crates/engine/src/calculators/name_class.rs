use rules::Field;

use super::Calculator;
use crate::resolver::FieldMap;

const READS: &[Field] = &[Field::AgentName, Field::OperatingSystemName];
const WRITES: &[Field] = &[Field::AgentClass, Field::OperatingSystemClass, Field::LayoutEngineClass];

const KNOWN_BROWSERS: &[&str] = &["Firefox", "Chrome", "Safari", "Edge", "Opera"];
const KNOWN_ENGINES: &[&str] = &["Gecko", "Blink", "WebKit", "Trident"];

/// Fills in the `*Class` fields from their sibling `*Name` field when a
/// matcher hasn't already set the class directly. A handful of well-known
/// browser/engine names map to `"Browser"`/`"Layout engine"`; everything else
/// (including names a matcher already classified, e.g. `"Hacker"`) is left
/// alone.
pub struct NameClassCalculator;

impl NameClassCalculator {
    pub fn boxed() -> Box<dyn Calculator> {
        Box::new(Self)
    }
}

impl Calculator for NameClassCalculator {
    fn name(&self) -> &'static str {
        "class-from-name"
    }

    fn reads(&self) -> &[Field] {
        READS
    }

    fn writes(&self) -> &[Field] {
        WRITES
    }

    fn apply(&self, fields: &mut FieldMap) {
        if fields.is_default(Field::AgentClass) && !fields.is_default(Field::AgentName) {
            let name = fields.get(Field::AgentName).to_string();
            if KNOWN_BROWSERS.iter().any(|&b| b == name) {
                fields.set(Field::AgentClass, "Browser");
            }
        }
        if fields.is_default(Field::OperatingSystemClass) && !fields.is_default(Field::OperatingSystemName) {
            fields.set(Field::OperatingSystemClass, "Desktop");
        }
        if fields.is_default(Field::LayoutEngineClass) {
            let engine = fields.get(Field::LayoutEngineName);
            if KNOWN_ENGINES.iter().any(|&e| e == engine) {
                fields.set(Field::LayoutEngineClass, "Browser");
            }
        }
    }
}
