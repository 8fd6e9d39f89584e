use rules::Field;

use super::Calculator;
use crate::resolver::FieldMap;

const READS: &[Field] = &[Field::AgentSecurity];
const WRITES: &[Field] = &[Field::AgentSecurity];

const TABLE: &[(&str, &str)] = &[
    ("U", "Strong security"),
    ("I", "Weak security"),
    ("N", "No encryption"),
];

/// Expands the raw `U`/`I`/`N` security token (§4.1) that the matchers leave
/// in [`Field::AgentSecurity`] into its descriptive text. Reads and writes
/// the same field, which is fine: the pipeline only requires that no *other*
/// calculator also writes it.
pub struct SecurityCalculator;

impl SecurityCalculator {
    pub fn boxed() -> Box<dyn Calculator> {
        Box::new(Self)
    }
}

impl Calculator for SecurityCalculator {
    fn name(&self) -> &'static str {
        "security-code-expansion"
    }

    fn reads(&self) -> &[Field] {
        READS
    }

    fn writes(&self) -> &[Field] {
        WRITES
    }

    fn apply(&self, fields: &mut FieldMap) {
        if fields.is_default(Field::AgentSecurity) {
            return;
        }
        let raw = fields.get(Field::AgentSecurity).to_string();
        if let Some(&(_, display)) = TABLE.iter().find(|&&(code, _)| code == raw) {
            fields.set(Field::AgentSecurity, display);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::resolve;

    #[test]
    fn expands_raw_code() {
        let mut fields = resolve(&[]);
        fields.set(Field::AgentSecurity, "U");
        SecurityCalculator.apply(&mut fields);
        assert_eq!(fields.get(Field::AgentSecurity), "Strong security");
    }
}
