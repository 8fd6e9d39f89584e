use rules::Field;

/// One candidate value for a field, emitted by a single matcher's extract
/// clause (§4.3). The field resolver (§4.4) picks, per field, the proposal
/// with the highest confidence, breaking ties by the lower `matcher_id`
/// (earlier load order wins, §9).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Proposal {
    pub field: Field,
    pub value: String,
    pub confidence: u32,
    pub matcher_id: u32,
}

impl Proposal {
    pub fn new(field: Field, value: impl Into<String>, confidence: u32, matcher_id: u32) -> Self {
        Self {
            field,
            value: value.into(),
            confidence,
            matcher_id,
        }
    }
}
