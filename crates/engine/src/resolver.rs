use hashbrown::HashMap;
use rules::Field;

use crate::proposal::Proposal;

/// A fully-populated set of field values: every [`Field::ALL`] entry present,
/// either from a winning proposal or its default sentinel (§4.4).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMap {
    values: HashMap<Field, String>,
}

impl FieldMap {
    pub fn get(&self, field: Field) -> &str {
        self.values
            .get(&field)
            .map(String::as_str)
            .unwrap_or_else(|| field.default_sentinel())
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        self.values.insert(field, value.into());
    }

    pub fn is_default(&self, field: Field) -> bool {
        !self.values.contains_key(&field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        Field::ALL
            .iter()
            .map(move |&field| (field, self.get(field)))
    }
}

/// Resolves a flat list of proposals (possibly from many matchers) into a
/// [`FieldMap`]. For each field, the proposal with the highest confidence
/// wins; ties break on the lower `matcher_id`, i.e. earlier load order (§9).
/// Fields with no winning proposal are left at their default sentinel.
pub fn resolve(proposals: &[Proposal]) -> FieldMap {
    let mut best: HashMap<Field, &Proposal> = HashMap::new();

    for proposal in proposals {
        if proposal.value.is_empty() {
            // Empty values are forbidden (§4.4) and treated as absent.
            continue;
        }
        match best.get(&proposal.field) {
            None => {
                best.insert(proposal.field, proposal);
            }
            Some(current) => {
                let replace = proposal.confidence > current.confidence
                    || (proposal.confidence == current.confidence
                        && proposal.matcher_id < current.matcher_id);
                if replace {
                    best.insert(proposal.field, proposal);
                }
            }
        }
    }

    let mut map = FieldMap {
        values: HashMap::new(),
    };
    for (field, proposal) in best {
        map.set(field, proposal.value.clone());
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn highest_confidence_wins() {
        let proposals = vec![
            Proposal::new(Field::AgentName, "Chrome", 5, 1),
            Proposal::new(Field::AgentName, "Firefox", 10, 2),
        ];
        let map = resolve(&proposals);
        assert_eq!(map.get(Field::AgentName), "Firefox");
    }

    #[test]
    fn ties_break_on_lower_matcher_id() {
        let proposals = vec![
            Proposal::new(Field::AgentName, "Second", 10, 5),
            Proposal::new(Field::AgentName, "First", 10, 1),
        ];
        let map = resolve(&proposals);
        assert_eq!(map.get(Field::AgentName), "First");
    }

    #[test]
    fn unresolved_fields_fall_back_to_default_sentinel() {
        let map = resolve(&[]);
        assert_eq!(map.get(Field::AgentName), "Unknown");
        assert_eq!(map.get(Field::AgentVersion), "??");
    }

    #[test]
    fn empty_proposal_values_are_ignored() {
        let proposals = vec![Proposal::new(Field::AgentName, "", 100, 1)];
        let map = resolve(&proposals);
        assert_eq!(map.get(Field::AgentName), "Unknown");
    }
}
