//! The post-processor pipeline (§4.5): an ordered sequence of calculators,
//! each reading some fields and writing others, run once after the field
//! resolver has produced its [`FieldMap`](crate::resolver::FieldMap).

mod composition;
mod language;
mod name_class;
mod security;
mod version;

pub use composition::CompositionCalculator;
pub use language::LanguageCalculator;
pub use name_class::NameClassCalculator;
pub use security::SecurityCalculator;
pub use version::VersionCalculator;

use rules::{ConfigError, Field};

use crate::resolver::FieldMap;

/// One post-processing step. `reads`/`writes` are declared up front so the
/// [`Pipeline`] can order calculators topologically and catch both cycles and
/// two calculators racing to write the same field (§4.5, §7).
pub trait Calculator: Send + Sync {
    fn name(&self) -> &'static str;
    fn reads(&self) -> &[Field];
    fn writes(&self) -> &[Field];
    fn apply(&self, fields: &mut FieldMap);
}

/// A validated, topologically-ordered sequence of calculators.
pub struct Pipeline {
    calculators: Vec<Box<dyn Calculator>>,
}

impl Pipeline {
    /// Orders `calculators` so that every calculator runs after all
    /// calculators whose `writes` it `reads` from. Rejects two calculators
    /// that write the same field (ambiguous precedence) and any dependency
    /// cycle.
    pub fn new(calculators: Vec<Box<dyn Calculator>>) -> Result<Self, ConfigError> {
        let mut writer_of: hashbrown::HashMap<Field, usize> = hashbrown::HashMap::new();
        for (idx, calc) in calculators.iter().enumerate() {
            for &field in calc.writes() {
                if let Some(&first) = writer_of.get(&field) {
                    return Err(ConfigError::DuplicateFieldWriter {
                        field: field.as_str().to_string(),
                        first: calculators[first].name().to_string(),
                        second: calc.name().to_string(),
                    });
                }
                writer_of.insert(field, idx);
            }
        }

        let mut edges: Vec<Vec<usize>> = vec![Vec::new(); calculators.len()];
        for (idx, calc) in calculators.iter().enumerate() {
            for &field in calc.reads() {
                if let Some(&producer) = writer_of.get(&field) {
                    if producer != idx {
                        edges[producer].push(idx);
                    }
                }
            }
        }

        let order = topological_order(&edges, &calculators)?;
        let mut ordered = Vec::with_capacity(calculators.len());
        let mut slots: Vec<Option<Box<dyn Calculator>>> = calculators.into_iter().map(Some).collect();
        for idx in order {
            ordered.push(slots[idx].take().expect("each index visited once"));
        }

        tracing::debug!(
            order = ?ordered.iter().map(|c| c.name()).collect::<Vec<_>>(),
            "post-processor pipeline ordered"
        );
        Ok(Self {
            calculators: ordered,
        })
    }

    #[tracing::instrument(skip(self, fields))]
    pub fn run(&self, fields: &mut FieldMap) {
        for calc in &self.calculators {
            tracing::trace!(calculator = calc.name(), "running calculator");
            calc.apply(fields);
        }
    }
}

fn topological_order(
    edges: &[Vec<usize>],
    calculators: &[Box<dyn Calculator>],
) -> Result<Vec<usize>, ConfigError> {
    let n = edges.len();
    let mut in_degree = vec![0usize; n];
    for targets in edges {
        for &t in targets {
            in_degree[t] += 1;
        }
    }

    let mut ready: Vec<usize> = (0..n).filter(|&i| in_degree[i] == 0).collect();
    ready.sort_unstable();
    let mut order = Vec::with_capacity(n);

    while let Some(idx) = ready.pop() {
        order.push(idx);
        let mut newly_ready = Vec::new();
        for &next in &edges[idx] {
            in_degree[next] -= 1;
            if in_degree[next] == 0 {
                newly_ready.push(next);
            }
        }
        newly_ready.sort_unstable();
        ready.extend(newly_ready);
        ready.sort_unstable();
    }

    if order.len() != n {
        let remaining: Vec<String> = (0..n)
            .filter(|i| !order.contains(i))
            .map(|i| calculators[i].name().to_string())
            .collect();
        return Err(ConfigError::CalculatorCycle(remaining));
    }

    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::resolve;

    struct Echo {
        writes: Vec<Field>,
        reads: Vec<Field>,
    }
    impl Calculator for Echo {
        fn name(&self) -> &'static str {
            "echo"
        }
        fn reads(&self) -> &[Field] {
            &self.reads
        }
        fn writes(&self) -> &[Field] {
            &self.writes
        }
        fn apply(&self, _fields: &mut FieldMap) {}
    }

    #[test]
    fn detects_duplicate_writer() {
        let a = Box::new(Echo {
            writes: vec![Field::AgentClass],
            reads: vec![],
        });
        let b = Box::new(Echo {
            writes: vec![Field::AgentClass],
            reads: vec![],
        });
        let err = Pipeline::new(vec![a, b]).unwrap_err();
        assert!(matches!(err, ConfigError::DuplicateFieldWriter { .. }));
    }

    #[test]
    fn orders_dependents_after_producers() {
        let mut fields = resolve(&[]);
        let pipeline = Pipeline::new(vec![
            NameClassCalculator::boxed(),
            VersionCalculator::boxed(),
        ])
        .unwrap();
        pipeline.run(&mut fields);
    }
}
