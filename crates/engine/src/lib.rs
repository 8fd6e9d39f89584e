//! Matcher evaluation, field resolution, and the post-processor calculator
//! pipeline (§4.3–§4.5 of the analyzer spec). This crate sits between
//! `ua-rules` (the compiled matcher catalog) and the root `uaparse` crate
//! (orchestration, caching, the public API): it has no notion of a parse
//! cache or of Client-Hints headers, only of token trees, matchers, and
//! fields.

pub mod calculators;
mod eval;
mod proposal;
mod resolver;

pub use calculators::{Calculator, Pipeline};
pub use eval::evaluate;
pub use proposal::Proposal;
pub use resolver::{resolve, FieldMap};

/// The standard calculator set, in an order [`Pipeline::new`] will happily
/// re-validate and re-sort: version-major trimming before name/version
/// composition, independent of the class-from-name and table-expansion
/// steps.
pub fn standard_pipeline() -> Result<Pipeline, rules::ConfigError> {
    Pipeline::new(vec![
        calculators::VersionCalculator::boxed(),
        calculators::CompositionCalculator::boxed(),
        calculators::NameClassCalculator::boxed(),
        calculators::LanguageCalculator::boxed(),
        calculators::SecurityCalculator::boxed(),
    ])
}
