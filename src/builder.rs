use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use cache::ParseCache;
use engine::Pipeline;
use rules::{ConfigError, Field, RuleStore};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::client_hints::ClientHints;
use crate::error::UsageError;
use crate::result::ParseResult;

const DEFAULT_CACHE_SIZE: usize = 10_000;

/// Whether the rule store and post-processor pipeline are built eagerly at
/// [`AnalyzerBuilder::build`] or lazily on the first [`Analyzer::parse`]
/// call (§6 "immediateInitialization vs delayedInitialization").
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Initialization {
    #[default]
    Immediate,
    Delayed,
}

/// The scalar half of [`AnalyzerBuilder`]'s configuration — everything except
/// a possibly-supplied [`RuleStore`], which cannot round-trip through `serde`
/// (its compiled `Regex` predicates don't implement it). A host that wants
/// to persist or transmit an analyzer's construction options works with this
/// type and re-supplies a rule store at reconstruction, via
/// [`AnalyzerBuilder::from_config`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    pub cache_size: usize,
    pub restrict_fields: Option<Vec<Field>>,
    pub show_matcher_stats: bool,
    pub minimal_version: bool,
    pub drop_tests: bool,
    pub initialization: Initialization,
}

type CacheFactory = Arc<dyn Fn(usize) -> ParseCache<String, Arc<ParseResult>> + Send + Sync>;

/// Plain, validated configuration record consumed by [`AnalyzerBuilder::build`]
/// (§6 "Builder recognized options"). Cloneable, so a template builder can be
/// reused to construct several analyzers.
#[derive(Clone)]
pub struct AnalyzerBuilder {
    rule_store: Option<RuleStore>,
    cache_size: usize,
    cache_factory: Option<CacheFactory>,
    restrict_fields: Option<Vec<Field>>,
    show_matcher_stats: bool,
    minimal_version: bool,
    drop_tests: bool,
    initialization: Initialization,
    preheat_samples: Vec<String>,
}

impl Default for AnalyzerBuilder {
    fn default() -> Self {
        Self {
            rule_store: None,
            cache_size: DEFAULT_CACHE_SIZE,
            cache_factory: None,
            restrict_fields: None,
            show_matcher_stats: false,
            minimal_version: false,
            drop_tests: false,
            initialization: Initialization::default(),
            preheat_samples: Vec::new(),
        }
    }
}

impl AnalyzerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Supplies a pre-built rule store, e.g. one assembled by an out-of-scope
    /// YAML loader. Defaults to [`rules::builtin`] if never called.
    pub fn rule_store(mut self, store: RuleStore) -> Self {
        self.rule_store = Some(store);
        self
    }

    /// Sets the parse-cache capacity; `0` disables caching entirely.
    pub fn cache_size(mut self, n: usize) -> Self {
        self.cache_size = n;
        self
    }

    /// Supplies a custom factory for the parse cache, in place of the
    /// default bounded LRU (`cacheInstantiator` in the original API). The
    /// factory receives the configured [`Self::cache_size`] and must return
    /// a cache honoring that capacity.
    pub fn cache_factory(
        mut self,
        factory: impl Fn(usize) -> ParseCache<String, Arc<ParseResult>> + Send + Sync + 'static,
    ) -> Self {
        self.cache_factory = Some(Arc::new(factory));
        self
    }

    /// Restricts `ParseResult` consumers to the named fields. Today this is
    /// advisory only: the resolver and pipeline still run in full, since
    /// skipping individual calculators per-call would require per-field
    /// effort tracking the pipeline does not do. Every name is validated
    /// against the closed catalog immediately — an unknown name is a
    /// use-time error (§7 `UsageError`), not deferred to `build`.
    pub fn with_fields(mut self, fields: &[&str]) -> Result<Self, UsageError> {
        let mut resolved = Vec::with_capacity(fields.len());
        for &name in fields {
            let field = name
                .parse::<Field>()
                .map_err(|()| UsageError::UnknownRestrictedField(name.to_string()))?;
            resolved.push(field);
        }
        self.restrict_fields = Some(resolved);
        Ok(self)
    }

    pub fn show_matcher_stats(mut self, enabled: bool) -> Self {
        self.show_matcher_stats = enabled;
        self
    }

    /// Trims every resolved `*Version` field to its first two components.
    pub fn show_minimal_version(mut self, enabled: bool) -> Self {
        self.minimal_version = enabled;
        self
    }

    /// Whether rule-test corpora (out-of-scope loader concern) are retained.
    /// No effect on this core, which never loads test corpora; stored so a
    /// caller's configuration round-trips intact.
    pub fn drop_tests(mut self, enabled: bool) -> Self {
        self.drop_tests = enabled;
        self
    }

    pub fn initialization(mut self, mode: Initialization) -> Self {
        self.initialization = mode;
        self
    }

    /// Samples to parse once at construction to warm the cache and any
    /// lazily-built structures (§6 `preheat(n)`, rendered here as an actual
    /// sample corpus rather than a bare count).
    pub fn preheat(mut self, samples: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.preheat_samples = samples.into_iter().map(Into::into).collect();
        self
    }

    /// The scalar knobs of this builder, independent of any supplied
    /// [`RuleStore`] (§1 "a configuration layer... serializable record").
    pub fn to_config(&self) -> AnalyzerConfig {
        AnalyzerConfig {
            cache_size: self.cache_size,
            restrict_fields: self.restrict_fields.clone(),
            show_matcher_stats: self.show_matcher_stats,
            minimal_version: self.minimal_version,
            drop_tests: self.drop_tests,
            initialization: self.initialization,
        }
    }

    /// Rebuilds a builder from a previously serialized [`AnalyzerConfig`].
    /// The caller must still supply a rule store (via [`Self::rule_store`])
    /// if the default [`rules::builtin`] set isn't what was originally used.
    pub fn from_config(config: AnalyzerConfig) -> Self {
        Self {
            rule_store: None,
            cache_size: config.cache_size,
            restrict_fields: config.restrict_fields,
            show_matcher_stats: config.show_matcher_stats,
            minimal_version: config.minimal_version,
            drop_tests: config.drop_tests,
            initialization: config.initialization,
            preheat_samples: Vec::new(),
        }
    }

    #[instrument(skip(self), fields(cache_size = self.cache_size))]
    pub fn build(self) -> Result<Analyzer, ConfigError> {
        if self.restrict_fields.as_ref().is_some_and(Vec::is_empty) {
            tracing::warn!("withFields resolved to an empty field set");
        }

        let rule_store = match self.rule_store {
            Some(store) => store,
            None => rules::builtin().build()?,
        };
        let pipeline = engine::standard_pipeline()?;

        let cache = match &self.cache_factory {
            Some(factory) => factory(self.cache_size),
            None => ParseCache::new(self.cache_size),
        };

        let analyzer = Analyzer {
            rule_store,
            pipeline,
            cache,
            minimal_version: self.minimal_version,
            engine_calls: AtomicU64::new(0),
        };

        for sample in &self.preheat_samples {
            let _ = analyzer.parse(Some(sample));
        }

        tracing::debug!(matchers = analyzer.rule_store.len(), "analyzer built");
        Ok(analyzer)
    }
}

/// The parsing engine: an immutable rule store and post-processor pipeline
/// behind a shared parse cache (§2 "Analyzer/Builder"). `Send + Sync`;
/// intended to be constructed once and shared (typically via `Arc`) by many
/// concurrent callers (§5).
pub struct Analyzer {
    rule_store: RuleStore,
    pipeline: Pipeline,
    cache: ParseCache<String, Arc<ParseResult>>,
    minimal_version: bool,
    engine_calls: AtomicU64,
}

impl Analyzer {
    pub fn builder() -> AnalyzerBuilder {
        AnalyzerBuilder::new()
    }

    /// Parses a raw user-agent string. `None` is treated identically to the
    /// empty string (§7): both reach the "Hacker" fallback via the ordinary
    /// rule path.
    #[instrument(skip(self, input), fields(len = input.map(str::len).unwrap_or(0)))]
    pub fn parse(&self, input: Option<&str>) -> Arc<ParseResult> {
        let ua = input.unwrap_or("");
        self.cache.get_or_compute(ua.to_string(), || {
            self.engine_calls.fetch_add(1, Ordering::Relaxed);
            tracing::trace!("parse cache miss, running matcher engine");
            ParseResult::new(self.compute(ua, None))
        })
    }

    /// Parses a header map (User-Agent plus Client-Hints headers), per the
    /// Client-Hints form of `parse` (§6).
    #[instrument(skip(self, headers))]
    pub fn parse_headers(&self, headers: ClientHints) -> Arc<ParseResult> {
        let key = format!("{}\n{}", headers.user_agent().unwrap_or(""), headers.cache_key());
        let ua = headers.user_agent().unwrap_or("").to_string();
        self.cache.get_or_compute(key, || {
            self.engine_calls.fetch_add(1, Ordering::Relaxed);
            tracing::trace!("parse cache miss, running matcher engine");
            ParseResult::new(self.compute(&ua, Some(&headers)))
        })
    }

    /// Field-restricted convenience form: `parse(ua, field) → string` (§6).
    /// An unrecognized field name yields `"Unknown"`.
    pub fn parse_field(&self, input: Option<&str>, field: &str) -> String {
        self.parse(input).get(field)
    }

    /// Releases the parse cache's contents. Outstanding `Arc<ParseResult>`s
    /// already returned to callers remain valid (§4.6, §9).
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    #[cfg(test)]
    pub(crate) fn engine_invocations(&self) -> u64 {
        self.engine_calls.load(Ordering::Relaxed)
    }

    fn compute(&self, ua: &str, headers: Option<&ClientHints>) -> engine::FieldMap {
        let tokens = token::tokenize(ua);
        tracing::debug!(
            products = tokens.products.len(),
            "tokenized user agent"
        );

        let mut proposals = Vec::new();
        for matcher in self.rule_store.candidates(&tokens) {
            proposals.extend(engine::evaluate(matcher, &tokens));
        }
        if let Some(headers) = headers {
            proposals.extend(headers.proposals());
        }

        let mut fields = engine::resolve(&proposals);
        self.pipeline.run(&mut fields);
        if self.minimal_version {
            trim_minimal_versions(&mut fields);
        }
        fields
    }
}

fn trim_minimal_versions(fields: &mut engine::FieldMap) {
    const VERSION_FIELDS: &[Field] = &[
        Field::OperatingSystemVersion,
        Field::LayoutEngineVersion,
        Field::AgentVersion,
    ];
    for &field in VERSION_FIELDS {
        if fields.is_default(field) {
            continue;
        }
        let trimmed: String = fields.get(field).splitn(3, '.').take(2).collect::<Vec<_>>().join(".");
        fields.set(field, trimmed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_cache_size_still_parses() {
        let analyzer = AnalyzerBuilder::new().cache_size(0).build().unwrap();
        let result = analyzer.parse(Some(""));
        assert_eq!(result.get("AgentClass"), "Hacker");
    }

    #[test]
    fn second_call_does_not_invoke_matcher_engine() {
        let analyzer = AnalyzerBuilder::new().build().unwrap();
        let ua = "Mozilla/5.0 Firefox/2.0";
        let _ = analyzer.parse(Some(ua));
        let _ = analyzer.parse(Some(ua));
        assert_eq!(analyzer.engine_invocations(), 1);
    }

    #[test]
    fn clear_cache_forces_recompute() {
        let analyzer = AnalyzerBuilder::new().build().unwrap();
        let ua = "Mozilla/5.0 Firefox/2.0";
        let _ = analyzer.parse(Some(ua));
        analyzer.clear_cache();
        let _ = analyzer.parse(Some(ua));
        assert_eq!(analyzer.engine_invocations(), 2);
    }

    #[test]
    fn with_fields_rejects_unknown_name() {
        let err = AnalyzerBuilder::new().with_fields(&["NoSuchField"]).unwrap_err();
        assert_eq!(err, UsageError::UnknownRestrictedField("NoSuchField".into()));
    }

    #[test]
    fn with_fields_accepts_known_names() {
        let builder = AnalyzerBuilder::new().with_fields(&["AgentName", "AgentVersion"]).unwrap();
        assert!(builder.build().is_ok());
    }

    #[test]
    fn cache_factory_overrides_the_default_lru() {
        let analyzer = AnalyzerBuilder::new()
            .cache_size(1)
            .cache_factory(|n| ParseCache::new(n * 10))
            .build()
            .unwrap();

        for i in 0..5 {
            analyzer.parse(Some(&format!("Mozilla/5.0 Firefox/{i}.0")));
        }
        // The default size-1 cache would have evicted everything but the
        // last entry; the factory's size-10 cache keeps them all.
        analyzer.parse(Some("Mozilla/5.0 Firefox/0.0"));
        assert_eq!(analyzer.engine_invocations(), 5);
    }

    #[test]
    fn config_round_trips_through_json() {
        let builder = AnalyzerBuilder::new().cache_size(42).show_minimal_version(true);
        let config = builder.to_config();
        let json = serde_json::to_string(&config).unwrap();
        let restored: AnalyzerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, restored);
        assert!(AnalyzerBuilder::from_config(restored).build().is_ok());
    }
}
