//! Query engine: from raw query text to a ranked result set.

use super::outcome::QueryOutcome;
use super::ranking::{rank, Candidate};
use crate::domain::{SearchKey, ShardKey};
use crate::error::{StoreError, StoreResult};
use crate::matching::{find_matches, MatchMode};
use crate::models::{CategoryInfo, IndexManifest, Shard, ALL_CATEGORY};
use crate::observability::Timer;
use crate::store::ShardStore;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Default cap on displayed rows.
pub const DEFAULT_MAX_RESULTS: usize = 200;

/// Which categories a query searches.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchScope {
    /// The combined `all` category, or every category when there is none
    #[default]
    Everything,

    /// The named categories, in this order
    Categories(Vec<String>),
}

impl SearchScope {
    /// Categories of `manifest` this scope covers, in ranking order.
    ///
    /// Unknown names are ignored and repeated names count once.
    pub fn resolve<'m>(&self, manifest: &'m IndexManifest) -> Vec<&'m CategoryInfo> {
        match self {
            Self::Everything => match manifest.category(ALL_CATEGORY) {
                Some(all) => vec![all],
                None => manifest.categories().iter().collect(),
            },
            Self::Categories(names) => {
                let mut resolved: Vec<&CategoryInfo> = Vec::with_capacity(names.len());
                for name in names {
                    match manifest.category(name) {
                        Some(category) if !resolved.iter().any(|c| c.name == category.name) => {
                            resolved.push(category)
                        }
                        Some(_) => {}
                        None => tracing::debug!(category = %name, "Ignoring unknown category"),
                    }
                }
                resolved
            }
        }
    }
}

/// Tunables for a query engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineOptions {
    /// Cap on displayed rows
    pub max_results: usize,

    /// Prefix or substring matching
    pub match_mode: MatchMode,

    /// Default search scope
    pub scope: SearchScope,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            max_results: DEFAULT_MAX_RESULTS,
            match_mode: MatchMode::default(),
            scope: SearchScope::default(),
        }
    }
}

/// Evaluates query text against a shard store.
///
/// Evaluation only reads the store; its single side effect is populating
/// the shard cache, so evaluating the same text twice yields the same
/// outcome.
#[derive(Debug)]
pub struct QueryEngine {
    store: Arc<ShardStore>,
    options: EngineOptions,
}

impl QueryEngine {
    /// Create an engine over a store.
    ///
    /// A `max_results` of zero is raised to one so a capped result set
    /// still reports that it was truncated.
    pub fn new(store: Arc<ShardStore>, mut options: EngineOptions) -> Self {
        if options.max_results == 0 {
            tracing::warn!("max_results of 0 raised to 1");
            options.max_results = 1;
        }
        Self { store, options }
    }

    /// The underlying store.
    pub fn store(&self) -> &Arc<ShardStore> {
        &self.store
    }

    /// The engine's options.
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    /// Categories offered by the index, in id order.
    pub async fn categories(&self) -> StoreResult<Vec<CategoryInfo>> {
        Ok(self.store.manifest().await?.categories().to_vec())
    }

    /// Evaluate query text in the engine's default scope.
    pub async fn evaluate(&self, text: &str) -> QueryOutcome {
        self.evaluate_in(text, &self.options.scope).await
    }

    /// Evaluate query text in an explicit scope.
    ///
    /// Empty text is `Idle` and loads nothing. Missing shards contribute
    /// nothing; shards that fail to load are skipped.
    pub async fn evaluate_in(&self, text: &str, scope: &SearchScope) -> QueryOutcome {
        let query = match SearchKey::from_query(text) {
            Ok(query) => query,
            Err(_) => return QueryOutcome::Idle,
        };

        let manifest = match self.store.manifest().await {
            Ok(manifest) if !manifest.is_empty() => manifest,
            Ok(_) => {
                tracing::debug!(source = %self.store.describe(), "Search index lists no categories");
                return QueryOutcome::NoIndexAvailable;
            }
            Err(e) => {
                tracing::debug!(error = %e, "No search index available");
                return QueryOutcome::NoIndexAvailable;
            }
        };

        let timer = Timer::new(format!("evaluate '{}'", query));
        let categories = scope.resolve(&manifest);

        let mut plan: Vec<(usize, &str)> = Vec::new();
        let mut keys: Vec<ShardKey> = Vec::new();
        for (rank, category) in categories.iter().enumerate() {
            for key in self.options.match_mode.candidate_shards(category, &query) {
                plan.push((rank, category.name.as_str()));
                keys.push(key);
            }
        }

        let loaded = self.store.load_many(&keys).await;
        let shards: Vec<(usize, &str, Arc<Shard>)> = plan
            .into_iter()
            .zip(keys.iter())
            .zip(loaded)
            .filter_map(|(((rank, category), key), result)| match result {
                Ok(shard) => Some((rank, category, shard)),
                Err(StoreError::ShardNotFound(_)) => None,
                Err(e) => {
                    tracing::debug!(shard = %key, error = %e, "Skipping unusable shard");
                    None
                }
            })
            .collect();

        let candidates: Vec<Candidate<'_>> = shards
            .iter()
            .flat_map(|(rank, category, shard)| {
                find_matches(shard, &query, self.options.match_mode)
                    .into_iter()
                    .flat_map(move |m| Candidate::from_entry(*rank, category, m.match_type, m.entry))
            })
            .collect();

        let matched = candidates.len();
        let results = rank(candidates, self.options.max_results);

        tracing::debug!(
            query = %query,
            shards = shards.len(),
            matched = matched,
            shown = results.len(),
            "Evaluated query"
        );
        self.store
            .metrics()
            .track_query(timer.finish(), results.len(), results.truncated);

        QueryOutcome::from(results)
    }
}
