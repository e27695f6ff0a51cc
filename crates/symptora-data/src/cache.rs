//! Process-wide read-through cache of reference documents.
//!
//! Lifecycle: each source id is populated on first successful fetch and kept
//! for the process lifetime. Failures are never cached, so an unreachable
//! source is retried on every access until it recovers. `reset` and `evict`
//! exist for tests and the admin endpoint.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{Map, Value};
use symptora_common::{DiseaseTable, PreventionTable, SymptomIndex, SymptomTable};
use symptora_config::DataConfig;
use tokio::sync::RwLock;
use tracing::{debug, info, instrument, warn};

use crate::fetcher::DocumentFetcher;

/// Source ids (URLs) of the reference documents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceUrls {
    pub diseases: String,
    pub symptoms: String,
    pub preventions: String,
    pub symptom_index: Option<String>,
}

impl From<&DataConfig> for SourceUrls {
    fn from(config: &DataConfig) -> Self {
        Self {
            diseases: config.diseases_url.clone(),
            symptoms: config.symptoms_url.clone(),
            preventions: config.preventions_url.clone(),
            symptom_index: config.symptom_index_url.clone(),
        }
    }
}

/// Every table one request may need, built from the cached documents.
#[derive(Debug, Clone, Default)]
pub struct ReferenceData {
    pub diseases: DiseaseTable,
    pub symptoms: SymptomTable,
    pub preventions: PreventionTable,
    pub symptom_index: Option<SymptomIndex>,
}

pub struct ReferenceCache {
    fetcher: Arc<dyn DocumentFetcher>,
    sources: SourceUrls,
    /// Source id → successfully fetched document
    documents: RwLock<HashMap<String, Arc<Value>>>,
}

impl ReferenceCache {
    pub fn new(fetcher: Arc<dyn DocumentFetcher>, sources: SourceUrls) -> Self {
        Self {
            fetcher,
            sources,
            documents: RwLock::new(HashMap::new()),
        }
    }

    pub fn sources(&self) -> &SourceUrls {
        &self.sources
    }

    /// Cached document for `source_id`, fetching it on a miss.
    ///
    /// Never fails: any retrieval problem yields an empty JSON object, which
    /// is not cached.
    #[instrument(skip(self))]
    pub async fn fetch(&self, source_id: &str) -> Arc<Value> {
        if let Some(doc) = self.documents.read().await.get(source_id) {
            return Arc::clone(doc);
        }

        // Concurrent cold reads may both get here; the second write replaces
        // an equivalent document.
        match self.fetcher.fetch(source_id).await {
            Ok(doc) => {
                let doc = Arc::new(doc);
                self.documents
                    .write()
                    .await
                    .insert(source_id.to_string(), Arc::clone(&doc));
                info!(source = %source_id, "Cached reference document");
                doc
            }
            Err(e) => {
                warn!(source = %source_id, kind = e.kind(), error = %e, "Reference document unavailable, using empty table");
                Arc::new(Value::Object(Map::new()))
            }
        }
    }

    pub async fn diseases(&self) -> DiseaseTable {
        DiseaseTable::from_document(&*self.fetch(&self.sources.diseases).await)
    }

    pub async fn symptoms(&self) -> SymptomTable {
        SymptomTable::from_document(&*self.fetch(&self.sources.symptoms).await)
    }

    pub async fn preventions(&self) -> PreventionTable {
        PreventionTable::from_document(&*self.fetch(&self.sources.preventions).await)
    }

    /// `None` when no index source is configured.
    pub async fn symptom_index(&self) -> Option<SymptomIndex> {
        let url = self.sources.symptom_index.as_deref()?;
        Some(SymptomIndex::from_document(&*self.fetch(url).await))
    }

    /// All tables at once.
    pub async fn snapshot(&self) -> ReferenceData {
        let (diseases, symptoms, preventions, symptom_index) = tokio::join!(
            self.diseases(),
            self.symptoms(),
            self.preventions(),
            self.symptom_index(),
        );
        ReferenceData { diseases, symptoms, preventions, symptom_index }
    }

    /// Drop every cached document. Returns how many were dropped.
    pub async fn reset(&self) -> usize {
        let mut docs = self.documents.write().await;
        let n = docs.len();
        docs.clear();
        info!(dropped = n, "Reference cache reset");
        n
    }

    /// Drop one cached document so the next access refetches it.
    pub async fn evict(&self, source_id: &str) -> bool {
        let removed = self.documents.write().await.remove(source_id).is_some();
        debug!(source = %source_id, removed, "Evicted reference document");
        removed
    }

    /// Source ids currently cached, sorted.
    pub async fn cached_sources(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.documents.read().await.keys().cloned().collect();
        ids.sort();
        ids
    }
}
