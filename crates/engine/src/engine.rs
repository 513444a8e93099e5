use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use renewal_aggregate::AggregateBundle;
use renewal_ingest::{Dataset, DatasetLoader, RowSource, StatusMap, StatusStore};
use renewal_narrative::{NarrativeContext, NarrativeGenerator, NarrativeOutcome};
use renewal_records::{customer_key, HardwareRenewal, ItemStatus, RecordKind, SoftwareRenewal};
use renewal_report::{
    assemble_report, render_html, report_filename, DetailRows, NarrativeSection, ReportInput,
    ReportKind,
};
use serde::Serialize;
use tokio::sync::{OnceCell, RwLock};

use crate::cache::AggregateCache;
use crate::error::{EngineError, Result};
use crate::sink::DocumentSink;
use crate::stats::{EngineStats, StatsSnapshot};

/// What slice of the dataset a report covers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ReportScope {
    /// The whole portfolio.
    #[default]
    Full,
    /// One customer, matched case-insensitively on the trimmed name.
    Customer(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportOptions {
    pub scope: ReportScope,
    /// Ask the narrative service for an executive summary. Ignored when the
    /// engine has no generator configured.
    pub include_narrative: bool,
    /// Recompute aggregates even when a cached bundle matches.
    pub refresh_aggregates: bool,
    /// Timeline anchor date; today when unset.
    pub report_date: Option<NaiveDate>,
}

impl Default for ReportOptions {
    fn default() -> Self {
        Self {
            scope: ReportScope::Full,
            include_narrative: true,
            refresh_aggregates: false,
            report_date: None,
        }
    }
}

impl ReportOptions {
    #[must_use]
    pub fn for_customer(name: impl Into<String>) -> Self {
        Self {
            scope: ReportScope::Customer(name.into()),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn without_narrative(mut self) -> Self {
        self.include_narrative = false;
        self
    }

    #[must_use]
    pub fn on_date(mut self, date: NaiveDate) -> Self {
        self.report_date = Some(date);
        self
    }
}

/// Record of one written report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportArtifact {
    pub filename: String,
    /// Where the sink put it (path, URL).
    pub location: String,
    pub bytes: usize,
    /// True when generated narrative text made it into the document.
    pub narrative_included: bool,
    /// Warning-class explanation when the narrative was requested but no
    /// text came back; `None` on success or when narrative was never asked
    /// for.
    pub narrative_note: Option<String>,
}

/// Narrative pieces bound for different places: the section body goes into
/// the document, the model name onto the cover, the note to the caller.
struct NarrativeParts {
    section: NarrativeSection,
    model: Option<String>,
    note: Option<String>,
}

impl NarrativeParts {
    fn omitted() -> Self {
        Self {
            section: NarrativeSection::Omitted,
            model: None,
            note: None,
        }
    }
}

/// The orchestrator: owns the loaded dataset, runs status edits against it,
/// and turns snapshots into rendered report artifacts.
///
/// All entry points take `&self`; the engine is meant to sit behind an
/// `Arc` and serve concurrent callers. The dataset loads once on first use,
/// reports read an independent snapshot each, and status edits take the
/// write side briefly.
pub struct ReportEngine {
    loader: DatasetLoader,
    statuses: Arc<dyn StatusStore>,
    generator: Option<Arc<dyn NarrativeGenerator>>,
    sink: Arc<dyn DocumentSink>,
    dataset: OnceCell<RwLock<Dataset>>,
    cache: AggregateCache,
    generation: AtomicU64,
    stats: EngineStats,
}

impl ReportEngine {
    pub fn new(
        source: Arc<dyn RowSource>,
        statuses: Arc<dyn StatusStore>,
        sink: Arc<dyn DocumentSink>,
    ) -> Self {
        Self {
            loader: DatasetLoader::new(source, statuses.clone()),
            statuses,
            generator: None,
            sink,
            dataset: OnceCell::new(),
            cache: AggregateCache::new(),
            generation: AtomicU64::new(0),
            stats: EngineStats::default(),
        }
    }

    /// Attach a narrative generator. Without one, every report renders with
    /// the narrative section omitted.
    #[must_use]
    pub fn with_generator(mut self, generator: Arc<dyn NarrativeGenerator>) -> Self {
        self.generator = Some(generator);
        self
    }

    /// Load the dataset if it has not been loaded yet. Concurrent callers
    /// share one fetch.
    pub async fn load(&self) -> Result<()> {
        self.dataset().await.map(|_| ())
    }

    /// Re-fetch from the source, replace the in-memory dataset, and drop
    /// every cached aggregate.
    pub async fn reload(&self) -> Result<()> {
        let fresh = self.loader.load().await?;
        self.stats.record_load();
        let lock = self
            .dataset
            .get_or_init(|| async { RwLock::new(Dataset::default()) })
            .await;
        *lock.write().await = fresh;
        self.generation.fetch_add(1, Ordering::Relaxed);
        self.cache.clear();
        log::info!("Reloaded dataset; aggregate cache cleared");
        Ok(())
    }

    /// Clone of the current dataset, loading it first if needed.
    pub async fn snapshot(&self) -> Result<Dataset> {
        Ok(self.dataset().await?.read().await.clone())
    }

    #[must_use]
    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    /// Assign a status to one row and persist the full status map.
    ///
    /// The write is a complete rewrite derived from the in-memory dataset,
    /// so the file on disk always mirrors what the engine would report.
    pub async fn set_status(
        &self,
        kind: RecordKind,
        row: usize,
        status: ItemStatus,
    ) -> Result<()> {
        let lock = self.dataset().await?;
        let mut dataset = lock.write().await;
        let found = match kind {
            RecordKind::Hardware => dataset
                .hardware
                .iter_mut()
                .find(|item| item.row == row)
                .map(|item| item.status = status)
                .is_some(),
            RecordKind::Software => dataset
                .software
                .iter_mut()
                .find(|item| item.row == row)
                .map(|item| item.status = status)
                .is_some(),
        };
        if !found {
            return Err(EngineError::UnknownRow { kind, row });
        }
        let map = full_status_map(&dataset);
        // Save while still holding the write lock so concurrent edits
        // cannot land their rewrites out of order.
        self.statuses.save(&map).await?;
        drop(dataset);
        self.stats.record_status_edit();
        log::info!("Set {kind} row {row} status to '{status}'");
        Ok(())
    }

    /// Build, render, and persist one report; returns where it went.
    pub async fn generate_report(&self, options: &ReportOptions) -> Result<ReportArtifact> {
        let lock = self.dataset().await?;
        let (hardware, software, source) = {
            let dataset = lock.read().await;
            match &options.scope {
                ReportScope::Full => (
                    dataset.hardware.clone(),
                    dataset.software.clone(),
                    dataset.source.clone(),
                ),
                ReportScope::Customer(name) => {
                    let key = customer_key(name);
                    (
                        dataset
                            .hardware
                            .iter()
                            .filter(|item| customer_key(&item.customer) == key)
                            .cloned()
                            .collect(),
                        dataset
                            .software
                            .iter()
                            .filter(|item| customer_key(&item.customer) == key)
                            .cloned()
                            .collect(),
                        dataset.source.clone(),
                    )
                }
            }
        };

        let (kind, subject) = match &options.scope {
            ReportScope::Full => (ReportKind::Summary, "All Customers".to_string()),
            ReportScope::Customer(name) => {
                // Prefer the dataset's spelling over the caller's.
                let display = hardware
                    .first()
                    .map(|item| item.customer.clone())
                    .or_else(|| software.first().map(|item| item.customer.clone()))
                    .ok_or_else(|| EngineError::UnknownCustomer(name.clone()))?;
                (ReportKind::Customer, display)
            }
        };

        let report_date = options
            .report_date
            .unwrap_or_else(|| Utc::now().date_naive());
        let cache_key = (
            scope_cache_key(&options.scope),
            report_date,
            self.generation.load(Ordering::Relaxed),
        );
        let bundle = if options.refresh_aggregates {
            let bundle = AggregateBundle::compute(&hardware, &software, report_date);
            self.cache.put(cache_key, bundle.clone());
            bundle
        } else if let Some(bundle) = self.cache.get(&cache_key) {
            self.stats.record_cache_hit();
            bundle
        } else {
            let bundle = AggregateBundle::compute(&hardware, &software, report_date);
            self.cache.put(cache_key, bundle.clone());
            bundle
        };

        let narrative = self
            .narrative_for(options, &subject, &hardware, &software, &bundle)
            .await?;
        let narrative_included = matches!(narrative.section, NarrativeSection::Text(_));

        let detail = match options.scope {
            ReportScope::Full => None,
            ReportScope::Customer(_) => Some(DetailRows { hardware, software }),
        };

        let input = ReportInput {
            kind,
            subject: subject.clone(),
            source,
            generated_at: Utc::now(),
            model: narrative.model,
            bundle,
            narrative: narrative.section,
            detail,
        };
        let document = assemble_report(&input);
        let html = render_html(&document);
        let filename = report_filename(kind, &subject, report_date);
        let location = self.sink.write(&filename, html.as_bytes()).await?;
        self.stats.record_report();
        log::info!("Wrote {filename} ({} bytes) to {location}", html.len());

        Ok(ReportArtifact {
            filename,
            location,
            bytes: html.len(),
            narrative_included,
            narrative_note: narrative.note,
        })
    }

    async fn dataset(&self) -> Result<&RwLock<Dataset>> {
        self.dataset
            .get_or_try_init(|| async {
                let dataset = self.loader.load().await?;
                self.stats.record_load();
                Ok::<_, EngineError>(RwLock::new(dataset))
            })
            .await
    }

    async fn narrative_for(
        &self,
        options: &ReportOptions,
        subject: &str,
        hardware: &[HardwareRenewal],
        software: &[SoftwareRenewal],
        bundle: &AggregateBundle,
    ) -> Result<NarrativeParts> {
        if !options.include_narrative {
            return Ok(NarrativeParts::omitted());
        }
        let Some(generator) = &self.generator else {
            return Ok(NarrativeParts::omitted());
        };
        let context = NarrativeContext::from_snapshot(subject, hardware, software, bundle);
        let parts = match generator.generate(&context).await? {
            NarrativeOutcome::Generated { text, model, .. } => NarrativeParts {
                section: NarrativeSection::Text(text),
                model: (!model.is_empty()).then_some(model),
                note: None,
            },
            NarrativeOutcome::BudgetExhausted {
                model,
                finish_reason,
            } => {
                log::warn!("Narrative budget exhausted (finish reason: {finish_reason})");
                NarrativeParts {
                    section: NarrativeSection::exhausted(&finish_reason),
                    model: (!model.is_empty()).then_some(model),
                    note: Some(format!(
                        "Narrative generation stopped early (finish reason: {finish_reason})."
                    )),
                }
            }
            NarrativeOutcome::NotGenerated { finish_reason } => {
                log::warn!("Narrative service declined to generate ({finish_reason:?})");
                let note = match &finish_reason {
                    Some(reason) => format!("Narrative service declined to generate ({reason})."),
                    None => "Narrative service declined to generate.".to_string(),
                };
                NarrativeParts {
                    section: NarrativeSection::declined(finish_reason.as_deref()),
                    model: None,
                    note: Some(note),
                }
            }
        };
        Ok(parts)
    }
}

fn scope_cache_key(scope: &ReportScope) -> String {
    match scope {
        ReportScope::Full => "*".to_string(),
        ReportScope::Customer(name) => customer_key(name),
    }
}

fn full_status_map(dataset: &Dataset) -> StatusMap {
    let mut map = StatusMap::default();
    for item in &dataset.hardware {
        if item.status.is_set() {
            map.set(RecordKind::Hardware, item.row, item.status);
        }
    }
    for item in &dataset.software {
        if item.status.is_set() {
            map.set(RecordKind::Software, item.row, item.status);
        }
    }
    map
}
