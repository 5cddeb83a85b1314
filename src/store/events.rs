//! Interaction event log with buffered flushing and retention pruning.
//!
//! Events append to an in-memory list backed by a JSON array file. Writes
//! are batched: the file is rewritten once every `flush_every` recorded
//! events, and again on shutdown. Each flush drops events older than the
//! configured retention window.

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use chrono::{Duration, NaiveDate, Utc};
use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::TelemetrySettings;
use crate::error::{Error, Result};
use crate::types::InteractionEvent;

/// Aggregated analytics over a recent window of events.
#[derive(Debug, Clone, Serialize)]
pub struct AnalyticsSummary {
    pub period_days: u32,
    pub total_interactions: usize,
    pub unique_personas: usize,
    pub success_rate: f64,
    pub avg_interactions_per_persona: f64,
    pub task_distribution: HashMap<String, usize>,
    pub language_distribution: HashMap<String, usize>,
    pub total_events: usize,
}

/// Per-day interaction counts for trend reporting.
#[derive(Debug, Clone, Serialize)]
pub struct DailyCount {
    pub date: NaiveDate,
    pub interactions: usize,
    pub successes: usize,
}

struct LogInner {
    events: Vec<InteractionEvent>,
    pending: usize,
}

/// Append-only event log persisted as a JSON array.
pub struct EventLog {
    path: PathBuf,
    enabled: bool,
    flush_every: usize,
    retention_days: u32,
    inner: Mutex<LogInner>,
}

impl EventLog {
    /// Open the log, loading existing events when the file is present.
    pub fn open(path: PathBuf, settings: &TelemetrySettings) -> Result<Self> {
        if let Some(parent) = path.parent() {
            super::ensure_data_dir(parent)?;
        }

        let events = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|e| Error::IoRead {
                path: path.clone(),
                source: e,
            })?;
            let events: Vec<InteractionEvent> =
                serde_json::from_str(&content).map_err(|e| Error::StorageCorrupted {
                    path: path.clone(),
                    source: e,
                })?;
            info!(count = events.len(), path = %path.display(), "Loaded event log");
            events
        } else {
            Vec::new()
        };

        Ok(Self {
            path,
            enabled: settings.enabled,
            flush_every: settings.flush_every.max(1),
            retention_days: settings.retention_days,
            inner: Mutex::new(LogInner { events, pending: 0 }),
        })
    }

    /// Whether telemetry recording is on.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Record an event. A no-op when telemetry is disabled. The file is
    /// rewritten once enough events have accumulated.
    pub fn record(&self, event: InteractionEvent) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let mut inner = self.inner.lock();
        debug!(event_type = %event.event_type, persona_id = %event.persona_id, "Recorded event");
        inner.events.push(event);
        inner.pending += 1;

        if inner.pending >= self.flush_every {
            self.flush_locked(&mut inner)?;
        }
        Ok(())
    }

    /// Flush pending events to disk, pruning anything past retention.
    pub fn flush(&self) -> Result<()> {
        let mut inner = self.inner.lock();
        self.flush_locked(&mut inner)
    }

    fn flush_locked(&self, inner: &mut LogInner) -> Result<()> {
        if self.retention_days > 0 {
            let cutoff = Utc::now() - Duration::days(i64::from(self.retention_days));
            let before = inner.events.len();
            inner.events.retain(|e| e.timestamp >= cutoff);
            let pruned = before - inner.events.len();
            if pruned > 0 {
                debug!(pruned, retention_days = self.retention_days, "Pruned expired events");
            }
        }

        let json = serde_json::to_string_pretty(&inner.events)
            .map_err(|e| Error::storage_write(&self.path, e.to_string()))?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, json).map_err(|e| Error::storage_write(&tmp, e.to_string()))?;
        fs::rename(&tmp, &self.path)
            .map_err(|e| Error::storage_write(&self.path, e.to_string()))?;

        inner.pending = 0;
        Ok(())
    }

    /// Events for one persona, newest first.
    pub fn persona_interactions(&self, persona_id: Uuid) -> Vec<InteractionEvent> {
        let inner = self.inner.lock();
        let mut events: Vec<InteractionEvent> = inner
            .events
            .iter()
            .filter(|e| e.persona_id == persona_id)
            .cloned()
            .collect();
        events.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        events
    }

    /// Paged event listing, newest first, with optional filters.
    pub fn list(
        &self,
        limit: usize,
        offset: usize,
        event_type: Option<&str>,
        persona_id: Option<Uuid>,
    ) -> (Vec<InteractionEvent>, usize) {
        let inner = self.inner.lock();
        let mut matched: Vec<InteractionEvent> = inner
            .events
            .iter()
            .filter(|e| event_type.map_or(true, |t| e.event_type == t))
            .filter(|e| persona_id.map_or(true, |p| e.persona_id == p))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        let total = matched.len();
        let page = matched.into_iter().skip(offset).take(limit).collect();
        (page, total)
    }

    /// Aggregate the last `days` of interaction events.
    pub fn summary(&self, days: u32) -> AnalyticsSummary {
        let inner = self.inner.lock();
        let cutoff = Utc::now() - Duration::days(i64::from(days));

        let recent: Vec<&InteractionEvent> = inner
            .events
            .iter()
            .filter(|e| e.timestamp >= cutoff && e.event_type == "interaction")
            .collect();

        let total = recent.len();
        let successes = recent.iter().filter(|e| e.success).count();
        let unique: std::collections::HashSet<Uuid> =
            recent.iter().map(|e| e.persona_id).collect();

        let mut task_distribution: HashMap<String, usize> = HashMap::new();
        let mut language_distribution: HashMap<String, usize> = HashMap::new();
        for event in &recent {
            *task_distribution
                .entry(event.task_type.slug().to_string())
                .or_insert(0) += 1;
            *language_distribution
                .entry(event.language.tag().to_string())
                .or_insert(0) += 1;
        }

        AnalyticsSummary {
            period_days: days,
            total_interactions: total,
            unique_personas: unique.len(),
            success_rate: if total > 0 {
                successes as f64 / total as f64
            } else {
                0.0
            },
            avg_interactions_per_persona: if unique.is_empty() {
                0.0
            } else {
                total as f64 / unique.len() as f64
            },
            task_distribution,
            language_distribution,
            total_events: inner.events.len(),
        }
    }

    /// Daily interaction counts for the last `days`, oldest day first.
    pub fn daily_trends(&self, days: u32) -> Vec<DailyCount> {
        let inner = self.inner.lock();
        let cutoff = Utc::now() - Duration::days(i64::from(days));

        let mut by_day: HashMap<NaiveDate, (usize, usize)> = HashMap::new();
        for event in inner
            .events
            .iter()
            .filter(|e| e.timestamp >= cutoff && e.event_type == "interaction")
        {
            let entry = by_day.entry(event.timestamp.date_naive()).or_insert((0, 0));
            entry.0 += 1;
            if event.success {
                entry.1 += 1;
            }
        }

        let mut trends: Vec<DailyCount> = by_day
            .into_iter()
            .map(|(date, (interactions, successes))| DailyCount {
                date,
                interactions,
                successes,
            })
            .collect();
        trends.sort_by_key(|d| d.date);
        trends
    }
}

impl Drop for EventLog {
    fn drop(&mut self) {
        let path = self.path.clone();
        let inner = self.inner.get_mut();
        if inner.pending == 0 {
            return;
        }
        match serde_json::to_string_pretty(&inner.events) {
            Ok(json) => {
                if let Err(e) = fs::write(&path, json) {
                    warn!(error = %e, "Failed to flush event log on shutdown");
                }
            }
            Err(e) => warn!(error = %e, "Failed to serialize event log on shutdown"),
        }
    }
}
