//! Telemetry for screening sessions
//!
//! Collects in-process events about artifact loads and evaluations and
//! renders a short session summary.

use colored::Colorize;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

use crate::types::{DiseaseTarget, RiskTier};

/// Telemetry event types
#[derive(Debug, Clone)]
pub enum TelemetryEvent {
    ArtifactsLoaded {
        target: DiseaseTarget,
        duration_ms: u64,
        timestamp: Instant,
    },
    EvaluationCompleted {
        target: DiseaseTarget,
        tier: RiskTier,
        probability: f64,
        duration_ms: u64,
        timestamp: Instant,
    },
    EvaluationFailed {
        target: DiseaseTarget,
        error: String,
        timestamp: Instant,
    },
    /// Form submitted without certification
    SubmissionBlocked { timestamp: Instant },
}

/// Oldest events are dropped past this many
pub const MAX_EVENTS: usize = 256;

/// Events listed in the verbose session summary
const SUMMARY_EVENTS: usize = 10;

impl TelemetryEvent {
    fn timestamp(&self) -> Instant {
        match self {
            TelemetryEvent::ArtifactsLoaded { timestamp, .. }
            | TelemetryEvent::EvaluationCompleted { timestamp, .. }
            | TelemetryEvent::EvaluationFailed { timestamp, .. }
            | TelemetryEvent::SubmissionBlocked { timestamp } => *timestamp,
        }
    }

    /// One summary line, timed relative to `start`
    pub fn describe(&self, start: Instant) -> String {
        let offset = self.timestamp().saturating_duration_since(start).as_secs_f64();
        let body = match self {
            TelemetryEvent::ArtifactsLoaded {
                target,
                duration_ms,
                ..
            } => format!("loaded {} artifacts ({}ms)", target, duration_ms),
            TelemetryEvent::EvaluationCompleted {
                target,
                tier,
                probability,
                duration_ms,
                ..
            } => format!(
                "{} screening: {} p={:.3} ({}ms)",
                target, tier, probability, duration_ms
            ),
            TelemetryEvent::EvaluationFailed { target, error, .. } => {
                format!("{} screening failed: {}", target, error)
            }
            TelemetryEvent::SubmissionBlocked { .. } => "submission not certified".to_string(),
        };
        format!("+{:.1}s {}", offset, body)
    }
}

/// Telemetry statistics
#[derive(Debug, Clone, Default)]
pub struct TelemetryStats {
    pub artifact_loads: usize,
    pub evaluations: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub blocked: usize,
    pub low: usize,
    pub moderate: usize,
    pub high: usize,
}

/// Telemetry collector
#[derive(Clone)]
pub struct TelemetryCollector {
    events: Arc<Mutex<VecDeque<TelemetryEvent>>>,
    stats: Arc<Mutex<TelemetryStats>>,
    start_time: Instant,
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|e| e.into_inner())
}

impl TelemetryCollector {
    /// Create a new telemetry collector
    pub fn new() -> Self {
        Self {
            events: Arc::new(Mutex::new(VecDeque::with_capacity(MAX_EVENTS))),
            stats: Arc::new(Mutex::new(TelemetryStats::default())),
            start_time: Instant::now(),
        }
    }

    /// Record an event
    pub fn record(&self, event: TelemetryEvent) {
        {
            let mut stats = lock(&self.stats);
            match &event {
                TelemetryEvent::ArtifactsLoaded { .. } => {
                    stats.artifact_loads += 1;
                }
                TelemetryEvent::EvaluationCompleted { tier, .. } => {
                    stats.evaluations += 1;
                    stats.succeeded += 1;
                    match tier {
                        RiskTier::Low => stats.low += 1,
                        RiskTier::Moderate => stats.moderate += 1,
                        RiskTier::High => stats.high += 1,
                    }
                }
                TelemetryEvent::EvaluationFailed { .. } => {
                    stats.evaluations += 1;
                    stats.failed += 1;
                }
                TelemetryEvent::SubmissionBlocked { .. } => {
                    stats.blocked += 1;
                }
            }
        }

        let mut events = lock(&self.events);
        if events.len() == MAX_EVENTS {
            events.pop_front();
        }
        events.push_back(event);
    }

    /// Get current statistics
    pub fn get_stats(&self) -> TelemetryStats {
        lock(&self.stats).clone()
    }

    /// Get elapsed time since start
    pub fn elapsed(&self) -> std::time::Duration {
        self.start_time.elapsed()
    }

    /// Get event count
    pub fn event_count(&self) -> usize {
        lock(&self.events).len()
    }

    /// Get recent events (last n)
    pub fn recent_events(&self, n: usize) -> Vec<TelemetryEvent> {
        let events = lock(&self.events);
        let skip = events.len().saturating_sub(n);
        events.iter().skip(skip).cloned().collect()
    }

    /// Fraction of evaluations that produced an assessment
    pub fn success_rate(&self) -> f64 {
        let stats = lock(&self.stats);
        if stats.evaluations == 0 {
            1.0
        } else {
            stats.succeeded as f64 / stats.evaluations as f64
        }
    }
}

impl Default for TelemetryCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Simple telemetry display
pub struct TelemetryDisplay {
    collector: TelemetryCollector,
    verbosity: crate::cli::Verbosity,
}

impl TelemetryDisplay {
    /// Create a new display
    pub fn new(collector: TelemetryCollector, verbosity: crate::cli::Verbosity) -> Self {
        Self {
            collector,
            verbosity,
        }
    }

    /// Display summary statistics
    pub fn display_summary(&self) {
        if !self.verbosity.show_progress() {
            return;
        }
        let stats = self.collector.get_stats();

        println!("\n{}", "Session Summary".bold());
        println!("─────────────────────────────────────");
        println!("Duration:          {:?}", self.collector.elapsed());
        println!("Screenings:        {}", stats.evaluations);
        println!("Success rate:      {:.1}%", self.collector.success_rate() * 100.0);
        println!(
            "Tiers:             {} low / {} moderate / {} high",
            stats.low.to_string().green(),
            stats.moderate.to_string().yellow(),
            stats.high.to_string().red()
        );
        if stats.blocked > 0 {
            println!("Uncertified:       {}", stats.blocked);
        }
        if self.verbosity.show_events() {
            println!("Artifact loads:    {}", stats.artifact_loads);
            let recent = self.collector.recent_events(SUMMARY_EVENTS);
            if !recent.is_empty() {
                println!("Recent events:");
                for event in &recent {
                    println!("  {}", event.describe(self.collector.start_time).dimmed());
                }
            }
        }
        println!();
    }
}
