//! Developer activity telemetry
//!
//! Turns file modification times (and optional terminal idle state) into a
//! recency histogram, quick counters, a focus score, and an idle verdict.
//! Pure over its inputs: the caller supplies the records, the clock, and
//! any terminal signal.

pub mod terminal;

use crate::models::FileRecord;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

pub const DEFAULT_WINDOW_HOURS: f64 = 6.0;
pub const DEFAULT_BUCKETS: usize = 6;
pub const DEFAULT_IDLE_THRESHOLD_MINUTES: f64 = 15.0;

/// Minutes since the last edit after which focus has fully decayed.
const FOCUS_DECAY_MINUTES: f64 = 120.0;

#[derive(Debug, Clone)]
pub struct ActivityParams {
    pub window_hours: f64,
    pub buckets: usize,
    pub idle_threshold_minutes: f64,
    /// Idle minutes reported by the terminal session, when a probe parsed
    /// one. `None` (unknown) never triggers the idle verdict by itself.
    pub terminal_idle_minutes: Option<f64>,
    pub force_idle: bool,
}

impl Default for ActivityParams {
    fn default() -> Self {
        Self {
            window_hours: DEFAULT_WINDOW_HOURS,
            buckets: DEFAULT_BUCKETS,
            idle_threshold_minutes: DEFAULT_IDLE_THRESHOLD_MINUTES,
            terminal_idle_minutes: None,
            force_idle: false,
        }
    }
}

/// One histogram bucket; index 0 covers the most recent ages.
#[derive(Debug, Clone, Serialize)]
pub struct ActivityBucket {
    pub index: usize,
    pub from_minutes: f64,
    pub to_minutes: f64,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum FocusState {
    Flow,
    Steady,
    Rest,
}

impl FocusState {
    pub fn label(&self) -> &'static str {
        match self {
            FocusState::Flow => "FLOW",
            FocusState::Steady => "STEADY",
            FocusState::Rest => "REST",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct QuickStats {
    pub touched_5m: usize,
    pub touched_30m: usize,
    pub touched_60m: usize,
    pub touched_24h: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct ActivitySummary {
    /// Path of the most recently modified file, when any file exists.
    pub newest: Option<PathBuf>,
    pub minutes_since_edit: Option<f64>,
    pub histogram: Vec<ActivityBucket>,
    pub quick: QuickStats,
    pub focus_score: f64,
    pub focus_state: FocusState,
    pub is_idle: bool,
    pub total_files: usize,
}

impl ActivitySummary {
    /// Bar lengths scaled against this histogram's own largest count.
    pub fn histogram_bars(&self, width: usize) -> Vec<usize> {
        let max = self
            .histogram
            .iter()
            .map(|b| b.count)
            .max()
            .unwrap_or(0)
            .max(1);
        self.histogram.iter().map(|b| b.count * width / max).collect()
    }
}

pub fn analyze(
    records: &[FileRecord],
    now: DateTime<Utc>,
    params: &ActivityParams,
) -> ActivitySummary {
    let buckets = params.buckets.max(1);
    let threshold = params.idle_threshold_minutes;
    let terminal_idle = params
        .terminal_idle_minutes
        .map_or(false, |m| m > threshold);

    let Some(newest) = records.iter().max_by_key(|r| r.modified) else {
        return ActivitySummary {
            newest: None,
            minutes_since_edit: None,
            histogram: empty_histogram(params.window_hours, buckets),
            quick: QuickStats::default(),
            focus_score: 0.0,
            focus_state: FocusState::Rest,
            is_idle: params.force_idle || terminal_idle,
            total_files: 0,
        };
    };

    let minutes_since_edit = age_seconds(now, newest.modified) / 60.0;

    let window_secs = params.window_hours * 3600.0;
    let span_secs = window_secs / buckets as f64;
    let mut histogram = empty_histogram(params.window_hours, buckets);
    let mut quick = QuickStats::default();

    for record in records {
        let age_secs = age_seconds(now, record.modified);
        if age_secs <= window_secs {
            let idx = ((age_secs / span_secs) as usize).min(buckets - 1);
            histogram[idx].count += 1;
        }
        let age_min = age_secs / 60.0;
        if age_min <= 5.0 {
            quick.touched_5m += 1;
        }
        if age_min <= 30.0 {
            quick.touched_30m += 1;
        }
        if age_min <= 60.0 {
            quick.touched_60m += 1;
        }
        if age_min <= 24.0 * 60.0 {
            quick.touched_24h += 1;
        }
    }

    let focus_score = (1.0 - minutes_since_edit / FOCUS_DECAY_MINUTES).clamp(0.0, 1.0);
    let focus_state = if minutes_since_edit < 5.0 {
        FocusState::Flow
    } else if minutes_since_edit <= 30.0 {
        FocusState::Steady
    } else {
        FocusState::Rest
    };

    ActivitySummary {
        newest: Some(newest.path.clone()),
        minutes_since_edit: Some(minutes_since_edit),
        histogram,
        quick,
        focus_score,
        focus_state,
        is_idle: minutes_since_edit > threshold || terminal_idle || params.force_idle,
        total_files: records.len(),
    }
}

fn empty_histogram(window_hours: f64, buckets: usize) -> Vec<ActivityBucket> {
    let span_minutes = window_hours * 60.0 / buckets as f64;
    (0..buckets)
        .map(|index| ActivityBucket {
            index,
            from_minutes: index as f64 * span_minutes,
            to_minutes: (index + 1) as f64 * span_minutes,
            count: 0,
        })
        .collect()
}

/// Age in seconds, clamped at zero for mtimes in the future.
fn age_seconds(now: DateTime<Utc>, modified: DateTime<Utc>) -> f64 {
    ((now - modified).num_milliseconds() as f64 / 1000.0).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn record_aged(name: &str, minutes: i64) -> FileRecord {
        FileRecord {
            path: PathBuf::from(name),
            modified: fixed_now() - Duration::minutes(minutes),
            size_bytes: 1,
            mode: 0o644,
        }
    }

    #[test]
    fn test_empty_workspace_is_terminal_not_fatal() {
        let summary = analyze(&[], fixed_now(), &ActivityParams::default());
        assert_eq!(summary.total_files, 0);
        assert!(summary.newest.is_none());
        assert!(!summary.is_idle);
        assert_eq!(summary.focus_state, FocusState::Rest);
    }

    #[test]
    fn test_three_file_workspace() {
        let records = vec![
            record_aged("a.rs", 1),
            record_aged("b.rs", 10),
            record_aged("c.rs", 130),
        ];
        let summary = analyze(&records, fixed_now(), &ActivityParams::default());

        assert_eq!(summary.minutes_since_edit, Some(1.0));
        assert_eq!(summary.focus_state, FocusState::Flow);
        assert!(!summary.is_idle);
        assert_eq!(summary.quick.touched_5m, 1);
        assert_eq!(summary.quick.touched_30m, 2);
        assert_eq!(summary.quick.touched_60m, 2);
        assert_eq!(summary.quick.touched_24h, 3);
    }

    #[test]
    fn test_histogram_counts_cover_window_only() {
        // 6h window, 6 buckets of 60 minutes each.
        let records = vec![
            record_aged("recent", 30),
            record_aged("mid", 90),
            record_aged("boundary", 360),
            record_aged("stale", 400),
        ];
        let summary = analyze(&records, fixed_now(), &ActivityParams::default());

        let total: usize = summary.histogram.iter().map(|b| b.count).sum();
        assert_eq!(total, 3);
        assert_eq!(summary.histogram[0].count, 1);
        assert_eq!(summary.histogram[1].count, 1);
        // Exactly on the window edge lands in the last bucket.
        assert_eq!(summary.histogram[5].count, 1);
    }

    #[test]
    fn test_bars_scale_against_local_max() {
        let mut records = vec![record_aged("solo", 90)];
        for i in 0..4 {
            records.push(record_aged(&format!("burst{i}"), 10));
        }
        let summary = analyze(&records, fixed_now(), &ActivityParams::default());
        let bars = summary.histogram_bars(24);
        assert_eq!(bars[0], 24);
        assert_eq!(bars[1], 6);
    }

    #[test]
    fn test_bars_with_no_counts() {
        let summary = analyze(&[], fixed_now(), &ActivityParams::default());
        assert!(summary.histogram_bars(24).iter().all(|&b| b == 0));
    }

    #[test]
    fn test_focus_score_decay_and_clamp() {
        let summary = analyze(
            &[record_aged("a", 60)],
            fixed_now(),
            &ActivityParams::default(),
        );
        assert!((summary.focus_score - 0.5).abs() < 1e-9);

        let summary = analyze(
            &[record_aged("a", 600)],
            fixed_now(),
            &ActivityParams::default(),
        );
        assert_eq!(summary.focus_score, 0.0);
    }

    #[test]
    fn test_idle_by_edit_gap() {
        let summary = analyze(
            &[record_aged("a", 20)],
            fixed_now(),
            &ActivityParams::default(),
        );
        assert!(summary.is_idle);
        assert_eq!(summary.focus_state, FocusState::Steady);
    }

    #[test]
    fn test_idle_by_terminal_signal() {
        let params = ActivityParams {
            terminal_idle_minutes: Some(45.0),
            ..Default::default()
        };
        let summary = analyze(&[record_aged("a", 1)], fixed_now(), &params);
        assert!(summary.is_idle);
    }

    #[test]
    fn test_unknown_terminal_idle_does_not_trigger() {
        let params = ActivityParams {
            terminal_idle_minutes: None,
            ..Default::default()
        };
        let summary = analyze(&[record_aged("a", 1)], fixed_now(), &params);
        assert!(!summary.is_idle);
    }

    #[test]
    fn test_force_idle_overrides_activity() {
        let params = ActivityParams {
            force_idle: true,
            ..Default::default()
        };
        let summary = analyze(&[record_aged("a", 0)], fixed_now(), &params);
        assert!(summary.is_idle);
    }
}
