use kohs_engine::SessionRecord;
use kohs_stats::descriptive::DescriptiveStats;
use serde::Serialize;

/// Aggregates over completed sessions.
///
/// Incomplete sessions are ignored. Sessions without rotation or drag counts
/// contribute zero to those averages. With no completed sessions every
/// aggregate is zero and the recent list is empty.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub total_games: usize,
    pub average_time: f64,
    pub average_rotations: f64,
    pub average_drags: f64,
    pub fastest_time: f64,
    pub slowest_time: f64,
    pub median_time: f64,
    /// The latest completed sessions, newest first.
    pub recent_sessions: Vec<SessionRecord>,
}

impl AnalyticsSummary {
    /// Number of sessions kept in [`recent_sessions`](Self::recent_sessions).
    pub const RECENT_LIMIT: usize = 5;

    /// Summarizes `sessions`, given in chronological order.
    pub fn from_sessions<'a, I>(sessions: I) -> Self
    where
        I: IntoIterator<Item = &'a SessionRecord>,
    {
        let completed = sessions
            .into_iter()
            .filter(|s| s.completed)
            .collect::<Vec<_>>();
        let Some(time) = DescriptiveStats::new(completed.iter().map(|s| s.time_seconds)) else {
            return Self::default();
        };

        let average_rotations = DescriptiveStats::mean_or_zero(
            completed
                .iter()
                .map(|s| f64::from(s.rotations.unwrap_or(0))),
        );
        let average_drags = DescriptiveStats::mean_or_zero(
            completed.iter().map(|s| f64::from(s.drags.unwrap_or(0))),
        );
        let recent_sessions = completed
            .iter()
            .rev()
            .take(Self::RECENT_LIMIT)
            .map(|&s| s.clone())
            .collect();

        Self {
            total_games: time.count,
            average_time: time.mean,
            average_rotations,
            average_drags,
            fastest_time: time.min,
            slowest_time: time.max,
            median_time: time.median,
            recent_sessions,
        }
    }
}
