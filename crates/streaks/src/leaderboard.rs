//! Leaderboard ranking.
//!
//! Pure over a gathered snapshot, so the ordering is a function of the data
//! alone and never of storage iteration order.

use serde::Serialize;

pub use database::models::RankCandidate;

use crate::error::{Result, StreakError};

/// One ranked leaderboard row. Computed on demand, never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardEntry {
    pub user_id: String,
    pub display_name: String,
    pub photo_url: Option<String>,
    pub current_streak: i64,
    pub actions_this_week: i64,
    /// 1-based position; strictly sequential even when sort keys tie.
    pub rank: i64,
}

/// Validate a requested leaderboard size before any work happens.
pub fn parse_limit(limit: i64) -> Result<usize> {
    if limit < 0 {
        return Err(StreakError::InvalidInput(format!(
            "leaderboard limit must be non-negative, got {limit}"
        )));
    }
    Ok(limit as usize)
}

/// Order candidates and assign ranks.
///
/// Descending by current streak, ties broken by weekly action count
/// descending, then display name ascending. User id is the final
/// disambiguator so the output is total-ordered even for identical names.
/// Ranks are assigned before truncating to `limit`.
pub fn rank(mut candidates: Vec<RankCandidate>, limit: usize) -> Vec<LeaderboardEntry> {
    candidates.sort_by(|a, b| {
        b.current_streak
            .cmp(&a.current_streak)
            .then_with(|| b.actions_this_week.cmp(&a.actions_this_week))
            .then_with(|| a.display_name.cmp(&b.display_name))
            .then_with(|| a.user_id.cmp(&b.user_id))
    });

    candidates
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(index, c)| LeaderboardEntry {
            user_id: c.user_id,
            display_name: c.display_name,
            photo_url: c.photo_url,
            current_streak: c.current_streak,
            actions_this_week: c.actions_this_week,
            rank: index as i64 + 1,
        })
        .collect()
}
