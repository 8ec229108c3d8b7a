//! Pure streak transition logic.
//!
//! Comparisons use calendar days, not 24-hour intervals: an action at 23:59
//! followed by one at 00:01 the next day still counts as consecutive.

use chrono::{DateTime, NaiveDate, Utc};

use database::models::StreakRecord;

/// Truncate a timestamp to its calendar day.
///
/// Days are reckoned in UTC for every user. Swapping in a per-user timezone
/// later only needs to change this function.
pub fn day_of(timestamp: DateTime<Utc>) -> NaiveDate {
    timestamp.date_naive()
}

/// A user's streak counters, detached from storage.
///
/// Invariants, upheld by every transition: `longest >= current`,
/// `current >= 0`, and `last_action_date` never moves backwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreakState {
    /// Consecutive-day count of activity.
    pub current: i64,
    /// Historical maximum of `current`.
    pub longest: i64,
    /// Calendar day of the most recent counted action.
    pub last_action_date: Option<NaiveDate>,
}

impl StreakState {
    /// The state after a user's first counted action.
    pub fn start(day: NaiveDate) -> Self {
        Self {
            current: 1,
            longest: 1,
            last_action_date: Some(day),
        }
    }

    /// Apply one logged action on `day` and return the next state.
    ///
    /// - No prior action day recorded: start fresh at 1/1.
    /// - Same day: counters unchanged (same-day repeats are idempotent).
    /// - Exactly the next day: current streak grows, longest follows.
    /// - Gap of two or more days: current resets to 1, longest stays.
    /// - Day earlier than the recorded one (clock skew, backdated data):
    ///   treated like a same-day repeat; nothing changes.
    pub fn advance(&self, day: NaiveDate) -> Self {
        let Some(last) = self.last_action_date else {
            return Self::start(day);
        };

        let days_diff = (day - last).num_days();

        if days_diff == 1 {
            let current = self.current + 1;
            Self {
                current,
                longest: self.longest.max(current),
                last_action_date: Some(day),
            }
        } else if days_diff > 1 {
            Self {
                current: 1,
                longest: self.longest,
                last_action_date: Some(day),
            }
        } else {
            *self
        }
    }

    /// Read the state out of a stored record.
    pub fn from_record(record: &StreakRecord) -> Self {
        Self {
            current: record.current_streak,
            longest: record.longest_streak,
            last_action_date: record.last_action_date,
        }
    }

    /// Attach the state to a user for storage.
    pub fn into_record(self, user_id: String) -> StreakRecord {
        StreakRecord {
            user_id,
            current_streak: self.current,
            longest_streak: self.longest,
            last_action_date: self.last_action_date,
        }
    }
}
