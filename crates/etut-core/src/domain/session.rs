use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::SessionKind;

pub type SessionId = u64;

/// One work or break interval. Created when the timer starts it, finalized
/// exactly once when it completes or is stopped; the ledger only ever holds
/// finalized sessions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub id: SessionId,
    pub kind: SessionKind,
    pub name: String,
    pub started_at: DateTime<Utc>,
    pub ended_at: Option<DateTime<Utc>>,
    /// Non-null exactly while the session is currently paused.
    pub pause_started_at: Option<DateTime<Utc>>,
    pub total_pause_seconds: i64,
    /// Net active duration, set once at finalization.
    pub total_seconds: Option<i64>,
    /// True only if the countdown ran out; manual stops leave this false.
    pub completed: bool,
}

impl Session {
    pub fn begin(id: SessionId, kind: SessionKind, now: DateTime<Utc>) -> Self {
        Self {
            id,
            kind,
            name: kind.default_name().to_string(),
            started_at: now,
            ended_at: None,
            pause_started_at: None,
            total_pause_seconds: 0,
            total_seconds: None,
            completed: false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.ended_at.is_none()
    }

    pub fn is_paused(&self) -> bool {
        self.pause_started_at.is_some()
    }

    /// Net active seconds. Falls back to wall-clock-minus-pause arithmetic
    /// for entries that carry an end time but no finalized total.
    pub fn net_seconds(&self) -> i64 {
        if let Some(total) = self.total_seconds {
            return total;
        }
        match self.ended_at {
            Some(ended_at) => {
                let gross = ended_at.signed_duration_since(self.started_at).num_seconds();
                (gross - self.total_pause_seconds).max(0)
            }
            None => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 11, 9, 0, 0).unwrap()
    }

    #[test]
    fn new_session_starts_active_with_default_name() {
        let session = Session::begin(1, SessionKind::Work, t0());

        assert!(session.is_active());
        assert!(!session.is_paused());
        assert_eq!(session.name, "Çalışma");
        assert_eq!(session.total_pause_seconds, 0);
        assert!(session.total_seconds.is_none());
        assert!(!session.completed);
    }

    #[test]
    fn break_session_gets_break_default_name() {
        let session = Session::begin(2, SessionKind::Break, t0());
        assert_eq!(session.name, "Mola");
    }

    #[test]
    fn net_seconds_prefers_finalized_total() {
        let mut session = Session::begin(1, SessionKind::Work, t0());
        session.ended_at = Some(t0() + chrono::Duration::seconds(600));
        session.total_seconds = Some(480);

        assert_eq!(session.net_seconds(), 480);
    }

    #[test]
    fn net_seconds_falls_back_to_wall_clock_minus_pause() {
        let mut session = Session::begin(1, SessionKind::Work, t0());
        session.ended_at = Some(t0() + chrono::Duration::seconds(600));
        session.total_pause_seconds = 100;

        assert_eq!(session.net_seconds(), 500);
    }

    #[test]
    fn net_seconds_is_zero_while_active() {
        let session = Session::begin(1, SessionKind::Work, t0());
        assert_eq!(session.net_seconds(), 0);
    }
}
