//! Etut protocol definitions for CLI-daemon communication
//!
//! This crate defines the IPC protocol between the etut CLI and daemon.
//! All types are serializable with bincode for efficient binary communication.

use serde::{Deserialize, Serialize};

pub use etut_core::{Phase, Session, SessionId, SessionKind};

/// Requests sent from CLI to daemon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Request {
    /// Start a work session (from idle) or a break (after a completed work
    /// session); a no-op in any other state
    Start,
    /// Pause the running session
    Pause,
    /// Resume a paused session
    Resume,
    /// Stop the running session; a work session takes the supplied name
    /// (None = keep the default)
    Stop { name: Option<String> },
    /// Rename a work session, live or finalized
    Rename { id: SessionId, name: String },
    /// Empty the session history and drop any in-progress session
    ClearLedger,
    /// Set the work duration in minutes (the daemon clamps and steps it)
    SetWorkDuration { minutes: u64 },
    /// Set the break duration in minutes (the daemon clamps it)
    SetBreakDuration { minutes: u64 },
    /// Get the current timer status
    GetStatus,
    /// Get the finalized-session history
    GetLedger,
    /// Get the aggregate statistics
    GetStats,
    /// Ping the daemon to check if it's alive
    Ping,
}

/// Responses sent from daemon to CLI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Response {
    /// Generic success acknowledgment
    Ok,
    /// Current timer status
    Status {
        phase: Phase,
        /// Remaining seconds of the current countdown
        time_left_seconds: u64,
        /// Name of the in-progress session, if any
        session_name: Option<String>,
        /// Kind of the in-progress session, if any
        session_kind: Option<SessionKind>,
        work_duration_minutes: u64,
        break_duration_minutes: u64,
    },
    /// Read-only copies of the finalized sessions, in completion order
    Ledger { sessions: Vec<Session> },
    /// Aggregate statistics over the ledger and the in-progress session
    Stats {
        total_work_seconds: i64,
        total_break_seconds: i64,
        work_session_count: u64,
        break_session_count: u64,
        today_work_minutes: i64,
    },
    /// The clamped duration value actually applied
    DurationSet { minutes: u64 },
    /// Error response with message
    Error { message: String },
    /// Pong response to ping
    Pong,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn stop_request_with_turkish_name_roundtrips() {
        let request = Request::Stop {
            name: Some("Çalışma — Matematik".to_string()),
        };

        let bytes = bincode::serialize(&request).unwrap();
        let decoded: Request = bincode::deserialize(&bytes).unwrap();

        assert_eq!(request, decoded);
    }

    #[test]
    fn status_response_roundtrips() {
        let response = Response::Status {
            phase: Phase::Working,
            time_left_seconds: 1795,
            session_name: Some("Fizik".to_string()),
            session_kind: Some(SessionKind::Work),
            work_duration_minutes: 30,
            break_duration_minutes: 5,
        };

        let bytes = bincode::serialize(&response).unwrap();
        let decoded: Response = bincode::deserialize(&bytes).unwrap();

        assert_eq!(response, decoded);
    }

    #[test]
    fn ledger_response_carries_finalized_sessions() {
        let started_at = Utc.with_ymd_and_hms(2024, 3, 11, 9, 0, 0).unwrap();
        let mut session = Session::begin(1, SessionKind::Work, started_at);
        session.ended_at = Some(started_at + chrono::Duration::seconds(1800));
        session.total_seconds = Some(1800);
        session.completed = true;

        let response = Response::Ledger {
            sessions: vec![session],
        };

        let bytes = bincode::serialize(&response).unwrap();
        let decoded: Response = bincode::deserialize(&bytes).unwrap();

        match decoded {
            Response::Ledger { sessions } => {
                assert_eq!(sessions.len(), 1);
                assert_eq!(sessions[0].total_seconds, Some(1800));
                assert!(sessions[0].completed);
            }
            other => panic!("expected Ledger, got {other:?}"),
        }
    }
}
