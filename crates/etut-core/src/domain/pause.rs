//! Pause accounting for a single session.
//!
//! Sessions are passed by value and returned updated, so the state machine
//! always holds the only copy and no stale reference can observe a
//! half-applied pause.

use chrono::{DateTime, Utc};

use super::Session;

/// Marks the session paused at `now`. No-op if the session is already
/// paused or already finalized.
pub fn pause(mut session: Session, now: DateTime<Utc>) -> Session {
    if session.pause_started_at.is_some() || session.ended_at.is_some() {
        return session;
    }
    session.pause_started_at = Some(now);
    session
}

/// Folds the open pause interval into `total_pause_seconds` and clears the
/// pause marker. No-op if the session is not paused.
pub fn resume(mut session: Session, now: DateTime<Utc>) -> Session {
    let Some(pause_started_at) = session.pause_started_at.take() else {
        return session;
    };
    let elapsed = now.signed_duration_since(pause_started_at).num_seconds();
    session.total_pause_seconds += elapsed.max(0);
    session
}

/// Finalizes the session at `now`. A session stopped while paused first has
/// its open pause interval accumulated, exactly as `resume` would. The net
/// total is clamped to zero: a pause that outlives the configured duration
/// must not produce a negative result.
pub fn finalize(session: Session, now: DateTime<Utc>, completed: bool) -> Session {
    let mut session = resume(session, now);
    session.ended_at = Some(now);
    let gross = now.signed_duration_since(session.started_at).num_seconds();
    session.total_seconds = Some((gross - session.total_pause_seconds).max(0));
    session.completed = completed;
    session
}
