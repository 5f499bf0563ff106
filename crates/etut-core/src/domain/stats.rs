//! Derived read-only statistics over the ledger and the in-progress session.
//!
//! Every function here is pure with respect to its inputs; nothing is cached
//! between calls, so a cleared or freshly appended ledger is always reflected.

use chrono::{DateTime, Utc};

use super::{Ledger, Session, SessionKind};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StatsSnapshot {
    pub total_work_seconds: i64,
    pub total_break_seconds: i64,
    pub work_session_count: u64,
    pub break_session_count: u64,
    pub today_work_minutes: i64,
}

pub fn total_work_seconds(ledger: &Ledger) -> i64 {
    total_seconds_of_kind(ledger, SessionKind::Work)
}

pub fn total_break_seconds(ledger: &Ledger) -> i64 {
    total_seconds_of_kind(ledger, SessionKind::Break)
}

pub fn work_session_count(ledger: &Ledger) -> u64 {
    count_of_kind(ledger, SessionKind::Work)
}

pub fn break_session_count(ledger: &Ledger) -> u64 {
    count_of_kind(ledger, SessionKind::Break)
}

/// Finalized work minutes ending on the same day as `now`, plus the net
/// elapsed minutes of the in-progress session when it is a work session
/// started that day. Days are UTC days of the supplied `now`; hosts wanting
/// device-local day boundaries convert before calling.
pub fn today_work_minutes(
    ledger: &Ledger,
    current: Option<&Session>,
    now: DateTime<Utc>,
) -> i64 {
    let today = now.date_naive();

    let finalized: i64 = ledger
        .iter()
        .filter(|session| session.kind == SessionKind::Work)
        .filter(|session| {
            session
                .ended_at
                .unwrap_or(session.started_at)
                .date_naive()
                == today
        })
        .map(|session| session.net_seconds() / 60)
        .sum();

    let in_progress = current
        .filter(|session| session.kind == SessionKind::Work && session.is_active())
        .filter(|session| session.started_at.date_naive() == today)
        .map(|session| {
            let wall = now.signed_duration_since(session.started_at).num_seconds();
            ((wall - session.total_pause_seconds) / 60).max(0)
        })
        .unwrap_or(0);

    finalized + in_progress
}

pub fn snapshot(ledger: &Ledger, current: Option<&Session>, now: DateTime<Utc>) -> StatsSnapshot {
    StatsSnapshot {
        total_work_seconds: total_work_seconds(ledger),
        total_break_seconds: total_break_seconds(ledger),
        work_session_count: work_session_count(ledger),
        break_session_count: break_session_count(ledger),
        today_work_minutes: today_work_minutes(ledger, current, now),
    }
}

fn total_seconds_of_kind(ledger: &Ledger, kind: SessionKind) -> i64 {
    ledger
        .iter()
        .filter(|session| session.kind == kind)
        .map(Session::net_seconds)
        .sum()
}

fn count_of_kind(ledger: &Ledger, kind: SessionKind) -> u64 {
    ledger.iter().filter(|session| session.kind == kind).count() as u64
}
