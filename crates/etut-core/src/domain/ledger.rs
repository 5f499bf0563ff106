use super::{Session, SessionId, SessionKind};

/// Ordered history of finalized sessions for the current run.
///
/// Entries are appended in completion order and never reordered; the only
/// mutations after append are the work-session rename and the bulk clear.
#[derive(Debug, Clone, Default)]
pub struct Ledger {
    entries: Vec<Session>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a finalized session. A session without an end time is not a
    /// ledger entry and is silently dropped.
    pub fn append(&mut self, session: Session) {
        if session.ended_at.is_none() {
            return;
        }
        self.entries.push(session);
    }

    /// Renames a finalized work session. Break sessions and unknown ids are
    /// left untouched; a blank name falls back to the work default.
    /// Returns whether an entry was renamed.
    pub fn rename(&mut self, id: SessionId, name: &str) -> bool {
        let Some(entry) = self
            .entries
            .iter_mut()
            .find(|entry| entry.id == id && entry.kind == SessionKind::Work)
        else {
            return false;
        };
        entry.name = SessionKind::Work.normalize_name(Some(name));
        true
    }

    /// Removes every entry. Idempotent.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn sessions(&self) -> &[Session] {
        &self.entries
    }

    pub fn iter(&self) -> impl Iterator<Item = &Session> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
