use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionKind {
    Work,
    Break,
}

impl SessionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionKind::Work => "work",
            SessionKind::Break => "break",
        }
    }

    /// Fixed default label for a session of this kind.
    pub fn default_name(&self) -> &'static str {
        match self {
            SessionKind::Work => "Çalışma",
            SessionKind::Break => "Mola",
        }
    }

    /// Trims the supplied name; blank or missing input falls back to the
    /// kind default instead of being rejected.
    pub fn normalize_name(&self, raw: Option<&str>) -> String {
        match raw.map(str::trim).filter(|name| !name.is_empty()) {
            Some(name) => name.to_string(),
            None => self.default_name().to_string(),
        }
    }
}

impl std::fmt::Display for SessionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
