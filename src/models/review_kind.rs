use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(sqlx::Type, Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[sqlx(rename_all = "lowercase", type_name = "varchar")]
#[serde(rename_all = "lowercase")]
pub enum ReviewKind {
    #[default]
    Initial, // first watch, carries a "watch for" note
    Rewatch, // repeat watch, carries a "discovery" note
}

impl ReviewKind {
    pub const ALL: [ReviewKind; 2] = [ReviewKind::Initial, ReviewKind::Rewatch];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewKind::Initial => "initial",
            ReviewKind::Rewatch => "rewatch",
        }
    }

    /// Form field holding the kind-specific note.
    pub fn note_field(&self) -> &'static str {
        match self {
            ReviewKind::Initial => "watch_for",
            ReviewKind::Rewatch => "discovery",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReviewKind::Initial => "Initial review",
            ReviewKind::Rewatch => "Rewatch review",
        }
    }

    pub fn note_label(&self) -> &'static str {
        match self {
            ReviewKind::Initial => "What to watch for",
            ReviewKind::Rewatch => "Discovery",
        }
    }
}

impl fmt::Display for ReviewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReviewKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "initial" => Ok(ReviewKind::Initial),
            "rewatch" => Ok(ReviewKind::Rewatch),
            other => Err(format!("unknown review kind {other}")),
        }
    }
}
