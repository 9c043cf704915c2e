use serde::{Deserialize, Serialize};

/// Lower bound (seconds since epoch) of the next query window.
pub type PollCursor = i64;

/// Review verdicts the bot knows how to describe.
///
/// Any other status code coming from the API is rejected by the translator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Approved,
    Reviewing,
    Rejected,
}

impl Verdict {
    pub const ALL: [Verdict; 3] = [Verdict::Approved, Verdict::Reviewing, Verdict::Rejected];

    /// Look up a status code in the vocabulary.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "approved" => Some(Verdict::Approved),
            "reviewing" => Some(Verdict::Reviewing),
            "rejected" => Some(Verdict::Rejected),
            _ => None,
        }
    }

    /// Text shown in the chat for this verdict.
    pub fn display_text(&self) -> &'static str {
        match self {
            Verdict::Approved => "Работа проверена: ревьюеру всё понравилось. Ура!",
            Verdict::Reviewing => "Работа взята на проверку ревьюером.",
            Verdict::Rejected => "Работа проверена: у ревьюера есть замечания.",
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Approved => write!(f, "approved"),
            Verdict::Reviewing => write!(f, "reviewing"),
            Verdict::Rejected => write!(f, "rejected"),
        }
    }
}

/// One reviewed homework entry, after its required fields were checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusRecord {
    pub homework_name: String,
    pub status: String,
}
