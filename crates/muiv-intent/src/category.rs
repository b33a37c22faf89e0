//! The closed set of intent categories.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::IntentError;

/// An intent label assigned to an inbound message.
///
/// The serialized form is the Russian label students and the web frontend
/// see (`расписание`, `контакты`, ...), with `unknown` for the sentinel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "расписание")]
    Schedule,
    #[serde(rename = "контакты")]
    Contacts,
    #[serde(rename = "библиотека")]
    Library,
    #[serde(rename = "экзамены")]
    Exams,
    #[serde(rename = "общие")]
    General,
    /// No trigger matched.
    #[serde(rename = "unknown")]
    Unknown,
}

impl Category {
    /// Every category that can carry triggers, in built-in declaration order.
    pub const KNOWN: [Category; 5] = [
        Category::Schedule,
        Category::Contacts,
        Category::Library,
        Category::Exams,
        Category::General,
    ];

    /// Wire label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Schedule => "расписание",
            Self::Contacts => "контакты",
            Self::Library => "библиотека",
            Self::Exams => "экзамены",
            Self::General => "общие",
            Self::Unknown => "unknown",
        }
    }

    pub fn is_known(self) -> bool {
        self != Self::Unknown
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Category {
    type Err = IntentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::KNOWN
            .into_iter()
            .chain(std::iter::once(Self::Unknown))
            .find(|c| c.label() == wanted)
            .ok_or_else(|| IntentError::InvalidCategory {
                label: s.to_owned(),
            })
    }
}
