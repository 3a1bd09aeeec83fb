use serde::{Deserialize, Serialize};

/// Focus area chosen at onboarding. Drives prompt construction for the
/// content provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GoalCategory {
    Coding,
    Language,
    Fitness,
    Finance,
    General,
}

impl GoalCategory {
    /// Human-readable label, as shown on the onboarding screen.
    pub fn label(self) -> &'static str {
        match self {
            GoalCategory::Coding => "Coding & Tech",
            GoalCategory::Language => "Language Learning",
            GoalCategory::Fitness => "Health & Fitness",
            GoalCategory::Finance => "Personal Finance",
            GoalCategory::General => "General Improvement",
        }
    }

    pub fn all() -> [GoalCategory; 5] {
        [
            GoalCategory::Coding,
            GoalCategory::Language,
            GoalCategory::Fitness,
            GoalCategory::Finance,
            GoalCategory::General,
        ]
    }
}

impl std::fmt::Display for GoalCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GoalCategory::Coding => "coding",
            GoalCategory::Language => "language",
            GoalCategory::Fitness => "fitness",
            GoalCategory::Finance => "finance",
            GoalCategory::General => "general",
        };
        write!(f, "{name}")
    }
}

impl std::str::FromStr for GoalCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "coding" => Ok(GoalCategory::Coding),
            "language" => Ok(GoalCategory::Language),
            "fitness" => Ok(GoalCategory::Fitness),
            "finance" => Ok(GoalCategory::Finance),
            "general" => Ok(GoalCategory::General),
            other => Err(format!(
                "unknown category '{other}' (expected one of: coding, language, fitness, finance, general)"
            )),
        }
    }
}

/// The user's goal, fixed for the session once onboarding completes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Goal {
    pub id: String,
    pub statement: String,
    pub category: GoalCategory,
}

impl Goal {
    pub fn new(statement: impl Into<String>, category: GoalCategory) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            statement: statement.into(),
            category,
        }
    }
}
