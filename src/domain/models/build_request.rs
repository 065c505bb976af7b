use serde::{Deserialize, Serialize};

/// Primary purpose of the machine, used to steer the recommendation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UseCase {
    Gaming,
    Office,
    Editing,
    /// Anything the keyword table does not know, kept verbatim.
    Other(String),
}

const EDITING_KEYWORDS: &[&str] = &[
    "editing",
    "edit",
    "video",
    "videos",
    "render",
    "rendering",
    "workstation",
    "3d",
    "blender",
    "photoshop",
    "premiere",
    "davinci",
    "cad",
    "animation",
    "production",
];

const GAMING_KEYWORDS: &[&str] = &[
    "gaming", "game", "games", "gamer", "esports", "streaming", "stream", "fps", "vr",
];

const OFFICE_KEYWORDS: &[&str] = &[
    "office",
    "browsing",
    "browse",
    "web",
    "internet",
    "school",
    "homework",
    "email",
    "emails",
    "spreadsheet",
    "spreadsheets",
    "documents",
    "basic",
    "everyday",
];

/// Words that, just before a keyword, mark the answer as naming a use rather
/// than mentioning the word in passing ("for gaming", "use it to edit").
const RESTATING_WORDS: &[&str] = &["for", "use", "used", "using", "mostly", "mainly"];

const RESTATING_WINDOW: usize = 3;

fn lowered_words(text: &str) -> Vec<String> {
    text.to_lowercase()
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

/// "video" before "game(s)"/"gaming" belongs to the gaming phrase.
fn is_video_game(words: &[String], i: usize) -> bool {
    matches!(words[i].as_str(), "video" | "videos")
        && words
            .get(i + 1)
            .is_some_and(|next| matches!(next.as_str(), "game" | "games" | "gaming"))
}

impl UseCase {
    /// Detect a known use case from free text by keyword.
    ///
    /// Editing is checked first so that "video editing and some gaming"
    /// lands on the heavier workload.
    pub fn detect(text: &str) -> Option<Self> {
        Self::detect_where(text, |_, _| true)
    }

    /// Like [`UseCase::detect`], but a keyword only counts when a nearby
    /// word such as "for" or "use" introduces it. Answers about extras
    /// ("it sits on my office desk") then leave the use case alone.
    pub fn detect_restated(text: &str) -> Option<Self> {
        Self::detect_where(text, |words, i| {
            words[i.saturating_sub(RESTATING_WINDOW)..i]
                .iter()
                .any(|w| RESTATING_WORDS.contains(&w.as_str()))
        })
    }

    fn detect_where(text: &str, accept: impl Fn(&[String], usize) -> bool) -> Option<Self> {
        let words = lowered_words(text);

        let has_any = |keywords: &[&str]| {
            words.iter().enumerate().any(|(i, w)| {
                keywords.contains(&w.as_str()) && !is_video_game(&words, i) && accept(&words, i)
            })
        };

        if has_any(EDITING_KEYWORDS) {
            Some(UseCase::Editing)
        } else if has_any(GAMING_KEYWORDS) {
            Some(UseCase::Gaming)
        } else if has_any(OFFICE_KEYWORDS) {
            Some(UseCase::Office)
        } else {
            None
        }
    }

    /// Parse a use-case tag; unknown tags become [`UseCase::Other`].
    pub fn parse(s: &str) -> Self {
        let trimmed = s.trim();
        match trimmed.to_lowercase().as_str() {
            "gaming" => UseCase::Gaming,
            "office" => UseCase::Office,
            "editing" => UseCase::Editing,
            _ => Self::detect(trimmed).unwrap_or_else(|| UseCase::Other(trimmed.to_lowercase())),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            UseCase::Gaming => "gaming",
            UseCase::Office => "office",
            UseCase::Editing => "editing",
            UseCase::Other(tag) => tag,
        }
    }
}

impl std::fmt::Display for UseCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Snapshot of what the user asked for, handed to the prompt composer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildRequest {
    budget: u32,
    use_case: UseCase,
    preferences: Vec<String>,
}

impl BuildRequest {
    pub fn new(budget: u32, use_case: UseCase) -> Self {
        Self {
            budget,
            use_case,
            preferences: Vec::new(),
        }
    }

    pub fn with_preferences(mut self, preferences: Vec<String>) -> Self {
        self.preferences = preferences
            .into_iter()
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();
        self
    }

    /// Budget ceiling in whole US dollars.
    pub fn budget(&self) -> u32 {
        self.budget
    }

    pub fn use_case(&self) -> &UseCase {
        &self.use_case
    }

    pub fn preferences(&self) -> &[String] {
        &self.preferences
    }

    pub fn has_preferences(&self) -> bool {
        !self.preferences.is_empty()
    }

    pub fn summary(&self) -> String {
        let mut summary = format!("a {} PC with a budget around ${}", self.use_case, self.budget);
        if self.has_preferences() {
            summary.push_str(&format!(" ({})", self.preferences.join("; ")));
        }
        summary
    }
}
