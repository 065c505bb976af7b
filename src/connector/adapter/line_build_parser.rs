use std::sync::OnceLock;

use regex::Regex;
use tracing::debug;

use crate::application::BuildParser;
use crate::domain::RecommendedComponent;

/// Longer labels are sentences with a colon, not categories.
const MAX_CATEGORY_LEN: usize = 24;
const MAX_CATEGORY_WORDS: usize = 3;

/// Labels models put in front of prose rather than parts.
const PROSE_LABELS: &[&str] = &[
    "note",
    "notes",
    "total",
    "estimated total",
    "budget",
    "use case",
    "summary",
    "recommendation",
    "tip",
    "tips",
    "why",
    "reason",
    "explanation",
    "price",
    "cost",
    "overall",
    "disclaimer",
    "important",
];

fn line_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // Optional bullet or "1." / "2)" numbering, then "Category: Name".
        Regex::new(r"^\s*(?:[-*+•]\s+|\d+[.)]\s+)?(?P<category>[A-Za-z][A-Za-z0-9 /&().+-]*?)\s*:\s*(?P<name>\S.*)$")
            .expect("build line regex is valid")
    })
}

/// Reads `Category: Model` lines out of a free-text reply.
pub struct LineBuildParser;

impl LineBuildParser {
    pub fn new() -> Self {
        Self
    }

    fn parse_line(line: &str) -> Option<RecommendedComponent> {
        let line = line.replace("**", "").replace('`', "");
        let caps = line_pattern().captures(&line)?;

        let category = caps.name("category")?.as_str().trim();
        let name = caps
            .name("name")?
            .as_str()
            .trim()
            .trim_end_matches(|c: char| c == '.' || c == ',')
            .trim();

        if category.is_empty()
            || name.is_empty()
            || category.len() > MAX_CATEGORY_LEN
            || category.split_whitespace().count() > MAX_CATEGORY_WORDS
        {
            return None;
        }
        if PROSE_LABELS.contains(&category.to_lowercase().as_str()) {
            return None;
        }
        // "https://..." splits into "https" and "//...".
        if name.starts_with("//") {
            return None;
        }

        Some(RecommendedComponent::new(category, name))
    }
}

impl Default for LineBuildParser {
    fn default() -> Self {
        Self::new()
    }
}

impl BuildParser for LineBuildParser {
    fn parse(&self, response: &str) -> Vec<RecommendedComponent> {
        let components: Vec<RecommendedComponent> =
            response.lines().filter_map(Self::parse_line).collect();
        debug!("LineBuildParser read {} components", components.len());
        components
    }

    fn name(&self) -> &str {
        "lines"
    }
}
