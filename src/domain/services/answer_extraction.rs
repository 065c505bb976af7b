//! Heuristics for reading free-text answers: budgets and yes/no replies.

use std::sync::OnceLock;

use regex::Regex;

/// How much evidence an amount needs before it is read as a budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetMode {
    /// The answer was given to a budget question: any number counts.
    Lenient,
    /// Free-form text: the number must look like money (`$`, `k`, `dollars`,
    /// or the word "budget" nearby). Keeps model numbers such as "RTX 4060"
    /// from being read as budgets.
    Strict,
}

const AFFIRMATIVE_WORDS: &[&str] = &[
    "yes", "y", "yeah", "yep", "yup", "sure", "correct", "right", "ok", "okay", "confirm",
    "confirmed", "absolutely", "definitely", "perfect", "exactly", "affirmative",
];

const AFFIRMATIVE_PHRASES: &[&str] = &[
    "sounds good",
    "looks good",
    "go ahead",
    "that's right",
    "that is right",
    "do it",
    "let's go",
];

const NEGATIVE_WORDS: &[&str] = &["no", "n", "nope", "nah", "not", "wrong", "incorrect"];

const NEGATIVE_PHRASES: &[&str] = &["not quite", "not really", "change", "actually"];

fn amount_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)(?P<cur>\$|usd\s*)?(?P<num>(?:\d{1,3}(?:,\d{3})+|\d+)(?:\.\d+)?)(?:\s*(?P<k>k)\b)?(?:\s*(?P<unit>dollars?|usd|bucks)\b)?",
        )
        .expect("amount regex is valid")
    })
}

/// Extract a whole-dollar budget from free text.
///
/// Accepts `1000`, `$1,200`, `1.5k` and `900 dollars`. Returns `None` when no
/// usable (non-zero) amount is found.
pub fn parse_budget(text: &str, mode: BudgetMode) -> Option<u32> {
    let lowered = text.to_lowercase();
    let budget_word = lowered.find("budget");

    let mut fallback = None;
    for caps in amount_regex().captures_iter(text) {
        let Some(num) = caps.name("num") else {
            continue;
        };
        let Ok(mut value) = num.as_str().replace(',', "").parse::<f64>() else {
            continue;
        };
        let is_k = caps.name("k").is_some();
        if is_k {
            value *= 1000.0;
        }
        let monetary = caps.name("cur").is_some() || is_k || caps.name("unit").is_some();

        let accepted = match mode {
            BudgetMode::Lenient => true,
            BudgetMode::Strict if monetary => true,
            BudgetMode::Strict => match budget_word {
                Some(pos) if num.start() > pos => true,
                Some(_) => {
                    // Before the word "budget": the closest one is kept in case
                    // nothing follows it.
                    if let Some(amount) = to_whole_dollars(value) {
                        fallback = Some(amount);
                    }
                    false
                }
                None => false,
            },
        };

        if accepted {
            if let Some(amount) = to_whole_dollars(value) {
                return Some(amount);
            }
        }
    }

    fallback
}

fn to_whole_dollars(value: f64) -> Option<u32> {
    if !value.is_finite() || value < 1.0 || value > u32::MAX as f64 {
        return None;
    }
    Some(value.round() as u32)
}

fn normalize(text: &str) -> String {
    text.trim()
        .to_lowercase()
        .chars()
        .map(|c| if c.is_alphanumeric() || c == '\'' || c == ' ' { c } else { ' ' })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// True when the answer says no or asks for a change.
pub fn is_negative(text: &str) -> bool {
    let normalized = normalize(text);
    let first = normalized.split(' ').next().unwrap_or_default();
    NEGATIVE_WORDS.contains(&first) || NEGATIVE_PHRASES.iter().any(|p| normalized.starts_with(p))
}

/// True when the answer confirms what was asked.
pub fn is_affirmative(text: &str) -> bool {
    if is_negative(text) {
        return false;
    }
    let normalized = normalize(text);
    let first = normalized.split(' ').next().unwrap_or_default();
    AFFIRMATIVE_WORDS.contains(&first) || AFFIRMATIVE_PHRASES.iter().any(|p| normalized.contains(p))
}

/// True for answers that decline to add anything ("no", "none", "nothing").
pub fn is_dismissive(text: &str) -> bool {
    matches!(
        normalize(text).as_str(),
        "" | "no" | "none" | "nope" | "nothing" | "n a" | "no preference" | "no preferences"
    )
}
