use serde::{Deserialize, Serialize};

use crate::domain::BuildRequest;

/// Fixed system instruction sent with every build prompt.
pub const SYSTEM_INSTRUCTION: &str = "\
You are an expert PC builder. You recommend complete desktop builds whose parts \
are mutually compatible (CPU socket and motherboard chipset, RAM generation, \
case form factor, cooler clearance, power supply headroom) and whose combined \
price stays within the stated budget. Recommend parts that are currently sold \
new. Name each part by its exact retail model so it can be found in a store.";

/// Categories requested in every prompt, in display order.
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "CPU",
    "GPU",
    "Motherboard",
    "RAM",
    "Storage",
    "CPU Cooler",
    "PSU",
    "Case",
];

const LINES_INSTRUCTION: &str = "\
Reply with one line per part in the form `Category: Exact model name` and \
nothing else. Use the category names listed above.";

const JSON_INSTRUCTION: &str = "\
Reply with ONLY a JSON array of objects, each with a \"category\" and a \"name\" \
key (no prose, no markdown, no code fences). Use the category names listed above.

Example: [{\"category\": \"CPU\", \"name\": \"AMD Ryzen 5 7600X\"}]";

/// Shape the model is asked to answer in. Must match the build parser in use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Lines,
    Json,
}

/// The user prompt sent to the language model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptText(String);

impl PromptText {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl std::fmt::Display for PromptText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Builds the model prompt from a [`BuildRequest`] by plain template
/// substitution. Holds no state besides the reply format.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptComposer {
    format: OutputFormat,
}

impl PromptComposer {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    pub fn system_instruction(&self) -> &'static str {
        SYSTEM_INSTRUCTION
    }

    pub fn compose(&self, request: &BuildRequest) -> PromptText {
        let mut prompt = String::from("Recommend a complete PC build.\n\n");

        prompt.push_str(&format!("Budget: ${} USD for all parts\n", request.budget()));
        prompt.push_str(&format!("Use case: {}\n", request.use_case()));
        if request.has_preferences() {
            prompt.push_str(&format!("Preferences: {}\n", request.preferences().join("; ")));
        }

        prompt.push_str(&format!(
            "\nCategories: {} (leave out GPU only if integrated graphics are enough)\n\n",
            DEFAULT_CATEGORIES.join(", ")
        ));

        prompt.push_str(match self.format {
            OutputFormat::Lines => LINES_INSTRUCTION,
            OutputFormat::Json => JSON_INSTRUCTION,
        });

        PromptText::new(prompt)
    }
}
