use serde::Deserialize;
use tracing::{debug, warn};

use crate::application::BuildParser;
use crate::domain::RecommendedComponent;

#[derive(Deserialize)]
struct JsonComponent {
    #[serde(default, alias = "type", alias = "part")]
    category: String,
    #[serde(default, alias = "model", alias = "product")]
    name: String,
}

/// Reads a `[{"category": .., "name": ..}, ..]` array out of the reply.
///
/// Text outside the first `[…]` block is ignored so that a stray sentence or
/// code fence around the array does not lose the build.
pub struct JsonBuildParser;

impl JsonBuildParser {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonBuildParser {
    fn default() -> Self {
        Self::new()
    }
}

impl BuildParser for JsonBuildParser {
    fn parse(&self, response: &str) -> Vec<RecommendedComponent> {
        let start = response.find('[');
        let end = response.rfind(']');

        if let (Some(s), Some(e)) = (start, end) {
            if s < e {
                if let Ok(items) = serde_json::from_str::<Vec<JsonComponent>>(&response[s..=e]) {
                    let components: Vec<RecommendedComponent> = items
                        .into_iter()
                        .filter(|c| !c.category.trim().is_empty() && !c.name.trim().is_empty())
                        .map(|c| RecommendedComponent::new(c.category, c.name))
                        .collect();
                    debug!("JsonBuildParser read {} components", components.len());
                    return components;
                }
            }
        }

        warn!("JsonBuildParser: could not parse reply as a JSON array: {response}");
        vec![]
    }

    fn name(&self) -> &str {
        "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_array() {
        let reply = r#"[{"category": "CPU", "name": "Ryzen 5 7600X"}, {"category": "GPU", "name": "RTX 4060"}]"#;
        let components = JsonBuildParser::new().parse(reply);

        assert_eq!(components.len(), 2);
        assert_eq!(components[0].category(), "CPU");
        assert_eq!(components[1].name(), "RTX 4060");
    }

    #[test]
    fn test_tolerates_code_fence_and_aliases() {
        let reply = "Here you go:\n```json\n[{\"type\": \"PSU\", \"model\": \"Corsair RM750e\"}]\n```";
        let components = JsonBuildParser::new().parse(reply);

        assert_eq!(components.len(), 1);
        assert_eq!(components[0].category(), "PSU");
        assert_eq!(components[0].name(), "Corsair RM750e");
    }

    #[test]
    fn test_skips_incomplete_entries() {
        let reply = r#"[{"category": "CPU"}, {"category": "RAM", "name": "32GB DDR5"}]"#;
        let components = JsonBuildParser::new().parse(reply);

        assert_eq!(components.len(), 1);
        assert_eq!(components[0].category(), "RAM");
    }

    #[test]
    fn test_malformed_json_gives_empty_list() {
        let parser = JsonBuildParser::new();
        assert!(parser.parse("CPU: Ryzen 5").is_empty());
        assert!(parser.parse("[{\"category\": \"CPU\",").is_empty());
        assert!(parser.parse("] nothing [").is_empty());
    }
}
