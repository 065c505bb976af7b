use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::domain::{BuildResult, PricedComponent};

const PRICE_NOT_FOUND: &str = "price not found";
const NO_LINK: &str = "no link";
const DISCLAIMER: &str =
    "*Prices are estimates from live search results and may vary. Links open the store listing.*";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RenderFormat {
    /// One line per component.
    #[default]
    Text,
    /// Table with total and disclaimer, for chat surfaces that render markdown.
    Markdown,
    Json,
}

impl RenderFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderFormat::Text => "text",
            RenderFormat::Markdown => "markdown",
            RenderFormat::Json => "json",
        }
    }

    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "text" | "plain" => RenderFormat::Text,
            "markdown" | "md" => RenderFormat::Markdown,
            "json" => RenderFormat::Json,
            unknown => {
                warn!("Unknown render format '{}', defaulting to text", unknown);
                RenderFormat::Text
            }
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ResultRenderer {
    format: RenderFormat,
}

impl ResultRenderer {
    pub fn new(format: RenderFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> RenderFormat {
        self.format
    }

    pub fn render(&self, result: &BuildResult) -> String {
        match self.format {
            RenderFormat::Text => Self::render_text(result),
            RenderFormat::Markdown => Self::render_markdown(result),
            RenderFormat::Json => serde_json::to_string_pretty(result).unwrap_or_else(|e| {
                warn!("Failed to serialize build result: {}", e);
                String::from("{}")
            }),
        }
    }

    fn render_text(result: &BuildResult) -> String {
        result
            .items()
            .iter()
            .map(Self::text_line)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn text_line(item: &PricedComponent) -> String {
        format!(
            "{}: {} | {} | {}",
            item.category(),
            item.name(),
            item.price().map(|p| p.display()).unwrap_or(PRICE_NOT_FOUND),
            item.link().unwrap_or(NO_LINK)
        )
    }

    fn render_markdown(result: &BuildResult) -> String {
        let heading = match result.request() {
            Some(request) => format!("### Your recommended {} build\n\n", request.use_case()),
            None => "### Your recommended build\n\n".to_string(),
        };

        let mut output = heading;
        output.push_str("| Component | Part | Price | Image |\n");
        output.push_str("|---|---|---|---|\n");

        for item in result.items() {
            let part = match item.link() {
                Some(link) => format!("[{}]({})", item.display_name(), link),
                None => item.display_name().to_string(),
            };
            let price = item.price().map(|p| p.display()).unwrap_or(PRICE_NOT_FOUND);
            let image = item
                .thumbnail()
                .map(|t| format!("![{}]({})", item.display_name(), t))
                .unwrap_or_default();
            output.push_str(&format!(
                "| **{}** | {} | {} | {} |\n",
                item.category(),
                part,
                price,
                image
            ));
        }

        let total = result.estimated_total();
        output.push_str(&format!("\n**Estimated Total: ${:.2}**", total));
        if let Some(request) = result.request() {
            if total > f64::from(request.budget()) {
                output.push_str(&format!(" (over your ${} budget)", request.budget()));
            }
        }
        output.push_str("\n\n");
        output.push_str(DISCLAIMER);
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BuildRequest, Price, ProductListing, RecommendedComponent, UseCase};

    fn sample_result() -> BuildResult {
        BuildResult::new(vec![
            PricedComponent::from_listing(
                RecommendedComponent::new("GPU", "RTX 4060"),
                ProductListing::new("MSI RTX 4060")
                    .with_price(Price::parse("$299.99"))
                    .with_link("https://shop.example/gpu"),
            ),
            PricedComponent::unpriced(RecommendedComponent::new("CPU", "Ryzen 5600")),
        ])
        .with_request(BuildRequest::new(250, UseCase::Gaming))
    }

    #[test]
    fn test_text_renders_one_line_per_component() {
        let output = ResultRenderer::new(RenderFormat::Text).render(&sample_result());
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "GPU: RTX 4060 | $299.99 | https://shop.example/gpu");
        assert_eq!(lines[1], "CPU: Ryzen 5600 | price not found | no link");
    }

    #[test]
    fn test_markdown_includes_total_and_budget_warning() {
        let output = ResultRenderer::new(RenderFormat::Markdown).render(&sample_result());

        assert!(output.starts_with("### Your recommended gaming build"));
        assert!(output.contains("| **GPU** | [MSI RTX 4060](https://shop.example/gpu) | $299.99 |"));
        assert!(output.contains("**Estimated Total: $299.99** (over your $250 budget)"));
        assert!(output.contains("Prices are estimates"));
    }

    #[test]
    fn test_json_round_trips_categories() {
        let output = ResultRenderer::new(RenderFormat::Json).render(&sample_result());
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["items"][0]["component"]["category"], "GPU");
        assert!(value["items"][1]["price"].is_null());
    }

    #[test]
    fn test_render_format_from_str() {
        assert_eq!(RenderFormat::from_str("MD"), RenderFormat::Markdown);
        assert_eq!(RenderFormat::from_str("bogus"), RenderFormat::Text);
    }
}
