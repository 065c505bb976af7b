use async_trait::async_trait;
use tracing::debug;

use crate::application::ChatClient;
use crate::domain::{parse_budget, BudgetMode, DomainError, UseCase};

/// A known-compatible build for one price/use-case tier.
struct Tier {
    name: &'static str,
    parts: &'static [(&'static str, &'static str)],
}

const BUDGET_OFFICE: Tier = Tier {
    name: "Budget Office/Web Browsing Build",
    parts: &[
        ("CPU", "AMD Ryzen 5 5600G"),
        ("Motherboard", "ASRock B450M PRO4"),
        ("RAM", "Corsair Vengeance LPX 16GB DDR4 3200MHz"),
        ("Storage", "Crucial P3 1TB NVMe SSD"),
        ("PSU", "Thermaltake Smart 500W 80+ White"),
        ("Case", "Cooler Master MasterBox Q300L"),
    ],
};

const MID_RANGE_GAMING: Tier = Tier {
    name: "Mid-Range Gaming Build",
    parts: &[
        ("CPU", "AMD Ryzen 5 7600X"),
        ("GPU", "NVIDIA GeForce RTX 4060"),
        ("Motherboard", "Gigabyte B650 Gaming X AX"),
        ("RAM", "G.Skill Flare X5 32GB DDR5 6000MHz"),
        ("Storage", "Samsung 980 Pro 1TB NVMe SSD"),
        ("CPU Cooler", "Thermalright Phantom Spirit 120 SE"),
        ("PSU", "Corsair RM750e 750W 80+ Gold"),
        ("Case", "Lian Li Lancool 216"),
    ],
};

const HIGH_END_GAMING: Tier = Tier {
    name: "High-End Gaming/Streaming Build",
    parts: &[
        ("CPU", "AMD Ryzen 7 7800X3D"),
        ("GPU", "NVIDIA GeForce RTX 4070 Super"),
        ("Motherboard", "MSI MAG B650 Tomahawk WiFi"),
        ("RAM", "G.Skill Trident Z5 Neo 32GB DDR5 6000MHz CL30"),
        ("Storage", "Western Digital Black SN850X 2TB NVMe SSD"),
        ("CPU Cooler", "Thermalright Phantom Spirit 120 SE"),
        ("PSU", "SeaSonic FOCUS Plus Gold 850W"),
        ("Case", "Fractal Design Pop Air"),
    ],
};

const WORKSTATION: Tier = Tier {
    name: "Professional Video Editing Workstation",
    parts: &[
        ("CPU", "Intel Core i7-14700K"),
        ("GPU", "NVIDIA GeForce RTX 4080 Super"),
        ("Motherboard", "MSI PRO Z790-A WIFI"),
        ("RAM", "Corsair Vengeance 64GB DDR5 5600MHz"),
        ("Storage", "Samsung 990 Pro 2TB NVMe SSD"),
        ("CPU Cooler", "ARCTIC Liquid Freezer II 360"),
        ("PSU", "Corsair RM1000e 1000W 80+ Gold"),
        ("Case", "be quiet! Pure Base 500DX"),
    ],
};

fn select_tier(budget: u32, use_case: &UseCase) -> &'static Tier {
    match use_case {
        UseCase::Gaming if budget < 1600 => &MID_RANGE_GAMING,
        UseCase::Gaming => &HIGH_END_GAMING,
        UseCase::Editing => &WORKSTATION,
        UseCase::Office => &BUDGET_OFFICE,
        UseCase::Other(_) if budget <= 700 => &BUDGET_OFFICE,
        UseCase::Other(_) if budget <= 1600 => &MID_RANGE_GAMING,
        UseCase::Other(_) => &HIGH_END_GAMING,
    }
}

/// Offline [`ChatClient`] that answers build prompts from a fixed catalog of
/// compatible builds instead of calling a model.
///
/// Reads the `Budget:` and `Use case:` lines of the prompt and replies in the
/// format the prompt asks for (lines, or a JSON array).
pub struct CatalogChatClient;

impl CatalogChatClient {
    pub fn new() -> Self {
        Self
    }

    fn field<'a>(prompt: &'a str, label: &str) -> Option<&'a str> {
        prompt.lines().find_map(|line| {
            let (key, value) = line.split_once(':')?;
            key.trim()
                .eq_ignore_ascii_case(label)
                .then(|| value.trim())
        })
    }

    fn reply(tier: &Tier, json: bool) -> String {
        if json {
            let parts: Vec<serde_json::Value> = tier
                .parts
                .iter()
                .map(|(category, name)| serde_json::json!({ "category": category, "name": name }))
                .collect();
            serde_json::Value::Array(parts).to_string()
        } else {
            tier.parts
                .iter()
                .map(|(category, name)| format!("{category}: {name}"))
                .collect::<Vec<_>>()
                .join("\n")
        }
    }
}

impl Default for CatalogChatClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ChatClient for CatalogChatClient {
    async fn complete(&self, _system: &str, user: &str) -> Result<String, DomainError> {
        let (Some(budget), Some(use_case)) = (
            Self::field(user, "Budget").and_then(|b| parse_budget(b, BudgetMode::Lenient)),
            Self::field(user, "Use case").map(UseCase::parse),
        ) else {
            return Err(DomainError::upstream(
                "CatalogChatClient: prompt is not a build request",
            ));
        };

        let tier = select_tier(budget, &use_case);
        debug!("CatalogChatClient picked {} for {} / ${}", tier.name, use_case, budget);
        Ok(Self::reply(tier, user.contains("JSON array")))
    }

    fn model_name(&self) -> &str {
        "offline-catalog"
    }
}
