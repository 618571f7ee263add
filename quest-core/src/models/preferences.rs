use serde::{Deserialize, Serialize};

pub const DEFAULT_BACKGROUND: &str = "default";
pub const DEFAULT_BACKGROUND_PROMPT: &str = "neo gradient";
pub const GENERATED_BACKGROUND_COST: u32 = 2;

const GRADIENT_PALETTES: &[&str] = &["cyan-magenta", "purple-blue", "neon-grid"];

/// The dashboard background a user picked, with their token balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackgroundSettings {
    pub background: String,
    pub tokens: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackgroundOption {
    pub background: String,
    pub cost: u32,
}

/// Gradient backgrounds for a free-text prompt, one per palette.
pub fn background_options(prompt: &str) -> Vec<BackgroundOption> {
    let prompt = match prompt.trim() {
        "" => DEFAULT_BACKGROUND_PROMPT,
        p => p,
    };
    GRADIENT_PALETTES
        .iter()
        .map(|palette| BackgroundOption {
            background: format!("gradient:{prompt}:{palette}"),
            cost: GENERATED_BACKGROUND_COST,
        })
        .collect()
}
