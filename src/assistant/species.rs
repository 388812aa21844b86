//! Structured species cards.
//!
//! The model is asked for a bare JSON object, but replies often still come
//! wrapped in Markdown code fences. Fences are stripped before parsing.

use serde::Deserialize;

/// Fields shown on a species card.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SpeciesCard {
    pub name: String,
    #[serde(default, alias = "scientificName")]
    pub scientific_name: String,
    #[serde(default)]
    pub habitat: String,
    #[serde(default)]
    pub diet: String,
    #[serde(default, alias = "funFact")]
    pub fun_fact: String,
    #[serde(default, alias = "conservationStatus")]
    pub conservation_status: String,
}

impl SpeciesCard {
    /// Label/value rows for the display template, skipping empty fields.
    pub fn rows(&self) -> Vec<(&'static str, &str)> {
        [
            ("Scientific name", self.scientific_name.as_str()),
            ("Habitat", self.habitat.as_str()),
            ("Diet", self.diet.as_str()),
            ("Fun fact", self.fun_fact.as_str()),
            ("Conservation", self.conservation_status.as_str()),
        ]
        .into_iter()
        .filter(|(_, v)| !v.trim().is_empty())
        .collect()
    }
}

/// Prompt asking for one species card as JSON.
pub fn species_prompt(species: &str) -> String {
    format!(
        "You write entries for a children's pop-up book about bees and the flowers they visit. \
         Describe the species \"{}\". Respond with ONLY a JSON object, no code fences and no \
         commentary, with exactly these string keys: \"name\", \"scientific_name\", \"habitat\", \
         \"diet\", \"fun_fact\", \"conservation_status\". Keep every value under 40 words.",
        species.trim()
    )
}

const FENCE: &str = "```";

/// Inner text of the first Markdown code fence in `raw`, without its
/// language tag. Text outside the fence is dropped. Replies without a
/// fence come back trimmed.
pub fn strip_code_fences(raw: &str) -> &str {
    let text = raw.trim();
    let Some(open) = text.find(FENCE) else {
        return text;
    };
    let close = text
        .rfind(FENCE)
        .filter(|&close| close > open)
        .unwrap_or(text.len());
    let body = &text[open + FENCE.len()..close];
    // Language tag runs up to the first whitespace or the JSON itself
    let tag = body
        .find(|c: char| c.is_whitespace() || c == '{' || c == '[')
        .unwrap_or(body.len());
    body[tag..].trim()
}

/// Outermost `{...}` span of `text`.
fn object_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Parse a raw reply into a card. The error carries a diagnostic for logs.
pub fn parse_species(raw: &str) -> Result<SpeciesCard, String> {
    let card: SpeciesCard = match serde_json::from_str(strip_code_fences(raw)) {
        Ok(card) => card,
        Err(e) => object_span(raw)
            .and_then(|span| serde_json::from_str(span).ok())
            .ok_or_else(|| format!("not a species object: {}", e))?,
    };
    if card.name.trim().is_empty() {
        return Err("species object has an empty name".to_string());
    }
    Ok(card)
}
