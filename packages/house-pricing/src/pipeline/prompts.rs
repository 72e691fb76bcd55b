//! Prompt template for feature extraction.

use crate::types::schema::{FeatureSchema, FieldKind};

/// Instruction preamble sent ahead of every user prompt.
pub const EXTRACT_PROMPT: &str = r#"You are an information extraction engine.

Extract these house features from the user prompt and return ONLY valid JSON.

Required keys:
{keys}

Rules:
- Return JSON only, no explanation.
- Return a single flat JSON object with exactly the required keys.
- If a value is missing, set it to null.
- Use correct datatypes:
{types}"#;

/// Build the full extraction prompt for `user_prompt`.
pub fn format_extract_prompt(schema: &FeatureSchema, user_prompt: &str) -> String {
    let keys = format!(
        "[{}]",
        schema
            .field_names()
            .map(|name| format!("\"{}\"", name))
            .collect::<Vec<_>>()
            .join(", ")
    );

    let types = schema
        .raw_fields()
        .iter()
        .map(|field| {
            let hint = field.kind.type_hint();
            match (field.kind, schema.domain(field.name)) {
                (FieldKind::Categorical, Some(domain)) => {
                    let labels: Vec<&str> = domain
                        .baseline
                        .into_iter()
                        .chain(domain.categories.iter().copied())
                        .collect();
                    format!("  - {}: {} (one of: {})", field.name, hint, labels.join(", "))
                }
                _ => format!("  - {}: {}", field.name, hint),
            }
        })
        .collect::<Vec<_>>()
        .join("\n");

    let instruction = EXTRACT_PROMPT
        .replace("{keys}", &keys)
        .replace("{types}", &types);

    format!("{}\n\nUSER PROMPT:\n{}", instruction, user_prompt)
}
