//! Prompt defaults and templates

/// Substituted when the request carries no usable prompt
pub const DEFAULT_PROMPT: &str = "A beautiful, appetizing, professional food photograph";

/// Resolve the working prompt from the raw query value.
///
/// Absent, empty and whitespace-only values all fall back to [`DEFAULT_PROMPT`].
pub fn resolve(raw: Option<&str>) -> String {
    match raw.map(str::trim) {
        Some(prompt) if !prompt.is_empty() => prompt.to_string(),
        _ => DEFAULT_PROMPT.to_string(),
    }
}

/// Instruction sent to the text model to rewrite a prompt
pub fn enhancement_instruction(prompt: &str) -> String {
    format!(
        "You are a food photography art director. Rewrite the following dish description \
         into a vivid, visually descriptive prompt for an AI image generator. Describe the \
         plating, textures, colors, lighting, camera angle and background so the result looks \
         like a professional, appetizing food photograph. Keep it under 200 words and reply \
         with the prompt text only.\n\nDish description: {}",
        prompt
    )
}

/// Prompt sent to the image model when no enhanced prompt is available
pub fn image_prompt(prompt: &str) -> String {
    format!("A beautiful, appetizing, professional food photograph of {}.", prompt)
}
