use verba_config::prompts::{
    CONTEXT_PLACEHOLDER, LANGUAGES_PLACEHOLDER, PromptTemplates, TEXTS_PLACEHOLDER,
};

use crate::{error::RelayError, translate::SourceText};

fn texts_json(texts: &[SourceText]) -> Result<String, RelayError> {
    serde_json::to_string_pretty(texts).map_err(|e| RelayError::Template(e.to_string()))
}

fn require_texts(name: &str, template: &str) -> Result<(), RelayError> {
    if template.contains(TEXTS_PLACEHOLDER) {
        Ok(())
    } else {
        Err(RelayError::Template(format!(
            "template '{name}' has no {TEXTS_PLACEHOLDER} placeholder"
        )))
    }
}

/// Render the translation prompt for `texts` into `languages`.
pub fn render_translate(
    templates: &PromptTemplates,
    texts: &[SourceText],
    languages: &[String],
    context: Option<&str>,
) -> Result<String, RelayError> {
    require_texts("translate", &templates.translate)?;
    Ok(templates
        .translate
        .replace(LANGUAGES_PLACEHOLDER, &languages.join(", "))
        .replace(CONTEXT_PLACEHOLDER, context.unwrap_or("").trim())
        .replace(TEXTS_PLACEHOLDER, &texts_json(texts)?))
}

/// Render the source-language detection prompt.
pub fn render_detect(templates: &PromptTemplates, texts: &[SourceText]) -> Result<String, RelayError> {
    require_texts("detect", &templates.detect)?;
    let joined = texts
        .iter()
        .map(|t| t.text.as_str())
        .collect::<Vec<_>>()
        .join("\n");
    Ok(templates.detect.replace(TEXTS_PLACEHOLDER, &joined))
}
