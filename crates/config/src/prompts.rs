//! Versioned prompt templates.
//!
//! Templates use `{{languages}}`, `{{context}}` and `{{texts}}` placeholders.
//! They can be changed through config without rebuilding the server.

use std::path::Path;

use {
    anyhow::{Context, bail},
    serde::Deserialize,
};

pub const TEXTS_PLACEHOLDER: &str = "{{texts}}";
pub const LANGUAGES_PLACEHOLDER: &str = "{{languages}}";
pub const CONTEXT_PLACEHOLDER: &str = "{{context}}";

const DEFAULT_VERSION: &str = "translate-v1";

const DEFAULT_TRANSLATE: &str = r#"You are a professional translator.

Translate the following text blocks into {{languages}} based on the context provided.
Return the result only as a valid JSON object where keys are language codes and values are arrays of:
[
  { "id": "abc", "translation": "..." }
]

Each translation must:
- be as close in meaning and tone to the original as possible,
- match the original text length as closely as possible (character count),
- avoid line breaks unless they are in the original.

Context: {{context}}

Original texts:
{{texts}}
"#;

const DEFAULT_DETECT: &str = r#"Detect the language of the following text blocks.
Return only a valid JSON object of the form { "language": "<ISO 639-1 code>" }.

{{texts}}
"#;

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PromptTemplates {
    pub version: String,
    pub translate: String,
    pub detect: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            version: DEFAULT_VERSION.into(),
            translate: DEFAULT_TRANSLATE.into(),
            detect: DEFAULT_DETECT.into(),
        }
    }
}

impl PromptTemplates {
    /// Load templates from a TOML file. Missing keys keep their defaults.
    pub fn load_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read prompt templates {}", path.display()))?;
        let templates: Self = toml::from_str(&raw)
            .with_context(|| format!("invalid prompt templates {}", path.display()))?;
        templates.validate()?;
        Ok(templates)
    }

    /// Every template must at least embed the source texts.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.version.trim().is_empty() {
            bail!("prompt template version must not be empty");
        }
        for (name, body) in [("translate", &self.translate), ("detect", &self.detect)] {
            if !body.contains(TEXTS_PLACEHOLDER) {
                bail!("prompt template '{name}' is missing the {TEXTS_PLACEHOLDER} placeholder");
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use {super::*, std::io::Write};

    #[test]
    fn defaults_are_valid() {
        let t = PromptTemplates::default();
        t.validate().unwrap();
        assert!(t.translate.contains(LANGUAGES_PLACEHOLDER));
        assert!(t.translate.contains(CONTEXT_PLACEHOLDER));
    }

    #[test]
    fn missing_texts_placeholder_rejected() {
        let t = PromptTemplates {
            translate: "Translate into {{languages}}".into(),
            ..Default::default()
        };
        let err = t.validate().unwrap_err().to_string();
        assert!(err.contains("translate"));
    }

    #[test]
    fn load_file_overrides_selected_keys() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"version = "casual-v2"
translate = "Casual tone into {{{{languages}}}}: {{{{texts}}}}""#
        )
        .unwrap();

        let t = PromptTemplates::load_file(file.path()).unwrap();
        assert_eq!(t.version, "casual-v2");
        assert_eq!(t.translate, "Casual tone into {{languages}}: {{texts}}");
        assert_eq!(t.detect, PromptTemplates::default().detect);
    }

    #[test]
    fn load_file_missing_is_error() {
        assert!(PromptTemplates::load_file(Path::new("/definitely/not/here.toml")).is_err());
    }
}
