use std::collections::BTreeMap;

use {
    serde::{Deserialize, Serialize},
    serde_json::Value,
    tracing::{info, warn},
    verba_config::PromptTemplates,
};

use crate::{
    error::RelayError,
    languages,
    prompts::{render_detect, render_translate},
    relay::PromptRelay,
};

/// Language reported when detection gives no usable answer.
pub const FALLBACK_SOURCE_LANGUAGE: &str = "en";

/// A text block taken from the design.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceText {
    pub id: String,
    pub text: String,
}

/// One translated text block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslationItem {
    pub id: String,
    pub translation: String,
}

/// Language code → translated blocks, in source order.
pub type Translations = BTreeMap<String, Vec<TranslationItem>>;

#[derive(Debug, Clone, Deserialize)]
pub struct TranslationRequest {
    pub texts: Vec<SourceText>,
    pub languages: Vec<String>,
    #[serde(default)]
    pub context: Option<String>,
}

impl TranslationRequest {
    /// Check the request and return its language codes normalized to
    /// lowercase, without duplicates, in request order.
    pub fn validate(&self) -> Result<Vec<String>, RelayError> {
        if self.texts.is_empty() {
            return Err(RelayError::InvalidRequest("no texts to translate".into()));
        }
        if self.languages.is_empty() {
            return Err(RelayError::InvalidRequest("no target languages selected".into()));
        }
        let mut codes: Vec<String> = Vec::with_capacity(self.languages.len());
        for code in &self.languages {
            let lang = languages::find(code).ok_or_else(|| {
                RelayError::InvalidRequest(format!("unsupported language: {code}"))
            })?;
            if !codes.iter().any(|c| c == lang.code) {
                codes.push(lang.code.to_string());
            }
        }
        Ok(codes)
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslationOutcome {
    pub translations: Translations,
    pub prompt_version: String,
}

/// Coerce a relayed value into `Translations`, keeping only `wanted` codes.
pub fn coerce_translations(value: Value, wanted: &[String]) -> Result<Translations, RelayError> {
    let invalid = |value: &Value| RelayError::InvalidPayload {
        raw: value.to_string(),
    };

    let Value::Object(map) = &value else {
        return Err(invalid(&value));
    };

    let mut out = Translations::new();
    for (key, items) in map {
        let code = key.trim().to_ascii_lowercase();
        if !wanted.contains(&code) {
            warn!(language = %key, "dropping unrequested language from translation result");
            continue;
        }
        let items: Vec<TranslationItem> =
            serde_json::from_value(items.clone()).map_err(|_| invalid(&value))?;
        out.insert(code, items);
    }

    for code in wanted {
        if !out.contains_key(code) {
            warn!(language = %code, "translation result is missing a requested language");
        }
    }
    Ok(out)
}

/// Server-side prompt construction on top of [`PromptRelay`].
#[derive(Clone)]
pub struct Translator {
    relay: PromptRelay,
    templates: PromptTemplates,
}

impl Translator {
    pub fn new(relay: PromptRelay, templates: PromptTemplates) -> Self {
        Self { relay, templates }
    }

    pub async fn translate(
        &self,
        request: &TranslationRequest,
    ) -> Result<TranslationOutcome, RelayError> {
        let codes = request.validate()?;
        let prompt = render_translate(
            &self.templates,
            &request.texts,
            &codes,
            request.context.as_deref(),
        )?;
        let value = self.relay.relay(&prompt).await?;
        let translations = coerce_translations(value, &codes)?;
        info!(
            languages = codes.len(),
            texts = request.texts.len(),
            prompt_version = %self.templates.version,
            "translation done"
        );
        Ok(TranslationOutcome {
            translations,
            prompt_version: self.templates.version.clone(),
        })
    }

    /// Detect the source language, falling back to English when the model
    /// gives no code.
    pub async fn detect(&self, texts: &[SourceText]) -> Result<String, RelayError> {
        if texts.is_empty() {
            return Err(RelayError::InvalidRequest("no texts to inspect".into()));
        }
        let prompt = render_detect(&self.templates, texts)?;
        let value = self.relay.relay(&prompt).await?;
        let detected = value
            .get("language")
            .and_then(Value::as_str)
            .or_else(|| value.as_str())
            .map(|s| s.trim().to_ascii_lowercase())
            .filter(|s| !s.is_empty());

        Ok(detected.unwrap_or_else(|| {
            warn!(reply = %value, "no language in detection reply");
            FALLBACK_SOURCE_LANGUAGE.to_string()
        }))
    }
}

#[cfg(test)]
mod tests {
    use {super::*, crate::relay::tests::StaticProvider, serde_json::json};

    fn request(languages: &[&str]) -> TranslationRequest {
        TranslationRequest {
            texts: vec![SourceText {
                id: "text-0".into(),
                text: "Hello".into(),
            }],
            languages: languages.iter().map(|l| l.to_string()).collect(),
            context: Some("greeting card".into()),
        }
    }

    fn translator(reply: &str) -> (Translator, std::sync::Arc<StaticProvider>) {
        let provider = StaticProvider::ok(reply);
        let translator = Translator::new(
            PromptRelay::new(provider.clone()),
            PromptTemplates::default(),
        );
        (translator, provider)
    }

    #[test]
    fn validate_normalizes_and_dedupes_codes() {
        let codes = request(&["DE", "fr", "de"]).validate().unwrap();
        assert_eq!(codes, vec!["de", "fr"]);
    }

    #[test]
    fn validate_rejects_unknown_or_empty() {
        assert!(matches!(
            request(&["xx"]).validate(),
            Err(RelayError::InvalidRequest(_))
        ));
        assert!(request(&[]).validate().is_err());

        let mut req = request(&["de"]);
        req.texts.clear();
        assert!(req.validate().is_err());
    }

    #[test]
    fn coerce_keeps_requested_languages_only() {
        let value = json!({
            "DE": [{"id": "text-0", "translation": "Hallo"}],
            "it": [{"id": "text-0", "translation": "Ciao"}],
        });
        let out = coerce_translations(value, &["de".into()]).unwrap();
        assert_eq!(out.len(), 1);
        assert_eq!(out["de"][0].translation, "Hallo");
    }

    #[test]
    fn coerce_rejects_wrong_shapes() {
        assert!(matches!(
            coerce_translations(json!(["de"]), &["de".into()]),
            Err(RelayError::InvalidPayload { .. })
        ));
        assert!(matches!(
            coerce_translations(json!({"de": "Hallo"}), &["de".into()]),
            Err(RelayError::InvalidPayload { .. })
        ));
    }

    #[tokio::test]
    async fn translate_renders_prompt_and_returns_outcome() {
        let (translator, provider) =
            translator(r#"{"de": [{"id": "text-0", "translation": "Hallo"}]}"#);
        let outcome = translator.translate(&request(&["de"])).await.unwrap();

        assert_eq!(outcome.prompt_version, PromptTemplates::default().version);
        assert_eq!(outcome.translations["de"], vec![TranslationItem {
            id: "text-0".into(),
            translation: "Hallo".into(),
        }]);

        let prompts = provider.prompts.lock().unwrap();
        assert!(prompts[0].contains("into de based on"));
        assert!(prompts[0].contains("Context: greeting card"));
    }

    #[tokio::test]
    async fn translate_does_not_call_provider_for_invalid_request() {
        let (translator, provider) = translator("{}");
        assert!(translator.translate(&request(&["zz"])).await.is_err());
        assert_eq!(provider.calls(), 0);
    }

    #[tokio::test]
    async fn detect_reads_language_field() {
        let (translator, _) = translator(r#"{"language": " LV "}"#);
        let texts = request(&["de"]).texts;
        assert_eq!(translator.detect(&texts).await.unwrap(), "lv");
    }

    #[tokio::test]
    async fn detect_falls_back_to_english() {
        let (translator, _) = translator(r#"{"confidence": 0.2}"#);
        let texts = request(&["de"]).texts;
        assert_eq!(translator.detect(&texts).await.unwrap(), "en");
    }
}
