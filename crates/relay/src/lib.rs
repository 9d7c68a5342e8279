pub mod error;
pub mod languages;
pub mod model;
pub mod payload;
pub mod prompts;
pub mod providers;
pub mod relay;
pub mod translate;

pub use {
    error::RelayError,
    model::CompletionProvider,
    relay::PromptRelay,
    translate::{SourceText, TranslationItem, TranslationRequest, Translator},
};
