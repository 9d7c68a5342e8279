use serde::Serialize;

/// A target language offered by the plugin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Language {
    pub code: &'static str,
    pub name: &'static str,
}

const fn lang(code: &'static str, name: &'static str) -> Language {
    Language { code, name }
}

pub const LANGUAGES: &[Language] = &[
    lang("ar", "Arabic"),
    lang("bg", "Bulgarian"),
    lang("cs", "Czech"),
    lang("da", "Danish"),
    lang("de", "German"),
    lang("el", "Greek"),
    lang("es", "Spanish"),
    lang("et", "Estonian"),
    lang("fi", "Finnish"),
    lang("fr", "French"),
    lang("ga", "Irish"),
    lang("he", "Hebrew"),
    lang("hr", "Croatian"),
    lang("hu", "Hungarian"),
    lang("it", "Italian"),
    lang("ka", "Georgian"),
    lang("nl", "Dutch"),
    lang("no", "Norwegian"),
    lang("pl", "Polish"),
    lang("pt", "Portuguese"),
    lang("ro", "Romanian"),
    lang("ru", "Russian"),
    lang("sk", "Slovak"),
    lang("sr", "Serbian"),
    lang("sv", "Swedish"),
    lang("uk", "Ukrainian"),
];

/// Look up a language by code, case-insensitively.
pub fn find(code: &str) -> Option<&'static Language> {
    let code = code.trim();
    LANGUAGES.iter().find(|l| l.code.eq_ignore_ascii_case(code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_is_sorted_and_unique() {
        assert_eq!(LANGUAGES.len(), 26);
        assert!(LANGUAGES.windows(2).all(|w| w[0].code < w[1].code));
    }

    #[test]
    fn lookup_is_case_insensitive() {
        assert_eq!(find("DE").map(|l| l.name), Some("German"));
        assert_eq!(find(" uk ").map(|l| l.name), Some("Ukrainian"));
        assert!(find("xx").is_none());
        assert!(find("").is_none());
    }
}
