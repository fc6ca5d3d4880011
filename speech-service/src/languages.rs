//! Supported languages for patient intake
//!
//! Azure Speech at-start language identification (used with single-shot
//! recognition) supports at most 4 candidate locales, so the detection
//! list is a subset of the full supported list.

/// Candidate locales for automatic detection, most common for emergency
/// triage in the deployment region first. Hard cap of 4.
pub const AUTO_DETECT_LANGUAGES: [&str; 4] = [
    "en-US", // English, global default
    "de-DE", // German, primary region
    "tr-TR", // Turkish, secondary region
    "ar-SA", // Arabic, RTL coverage
];

/// Full list of supported locales, used for display names and translator
/// coverage.
pub const SUPPORTED_LANGUAGES: [&str; 10] = [
    "en-US", "de-DE", "tr-TR", "ar-SA", "fr-FR", "es-ES", "it-IT", "pt-BR", "ru-RU", "zh-CN",
];

/// Native display name for a locale, falling back to the locale itself.
pub fn language_name(locale: &str) -> &str {
    match locale {
        "en-US" => "English",
        "de-DE" => "Deutsch",
        "tr-TR" => "Türkçe",
        "ar-SA" => "العربية",
        "fr-FR" => "Français",
        "es-ES" => "Español",
        "it-IT" => "Italiano",
        "pt-BR" => "Português",
        "ru-RU" => "Русский",
        "zh-CN" => "中文",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detection_list_stays_within_service_limit() {
        assert!(AUTO_DETECT_LANGUAGES.len() <= 4);
        for locale in AUTO_DETECT_LANGUAGES {
            assert!(SUPPORTED_LANGUAGES.contains(&locale));
        }
    }

    #[test]
    fn unknown_locale_falls_back_to_itself() {
        assert_eq!(language_name("nl-NL"), "nl-NL");
        assert_eq!(language_name("de-DE"), "Deutsch");
    }
}
