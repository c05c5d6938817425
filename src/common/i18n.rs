// src/common/i18n.rs

use chrono::Locale;

use crate::common::error::ReportError;

// Nosso locale resolvido. Substitui o `setlocale` global: quem precisa formatar
// datas recebe este valor explicitamente.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReportLocale(pub Locale);

impl ReportLocale {
    /// Tenta o locale principal e, se não existir, o secundário.
    pub fn resolve(primary: &str, fallback: &str) -> Result<Self, ReportError> {
        if let Some(locale) = parse_locale(primary) {
            return Ok(ReportLocale(locale));
        }

        tracing::warn!(
            "Locale '{}' indisponível, tentando '{}'",
            primary,
            fallback
        );

        parse_locale(fallback)
            .map(ReportLocale)
            .ok_or_else(|| ReportError::LocaleUnavailable {
                primary: primary.to_string(),
                fallback: fallback.to_string(),
            })
    }
}

// "es_ES.UTF-8" -> "es_ES", "es-VE" -> "es_VE"
fn parse_locale(name: &str) -> Option<Locale> {
    let tag = name.trim().split('.').next().unwrap_or(name).replace('-', "_");
    if tag.is_empty() {
        return None;
    }
    Locale::try_from(tag.as_str()).ok()
}
