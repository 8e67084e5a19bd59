//! Localized traversal
//!
//! Switching the UI locale changes server-side state, so every language is
//! handled to completion (switch, then download) before the next one starts.

use serde_json::Value;
use tracing::{info, warn};

use crate::client::LocaleConfigPatch;
use crate::dump::fetch::{Downloader, StageStats};
use crate::dump::paths::{L10N_CONFIG_PATH, LANGUAGES_PATH};
use crate::error::DumpResult;
use crate::snapshot::Snapshot;

/// Locale identifier for a language tag: `en-US` becomes `en_US.UTF-8`
pub fn locale_for_tag(tag: &str) -> String {
    match tag.split_once('-') {
        Some((language, region)) => format!("{}_{}.UTF-8", language, region.to_uppercase()),
        None => format!("{}.UTF-8", tag),
    }
}

/// Download every localized path once per UI language
///
/// Results are recorded under `snapshot[language][path]`. When the locale
/// switch for a language fails, that language is skipped. The locale found
/// in the snapshot's l10n config is restored at the end.
pub async fn download_localized(
    localized: &[&str],
    downloader: &Downloader<'_>,
    snapshot: &mut Snapshot,
) -> StageStats {
    let mut stats = StageStats::default();

    let languages = match discover_languages(downloader).await {
        Ok(languages) => languages,
        Err(e) => {
            warn!(
                path = %LANGUAGES_PATH,
                error = %e,
                "Cannot read UI languages, skipping localized endpoints"
            );
            stats.failed += 1;
            return stats;
        }
    };
    info!(languages = languages.len(), "Downloading localized endpoints");

    let original_locale = snapshot
        .get(L10N_CONFIG_PATH)
        .and_then(|config| config.get("uiLocale"))
        .and_then(Value::as_str)
        .map(str::to_string);

    for language in &languages {
        let locale = locale_for_tag(language);
        if let Err(e) = switch_locale(downloader, &locale).await {
            warn!(
                language = %language,
                locale = %locale,
                error = %e,
                "Locale switch failed, skipping language"
            );
            stats.failed += 1;
            continue;
        }

        for path in localized {
            downloader
                .download_localized(language, path, snapshot, &mut stats)
                .await;
        }
    }

    if let Some(locale) = original_locale.filter(|_| !languages.is_empty()) {
        if let Err(e) = switch_locale(downloader, &locale).await {
            warn!(locale = %locale, error = %e, "Could not restore the UI locale");
        }
    }

    stats
}

/// Language tags from the discovery document, in document order
async fn discover_languages(downloader: &Downloader<'_>) -> DumpResult<Vec<String>> {
    let value = downloader.fetch(LANGUAGES_PATH).await?;
    Ok(value
        .as_object()
        .map(|map| map.keys().cloned().collect())
        .unwrap_or_default())
}

async fn switch_locale(downloader: &Downloader<'_>, locale: &str) -> DumpResult<()> {
    info!(locale = %locale, "Switching UI locale");
    let body = serde_json::to_value(LocaleConfigPatch {
        ui_locale: locale.to_string(),
    })?;
    downloader.patch(L10N_CONFIG_PATH, &body).await
}
