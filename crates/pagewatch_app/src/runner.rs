use pagewatch_core::{
    build_notification, detect_changes, fingerprint_map, ActiveHours, PageCapture,
};
use pagewatch_engine::{
    fingerprint, CascadeExtractor, Extractor, Fetcher, ReqwestFetcher, StateError, StateStore,
    TelegramCredentials, TelegramNotifier,
};
use watch_logging::{watch_info, watch_warn};

use crate::config::Config;

/// What a single invocation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// The local hour fell in the quiet window; nothing was touched.
    Skipped { hour: u32 },
    Completed(RunReport),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub pages_checked: usize,
    pub pages_failed: usize,
    pub changes: usize,
    /// `None` when no change required a notification.
    pub delivered: Option<bool>,
}

/// One full pipeline pass: gate, load prior state, fetch each page in
/// configured order, compare, notify at most once, persist the new mapping.
///
/// The caller supplies the local hour so the controller itself stays free
/// of clock reads. Only state-store failures abort the run; everything
/// else degrades per URL or per delivery.
pub async fn execute(
    config: &Config,
    credentials: Option<TelegramCredentials>,
    local_hour: u32,
) -> Result<RunOutcome, StateError> {
    let gate = ActiveHours::new(config.gate.quiet_hours.clone());
    if !gate.is_active(local_hour) {
        watch_info!("Hour {local_hour} is inside the quiet window; skipping this run");
        return Ok(RunOutcome::Skipped { hour: local_hour });
    }

    let store = StateStore::new(config.state.path.clone());
    let previous = store.load()?;

    let fetcher = ReqwestFetcher::new(config.fetch_settings());
    let extractor = CascadeExtractor::new(config.extraction_rules());

    let mut captures = Vec::new();
    for url in &config.watch.urls {
        watch_info!("Checking {url}");
        let page = match fetcher.fetch(url).await {
            Ok(page) => page,
            Err(err) => {
                watch_warn!("Fetch failed for {url}: {err}");
                continue;
            }
        };
        let text = extractor.extract(&page.html);
        let fingerprint = fingerprint(&text);
        if !previous.contains_key(url) {
            watch_info!("First observation for {url}");
        }
        captures.push(PageCapture {
            url: url.clone(),
            fingerprint,
            text,
        });
    }

    let changes = detect_changes(&previous, &captures);
    for change in &changes {
        watch_info!("Change detected: {}", change.url);
    }

    let delivered = if changes.is_empty() {
        watch_info!("No changes detected");
        None
    } else {
        let notifier = TelegramNotifier::new(credentials, config.notify_settings());
        let delivered = notifier.deliver(&build_notification(&changes)).await;
        watch_info!("Telegram delivery: {delivered}");
        Some(delivered)
    };

    // Persist even when delivery failed. The mapping carries only URLs
    // fetched successfully this run.
    store.save(&fingerprint_map(&captures))?;

    Ok(RunOutcome::Completed(RunReport {
        pages_checked: captures.len(),
        pages_failed: config.watch.urls.len() - captures.len(),
        changes: changes.len(),
        delivered,
    }))
}
