//! Pagewatch engine: the I/O side of the pipeline.
mod digest;
mod extract;
mod fetch;
mod notify;
mod state_store;

pub use digest::fingerprint;
pub use extract::{
    default_rules, visible_text, CascadeExtractor, ExtractionRule, Extractor, MIN_CONTENT_CHARS,
};
pub use fetch::{FetchError, FetchSettings, FetchedPage, Fetcher, ReqwestFetcher};
pub use notify::{
    NotifyError, NotifySettings, TelegramCredentials, TelegramNotifier, TELEGRAM_API_BASE,
};
pub use state_store::{StateError, StateStore};
