//! Image acquisition: live photo search with a bundled fallback.
//!
//! Whatever happens on the network, [`fetch_images`] resolves to exactly
//! [`PAIR_COUNT`] descriptors so a game can always be dealt.

pub mod descriptor;
pub mod fallback;
pub mod unsplash;

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use rand::seq::IndexedRandom;
use thiserror::Error;

use crate::config::Settings;

pub use descriptor::{Attribution, ImageDescriptor, ImageFormat};
pub use fallback::fallback_images;
pub use unsplash::UnsplashSearch;

pub const PAIR_COUNT: usize = 8;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("no access key configured")]
    MissingAccessKey,

    #[error("transport error: {0}")]
    Transport(String),

    #[error("server answered with status {0}")]
    Status(u16),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("expected {expected} photos, got {found}")]
    TooFewResults { expected: usize, found: usize },

    #[error("search timed out")]
    TimedOut,

    #[error("search cancelled")]
    Cancelled,
}

/// A blocking photo search. Implementations run on a worker thread.
pub trait PhotoSearch: Send + Sync {
    fn search(&self, theme: &str) -> Result<Vec<ImageDescriptor>, FetchError>;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageOrigin {
    Live,
    Fallback,
}

#[derive(Clone, Debug)]
pub struct ImageSet {
    pub theme: String,
    pub images: Vec<ImageDescriptor>,
    pub origin: ImageOrigin,
}

pub fn source_from_settings(settings: &Settings) -> Option<Arc<dyn PhotoSearch>> {
    let key = settings.access_key()?;
    Some(Arc::new(UnsplashSearch::new(
        &settings.endpoint,
        key,
        settings.timeout(),
    )))
}

pub fn pick_theme<R: Rng + ?Sized>(themes: &[String], rng: &mut R) -> String {
    themes
        .choose(rng)
        .cloned()
        .unwrap_or_else(|| crate::config::DEFAULT_THEMES[0].to_string())
}

fn exactly_one_per_pair(mut images: Vec<ImageDescriptor>) -> Result<Vec<ImageDescriptor>, FetchError> {
    if images.len() < PAIR_COUNT {
        return Err(FetchError::TooFewResults {
            expected: PAIR_COUNT,
            found: images.len(),
        });
    }
    images.truncate(PAIR_COUNT);

    let distinct = {
        let mut seen = HashSet::new();
        images.iter().all(|image| seen.insert(image.url.as_str()))
    };
    if !distinct {
        return Err(FetchError::Malformed("duplicate photo url".to_string()));
    }
    Ok(images)
}

/// Turns a search outcome into a playable image set.
pub fn settle(theme: String, result: Result<Vec<ImageDescriptor>, FetchError>) -> ImageSet {
    match result.and_then(exactly_one_per_pair) {
        Ok(images) => {
            log::info!("loaded {} live photos for \"{}\"", images.len(), theme);
            ImageSet {
                theme,
                images,
                origin: ImageOrigin::Live,
            }
        }
        Err(err) => {
            match err {
                FetchError::MissingAccessKey => log::info!("using bundled photos for \"{theme}\""),
                other => log::warn!("photo search for \"{theme}\" failed ({other}); using bundled photos"),
            }
            ImageSet {
                theme,
                images: fallback_images(),
                origin: ImageOrigin::Fallback,
            }
        }
    }
}

/// Runs the search off the main loop, bounded by `timeout` and `cancellable`.
///
/// Timeouts, cancellation and worker panics all settle to the fallback set.
pub async fn fetch_images(
    source: Option<Arc<dyn PhotoSearch>>,
    theme: String,
    timeout: Duration,
    cancellable: &gio::Cancellable,
) -> ImageSet {
    let Some(source) = source else {
        return settle(theme, Err(FetchError::MissingAccessKey));
    };

    let query = theme.clone();
    let search = gio::spawn_blocking(move || source.search(&query));
    let bounded = glib::future_with_timeout(timeout, Box::pin(search));
    let result = match gio::CancellableFuture::new(bounded, cancellable.clone()).await {
        Err(_) => Err(FetchError::Cancelled),
        Ok(Err(_)) => Err(FetchError::TimedOut),
        Ok(Ok(Err(_))) => Err(FetchError::Transport("search worker panicked".to_string())),
        Ok(Ok(Ok(result))) => result,
    };
    settle(theme, result)
}
