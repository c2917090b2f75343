//! Fetch orchestration for the search box.
//!
//! A search geocodes the query, fetches current conditions and the 5-day
//! forecast together, and publishes the outcome. Commits are
//! last-request-wins: every attempt is tagged with a generation, and a
//! completion whose generation no longer matches the latest search is
//! discarded instead of overwriting newer state.

use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::FetchError;
use crate::model::{Coordinates, WeatherBundle, WeatherReading};

/// The three upstream operations a search needs, in call order.
///
/// Implemented by [`crate::OpenWeatherClient`]; tests substitute fakes.
#[async_trait]
pub trait WeatherApi: Send + Sync {
    /// Resolve a free-text query to one coordinate pair.
    /// Zero matches is [`FetchError::LocationNotFound`].
    async fn geocode(&self, query: &str) -> Result<Coordinates, FetchError>;

    /// Current conditions at the given coordinates, metric units.
    async fn current(&self, at: Coordinates) -> Result<WeatherReading, FetchError>;

    /// Ordered 3-hour forecast slots at the given coordinates, metric units.
    async fn forecast(&self, at: Coordinates) -> Result<Vec<WeatherReading>, FetchError>;
}

/// Where the latest search stands.
#[derive(Debug, Clone)]
pub enum SearchState {
    /// No search submitted yet.
    Idle,
    /// A fetch is in flight.
    Loading,
    /// Both responses arrived.
    Ready(WeatherBundle),
    /// The attempt failed; the message is user-facing.
    Failed(String),
}

impl SearchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }
}

/// Shared state for the weather panel. One instance lives for the lifetime
/// of the program; every submitted search goes through it.
pub struct SearchSession {
    api: Box<dyn WeatherApi>,
    state: Mutex<SearchState>,
    generation: AtomicU64,
}

impl SearchSession {
    pub fn new(api: Box<dyn WeatherApi>) -> Self {
        Self {
            api,
            state: Mutex::new(SearchState::Idle),
            generation: AtomicU64::new(0),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SearchState {
        self.state.lock().clone()
    }

    /// Run one search attempt. Empty or whitespace-only input is a silent
    /// no-op: no fetch, no state change.
    pub async fn search(&self, query: &str) {
        let query = query.trim();
        if query.is_empty() {
            return;
        }

        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        *self.state.lock() = SearchState::Loading;
        tracing::info!(%query, "searching");

        let outcome = self.fetch(query).await;

        // A newer search started while this one was in flight; drop the
        // result instead of overwriting the newer state.
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::debug!(%query, "discarding superseded search result");
            return;
        }

        *self.state.lock() = match outcome {
            Ok(bundle) => SearchState::Ready(bundle),
            Err(err) => {
                tracing::warn!(%query, error = %err, "search failed");
                SearchState::Failed(err.to_string())
            }
        };
    }

    async fn fetch(&self, query: &str) -> Result<WeatherBundle, FetchError> {
        let at = self.api.geocode(query).await?;

        // Independent once the coordinates are known; run them together.
        let (current, forecast) =
            tokio::try_join!(self.api.current(at), self.api.forecast(at))?;

        Ok(WeatherBundle {
            query: query.to_string(),
            current,
            forecast,
        })
    }
}
