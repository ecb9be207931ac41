//! Load lifecycle shared by every page:
//! `Idle -> Loading -> {Populated | Empty | Failed}`, back to `Loading`
//! whenever the parameters change.

use std::fmt::Display;

use crate::data_models::{AnalyticsEntry, CrawledSitesPage, SearchResponse};

#[derive(Debug, Clone, PartialEq)]
pub enum PageState<T> {
    Idle,
    Loading,
    Populated(T),
    Empty,
    Failed(String),
}

impl<T> PageState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, PageState::Loading)
    }
}

/// Decides whether a resolved response lands in `Populated` or `Empty`.
pub trait HasItems {
    fn has_items(&self) -> bool;
}

impl HasItems for SearchResponse {
    fn has_items(&self) -> bool {
        !self.results.is_empty()
    }
}

impl HasItems for Vec<AnalyticsEntry> {
    fn has_items(&self) -> bool {
        !self.is_empty()
    }
}

impl HasItems for CrawledSitesPage {
    fn has_items(&self) -> bool {
        !self.urls.is_empty()
    }
}

/// Identifies one issued request by generation and the parameters it was
/// issued for.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestTag<P> {
    generation: u64,
    params: P,
}

impl<P> RequestTag<P> {
    pub fn params(&self) -> &P {
        &self.params
    }
}

/// Tracks the current parameter snapshot and drops responses issued for an
/// older one.
#[derive(Debug)]
pub struct Loader<P, T> {
    params: Option<P>,
    generation: u64,
    state: PageState<T>,
}

impl<P, T> Default for Loader<P, T> {
    fn default() -> Self {
        Self {
            params: None,
            generation: 0,
            state: PageState::Idle,
        }
    }
}

impl<P, T> Loader<P, T>
where
    P: Clone + PartialEq,
    T: HasItems,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &PageState<T> {
        &self.state
    }

    pub fn params(&self) -> Option<&P> {
        self.params.as_ref()
    }

    /// Start a load for `params`. Returns `None` when nothing changed, so a
    /// no-op navigation never issues a second fetch.
    pub fn begin(&mut self, params: P) -> Option<RequestTag<P>> {
        if self.params.as_ref() == Some(&params) && !matches!(self.state, PageState::Idle) {
            return None;
        }
        self.params = Some(params.clone());
        Some(self.issue(params))
    }

    /// Re-issue the current parameters after a failure.
    pub fn retry(&mut self) -> Option<RequestTag<P>> {
        if !matches!(self.state, PageState::Failed(_)) {
            return None;
        }
        let params = self.params.clone()?;
        Some(self.issue(params))
    }

    /// Back to `Idle`; anything still in flight becomes stale.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.params = None;
        self.state = PageState::Idle;
    }

    /// Apply a response. Returns `false` and leaves the state untouched when
    /// the tag belongs to a superseded request.
    pub fn resolve<E: Display>(&mut self, tag: RequestTag<P>, result: Result<T, E>) -> bool {
        if tag.generation != self.generation || self.params.as_ref() != Some(&tag.params) {
            tracing::debug!(
                stale = tag.generation,
                current = self.generation,
                "discarding stale response"
            );
            return false;
        }
        self.state = match result {
            Ok(value) if value.has_items() => PageState::Populated(value),
            Ok(_) => PageState::Empty,
            Err(e) => PageState::Failed(e.to_string()),
        };
        true
    }

    fn issue(&mut self, params: P) -> RequestTag<P> {
        self.generation += 1;
        self.state = PageState::Loading;
        RequestTag {
            generation: self.generation,
            params,
        }
    }
}
