//! Search execution: filter, sort, and page a city's restaurants.

use store::RestaurantStore;

use crate::criteria::SearchCriteria;
use crate::error::DomainError;
use crate::page::{PAGE_SIZE, PageEnvelope};

/// Outcome of a city search.
///
/// A city with no restaurants at all is distinguished from a known city
/// whose optional clauses matched nothing, because the two produce
/// different response statuses and pagination shapes.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    /// No restaurant exists in the requested city.
    UnknownCity(PageEnvelope),
    /// The city exists; the envelope holds the requested page.
    Page(PageEnvelope),
}

impl SearchOutcome {
    pub fn envelope(&self) -> &PageEnvelope {
        match self {
            Self::UnknownCity(envelope) | Self::Page(envelope) => envelope,
        }
    }
}

/// Executes normalized search criteria against a restaurant store.
#[derive(Debug, Clone)]
pub struct SearchService<S> {
    store: S,
}

impl<S: RestaurantStore> SearchService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Runs the search: city existence pre-check, then the full
    /// conjunction with sort and page window.
    #[tracing::instrument(skip(self, criteria), fields(city = criteria.city(), page = criteria.page()))]
    pub async fn search(&self, criteria: &SearchCriteria) -> Result<SearchOutcome, DomainError> {
        let city_total = self.store.count_restaurants(&criteria.city_filter()).await?;
        if city_total == 0 {
            tracing::debug!(city = criteria.city(), "no restaurants in city");
            metrics::counter!("search_unknown_city_total").increment(1);
            return Ok(SearchOutcome::UnknownCity(PageEnvelope::empty()));
        }

        let filter = criteria.filter();
        let total = self.store.count_restaurants(&filter).await?;
        let skip = (criteria.page() - 1) as usize * PAGE_SIZE as usize;
        let data = self
            .store
            .find_restaurants(&filter, criteria.sort(), skip, PAGE_SIZE as usize)
            .await?;

        metrics::counter!("search_pages_total").increment(1);
        Ok(SearchOutcome::Page(PageEnvelope::new(
            data,
            total,
            criteria.page(),
        )))
    }
}
