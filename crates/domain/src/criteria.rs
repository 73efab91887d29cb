//! Search criteria: normalization of raw query parameters.

use serde::Deserialize;
use store::{SearchFilter, SortField};

/// Raw query-string parameters accepted by the search endpoint.
///
/// Every field is optional and arrives as loose text; [`SearchCriteria`]
/// owns the normalization rules.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchParams {
    pub search_query: Option<String>,
    pub selected_cuisines: Option<String>,
    pub sort_option: Option<String>,
    pub page: Option<String>,
}

/// Normalized, request-scoped search input.
///
/// Empty optional inputs are treated as "clause omitted": an empty
/// cuisine selection or free-text string never shrinks the result set.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchCriteria {
    city: String,
    text: Option<String>,
    cuisines: Vec<String>,
    sort: SortField,
    page: u32,
}

impl SearchCriteria {
    /// Normalizes raw parameters for a city search.
    ///
    /// The cuisine selection is comma-split into trimmed, non-empty
    /// tokens; the page defaults to 1 on missing, unparseable, or < 1
    /// input; unknown sort names fall back to the default sort.
    pub fn from_params(city: impl Into<String>, params: &SearchParams) -> Self {
        let text = params.search_query.clone().filter(|t| !t.is_empty());
        let cuisines = split_cuisines(params.selected_cuisines.as_deref().unwrap_or(""));
        let sort = SortField::parse_or_default(params.sort_option.as_deref().unwrap_or(""));
        let page = parse_page(params.page.as_deref());

        Self {
            city: city.into(),
            text,
            cuisines,
            sort,
            page,
        }
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn sort(&self) -> SortField {
        self.sort
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    /// The full conjunction: city plus any optional clauses.
    pub fn filter(&self) -> SearchFilter {
        SearchFilter::for_city(&self.city)
            .with_cuisines(self.cuisines.clone())
            .with_text(self.text.clone().unwrap_or_default())
    }

    /// The mandatory city clause alone, used for the existence pre-check.
    pub fn city_filter(&self) -> SearchFilter {
        SearchFilter::for_city(&self.city)
    }
}

fn split_cuisines(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_page(raw: Option<&str>) -> u32 {
    raw.and_then(|p| p.trim().parse::<u32>().ok())
        .filter(|p| *p >= 1)
        .unwrap_or(1)
}
