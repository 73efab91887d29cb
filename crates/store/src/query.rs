use crate::model::Restaurant;

/// One named, composable filter condition on the restaurant catalogue.
///
/// Clauses are combined by logical AND into a [`SearchFilter`]; each store
/// adapter translates them into its own query language.
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    /// The restaurant's city contains the given text, case-insensitively.
    CityMatch(String),
    /// Every token matches some cuisine label by case-insensitive
    /// substring containment.
    CuisineAll(Vec<String>),
    /// The restaurant name, or any cuisine label, contains the text
    /// case-insensitively.
    TextOr(String),
}

impl Clause {
    /// Evaluates the clause against a single restaurant record.
    pub fn matches(&self, restaurant: &Restaurant) -> bool {
        match self {
            Clause::CityMatch(city) => contains_ci(&restaurant.city, city),
            Clause::CuisineAll(tokens) => tokens.iter().all(|token| {
                restaurant
                    .cuisines
                    .iter()
                    .any(|cuisine| contains_ci(cuisine, token))
            }),
            Clause::TextOr(text) => {
                contains_ci(&restaurant.name, text)
                    || restaurant
                        .cuisines
                        .iter()
                        .any(|cuisine| contains_ci(cuisine, text))
            }
        }
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// A conjunction of filter clauses.
///
/// Built with the `for_city`/`with_*` methods; optional inputs that are
/// empty contribute no clause, so the conjunction never shrinks below the
/// mandatory city match.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchFilter {
    clauses: Vec<Clause>,
}

impl SearchFilter {
    /// Creates a filter with the mandatory city clause.
    pub fn for_city(city: impl Into<String>) -> Self {
        Self {
            clauses: vec![Clause::CityMatch(city.into())],
        }
    }

    /// Requires every token to match some cuisine label. An empty token
    /// list adds no clause.
    pub fn with_cuisines(mut self, tokens: Vec<String>) -> Self {
        if !tokens.is_empty() {
            self.clauses.push(Clause::CuisineAll(tokens));
        }
        self
    }

    /// Requires the name or a cuisine label to contain the text. Empty
    /// text adds no clause.
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        let text = text.into();
        if !text.is_empty() {
            self.clauses.push(Clause::TextOr(text));
        }
        self
    }

    /// The clauses in this conjunction.
    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    /// Evaluates the full conjunction against a restaurant record.
    pub fn matches(&self, restaurant: &Restaurant) -> bool {
        self.clauses.iter().all(|clause| clause.matches(restaurant))
    }
}

/// Field the search results are sorted by, always ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    LastUpdated,
    DeliveryPrice,
    EstimatedDeliveryTime,
}

impl SortField {
    /// Parses a wire name (`lastUpdated`, `deliveryPrice`,
    /// `estimatedDeliveryTime`); unknown names fall back to the default.
    pub fn parse_or_default(name: &str) -> Self {
        match name {
            "deliveryPrice" => SortField::DeliveryPrice,
            "estimatedDeliveryTime" => SortField::EstimatedDeliveryTime,
            _ => SortField::LastUpdated,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MenuItem;
    use chrono::Utc;
    use common::RestaurantId;

    fn restaurant(name: &str, city: &str, cuisines: &[&str]) -> Restaurant {
        Restaurant {
            id: RestaurantId::new(),
            name: name.to_string(),
            city: city.to_string(),
            country: "UK".to_string(),
            cuisines: cuisines.iter().map(|c| c.to_string()).collect(),
            menu_items: vec![MenuItem {
                name: "Special".to_string(),
                price_cents: 900,
            }],
            delivery_price_cents: 250,
            estimated_delivery_minutes: 30,
            image_url: String::new(),
            last_updated: Utc::now(),
        }
    }

    #[test]
    fn city_match_is_case_insensitive_substring() {
        let r = restaurant("Curry House", "East London", &["Indian"]);
        assert!(Clause::CityMatch("london".to_string()).matches(&r));
        assert!(Clause::CityMatch("LONDON".to_string()).matches(&r));
        assert!(!Clause::CityMatch("Paris".to_string()).matches(&r));
    }

    #[test]
    fn cuisine_all_requires_every_token() {
        let r = restaurant("Fusion Place", "London", &["Thai Street Food", "Vegan"]);
        let both = Clause::CuisineAll(vec!["thai".to_string(), "vegan".to_string()]);
        let missing = Clause::CuisineAll(vec!["thai".to_string(), "sushi".to_string()]);
        assert!(both.matches(&r));
        assert!(!missing.matches(&r));
    }

    #[test]
    fn cuisine_tokens_match_by_substring_not_equality() {
        let r = restaurant("Fusion Place", "London", &["Thai Street Food"]);
        assert!(Clause::CuisineAll(vec!["street".to_string()]).matches(&r));
    }

    #[test]
    fn text_or_matches_name_or_cuisine() {
        let r = restaurant("Curry House", "London", &["Indian"]);
        assert!(Clause::TextOr("curry".to_string()).matches(&r));
        assert!(Clause::TextOr("indian".to_string()).matches(&r));
        assert!(!Clause::TextOr("pizza".to_string()).matches(&r));
    }

    #[test]
    fn empty_optional_inputs_add_no_clause() {
        let filter = SearchFilter::for_city("London")
            .with_cuisines(vec![])
            .with_text("");
        assert_eq!(filter.clauses().len(), 1);

        let r = restaurant("Curry House", "London", &["Indian"]);
        assert!(filter.matches(&r));
    }

    #[test]
    fn clauses_combine_with_and_semantics() {
        let r = restaurant("Curry House", "London", &["Indian"]);
        let matching = SearchFilter::for_city("London")
            .with_cuisines(vec!["indian".to_string()])
            .with_text("curry");
        let failing = SearchFilter::for_city("London")
            .with_cuisines(vec!["sushi".to_string()])
            .with_text("curry");
        assert!(matching.matches(&r));
        assert!(!failing.matches(&r));
    }

    #[test]
    fn sort_field_falls_back_to_last_updated() {
        assert_eq!(SortField::parse_or_default("lastUpdated"), SortField::LastUpdated);
        assert_eq!(
            SortField::parse_or_default("deliveryPrice"),
            SortField::DeliveryPrice
        );
        assert_eq!(
            SortField::parse_or_default("estimatedDeliveryTime"),
            SortField::EstimatedDeliveryTime
        );
        assert_eq!(SortField::parse_or_default("rating"), SortField::LastUpdated);
    }
}
