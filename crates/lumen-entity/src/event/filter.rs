//! Catalog listing filter.

use serde::{Deserialize, Serialize};

use super::category::EventCategory;

/// Filter applied when listing the event catalog.
///
/// Raw query parameters arrive as strings; [`EventFilter::normalized`]
/// maps the sentinel values (`all` category, blank search) to "no filter".
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventFilter {
    /// Category filter. `None` or `"all"` means no category filtering.
    pub category: Option<String>,
    /// Case-insensitive substring match on the event title.
    pub search: Option<String>,
}

/// A filter with sentinels resolved, ready to parameterize a query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NormalizedFilter {
    /// Concrete category to filter on, if any.
    pub category: Option<EventCategory>,
    /// Non-empty search term, if any.
    pub search: Option<String>,
}

impl EventFilter {
    /// Resolve sentinel values into a concrete filter.
    ///
    /// Returns a validation error for an unknown category name other
    /// than the `all` sentinel.
    pub fn normalized(&self) -> Result<NormalizedFilter, lumen_core::AppError> {
        let category = match self.category.as_deref() {
            None => None,
            Some(raw) if raw.eq_ignore_ascii_case("all") || raw.is_empty() => None,
            Some(raw) => Some(raw.parse::<EventCategory>()?),
        };

        let search = self
            .search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_owned);

        Ok(NormalizedFilter { category, search })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_category_means_no_filter() {
        let filter = EventFilter {
            category: Some("all".to_string()),
            search: None,
        };
        assert_eq!(filter.normalized().unwrap(), NormalizedFilter::default());
    }

    #[test]
    fn blank_search_is_dropped() {
        let filter = EventFilter {
            category: None,
            search: Some("   ".to_string()),
        };
        assert_eq!(filter.normalized().unwrap().search, None);
    }

    #[test]
    fn concrete_category_is_parsed() {
        let filter = EventFilter {
            category: Some("workshop".to_string()),
            search: Some("rust".to_string()),
        };
        let normalized = filter.normalized().unwrap();
        assert_eq!(normalized.category, Some(EventCategory::Workshop));
        assert_eq!(normalized.search.as_deref(), Some("rust"));
    }

    #[test]
    fn unknown_category_is_rejected() {
        let filter = EventFilter {
            category: Some("banquet".to_string()),
            search: None,
        };
        assert!(filter.normalized().is_err());
    }
}
