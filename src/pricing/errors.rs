//! Pricing error types.

use thiserror::Error;

/// Catalog rows that cannot be turned into a usable catalog.
///
/// Row numbers are zero-based positions in the input slice.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("Venue row {row} has no pub name")]
    MissingVenueName { row: usize },

    #[error("Venue row {row} for '{venue}' has no beer name")]
    MissingBeerName { row: usize, venue: String },

    #[error("Travel row {row} has no option name")]
    MissingTravelName { row: usize },

    #[error("Invalid {field} {value:?} for '{key}' in row {row}")]
    InvalidAmount {
        row: usize,
        key: String,
        field: &'static str,
        value: String,
    },

    #[error("Invalid {field} {value:?} for '{key}' in row {row}")]
    InvalidRating {
        row: usize,
        key: String,
        field: &'static str,
        value: String,
    },
}

impl CatalogError {
    /// Name of the venue, beer or travel option at fault, when the row has one
    pub fn key(&self) -> Option<&str> {
        match self {
            CatalogError::MissingVenueName { .. } | CatalogError::MissingTravelName { .. } => None,
            CatalogError::MissingBeerName { venue, .. } => Some(venue.as_str()),
            CatalogError::InvalidAmount { key, .. } | CatalogError::InvalidRating { key, .. } => {
                Some(key.as_str())
            }
        }
    }
}

/// A selection that does not fit the current catalog.
///
/// Usually stale client state after a catalog refresh; the caller should
/// re-validate the selection and try again.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("Unknown travel option '{0}'")]
    UnknownTravelOption(String),

    #[error("Unknown venue '{0}'")]
    UnknownVenue(String),

    #[error("Venue '{venue}' does not serve '{beer}'")]
    UnknownBeer { venue: String, beer: String },

    #[error("Venue '{0}' was selected more than once")]
    DuplicateVenue(String),

    #[error("Beers were chosen at '{0}' but the venue is not selected")]
    BeersForUnselectedVenue(String),

    #[error("At most {max} venues can be selected, got {count}")]
    TooManyVenues { count: usize, max: usize },

    #[error("Party size must be at least 1, got {0}")]
    InvalidPartySize(u32),

    #[error("Total cost exceeds the largest representable amount")]
    TotalOverflow,
}

impl SelectionError {
    /// Name of the venue, beer or travel option at fault
    pub fn key(&self) -> Option<&str> {
        match self {
            SelectionError::UnknownTravelOption(name)
            | SelectionError::UnknownVenue(name)
            | SelectionError::DuplicateVenue(name)
            | SelectionError::BeersForUnselectedVenue(name) => Some(name.as_str()),
            SelectionError::UnknownBeer { beer, .. } => Some(beer.as_str()),
            SelectionError::TooManyVenues { .. }
            | SelectionError::InvalidPartySize(_)
            | SelectionError::TotalOverflow => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_error_display_names_key() {
        let err = SelectionError::UnknownBeer {
            venue: "Toit".to_string(),
            beer: "Tintin Toit".to_string(),
        };
        assert!(err.to_string().contains("Toit"));
        assert!(err.to_string().contains("Tintin Toit"));
        assert_eq!(err.key(), Some("Tintin Toit"));

        let err = SelectionError::UnknownTravelOption("Rickshaw".to_string());
        assert!(err.to_string().contains("Rickshaw"));
        assert_eq!(err.key(), Some("Rickshaw"));
    }

    #[test]
    fn test_catalog_error_display() {
        let err = CatalogError::InvalidAmount {
            row: 2,
            key: "Toit".to_string(),
            field: "table_fee",
            value: "fifty".to_string(),
        };
        assert!(err.to_string().contains("table_fee"));
        assert!(err.to_string().contains("fifty"));
        assert_eq!(err.key(), Some("Toit"));

        assert_eq!(CatalogError::MissingVenueName { row: 0 }.key(), None);
    }
}
