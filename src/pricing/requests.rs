//! Request DTOs for pricing API endpoints.

use serde::Deserialize;
use std::collections::BTreeMap;

use super::models::Selection;

/// Selection as submitted by the planner form.
///
/// Beers arrive as the multiselect's list; repeats collapse when converted
/// into a [`Selection`].
#[derive(Debug, Deserialize)]
pub struct SelectionRequest {
    pub party_size: u32,
    #[serde(default)]
    pub chosen_venues: Vec<String>,
    #[serde(default)]
    pub chosen_beers: BTreeMap<String, Vec<String>>,
    pub travel_choice: String,
    #[serde(default)]
    pub reservation_opt_out: bool,
}

impl From<SelectionRequest> for Selection {
    fn from(request: SelectionRequest) -> Self {
        Self {
            party_size: request.party_size,
            chosen_venues: request.chosen_venues,
            chosen_beers: request
                .chosen_beers
                .into_iter()
                .map(|(venue, beers)| (venue, beers.into_iter().collect()))
                .collect(),
            travel_choice: request.travel_choice,
            reservation_opt_out: request.reservation_opt_out,
        }
    }
}
