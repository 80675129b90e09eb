//! Core pricing calculation functions.
//!
//! Pure functions for pricing math - no database access. Every call reads
//! only its arguments, so quotes can be recomputed on each selection change.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use rust_decimal::prelude::*;
use uuid::Uuid;

use super::errors::SelectionError;
use super::models::{Booking, Catalog, LineItem, PriceBreakdown, Selection};
use super::responses::MoneyResponse;

/// Maximum number of venues on one itinerary
pub const MAX_VENUES: usize = 4;

/// Round to specified decimal places using banker's rounding (ROUND_HALF_EVEN).
///
/// # Examples
/// ```
/// use rust_decimal_macros::dec;
/// use plannabe_web::pricing::round_money;
///
/// assert_eq!(round_money(dec!(2.5), 0), dec!(2));   // rounds to even
/// assert_eq!(round_money(dec!(3.5), 0), dec!(4));   // rounds to even
/// assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
/// ```
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven)
}

/// Compute the total cost of a selection against a catalog.
///
/// The total starts at the travel price, adds each chosen venue's table fee
/// unless the party opted out of reservations, and adds every chosen beer.
/// `line_items` lists each contribution in that order and always sums to
/// `total_cost`.
pub fn compute_total(
    catalog: &Catalog,
    selection: &Selection,
) -> Result<PriceBreakdown, SelectionError> {
    validate_selection(selection)?;

    let travel_price = catalog
        .travel_price(&selection.travel_choice)
        .ok_or_else(|| SelectionError::UnknownTravelOption(selection.travel_choice.clone()))?;

    let mut line_items = vec![LineItem::travel(travel_price)];

    for venue_name in &selection.chosen_venues {
        let venue = catalog
            .venue(venue_name)
            .ok_or_else(|| SelectionError::UnknownVenue(venue_name.clone()))?;

        if !selection.reservation_opt_out {
            line_items.push(LineItem::table_fee(venue));
        }

        let Some(beers) = selection.chosen_beers.get(venue_name) else {
            continue;
        };

        for beer in beers {
            let price = venue
                .beer_price(beer)
                .ok_or_else(|| SelectionError::UnknownBeer {
                    venue: venue_name.clone(),
                    beer: beer.clone(),
                })?;
            line_items.push(LineItem::beer(venue, beer, price));
        }
    }

    let total_cost = line_items
        .iter()
        .try_fold(Decimal::ZERO, |sum, item| sum.checked_add(item.amount))
        .ok_or(SelectionError::TotalOverflow)?;

    Ok(PriceBreakdown {
        total_cost,
        line_items,
    })
}

/// Structural checks that don't need the catalog
fn validate_selection(selection: &Selection) -> Result<(), SelectionError> {
    if selection.party_size < 1 {
        return Err(SelectionError::InvalidPartySize(selection.party_size));
    }

    if selection.chosen_venues.len() > MAX_VENUES {
        return Err(SelectionError::TooManyVenues {
            count: selection.chosen_venues.len(),
            max: MAX_VENUES,
        });
    }

    let mut seen = HashSet::new();
    for venue in &selection.chosen_venues {
        if !seen.insert(venue.as_str()) {
            return Err(SelectionError::DuplicateVenue(venue.clone()));
        }
    }

    // Empty lists left behind by a deselected venue are harmless
    if let Some((venue, _)) = selection
        .chosen_beers
        .iter()
        .find(|(venue, beers)| !beers.is_empty() && !seen.contains(venue.as_str()))
    {
        return Err(SelectionError::BeersForUnselectedVenue(venue.clone()));
    }

    Ok(())
}

/// Build the booking record for a priced selection.
///
/// Only call this with a total returned by [`compute_total`] for the same
/// selection.
pub fn build_booking_record(selection: &Selection, total_cost: Decimal) -> Booking {
    build_booking_record_at(selection, total_cost, Uuid::new_v4(), Utc::now())
}

/// [`build_booking_record`] with an explicit id and timestamp.
pub fn build_booking_record_at(
    selection: &Selection,
    total_cost: Decimal,
    id: Uuid,
    created_at: DateTime<Utc>,
) -> Booking {
    let chosen_beers = selection
        .chosen_beers
        .iter()
        .filter(|(_, beers)| !beers.is_empty())
        .map(|(venue, beers)| (venue.clone(), beers.iter().cloned().collect()))
        .collect();

    Booking {
        id,
        party_size: selection.party_size,
        chosen_venues: selection.chosen_venues.clone(),
        chosen_beers,
        travel_choice: selection.travel_choice.clone(),
        reservation_opt_out: selection.reservation_opt_out,
        total_cost,
        created_at,
    }
}

/// Split a total evenly across the party with remainder handling.
///
/// Uses banker's rounding, then distributes any remainder (due to rounding)
/// to the first members in 0.01 increments. A sub-cent leftover, possible
/// when the total carries more than 2 decimals, goes to the first share so
/// the shares always add up to the total.
pub fn split_per_person(total: Decimal, party_size: u32, currency: &str) -> AllocationResult {
    if party_size == 0 {
        return AllocationResult {
            per_person: MoneyResponse {
                amount: Decimal::ZERO,
                currency: currency.to_string(),
            },
            amounts: vec![],
        };
    }

    let per_person = round_money(total / Decimal::from(party_size), 2);
    let remainder = total - per_person * Decimal::from(party_size);

    let mut amounts: Vec<MoneyResponse> = (0..party_size)
        .map(|_| MoneyResponse {
            amount: per_person,
            currency: currency.to_string(),
        })
        .collect();

    if remainder != Decimal::ZERO {
        let increment = if remainder > Decimal::ZERO {
            Decimal::new(1, 2)
        } else {
            Decimal::new(-1, 2)
        };

        let adjustments_needed = (remainder.abs() / Decimal::new(1, 2))
            .to_usize()
            .unwrap_or(0);

        for share in amounts.iter_mut().take(adjustments_needed) {
            share.amount += increment;
        }
    }

    let allocated: Decimal = amounts.iter().map(|share| share.amount).sum();
    if let Some(first) = amounts.first_mut() {
        first.amount += total - allocated;
    }

    AllocationResult {
        per_person: MoneyResponse {
            amount: per_person,
            currency: currency.to_string(),
        },
        amounts,
    }
}

/// Result of splitting a total across the party
#[derive(Debug, Clone)]
pub struct AllocationResult {
    pub per_person: MoneyResponse,
    pub amounts: Vec<MoneyResponse>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::models::{Beer, LineSource, TravelOption, Venue};
    use chrono::TimeZone;
    use rust_decimal_macros::dec;
    use std::collections::{BTreeMap, BTreeSet};

    fn sample_catalog() -> Catalog {
        Catalog::from_parts(
            vec![
                Venue {
                    name: "A".to_string(),
                    table_fee: dec!(50),
                    rating: Some(4.5),
                    secondary_rating: Some(4.0),
                    beers: vec![
                        Beer {
                            name: "Lager".to_string(),
                            price: dec!(100),
                        },
                        Beer {
                            name: "Stout".to_string(),
                            price: dec!(180.50),
                        },
                    ],
                },
                Venue {
                    name: "B".to_string(),
                    table_fee: dec!(30),
                    rating: None,
                    secondary_rating: None,
                    beers: vec![Beer {
                        name: "Ale".to_string(),
                        price: dec!(150),
                    }],
                },
            ],
            vec![
                TravelOption {
                    name: "Cab".to_string(),
                    price: dec!(200),
                },
                TravelOption {
                    name: "Walk".to_string(),
                    price: dec!(0),
                },
            ],
        )
    }

    fn beers(entries: &[(&str, &[&str])]) -> BTreeMap<String, BTreeSet<String>> {
        entries
            .iter()
            .map(|(venue, names)| {
                (
                    venue.to_string(),
                    names.iter().map(|n| n.to_string()).collect(),
                )
            })
            .collect()
    }

    fn selection(venues: &[&str], opt_out: bool) -> Selection {
        Selection {
            party_size: 2,
            chosen_venues: venues.iter().map(|v| v.to_string()).collect(),
            chosen_beers: beers(&[("A", &["Lager"]), ("B", &["Ale"])])
                .into_iter()
                .filter(|(venue, _)| venues.contains(&venue.as_str()))
                .collect(),
            travel_choice: "Cab".to_string(),
            reservation_opt_out: opt_out,
        }
    }

    // ==================== round_money tests ====================

    #[test]
    fn test_round_money_bankers_rounding_to_even() {
        assert_eq!(round_money(dec!(2.5), 0), dec!(2));
        assert_eq!(round_money(dec!(3.5), 0), dec!(4));
        assert_eq!(round_money(dec!(2.25), 1), dec!(2.2));
        assert_eq!(round_money(dec!(2.35), 1), dec!(2.4));
    }

    #[test]
    fn test_round_money_normal_rounding() {
        assert_eq!(round_money(dec!(1.234), 2), dec!(1.23));
        assert_eq!(round_money(dec!(1.236), 2), dec!(1.24));
    }

    // ==================== compute_total tests ====================

    #[test]
    fn test_compute_total_worked_example_with_reservation() {
        let breakdown = compute_total(&sample_catalog(), &selection(&["A", "B"], false)).unwrap();
        assert_eq!(breakdown.total_cost, dec!(530));
    }

    #[test]
    fn test_compute_total_worked_example_opt_out() {
        let breakdown = compute_total(&sample_catalog(), &selection(&["A", "B"], true)).unwrap();
        assert_eq!(breakdown.total_cost, dec!(450));
        assert!(breakdown
            .line_items
            .iter()
            .all(|item| item.source != LineSource::TableFee));
    }

    #[test]
    fn test_compute_total_line_items_in_order() {
        let breakdown = compute_total(&sample_catalog(), &selection(&["B", "A"], false)).unwrap();

        let sources: Vec<(LineSource, Option<&str>)> = breakdown
            .line_items
            .iter()
            .map(|item| (item.source, item.venue.as_deref()))
            .collect();
        assert_eq!(
            sources,
            vec![
                (LineSource::Travel, None),
                (LineSource::TableFee, Some("B")),
                (LineSource::Beer, Some("B")),
                (LineSource::TableFee, Some("A")),
                (LineSource::Beer, Some("A")),
            ]
        );
        // Venue order changes the listing, not the sum
        assert_eq!(breakdown.total_cost, dec!(530));
    }

    #[test]
    fn test_compute_total_sum_of_line_items() {
        let mut sel = selection(&["A", "B"], false);
        sel.chosen_beers = beers(&[("A", &["Lager", "Stout"]), ("B", &["Ale"])]);

        let breakdown = compute_total(&sample_catalog(), &sel).unwrap();
        let sum: Decimal = breakdown.line_items.iter().map(|i| i.amount).sum();
        assert_eq!(sum, breakdown.total_cost);
        assert_eq!(breakdown.total_cost, dec!(710.50));
    }

    #[test]
    fn test_compute_total_empty_selection_is_travel_price() {
        for opt_out in [false, true] {
            let breakdown = compute_total(&sample_catalog(), &selection(&[], opt_out)).unwrap();
            assert_eq!(breakdown.total_cost, dec!(200));
            assert_eq!(breakdown.line_items.len(), 1);
        }
    }

    #[test]
    fn test_compute_total_venue_without_beers() {
        let mut sel = selection(&["A"], false);
        sel.chosen_beers.clear();

        let breakdown = compute_total(&sample_catalog(), &sel).unwrap();
        assert_eq!(breakdown.total_cost, dec!(250));
    }

    #[test]
    fn test_compute_total_is_idempotent() {
        let catalog = sample_catalog();
        let sel = selection(&["A", "B"], false);

        let first = compute_total(&catalog, &sel).unwrap();
        let second = compute_total(&catalog, &sel).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_compute_total_adding_beer_increases_by_its_price() {
        let catalog = sample_catalog();
        let sel = selection(&["A", "B"], false);
        let before = compute_total(&catalog, &sel).unwrap().total_cost;

        let mut more = sel.clone();
        more.chosen_beers
            .get_mut("A")
            .unwrap()
            .insert("Stout".to_string());
        let after = compute_total(&catalog, &more).unwrap().total_cost;

        assert_eq!(after - before, dec!(180.50));
    }

    #[test]
    fn test_compute_total_reservation_toggle_difference() {
        let catalog = sample_catalog();
        let kept = compute_total(&catalog, &selection(&["A", "B"], false)).unwrap();
        let opted_out = compute_total(&catalog, &selection(&["A", "B"], true)).unwrap();

        assert_eq!(kept.total_cost - opted_out.total_cost, dec!(80));
    }

    #[test]
    fn test_compute_total_free_travel() {
        let mut sel = selection(&[], false);
        sel.travel_choice = "Walk".to_string();

        let breakdown = compute_total(&sample_catalog(), &sel).unwrap();
        assert_eq!(breakdown.total_cost, dec!(0));
    }

    // ==================== selection error tests ====================

    #[test]
    fn test_compute_total_overflow_is_an_error() {
        let catalog = Catalog::from_parts(
            vec![Venue {
                name: "A".to_string(),
                table_fee: Decimal::MAX,
                rating: None,
                secondary_rating: None,
                beers: vec![],
            }],
            vec![TravelOption {
                name: "Cab".to_string(),
                price: Decimal::MAX,
            }],
        );
        let mut sel = selection(&["A"], false);
        sel.chosen_beers.clear();

        let err = compute_total(&catalog, &sel).unwrap_err();
        assert_eq!(err, SelectionError::TotalOverflow);

        // Without the table fee the total fits
        sel.reservation_opt_out = true;
        let breakdown = compute_total(&catalog, &sel).unwrap();
        assert_eq!(breakdown.total_cost, Decimal::MAX);
    }

    #[test]
    fn test_compute_total_unknown_travel_option() {
        let mut sel = selection(&["A"], false);
        sel.travel_choice = "Helicopter".to_string();

        let err = compute_total(&sample_catalog(), &sel).unwrap_err();
        assert_eq!(
            err,
            SelectionError::UnknownTravelOption("Helicopter".to_string())
        );
    }

    #[test]
    fn test_compute_total_unknown_venue() {
        let sel = selection(&["A", "Z"], false);

        let err = compute_total(&sample_catalog(), &sel).unwrap_err();
        assert_eq!(err, SelectionError::UnknownVenue("Z".to_string()));
    }

    #[test]
    fn test_compute_total_unknown_beer() {
        let mut sel = selection(&["B"], false);
        sel.chosen_beers = beers(&[("B", &["Lager"])]);

        let err = compute_total(&sample_catalog(), &sel).unwrap_err();
        assert_eq!(
            err,
            SelectionError::UnknownBeer {
                venue: "B".to_string(),
                beer: "Lager".to_string(),
            }
        );
    }

    #[test]
    fn test_compute_total_invalid_party_size() {
        let mut sel = selection(&["A"], false);
        sel.party_size = 0;

        let err = compute_total(&sample_catalog(), &sel).unwrap_err();
        assert_eq!(err, SelectionError::InvalidPartySize(0));
    }

    #[test]
    fn test_compute_total_too_many_venues() {
        let mut sel = selection(&[], false);
        sel.chosen_venues = ["A", "B", "C", "D", "E"]
            .iter()
            .map(|v| v.to_string())
            .collect();

        let err = compute_total(&sample_catalog(), &sel).unwrap_err();
        assert_eq!(err, SelectionError::TooManyVenues { count: 5, max: 4 });
    }

    #[test]
    fn test_compute_total_duplicate_venue() {
        let sel = selection(&["A", "A"], false);

        let err = compute_total(&sample_catalog(), &sel).unwrap_err();
        assert_eq!(err, SelectionError::DuplicateVenue("A".to_string()));
    }

    #[test]
    fn test_compute_total_beers_for_unselected_venue() {
        let mut sel = selection(&["A"], false);
        sel.chosen_beers = beers(&[("A", &["Lager"]), ("B", &["Ale"])]);

        let err = compute_total(&sample_catalog(), &sel).unwrap_err();
        assert_eq!(err, SelectionError::BeersForUnselectedVenue("B".to_string()));
    }

    #[test]
    fn test_compute_total_ignores_empty_beer_list_for_unselected_venue() {
        let mut sel = selection(&["A"], false);
        sel.chosen_beers = beers(&[("A", &["Lager"]), ("B", &[])]);

        let breakdown = compute_total(&sample_catalog(), &sel).unwrap();
        assert_eq!(breakdown.total_cost, dec!(350));
    }

    // ==================== build_booking_record tests ====================

    #[test]
    fn test_build_booking_record_copies_selection() {
        let mut sel = selection(&["A", "B"], false);
        sel.chosen_beers.insert("C".to_string(), BTreeSet::new());
        let id = Uuid::new_v4();
        let created_at = Utc.with_ymd_and_hms(2025, 2, 14, 19, 30, 0).unwrap();

        let booking = build_booking_record_at(&sel, dec!(530), id, created_at);

        assert_eq!(booking.id, id);
        assert_eq!(booking.party_size, 2);
        assert_eq!(booking.chosen_venues, vec!["A", "B"]);
        assert_eq!(booking.chosen_beers.len(), 2);
        assert_eq!(booking.chosen_beers["A"], vec!["Lager"]);
        assert_eq!(booking.travel_choice, "Cab");
        assert_eq!(booking.total_cost, dec!(530));
        assert_eq!(booking.created_at, created_at);
    }

    #[test]
    fn test_build_booking_record_generates_ids() {
        let sel = selection(&["A"], false);
        let first = build_booking_record(&sel, dec!(350));
        let second = build_booking_record(&sel, dec!(350));
        assert_ne!(first.id, second.id);
    }

    // ==================== split_per_person tests ====================

    #[test]
    fn test_split_per_person_even() {
        let result = split_per_person(dec!(530), 2, "INR");
        assert_eq!(result.per_person.amount, dec!(265));
        assert!(result.amounts.iter().all(|m| m.amount == dec!(265)));
        assert!(result.amounts.iter().all(|m| m.currency == "INR"));
    }

    #[test]
    fn test_split_per_person_with_remainder() {
        let result = split_per_person(dec!(100), 3, "INR");
        assert_eq!(result.per_person.amount, dec!(33.33));

        let total: Decimal = result.amounts.iter().map(|m| m.amount).sum();
        assert_eq!(total, dec!(100));
        assert_eq!(result.amounts[0].amount, dec!(33.34));
        assert_eq!(result.amounts[1].amount, dec!(33.33));
    }

    #[test]
    fn test_split_per_person_rounds_up_remainder() {
        // 100 / 7 = 14.29 after rounding, 7 * 14.29 = 100.03
        let result = split_per_person(dec!(100), 7, "INR");
        let total: Decimal = result.amounts.iter().map(|m| m.amount).sum();
        assert_eq!(total, dec!(100));
    }

    #[test]
    fn test_split_per_person_sub_cent_total() {
        // 3 * 33.34 = 100.02 overshoots by half a cent
        let result = split_per_person(dec!(100.015), 3, "INR");
        let total: Decimal = result.amounts.iter().map(|m| m.amount).sum();
        assert_eq!(total, dec!(100.015));
        assert_eq!(result.amounts[0].amount, dec!(33.335));
        assert_eq!(result.amounts[1].amount, dec!(33.34));

        let result = split_per_person(dec!(10.005), 1, "INR");
        assert_eq!(result.amounts[0].amount, dec!(10.005));
    }

    #[test]
    fn test_split_per_person_empty_party() {
        let result = split_per_person(dec!(100), 0, "INR");
        assert_eq!(result.per_person.amount, dec!(0));
        assert!(result.amounts.is_empty());
    }
}
