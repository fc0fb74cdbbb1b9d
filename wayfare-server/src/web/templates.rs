//! Askama templates for the web frontend.

use std::sync::Arc;

use askama::Template;
use chrono::NaiveDate;

use crate::catalog::Catalog;
use crate::domain::TripRecord;
use crate::query::{QueryInput, SessionState, SortKey};

use super::dto::{SearchForm, is_checked};

/// Column headings of the results table, in display order.
pub const RESULT_COLUMNS: [&str; 11] = [
    "Bus Number",
    "Operator",
    "Timing",
    "Fare (INR)",
    "Ratings",
    "Duration",
    "AC",
    "Sleeper",
    "Seats",
    "From",
    "To",
];

/// The explorer page: search form plus results table.
#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub form: FormView,
    pub origins: Vec<OptionView>,
    pub destinations: Vec<OptionView>,
    pub sorts: Vec<OptionView>,
    pub columns: Vec<&'static str>,
    pub trips: Vec<TripRow>,
    /// Line shown above the table, e.g. "3 buses found"
    pub summary: Option<String>,
    pub error: Option<String>,
}

impl IndexTemplate {
    /// Build the page for the current form values and session state.
    pub fn new(catalog: &Catalog, form: FormView, state: &SessionState) -> Self {
        let origins = OptionView::places(catalog.origins(), &form.origin);
        let destinations = OptionView::places(catalog.destinations(), &form.destination);
        let sorts = OptionView::sorts(form.sort);
        let trips: Vec<TripRow> = state.trips().iter().map(|t| TripRow::from_trip(t)).collect();
        let summary = summarize(state);

        Self {
            form,
            origins,
            destinations,
            sorts,
            columns: RESULT_COLUMNS.to_vec(),
            trips,
            summary,
            error: None,
        }
    }

    /// Show an error message above the results.
    pub fn with_error(mut self, message: impl Into<String>) -> Self {
        self.error = Some(message.into());
        self
    }
}

fn summarize(state: &SessionState) -> Option<String> {
    match state {
        SessionState::All => None,
        SessionState::Filtered(trips) if trips.is_empty() => {
            Some("No buses match your search.".to_string())
        }
        SessionState::Filtered(trips) => Some(match trips.len() {
            1 => "1 bus found".to_string(),
            n => format!("{n} buses found"),
        }),
        SessionState::Reduced { by, .. } => Some(format!("Showing the {} bus", by.as_str())),
    }
}

/// Form values echoed back into the page.
#[derive(Debug, Clone, PartialEq)]
pub struct FormView {
    pub origin: String,
    pub destination: String,
    /// YYYY-MM-DD, as the date input expects
    pub date: String,
    pub ac: bool,
    pub sleeper: bool,
    pub min_rating: String,
    pub max_fare: String,
    pub sort: Option<SortKey>,
}

impl FormView {
    /// A blank form for the given date.
    pub fn blank(date: NaiveDate) -> Self {
        Self::from_input(&QueryInput::new(date))
    }

    /// The values a form was submitted with, even when its date is
    /// malformed. A blank date shows as `today`.
    pub fn from_form(form: &SearchForm, today: NaiveDate) -> Self {
        if let Ok(input) = form.to_input(today) {
            return Self::from_input(&input);
        }
        Self {
            origin: form.origin.clone(),
            destination: form.destination.clone(),
            date: form.date.clone().unwrap_or_default(),
            ac: is_checked(form.ac.as_deref()),
            sleeper: is_checked(form.sleeper.as_deref()),
            min_rating: form.min_rating.clone(),
            max_fare: form.max_fare.clone(),
            sort: form.sort.as_deref().and_then(SortKey::parse),
        }
    }

    pub fn from_input(input: &QueryInput) -> Self {
        Self {
            origin: input.origin.clone(),
            destination: input.destination.clone(),
            date: input.date.format("%Y-%m-%d").to_string(),
            ac: input.ac_only,
            sleeper: input.sleeper_only,
            min_rating: input.min_rating.clone(),
            max_fare: input.max_fare.clone(),
            sort: input.sort,
        }
    }
}

/// One `<option>` of a dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionView {
    pub value: String,
    pub label: String,
    pub selected: bool,
}

impl OptionView {
    /// Place options, led by a blank "Any" entry.
    ///
    /// A selected value missing from the catalog is still listed so the
    /// form round-trips what was submitted.
    pub fn places(places: Vec<String>, selected: &str) -> Vec<Self> {
        let mut options = vec![OptionView {
            value: String::new(),
            label: "Any".to_string(),
            selected: selected.is_empty(),
        }];

        let known = places.iter().any(|p| p == selected);
        if !selected.is_empty() && !known {
            options.push(OptionView {
                value: selected.to_string(),
                label: selected.to_string(),
                selected: true,
            });
        }

        options.extend(places.into_iter().map(|place| OptionView {
            selected: place == selected,
            label: place.clone(),
            value: place,
        }));
        options
    }

    /// Sort options, led by "Unsorted".
    pub fn sorts(selected: Option<SortKey>) -> Vec<Self> {
        let mut options = vec![OptionView {
            value: String::new(),
            label: "Unsorted".to_string(),
            selected: selected.is_none(),
        }];
        options.extend(SortKey::ALL.into_iter().map(|key| OptionView {
            value: key.as_str().to_string(),
            label: key.label().to_string(),
            selected: selected == Some(key),
        }));
        options
    }
}

/// Results table row, one cell per [`RESULT_COLUMNS`] entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TripRow {
    pub bus_number: String,
    pub operator: String,
    pub timing: String,
    pub fare: String,
    pub rating: String,
    pub duration: String,
    pub ac: String,
    pub sleeper: String,
    pub seats: String,
    pub from: String,
    pub to: String,
}

impl TripRow {
    /// Cells show the catalog text as listed.
    pub fn from_trip(trip: &Arc<TripRecord>) -> Self {
        Self {
            bus_number: trip.bus_number.clone(),
            operator: trip.operator_name.clone(),
            timing: trip.departure_time.clone(),
            fare: trip.fare.clone(),
            rating: trip.rating.clone(),
            duration: trip.duration.clone(),
            ac: trip.air_conditioned.clone(),
            sleeper: trip.sleeper.clone(),
            seats: trip.seats.clone(),
            from: trip.departure_point.clone(),
            to: trip.arrival_point.clone(),
        }
    }
}
