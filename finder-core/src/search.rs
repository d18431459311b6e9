use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::iata::{normalize_iata, validate_iata};
use crate::ValidationError;

/// Adult passengers requested per search.
pub const ADULTS: u32 = 1;
/// Offers requested from the provider per leg.
pub const MAX_OFFERS: u32 = 5;

const ISO_DATE: &str = "%Y-%m-%d";

// ============================================================================
// Raw input
// ============================================================================

/// The four fields as they arrive from the transport, untrimmed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub origin: String,
    #[serde(default)]
    pub destination: String,
    #[serde(default)]
    pub departure_date: String,
    #[serde(default)]
    pub return_date: Option<String>,
}

// ============================================================================
// Validated request
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub origin: String,
    pub destination: String,
    pub departure_date: String,
    pub return_date: Option<String>,
}

/// One leg as sent to the provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OfferQuery {
    pub origin: String,
    pub destination: String,
    pub departure_date: String,
    pub adults: u32,
    pub max: u32,
}

impl SearchRequest {
    /// Normalizes the form and applies the checks in order, stopping at the first failure.
    pub fn from_form(form: &SearchForm) -> Result<Self, ValidationError> {
        let origin = normalize_iata(&form.origin);
        let destination = normalize_iata(&form.destination);
        if !(validate_iata(&origin) && validate_iata(&destination)) {
            return Err(ValidationError::InvalidIata);
        }

        let departure_date = form.departure_date.trim().to_string();
        if departure_date.is_empty() {
            return Err(ValidationError::MissingDepartureDate);
        }

        let return_date = form
            .return_date
            .as_deref()
            .map(str::trim)
            .filter(|date| !date.is_empty())
            .map(str::to_string);

        if let Some(ret) = &return_date {
            if return_precedes_departure(ret, &departure_date) {
                return Err(ValidationError::ReturnBeforeDeparture);
            }
        }

        Ok(Self {
            origin,
            destination,
            departure_date,
            return_date,
        })
    }

    pub fn is_round_trip(&self) -> bool {
        self.return_date.is_some()
    }

    pub fn outbound_query(&self) -> OfferQuery {
        OfferQuery::new(&self.origin, &self.destination, &self.departure_date)
    }

    /// The return leg flies the route backwards on the return date.
    pub fn return_query(&self) -> Option<OfferQuery> {
        self.return_date
            .as_deref()
            .map(|date| OfferQuery::new(&self.destination, &self.origin, date))
    }
}

impl OfferQuery {
    pub fn new(origin: &str, destination: &str, departure_date: &str) -> Self {
        Self {
            origin: origin.to_string(),
            destination: destination.to_string(),
            departure_date: departure_date.to_string(),
            adults: ADULTS,
            max: MAX_OFFERS,
        }
    }
}

/// Compares as calendar dates when both parse as `YYYY-MM-DD`.
///
/// Anything else keeps the plain string ordering, which matches calendar
/// order only for zero-padded ISO dates.
pub fn return_precedes_departure(return_date: &str, departure_date: &str) -> bool {
    match (
        NaiveDate::parse_from_str(return_date, ISO_DATE),
        NaiveDate::parse_from_str(departure_date, ISO_DATE),
    ) {
        (Ok(ret), Ok(dep)) => ret < dep,
        _ => return_date < departure_date,
    }
}
