pub mod datetime;
pub mod iata;
pub mod offer;
pub mod provider;
pub mod search;
pub mod service;

pub use datetime::format_datetime;
pub use iata::validate_iata;
pub use offer::{format_offers, FormattedOffer, FormattedSegment, RawOffer};
pub use provider::{FlightSearchProvider, MockFlightProvider};
pub use search::{OfferQuery, SearchForm, SearchRequest};
pub use service::{find_flights, SearchResults};

/// Shown when the outbound leg comes back without offers.
pub const NO_FLIGHTS_MESSAGE: &str = "No flights found. Try different dates or locations.";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Invalid IATA codes.")]
    InvalidIata,
    #[error("Please select a departure date.")]
    MissingDepartureDate,
    #[error("Return date cannot be before departure date.")]
    ReturnBeforeDeparture,
}

/// Failure reported by a flight-search provider.
///
/// `Display` is the bare detail; callers add their own prefix.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    #[error("{detail}")]
    Api { status: u16, detail: String },
    #[error("network failure: {0}")]
    Network(String),
    #[error("unexpected response: {0}")]
    Decode(String),
    #[error("authentication failed: {0}")]
    Auth(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("API error: {0}")]
    Provider(#[from] ProviderError),
}

pub type CoreResult<T> = Result<T, SearchError>;
