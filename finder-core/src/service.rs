use serde::Serialize;

use crate::offer::{format_offers, FormattedOffer};
use crate::provider::FlightSearchProvider;
use crate::search::{SearchForm, SearchRequest};
use crate::CoreResult;

#[derive(Debug, Clone, Default, Serialize)]
pub struct SearchResults {
    pub outbound: Vec<FormattedOffer>,
    pub return_flights: Vec<FormattedOffer>,
}

impl SearchResults {
    /// Whether there is anything to show. Only the outbound leg counts.
    pub fn has_outbound(&self) -> bool {
        !self.outbound.is_empty()
    }
}

/// Validate the form, query both legs, and normalize the offers.
///
/// A validation failure returns before the provider is called. When a return
/// date is present both legs are fetched concurrently, and either failing
/// fails the whole search.
pub async fn find_flights(
    provider: &dyn FlightSearchProvider,
    form: &SearchForm,
) -> CoreResult<SearchResults> {
    let request = SearchRequest::from_form(form)?;
    tracing::info!(
        "Searching flights {} -> {} departing {} returning {:?}",
        request.origin,
        request.destination,
        request.departure_date,
        request.return_date
    );

    let outbound_query = request.outbound_query();
    let (outbound, inbound) = match request.return_query() {
        Some(return_query) => tokio::try_join!(
            provider.search_offers(&outbound_query),
            provider.search_offers(&return_query)
        )?,
        None => (provider.search_offers(&outbound_query).await?, Vec::new()),
    };

    let results = SearchResults {
        outbound: format_offers(&outbound),
        return_flights: format_offers(&inbound),
    };
    tracing::info!(
        "Found {} outbound and {} return offers",
        results.outbound.len(),
        results.return_flights.len()
    );

    Ok(results)
}
