use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use crate::offer::RawOffer;
use crate::search::OfferQuery;
use crate::ProviderError;

#[async_trait]
pub trait FlightSearchProvider: Send + Sync {
    /// Fetch offers for a single leg.
    async fn search_offers(&self, query: &OfferQuery) -> Result<Vec<RawOffer>, ProviderError>;
}

type Route = (String, String);

/// In-memory provider keyed by route. Unknown routes return no offers.
#[derive(Default)]
pub struct MockFlightProvider {
    responses: HashMap<Route, Result<Vec<RawOffer>, ProviderError>>,
    calls: Mutex<Vec<OfferQuery>>,
}

impl MockFlightProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_offers(mut self, origin: &str, destination: &str, offers: Vec<RawOffer>) -> Self {
        self.responses
            .insert((origin.to_string(), destination.to_string()), Ok(offers));
        self
    }

    pub fn with_error(mut self, origin: &str, destination: &str, error: ProviderError) -> Self {
        self.responses
            .insert((origin.to_string(), destination.to_string()), Err(error));
        self
    }

    /// Queries received so far, in call order.
    pub fn calls(&self) -> Vec<OfferQuery> {
        self.calls
            .lock()
            .map(|calls| calls.clone())
            .unwrap_or_default()
    }
}

#[async_trait]
impl FlightSearchProvider for MockFlightProvider {
    async fn search_offers(&self, query: &OfferQuery) -> Result<Vec<RawOffer>, ProviderError> {
        tracing::info!(
            "Mock flight search {} -> {} on {}",
            query.origin,
            query.destination,
            query.departure_date
        );

        if let Ok(mut calls) = self.calls.lock() {
            calls.push(query.clone());
        }

        let route = (query.origin.clone(), query.destination.clone());
        match self.responses.get(&route) {
            Some(response) => response.clone(),
            None => Ok(Vec::new()),
        }
    }
}
