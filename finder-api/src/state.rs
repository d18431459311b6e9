use finder_core::FlightSearchProvider;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn FlightSearchProvider>,
}

impl AppState {
    pub fn new(provider: Arc<dyn FlightSearchProvider>) -> Self {
        Self { provider }
    }
}
