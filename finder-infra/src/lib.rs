pub mod amadeus;
pub mod app_config;

pub use amadeus::AmadeusClient;
pub use app_config::Config;
