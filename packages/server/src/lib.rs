// House Price Prediction - API Core
//
// HTTP surface around the house-pricing pipeline: configuration, router,
// and the predict/health routes. All decision logic lives in house-pricing.

pub mod config;
pub mod server;

pub use config::*;
