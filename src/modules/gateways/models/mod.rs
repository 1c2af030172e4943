pub mod gateway_config;

pub use gateway_config::{BraintreeGateway, ClientConfig, GatewayEnvironment, PROVIDER};
