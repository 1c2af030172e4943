pub mod models;
pub mod repositories;
pub mod services;

pub use models::{Address, Party, PaymentProfile};
pub use repositories::{InMemoryProfileRepository, ProfileRepository};
pub use services::ProfileService;
