pub mod profile_repository;

pub use profile_repository::{find_customer_id, InMemoryProfileRepository, ProfileRepository};
