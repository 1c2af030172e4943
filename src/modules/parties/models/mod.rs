pub mod party;
pub mod payment_profile;

pub use party::{first_name_of, last_name_of, Address, AddressData, CustomerData, Party};
pub use payment_profile::PaymentProfile;
