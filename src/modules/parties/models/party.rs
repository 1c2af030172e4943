use serde::{Deserialize, Serialize};

/// A customer (payer) as the host ERP knows it
///
/// The host owns the full party record; this is the slice the gateway
/// integration needs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Party {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

impl Party {
    /// Project this party into the customer block the gateway expects
    pub fn to_customer_data(&self) -> CustomerData {
        CustomerData {
            first_name: first_name_of(&self.name),
            last_name: last_name_of(&self.name),
            company: self.name.clone(),
            email: self.email.clone(),
            phone: self.phone.clone(),
        }
    }
}

/// Billing address as the host ERP knows it
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Address {
    /// Full name on the address, e.g. "Jane van der Berg"
    pub name: Option<String>,
    pub street: Option<String>,
    pub street_extra: Option<String>,
    pub city: Option<String>,
    pub zip: Option<String>,
    /// Subdivision (state/province) display name
    pub subdivision: Option<String>,
    /// Two-letter country code
    pub country_code: Option<String>,
}

impl Address {
    /// Project this address into the billing block the gateway expects
    ///
    /// The same projection is used for billing-address submission on charges
    /// and for the billing address attached to saved cards.
    pub fn to_address_data(&self) -> AddressData {
        let name = self.name.as_deref().unwrap_or("");
        AddressData {
            first_name: first_name_of(name),
            last_name: last_name_of(name),
            street_address: self.street.clone(),
            extended_address: self.street_extra.clone(),
            locality: self.city.clone(),
            postal_code: self.zip.clone(),
            region: self.subdivision.clone(),
            country_code_alpha2: self.country_code.clone(),
        }
    }
}

/// Customer block sent to the gateway when no provider-side customer exists
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerData {
    pub first_name: String,
    pub last_name: String,
    pub company: String,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Billing address block in the gateway's field layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressData {
    pub first_name: String,
    pub last_name: String,
    pub street_address: Option<String>,
    pub extended_address: Option<String>,
    pub locality: Option<String>,
    pub postal_code: Option<String>,
    pub region: Option<String>,
    pub country_code_alpha2: Option<String>,
}

/// First space-delimited token of a full name
pub fn first_name_of(name: &str) -> String {
    name.split(' ').next().unwrap_or("").to_string()
}

/// Remainder after the last space, or the whole name when it has none
pub fn last_name_of(name: &str) -> String {
    name.rsplit(' ').next().unwrap_or("").to_string()
}
