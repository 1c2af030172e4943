/// Raw card input from a UI flow
///
/// Transient: never serialized, never persisted. The Debug impl redacts the
/// PAN and security code so the struct can appear in traces.
#[derive(Clone)]
pub struct CardInput {
    pub number: String,
    pub expiry_month: String,
    pub expiry_year: String,
    pub csc: String,

    /// Cardholder name, when the UI collected one
    pub owner: Option<String>,
}

impl std::fmt::Debug for CardInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let last4 = if self.number.len() >= 4 {
            &self.number[self.number.len() - 4..]
        } else {
            ""
        };
        f.debug_struct("CardInput")
            .field("number", &format!("****{}", last4))
            .field("expiry_month", &self.expiry_month)
            .field("expiry_year", &self.expiry_year)
            .field("csc", &"***")
            .field("owner", &self.owner)
            .finish()
    }
}
