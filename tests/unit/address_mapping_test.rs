// Property tests for the name splitting and address projection rules.

use braintree_payments::parties::models::{first_name_of, last_name_of, Address, Party};
use proptest::prelude::*;

proptest! {
    #[test]
    fn name_parts_are_space_free(name in "[a-zA-Z ]{0,60}") {
        prop_assert!(!first_name_of(&name).contains(' '));
        prop_assert!(!last_name_of(&name).contains(' '));
    }

    #[test]
    fn single_token_fills_both_parts(token in "[a-zA-Z]{1,30}") {
        prop_assert_eq!(first_name_of(&token), token.clone());
        prop_assert_eq!(last_name_of(&token), token);
    }

    #[test]
    fn parts_come_from_the_ends(
        first in "[a-zA-Z]{1,20}",
        middle in "[a-zA-Z ]{0,30}",
        last in "[a-zA-Z]{1,20}",
    ) {
        let name = format!("{} {} {}", first, middle.trim(), last);
        prop_assert_eq!(first_name_of(&name), first);
        prop_assert_eq!(last_name_of(&name), last);
    }

    #[test]
    fn customer_projection_preserves_contact_details(
        name in "[a-zA-Z]{1,20}( [a-zA-Z]{1,20})?",
        email in proptest::option::of("[a-z]{1,10}@example\\.com"),
    ) {
        let party = Party {
            id: "party-1".to_string(),
            name: name.clone(),
            email: email.clone(),
            phone: None,
        };

        let customer = party.to_customer_data();
        prop_assert_eq!(customer.company, name);
        prop_assert_eq!(customer.email, email);
    }
}

#[test]
fn address_projection_maps_every_field() {
    let address = Address {
        name: Some("Jane van der Berg".to_string()),
        street: Some("1 Main St".to_string()),
        street_extra: Some("Apt 2".to_string()),
        city: Some("Springfield".to_string()),
        zip: Some("12345".to_string()),
        subdivision: Some("Ohio".to_string()),
        country_code: Some("US".to_string()),
    };

    let data = address.to_address_data();
    assert_eq!(data.first_name, "Jane");
    assert_eq!(data.last_name, "Berg");
    assert_eq!(data.street_address.as_deref(), Some("1 Main St"));
    assert_eq!(data.extended_address.as_deref(), Some("Apt 2"));
    assert_eq!(data.locality.as_deref(), Some("Springfield"));
    assert_eq!(data.postal_code.as_deref(), Some("12345"));
    assert_eq!(data.region.as_deref(), Some("Ohio"));
    assert_eq!(data.country_code_alpha2.as_deref(), Some("US"));
}
