use bbs_loader::error::SchemaError;
use bbs_loader::normalize::{clean_header, clean_headers};
use proptest::prelude::*;

#[test]
fn keeps_only_ascii_letters_and_digits() {
    assert_eq!(clean_header("English_Common_Name"), "EnglishCommonName");
    assert_eq!(clean_header("Route #"), "Route");
    assert_eq!(clean_header("50-Stop"), "50Stop");
    assert_eq!(clean_header("\u{e9}t\u{e9}"), "tt");
}

#[test]
fn empty_result_is_observable_not_coerced() {
    assert_eq!(clean_header("!!!"), "");
}

#[test]
fn rejects_headers_that_clean_to_nothing() {
    let err = clean_headers(&["!!!"]).unwrap_err();
    assert_eq!(err, SchemaError::EmptyHeader("!!!".to_string()));
}

#[test]
fn rejects_colliding_headers() {
    let err = clean_headers(&["A B", "A-B"]).unwrap_err();
    assert_eq!(err, SchemaError::DuplicateHeader("AB".to_string()));
}

#[test]
fn preserves_order_of_valid_headers() {
    let cleaned = clean_headers(&["Seq.", "AOU", "Common Name"]).expect("clean");
    assert_eq!(
        cleaned,
        vec!["Seq".to_string(), "AOU".to_string(), "CommonName".to_string()]
    );
}

proptest! {
    #[test]
    fn cleaning_is_idempotent(raw in ".*") {
        let once = clean_header(&raw);
        prop_assert_eq!(clean_header(&once), once);
    }

    #[test]
    fn output_is_ascii_alphanumeric_only(raw in ".*") {
        prop_assert!(clean_header(&raw).chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn output_is_an_ordered_subsequence_of_the_input(raw in ".*") {
        let cleaned = clean_header(&raw);
        let mut input = raw.chars();
        for c in cleaned.chars() {
            prop_assert!(input.any(|i| i == c));
        }
    }
}
