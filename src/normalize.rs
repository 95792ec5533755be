use std::collections::HashSet;

use crate::error::{SchemaError, SchemaResult};

/// Strips every character that is not an ASCII letter or digit.
///
/// The release files use inconsistent punctuation and spacing in their
/// header lines, so column names are reduced to the characters that are
/// safe in SQL identifiers. An input with no usable characters yields an
/// empty string; [`clean_headers`] turns that into an error.
pub fn clean_header(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_alphanumeric).collect()
}

/// Cleans a whole header row and validates the result.
///
/// Validation is eager: downstream stages index columns by position and
/// rely on every name being unique and non-empty.
pub fn clean_headers<S: AsRef<str>>(raw: &[S]) -> SchemaResult<Vec<String>> {
    let mut seen = HashSet::new();
    let mut cleaned = Vec::with_capacity(raw.len());
    for header in raw {
        let name = clean_header(header.as_ref());
        if name.is_empty() {
            return Err(SchemaError::EmptyHeader(header.as_ref().to_string()));
        }
        if !seen.insert(name.clone()) {
            return Err(SchemaError::DuplicateHeader(name));
        }
        cleaned.push(name);
    }
    Ok(cleaned)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_header_strips_punctuation_and_whitespace() {
        assert_eq!(clean_header("Route Inf."), "RouteInf");
        assert_eq!(clean_header("state_num"), "statenum");
        assert_eq!(clean_header("AOU"), "AOU");
        assert_eq!(clean_header("!!!"), "");
    }

    #[test]
    fn clean_headers_rejects_collisions() {
        let err = clean_headers(&["A B", "A-B"]).unwrap_err();
        assert_eq!(err, SchemaError::DuplicateHeader("AB".to_string()));
    }

    #[test]
    fn clean_headers_rejects_empty_results() {
        let err = clean_headers(&["---"]).unwrap_err();
        assert_eq!(err, SchemaError::EmptyHeader("---".to_string()));
    }
}
