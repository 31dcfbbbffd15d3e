//! Field key to environment variable name conversion.

/// Converts a `snake_case` key into `PascalCase`.
///
/// The key is split on `_` and the first character of each component is
/// upper-cased; the rest of the component is kept as-is, so already-cased
/// input is left unchanged. Empty components produced by repeated
/// underscores contribute nothing.
///
/// ```
/// use provider_config::to_camel_case;
///
/// assert_eq!(to_camel_case("snake_case"), "SnakeCase");
/// assert_eq!(to_camel_case("a"), "A");
/// assert_eq!(to_camel_case(""), "");
/// ```
#[must_use]
pub fn to_camel_case(snake_str: &str) -> String {
    let mut out = String::with_capacity(snake_str.len());
    for component in snake_str.split('_') {
        let mut chars = component.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(chars.as_str());
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_snake_case() {
        assert_eq!(to_camel_case("snake_case"), "SnakeCase");
        assert_eq!(to_camel_case("api_token"), "ApiToken");
        assert_eq!(to_camel_case("identity_store_region"), "IdentityStoreRegion");
    }

    #[test]
    fn single_word_and_empty() {
        assert_eq!(to_camel_case("a"), "A");
        assert_eq!(to_camel_case("token"), "Token");
        assert_eq!(to_camel_case(""), "");
    }

    #[test]
    fn repeated_underscores_are_dropped() {
        assert_eq!(to_camel_case("api__token"), "ApiToken");
        assert_eq!(to_camel_case("_leading_and_trailing_"), "LeadingAndTrailing");
        assert_eq!(to_camel_case("___"), "");
    }

    #[test]
    fn idempotent_once_cased() {
        for input in ["snake_case", "a", "org_unit_id", "x_y_z"] {
            let once = to_camel_case(input);
            assert_eq!(to_camel_case(&once), once, "input {input}");
        }
    }

    #[test]
    fn capital_boundaries_recover_word_count() {
        for input in ["snake_case", "a", "org_unit_id", "one_two_three_four", "x__y"] {
            let words = input.split('_').filter(|w| !w.is_empty()).count();
            let capitals = to_camel_case(input)
                .chars()
                .filter(char::is_ascii_uppercase)
                .count();
            assert_eq!(capitals, words, "input {input}");
        }
    }
}
