use crate::error::ApiError;
use once_cell::sync::Lazy;
use regex::Regex;

/// Local part, `@`, then a dotted domain whose last label is alphabetic.
/// Letters and digits may be non-ASCII on both sides of the `@`.
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\p{L}\p{N}\p{M}.!#$%&'*+/=?^_`{|}~-]+@[\p{L}\p{N}](?:[\p{L}\p{N}\p{M}-]*[\p{L}\p{N}\p{M}])?(?:\.[\p{L}\p{N}](?:[\p{L}\p{N}\p{M}-]*[\p{L}\p{N}\p{M}])?)*\.\p{L}{2,}$")
        .expect("email pattern is valid")
});

/// Trims `value` and rejects it if nothing is left.
pub fn require_non_empty(field: &str, label: &str, value: &str) -> Result<String, ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation(field, format!("{label} cannot be empty")));
    }
    Ok(trimmed.to_string())
}

pub fn require_email(field: &str, value: &str) -> Result<String, ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation(field, "Email cannot be empty"));
    }
    if trimmed.len() > 254 || !EMAIL_RE.is_match(trimmed) {
        return Err(ApiError::validation(
            field,
            "value is not a valid email address",
        ));
    }
    if trimmed.split('@').next().is_some_and(|local| {
        local.starts_with('.') || local.ends_with('.') || local.contains("..")
    }) {
        return Err(ApiError::validation(
            field,
            "value is not a valid email address",
        ));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_trims_surrounding_whitespace() {
        assert_eq!(
            require_non_empty("full_name", "Full Name", "  Alice Smith ").unwrap(),
            "Alice Smith"
        );
    }

    #[test]
    fn whitespace_only_is_rejected_with_field() {
        match require_non_empty("department", "Department", " \t ") {
            Err(ApiError::Validation { field, message }) => {
                assert_eq!(field.as_deref(), Some("department"));
                assert_eq!(message, "Department cannot be empty");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn accepts_common_addresses() {
        for email in [
            "alice@x.com",
            "first.last+tag@mail.example.org",
            " bob@company.co.uk ",
            "josé@exemple.fr",
            "用户@例子.广告",
            "anna@bücher.de",
        ] {
            assert!(require_email("email", email).is_ok(), "{email}");
        }
    }

    #[test]
    fn rejects_malformed_addresses() {
        for email in [
            "",
            "alice",
            "alice@",
            "@x.com",
            "alice@x",
            "alice@@x.com",
            "al ice@x.com",
            ".alice@x.com",
            "al..ice@x.com",
            "alice@-x.com",
            "josé@exemple",
        ] {
            assert!(require_email("email", email).is_err(), "{email}");
        }
    }
}
