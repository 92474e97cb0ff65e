//! Tests for validation module
//!
//! These tests verify:
//! - Each predefined rule and its message
//! - First-failure-wins evaluation in the typed accessors
//! - Integer and boolean coercion precedence
//! - Image validation through the validator

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::uploads::{image_config, UploadedFile, MB};
    use std::cell::Cell;
    use std::collections::HashMap;

    const JPEG_BYTES: &[u8] = &[
        0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46, 0x00, 0x01, 0x01, 0x01, 0x00,
        0x48, 0x00, 0x48, 0x00, 0x00, 0xFF, 0xDB, 0x00, 0x43, 0x00, 0xFF, 0xD9,
    ];

    // ============================================================================
    // Rule Tests
    // ============================================================================

    #[test]
    fn test_required() {
        assert!(required("name", "John").is_ok());
        assert!(required("name", "  x ").is_ok());
        assert_eq!(
            required("name", "").unwrap_err(),
            "This field is required"
        );
        assert!(required("name", " \t\n").is_err());
    }

    #[test]
    fn test_min_length_counts_characters() {
        let rule = min_length(3);
        assert!(rule.validate("f", "abc").is_ok());
        assert!(rule.validate("f", "日本語").is_ok());
        assert_eq!(
            rule.validate("f", "jo").unwrap_err(),
            "This field must be at least 3 characters long"
        );
    }

    #[test]
    fn test_max_length_counts_characters() {
        let rule = max_length(3);
        assert!(rule.validate("f", "äöü").is_ok());
        assert_eq!(
            rule.validate("f", "abcd").unwrap_err(),
            "This field must not exceed 3 characters"
        );
    }

    #[test]
    fn test_email() {
        assert!(email("email", "test@example.com").is_ok());
        assert!(email("email", "first.last+tag@sub.example.co").is_ok());
        assert_eq!(
            email("email", "invalid-email").unwrap_err(),
            "Please enter a valid email address"
        );
        assert!(email("email", "user@example.c").is_err());
        assert!(email("email", " test@example.com").is_err());
    }

    #[test]
    fn test_matches_is_substring_search() {
        let rule = matches(r"\d+", "Needs a number").expect("valid pattern");
        assert!(rule.validate("f", "abc123def").is_ok());
        assert_eq!(rule.validate("f", "abc").unwrap_err(), "Needs a number");

        let anchored = matches(r"^\d+$", "Digits only").expect("valid pattern");
        assert!(anchored.validate("f", "abc123").is_err());
    }

    #[test]
    fn test_matches_rejects_bad_pattern() {
        assert!(matches(r"(unclosed", "never used").is_err());
    }

    #[test]
    fn test_boolean() {
        for ok in ["true", "FALSE", " t ", "F", "1", "0", "True"] {
            assert!(boolean("flag", ok).is_ok(), "expected {:?} to pass", ok);
        }
        for bad in ["yes", "no", "", "2", "tru"] {
            assert_eq!(
                boolean("flag", bad).unwrap_err(),
                "This field must be true or false"
            );
        }
    }

    #[test]
    fn test_in_string_slice() {
        let rule = in_string_slice(["apple", "banana", "orange"]);
        assert!(rule.validate("fruit", "apple").is_ok());
        assert_eq!(
            rule.validate("fruit", "grape").unwrap_err(),
            "This value is not in the allowed list"
        );
        assert!(rule.validate("fruit", "Apple").is_err());
    }

    #[test]
    fn test_custom() {
        let rule = custom(|v| v.starts_with("ok"), "Must start with ok");
        assert!(rule.validate("f", "okay").is_ok());
        assert_eq!(rule.validate("f", "nope").unwrap_err(), "Must start with ok");
    }

    #[test]
    fn test_int_range() {
        let rule = int_range(1, 10);
        assert!(rule.validate("n", "1").is_ok());
        assert!(rule.validate("n", "10").is_ok());
        assert_eq!(
            rule.validate("n", "11").unwrap_err(),
            "This field must be between 1 and 10"
        );
        assert_eq!(
            rule.validate("n", "ten").unwrap_err(),
            "This field must be a valid integer"
        );
    }

    #[test]
    fn test_plain_function_is_a_rule() {
        fn no_spaces(_field: &str, value: &str) -> RuleResult {
            if value.contains(' ') {
                return Err("No spaces allowed".to_string());
            }
            Ok(())
        }

        let mut v = Validator::new();
        v.set_value("slug", "a b");
        v.string("slug", &[&required, &no_spaces]);
        assert_eq!(v.errors.get("slug"), Some("No spaces allowed"));
    }

    // ============================================================================
    // Validator Tests
    // ============================================================================

    #[test]
    fn test_new_validator_is_empty() {
        let v = Validator::new();
        assert!(v.valid());
        assert!(v.errors.is_empty());
        assert_eq!(v.get_value("missing"), "");
        assert!(v.get_file("missing").is_none());
    }

    #[test]
    fn test_set_and_get() {
        let mut v = Validator::new();
        v.set_value("name", "John");
        v.set_value("name", "Jane");
        v.set_file("avatar", UploadedFile::from_bytes("a.jpg", JPEG_BYTES));

        assert_eq!(v.get_value("name"), "Jane");
        assert_eq!(v.get_file("avatar").map(|f| f.size), Some(27));
    }

    #[test]
    fn test_from_parts() {
        let values = HashMap::from([("name".to_string(), "John Doe".to_string())]);
        let files = HashMap::from([(
            "avatar".to_string(),
            UploadedFile::from_bytes("a.jpg", JPEG_BYTES),
        )]);

        let v = Validator::from_parts(values, files);
        assert_eq!(v.get_value("name"), "John Doe");
        assert!(v.get_file("avatar").is_some());
    }

    fn run_string(
        field: &str,
        value: &str,
        validations: &[&dyn ValidationFunc],
    ) -> (String, Option<String>) {
        let mut v = Validator::new();
        v.set_value(field, value);
        let got = v.string(field, validations);
        (got, v.errors.get(field).map(str::to_string))
    }

    #[test]
    fn test_string_cases() {
        assert_eq!(run_string("name", "John", &[&required]), ("John".to_string(), None));
        assert_eq!(
            run_string("name", "", &[&required]),
            ("".to_string(), Some("This field is required".to_string()))
        );
        assert_eq!(
            run_string("email", "test@example.com", &[&email]).1,
            None
        );
        assert_eq!(
            run_string("email", "invalid-email", &[&email]).1.as_deref(),
            Some("Please enter a valid email address")
        );
        assert_eq!(
            run_string("username", "johndoe", &[&min_length(3), &max_length(10)]).1,
            None
        );
        assert_eq!(
            run_string("username", "jo", &[&min_length(3)]),
            (
                "jo".to_string(),
                Some("This field must be at least 3 characters long".to_string())
            )
        );
    }

    #[test]
    fn test_string_stops_at_first_failure() {
        let later_calls = Cell::new(0);
        let counting = custom(
            |_| {
                later_calls.set(later_calls.get() + 1);
                false
            },
            "should never be recorded",
        );

        let mut v = Validator::new();
        v.set_value("name", "  ");
        v.string("name", &[&required, &min_length(5), &counting]);

        assert_eq!(v.errors.get("name"), Some("This field is required"));
        assert_eq!(later_calls.get(), 0);
    }

    #[test]
    fn test_later_call_may_overwrite() {
        let mut v = Validator::new();
        v.set_value("name", "jo");
        v.string("name", &[&min_length(3)]);
        v.string("name", &[&max_length(1)]);

        assert_eq!(
            v.errors.get("name"),
            Some("This field must not exceed 1 characters")
        );
        assert_eq!(v.errors.len(), 1);
    }

    #[test]
    fn test_int() {
        let mut v = Validator::new();
        v.set_value("age", "25");
        assert_eq!(v.int("age", &[]), 25);
        assert!(v.valid());

        let mut v = Validator::new();
        v.set_value("age", "not-a-number");
        assert_eq!(v.int("age", &[]), 0);
        assert_eq!(v.errors.get("age"), Some("This field must be a valid integer"));
    }

    #[test]
    fn test_int_parse_failure_overrides_rule_error() {
        let mut v = Validator::new();
        v.int("age", &[&required]);
        assert_eq!(v.errors.get("age"), Some("This field must be a valid integer"));
    }

    #[test]
    fn test_int_keeps_rule_error_when_parse_succeeds() {
        let mut v = Validator::new();
        v.set_value("age", "7");
        let age = v.int("age", &[&int_range(13, 120)]);

        assert_eq!(age, 7);
        assert_eq!(v.errors.get("age"), Some("This field must be between 13 and 120"));
    }

    #[test]
    fn test_bool() {
        let mut v = Validator::new();
        v.set_value("terms", " TRUE ");
        v.set_value("news", "maybe");

        assert!(v.bool("terms", &[]));
        assert!(!v.bool("news", &[]));
        assert_eq!(v.errors.get("news"), Some("This field must be true or false"));
        assert!(!v.errors.contains("terms"));
    }

    #[test]
    fn test_check() {
        let mut v = Validator::new();
        v.check(true, "terms", "ignored");
        assert!(v.valid());

        v.check(false, "terms", "You must accept the terms");
        assert_eq!(v.errors.get("terms"), Some("You must accept the terms"));
    }

    #[test]
    fn test_valid_is_idempotent() {
        let mut v = Validator::new();
        v.check(false, "x", "bad");
        assert_eq!(v.valid(), v.valid());
        assert!(!v.valid());
    }

    #[test]
    fn test_image_valid_jpeg() {
        let mut v = Validator::new();
        v.set_file("avatar", UploadedFile::from_bytes("test.jpg", JPEG_BYTES));

        let file = v.image("avatar", &image_config(MB, &[]));
        assert!(file.is_some());
        assert!(!v.errors.contains("avatar"));
    }

    #[test]
    fn test_image_invalid_extension() {
        let mut v = Validator::new();
        v.set_file(
            "avatar",
            UploadedFile::from_bytes("test.txt", b"text content".to_vec()),
        );

        let file = v.image("avatar", &image_config(MB, &[]));
        assert!(file.is_none());
        assert_eq!(
            v.errors.get("avatar"),
            Some("Invalid file extension. Allowed: .jpg, .jpeg, .jpg, .jpeg, .png, .gif, .webp")
        );
    }

    #[test]
    fn test_image_missing_file() {
        let mut v = Validator::new();
        assert!(v.image("avatar", &image_config(MB, &[])).is_none());
        assert_eq!(v.errors.get("avatar"), Some("No file was uploaded"));
    }

    #[test]
    fn test_errors_serialize_as_object() {
        let mut v = Validator::new();
        v.check(false, "name", "This field is required");

        let json = serde_json::to_value(&v.errors).expect("serializable");
        assert_eq!(json, serde_json::json!({ "name": "This field is required" }));
        assert_eq!(v.errors.summary(), "name: This field is required");
    }
}
