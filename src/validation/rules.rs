// src/validation/rules.rs
//! Predefined validation rules
//!
//! A rule sees the field name and its raw value and either passes or returns
//! the message to record against the field. Plain functions with the right
//! shape are rules too, so callers can mix these with their own.

use regex::Regex;
use std::sync::LazyLock;

use crate::common::FormError;

pub type RuleResult = Result<(), String>;

/// A composable check applied to one field value.
pub trait ValidationFunc {
    fn validate(&self, field: &str, value: &str) -> RuleResult;
}

impl<F> ValidationFunc for F
where
    F: Fn(&str, &str) -> RuleResult,
{
    fn validate(&self, field: &str, value: &str) -> RuleResult {
        self(field, value)
    }
}

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email pattern")
});

pub const INVALID_INTEGER: &str = "This field must be a valid integer";
pub const INVALID_BOOLEAN: &str = "This field must be true or false";

/// Fails when the value is empty after trimming whitespace.
pub fn required(_field: &str, value: &str) -> RuleResult {
    if value.trim().is_empty() {
        return Err("This field is required".to_string());
    }
    Ok(())
}

/// Permissive address check; not RFC 5322.
pub fn email(_field: &str, value: &str) -> RuleResult {
    if !EMAIL_RE.is_match(value) {
        return Err("Please enter a valid email address".to_string());
    }
    Ok(())
}

pub fn boolean(_field: &str, value: &str) -> RuleResult {
    match parse_bool(value) {
        Some(_) => Ok(()),
        None => Err(INVALID_BOOLEAN.to_string()),
    }
}

/// Accepts `1`, `t`, `true`, `0`, `f`, `false` in any case, ignoring
/// surrounding whitespace.
pub fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "t" | "true" => Some(true),
        "0" | "f" | "false" => Some(false),
        _ => None,
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MinLength(pub usize);

/// Lengths count Unicode scalar values, not bytes.
pub fn min_length(min: usize) -> MinLength {
    MinLength(min)
}

impl ValidationFunc for MinLength {
    fn validate(&self, _field: &str, value: &str) -> RuleResult {
        if value.chars().count() < self.0 {
            return Err(format!(
                "This field must be at least {} characters long",
                self.0
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MaxLength(pub usize);

pub fn max_length(max: usize) -> MaxLength {
    MaxLength(max)
}

impl ValidationFunc for MaxLength {
    fn validate(&self, _field: &str, value: &str) -> RuleResult {
        if value.chars().count() > self.0 {
            return Err(format!("This field must not exceed {} characters", self.0));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Matches {
    regex: Regex,
    message: String,
}

/// Passes when `pattern` matches anywhere in the value. Anchor the pattern
/// to require a full match.
pub fn matches(pattern: &str, message: impl Into<String>) -> Result<Matches, FormError> {
    Ok(Matches {
        regex: Regex::new(pattern)?,
        message: message.into(),
    })
}

impl ValidationFunc for Matches {
    fn validate(&self, _field: &str, value: &str) -> RuleResult {
        if !self.regex.is_match(value) {
            return Err(self.message.clone());
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct IntRange {
    pub min: i64,
    pub max: i64,
}

/// Parses the value as a base-10 integer and checks `min <= n <= max`.
pub fn int_range(min: i64, max: i64) -> IntRange {
    IntRange { min, max }
}

impl ValidationFunc for IntRange {
    fn validate(&self, _field: &str, value: &str) -> RuleResult {
        let n: i64 = value.parse().map_err(|_| INVALID_INTEGER.to_string())?;
        if n < self.min || n > self.max {
            return Err(format!(
                "This field must be between {} and {}",
                self.min, self.max
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct InStringSlice(Vec<String>);

/// Exact, case-sensitive membership.
pub fn in_string_slice<I, S>(allowed: I) -> InStringSlice
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    InStringSlice(allowed.into_iter().map(Into::into).collect())
}

impl ValidationFunc for InStringSlice {
    fn validate(&self, _field: &str, value: &str) -> RuleResult {
        if !self.0.iter().any(|item| item == value) {
            return Err("This value is not in the allowed list".to_string());
        }
        Ok(())
    }
}

pub struct Custom<F> {
    check: F,
    message: String,
}

/// Wraps a plain value predicate; `message` is recorded verbatim on failure.
pub fn custom<F>(check: F, message: impl Into<String>) -> Custom<F>
where
    F: Fn(&str) -> bool,
{
    Custom {
        check,
        message: message.into(),
    }
}

impl<F> ValidationFunc for Custom<F>
where
    F: Fn(&str) -> bool,
{
    fn validate(&self, _field: &str, value: &str) -> RuleResult {
        if !(self.check)(value) {
            return Err(self.message.clone());
        }
        Ok(())
    }
}
