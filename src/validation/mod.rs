// src/validation/mod.rs
//! Field validation: rules, the error map, and the per-request validator

pub mod errors;
pub mod rules;
pub mod validator;

#[cfg(test)]
mod tests;

pub use errors::FieldErrors;
pub use rules::{
    boolean, custom, email, in_string_slice, int_range, matches, max_length, min_length,
    parse_bool, required, RuleResult, ValidationFunc,
};
pub use validator::Validator;
