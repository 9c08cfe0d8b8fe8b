//! Form input validation.

pub mod form;
pub mod rules;

pub use form::FormState;
pub use rules::{is_form_valid, validate, validate_form, FieldErrors, Rule, RuleKind};
