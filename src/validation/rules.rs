use std::collections::BTreeMap;
use std::sync::OnceLock;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use regex::Regex;

use crate::models::user::{ADMIN_ROLE, USER_ROLE};

/// Field name to its first failing message.
pub type FieldErrors = BTreeMap<String, String>;

#[derive(Debug, Clone, PartialEq)]
pub enum RuleKind {
    Required,
    MinLength(usize),
    MaxLength(usize),
    Email,
    /// 3 to 50 characters of letters, digits and underscores.
    LoginId,
    /// 8 to 100 characters with a lowercase, an uppercase, a digit and a symbol.
    Password,
    /// 2 to 50 characters once trimmed.
    UserName,
    Role,
    /// Korean mobile number; dashes are ignored.
    Phone,
    NumberRange { min: f64, max: f64 },
    DateFormat,
}

/// A check with an optional custom message.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub kind: RuleKind,
    pub message: Option<String>,
}

impl From<RuleKind> for Rule {
    fn from(kind: RuleKind) -> Self {
        Self {
            kind,
            message: None,
        }
    }
}

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"))
}

fn login_id_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-zA-Z0-9_]+$").expect("login id regex"))
}

fn phone_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^01[0-9][0-9]{4}[0-9]{4}$").expect("phone regex"))
}

const PASSWORD_SYMBOLS: &str = "!@#$%^&*(),.?\":{}|<>";

fn is_date(value: &str) -> bool {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").is_ok()
        || NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S").is_ok()
        || NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M").is_ok()
        || DateTime::parse_from_rfc3339(value).is_ok()
}

impl Rule {
    pub fn required() -> Self {
        RuleKind::Required.into()
    }

    pub fn min_length(min: usize) -> Self {
        RuleKind::MinLength(min).into()
    }

    pub fn max_length(max: usize) -> Self {
        RuleKind::MaxLength(max).into()
    }

    pub fn email() -> Self {
        RuleKind::Email.into()
    }

    pub fn login_id() -> Self {
        RuleKind::LoginId.into()
    }

    pub fn password() -> Self {
        RuleKind::Password.into()
    }

    pub fn user_name() -> Self {
        RuleKind::UserName.into()
    }

    pub fn role() -> Self {
        RuleKind::Role.into()
    }

    pub fn phone() -> Self {
        RuleKind::Phone.into()
    }

    pub fn number_range(min: f64, max: f64) -> Self {
        RuleKind::NumberRange { min, max }.into()
    }

    pub fn date_format() -> Self {
        RuleKind::DateFormat.into()
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    fn fail(&self, default: String) -> Option<String> {
        Some(self.message.clone().unwrap_or(default))
    }

    /// The error message for `value`, or `None` when it passes. Empty
    /// values pass everything except [`RuleKind::Required`].
    pub fn check(&self, value: &str) -> Option<String> {
        if value.is_empty() {
            return match self.kind {
                RuleKind::Required => self.fail("This field is required.".to_string()),
                _ => None,
            };
        }

        let length = value.chars().count();
        match &self.kind {
            RuleKind::Required => {
                if value.trim().is_empty() {
                    return self.fail("This field is required.".to_string());
                }
                None
            }
            RuleKind::MinLength(min) if length < *min => {
                self.fail(format!("Enter at least {} characters.", min))
            }
            RuleKind::MaxLength(max) if length > *max => {
                self.fail(format!("Enter at most {} characters.", max))
            }
            RuleKind::MinLength(_) | RuleKind::MaxLength(_) => None,
            RuleKind::Email if !email_regex().is_match(value) => {
                self.fail("Invalid email address.".to_string())
            }
            RuleKind::Email => None,
            RuleKind::LoginId => {
                if !(3..=50).contains(&length) {
                    // Length is reported with a fixed message.
                    return Some("Login ID must be 3-50 characters long.".to_string());
                }
                if login_id_regex().is_match(value) {
                    return None;
                }
                self.fail(
                    "Login ID may only contain letters, digits and underscores.".to_string(),
                )
            }
            RuleKind::Password => {
                if !(8..=100).contains(&length) {
                    return Some("Password must be 8-100 characters long.".to_string());
                }
                let has_lower = value.chars().any(|c| c.is_ascii_lowercase());
                let has_upper = value.chars().any(|c| c.is_ascii_uppercase());
                let has_digit = value.chars().any(|c| c.is_ascii_digit());
                let has_symbol = value.chars().any(|c| PASSWORD_SYMBOLS.contains(c));
                if has_lower && has_upper && has_digit && has_symbol {
                    return None;
                }
                self.fail(
                    "Password needs an uppercase letter, a lowercase letter, a digit and a symbol."
                        .to_string(),
                )
            }
            RuleKind::UserName => {
                let trimmed = value.trim().chars().count();
                if (2..=50).contains(&trimmed) {
                    return None;
                }
                self.fail("User name must be 2-50 characters long.".to_string())
            }
            RuleKind::Role => {
                if value == USER_ROLE || value == ADMIN_ROLE {
                    return None;
                }
                self.fail("Select a valid role.".to_string())
            }
            RuleKind::Phone => {
                if phone_regex().is_match(&value.replace('-', "")) {
                    return None;
                }
                self.fail("Invalid phone number.".to_string())
            }
            RuleKind::NumberRange { min, max } => match value.trim().parse::<f64>() {
                Err(_) => Some("Enter a number.".to_string()),
                Ok(n) if n.is_nan() => Some("Enter a number.".to_string()),
                Ok(n) if n < *min || n > *max => {
                    self.fail(format!("Enter a number between {} and {}.", min, max))
                }
                Ok(_) => None,
            },
            RuleKind::DateFormat => {
                if is_date(value.trim()) {
                    return None;
                }
                self.fail("Invalid date.".to_string())
            }
        }
    }
}

/// The first failing rule's message.
pub fn validate(value: &str, rules: &[Rule]) -> Option<String> {
    rules.iter().find_map(|rule| rule.check(value))
}

/// Validate every field that has rules. Missing fields validate as empty.
pub fn validate_form(form: &BTreeMap<String, String>, rules: &BTreeMap<String, Vec<Rule>>) -> FieldErrors {
    rules
        .iter()
        .filter_map(|(field, field_rules)| {
            let value = form.get(field).map(String::as_str).unwrap_or("");
            validate(value, field_rules).map(|error| (field.clone(), error))
        })
        .collect()
}

pub fn is_form_valid(errors: &FieldErrors) -> bool {
    errors.is_empty()
}
