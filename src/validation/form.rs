use std::collections::{BTreeMap, BTreeSet};

use super::rules::{validate, validate_form, FieldErrors, Rule};

/// Values, errors and touched flags of one form.
#[derive(Debug, Clone, Default)]
pub struct FormState {
    initial: BTreeMap<String, String>,
    values: BTreeMap<String, String>,
    rules: BTreeMap<String, Vec<Rule>>,
    errors: FieldErrors,
    touched: BTreeSet<String>,
}

impl FormState {
    pub fn new(initial: BTreeMap<String, String>, rules: BTreeMap<String, Vec<Rule>>) -> Self {
        Self {
            values: initial.clone(),
            initial,
            rules,
            errors: FieldErrors::new(),
            touched: BTreeSet::new(),
        }
    }

    pub fn value(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or("")
    }

    pub fn values(&self) -> &BTreeMap<String, String> {
        &self.values
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn is_touched(&self, field: &str) -> bool {
        self.touched.contains(field)
    }

    /// Re-check one field. Fields without rules are left alone.
    pub fn validate_field(&mut self, field: &str) {
        let Some(rules) = self.rules.get(field) else {
            return;
        };
        match validate(self.value(field), rules) {
            Some(error) => {
                self.errors.insert(field.to_string(), error);
            }
            None => {
                self.errors.remove(field);
            }
        }
    }

    /// Re-check every field, replacing all errors. Returns whether the form is valid.
    pub fn validate_form(&mut self) -> bool {
        self.errors = validate_form(&self.values, &self.rules);
        self.errors.is_empty()
    }

    pub fn touch_field(&mut self, field: &str) {
        self.touched.insert(field.to_string());
    }

    pub fn clear_field_error(&mut self, field: &str) {
        self.errors.remove(field);
    }

    pub fn clear_errors(&mut self) {
        self.errors.clear();
    }

    /// Restore the initial values; fields added later become empty.
    pub fn reset_form(&mut self) {
        for (field, value) in self.values.iter_mut() {
            *value = self.initial.get(field).cloned().unwrap_or_default();
        }
        self.clear_errors();
        self.touched.clear();
    }

    /// The error to display, only once the user has touched the field.
    pub fn field_error(&self, field: &str) -> Option<&str> {
        if !self.is_touched(field) {
            return None;
        }
        self.errors.get(field).map(String::as_str)
    }

    pub fn handle_input(&mut self, field: &str, value: impl Into<String>) {
        self.values.insert(field.to_string(), value.into());
        self.touch_field(field);
        self.validate_field(field);
    }

    pub fn handle_blur(&mut self, field: &str) {
        self.touch_field(field);
        self.validate_field(field);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signup_form() -> FormState {
        let mut initial = BTreeMap::new();
        initial.insert("loginId".to_string(), String::new());
        initial.insert("password".to_string(), String::new());
        let mut rules = BTreeMap::new();
        rules.insert("loginId".to_string(), vec![Rule::required(), Rule::login_id()]);
        rules.insert("password".to_string(), vec![Rule::required(), Rule::password()]);
        FormState::new(initial, rules)
    }

    #[test]
    fn test_errors_show_only_for_touched_fields() {
        let mut form = signup_form();
        assert!(!form.validate_form());
        assert_eq!(form.errors().len(), 2);
        assert_eq!(form.field_error("loginId"), None);

        form.handle_blur("loginId");
        assert_eq!(form.field_error("loginId"), Some("This field is required."));

        form.handle_input("loginId", "kim_01");
        assert_eq!(form.field_error("loginId"), None);
        assert!(!form.is_valid());

        form.handle_input("password", "Passw0rd!");
        assert!(form.is_valid());
    }

    #[test]
    fn test_reset_restores_initial_state() {
        let mut form = signup_form();
        form.handle_input("loginId", "x");
        form.handle_input("nickname", "kim");
        assert!(!form.is_valid());

        form.reset_form();
        assert_eq!(form.value("loginId"), "");
        assert_eq!(form.value("nickname"), "");
        assert!(form.is_valid());
        assert!(!form.is_touched("loginId"));
    }
}
