//! Signup form state and the submit gate.

use crate::rules::{validate_confirm_password, validate_email, validate_password, validate_username};
use crate::{Field, FieldValidation};
use serde::Serialize;

/// Shown when submission is blocked; per-field messages stay as they are.
pub const SUBMIT_BLOCKED_MESSAGE: &str = "Please fix the errors above";

/// Current values of the signup form fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SignupForm {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Verdicts for all four signup fields, in form order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SignupValidation {
    pub fields: [FieldValidation; 4],
}

impl SignupValidation {
    /// True iff every field validated.
    pub fn is_valid(&self) -> bool {
        self.fields.iter().all(|f| f.is_valid)
    }

    /// Form-level message; `None` when submission may proceed.
    pub fn submit_message(&self) -> Option<&'static str> {
        (!self.is_valid()).then_some(SUBMIT_BLOCKED_MESSAGE)
    }

    pub fn errors(&self) -> impl Iterator<Item = &FieldValidation> {
        self.fields.iter().filter(|f| !f.is_valid)
    }

    pub fn get(&self, field: Field) -> Option<&FieldValidation> {
        self.fields.iter().find(|f| f.field == field)
    }
}

impl SignupForm {
    pub fn new(
        username: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
    ) -> Self {
        Self {
            username: username.into(),
            email: email.into(),
            password: password.into(),
            confirm_password: confirm_password.into(),
        }
    }

    /// The form as submitted: username and email trimmed, passwords verbatim.
    pub fn normalized(&self) -> Self {
        Self {
            username: self.username.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            confirm_password: self.confirm_password.clone(),
        }
    }

    /// Verdict for a single field against the current values.
    pub fn validate_field(&self, field: Field) -> Option<FieldValidation> {
        match field {
            Field::Username => Some(validate_username(&self.username)),
            Field::Email => Some(validate_email(&self.email)),
            Field::Password => Some(validate_password(&self.password)),
            Field::ConfirmPassword => Some(validate_confirm_password(
                &self.confirm_password,
                &self.password,
            )),
            _ => None,
        }
    }

    /// Verdicts to refresh after `field` changed.
    ///
    /// A password edit also re-checks the confirmation once the user has
    /// typed one, so a stale "Passwords do not match" clears itself.
    pub fn on_input(&self, field: Field) -> Vec<FieldValidation> {
        let mut verdicts: Vec<FieldValidation> = self.validate_field(field).into_iter().collect();
        if field == Field::Password && !self.confirm_password.is_empty() {
            verdicts.extend(self.validate_field(Field::ConfirmPassword));
        }
        verdicts
    }

    /// Submit-time check over the normalized values.
    pub fn validate(&self) -> SignupValidation {
        let form = self.normalized();
        let validation = SignupValidation {
            fields: [
                validate_username(&form.username),
                validate_email(&form.email),
                validate_password(&form.password),
                validate_confirm_password(&form.confirm_password, &form.password),
            ],
        };

        if !validation.is_valid() {
            tracing::debug!(
                invalid = validation.errors().count(),
                "signup submission blocked"
            );
        }

        validation
    }
}
