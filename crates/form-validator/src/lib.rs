//! Field-level validation for the signup and product forms.
//!
//! Validators are pure: each call maps the current field value(s) to a
//! [`FieldValidation`] verdict and keeps no history. Within a field the rules
//! run in a fixed order and the first failing rule supplies the message.

mod field;
mod product;
mod rules;
mod signup;

pub use field::{Field, FieldValidation};
pub use product::{ProductForm, ProductValidation, ValidatedProduct};
pub use rules::{
    validate_confirm_password, validate_email, validate_password, validate_username,
    PASSWORD_MAX_LEN, PASSWORD_MIN_LEN, USERNAME_MAX_LEN, USERNAME_MIN_LEN,
};
pub use signup::{SignupForm, SignupValidation, SUBMIT_BLOCKED_MESSAGE};
