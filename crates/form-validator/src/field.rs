//! Field identifiers and the per-field verdict.

use serde::Serialize;
use std::fmt;

/// Form fields the validators know about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Username,
    Email,
    Password,
    ConfirmPassword,
    Title,
    Description,
    Category,
    Price,
    ImageUrl,
}

impl Field {
    /// Human-readable label used in prompts.
    pub fn label(self) -> &'static str {
        match self {
            Field::Username => "Username",
            Field::Email => "Email",
            Field::Password => "Password",
            Field::ConfirmPassword => "Confirm password",
            Field::Title => "Title",
            Field::Description => "Description",
            Field::Category => "Category",
            Field::Price => "Price",
            Field::ImageUrl => "Image URL",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Verdict for one field: valid, or invalid with the message to show.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldValidation {
    pub field: Field,
    pub is_valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl FieldValidation {
    pub fn valid(field: Field) -> Self {
        Self {
            field,
            is_valid: true,
            message: None,
        }
    }

    pub fn invalid(field: Field, message: impl Into<String>) -> Self {
        Self {
            field,
            is_valid: false,
            message: Some(message.into()),
        }
    }
}
