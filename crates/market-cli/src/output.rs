//! Output formatting for the CLI.

use clap::ValueEnum;
use form_validator::FieldValidation;
use serde::Serialize;

/// Output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

/// Print output in the specified format.
pub fn print<T: Serialize + std::fmt::Display>(value: &T, format: &OutputFormat) {
    match format {
        OutputFormat::Text => print!("{}", value),
        OutputFormat::Json => match serde_json::to_string_pretty(value) {
            Ok(json) => println!("{}", json),
            Err(_) => print!("{}", value),
        },
    }
}

fn status_json(status: &str, message: &str) -> String {
    serde_json::json!({ "status": status, "message": message }).to_string()
}

/// Print a success message.
pub fn print_success(message: &str, format: &OutputFormat) {
    match format {
        OutputFormat::Text => println!("{}", message),
        OutputFormat::Json => println!("{}", status_json("success", message)),
    }
}

/// Print an error message.
pub fn print_error(message: &str, format: &OutputFormat) {
    match format {
        OutputFormat::Text => eprintln!("Error: {}", message),
        OutputFormat::Json => eprintln!("{}", status_json("error", message)),
    }
}

fn validation_json<'a>(message: &str, errors: impl Iterator<Item = &'a FieldValidation>) -> serde_json::Value {
    let errors: Vec<_> = errors
        .map(|v| serde_json::json!({ "field": v.field.label(), "message": v.message }))
        .collect();
    serde_json::json!({ "status": "error", "message": message, "errors": errors })
}

/// Print a blocked form submission: each field's message, then `message`.
pub fn print_validation_errors<'a>(
    message: &str,
    errors: impl Iterator<Item = &'a FieldValidation>,
    format: &OutputFormat,
) {
    match format {
        OutputFormat::Text => {
            for verdict in errors {
                if let Some(field_message) = &verdict.message {
                    eprintln!("  {}", field_message);
                }
            }
            eprintln!("Error: {}", message);
        }
        OutputFormat::Json => {
            let json = validation_json(message, errors);
            match serde_json::to_string_pretty(&json) {
                Ok(text) => eprintln!("{}", text),
                Err(_) => eprintln!("{}", status_json("error", message)),
            }
        }
    }
}

/// Format a price the way every view shows it.
pub fn money(amount: f64) -> String {
    format!("${:.2}", amount)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_json_escapes_message() {
        let line = status_json("error", r#"Invalid "category""#);
        let parsed: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(parsed["status"], "error");
        assert_eq!(parsed["message"], r#"Invalid "category""#);
    }

    #[test]
    fn validation_json_lists_each_field() {
        let errors = [
            FieldValidation::invalid(form_validator::Field::Title, "Title is required"),
            FieldValidation::invalid(form_validator::Field::Price, "Price must be a positive number"),
        ];
        let json = validation_json("Please fix the errors above", errors.iter());

        assert_eq!(json["status"], "error");
        assert_eq!(json["message"], "Please fix the errors above");
        assert_eq!(json["errors"][0]["field"], "Title");
        assert_eq!(json["errors"][1]["message"], "Price must be a positive number");
    }

    #[test]
    fn money_has_two_decimals() {
        assert_eq!(money(12.5), "$12.50");
        assert_eq!(money(0.0), "$0.00");
        assert_eq!(money(27.499), "$27.50");
    }
}
