//! Product listing form.
//!
//! The backend rejects a listing with any missing field, so the same check
//! runs before the request is sent.

use crate::{Field, FieldValidation};
use serde::Serialize;

/// Raw text of the "add product" form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductForm {
    pub title: String,
    pub description: String,
    pub category: String,
    pub price: String,
    pub image_url: String,
}

/// A listing whose fields all passed validation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidatedProduct {
    pub title: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    pub image_url: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ProductValidation {
    pub fields: Vec<FieldValidation>,
    pub product: Option<ValidatedProduct>,
}

impl ProductValidation {
    pub fn is_valid(&self) -> bool {
        self.product.is_some()
    }

    pub fn errors(&self) -> impl Iterator<Item = &FieldValidation> {
        self.fields.iter().filter(|f| !f.is_valid)
    }
}

fn required(field: Field, value: &str) -> FieldValidation {
    if value.trim().is_empty() {
        FieldValidation::invalid(field, format!("{} is required", field.label()))
    } else {
        FieldValidation::valid(field)
    }
}

fn parse_price(raw: &str) -> Result<f64, FieldValidation> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(FieldValidation::invalid(Field::Price, "Price is required"));
    }
    match raw.parse::<f64>() {
        Ok(price) if price.is_finite() && price > 0.0 => Ok(price),
        _ => Err(FieldValidation::invalid(
            Field::Price,
            "Price must be a positive number",
        )),
    }
}

impl ProductForm {
    pub fn validate(&self) -> ProductValidation {
        let price = parse_price(&self.price);

        let fields = vec![
            required(Field::Title, &self.title),
            required(Field::Description, &self.description),
            required(Field::Category, &self.category),
            match &price {
                Ok(_) => FieldValidation::valid(Field::Price),
                Err(verdict) => verdict.clone(),
            },
            required(Field::ImageUrl, &self.image_url),
        ];

        let product = match price {
            Ok(price) if fields.iter().all(|f| f.is_valid) => Some(ValidatedProduct {
                title: self.title.trim().to_string(),
                description: self.description.trim().to_string(),
                category: self.category.trim().to_string(),
                price,
                image_url: self.image_url.trim().to_string(),
            }),
            _ => None,
        };

        ProductValidation { fields, product }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ProductForm {
        ProductForm {
            title: " Atlas ".to_string(),
            description: "World atlas, 2019 edition".to_string(),
            category: "books".to_string(),
            price: "12.50".to_string(),
            image_url: "https://img.test/atlas.png".to_string(),
        }
    }

    #[test]
    fn complete_form_yields_product() {
        let validation = form().validate();
        assert!(validation.is_valid());

        let product = validation.product.unwrap();
        assert_eq!(product.title, "Atlas");
        assert_eq!(product.price, 12.5);
    }

    #[test]
    fn missing_fields_are_reported() {
        let validation = ProductForm::default().validate();
        assert!(!validation.is_valid());

        let messages: Vec<_> = validation
            .errors()
            .map(|f| f.message.clone().unwrap())
            .collect();
        assert_eq!(
            messages,
            vec![
                "Title is required",
                "Description is required",
                "Category is required",
                "Price is required",
                "Image URL is required",
            ]
        );
    }

    #[test]
    fn price_must_be_positive_number() {
        for bad in ["abc", "0", "-3", "NaN", "inf"] {
            let mut f = form();
            f.price = bad.to_string();
            let validation = f.validate();
            assert!(!validation.is_valid(), "{bad} should be rejected");
            assert_eq!(
                validation.errors().next().unwrap().message.as_deref(),
                Some("Price must be a positive number")
            );
        }
    }
}
