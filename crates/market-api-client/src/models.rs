//! Typed request and response payloads.

use form_validator::ValidatedProduct;
use serde::{Deserialize, Deserializer, Serialize};

/// Tax applied on top of the cart subtotal.
pub const TAX_RATE: f64 = 0.10;

/// How many products the home page and dashboard preview.
pub const PREVIEW_LIMIT: usize = 6;

/// Prices arrive as JSON numbers or as decimal strings (`"12.50"`).
fn de_price<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse::<f64>().map_err(serde::de::Error::custom),
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginResponse {
    #[serde(default)]
    pub access_token: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

/// Generic `{ "message": ... }` acknowledgement.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageResponse {
    #[serde(default)]
    pub message: Option<String>,
}

/// The signed-in user's profile, as cached locally.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl UserProfile {
    /// Minimal profile stored when the profile fetch after login fails.
    pub fn fallback(email: &str) -> Self {
        Self {
            email: Some(email.to_string()),
            username: Some("User".to_string()),
            ..Self::default()
        }
    }

    pub fn display_name(&self) -> &str {
        self.username
            .as_deref()
            .filter(|u| !u.is_empty())
            .unwrap_or("User")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(deserialize_with = "de_price")]
    pub price: f64,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub seller_id: Option<i64>,
    #[serde(default)]
    pub status: Option<String>,
}

impl Product {
    pub fn category_label(&self) -> &str {
        self.category_name.as_deref().unwrap_or("Other")
    }
}

/// Payload for creating a listing. The backend resolves `category` by name.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProduct {
    pub title: String,
    pub description: String,
    pub category: String,
    pub price: f64,
    pub image_url: String,
}

impl From<ValidatedProduct> for NewProduct {
    fn from(p: ValidatedProduct) -> Self {
        Self {
            title: p.title,
            description: p.description,
            category: p.category,
            price: p.price,
            image_url: p.image_url,
        }
    }
}

/// Partial update of a listing; only set fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProductUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl ProductUpdate {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Optional filters for the product listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilters {
    pub category: String,
    pub keyword: String,
}

impl ProductFilters {
    pub fn new(category: impl Into<String>, keyword: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            keyword: keyword.into(),
        }
    }
}

/// A cart line joined with its product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Cart row id (not the product id).
    pub id: i64,
    pub title: String,
    #[serde(deserialize_with = "de_price")]
    pub price: f64,
    pub quantity: i64,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl CartItem {
    pub fn line_total(&self) -> f64 {
        self.price * self.quantity as f64
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct AddCartItem {
    pub product_id: i64,
    pub quantity: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuantityUpdate {
    pub quantity: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct PurchaseRequest {
    pub product_id: i64,
    pub quantity: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Purchase {
    pub id: i64,
    pub title: String,
    #[serde(deserialize_with = "de_price")]
    pub amount: f64,
    pub quantity: i64,
    #[serde(default)]
    pub purchase_date: Option<String>,
}

/// Cart totals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CartSummary {
    pub item_count: usize,
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
}

impl CartSummary {
    pub fn from_items(items: &[CartItem]) -> Self {
        let subtotal: f64 = items.iter().map(CartItem::line_total).sum();
        let tax = subtotal * TAX_RATE;
        Self {
            item_count: items.len(),
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.item_count == 0
    }
}

/// Numbers shown on the seller dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub products_count: usize,
    pub recent_products: Vec<Product>,
    pub cart_items_count: usize,
}
