//! Thin wrappers: one fixed path and method per backend route.

use crate::client::ApiClient;
use crate::error::{ApiError, ApiResult};
use crate::models::{
    AddCartItem, CartItem, LoginRequest, LoginResponse, MessageResponse, NewProduct, Product,
    ProductFilters, ProductUpdate, Purchase, PurchaseRequest, QuantityUpdate, RegisterRequest,
    UserProfile,
};
use crate::request::{with_query, RequestDescriptor};
use serde::Serialize;

fn encode_err(e: serde_json::Error) -> ApiError {
    ApiError::Protocol(format!("Failed to encode request body: {}", e))
}

fn post(path: impl Into<String>, body: &impl Serialize) -> ApiResult<RequestDescriptor> {
    RequestDescriptor::post(path, body).map_err(encode_err)
}

fn put(path: impl Into<String>, body: &impl Serialize) -> ApiResult<RequestDescriptor> {
    RequestDescriptor::put(path, body).map_err(encode_err)
}

impl ApiClient {
    // =========================================================================
    // Auth
    // =========================================================================

    /// POST `/auth/login`, storing the returned token in the session.
    ///
    /// On any failure the session is left as it was.
    pub async fn login(&self, email: &str, password: &str) -> ApiResult<()> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse = self.request_as(post("/auth/login", &body)?).await?;

        let token = response
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or_else(|| ApiError::Protocol("No access token received".to_string()))?;

        if let Err(e) = self.session().set_token(&token) {
            tracing::warn!(error = %e, "Failed to persist auth token; keeping it in memory");
        }
        tracing::info!("Logged in");
        Ok(())
    }

    /// POST `/auth/register`.
    pub async fn register(&self, username: &str, email: &str, password: &str) -> ApiResult<MessageResponse> {
        let body = RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        self.request_as(post("/auth/register", &body)?).await
    }

    /// GET `/auth/profile`.
    pub async fn fetch_profile(&self) -> ApiResult<UserProfile> {
        self.request_as(RequestDescriptor::get("/auth/profile")).await
    }

    // =========================================================================
    // Products
    // =========================================================================

    /// GET `/products`, with `category` then `keyword` when non-empty.
    pub async fn list_products(&self, filters: &ProductFilters) -> ApiResult<Vec<Product>> {
        let path = with_query(
            "/products",
            &[
                ("category", filters.category.as_str()),
                ("keyword", filters.keyword.as_str()),
            ],
        );
        self.request_as(RequestDescriptor::get(path)).await
    }

    pub async fn get_product(&self, id: i64) -> ApiResult<Product> {
        self.request_as(RequestDescriptor::get(format!("/products/{}", id)))
            .await
    }

    pub async fn create_product(&self, product: &NewProduct) -> ApiResult<MessageResponse> {
        self.request_as(post("/products", product)?).await
    }

    pub async fn update_product(&self, id: i64, update: &ProductUpdate) -> ApiResult<MessageResponse> {
        self.request_as(put(format!("/products/{}", id), update)?)
            .await
    }

    pub async fn delete_product(&self, id: i64) -> ApiResult<MessageResponse> {
        self.request_as(RequestDescriptor::delete(format!("/products/{}", id)))
            .await
    }

    /// GET `/products/my-products`: listings owned by the signed-in user.
    pub async fn list_my_products(&self) -> ApiResult<Vec<Product>> {
        self.request_as(RequestDescriptor::get("/products/my-products"))
            .await
    }

    // =========================================================================
    // Cart
    // =========================================================================

    pub async fn list_cart_items(&self) -> ApiResult<Vec<CartItem>> {
        self.request_as(RequestDescriptor::get("/cart")).await
    }

    pub async fn add_cart_item(&self, product_id: i64, quantity: i64) -> ApiResult<MessageResponse> {
        let body = AddCartItem { product_id, quantity };
        self.request_as(post("/cart", &body)?).await
    }

    /// DELETE `/cart/:id`, where `cart_id` is the cart row id.
    pub async fn remove_cart_item(&self, cart_id: i64) -> ApiResult<MessageResponse> {
        self.request_as(RequestDescriptor::delete(format!("/cart/{}", cart_id)))
            .await
    }

    pub async fn update_cart_item_quantity(&self, cart_id: i64, quantity: i64) -> ApiResult<MessageResponse> {
        self.request_as(put(format!("/cart/{}", cart_id), &QuantityUpdate { quantity })?)
            .await
    }

    // =========================================================================
    // Purchases
    // =========================================================================

    pub async fn purchase(&self, product_id: i64, quantity: i64) -> ApiResult<MessageResponse> {
        let body = PurchaseRequest { product_id, quantity };
        self.request_as(post("/purchases", &body)?).await
    }

    pub async fn list_purchases(&self) -> ApiResult<Vec<Purchase>> {
        self.request_as(RequestDescriptor::get("/purchases")).await
    }
}
