//! Page-level flows composed from the wrappers.
//!
//! Local storage is a cache mirror here: a failed write is logged and the
//! API outcome is returned unchanged.

use crate::client::ApiClient;
use crate::error::{ApiError, ApiResult};
use crate::models::{
    CartItem, DashboardSummary, MessageResponse, Product, ProductFilters, UserProfile,
    PREVIEW_LIMIT,
};
use form_validator::{SignupForm, SUBMIT_BLOCKED_MESSAGE};
use market_storage::StorageResult;

impl ApiClient {
    /// Log in, then cache the user's profile.
    ///
    /// A failed profile fetch does not undo the login; a minimal profile
    /// carrying only the email is cached instead.
    pub async fn sign_in(&self, email: &str, password: &str) -> ApiResult<UserProfile> {
        self.login(email, password).await?;

        let profile = match self.fetch_profile().await {
            Ok(profile) => profile,
            Err(e) => {
                tracing::warn!(error = %e, "Profile fetch after login failed; using fallback");
                UserProfile::fallback(email)
            }
        };

        if let Err(e) = self.session().set_user(&profile) {
            tracing::warn!(error = %e, "Failed to cache user profile");
        }
        Ok(profile)
    }

    /// Validate the signup form and register.
    ///
    /// An invalid form never reaches the network.
    pub async fn sign_up(&self, form: &SignupForm) -> ApiResult<MessageResponse> {
        let validation = form.validate();
        if !validation.is_valid() {
            for verdict in validation.errors() {
                tracing::debug!(field = %verdict.field, "signup field rejected");
            }
            return Err(ApiError::Validation(SUBMIT_BLOCKED_MESSAGE.to_string()));
        }

        let form = form.normalized();
        self.register(&form.username, &form.email, &form.password)
            .await
    }

    /// Forget the token and the cached user and cart. Idempotent.
    ///
    /// The in-memory session is cleared regardless. An error means the
    /// stored token may survive into the next process.
    pub fn sign_out(&self) -> StorageResult<()> {
        if let Err(e) = self.session().clear() {
            tracing::error!(error = %e, "Failed to clear stored session");
            return Err(e);
        }
        tracing::info!("Logged out");
        Ok(())
    }

    /// Fetch the cart and refresh its local mirror.
    pub async fn refresh_cart(&self) -> ApiResult<Vec<CartItem>> {
        let items = self.list_cart_items().await?;
        if let Err(e) = self.session().set_cart(&items) {
            tracing::warn!(error = %e, "Failed to cache cart");
        }
        Ok(items)
    }

    /// Item count from the local cart mirror, without a request.
    pub fn cached_cart_count(&self) -> usize {
        self.session().cart_len()
    }

    /// Set a cart line's quantity; zero or less removes the line.
    pub async fn set_cart_quantity(&self, cart_id: i64, quantity: i64) -> ApiResult<MessageResponse> {
        if quantity <= 0 {
            self.remove_cart_item(cart_id).await
        } else {
            self.update_cart_item_quantity(cart_id, quantity).await
        }
    }

    /// The first few unfiltered products, for the home page.
    pub async fn featured_products(&self) -> ApiResult<Vec<Product>> {
        let mut products = self.list_products(&ProductFilters::default()).await?;
        products.truncate(PREVIEW_LIMIT);
        Ok(products)
    }

    /// Listing count, recent listings and cart size for the signed-in seller.
    pub async fn dashboard(&self) -> ApiResult<DashboardSummary> {
        let (products, cart) = tokio::join!(self.list_my_products(), self.list_cart_items());
        let mut products = products?;
        let cart = cart?;

        let products_count = products.len();
        products.truncate(PREVIEW_LIMIT);

        Ok(DashboardSummary {
            products_count,
            recent_products: products,
            cart_items_count: cart.len(),
        })
    }
}
