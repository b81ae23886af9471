//! Page routing for `market view <page>`.
//!
//! A page name resolves once to a [`View`]; pages that need a signed-in
//! user are gated before anything is fetched.

use crate::commands::{self, Context, ProductFields};
use anyhow::Result;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Home,
    Login,
    Signup,
    Products,
    AddProduct,
    Listings,
    Cart,
    Dashboard,
}

/// Page name → view. Several names may map to one view.
pub const ROUTES: &[(&str, View)] = &[
    ("home", View::Home),
    ("index", View::Home),
    ("login", View::Login),
    ("signup", View::Signup),
    ("register", View::Signup),
    ("products", View::Products),
    ("add-product", View::AddProduct),
    ("listings", View::Listings),
    ("cart", View::Cart),
    ("dashboard", View::Dashboard),
];

impl View {
    /// Resolve a page name (case-insensitive, `.html` suffix ignored).
    pub fn resolve(page: &str) -> Option<View> {
        let page = page.trim().to_ascii_lowercase();
        let page = page.strip_suffix(".html").unwrap_or(&page);
        let page = if page.is_empty() { "home" } else { page };

        ROUTES
            .iter()
            .find(|(name, _)| *name == page)
            .map(|(_, view)| *view)
    }

    /// Canonical page name.
    pub fn name(self) -> &'static str {
        match self {
            View::Home => "home",
            View::Login => "login",
            View::Signup => "signup",
            View::Products => "products",
            View::AddProduct => "add-product",
            View::Listings => "listings",
            View::Cart => "cart",
            View::Dashboard => "dashboard",
        }
    }

    pub fn requires_auth(self) -> bool {
        matches!(
            self,
            View::Products | View::AddProduct | View::Listings | View::Cart | View::Dashboard
        )
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Canonical names, for error messages and help.
pub fn page_names() -> Vec<&'static str> {
    let mut names: Vec<_> = ROUTES.iter().map(|(_, view)| view.name()).collect();
    names.dedup();
    names
}

/// Resolve `page` and render it.
pub async fn open(ctx: &Context, page: &str) -> Result<()> {
    let Some(view) = View::resolve(page) else {
        anyhow::bail!("Unknown page '{}'. Pages: {}", page, page_names().join(", "));
    };

    if view.requires_auth() && !ctx.is_authenticated() {
        tracing::debug!(view = %view, "page requires login");
        anyhow::bail!("Please log in to view {}. Run 'market login' first", view);
    }

    tracing::debug!(view = %view, "opening page");

    match view {
        View::Home => commands::home(ctx).await,
        View::Login => commands::login(ctx).await,
        View::Signup => commands::signup(ctx).await,
        View::Products => commands::products_list(ctx, None, None).await,
        View::AddProduct => commands::products_add(ctx, ProductFields::default()).await,
        View::Listings => commands::products_mine(ctx).await,
        View::Cart => commands::cart_list(ctx).await,
        View::Dashboard => commands::dashboard(ctx).await,
    }
}
