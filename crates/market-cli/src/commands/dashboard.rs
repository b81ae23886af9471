//! Landing page and seller dashboard.

use super::Context;
use crate::output;
use crate::render::{self, DashboardView, HomeView};
use anyhow::Result;
use market_api_client::UserProfile;

fn cached_user(ctx: &Context) -> Option<UserProfile> {
    ctx.client.session().user().unwrap_or_else(|e| {
        tracing::warn!(error = %e, "cached profile unreadable");
        None
    })
}

/// Featured products, plus a greeting when signed in.
///
/// A failed catalogue fetch is logged and shows an empty page.
pub async fn home(ctx: &Context) -> Result<()> {
    let featured = ctx.client.featured_products().await.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load featured products");
        Vec::new()
    });

    let welcome = ctx
        .is_authenticated()
        .then(|| render::welcome(cached_user(ctx).as_ref()));

    output::print(&HomeView { welcome, featured }, &ctx.format);
    Ok(())
}

/// Listing count, recent listings and cart size.
pub async fn dashboard(ctx: &Context) -> Result<()> {
    ctx.require_auth()?;

    match ctx.client.dashboard().await {
        Ok(summary) => {
            let view = DashboardView {
                welcome: render::welcome(cached_user(ctx).as_ref()),
                summary,
            };
            output::print(&view, &ctx.format);
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to load dashboard data");
            output::print_error(&e.to_string(), &ctx.format);
        }
    }
    Ok(())
}
