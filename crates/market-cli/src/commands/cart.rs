//! Cart commands.

use super::Context;
use crate::output;
use crate::render::CartView;
use anyhow::Result;

/// Show the cart with totals and refresh the local mirror.
pub async fn cart_list(ctx: &Context) -> Result<()> {
    ctx.require_auth()?;

    match ctx.client.refresh_cart().await {
        Ok(items) => output::print(&CartView::new(items), &ctx.format),
        Err(e) => {
            tracing::warn!(error = %e, "cart load failed");
            output::print_error("Failed to load cart", &ctx.format);
        }
    }
    Ok(())
}

/// Add a product to the cart.
pub async fn cart_add(ctx: &Context, product_id: i64, quantity: i64) -> Result<()> {
    ctx.require_auth()?;

    match ctx.client.add_cart_item(product_id, quantity).await {
        Ok(_) => {
            sync_mirror(ctx).await;
            output::print_success("Product added to cart!", &ctx.format);
        }
        Err(e) => output::print_error(&e.to_string(), &ctx.format),
    }
    Ok(())
}

/// Remove a cart line by its cart id.
pub async fn cart_remove(ctx: &Context, cart_id: i64) -> Result<()> {
    ctx.require_auth()?;

    match ctx.client.remove_cart_item(cart_id).await {
        Ok(_) => {
            sync_mirror(ctx).await;
            output::print_success("Item removed from cart", &ctx.format);
        }
        Err(e) => {
            tracing::warn!(error = %e, cart_id, "cart remove failed");
            output::print_error("Failed to remove item", &ctx.format);
        }
    }
    Ok(())
}

/// Set a cart line's quantity; zero or less removes it.
pub async fn cart_update(ctx: &Context, cart_id: i64, quantity: i64) -> Result<()> {
    ctx.require_auth()?;

    match ctx.client.set_cart_quantity(cart_id, quantity).await {
        Ok(_) => {
            sync_mirror(ctx).await;
            let message = if quantity <= 0 {
                "Item removed from cart"
            } else {
                "Quantity updated"
            };
            output::print_success(message, &ctx.format);
        }
        Err(e) => {
            tracing::warn!(error = %e, cart_id, quantity, "cart update failed");
            output::print_error("Failed to update quantity", &ctx.format);
        }
    }
    Ok(())
}

/// Re-read the cart so the cached count follows the change.
async fn sync_mirror(ctx: &Context) {
    if let Err(e) = ctx.client.refresh_cart().await {
        tracing::debug!(error = %e, "cart mirror not refreshed");
    }
}
