//! Purchase commands.

use super::Context;
use crate::output;
use crate::render::PurchaseList;
use anyhow::Result;

/// Show purchase history.
pub async fn purchases_list(ctx: &Context) -> Result<()> {
    ctx.require_auth()?;

    match ctx.client.list_purchases().await {
        Ok(purchases) => output::print(&PurchaseList { purchases }, &ctx.format),
        Err(e) => output::print_error(&e.to_string(), &ctx.format),
    }
    Ok(())
}

/// Buy a product directly.
pub async fn purchases_buy(ctx: &Context, product_id: i64, quantity: i64) -> Result<()> {
    ctx.require_auth()?;

    match ctx.client.purchase(product_id, quantity).await {
        Ok(ack) => {
            let message = ack.message.unwrap_or_else(|| "Purchase completed".to_string());
            output::print_success(&message, &ctx.format);
        }
        Err(e) => output::print_error(&e.to_string(), &ctx.format),
    }
    Ok(())
}
