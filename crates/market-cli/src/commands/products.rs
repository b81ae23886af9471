//! Product catalogue and listing management commands.

use super::{value_or_prompt, Context};
use crate::output;
use crate::render::{ProductDetail, ProductList};
use anyhow::Result;
use clap::Args;
use form_validator::{ProductForm, SUBMIT_BLOCKED_MESSAGE};
use market_api_client::{NewProduct, ProductFilters, ProductUpdate};

/// Listing fields shared by `products add` and `products update`.
#[derive(Debug, Clone, Default, Args)]
pub struct ProductFields {
    /// Product title
    #[arg(long)]
    pub title: Option<String>,
    /// Product description
    #[arg(long)]
    pub description: Option<String>,
    /// Category name (e.g. books, electronics)
    #[arg(long)]
    pub category: Option<String>,
    /// Price, e.g. 12.50
    #[arg(long)]
    pub price: Option<String>,
    /// Image URL
    #[arg(long)]
    pub image_url: Option<String>,
}

/// List products, optionally filtered.
pub async fn products_list(ctx: &Context, category: Option<String>, keyword: Option<String>) -> Result<()> {
    let filters = ProductFilters::new(category.unwrap_or_default(), keyword.unwrap_or_default());

    match ctx.client.list_products(&filters).await {
        Ok(products) => {
            let view = ProductList {
                heading: "Products".to_string(),
                empty_message: "No products found",
                products,
            };
            output::print(&view, &ctx.format);
        }
        Err(e) => {
            tracing::warn!(error = %e, "product listing failed");
            output::print_error("Failed to load products", &ctx.format);
        }
    }
    Ok(())
}

/// Show one product.
pub async fn products_show(ctx: &Context, id: i64) -> Result<()> {
    match ctx.client.get_product(id).await {
        Ok(product) => output::print(&ProductDetail(product), &ctx.format),
        Err(e) => output::print_error(&e.to_string(), &ctx.format),
    }
    Ok(())
}

/// List the signed-in user's own listings.
pub async fn products_mine(ctx: &Context) -> Result<()> {
    ctx.require_auth()?;

    match ctx.client.list_my_products().await {
        Ok(products) => {
            let view = ProductList {
                heading: "My Listings".to_string(),
                empty_message: "You haven't listed any products yet",
                products,
            };
            output::print(&view, &ctx.format);
        }
        Err(e) => {
            tracing::warn!(error = %e, "listings failed");
            output::print_error("Failed to load listings", &ctx.format);
        }
    }
    Ok(())
}

/// Create a listing. Fields not given as flags are prompted for.
pub async fn products_add(ctx: &Context, fields: ProductFields) -> Result<()> {
    ctx.require_auth()?;

    let form = ProductForm {
        title: value_or_prompt(fields.title, "Title")?,
        description: value_or_prompt(fields.description, "Description")?,
        category: value_or_prompt(fields.category, "Category")?,
        price: value_or_prompt(fields.price, "Price")?,
        image_url: value_or_prompt(fields.image_url, "Image URL")?,
    };

    let validation = form.validate();
    let Some(product) = validation.product.clone() else {
        output::print_validation_errors(SUBMIT_BLOCKED_MESSAGE, validation.errors(), &ctx.format);
        return Ok(());
    };

    match ctx.client.create_product(&NewProduct::from(product)).await {
        Ok(_) => output::print_success("Product added successfully!", &ctx.format),
        Err(e) => output::print_error(&e.to_string(), &ctx.format),
    }
    Ok(())
}

/// Change fields of one of the user's listings. Only given flags are sent.
pub async fn products_update(ctx: &Context, id: i64, fields: ProductFields, status: Option<String>) -> Result<()> {
    ctx.require_auth()?;

    let price = match fields.price.as_deref().map(str::trim) {
        None => None,
        Some(raw) => match raw.parse::<f64>() {
            Ok(price) if price.is_finite() && price > 0.0 => Some(price),
            _ => anyhow::bail!("Price must be a positive number"),
        },
    };

    let update = ProductUpdate {
        title: fields.title,
        description: fields.description,
        category: fields.category,
        price,
        image_url: fields.image_url,
        status,
    };
    if update.is_empty() {
        output::print_error("Nothing to update", &ctx.format);
        return Ok(());
    }

    match ctx.client.update_product(id, &update).await {
        Ok(_) => output::print_success("Product updated", &ctx.format),
        Err(e) => output::print_error(&e.to_string(), &ctx.format),
    }
    Ok(())
}

/// Delete one of the user's listings.
pub async fn products_delete(ctx: &Context, id: i64) -> Result<()> {
    ctx.require_auth()?;

    match ctx.client.delete_product(id).await {
        Ok(_) => output::print_success("Product deleted", &ctx.format),
        Err(e) => output::print_error(&e.to_string(), &ctx.format),
    }
    Ok(())
}
