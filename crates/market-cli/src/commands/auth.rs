//! Authentication commands.

use super::{prompt, Context};
use crate::output::{self, OutputFormat};
use crate::render::StatusView;
use anyhow::Result;
use form_validator::{Field, SignupForm};
use market_api_client::UserProfile;

/// Login with email and password.
pub async fn login(ctx: &Context) -> Result<()> {
    let format = &ctx.format;

    if ctx.is_authenticated() {
        let user: Option<UserProfile> = ctx.client.session().user().unwrap_or(None);
        let name = user
            .as_ref()
            .and_then(|u| u.email.as_deref())
            .unwrap_or("unknown");
        output::print_success(&format!("Already logged in as {}", name), format);
        return Ok(());
    }

    let email = prompt("Email")?;
    if email.is_empty() {
        output::print_error("Email is required", format);
        return Ok(());
    }

    let password = rpassword::prompt_password("Password: ")?;
    if password.is_empty() {
        output::print_error("Password is required", format);
        return Ok(());
    }

    if *format == OutputFormat::Text {
        println!("Logging in...");
    }

    match ctx.client.sign_in(&email, &password).await {
        Ok(profile) => {
            output::print_success(&format!("Logged in as {}", profile.display_name()), format);
        }
        Err(e) => {
            output::print_error(&format!("Login failed: {}", e), format);
        }
    }

    Ok(())
}

/// Logout and clear session.
pub async fn logout(ctx: &Context) -> Result<()> {
    match ctx.client.sign_out() {
        Ok(()) => output::print_success("Logged out successfully", &ctx.format),
        Err(e) => output::print_error(
            &format!("Logout failed, stored session could not be cleared: {}", e),
            &ctx.format,
        ),
    }
    Ok(())
}

/// Create an account.
///
/// Each answer is checked as soon as it is typed, so a mistake is reported
/// next to the field rather than after the whole form.
pub async fn signup(ctx: &Context) -> Result<()> {
    let format = &ctx.format;
    let mut form = SignupForm::default();

    form.username = prompt("Username")?;
    report(&form, Field::Username);
    form.email = prompt("Email")?;
    report(&form, Field::Email);
    form.password = rpassword::prompt_password("Password: ")?;
    report(&form, Field::Password);
    form.confirm_password = rpassword::prompt_password("Confirm password: ")?;
    report(&form, Field::ConfirmPassword);

    let validation = form.validate();
    if let Some(message) = validation.submit_message() {
        output::print_validation_errors(message, validation.errors(), format);
        return Ok(());
    }

    match ctx.client.sign_up(&form).await {
        Ok(_) => output::print_success("Registration successful! Please login.", format),
        Err(e) => output::print_error(&e.to_string(), format),
    }

    Ok(())
}

/// Print the verdicts that changed after editing `field`.
fn report(form: &SignupForm, field: Field) {
    for verdict in form.on_input(field) {
        if let Some(message) = verdict.message {
            eprintln!("  {}", message);
        }
    }
}

/// Check authentication status.
pub async fn status(ctx: &Context) -> Result<()> {
    let logged_in = ctx.is_authenticated();
    let user = if logged_in {
        ctx.client.session().user::<UserProfile>().unwrap_or_else(|e| {
            tracing::warn!(error = %e, "cached profile unreadable");
            None
        })
    } else {
        None
    };

    let view = StatusView {
        api_base_url: ctx.client.base_url().to_string(),
        logged_in,
        user,
        cart_items: ctx.client.cached_cart_count(),
    };
    output::print(&view, &ctx.format);
    Ok(())
}
