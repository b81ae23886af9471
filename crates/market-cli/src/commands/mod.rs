//! CLI command implementations.

mod auth;
mod cart;
mod dashboard;
mod products;
mod purchases;

pub use auth::{login, logout, signup, status};
pub use cart::{cart_add, cart_list, cart_remove, cart_update};
pub use dashboard::{dashboard, home};
pub use products::{products_add, products_delete, products_list, products_mine, products_show, products_update, ProductFields};
pub use purchases::{purchases_buy, purchases_list};

use crate::output::OutputFormat;
use anyhow::Result;
use market_api_client::ApiClient;
use market_config_and_utils::{Config, Paths};
use market_storage::{FileStorage, Session};
use std::io::{self, Write};
use std::sync::Arc;

/// Everything a command needs: the API client over the persisted session.
pub struct Context {
    pub client: ApiClient,
    pub format: OutputFormat,
}

impl Context {
    /// Open the session stored under `paths` and build a client from `config`.
    pub fn open(paths: &Paths, config: &Config, format: OutputFormat) -> Result<Self> {
        paths.ensure_dirs()?;
        let storage = FileStorage::open(paths.storage_file())?;
        let session = Arc::new(Session::new(Box::new(storage)));
        Ok(Self {
            client: ApiClient::from_config(config, session),
            format,
        })
    }

    pub fn is_authenticated(&self) -> bool {
        self.client.session().is_authenticated()
    }

    /// Fail unless a token is stored.
    pub fn require_auth(&self) -> Result<()> {
        if !self.is_authenticated() {
            anyhow::bail!("Not logged in. Run 'market login' first");
        }
        Ok(())
    }
}

/// Read one trimmed line from stdin after printing `label`.
pub(crate) fn prompt(label: &str) -> Result<String> {
    print!("{}: ", label);
    io::stdout().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

/// `value` if given, otherwise prompt for it.
pub(crate) fn value_or_prompt(value: Option<String>, label: &str) -> Result<String> {
    match value {
        Some(value) => Ok(value),
        None => prompt(label),
    }
}
