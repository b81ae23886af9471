//! Marketplace CLI - browse, sell and buy from the terminal.

mod commands;
mod output;
mod render;
mod views;

use clap::{Parser, Subcommand};
use commands::{Context, ProductFields};
use market_config_and_utils::{init_logging, Config, Paths};
use std::path::PathBuf;
use tracing::debug;

/// Marketplace CLI - browse products, manage listings, cart and purchases.
#[derive(Parser)]
#[command(name = "market")]
#[command(about = "Marketplace CLI for buyers and sellers")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format (text or json)
    #[arg(short, long, default_value = "text", global = true)]
    format: output::OutputFormat,

    /// Log level (trace, debug, info, warn, error); overrides the config file
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Base directory for config, session and logs (default: ~/.marketplace)
    #[arg(long, global = true)]
    base_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Login with email and password
    Login,

    /// Logout and clear session
    Logout,

    /// Create an account
    Signup,

    /// Check authentication status
    Status,

    /// Browse and manage products
    Products {
        #[command(subcommand)]
        command: ProductCommands,
    },

    /// Manage the shopping cart
    Cart {
        #[command(subcommand)]
        command: CartCommands,
    },

    /// Buy products and view purchase history
    Purchases {
        #[command(subcommand)]
        command: PurchaseCommands,
    },

    /// Show your seller dashboard
    Dashboard,

    /// Open a page by name (home, login, signup, products, add-product, listings, cart, dashboard)
    View {
        /// Page name
        page: String,
    },
}

#[derive(Subcommand)]
enum ProductCommands {
    /// List products
    List {
        /// Filter by category name
        #[arg(short, long)]
        category: Option<String>,
        /// Filter by keyword
        #[arg(short, long)]
        keyword: Option<String>,
    },
    /// Show product details
    Show {
        /// Product ID
        id: i64,
    },
    /// List a new product for sale
    Add {
        #[command(flatten)]
        fields: ProductFields,
    },
    /// List your own products
    Mine,
    /// Update one of your products
    Update {
        /// Product ID
        id: i64,
        #[command(flatten)]
        fields: ProductFields,
        /// Listing status (e.g. active, sold)
        #[arg(long)]
        status: Option<String>,
    },
    /// Delete one of your products
    Delete {
        /// Product ID
        id: i64,
    },
}

#[derive(Subcommand)]
enum CartCommands {
    /// Show cart contents and totals
    List,
    /// Add a product to the cart
    Add {
        /// Product ID
        product_id: i64,
        /// Quantity
        #[arg(short, long, default_value = "1")]
        quantity: i64,
    },
    /// Remove an item from the cart
    Remove {
        /// Cart item ID
        cart_id: i64,
    },
    /// Set an item's quantity (0 removes it)
    Update {
        /// Cart item ID
        cart_id: i64,
        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
}

#[derive(Subcommand)]
enum PurchaseCommands {
    /// Show purchase history
    List,
    /// Buy a product
    Buy {
        /// Product ID
        product_id: i64,
        /// Quantity
        #[arg(short, long, default_value = "1")]
        quantity: i64,
    },
}

async fn run(cli: Cli, ctx: Context) -> anyhow::Result<()> {
    match cli.command {
        Commands::Login => commands::login(&ctx).await,
        Commands::Logout => commands::logout(&ctx).await,
        Commands::Signup => commands::signup(&ctx).await,
        Commands::Status => commands::status(&ctx).await,
        Commands::Products { command } => match command {
            ProductCommands::List { category, keyword } => {
                commands::products_list(&ctx, category, keyword).await
            }
            ProductCommands::Show { id } => commands::products_show(&ctx, id).await,
            ProductCommands::Add { fields } => commands::products_add(&ctx, fields).await,
            ProductCommands::Mine => commands::products_mine(&ctx).await,
            ProductCommands::Update { id, fields, status } => {
                commands::products_update(&ctx, id, fields, status).await
            }
            ProductCommands::Delete { id } => commands::products_delete(&ctx, id).await,
        },
        Commands::Cart { command } => match command {
            CartCommands::List => commands::cart_list(&ctx).await,
            CartCommands::Add { product_id, quantity } => {
                commands::cart_add(&ctx, product_id, quantity).await
            }
            CartCommands::Remove { cart_id } => commands::cart_remove(&ctx, cart_id).await,
            CartCommands::Update { cart_id, quantity } => {
                commands::cart_update(&ctx, cart_id, quantity).await
            }
        },
        Commands::Purchases { command } => match command {
            PurchaseCommands::List => commands::purchases_list(&ctx).await,
            PurchaseCommands::Buy { product_id, quantity } => {
                commands::purchases_buy(&ctx, product_id, quantity).await
            }
        },
        Commands::Dashboard => commands::dashboard(&ctx).await,
        Commands::View { page } => views::open(&ctx, &page).await,
    }
}

fn setup(cli: &Cli) -> anyhow::Result<Context> {
    let paths = match &cli.base_dir {
        Some(dir) => Paths::with_base_dir(dir.clone()),
        None => Paths::new()?,
    };
    let config = Config::load(&paths)?;

    let level = cli.log_level.as_deref().unwrap_or(&config.log_level);
    init_logging(level, &paths);
    debug!(base_dir = %paths.base_dir().display(), api = %config.api_base_url, "market starting");

    Context::open(&paths, &config, cli.format)
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match setup(&cli) {
        Ok(ctx) => run(cli, ctx).await,
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
