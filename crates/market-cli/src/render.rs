//! View models.
//!
//! Each page's data as a typed value: `Display` renders the text form,
//! `Serialize` the `--format json` form.

use crate::output::money;
use market_api_client::{CartItem, CartSummary, DashboardSummary, Product, Purchase, UserProfile};
use serde::Serialize;
use std::borrow::Cow;
use std::fmt;

/// Server text for a single terminal line: control characters dropped.
fn plain(text: &str) -> Cow<'_, str> {
    if text.chars().any(char::is_control) {
        Cow::Owned(text.chars().filter(|c| !c.is_control()).collect())
    } else {
        Cow::Borrowed(text)
    }
}

/// Like [`plain`], but line breaks survive.
fn paragraph(text: &str) -> Cow<'_, str> {
    let stray = |c: &char| c.is_control() && *c != '\n';
    if text.chars().any(|c| stray(&c)) {
        Cow::Owned(text.chars().filter(|c| !stray(c)).collect())
    } else {
        Cow::Borrowed(text)
    }
}

fn divider(f: &mut fmt::Formatter<'_>) -> fmt::Result {
    writeln!(f, "{}", "-".repeat(72))
}

fn row(f: &mut fmt::Formatter<'_>, label: &str, value: &str) -> fmt::Result {
    writeln!(f, "  {:<16} {}", format!("{}:", label), value)
}

/// `Welcome, <username>` banner line.
pub fn welcome(user: Option<&UserProfile>) -> String {
    format!("Welcome, {}", plain(user.map_or("User", UserProfile::display_name)))
}

fn product_rows(f: &mut fmt::Formatter<'_>, products: &[Product]) -> fmt::Result {
    writeln!(f, "{:<6} {:<32} {:<14} {:>10}", "ID", "Title", "Category", "Price")?;
    divider(f)?;
    for p in products {
        writeln!(
            f,
            "{:<6} {:<32} {:<14} {:>10}",
            p.id,
            plain(&p.title),
            plain(p.category_label()),
            money(p.price)
        )?;
    }
    Ok(())
}

/// A titled list of products (catalogue, listings, featured).
#[derive(Debug, Serialize)]
pub struct ProductList {
    pub heading: String,
    #[serde(skip)]
    pub empty_message: &'static str,
    pub products: Vec<Product>,
}

impl fmt::Display for ProductList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.heading)?;
        if self.products.is_empty() {
            return writeln!(f, "{}", self.empty_message);
        }
        product_rows(f, &self.products)
    }
}

/// One product with every field.
#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct ProductDetail(pub Product);

impl fmt::Display for ProductDetail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = &self.0;
        writeln!(f, "{}", plain(&p.title))?;
        divider(f)?;
        row(f, "ID", &p.id.to_string())?;
        row(f, "Price", &money(p.price))?;
        row(f, "Category", &plain(p.category_label()))?;
        row(f, "Status", &plain(p.status.as_deref().unwrap_or("-")))?;
        row(f, "Image", &plain(p.image_url.as_deref().unwrap_or("-")))?;
        if let Some(description) = p.description.as_deref().filter(|d| !d.is_empty()) {
            writeln!(f)?;
            writeln!(f, "{}", paragraph(description))?;
        }
        Ok(())
    }
}

/// Cart lines plus totals.
#[derive(Debug, Serialize)]
pub struct CartView {
    pub items: Vec<CartItem>,
    pub summary: CartSummary,
}

impl CartView {
    pub fn new(items: Vec<CartItem>) -> Self {
        let summary = CartSummary::from_items(&items);
        Self { items, summary }
    }
}

impl fmt::Display for CartView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Shopping Cart")?;
        if self.summary.is_empty() {
            return writeln!(f, "Your cart is empty");
        }

        writeln!(f, "{:<6} {:<32} {:>10} {:>5} {:>12}", "ID", "Title", "Price", "Qty", "Total")?;
        divider(f)?;
        for item in &self.items {
            writeln!(
                f,
                "{:<6} {:<32} {:>10} {:>5} {:>12}",
                item.id,
                plain(&item.title),
                money(item.price),
                item.quantity,
                money(item.line_total())
            )?;
        }
        divider(f)?;
        row(f, "Subtotal", &money(self.summary.subtotal))?;
        row(f, "Tax (10%)", &money(self.summary.tax))?;
        row(f, "Total", &money(self.summary.total))
    }
}

#[derive(Debug, Serialize)]
pub struct PurchaseList {
    pub purchases: Vec<Purchase>,
}

impl fmt::Display for PurchaseList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Purchase History")?;
        if self.purchases.is_empty() {
            return writeln!(f, "No purchases yet");
        }
        writeln!(f, "{:<6} {:<32} {:>5} {:>12}  {}", "ID", "Title", "Qty", "Amount", "Date")?;
        divider(f)?;
        for p in &self.purchases {
            writeln!(
                f,
                "{:<6} {:<32} {:>5} {:>12}  {}",
                p.id,
                plain(&p.title),
                p.quantity,
                money(p.amount),
                plain(p.purchase_date.as_deref().unwrap_or("-"))
            )?;
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct DashboardView {
    pub welcome: String,
    #[serde(flatten)]
    pub summary: DashboardSummary,
}

impl fmt::Display for DashboardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.welcome)?;
        divider(f)?;
        row(f, "My products", &self.summary.products_count.to_string())?;
        row(f, "Cart items", &self.summary.cart_items_count.to_string())?;
        writeln!(f)?;
        writeln!(f, "Recent Products")?;
        if self.summary.recent_products.is_empty() {
            return writeln!(f, "You haven't listed any products yet");
        }
        product_rows(f, &self.summary.recent_products)
    }
}

/// Landing page: greeting plus featured products.
#[derive(Debug, Serialize)]
pub struct HomeView {
    pub welcome: Option<String>,
    pub featured: Vec<Product>,
}

impl fmt::Display for HomeView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(welcome) = &self.welcome {
            writeln!(f, "{}", welcome)?;
        }
        writeln!(f, "Featured Products")?;
        if self.featured.is_empty() {
            return writeln!(f, "Nothing listed yet");
        }
        product_rows(f, &self.featured)
    }
}

#[derive(Debug, Serialize)]
pub struct StatusView {
    pub api_base_url: String,
    pub logged_in: bool,
    pub user: Option<UserProfile>,
    pub cart_items: usize,
}

impl fmt::Display for StatusView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "API:      {}", self.api_base_url)?;
        if !self.logged_in {
            return writeln!(f, "Auth:     not logged in");
        }
        writeln!(f, "Auth:     logged in")?;
        if let Some(user) = &self.user {
            writeln!(f, "User:     {}", plain(user.display_name()))?;
            if let Some(email) = &user.email {
                writeln!(f, "Email:    {}", plain(email))?;
            }
        }
        writeln!(f, "Cart:     {} item(s)", self.cart_items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, title: &str, price: f64) -> Product {
        Product {
            id,
            title: title.to_string(),
            description: Some("desc".to_string()),
            price,
            image_url: None,
            category_id: None,
            category_name: Some("books".to_string()),
            seller_id: Some(1),
            status: Some("active".to_string()),
        }
    }

    fn cart_item(id: i64, price: f64, quantity: i64) -> CartItem {
        CartItem {
            id,
            title: "Atlas".to_string(),
            price,
            quantity,
            image_url: None,
        }
    }

    #[test]
    fn welcome_defaults_to_user() {
        assert_eq!(welcome(None), "Welcome, User");
        assert_eq!(
            welcome(Some(&UserProfile::fallback("a@b.c"))),
            "Welcome, User"
        );

        let ada = UserProfile {
            username: Some("ada".to_string()),
            ..Default::default()
        };
        assert_eq!(welcome(Some(&ada)), "Welcome, ada");
    }

    #[test]
    fn server_text_cannot_drive_the_terminal() {
        let mut p = product(4, "Lamp\x1b[2J", 9.0);
        p.description = Some("line one\n\x1b]0;owned\x07line two".to_string());
        p.category_name = Some("de\rcor".to_string());

        let detail = ProductDetail(p.clone()).to_string();
        assert!(!detail.contains('\x1b'));
        assert!(!detail.contains('\x07'));
        assert!(!detail.contains('\r'));
        assert!(detail.contains("Lamp[2J"));
        assert!(detail.contains("line one\n]0;ownedline two"));

        let list = ProductList {
            heading: "Products".to_string(),
            empty_message: "No products found",
            products: vec![p],
        };
        let text = list.to_string();
        assert!(!text.contains('\x1b'));
        assert!(text.contains("decor"));

        let json = serde_json::to_value(&list).unwrap();
        assert_eq!(json["products"][0]["title"], "Lamp\x1b[2J");
    }

    #[test]
    fn empty_product_list_shows_message() {
        let list = ProductList {
            heading: "Products".to_string(),
            empty_message: "No products found",
            products: Vec::new(),
        };
        assert_eq!(list.to_string(), "Products\nNo products found\n");
    }

    #[test]
    fn product_list_text_and_json() {
        let list = ProductList {
            heading: "Products".to_string(),
            empty_message: "No products found",
            products: vec![product(3, "Atlas", 12.5)],
        };
        let text = list.to_string();
        assert!(text.contains("Atlas"));
        assert!(text.contains("$12.50"));
        assert!(text.contains("books"));

        let json = serde_json::to_value(&list).unwrap();
        assert_eq!(json["heading"], "Products");
        assert_eq!(json["products"][0]["id"], 3);
        assert!(json.get("empty_message").is_none());
    }

    #[test]
    fn cart_view_totals() {
        let view = CartView::new(vec![cart_item(1, 10.0, 2), cart_item(2, 5.0, 1)]);
        let text = view.to_string();
        assert!(text.contains("$25.00"));
        assert!(text.contains("$2.50"));
        assert!(text.contains("$27.50"));

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["summary"]["item_count"], 2);
    }

    #[test]
    fn empty_cart() {
        let view = CartView::new(Vec::new());
        assert_eq!(view.to_string(), "Shopping Cart\nYour cart is empty\n");
    }

    #[test]
    fn dashboard_json_is_flat() {
        let view = DashboardView {
            welcome: "Welcome, ada".to_string(),
            summary: DashboardSummary {
                products_count: 8,
                recent_products: vec![product(1, "Lamp", 30.0)],
                cart_items_count: 2,
            },
        };
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["products_count"], 8);
        assert_eq!(json["cart_items_count"], 2);
        assert!(view.to_string().contains("Lamp"));
    }

    #[test]
    fn status_when_logged_out() {
        let view = StatusView {
            api_base_url: "http://localhost:5000/api".to_string(),
            logged_in: false,
            user: None,
            cart_items: 0,
        };
        assert!(view.to_string().contains("not logged in"));
    }
}
