//! Marketplace API client.
//!
//! [`ApiClient`] owns the request path: it attaches the [`Session`]'s bearer
//! token, sends through a [`Transport`] and maps every outcome onto
//! [`ApiError`]. Typed wrappers cover each backend route, and the flows on
//! top of them keep the local cache mirrors (`user`, `cart`) in step.
//!
//! [`Session`]: market_storage::Session

mod client;
mod endpoints;
mod error;
mod flows;
mod models;
mod request;
mod transport;

pub use client::ApiClient;
pub use error::{ApiError, ApiResult, ErrorKind, INVALID_RESPONSE_MESSAGE};
pub use models::{
    AddCartItem, CartItem, CartSummary, DashboardSummary, LoginRequest, LoginResponse,
    MessageResponse, NewProduct, Product, ProductFilters, ProductUpdate, Purchase,
    PurchaseRequest, QuantityUpdate, RegisterRequest, UserProfile, PREVIEW_LIMIT, TAX_RATE,
};
pub use request::{with_query, HttpMethod, RequestDescriptor};
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport, TransportError};
