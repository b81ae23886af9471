//! Storage key constants.

/// Keys mirrored into local storage.
pub struct StorageKeys;

impl StorageKeys {
    /// Bearer token (string)
    pub const AUTH_TOKEN: &'static str = "authToken";

    /// Profile snapshot (JSON object)
    pub const USER: &'static str = "user";

    /// Cart snapshot (JSON array)
    pub const CART: &'static str = "cart";

    /// Every key the session owns, in the order logout clears them.
    pub const ALL: [&'static str; 3] = [Self::AUTH_TOKEN, Self::USER, Self::CART];
}
