//! Request descriptors: what to call, independent of how it is sent.

use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A path relative to the API base, a method, and an optional JSON body.
///
/// Fields are private; a descriptor cannot change after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    path: String,
    method: HttpMethod,
    body: Option<serde_json::Value>,
}

impl RequestDescriptor {
    pub fn new(method: HttpMethod, path: impl Into<String>, body: Option<serde_json::Value>) -> Self {
        Self {
            path: path.into(),
            method,
            body,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, path, None)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(HttpMethod::Delete, path, None)
    }

    /// POST with `body` serialized to JSON.
    pub fn post<B: Serialize + ?Sized>(path: impl Into<String>, body: &B) -> serde_json::Result<Self> {
        Ok(Self::new(HttpMethod::Post, path, Some(serde_json::to_value(body)?)))
    }

    /// PUT with `body` serialized to JSON.
    pub fn put<B: Serialize + ?Sized>(path: impl Into<String>, body: &B) -> serde_json::Result<Self> {
        Ok(Self::new(HttpMethod::Put, path, Some(serde_json::to_value(body)?)))
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn method(&self) -> HttpMethod {
        self.method
    }

    pub fn body(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }
}

/// Append `key=value` pairs, skipping empty values, in the order given.
///
/// Values are form-urlencoded (space becomes `+`). With no non-empty value
/// the path is returned unchanged, without a trailing `?`.
pub fn with_query(path: &str, params: &[(&str, &str)]) -> String {
    let mut serializer = url::form_urlencoded::Serializer::new(String::new());
    let mut any = false;
    for (key, value) in params {
        if !value.is_empty() {
            serializer.append_pair(key, value);
            any = true;
        }
    }

    if any {
        format!("{}?{}", path, serializer.finish())
    } else {
        path.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_preserves_order_and_skips_empty() {
        assert_eq!(
            with_query("/products", &[("category", "books"), ("keyword", "atlas")]),
            "/products?category=books&keyword=atlas"
        );
        assert_eq!(
            with_query("/products", &[("category", ""), ("keyword", "atlas")]),
            "/products?keyword=atlas"
        );
        assert_eq!(
            with_query("/products", &[("category", "books"), ("keyword", "")]),
            "/products?category=books"
        );
        assert_eq!(with_query("/products", &[("category", ""), ("keyword", "")]), "/products");
    }

    #[test]
    fn query_values_are_encoded() {
        assert_eq!(
            with_query("/products", &[("keyword", "road atlas & maps")]),
            "/products?keyword=road+atlas+%26+maps"
        );
    }

    #[test]
    fn descriptor_constructors() {
        let get = RequestDescriptor::get("/cart");
        assert_eq!(get.method(), HttpMethod::Get);
        assert_eq!(get.path(), "/cart");
        assert!(get.body().is_none());

        let post = RequestDescriptor::post("/cart", &serde_json::json!({ "product_id": 3, "quantity": 1 }))
            .unwrap();
        assert_eq!(post.method(), HttpMethod::Post);
        assert_eq!(post.body().unwrap()["product_id"], 3);

        assert_eq!(RequestDescriptor::delete("/cart/9").method().to_string(), "DELETE");
    }
}
