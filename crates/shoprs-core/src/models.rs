//! Shared data types for the application.

use serde::{Deserialize, Serialize};

/// A demo user account. Credentials are plaintext reference data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub user_id: String,
    pub username: String,
    pub password: String,
}

/// A catalog product.
///
/// `price` is the only field mutated at runtime (by the price
/// simulation); identity is `id`. The attribute fields come from
/// optional CSV columns and stay `None` when the column is absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub image: String,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub material: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

/// One purchase: a (user, product) join record. Read-only reference data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PurchaseRecord {
    pub user_id: String,
    pub product_id: String,
}

/// A wishlisted product: a snapshot of the product fields plus the
/// user's optional target price. Persisted per user as JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishlistItem {
    pub id: String,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub image: String,
    #[serde(default)]
    pub desired_price: Option<f64>,
}

impl From<&Product> for WishlistItem {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            category: product.category.clone(),
            price: product.price,
            image: product.image.clone(),
            desired_price: None,
        }
    }
}

/// A price-drop alert. Derived state, recomputed every simulation tick
/// and never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceAlert {
    pub id: String,
    pub name: String,
    pub desired_price: f64,
    pub new_price: f64,
}
