//! Recommendations derived from purchase history.
//!
//! Category-based expansion over the user's purchases, not collaborative
//! filtering: everything the user bought, plus everything in the catalog
//! that shares a category with something they bought.

use crate::models::{Product, PurchaseRecord};
use std::collections::HashSet;

fn purchased_ids<'a>(user_id: &str, history: &'a [PurchaseRecord]) -> HashSet<&'a str> {
    history
        .iter()
        .filter(|r| r.user_id == user_id)
        .map(|r| r.product_id.as_str())
        .collect()
}

/// The products the user has purchased, in catalog order.
pub fn order_history(user_id: &str, history: &[PurchaseRecord], products: &[Product]) -> Vec<Product> {
    let purchased = purchased_ids(user_id, history);
    products
        .iter()
        .filter(|p| purchased.contains(p.id.as_str()))
        .cloned()
        .collect()
}

/// Purchased products unioned with all catalog products sharing a
/// category with any purchase. No duplicates, catalog order preserved,
/// no ranking beyond the membership test.
pub fn recommended_products(
    user_id: &str,
    history: &[PurchaseRecord],
    products: &[Product],
) -> Vec<Product> {
    let purchased = purchased_ids(user_id, history);
    let categories: HashSet<&str> = products
        .iter()
        .filter(|p| purchased.contains(p.id.as_str()))
        .map(|p| p.category.as_str())
        .collect();

    products
        .iter()
        .filter(|p| purchased.contains(p.id.as_str()) || categories.contains(p.category.as_str()))
        .cloned()
        .collect()
}
