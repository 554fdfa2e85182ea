//! Product catalog filtering, search and pagination.
//!
//! All of this is pure, synchronous computation over the in-memory
//! product list; the views recompute it wholesale whenever criteria
//! change.

use crate::models::Product;

pub const DEFAULT_PAGE_SIZE: usize = 8;
pub const SUGGESTION_LIMIT: usize = 5;

/// Conjunctive filter criteria. Unset fields pass everything through.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    pub size: Option<String>,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub material: Option<String>,
    pub color: Option<String>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// True iff the product satisfies every set predicate.
    pub fn matches(&self, product: &Product) -> bool {
        fn attr(filter: &Option<String>, value: &Option<String>) -> bool {
            match filter {
                Some(wanted) => value.as_deref() == Some(wanted.as_str()),
                None => true,
            }
        }

        attr(&self.size, &product.size)
            && attr(&self.brand, &product.brand)
            && attr(&self.material, &product.material)
            && attr(&self.color, &product.color)
            && self
                .category
                .as_deref()
                .is_none_or(|c| product.category == c)
            && self.min_price.is_none_or(|min| product.price >= min)
            && self.max_price.is_none_or(|max| product.price <= max)
    }
}

fn matches_query(product: &Product, query: &str) -> bool {
    let query = query.to_lowercase();
    product.name.to_lowercase().contains(&query)
        || product.category.to_lowercase().contains(&query)
}

/// Apply the filter criteria and the search text, conjunctively.
/// Empty search text passes everything through.
pub fn apply_filters(products: &[Product], criteria: &FilterCriteria, search: &str) -> Vec<Product> {
    products
        .iter()
        .filter(|p| criteria.matches(p))
        .filter(|p| search.is_empty() || matches_query(p, search))
        .cloned()
        .collect()
}

/// Up to five products whose name or category contains the query.
/// An empty query yields no suggestions.
pub fn search_suggestions<'a>(products: &'a [Product], query: &str) -> Vec<&'a Product> {
    if query.is_empty() {
        return Vec::new();
    }
    products
        .iter()
        .filter(|p| matches_query(p, query))
        .take(SUGGESTION_LIMIT)
        .collect()
}

/// Products below the flash-sale price threshold.
pub fn flash_sale(products: &[Product], threshold: f64) -> Vec<&Product> {
    products.iter().filter(|p| p.price < threshold).collect()
}

/// Unique categories in first-seen order, for the filter overlay.
pub fn categories(products: &[Product]) -> Vec<String> {
    let mut seen = Vec::new();
    for product in products {
        if !seen.contains(&product.category) {
            seen.push(product.category.clone());
        }
    }
    seen
}

/// One page of a filtered product list.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a> {
    pub items: &'a [Product],
    /// 1-based page number.
    pub number: usize,
    pub total_pages: usize,
}

/// Slice out the given 1-based page. Page numbers are clamped into
/// range; an empty list yields a single empty page and a zero page size
/// is treated as one item per page.
pub fn paginate(products: &[Product], page: usize, per_page: usize) -> Page<'_> {
    let per_page = per_page.max(1);
    let total_pages = products.len().div_ceil(per_page).max(1);
    let number = page.clamp(1, total_pages);
    let start = (number - 1) * per_page;
    let end = (start + per_page).min(products.len());
    Page {
        items: &products[start..end],
        number,
        total_pages,
    }
}
