//! The per-user wishlist.
//!
//! Every successful mutation persists the full wishlist snapshot through
//! the session. Mutating without an active user is refused with
//! [`WishlistError::NotLoggedIn`]; the view turns that into a warning,
//! never a crash.

use crate::models::{Product, WishlistItem};
use crate::session::Session;

#[derive(Debug, thiserror::Error)]
pub enum WishlistError {
    #[error("You must log in to modify your wishlist")]
    NotLoggedIn,
    #[error("failed to persist wishlist: {0}")]
    Persist(String),
}

/// Outcome of a toggle, for the caller's status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggled {
    Added,
    Removed,
}

/// One user's wishlist, held in memory and mirrored to the session store.
#[derive(Debug, Default)]
pub struct Wishlist {
    items: Vec<WishlistItem>,
}

impl Wishlist {
    /// Load the current user's stored wishlist (empty when logged out).
    pub fn load(session: &Session) -> Self {
        Self {
            items: session.load_wishlist(),
        }
    }

    pub fn items(&self) -> &[WishlistItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, product_id: &str) -> bool {
        self.items.iter().any(|item| item.id == product_id)
    }

    fn persist(&self, session: &Session) -> Result<(), WishlistError> {
        session
            .save_wishlist(&self.items)
            .map_err(|e| WishlistError::Persist(e.to_string()))
    }

    /// Add a product. Adding an already-present product changes nothing.
    pub fn add(&mut self, product: &Product, session: &Session) -> Result<(), WishlistError> {
        if !session.is_logged_in() {
            return Err(WishlistError::NotLoggedIn);
        }
        if !self.contains(&product.id) {
            self.items.push(WishlistItem::from(product));
        }
        self.persist(session)
    }

    /// Remove a product by id. Removing an absent product changes nothing.
    pub fn remove(&mut self, product_id: &str, session: &Session) -> Result<(), WishlistError> {
        if !session.is_logged_in() {
            return Err(WishlistError::NotLoggedIn);
        }
        self.items.retain(|item| item.id != product_id);
        self.persist(session)
    }

    /// Add the product if absent, remove it if present.
    pub fn toggle(&mut self, product: &Product, session: &Session) -> Result<Toggled, WishlistError> {
        if self.contains(&product.id) {
            self.remove(&product.id, session)?;
            Ok(Toggled::Removed)
        } else {
            self.add(product, session)?;
            Ok(Toggled::Added)
        }
    }

    /// Set the desired price from raw text input. Non-numeric input is
    /// silently ignored, leaving the prior value (and the stored
    /// snapshot) unchanged.
    pub fn set_desired_price(
        &mut self,
        product_id: &str,
        input: &str,
        session: &Session,
    ) -> Result<(), WishlistError> {
        if !session.is_logged_in() {
            return Err(WishlistError::NotLoggedIn);
        }
        let Ok(price) = input.trim().parse::<f64>() else {
            return Ok(());
        };
        let Some(item) = self.items.iter_mut().find(|item| item.id == product_id) else {
            return Ok(());
        };
        item.desired_price = Some(price);
        self.persist(session)
    }

    /// Refresh the embedded price snapshots from the (simulated) catalog.
    /// Not a user mutation, so nothing is persisted here.
    pub fn sync_prices(&mut self, products: &[Product]) {
        for item in &mut self.items {
            if let Some(product) = products.iter().find(|p| p.id == item.id) {
                item.price = product.price;
            }
        }
    }
}
