//! Core models and storefront logic for shoprs.
//!
//! This crate provides the shared types, CSV data loading, per-user
//! persistence and the wishlist/price-alert engine used by the TUI
//! frontend.

pub mod catalog;
pub mod data;
pub mod models;
pub mod recommend;
pub mod session;
pub mod simulation;
pub mod store;
pub mod wishlist;

pub use catalog::{FilterCriteria, Page};
pub use data::DataError;
pub use models::{PriceAlert, Product, PurchaseRecord, User, WishlistItem};
pub use session::{authenticate, Session};
pub use simulation::{evaluate_alerts, IntervalTimer, PriceSimulator};
pub use store::{Scope, Store};
pub use wishlist::{Toggled, Wishlist, WishlistError};
