//! Application session context.
//!
//! One `Session` is created at startup, reset on logout and dropped on
//! exit. It owns the persistent [`Store`] and the currently
//! authenticated user, and is the only path to per-user persisted state.

use crate::models::{Product, User, WishlistItem};
use crate::store::{push_recent, Scope, Store};
use anyhow::Result;

pub const KEY_DARK_MODE: &str = "dark_mode";
pub const KEY_RECENT_SEARCHES: &str = "recent_searches";
pub const KEY_RECENTLY_VIEWED: &str = "recently_viewed";
pub const KEY_WISHLIST: &str = "wishlist";

/// Recent search terms are capped at the five most recent.
pub const RECENT_SEARCH_CAP: usize = 5;

/// Recently viewed products keep the five most recent.
pub const RECENTLY_VIEWED_CAP: usize = 5;

/// Find the user matching the given credentials, if any.
pub fn authenticate<'a>(users: &'a [User], username: &str, password: &str) -> Option<&'a User> {
    users
        .iter()
        .find(|u| u.username == username && u.password == password)
}

/// Session state: the logged-in user plus the persistence handle.
#[derive(Debug)]
pub struct Session {
    store: Store,
    current_user: Option<User>,
    dark_mode: bool,
}

impl Session {
    /// Create a session backed by the given store. The persisted theme
    /// flag is restored immediately.
    pub fn new(store: Store) -> Self {
        let dark_mode = store.get(&Scope::Global, KEY_DARK_MODE).unwrap_or(false);
        Self {
            store,
            current_user: None,
            dark_mode,
        }
    }

    pub fn current_user(&self) -> Option<&User> {
        self.current_user.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.current_user.is_some()
    }

    /// Mark the given user as logged in.
    pub fn login(&mut self, user: User) {
        tracing::info!("user {} logged in", user.user_id);
        self.current_user = Some(user);
    }

    /// Clear the authenticated user. Persisted per-user state stays on
    /// disk and is picked up again on the next login.
    pub fn logout(&mut self) {
        if let Some(user) = self.current_user.take() {
            tracing::info!("user {} logged out", user.user_id);
        }
    }

    fn user_scope(&self) -> Option<Scope> {
        self.current_user
            .as_ref()
            .map(|u| Scope::User(u.user_id.clone()))
    }

    // -- theme -----------------------------------------------------------

    pub fn dark_mode(&self) -> bool {
        self.dark_mode
    }

    /// Flip the theme flag and persist it globally.
    pub fn toggle_dark_mode(&mut self) -> Result<()> {
        self.dark_mode = !self.dark_mode;
        self.store.set(&Scope::Global, KEY_DARK_MODE, &self.dark_mode)
    }

    // -- wishlist --------------------------------------------------------

    /// The stored wishlist for the current user, or empty when nobody is
    /// logged in.
    pub fn load_wishlist(&self) -> Vec<WishlistItem> {
        self.user_scope()
            .and_then(|scope| self.store.get(&scope, KEY_WISHLIST))
            .unwrap_or_default()
    }

    /// Persist the full wishlist snapshot for the current user. Without
    /// an active user this is a no-op.
    pub fn save_wishlist(&self, items: &[WishlistItem]) -> Result<()> {
        match self.user_scope() {
            Some(scope) => self.store.set(&scope, KEY_WISHLIST, &items),
            None => Ok(()),
        }
    }

    // -- recent searches -------------------------------------------------

    pub fn recent_searches(&self) -> Vec<String> {
        self.user_scope()
            .and_then(|scope| self.store.get(&scope, KEY_RECENT_SEARCHES))
            .unwrap_or_default()
    }

    /// Record a search term in the per-user MRU list.
    pub fn record_search(&self, query: &str) -> Result<()> {
        let Some(scope) = self.user_scope() else {
            return Ok(());
        };
        let mut searches = self.recent_searches();
        push_recent(&mut searches, query, RECENT_SEARCH_CAP);
        self.store.set(&scope, KEY_RECENT_SEARCHES, &searches)
    }

    // -- recently viewed -------------------------------------------------

    pub fn recently_viewed(&self) -> Vec<Product> {
        self.user_scope()
            .and_then(|scope| self.store.get(&scope, KEY_RECENTLY_VIEWED))
            .unwrap_or_default()
    }

    /// Record a viewed product, most recent first, unique by id, capped
    /// at the five most recent.
    pub fn record_viewed(&self, product: &Product) -> Result<()> {
        let Some(scope) = self.user_scope() else {
            return Ok(());
        };
        let mut viewed = self.recently_viewed();
        viewed.retain(|p| p.id != product.id);
        viewed.insert(0, product.clone());
        viewed.truncate(RECENTLY_VIEWED_CAP);
        self.store.set(&scope, KEY_RECENTLY_VIEWED, &viewed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn users() -> Vec<User> {
        vec![
            User {
                user_id: "1".into(),
                username: "alice".into(),
                password: "secret".into(),
            },
            User {
                user_id: "2".into(),
                username: "bob".into(),
                password: "hunter2".into(),
            },
        ]
    }

    fn session() -> (tempfile::TempDir, Session) {
        let dir = tempfile::tempdir().unwrap();
        let session = Session::new(Store::new(dir.path()));
        (dir, session)
    }

    #[test]
    fn authenticate_matches_username_and_password() {
        let users = users();
        assert_eq!(authenticate(&users, "alice", "secret").unwrap().user_id, "1");
        assert!(authenticate(&users, "alice", "wrong").is_none());
        assert!(authenticate(&users, "mallory", "secret").is_none());
    }

    #[test]
    fn logout_clears_the_user_but_keeps_the_snapshot() {
        let (_dir, mut session) = session();
        session.login(users()[0].clone());
        let item = WishlistItem {
            id: "10".into(),
            name: "Runner".into(),
            category: "Shoes".into(),
            price: 2499.0,
            image: String::new(),
            desired_price: None,
        };
        session.save_wishlist(std::slice::from_ref(&item)).unwrap();
        session.logout();
        assert!(!session.is_logged_in());
        assert!(session.load_wishlist().is_empty());

        session.login(users()[0].clone());
        assert_eq!(session.load_wishlist(), vec![item]);
    }

    #[test]
    fn dark_mode_survives_a_new_session() {
        let dir = tempfile::tempdir().unwrap();
        let mut session = Session::new(Store::new(dir.path()));
        assert!(!session.dark_mode());
        session.toggle_dark_mode().unwrap();

        let session = Session::new(Store::new(dir.path()));
        assert!(session.dark_mode());
    }

    #[test]
    fn recent_searches_are_per_user() {
        let (_dir, mut session) = session();
        session.login(users()[0].clone());
        session.record_search("shoes").unwrap();
        session.record_search("boots").unwrap();
        assert_eq!(session.recent_searches(), vec!["boots", "shoes"]);

        session.logout();
        session.login(users()[1].clone());
        assert!(session.recent_searches().is_empty());
    }

    #[test]
    fn six_searches_keep_the_five_most_recent() {
        let (_dir, mut session) = session();
        session.login(users()[0].clone());
        for q in ["a", "b", "c", "d", "e", "f"] {
            session.record_search(q).unwrap();
        }
        assert_eq!(session.recent_searches(), vec!["f", "e", "d", "c", "b"]);
    }

    #[test]
    fn viewing_an_already_seen_product_moves_it_to_front() {
        let (_dir, mut session) = session();
        session.login(users()[0].clone());
        let a = Product {
            id: "10".into(),
            name: "Runner".into(),
            category: "Shoes".into(),
            price: 2499.0,
            image: String::new(),
            size: None,
            brand: None,
            material: None,
            color: None,
        };
        let mut b = a.clone();
        b.id = "11".into();
        session.record_viewed(&a).unwrap();
        session.record_viewed(&b).unwrap();
        session.record_viewed(&a).unwrap();
        let viewed = session.recently_viewed();
        assert_eq!(
            viewed.iter().map(|p| p.id.as_str()).collect::<Vec<_>>(),
            vec!["10", "11"]
        );
    }

    #[test]
    fn recently_viewed_keeps_the_five_most_recent() {
        let (_dir, mut session) = session();
        session.login(users()[0].clone());
        let base = Product {
            id: String::new(),
            name: "Runner".into(),
            category: "Shoes".into(),
            price: 2499.0,
            image: String::new(),
            size: None,
            brand: None,
            material: None,
            color: None,
        };
        for i in 0..6 {
            let mut product = base.clone();
            product.id = i.to_string();
            session.record_viewed(&product).unwrap();
        }
        let viewed = session.recently_viewed();
        assert_eq!(viewed.len(), RECENTLY_VIEWED_CAP);
        assert_eq!(viewed[0].id, "5");
        assert!(viewed.iter().all(|p| p.id != "0"));
    }
}
