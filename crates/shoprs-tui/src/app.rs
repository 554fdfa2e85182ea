//! Application state management.

use crate::config::Config;
use shoprs_core::{
    authenticate, catalog, data, evaluate_alerts, recommend,
    session::Session,
    simulation::{IntervalTimer, PriceSimulator},
    store::Store,
    DataError, FilterCriteria, PriceAlert, Product, PurchaseRecord, User, Wishlist, WishlistError,
};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::time::{Duration, Instant};

/// Application state: which view is active.
#[derive(Debug, Clone, PartialEq)]
pub enum AppState {
    /// Waiting for credentials.
    Login,
    /// Catalog browsing.
    Shopping,
    /// Wishlist with price alerts.
    Wishlist,
    /// Purchase history.
    Orders,
    /// Application should quit.
    Quit,
}

/// Input mode for the application.
#[derive(Debug, Clone, PartialEq)]
pub enum InputMode {
    /// Normal navigation mode.
    Normal,
    /// Editing the login form.
    Login,
    /// Typing a search query.
    Search,
    /// Editing a filter field.
    Filter,
    /// Editing the desired price of a wishlist item.
    DesiredPrice,
}

/// Which login field is being edited.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoginField {
    Username,
    Password,
}

/// Which filter field is being edited.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterField {
    Size,
    Brand,
    Category,
    MinPrice,
    MaxPrice,
    Material,
    Color,
}

impl FilterField {
    pub const ALL: [FilterField; 7] = [
        FilterField::Size,
        FilterField::Brand,
        FilterField::Category,
        FilterField::MinPrice,
        FilterField::MaxPrice,
        FilterField::Material,
        FilterField::Color,
    ];

    pub fn label(self) -> &'static str {
        match self {
            FilterField::Size => "Size",
            FilterField::Brand => "Brand",
            FilterField::Category => "Category",
            FilterField::MinPrice => "Min price",
            FilterField::MaxPrice => "Max price",
            FilterField::Material => "Material",
            FilterField::Color => "Color",
        }
    }

    pub fn next(self) -> Self {
        let i = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(i + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        let i = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(i + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// A one-shot background load.
///
/// The worker thread sends its result over a channel; if the consumer
/// has navigated away the receiver is gone and the result is dropped,
/// never a crash.
#[derive(Debug)]
pub enum Loading<T> {
    Idle,
    Pending(Receiver<Result<T, DataError>>),
    Ready(T),
    Failed(String),
}

impl<T> Loading<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Loading::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Loading::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Loading::Pending(_))
    }

    /// Check for a completed load. Returns true on the transition to
    /// `Ready`.
    fn poll(&mut self) -> bool {
        let Loading::Pending(rx) = self else {
            return false;
        };
        match rx.try_recv() {
            Ok(Ok(value)) => {
                *self = Loading::Ready(value);
                true
            }
            Ok(Err(e)) => {
                tracing::warn!("data load failed: {e}");
                *self = Loading::Failed(e.to_string());
                false
            }
            Err(TryRecvError::Empty) => false,
            Err(TryRecvError::Disconnected) => {
                *self = Loading::Failed("data loader stopped".to_string());
                false
            }
        }
    }
}

fn spawn_load<T, F>(task: F) -> Loading<T>
where
    T: Send + 'static,
    F: FnOnce() -> Result<T, DataError> + Send + 'static,
{
    let (tx, rx) = mpsc::channel();
    std::thread::spawn(move || {
        // Ignore send failures: the view may have been torn down.
        let _ = tx.send(task());
    });
    Loading::Pending(rx)
}

/// Main application model.
pub struct App {
    /// Current application state.
    pub state: AppState,
    /// Current input mode.
    pub input_mode: InputMode,
    /// Application configuration.
    pub config: Config,
    /// Session context: store handle, current user, theme flag.
    pub session: Session,

    // Data sources
    pub users: Loading<Vec<User>>,
    pub products: Loading<Vec<Product>>,
    pub history: Loading<Vec<PurchaseRecord>>,

    // Login form state
    pub username_input: String,
    pub password_input: String,
    pub login_field: LoginField,
    /// Inline error on the login view.
    pub error_message: Option<String>,

    /// Transient status-line message (warnings, confirmations).
    pub status_message: Option<String>,

    // Shopping view state
    pub filters: FilterCriteria,
    pub filter_field: FilterField,
    pub filter_input: String,
    pub search_query: String,
    pub suggestions: Vec<Product>,
    pub suggestion_selected: Option<usize>,
    pub recent_searches: Vec<String>,
    pub recently_viewed: Vec<Product>,
    pub recommended: Vec<Product>,
    pub flash_sale_active: bool,
    /// Current filtered product list.
    pub filtered: Vec<Product>,
    /// 1-based catalog page.
    pub page: usize,
    /// Selection index within the current page.
    pub selected: usize,

    // Wishlist view state
    pub wishlist: Wishlist,
    pub wishlist_selected: usize,
    pub alerts: Vec<PriceAlert>,
    pub price_input: String,
    pub simulator: PriceSimulator,
    /// Owned by the wishlist view: started on entry, cancelled on exit.
    pub timer: IntervalTimer,

    // Orders view state
    pub orders: Vec<Product>,
}

impl App {
    /// Create a new application instance. The users load starts
    /// immediately so the login view can resolve credentials.
    pub fn new(config: Config) -> Self {
        let session = Session::new(Store::new(&config.store_dir));
        let data_dir = config.data_dir.clone();
        let timer = IntervalTimer::new(Duration::from_secs(config.tick_seconds));
        Self {
            state: AppState::Login,
            input_mode: InputMode::Login,
            config,
            session,
            users: spawn_load(move || data::load_users(&data_dir)),
            products: Loading::Idle,
            history: Loading::Idle,
            username_input: String::new(),
            password_input: String::new(),
            login_field: LoginField::Username,
            error_message: None,
            status_message: None,
            filters: FilterCriteria::default(),
            filter_field: FilterField::Size,
            filter_input: String::new(),
            search_query: String::new(),
            suggestions: Vec::new(),
            suggestion_selected: None,
            recent_searches: Vec::new(),
            recently_viewed: Vec::new(),
            recommended: Vec::new(),
            flash_sale_active: false,
            filtered: Vec::new(),
            page: 1,
            selected: 0,
            wishlist: Wishlist::default(),
            wishlist_selected: 0,
            alerts: Vec::new(),
            price_input: String::new(),
            simulator: PriceSimulator::new(),
            timer,
            orders: Vec::new(),
        }
    }

    /// Advance background work: poll in-flight loads and the simulation
    /// timer. Called from the event loop on every iteration.
    pub fn on_tick(&mut self, now: Instant) {
        if self.users.poll() {
            tracing::debug!("users loaded");
        }
        if self.products.poll() {
            self.recompute();
        }
        if self.history.poll() {
            self.recompute();
        }
        if self.timer.poll(now) {
            self.run_simulation_tick();
        }
    }

    fn run_simulation_tick(&mut self) {
        let Loading::Ready(products) = &mut self.products else {
            return;
        };
        self.simulator.tick(products);
        self.wishlist.sync_prices(products);
        self.alerts = evaluate_alerts(self.wishlist.items(), products);
        self.recompute();
    }

    /// Recompute everything derived from the loaded data and the current
    /// criteria. Total and synchronous.
    pub fn recompute(&mut self) {
        let Some(products) = self.products.ready() else {
            self.filtered.clear();
            return;
        };

        self.filtered = catalog::apply_filters(products, &self.filters, &self.search_query);
        self.flash_sale_active =
            !catalog::flash_sale(products, self.config.flash_sale_threshold).is_empty();

        let page = catalog::paginate(&self.filtered, self.page, self.config.products_per_page);
        self.page = page.number;
        let page_len = page.items.len();
        if self.selected >= page_len {
            self.selected = page_len.saturating_sub(1);
        }

        if let Some(user) = self.session.current_user() {
            if let Some(history) = self.history.ready() {
                self.recommended = recommend::recommended_products(&user.user_id, history, products);
                self.orders = recommend::order_history(&user.user_id, history, products);
            }
        }
    }

    /// The current catalog page.
    pub fn current_page(&self) -> catalog::Page<'_> {
        catalog::paginate(&self.filtered, self.page, self.config.products_per_page)
    }

    /// The product under the cursor on the current page.
    pub fn selected_product(&self) -> Option<Product> {
        self.current_page().items.get(self.selected).cloned()
    }

    // -- login -----------------------------------------------------------

    /// Attempt to log in with the entered credentials.
    pub fn try_login(&mut self) {
        let user = match &self.users {
            Loading::Ready(users) => {
                authenticate(users, self.username_input.trim(), &self.password_input).cloned()
            }
            Loading::Idle | Loading::Pending(_) => {
                self.error_message =
                    Some("Users are still loading. Please try again later.".to_string());
                return;
            }
            Loading::Failed(e) => {
                self.error_message = Some(format!("Failed to load users: {e}"));
                return;
            }
        };

        match user {
            Some(user) => {
                self.session.login(user);
                self.error_message = None;
                self.password_input.clear();
                self.enter_shopping();
            }
            None => {
                self.error_message = Some("Invalid username or password".to_string());
                self.password_input.clear();
            }
        }
    }

    /// Reset the session and return to the login view.
    pub fn logout(&mut self) {
        self.timer.cancel();
        self.session.logout();
        self.wishlist = Wishlist::default();
        self.alerts.clear();
        self.recommended.clear();
        self.orders.clear();
        self.recently_viewed.clear();
        self.recent_searches.clear();
        self.filters = FilterCriteria::default();
        self.search_query.clear();
        self.suggestions.clear();
        self.page = 1;
        self.selected = 0;
        self.username_input.clear();
        self.password_input.clear();
        self.login_field = LoginField::Username;
        self.status_message = None;
        self.state = AppState::Login;
        self.input_mode = InputMode::Login;
    }

    // -- navigation ------------------------------------------------------

    /// Switch to the shopping view, kicking off the catalog and history
    /// loads if they have not completed.
    pub fn enter_shopping(&mut self) {
        if self.products.ready().is_none() && !self.products.is_pending() {
            let data_dir = self.config.data_dir.clone();
            self.products = spawn_load(move || data::load_products(&data_dir));
        }
        if self.history.ready().is_none() && !self.history.is_pending() {
            let data_dir = self.config.data_dir.clone();
            self.history = spawn_load(move || data::load_purchase_history(&data_dir));
        }
        self.recent_searches = self.session.recent_searches();
        self.recently_viewed = self.session.recently_viewed();
        self.state = AppState::Shopping;
        self.input_mode = InputMode::Normal;
        self.recompute();
    }

    /// Switch to the wishlist view and start the price simulation.
    pub fn enter_wishlist(&mut self, now: Instant) {
        self.wishlist = Wishlist::load(&self.session);
        self.wishlist_selected = 0;
        self.alerts.clear();
        if self.products.ready().is_none() && !self.products.is_pending() {
            let data_dir = self.config.data_dir.clone();
            self.products = spawn_load(move || data::load_products(&data_dir));
        }
        self.timer.start(now);
        self.state = AppState::Wishlist;
        self.input_mode = InputMode::Normal;
    }

    /// Leave the wishlist view, cancelling the simulation timer so no
    /// periodic work survives the view.
    pub fn leave_wishlist(&mut self) {
        self.timer.cancel();
        self.state = AppState::Shopping;
        self.input_mode = InputMode::Normal;
        self.recompute();
    }

    pub fn enter_orders(&mut self) {
        self.recompute();
        self.state = AppState::Orders;
        self.input_mode = InputMode::Normal;
    }

    // -- shopping --------------------------------------------------------

    pub fn move_up(&mut self) {
        self.selected = self.selected.saturating_sub(1);
    }

    pub fn move_down(&mut self) {
        let page_len = self.current_page().items.len();
        if self.selected + 1 < page_len {
            self.selected += 1;
        }
    }

    pub fn next_page(&mut self) {
        if self.page < self.current_page().total_pages {
            self.page += 1;
            self.selected = 0;
            self.recompute();
        }
    }

    pub fn prev_page(&mut self) {
        if self.page > 1 {
            self.page -= 1;
            self.selected = 0;
            self.recompute();
        }
    }

    /// Record the selected product as viewed.
    pub fn view_selected(&mut self) {
        let Some(product) = self.selected_product() else {
            return;
        };
        if let Err(e) = self.session.record_viewed(&product) {
            tracing::warn!("failed to record viewed product: {e}");
        }
        self.recently_viewed = self.session.recently_viewed();
        self.status_message = Some(format!("Viewing {}", product.name));
    }

    /// Toggle the selected product in the wishlist.
    pub fn toggle_wishlist_selected(&mut self) {
        let Some(product) = self.selected_product() else {
            return;
        };
        self.toggle_wishlist(&product);
    }

    fn toggle_wishlist(&mut self, product: &Product) {
        match self.wishlist.toggle(product, &self.session) {
            Ok(shoprs_core::Toggled::Added) => {
                self.status_message = Some(format!("Added {} to wishlist", product.name));
            }
            Ok(shoprs_core::Toggled::Removed) => {
                self.status_message = Some(format!("Removed {} from wishlist", product.name));
            }
            Err(WishlistError::NotLoggedIn) => {
                self.status_message = Some("You must log in to modify your wishlist".to_string());
            }
            Err(WishlistError::Persist(e)) => {
                tracing::warn!("wishlist persist failed: {e}");
                self.status_message = Some("Failed to save wishlist".to_string());
            }
        }
    }

    // -- search ----------------------------------------------------------

    pub fn start_search(&mut self) {
        self.input_mode = InputMode::Search;
        self.suggestions.clear();
        self.suggestion_selected = None;
    }

    /// Live update while typing: refilter and refresh suggestions.
    pub fn update_search(&mut self) {
        self.page = 1;
        self.suggestion_selected = None;
        self.suggestions = match self.products.ready() {
            Some(products) => catalog::search_suggestions(products, &self.search_query)
                .into_iter()
                .cloned()
                .collect(),
            None => Vec::new(),
        };
        self.recompute();
    }

    /// Commit the search: adopt the highlighted suggestion if any and
    /// record the term in the per-user MRU list.
    pub fn commit_search(&mut self) {
        if let Some(i) = self.suggestion_selected {
            if let Some(suggestion) = self.suggestions.get(i) {
                self.search_query = suggestion.name.clone();
            }
        }
        let query = self.search_query.trim().to_string();
        if !query.is_empty() {
            if let Err(e) = self.session.record_search(&query) {
                tracing::warn!("failed to record search: {e}");
            }
            self.recent_searches = self.session.recent_searches();
        }
        self.suggestions.clear();
        self.suggestion_selected = None;
        self.input_mode = InputMode::Normal;
        self.recompute();
    }

    /// Drop the query entirely (the original's "Clear" button).
    pub fn clear_search(&mut self) {
        self.search_query.clear();
        self.suggestions.clear();
        self.suggestion_selected = None;
        self.input_mode = InputMode::Normal;
        self.recompute();
    }

    // -- filters ---------------------------------------------------------

    pub fn start_filter(&mut self) {
        self.input_mode = InputMode::Filter;
        self.filter_input = self.filter_value(self.filter_field);
    }

    pub fn select_filter_field(&mut self, field: FilterField) {
        self.filter_field = field;
        self.filter_input = self.filter_value(field);
    }

    fn filter_value(&self, field: FilterField) -> String {
        match field {
            FilterField::Size => self.filters.size.clone().unwrap_or_default(),
            FilterField::Brand => self.filters.brand.clone().unwrap_or_default(),
            FilterField::Category => self.filters.category.clone().unwrap_or_default(),
            FilterField::Material => self.filters.material.clone().unwrap_or_default(),
            FilterField::Color => self.filters.color.clone().unwrap_or_default(),
            FilterField::MinPrice => self
                .filters
                .min_price
                .map(|p| p.to_string())
                .unwrap_or_default(),
            FilterField::MaxPrice => self
                .filters
                .max_price
                .map(|p| p.to_string())
                .unwrap_or_default(),
        }
    }

    /// Apply the edited value to the active filter field. Empty input
    /// clears the field; a non-numeric price is silently ignored.
    pub fn apply_filter_input(&mut self) {
        let input = self.filter_input.trim().to_string();
        let text = (!input.is_empty()).then(|| input.clone());
        match self.filter_field {
            FilterField::Size => self.filters.size = text,
            FilterField::Brand => self.filters.brand = text,
            FilterField::Category => self.filters.category = text,
            FilterField::Material => self.filters.material = text,
            FilterField::Color => self.filters.color = text,
            FilterField::MinPrice => {
                if input.is_empty() {
                    self.filters.min_price = None;
                } else if let Ok(price) = input.parse::<f64>() {
                    self.filters.min_price = Some(price);
                }
            }
            FilterField::MaxPrice => {
                if input.is_empty() {
                    self.filters.max_price = None;
                } else if let Ok(price) = input.parse::<f64>() {
                    self.filters.max_price = Some(price);
                }
            }
        }
        self.page = 1;
        self.recompute();
    }

    /// Known catalog categories, for the filter overlay.
    pub fn categories(&self) -> Vec<String> {
        self.products
            .ready()
            .map(|products| catalog::categories(products))
            .unwrap_or_default()
    }

    /// Step the Category filter input through the known categories.
    pub fn cycle_category(&mut self) {
        let categories = self.categories();
        if categories.is_empty() {
            return;
        }
        let next = match categories.iter().position(|c| *c == self.filter_input) {
            Some(i) => (i + 1) % categories.len(),
            None => 0,
        };
        self.filter_input = categories[next].clone();
    }

    pub fn reset_filters(&mut self) {
        self.filters = FilterCriteria::default();
        self.search_query.clear();
        self.page = 1;
        self.recompute();
    }

    // -- wishlist view ---------------------------------------------------

    pub fn wishlist_move_up(&mut self) {
        self.wishlist_selected = self.wishlist_selected.saturating_sub(1);
    }

    pub fn wishlist_move_down(&mut self) {
        if self.wishlist_selected + 1 < self.wishlist.items().len() {
            self.wishlist_selected += 1;
        }
    }

    /// Remove the selected wishlist item.
    pub fn remove_selected_wishlist_item(&mut self) {
        let Some(item) = self.wishlist.items().get(self.wishlist_selected) else {
            return;
        };
        let id = item.id.clone();
        let name = item.name.clone();
        match self.wishlist.remove(&id, &self.session) {
            Ok(()) => {
                self.status_message = Some(format!("Removed {name} from wishlist"));
                let len = self.wishlist.items().len();
                if self.wishlist_selected >= len {
                    self.wishlist_selected = len.saturating_sub(1);
                }
            }
            Err(e) => self.status_message = Some(e.to_string()),
        }
    }

    /// Begin editing the desired price of the selected item.
    pub fn start_desired_price(&mut self) {
        let Some(item) = self.wishlist.items().get(self.wishlist_selected) else {
            return;
        };
        self.price_input = item
            .desired_price
            .map(|p| p.to_string())
            .unwrap_or_default();
        self.input_mode = InputMode::DesiredPrice;
    }

    /// Apply the edited desired price. Non-numeric input is a silent
    /// no-op in the engine.
    pub fn apply_desired_price(&mut self) {
        let Some(item) = self.wishlist.items().get(self.wishlist_selected) else {
            self.input_mode = InputMode::Normal;
            return;
        };
        let id = item.id.clone();
        if let Err(e) = self.wishlist.set_desired_price(&id, &self.price_input, &self.session) {
            self.status_message = Some(e.to_string());
        }
        self.input_mode = InputMode::Normal;
    }

    /// Dismiss an alert from the displayed set. It reappears on the next
    /// tick if the price is still below the desired price.
    pub fn dismiss_alert(&mut self) {
        if self.alerts.is_empty() {
            return;
        }
        let selected_id = self
            .wishlist
            .items()
            .get(self.wishlist_selected)
            .map(|item| item.id.clone());
        let position = selected_id
            .and_then(|id| self.alerts.iter().position(|a| a.id == id))
            .unwrap_or(0);
        self.alerts.remove(position);
    }

    // -- theme -----------------------------------------------------------

    pub fn toggle_dark_mode(&mut self) {
        if let Err(e) = self.session.toggle_dark_mode() {
            tracing::warn!("failed to persist theme: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    const USERS: &str = "UserID,Username,Password\n1,alice,wonderland\n";
    const PRODUCTS: &str = "\
ProductID,ProductName,Category,Price,ImageURL
101,Trail Runner,Shoes,2499,
102,Court Classic,Shoes,899,
103,Rain Jacket,Outerwear,3499,
";
    const HISTORY: &str = "UserID,ProductID\n1,102\n";

    fn write_data(dir: &Path) {
        std::fs::write(dir.join("users.csv"), USERS).unwrap();
        std::fs::write(dir.join("products.csv"), PRODUCTS).unwrap();
        std::fs::write(dir.join("purchase_history.csv"), HISTORY).unwrap();
    }

    fn wait_for<F: Fn(&App) -> bool>(app: &mut App, ready: F) {
        let deadline = Instant::now() + Duration::from_secs(5);
        while !ready(app) {
            assert!(Instant::now() < deadline, "timed out waiting for load");
            app.on_tick(Instant::now());
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    fn app() -> (tempfile::TempDir, App) {
        let dir = tempfile::tempdir().unwrap();
        write_data(dir.path());
        let config = Config {
            data_dir: dir.path().to_path_buf(),
            store_dir: dir.path().join("store"),
            ..Default::default()
        };
        let mut app = App::new(config);
        wait_for(&mut app, |a| a.users.ready().is_some());
        (dir, app)
    }

    #[test]
    fn invalid_credentials_leave_the_login_view() {
        let (_dir, mut app) = app();
        app.username_input = "alice".into();
        app.password_input = "wrong".into();
        app.try_login();
        assert_eq!(app.state, AppState::Login);
        assert_eq!(
            app.error_message.as_deref(),
            Some("Invalid username or password")
        );
        assert!(!app.session.is_logged_in());
    }

    #[test]
    fn valid_credentials_open_the_shopping_view() {
        let (_dir, mut app) = app();
        app.username_input = "alice".into();
        app.password_input = "wonderland".into();
        app.try_login();
        assert_eq!(app.state, AppState::Shopping);
        assert!(app.session.is_logged_in());
        assert!(app.error_message.is_none());

        wait_for(&mut app, |a| {
            a.products.ready().is_some() && a.history.ready().is_some()
        });
        app.recompute();
        assert_eq!(app.filtered.len(), 3);
        // Purchased Court Classic expands to both shoes.
        assert_eq!(app.recommended.len(), 2);
    }

    #[test]
    fn leaving_the_wishlist_cancels_the_timer() {
        let (_dir, mut app) = app();
        app.username_input = "alice".into();
        app.password_input = "wonderland".into();
        app.try_login();
        wait_for(&mut app, |a| a.products.ready().is_some());

        let now = Instant::now();
        app.enter_wishlist(now);
        assert!(app.timer.is_running());

        app.leave_wishlist();
        assert!(!app.timer.is_running());
        assert_eq!(app.state, AppState::Shopping);
    }

    #[test]
    fn simulation_tick_produces_an_alert_below_desired_price() {
        let (_dir, mut app) = app();
        app.username_input = "alice".into();
        app.password_input = "wonderland".into();
        app.try_login();
        wait_for(&mut app, |a| a.products.ready().is_some());

        app.selected = 0;
        app.toggle_wishlist_selected();
        app.enter_wishlist(Instant::now());
        app.wishlist
            .set_desired_price("101", "2498", &app.session)
            .unwrap();

        // Drive ticks directly until a drop crosses the threshold.
        for _ in 0..200 {
            app.run_simulation_tick();
            if !app.alerts.is_empty() {
                break;
            }
        }
        assert_eq!(app.alerts.len(), 1);
        assert_eq!(app.alerts[0].id, "101");
        assert!(app.alerts[0].new_price < 2498.0);

        // Dismissal clears the displayed set until the next recompute.
        app.dismiss_alert();
        assert!(app.alerts.is_empty());
    }

    #[test]
    fn filter_input_applies_and_clears() {
        let (_dir, mut app) = app();
        app.username_input = "alice".into();
        app.password_input = "wonderland".into();
        app.try_login();
        wait_for(&mut app, |a| a.products.ready().is_some());

        app.select_filter_field(FilterField::Category);
        app.filter_input = "Shoes".into();
        app.apply_filter_input();
        assert_eq!(app.filtered.len(), 2);

        app.select_filter_field(FilterField::MinPrice);
        app.filter_input = "not a number".into();
        app.apply_filter_input();
        assert_eq!(app.filters.min_price, None);
        assert_eq!(app.filtered.len(), 2);

        app.filter_input = "1000".into();
        app.apply_filter_input();
        assert_eq!(app.filtered.len(), 1);
        assert_eq!(app.filtered[0].id, "101");

        app.reset_filters();
        assert_eq!(app.filtered.len(), 3);
    }

    #[test]
    fn category_filter_cycles_known_categories() {
        let (_dir, mut app) = app();
        app.username_input = "alice".into();
        app.password_input = "wonderland".into();
        app.try_login();
        wait_for(&mut app, |a| a.products.ready().is_some());

        assert_eq!(app.categories(), vec!["Shoes", "Outerwear"]);

        app.select_filter_field(FilterField::Category);
        app.cycle_category();
        assert_eq!(app.filter_input, "Shoes");
        app.cycle_category();
        assert_eq!(app.filter_input, "Outerwear");
        app.cycle_category();
        assert_eq!(app.filter_input, "Shoes");

        app.apply_filter_input();
        assert_eq!(app.filters.category.as_deref(), Some("Shoes"));
        assert_eq!(app.filtered.len(), 2);
    }

    #[test]
    fn logout_resets_to_a_clean_login_view() {
        let (_dir, mut app) = app();
        app.username_input = "alice".into();
        app.password_input = "wonderland".into();
        app.try_login();
        wait_for(&mut app, |a| a.products.ready().is_some());
        app.enter_wishlist(Instant::now());

        app.logout();
        assert_eq!(app.state, AppState::Login);
        assert!(!app.session.is_logged_in());
        assert!(!app.timer.is_running());
        assert!(app.wishlist.is_empty());
        assert!(app.username_input.is_empty());
    }
}
