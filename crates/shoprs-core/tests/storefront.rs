//! End-to-end flow over the core crate: load CSV data, log in, build a
//! wishlist, run the price simulation and collect alerts.

use shoprs_core::{
    authenticate, catalog, data, evaluate_alerts, recommend, FilterCriteria, PriceSimulator,
    Session, Store, Wishlist,
};
use std::time::{Duration, Instant};

const USERS: &str = "UserID,Username,Password\n1,alice,wonderland\n2,bob,builder\n";

const PRODUCTS: &str = "\
ProductID,ProductName,Category,Price,ImageURL
101,Trail Runner,Shoes,2499,
102,Court Classic,Shoes,899,
103,Rain Jacket,Outerwear,3499,
104,Wool Scarf,Accessories,599,
";

const HISTORY: &str = "UserID,ProductID\n1,102\n2,104\n";

fn data_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("users.csv"), USERS).unwrap();
    std::fs::write(dir.path().join("products.csv"), PRODUCTS).unwrap();
    std::fs::write(dir.path().join("purchase_history.csv"), HISTORY).unwrap();
    dir
}

#[test]
fn login_browse_wishlist_and_alert_flow() {
    let dir = data_dir();
    let users = data::load_users(dir.path()).unwrap();
    let mut products = data::load_products(dir.path()).unwrap();
    let history = data::load_purchase_history(dir.path()).unwrap();

    // Login.
    assert!(authenticate(&users, "alice", "wrong").is_none());
    let alice = authenticate(&users, "alice", "wonderland").unwrap().clone();

    let store_dir = tempfile::tempdir().unwrap();
    let mut session = Session::new(Store::new(store_dir.path()));
    session.login(alice);

    // Browse: category filter plus search.
    let criteria = FilterCriteria {
        category: Some("Shoes".into()),
        ..Default::default()
    };
    let filtered = catalog::apply_filters(&products, &criteria, "trail");
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].id, "101");

    // Recommendations expand alice's shoe purchase to all shoes.
    let recommended = recommend::recommended_products("1", &history, &products);
    assert_eq!(
        recommended.iter().map(|p| p.id.as_str()).collect::<Vec<_>>(),
        vec!["101", "102"]
    );

    // Wishlist with a desired price.
    let mut wishlist = Wishlist::load(&session);
    wishlist.add(&filtered[0], &session).unwrap();
    wishlist.set_desired_price("101", "2400", &session).unwrap();

    // Drive the simulation until the price crosses the threshold.
    let mut simulator = PriceSimulator::with_seed(1);
    let mut alerts = Vec::new();
    for _ in 0..100 {
        simulator.tick(&mut products);
        wishlist.sync_prices(&products);
        alerts = evaluate_alerts(wishlist.items(), &products);
        if !alerts.is_empty() {
            break;
        }
    }
    assert_eq!(alerts.len(), 1);
    assert_eq!(alerts[0].id, "101");
    assert!(alerts[0].new_price < 2400.0);
    assert!(alerts[0].new_price >= 1.0);

    // The wishlist snapshot survives a logout/login cycle.
    session.logout();
    session.login(users[0].clone());
    let reloaded = Wishlist::load(&session);
    assert_eq!(reloaded.items()[0].desired_price, Some(2400.0));
}

#[test]
fn timer_owned_by_a_view_stops_on_teardown() {
    let mut timer = shoprs_core::IntervalTimer::new(Duration::from_secs(5));
    let now = Instant::now();
    timer.start(now);
    assert!(timer.poll(now + Duration::from_secs(5)));

    // Leaving the view cancels the timer; no tick ever fires again.
    timer.cancel();
    assert!(!timer.poll(now + Duration::from_secs(60)));
}
