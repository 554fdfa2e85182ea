//! Price simulation and alert evaluation.
//!
//! Every tick each product has a ~30% chance of a random price drop of
//! 0-500 units, floored at 1. After prices move, the alert set is
//! recomputed from scratch: one alert per wishlist item whose desired
//! price is set and strictly above the current simulated price. Alerts
//! replace the previous set each tick, so a dismissed alert reappears on
//! the next tick while the condition still holds.

use crate::models::{PriceAlert, Product, WishlistItem};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::{Duration, Instant};

/// Default simulation period in seconds.
pub const DEFAULT_TICK_SECONDS: u64 = 5;

const DROP_CHANCE: f64 = 0.3;
const MAX_DROP: u32 = 500;
const PRICE_FLOOR: f64 = 1.0;

/// Random price mutation applied to the tracked catalog.
#[derive(Debug)]
pub struct PriceSimulator {
    rng: StdRng,
}

impl PriceSimulator {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic simulator for tests.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Apply one round of random price drops in place.
    pub fn tick(&mut self, products: &mut [Product]) {
        for product in products {
            if self.rng.gen_bool(DROP_CHANCE) {
                let drop = self.rng.gen_range(0..MAX_DROP) as f64;
                product.price = (product.price - drop).max(PRICE_FLOOR);
            }
        }
    }
}

impl Default for PriceSimulator {
    fn default() -> Self {
        Self::new()
    }
}

/// Recompute the alert set: one alert per wishlist item whose desired
/// price is set and whose current catalog price is strictly below it.
pub fn evaluate_alerts(items: &[WishlistItem], products: &[Product]) -> Vec<PriceAlert> {
    items
        .iter()
        .filter_map(|item| {
            let desired = item.desired_price?;
            let product = products.iter().find(|p| p.id == item.id)?;
            (product.price < desired).then(|| PriceAlert {
                id: product.id.clone(),
                name: product.name.clone(),
                desired_price: desired,
                new_price: product.price,
            })
        })
        .collect()
}

/// A recurring trigger owned by the view that drives it.
///
/// The event loop calls [`IntervalTimer::poll`] with the current
/// instant; a cancelled timer never fires again, so leaving the owning
/// view cannot strand periodic work.
#[derive(Debug)]
pub struct IntervalTimer {
    period: Duration,
    next_due: Option<Instant>,
}

impl IntervalTimer {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_due: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// Schedule the first tick one period from `now`.
    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.period);
    }

    /// Stop the timer. Subsequent polls return false until restarted.
    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    /// True once per elapsed period while running.
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if now >= due => {
                self.next_due = Some(now + self.period);
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, price: f64) -> Product {
        Product {
            id: id.into(),
            name: format!("Product {id}"),
            category: "Shoes".into(),
            price,
            image: String::new(),
            size: None,
            brand: None,
            material: None,
            color: None,
        }
    }

    fn item(id: &str, desired_price: Option<f64>) -> WishlistItem {
        WishlistItem {
            id: id.into(),
            name: format!("Product {id}"),
            category: "Shoes".into(),
            price: 2000.0,
            image: String::new(),
            desired_price,
        }
    }

    #[test]
    fn alert_fires_only_below_desired_price() {
        let items = vec![item("7", Some(500.0))];

        let alerts = evaluate_alerts(&items, &[product("7", 450.0)]);
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].id, "7");
        assert_eq!(alerts[0].desired_price, 500.0);
        assert_eq!(alerts[0].new_price, 450.0);

        assert!(evaluate_alerts(&items, &[product("7", 600.0)]).is_empty());
        // Equality is not a drop.
        assert!(evaluate_alerts(&items, &[product("7", 500.0)]).is_empty());
    }

    #[test]
    fn items_without_a_desired_price_never_alert() {
        let items = vec![item("7", None)];
        assert!(evaluate_alerts(&items, &[product("7", 1.0)]).is_empty());
    }

    #[test]
    fn alerts_are_recomputed_not_accumulated() {
        let items = vec![item("7", Some(500.0)), item("8", Some(100.0))];
        let catalog = vec![product("7", 450.0), product("8", 150.0)];
        let alerts = evaluate_alerts(&items, &catalog);
        assert_eq!(alerts.len(), 1);

        // Next tick the price recovers; the alert set is replaced.
        let catalog = vec![product("7", 550.0), product("8", 150.0)];
        assert!(evaluate_alerts(&items, &catalog).is_empty());
    }

    #[test]
    fn repeated_ticks_never_drop_price_below_one() {
        let mut simulator = PriceSimulator::with_seed(42);
        let mut catalog = vec![product("1", 10.0), product("2", 3.0)];
        for _ in 0..1000 {
            simulator.tick(&mut catalog);
        }
        for product in &catalog {
            assert!(product.price >= 1.0, "price fell to {}", product.price);
        }
    }

    #[test]
    fn seeded_simulator_is_deterministic() {
        let mut a = PriceSimulator::with_seed(7);
        let mut b = PriceSimulator::with_seed(7);
        let mut catalog_a = vec![product("1", 5000.0)];
        let mut catalog_b = vec![product("1", 5000.0)];
        for _ in 0..10 {
            a.tick(&mut catalog_a);
            b.tick(&mut catalog_b);
        }
        assert_eq!(catalog_a[0].price, catalog_b[0].price);
    }

    #[test]
    fn timer_fires_once_per_period_until_cancelled() {
        let period = Duration::from_secs(5);
        let mut timer = IntervalTimer::new(period);
        let start = Instant::now();

        // Not started yet.
        assert!(!timer.poll(start + period));

        timer.start(start);
        assert!(timer.is_running());
        assert!(!timer.poll(start));
        assert!(!timer.poll(start + Duration::from_secs(4)));
        assert!(timer.poll(start + period));
        // Rescheduled relative to the firing poll.
        assert!(!timer.poll(start + period));
        assert!(timer.poll(start + period * 2));

        timer.cancel();
        assert!(!timer.is_running());
        assert!(!timer.poll(start + period * 10));
    }
}
