//! Turns scanned codes into cart additions, one code at a time.
//!
//! Codes are queued as they arrive. A single drain loop resolves them in
//! arrival order: the in-memory catalog first, then a remote search. A code
//! scanned while a lookup is in flight waits its turn instead of starting a
//! second request.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;

use async_trait::async_trait;
use contracts::domain::a001_product::Product;

use crate::shared::api_utils::ApiError;

/// Remote product search by code
#[async_trait(?Send)]
pub trait ProductLookup {
    async fn search_by_code(&self, code: &str) -> Result<Vec<Product>, ApiError>;
}

/// Where the resolver reads the loaded catalog and delivers its results
pub trait ScanTarget {
    /// Exact trimmed-barcode match among the products already on screen
    fn find_loaded(&self, code: &str) -> Option<Product>;

    fn add_to_cart(&self, product: Product);

    /// Non-blocking user notification
    fn notify_error(&self, message: String);
}

pub fn not_found_message(code: &str) -> String {
    format!("Producto con código {} no encontrado.", code)
}

pub const LOOKUP_FAILED_MESSAGE: &str = "No se pudo buscar el producto.";

/// All digits, at least `min_len` of them, after trimming
pub fn is_barcode(text: &str, min_len: usize) -> bool {
    let trimmed = text.trim();
    trimmed.len() >= min_len && trimmed.bytes().all(|b| b.is_ascii_digit())
}

#[derive(Debug, Clone, PartialEq)]
pub enum Resolution {
    /// Not a barcode, dropped silently
    Ignored,
    Local(Product),
    Remote(Product),
    NotFound,
    Failed(String),
}

pub struct ScanQueue<L> {
    lookup: L,
    min_barcode_length: usize,
    pending: RefCell<VecDeque<String>>,
    draining: Cell<bool>,
}

impl<L: ProductLookup> ScanQueue<L> {
    pub fn new(lookup: L, min_barcode_length: usize) -> Self {
        Self {
            lookup,
            min_barcode_length,
            pending: RefCell::new(VecDeque::new()),
            draining: Cell::new(false),
        }
    }

    pub fn pending_len(&self) -> usize {
        self.pending.borrow().len()
    }

    pub fn is_draining(&self) -> bool {
        self.draining.get()
    }

    /// Queues a code. Returns `true` when no drain loop is running and the
    /// caller must start one with [`ScanQueue::drain`].
    #[must_use]
    pub fn push(&self, code: impl Into<String>) -> bool {
        self.pending.borrow_mut().push_back(code.into());
        !self.draining.get()
    }

    /// Processes queued codes until the queue is empty.
    ///
    /// Returns immediately if another drain is already running, so at most
    /// one resolution is ever in flight.
    pub async fn drain<T: ScanTarget + ?Sized>(&self, target: &T) {
        if self.draining.replace(true) {
            return;
        }
        loop {
            // the borrow must end before the await below
            let next = self.pending.borrow_mut().pop_front();
            let Some(code) = next else { break };
            self.resolve(&code, target).await;
        }
        self.draining.set(false);
    }

    /// Resolves one code and applies the outcome to `target`.
    pub async fn resolve<T: ScanTarget + ?Sized>(&self, raw: &str, target: &T) -> Resolution {
        let code = raw.trim();
        if !is_barcode(code, self.min_barcode_length) {
            log::debug!("ignoring scan '{}': not a barcode", code);
            return Resolution::Ignored;
        }

        if let Some(product) = target.find_loaded(code) {
            log::info!("scan {} resolved locally: variant {}", code, product.variant_id.0);
            target.add_to_cart(product.clone());
            return Resolution::Local(product);
        }

        match self.lookup.search_by_code(code).await {
            Ok(products) => match products.into_iter().find(|p| p.has_barcode(code)) {
                Some(product) => {
                    log::info!("scan {} resolved remotely: variant {}", code, product.variant_id.0);
                    target.add_to_cart(product.clone());
                    Resolution::Remote(product)
                }
                None => {
                    log::warn!("scan {} matched no product", code);
                    target.notify_error(not_found_message(code));
                    Resolution::NotFound
                }
            },
            Err(e) => {
                log::warn!("lookup for scan {} failed: {}", code, e);
                let message = e.to_string();
                let message = if message.trim().is_empty() {
                    LOOKUP_FAILED_MESSAGE.to_string()
                } else {
                    message
                };
                target.notify_error(message.clone());
                Resolution::Failed(message)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::u501_touch_sale::cart_ledger::tests::product;
    use crate::usecases::u501_touch_sale::cart_ledger::CartLedger;
    use crate::usecases::u501_touch_sale::cart_totals::CartTotals;
    use contracts::domain::a002_product_variant::VariantId;
    use std::collections::HashMap;
    use std::rc::Rc;
    use std::time::Duration;

    #[derive(Default)]
    struct Recorder {
        catalog: Vec<Product>,
        cart: RefCell<CartLedger>,
        added: RefCell<Vec<String>>,
        errors: RefCell<Vec<String>>,
    }

    impl ScanTarget for Recorder {
        fn find_loaded(&self, code: &str) -> Option<Product> {
            self.catalog.iter().find(|p| p.has_barcode(code)).cloned()
        }

        fn add_to_cart(&self, product: Product) {
            self.added
                .borrow_mut()
                .push(product.barcode.clone().unwrap_or_default());
            self.cart.borrow_mut().add(&product);
        }

        fn notify_error(&self, message: String) {
            self.errors.borrow_mut().push(message);
        }
    }

    /// Remote catalog with optional per-code latency and failures
    #[derive(Default)]
    struct FakeRemote {
        products: Vec<Product>,
        delays_ms: HashMap<String, u64>,
        failing: Option<ApiError>,
        calls: RefCell<Vec<String>>,
        in_flight: Cell<u32>,
        max_in_flight: Cell<u32>,
    }

    #[async_trait(?Send)]
    impl ProductLookup for Rc<FakeRemote> {
        async fn search_by_code(&self, code: &str) -> Result<Vec<Product>, ApiError> {
            self.calls.borrow_mut().push(code.to_string());
            self.in_flight.set(self.in_flight.get() + 1);
            self.max_in_flight
                .set(self.max_in_flight.get().max(self.in_flight.get()));
            if let Some(ms) = self.delays_ms.get(code) {
                tokio::time::sleep(Duration::from_millis(*ms)).await;
            }
            self.in_flight.set(self.in_flight.get() - 1);
            if let Some(e) = &self.failing {
                return Err(e.clone());
            }
            // substring search, like the backend's searchTerm filter
            Ok(self
                .products
                .iter()
                .filter(|p| p.barcode.as_deref().unwrap_or("").contains(code))
                .cloned()
                .collect())
        }
    }

    #[test]
    fn test_is_barcode() {
        assert!(!is_barcode("1234567", 8));
        assert!(is_barcode("12345678", 8));
        assert!(!is_barcode("abcd1234", 8));
        assert!(is_barcode("  12345678  ", 8));
        assert!(!is_barcode("", 8));
        assert!(!is_barcode("1234 5678", 8));
        assert!(!is_barcode("١٢٣٤٥٦٧٨", 8));
    }

    #[tokio::test]
    async fn test_local_catalog_hit() {
        let remote = Rc::new(FakeRemote::default());
        let queue = ScanQueue::new(remote.clone(), 8);
        let target = Recorder {
            catalog: vec![product(9, "12345678", "10.00")],
            ..Default::default()
        };

        assert!(queue.push("12345678"));
        queue.drain(&target).await;

        let cart = target.cart.borrow();
        assert_eq!(cart.len(), 1);
        let line = cart.line(VariantId(9)).unwrap();
        assert_eq!(line.quantity, 1.0);
        assert_eq!(line.price, 10.0);
        let totals = CartTotals::of(&cart);
        assert_eq!(totals.total_items, 1.0);
        assert_eq!(totals.amount_due, 10.0);
        assert!(remote.calls.borrow().is_empty());
        assert!(target.errors.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_remote_fallback_requires_exact_barcode() {
        let remote = Rc::new(FakeRemote {
            products: vec![
                product(1, "123456789", "1.00"),
                product(2, " 12345678 ", "2.00"),
            ],
            ..Default::default()
        });
        let queue = ScanQueue::new(remote.clone(), 8);
        let target = Recorder::default();

        let outcome = queue.resolve("12345678", &target).await;
        assert!(matches!(outcome, Resolution::Remote(ref p) if p.variant_id == VariantId(2)));
        assert_eq!(target.cart.borrow().quantity_of(VariantId(2)), 1.0);
        assert_eq!(target.cart.borrow().quantity_of(VariantId(1)), 0.0);
        assert_eq!(*remote.calls.borrow(), vec!["12345678".to_string()]);
    }

    #[tokio::test]
    async fn test_invalid_codes_are_dropped_silently() {
        let remote = Rc::new(FakeRemote::default());
        let queue = ScanQueue::new(remote.clone(), 8);
        let target = Recorder::default();

        assert_eq!(queue.resolve("1234567", &target).await, Resolution::Ignored);
        assert_eq!(queue.resolve("abcd1234", &target).await, Resolution::Ignored);
        assert!(remote.calls.borrow().is_empty());
        assert!(target.errors.borrow().is_empty());
        assert!(target.cart.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_miss_notifies_and_drain_continues() {
        let remote = Rc::new(FakeRemote::default());
        let queue = ScanQueue::new(remote.clone(), 8);
        let target = Recorder {
            catalog: vec![product(9, "12345678", "10.00")],
            ..Default::default()
        };

        assert!(queue.push("99999999"));
        assert!(queue.push("12345678"));
        queue.drain(&target).await;

        assert_eq!(
            *target.errors.borrow(),
            vec!["Producto con código 99999999 no encontrado.".to_string()]
        );
        assert_eq!(target.cart.borrow().len(), 1);
        assert_eq!(queue.pending_len(), 0);
        assert!(!queue.is_draining());
    }

    #[tokio::test]
    async fn test_transport_error_notifies_and_drain_continues() {
        let remote = Rc::new(FakeRemote {
            failing: Some(ApiError::Network("offline".into())),
            ..Default::default()
        });
        let queue = ScanQueue::new(remote.clone(), 8);
        let target = Recorder {
            catalog: vec![product(9, "12345678", "10.00")],
            ..Default::default()
        };

        let _ = queue.push("11111111");
        let _ = queue.push("12345678");
        queue.drain(&target).await;

        assert_eq!(*target.errors.borrow(), vec!["Error de red: offline".to_string()]);
        assert_eq!(target.cart.borrow().quantity_of(VariantId(9)), 1.0);
    }

    #[tokio::test]
    async fn test_codes_resolve_in_scan_order_one_at_a_time() {
        let remote = Rc::new(FakeRemote {
            products: vec![product(1, "11111111", "1"), product(2, "22222222", "2")],
            delays_ms: HashMap::from([("11111111".to_string(), 30)]),
            ..Default::default()
        });
        let queue = Rc::new(ScanQueue::new(remote.clone(), 8));
        let target = Rc::new(Recorder::default());

        let local = tokio::task::LocalSet::new();
        local
            .run_until(async {
                assert!(queue.push("11111111"));
                let worker = {
                    let queue = queue.clone();
                    let target = target.clone();
                    tokio::task::spawn_local(async move { queue.drain(target.as_ref()).await })
                };

                // second scan arrives while the first lookup is still sleeping
                tokio::time::sleep(Duration::from_millis(5)).await;
                assert!(queue.is_draining());
                assert!(!queue.push("22222222"), "must not start a second worker");

                // a redundant drain call returns without touching the queue
                queue.drain(target.as_ref()).await;
                assert_eq!(queue.pending_len(), 1);

                worker.await.unwrap();
            })
            .await;

        assert_eq!(
            *target.added.borrow(),
            vec!["11111111".to_string(), "22222222".to_string()]
        );
        assert_eq!(remote.max_in_flight.get(), 1);
        assert!(!queue.is_draining());
    }
}
