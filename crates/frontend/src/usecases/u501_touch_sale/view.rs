use std::rc::Rc;

use contracts::domain::a001_product::{Product, ProductSearchQuery};
use contracts::domain::a002_product_variant::VariantId;
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::api::RemoteProductLookup;
use super::cart_ledger::CartLedger;
use super::cart_panel::CartPanel;
use super::cart_totals::CartTotals;
use super::payment_dialog::PaymentDialog;
use super::product_grid::ProductGrid;
use super::scan_listener::ScanListener;
use super::scan_queue::{ScanQueue, ScanTarget};
use crate::domain::a001_product::api::search_products;
use crate::shared::config::AppConfig;
use crate::shared::toast::{use_toasts, ToastService};
use crate::system::auth::context::use_auth;

/// Signals the scan resolver works against.
///
/// The screen may unmount while a lookup is in flight, so every access
/// tolerates disposed signals.
#[derive(Clone, Copy)]
struct SaleSession {
    catalog: ReadSignal<Vec<Product>>,
    cart: RwSignal<CartLedger>,
    toasts: ToastService,
}

impl ScanTarget for SaleSession {
    fn find_loaded(&self, code: &str) -> Option<Product> {
        self.catalog
            .try_with_untracked(|products| products.iter().find(|p| p.has_barcode(code)).cloned())
            .flatten()
    }

    fn add_to_cart(&self, product: Product) {
        log::debug!("adding variant {} to cart", product.variant_id.0);
        let _ = self.cart.try_update(|cart| cart.add(&product));
    }

    fn notify_error(&self, message: String) {
        self.toasts.error(message);
    }
}

#[component]
pub fn SalesScreen() -> impl IntoView {
    let config = use_context::<AppConfig>().expect("AppConfig not provided in context");
    let auth = use_auth();
    let toasts = use_toasts();
    let per_page = config.sales.catalog_page_size;
    let debounce_ms = config.sales.search_debounce_ms;

    let search = RwSignal::new(String::new());
    let search_term = RwSignal::new(String::new());
    let page = RwSignal::new(1u32);
    let (catalog, set_catalog) = signal(Vec::<Product>::new());
    let (total_pages, set_total_pages) = signal(0u32);
    let (loading, set_loading) = signal(false);
    let (error, set_error) = signal(Option::<String>::None);
    let cart = RwSignal::new(CartLedger::new());
    let pay_open = RwSignal::new(false);

    let session = SaleSession {
        catalog,
        cart,
        toasts,
    };

    // --- catalog ---

    let request_seq = StoredValue::new(0u64);
    let load_catalog = move |term: String, page_no: u32| {
        let seq = request_seq.get_value() + 1;
        request_seq.set_value(seq);
        let query = ProductSearchQuery {
            page: page_no,
            per_page,
            search_term: term.trim().to_string(),
            user_id: auth.user_id(),
            ..Default::default()
        };
        set_loading.set(true);
        spawn_local(async move {
            let result = auth
                .call(|client| search_products(client, query.clone()))
                .await;
            // a newer search superseded this one
            if request_seq.try_get_value() != Some(seq) {
                return;
            }
            match result {
                Ok(response) => {
                    set_total_pages.set(response.total_pages(per_page) as u32);
                    set_catalog.set(response.products);
                    set_error.set(None);
                }
                Err(e) => {
                    log::error!("catalog load failed: {}", e);
                    set_error.set(Some(e.to_string()));
                }
            }
            set_loading.set(false);
        });
    };

    Effect::new(move |_| {
        let term = search_term.get();
        let page_no = page.get();
        load_catalog(term, page_no);
    });

    let debounce_gen = StoredValue::new(0u64);
    Effect::new(move |_| {
        let text = search.get();
        let generation = debounce_gen.get_value() + 1;
        debounce_gen.set_value(generation);
        spawn_local(async move {
            TimeoutFuture::new(debounce_ms).await;
            if debounce_gen.try_get_value() != Some(generation) {
                return;
            }
            if search_term.get_untracked() != text {
                search_term.set(text);
                page.set(1);
            }
        });
    });

    // --- scanner ---

    let queue = StoredValue::new_local(Rc::new(ScanQueue::new(
        RemoteProductLookup::new(auth, config.sales.lookup_page_size),
        config.scanner.min_barcode_length,
    )));

    let on_scan = move |code: String| {
        log::info!("scanned code {}", code);
        let Some(queue) = queue.try_get_value() else {
            return;
        };
        if queue.push(code) {
            spawn_local(async move {
                queue.drain(&session).await;
            });
        }
    };

    let listener = StoredValue::new_local(ScanListener::attach(config.scanner, on_scan));
    on_cleanup(move || {
        // dropping the listener detaches it
        let _ = listener.try_update_value(|l| l.take());
    });

    // --- cart actions ---

    let on_add_product = Callback::new(move |product: Product| {
        cart.update(|c| c.add(&product));
    });

    let on_decrement = Callback::new(move |(variant_id, next): (VariantId, f64)| {
        cart.update(|c| c.update_quantity(variant_id, next, false));
    });

    let on_update_price = Callback::new(move |(variant_id, price): (VariantId, f64)| {
        cart.update(|c| c.update_price(variant_id, price));
    });

    let on_update_quantity =
        Callback::new(move |(variant_id, quantity, allow_zero): (VariantId, f64, bool)| {
            cart.update(|c| c.update_quantity(variant_id, quantity, allow_zero));
        });

    let on_remove_product = Callback::new(move |variant_id: VariantId| {
        cart.update(|c| c.remove(variant_id));
    });

    let amount_due = Signal::derive(move || cart.with(CartTotals::of).amount_due);

    let on_pay = Callback::new(move |_: ()| {
        if cart.with_untracked(|c| c.is_empty()) {
            toasts.info("El carrito está vacío");
            return;
        }
        pay_open.set(true);
    });

    let on_payment_confirmed = Callback::new(move |_: ()| {
        let totals = cart.with_untracked(CartTotals::of);
        log::info!(
            "sale completed: {} items, amount due {:.2}",
            totals.total_items,
            totals.amount_due
        );
        cart.set(CartLedger::new());
        toasts.success("Venta registrada");
    });

    view! {
        <div class="sale-screen">
            <ProductGrid
                products=catalog
                cart=cart
                search=search
                loading=loading
                error=error
                page=page
                total_pages=total_pages.into()
                on_add=on_add_product
                on_decrement=on_decrement
            />
            <CartPanel
                cart=cart
                on_update_price=on_update_price
                on_update_quantity=on_update_quantity
                on_remove=on_remove_product
                on_pay=on_pay
            />
            <PaymentDialog
                open=pay_open
                amount_due=amount_due
                on_confirm=on_payment_confirmed
            />
        </div>
    }
}
