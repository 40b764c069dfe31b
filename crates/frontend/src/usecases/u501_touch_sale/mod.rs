pub mod api;
pub mod cart_ledger;
pub mod cart_panel;
pub mod cart_totals;
pub mod payment_dialog;
pub mod product_grid;
pub mod scan_classifier;
pub mod scan_listener;
pub mod scan_queue;
pub mod view;

pub use view::SalesScreen;
