use contracts::domain::a001_product::ProductId;
use contracts::domain::common::EntityId;
use leptos::prelude::Effect;
use leptos::prelude::*;
use std::collections::HashMap;
use web_sys::window;

/// Screens reachable from the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Sale,
    Products,
    ProductDetails(ProductId),
    NewProduct,
    Brands,
    Categories,
}

impl Page {
    /// Value of the `active` query parameter
    pub fn key(&self) -> String {
        match self {
            Page::Sale => "sale".into(),
            Page::Products => "products".into(),
            Page::ProductDetails(id) => format!("product:{}", id.as_string()),
            Page::NewProduct => "product:new".into(),
            Page::Brands => "brands".into(),
            Page::Categories => "categories".into(),
        }
    }

    pub fn from_key(key: &str) -> Option<Page> {
        match key {
            "sale" => Some(Page::Sale),
            "products" => Some(Page::Products),
            "product:new" => Some(Page::NewProduct),
            "brands" => Some(Page::Brands),
            "categories" => Some(Page::Categories),
            other => other
                .strip_prefix("product:")
                .and_then(|id| ProductId::from_string(id).ok())
                .map(Page::ProductDetails),
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::Sale => "Venta",
            Page::Products => "Productos",
            Page::ProductDetails(_) => "Producto",
            Page::NewProduct => "Nuevo producto",
            Page::Brands => "Marcas",
            Page::Categories => "Categorías",
        }
    }
}

#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    pub active: RwSignal<Page>,
    pub left_open: RwSignal<bool>,
}

impl AppGlobalContext {
    pub fn new() -> Self {
        Self {
            active: RwSignal::new(Page::Sale),
            left_open: RwSignal::new(true),
        }
    }

    /// Restores the page from `?active=` and keeps the URL in sync afterwards.
    pub fn init_router_integration(&self) {
        let search = window()
            .and_then(|w| w.location().search().ok())
            .unwrap_or_default();
        let params: HashMap<String, String> =
            serde_qs::from_str(search.trim_start_matches('?')).unwrap_or_default();
        if let Some(page) = params.get("active").and_then(|key| Page::from_key(key)) {
            self.active.set(page);
        }

        let this = *self;
        Effect::new(move |_| {
            let key = this.active.get().key();
            let query_string =
                serde_qs::to_string(&HashMap::from([("active".to_string(), key)]))
                    .unwrap_or_default();
            let new_url = format!("?{}", query_string);

            let current_search = window()
                .and_then(|w| w.location().search().ok())
                .unwrap_or_default();

            if current_search != new_url {
                if let Some(w) = window() {
                    if let Ok(history) = w.history() {
                        let _ = history.replace_state_with_url(
                            &wasm_bindgen::JsValue::NULL,
                            "",
                            Some(&new_url),
                        );
                    }
                }
            }
        });
    }

    pub fn open(&self, page: Page) {
        log::debug!("open page {}", page.key());
        self.active.set(page);
    }

    pub fn toggle_left(&self) {
        self.left_open.update(|val| *val = !*val);
    }
}

pub fn use_global_context() -> AppGlobalContext {
    use_context::<AppGlobalContext>().expect("AppGlobalContext not found in context")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_keys_round_trip() {
        for page in [
            Page::Sale,
            Page::Products,
            Page::ProductDetails(ProductId(17)),
            Page::NewProduct,
            Page::Brands,
            Page::Categories,
        ] {
            assert_eq!(Page::from_key(&page.key()), Some(page));
        }
    }

    #[test]
    fn test_unknown_keys() {
        assert_eq!(Page::from_key("a005_marketplace"), None);
        assert_eq!(Page::from_key("product:abc"), None);
        assert_eq!(Page::from_key(""), None);
    }
}
