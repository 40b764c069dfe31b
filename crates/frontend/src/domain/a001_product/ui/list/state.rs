use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq)]
pub struct ProductListState {
    pub search: String,
    pub page: u32,
}

impl Default for ProductListState {
    fn default() -> Self {
        Self {
            search: String::new(),
            page: 1,
        }
    }
}

pub fn create_state() -> RwSignal<ProductListState> {
    RwSignal::new(ProductListState::default())
}
