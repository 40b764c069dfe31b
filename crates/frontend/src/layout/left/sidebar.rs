//! Navigation menu

use crate::layout::global_context::{use_global_context, Page};
use leptos::prelude::*;

#[derive(Clone, Debug, PartialEq)]
struct MenuGroup {
    label: &'static str,
    items: Vec<Page>,
}

fn menu_groups() -> Vec<MenuGroup> {
    vec![
        MenuGroup {
            label: "Caja",
            items: vec![Page::Sale],
        },
        MenuGroup {
            label: "Catálogo",
            items: vec![Page::Products, Page::NewProduct, Page::Brands, Page::Categories],
        },
    ]
}

/// Pages that highlight `item` in the menu
fn is_under(active: Page, item: Page) -> bool {
    match (active, item) {
        (Page::ProductDetails(_), Page::Products) => true,
        (a, b) => a == b,
    }
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = use_global_context();

    view! {
        <nav class="sidebar">
            {menu_groups()
                .into_iter()
                .map(|group| {
                    view! {
                        <div class="sidebar__group">
                            <div class="sidebar__group-label">{group.label}</div>
                            {group
                                .items
                                .into_iter()
                                .map(|page| {
                                    view! {
                                        <button
                                            class="sidebar__item"
                                            class:sidebar__item--active=move || is_under(ctx.active.get(), page)
                                            on:click=move |_| ctx.open(page)
                                        >
                                            {page.title()}
                                        </button>
                                    }
                                })
                                .collect_view()}
                        </div>
                    }
                })
                .collect_view()}
        </nav>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a001_product::ProductId;

    #[test]
    fn test_details_highlight_product_list() {
        assert!(is_under(Page::ProductDetails(ProductId(1)), Page::Products));
        assert!(is_under(Page::Brands, Page::Brands));
        assert!(!is_under(Page::Sale, Page::Products));
    }
}
