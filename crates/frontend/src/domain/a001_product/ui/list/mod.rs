pub mod state;

use self::state::create_state;
use crate::domain::a001_product::api::{delete_base_product, search_products};
use crate::layout::global_context::{use_global_context, Page};
use crate::shared::config::AppConfig;
use crate::shared::number_format::{format_money, format_quantity};
use crate::shared::toast::use_toasts;
use crate::system::auth::context::use_auth;
use crate::usecases::u501_touch_sale::cart_ledger::parse_amount;
use contracts::domain::a001_product::{Product, ProductId, ProductSearchQuery};
use contracts::domain::common::EntityId;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

#[derive(Clone, Debug, PartialEq)]
pub struct ProductRow {
    pub key: i64,
    pub product_id: ProductId,
    pub name: String,
    pub brand: String,
    pub presentation: String,
    pub barcode: String,
    pub price: String,
    pub stock: String,
}

impl From<Product> for ProductRow {
    fn from(p: Product) -> Self {
        Self {
            key: p.id,
            product_id: p.product_id,
            presentation: p.presentation(),
            name: p.name,
            brand: p.brand.unwrap_or_else(|| "-".into()),
            barcode: p.barcode.unwrap_or_else(|| "-".into()),
            price: format_money(parse_amount(&p.price).unwrap_or(0.0)),
            stock: p
                .stock_quantity
                .map(format_quantity)
                .unwrap_or_else(|| "-".into()),
        }
    }
}

#[component]
#[allow(non_snake_case)]
pub fn ProductList() -> impl IntoView {
    let config = use_context::<AppConfig>().expect("AppConfig not provided in context");
    let auth = use_auth();
    let toasts = use_toasts();
    let ctx = use_global_context();
    let per_page = config.sales.catalog_page_size;

    let state = create_state();
    let search = RwSignal::new(String::new());
    let (items, set_items) = signal(Vec::<ProductRow>::new());
    let (total_pages, set_total_pages) = signal(0u64);
    let (error, set_error) = signal(Option::<String>::None);
    let (is_loading, set_is_loading) = signal(false);

    let fetch = move || {
        let s = state.get_untracked();
        let query = ProductSearchQuery {
            page: s.page,
            per_page,
            search_term: s.search.trim().to_string(),
            user_id: auth.user_id(),
            ..Default::default()
        };
        set_is_loading.set(true);
        spawn_local(async move {
            match auth.call(|client| search_products(client, query.clone())).await {
                Ok(response) => {
                    set_total_pages.set(response.total_pages(per_page));
                    set_items.set(response.products.into_iter().map(Into::into).collect());
                    set_error.set(None);
                }
                Err(e) => set_error.set(Some(e.to_string())),
            }
            set_is_loading.set(false);
        });
    };

    Effect::new(move |_| {
        state.track();
        fetch();
    });

    let apply_search = move || {
        let text = search.get_untracked();
        state.update(|s| {
            s.search = text;
            s.page = 1;
        });
    };

    let delete = move |id: ProductId, name: String| {
        let confirmed = web_sys::window()
            .and_then(|w| {
                w.confirm_with_message(&format!("¿Eliminar el producto \"{}\"?", name))
                    .ok()
            })
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        spawn_local(async move {
            match auth.call(|client| delete_base_product(client, id)).await {
                Ok(()) => {
                    toasts.success("Producto eliminado");
                    fetch();
                }
                Err(e) => toasts.error(e.to_string()),
            }
        });
    };

    view! {
        <div class="page">
            <div class="page__header">
                <h1>"Productos"</h1>
                <div class="page__actions">
                    <Input value=search placeholder="Buscar"/>
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| apply_search()>
                        "Buscar"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Primary
                        on_click=move |_| ctx.open(Page::NewProduct)
                    >
                        "Nuevo producto"
                    </Button>
                </div>
            </div>

            {move || error.get().map(|e| view! { <div class="error-message">{e}</div> })}

            <table class="table">
                <thead>
                    <tr>
                        <th>"Nombre"</th>
                        <th>"Marca"</th>
                        <th>"Presentación"</th>
                        <th>"Código"</th>
                        <th class="num">"Precio"</th>
                        <th class="num">"Stock"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || items.get()
                        key=|row| row.key
                        children=move |row| {
                            let id = row.product_id;
                            let name = row.name.clone();
                            view! {
                                <tr>
                                    <td>
                                        <a href="#" on:click=move |ev| {
                                            ev.prevent_default();
                                            ctx.open(Page::ProductDetails(id));
                                        }>{row.name}</a>
                                    </td>
                                    <td>{row.brand}</td>
                                    <td>{row.presentation}</td>
                                    <td>{row.barcode}</td>
                                    <td class="num">{row.price}</td>
                                    <td class="num">{row.stock}</td>
                                    <td>
                                        <Button
                                            appearance=ButtonAppearance::Subtle
                                            on_click=move |_| delete(id, name.clone())
                                        >
                                            "Eliminar"
                                        </Button>
                                    </td>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>

            <div class="pager">
                <Button
                    appearance=ButtonAppearance::Subtle
                    disabled=Signal::derive(move || is_loading.get() || state.with(|s| s.page <= 1))
                    on_click=move |_| state.update(|s| s.page = s.page.saturating_sub(1).max(1))
                >
                    "Anterior"
                </Button>
                <span>
                    {move || format!("Página {} de {}", state.with(|s| s.page), total_pages.get().max(1))}
                </span>
                <Button
                    appearance=ButtonAppearance::Subtle
                    disabled=Signal::derive(move || {
                        is_loading.get() || state.with(|s| u64::from(s.page) >= total_pages.get())
                    })
                    on_click=move |_| state.update(|s| s.page += 1)
                >
                    "Siguiente"
                </Button>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::domain::a002_product_variant::VariantId;

    #[test]
    fn test_row_from_product() {
        let product = Product {
            id: 5,
            product_id: ProductId::new(2),
            variant_id: VariantId::new(3),
            user_product_variant_id: None,
            name: "Agua".into(),
            price: "1.5".into(),
            capacity: Some("2".into()),
            unit: Some("l".into()),
            brand: None,
            barcode: None,
            stock_quantity: None,
        };
        let row = ProductRow::from(product);
        assert_eq!(row.key, 5);
        assert_eq!(row.presentation, "2 l");
        assert_eq!(row.brand, "-");
        assert_eq!(row.price, "$ 1,50");
        assert_eq!(row.stock, "-");
    }
}
