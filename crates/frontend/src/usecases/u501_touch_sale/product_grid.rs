use contracts::domain::a001_product::Product;
use contracts::domain::a002_product_variant::VariantId;
use leptos::prelude::*;
use thaw::*;

use super::cart_ledger::{parse_amount, quantity_after_decrement, CartLedger};
use crate::shared::number_format::{format_money, format_quantity};

/// Catalog tiles. Tapping a tile adds one unit; the badge takes one back.
#[component]
pub fn ProductGrid(
    products: ReadSignal<Vec<Product>>,
    cart: RwSignal<CartLedger>,
    search: RwSignal<String>,
    loading: ReadSignal<bool>,
    error: ReadSignal<Option<String>>,
    page: RwSignal<u32>,
    total_pages: Signal<u32>,
    on_add: Callback<Product>,
    on_decrement: Callback<(VariantId, f64)>,
) -> impl IntoView {
    view! {
        <section class="sale-grid">
            <div class="sale-grid__search">
                <Input
                    value=search
                    placeholder="Buscar por nombre, marca o código"
                />
            </div>

            <Show when=move || error.get().is_some()>
                <div class="error-message">{move || error.get().unwrap_or_default()}</div>
            </Show>

            <Show when=move || loading.get()>
                <div class="sale-grid__loading">"Cargando productos..."</div>
            </Show>

            <Show when=move || !loading.get() && products.with(|p| p.is_empty())>
                <div class="sale-grid__empty">"No hay productos para mostrar"</div>
            </Show>

            <div class="sale-grid__tiles">
                <For
                    each=move || products.get()
                    key=|p| p.variant_id
                    children=move |product| {
                        let variant_id = product.variant_id;
                        let in_cart = move || cart.with(|c| c.quantity_of(variant_id));
                        let price = parse_amount(&product.price).unwrap_or(0.0);
                        let presentation = product.presentation();
                        let brand = product.brand.clone().unwrap_or_default();
                        let name = product.name.clone();
                        let tapped = product.clone();
                        view! {
                            <div class="product-tile" on:click=move |_| on_add.run(tapped.clone())>
                                <Show when=move || { in_cart() > 0.0 }>
                                    <button
                                        class="product-tile__badge"
                                        title="Quitar una unidad"
                                        on:click=move |ev| {
                                            ev.stop_propagation();
                                            on_decrement.run((variant_id, quantity_after_decrement(in_cart())));
                                        }
                                    >
                                        {move || format_quantity(in_cart())}
                                    </button>
                                </Show>
                                <div class="product-tile__name">{name}</div>
                                <div class="product-tile__meta">
                                    {brand} " " {presentation}
                                </div>
                                <div class="product-tile__price">{format_money(price)}</div>
                            </div>
                        }
                    }
                />
            </div>

            <div class="sale-grid__pager">
                <Button
                    appearance=ButtonAppearance::Subtle
                    disabled=Signal::derive(move || page.get() <= 1)
                    on_click=move |_| page.update(|p| *p = p.saturating_sub(1).max(1))
                >
                    "Anterior"
                </Button>
                <span>
                    {move || format!("Página {} de {}", page.get(), total_pages.get().max(1))}
                </span>
                <Button
                    appearance=ButtonAppearance::Subtle
                    disabled=Signal::derive(move || page.get() >= total_pages.get())
                    on_click=move |_| page.update(|p| *p += 1)
                >
                    "Siguiente"
                </Button>
            </div>
        </section>
    }
}
