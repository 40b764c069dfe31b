use contracts::domain::a002_product_variant::VariantId;
use leptos::prelude::*;
use thaw::*;

use super::cart_ledger::{parse_amount, CartLedger};
use super::cart_totals::CartTotals;
use crate::shared::number_format::{format_money, format_quantity};

#[component]
pub fn CartPanel(
    cart: RwSignal<CartLedger>,
    on_update_price: Callback<(VariantId, f64)>,
    on_update_quantity: Callback<(VariantId, f64, bool)>,
    on_remove: Callback<VariantId>,
    on_pay: Callback<()>,
) -> impl IntoView {
    let totals = Memo::new(move |_| cart.with(CartTotals::of));

    view! {
        <aside class="cart-panel">
            <header class="cart-panel__header">
                <h2>"Carrito"</h2>
                <span class="cart-panel__count">
                    {move || format!("{} artículos", format_quantity(totals.get().total_items))}
                </span>
            </header>

            <Show
                when=move || !cart.with(|c| c.is_empty())
                fallback=|| view! { <div class="cart-panel__empty">"El carrito está vacío"</div> }
            >
                <div class="cart-panel__lines">
                    <For
                        each=move || cart.with(|c| c.lines().iter().map(|l| l.variant_id).collect::<Vec<_>>())
                        key=|variant_id| *variant_id
                        children=move |variant_id| {
                            view! {
                                <CartRow
                                    variant_id=variant_id
                                    cart=cart
                                    on_update_price=on_update_price
                                    on_update_quantity=on_update_quantity
                                    on_remove=on_remove
                                />
                            }
                        }
                    />
                </div>
            </Show>

            <footer class="cart-panel__footer">
                <div class="cart-panel__total">
                    <span>"Total"</span>
                    <strong>{move || format_money(totals.get().amount_due)}</strong>
                </div>
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=Signal::derive(move || cart.with(|c| c.is_empty()))
                    on_click=move |_| on_pay.run(())
                >
                    "Cobrar"
                </Button>
            </footer>
        </aside>
    }
}

/// Text typed into a row field. While focused the field shows the draft;
/// otherwise it mirrors the cart.
#[derive(Clone, Copy)]
struct Draft {
    text: RwSignal<String>,
    editing: RwSignal<bool>,
}

impl Draft {
    fn new() -> Self {
        Self {
            text: RwSignal::new(String::new()),
            editing: RwSignal::new(false),
        }
    }

    fn begin(&self, current: f64) {
        self.text.set(current.to_string());
        self.editing.set(true);
    }

    fn finish(&self) -> Option<f64> {
        self.editing.set(false);
        parse_amount(&self.text.get_untracked())
    }
}

#[component]
fn CartRow(
    variant_id: VariantId,
    cart: RwSignal<CartLedger>,
    on_update_price: Callback<(VariantId, f64)>,
    on_update_quantity: Callback<(VariantId, f64, bool)>,
    on_remove: Callback<VariantId>,
) -> impl IntoView {
    let line = move || cart.with(|c| c.line(variant_id).cloned());
    let quantity = move || line().map(|l| l.quantity).unwrap_or(0.0);
    let price = move || line().map(|l| l.price).unwrap_or(0.0);

    let qty_draft = Draft::new();
    let price_draft = Draft::new();

    let qty_value = move || {
        if qty_draft.editing.get() {
            qty_draft.text.get()
        } else {
            quantity().to_string()
        }
    };
    let price_value = move || {
        if price_draft.editing.get() {
            price_draft.text.get()
        } else {
            price().to_string()
        }
    };

    view! {
        <div class="cart-line" class:cart-line--over-stock=move || line().is_some_and(|l| l.exceeds_stock())>
            <div class="cart-line__title">
                <span class="cart-line__name">{move || line().map(|l| l.name).unwrap_or_default()}</span>
                <span class="cart-line__meta">
                    {move || line().map(|l| {
                        format!("{} {}", l.brand.as_deref().unwrap_or_default(), l.presentation())
                    })}
                </span>
            </div>

            <label class="cart-line__field">
                "Cant."
                <input
                    type="text"
                    inputmode="decimal"
                    prop:value=qty_value
                    on:focus=move |_| qty_draft.begin(quantity())
                    on:input=move |ev| {
                        let text = event_target_value(&ev);
                        qty_draft.text.set(text.clone());
                        // partial input such as "" stays in the draft only
                        if let Some(q) = parse_amount(&text) {
                            on_update_quantity.run((variant_id, q, true));
                        }
                    }
                    on:blur=move |_| {
                        let q = qty_draft.finish().unwrap_or(0.0);
                        on_update_quantity.run((variant_id, q, false));
                    }
                />
            </label>

            <label class="cart-line__field">
                "Precio"
                <input
                    type="text"
                    inputmode="decimal"
                    prop:value=price_value
                    on:focus=move |_| price_draft.begin(price())
                    on:input=move |ev| price_draft.text.set(event_target_value(&ev))
                    on:blur=move |_| {
                        if let Some(p) = price_draft.finish() {
                            on_update_price.run((variant_id, p));
                        }
                    }
                />
            </label>

            <span class="cart-line__subtotal">
                {move || format_money(line().map(|l| l.subtotal()).unwrap_or(0.0))}
            </span>

            <Show when=move || line().is_some_and(|l| l.exceeds_stock())>
                <span class="cart-line__warning">
                    {move || {
                        let stock = line().and_then(|l| l.stock_quantity).unwrap_or(0.0);
                        format!("Stock disponible: {}", format_quantity(stock))
                    }}
                </span>
            </Show>

            <Button
                appearance=ButtonAppearance::Subtle
                on_click=move |_| on_remove.run(variant_id)
            >
                "Quitar"
            </Button>
        </div>
    }
}
