use contracts::domain::a001_product::{presentation, ProductId};
use contracts::domain::a003_brand::BrandId;
use contracts::domain::a004_category::CategoryId;
use contracts::domain::common::EntityId;
use leptos::prelude::*;
use thaw::*;

use super::view_model::{ProductDetailsViewModel, VariantEdit};
use crate::domain::a002_product_variant::ui::VariantEditor;
use crate::layout::global_context::{use_global_context, Page};
use crate::shared::number_format::{format_money, format_quantity};
use crate::shared::toast::use_toasts;
use crate::system::auth::context::use_auth;
use crate::usecases::u501_touch_sale::cart_ledger::parse_amount;

#[component]
pub fn ProductDetails(id: ProductId) -> impl IntoView {
    let ctx = use_global_context();
    let vm = ProductDetailsViewModel::new(id, use_auth(), use_toasts());
    vm.load();

    let on_variant_saved = Callback::new(move |_: ()| vm.variant_saved());
    let on_variant_cancel = Callback::new(move |_: ()| vm.editing.set(VariantEdit::Closed));

    view! {
        <div class="page">
            <div class="page__header">
                <h1>{move || vm.form.with(|f| f.name.clone())}</h1>
                <div class="page__actions">
                    <Button appearance=ButtonAppearance::Secondary on_click=move |_| ctx.open(Page::Products)>
                        "Volver"
                    </Button>
                    <Button
                        appearance=ButtonAppearance::Primary
                        disabled=Signal::derive(move || vm.saving.get())
                        on_click=move |_| vm.save()
                    >
                        "Guardar"
                    </Button>
                </div>
            </div>

            {move || vm.error.get().map(|e| view! { <div class="error-message">{e}</div> })}

            <div class="form-group">
                <label>"Nombre"</label>
                <input
                    type="text"
                    prop:value=move || vm.form.with(|f| f.name.clone())
                    on:input=move |ev| {
                        let text = event_target_value(&ev);
                        vm.form.update(|f| f.name = text);
                    }
                />
            </div>
            <div class="form-group">
                <label>"Descripción"</label>
                <textarea
                    prop:value=move || vm.form.with(|f| f.description.clone().unwrap_or_default())
                    on:input=move |ev| {
                        let text = event_target_value(&ev);
                        vm.form.update(|f| f.description = (!text.trim().is_empty()).then_some(text));
                    }
                />
            </div>
            <div class="form-group">
                <label>"Marca"</label>
                <select on:change=move |ev| {
                    let id = event_target_value(&ev).parse().ok().map(BrandId::new);
                    vm.form.update(|f| f.brand_id = id);
                }>
                    <option value="">"Sin marca"</option>
                    <For
                        each=move || vm.brands.get()
                        key=|b| b.id
                        children=move |b| {
                            let id = b.id;
                            view! {
                                <option
                                    value=id.as_string()
                                    selected=move || vm.form.with(|f| f.brand_id == Some(id))
                                >
                                    {b.name}
                                </option>
                            }
                        }
                    />
                </select>
            </div>
            <div class="form-group">
                <label>"Categoría"</label>
                <select on:change=move |ev| {
                    let id = event_target_value(&ev).parse().ok().map(CategoryId::new);
                    vm.form.update(|f| f.category_id = id);
                }>
                    <option value="">"Sin categoría"</option>
                    <For
                        each=move || vm.categories.get()
                        key=|c| c.id
                        children=move |c| {
                            let id = c.id;
                            view! {
                                <option
                                    value=id.as_string()
                                    selected=move || vm.form.with(|f| f.category_id == Some(id))
                                >
                                    {c.name}
                                </option>
                            }
                        }
                    />
                </select>
            </div>

            <h2>"Variantes"</h2>
            <table class="table">
                <thead>
                    <tr>
                        <th>"Presentación"</th>
                        <th>"Código"</th>
                        <th class="num">"Precio"</th>
                        <th class="num">"Stock"</th>
                        <th></th>
                    </tr>
                </thead>
                <tbody>
                    <For
                        each=move || vm.variants.get()
                        key=|v| v.id
                        children=move |v| {
                            let variant_id = v.id;
                            let presentation = presentation(v.capacity.as_deref(), v.unit.as_deref());
                            let edited = v.clone();
                            view! {
                                <tr>
                                    <td>{presentation}</td>
                                    <td>{v.barcode.clone().unwrap_or_else(|| "-".into())}</td>
                                    <td class="num">{format_money(parse_amount(&v.price).unwrap_or(0.0))}</td>
                                    <td class="num">
                                        {v.stock_quantity.map(format_quantity).unwrap_or_else(|| "-".into())}
                                    </td>
                                    <td>
                                        <Button
                                            appearance=ButtonAppearance::Subtle
                                            on_click=move |_| vm.editing.set(VariantEdit::Existing(variant_id))
                                        >
                                            "Editar"
                                        </Button>
                                        <Button
                                            appearance=ButtonAppearance::Subtle
                                            on_click=move |_| vm.delete_variant(variant_id)
                                        >
                                            "Eliminar"
                                        </Button>
                                    </td>
                                </tr>
                                <Show when=move || vm.editing.get() == VariantEdit::Existing(variant_id)>
                                    <tr>
                                        <td colspan="5">
                                            <VariantEditor
                                                product_id=id
                                                variant=edited.clone()
                                                on_saved=on_variant_saved
                                                on_cancel=on_variant_cancel
                                            />
                                        </td>
                                    </tr>
                                </Show>
                            }
                        }
                    />
                </tbody>
            </table>

            <Show
                when=move || vm.editing.get() == VariantEdit::New
                fallback=move || view! {
                    <Button
                        appearance=ButtonAppearance::Secondary
                        on_click=move |_| vm.editing.set(VariantEdit::New)
                    >
                        "Agregar variante"
                    </Button>
                }
            >
                <VariantEditor product_id=id on_saved=on_variant_saved on_cancel=on_variant_cancel/>
            </Show>
        </div>
    }
}
