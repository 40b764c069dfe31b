use contracts::domain::a001_product::ProductId;
use contracts::domain::a003_brand::{Brand, BrandId};
use contracts::domain::a004_category::{Category, CategoryId};
use contracts::domain::common::EntityId;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::model::{ProductWizard, WizardStep};
use crate::domain::a002_product_variant::ui::form::VariantForm;
use crate::domain::a001_product::api::save_base_product;
use crate::domain::a002_product_variant::api::save_variant;
use crate::domain::a003_brand::api::fetch_brands;
use crate::domain::a004_category::api::fetch_categories;
use crate::shared::api_utils::ApiError;
use crate::shared::config::AppConfig;
use crate::shared::toast::use_toasts;
use crate::system::auth::context::use_auth;

fn parse_id(value: &str) -> Option<i64> {
    value.trim().parse().ok()
}

#[component]
pub fn ProductWizardView(on_created: Callback<ProductId>, on_cancel: Callback<()>) -> impl IntoView {
    let config = use_context::<AppConfig>().expect("AppConfig not provided in context");
    let auth = use_auth();
    let toasts = use_toasts();

    let wizard = RwSignal::new(ProductWizard::new(config.scanner.min_barcode_length));
    let (brands, set_brands) = signal(Vec::<Brand>::new());
    let (categories, set_categories) = signal(Vec::<Category>::new());
    let (error, set_error) = signal(Option::<String>::None);
    let (submitting, set_submitting) = signal(false);

    spawn_local(async move {
        match auth.call(fetch_brands).await {
            Ok(list) => set_brands.set(list),
            Err(e) => set_error.set(Some(e.to_string())),
        }
    });
    spawn_local(async move {
        match auth.call(fetch_categories).await {
            Ok(list) => set_categories.set(list),
            Err(e) => set_error.set(Some(e.to_string())),
        }
    });

    let step = move || wizard.with(|w| w.step());

    let next = move |_: leptos::ev::MouseEvent| {
        let mut result = Ok(WizardStep::BaseInfo);
        wizard.update(|w| result = w.next());
        set_error.set(result.err());
    };

    let back = move |_: leptos::ev::MouseEvent| {
        wizard.update(|w| {
            w.back();
        });
        set_error.set(None);
    };

    let submit = move |_: leptos::ev::MouseEvent| {
        if submitting.get_untracked() {
            return;
        }
        let snapshot = wizard.get_untracked();
        set_submitting.set(true);
        set_error.set(None);

        spawn_local(async move {
            let outcome = async {
                let product_id = match snapshot.created_product() {
                    Some(id) => id,
                    None => {
                        let dto = snapshot.base_dto().map_err(ApiError::Validation)?;
                        let product = auth
                            .call(|client| save_base_product(client, dto.clone()))
                            .await?;
                        log::info!("base product {} created", product.id.as_string());
                        wizard.update(|w| w.record_product_created(product.id));
                        product.id
                    }
                };
                let dto = snapshot
                    .variant_dto(Some(product_id))
                    .map_err(ApiError::Validation)?;
                auth.call(|client| save_variant(client, dto.clone())).await?;
                Ok::<ProductId, ApiError>(product_id)
            }
            .await;

            set_submitting.set(false);
            match outcome {
                Ok(id) => {
                    toasts.success("Producto creado");
                    on_created.run(id);
                }
                Err(e) => {
                    log::warn!("product wizard submit failed: {}", e);
                    set_error.set(Some(e.to_string()));
                }
            }
        });
    };

    let variant_field = move |read: fn(&VariantForm) -> String, write: fn(&mut VariantForm, String)| {
        view! {
            <input
                type="text"
                prop:value=move || wizard.with(|w| read(&w.variant))
                on:input=move |ev| {
                    let text = event_target_value(&ev);
                    wizard.update(|w| write(&mut w.variant, text));
                }
            />
        }
    };

    view! {
        <div class="wizard">
            <h2>"Nuevo producto"</h2>
            <ol class="wizard__steps">
                {[WizardStep::BaseInfo, WizardStep::Variant, WizardStep::Review]
                    .into_iter()
                    .map(|s| view! {
                        <li class:wizard__step--active=move || step() == s>{s.title()}</li>
                    })
                    .collect_view()}
            </ol>

            <Show when=move || error.get().is_some()>
                <div class="error-message">{move || error.get().unwrap_or_default()}</div>
            </Show>

            <Show when=move || step() == WizardStep::BaseInfo>
                <div class="form-group">
                    <label>"Nombre"</label>
                    <input
                        type="text"
                        prop:value=move || wizard.with(|w| w.base.name.clone())
                        on:input=move |ev| {
                            let text = event_target_value(&ev);
                            wizard.update(|w| w.base.name = text);
                        }
                    />
                </div>
                <div class="form-group">
                    <label>"Descripción"</label>
                    <textarea
                        prop:value=move || wizard.with(|w| w.base.description.clone())
                        on:input=move |ev| {
                            let text = event_target_value(&ev);
                            wizard.update(|w| w.base.description = text);
                        }
                    />
                </div>
                <div class="form-group">
                    <label>"Marca"</label>
                    <select on:change=move |ev| {
                        let id = parse_id(&event_target_value(&ev)).map(BrandId::new);
                        wizard.update(|w| w.base.brand_id = id);
                    }>
                        <option value="">"Sin marca"</option>
                        <For
                            each=move || brands.get()
                            key=|b| b.id
                            children=move |b| {
                                let id = b.id;
                                view! {
                                    <option
                                        value=id.as_string()
                                        selected=move || wizard.with(|w| w.base.brand_id == Some(id))
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
                        let id = parse_id(&event_target_value(&ev)).map(CategoryId::new);
                        wizard.update(|w| w.base.category_id = id);
                    }>
                        <option value="">"Sin categoría"</option>
                        <For
                            each=move || categories.get()
                            key=|c| c.id
                            children=move |c| {
                                let id = c.id;
                                view! {
                                    <option
                                        value=id.as_string()
                                        selected=move || wizard.with(|w| w.base.category_id == Some(id))
                                    >
                                        {c.name}
                                    </option>
                                }
                            }
                        />
                    </select>
                </div>
            </Show>

            <Show when=move || step() == WizardStep::Variant>
                <div class="form-group">
                    <label>"Precio"</label>
                    {variant_field(|v| v.price.clone(), |v, t| v.price = t)}
                </div>
                <div class="form-group">
                    <label>"Código de barras"</label>
                    {variant_field(|v| v.barcode.clone(), |v, t| v.barcode = t)}
                </div>
                <div class="form-group">
                    <label>"Contenido"</label>
                    {variant_field(|v| v.capacity.clone(), |v, t| v.capacity = t)}
                </div>
                <div class="form-group">
                    <label>"Unidad"</label>
                    {variant_field(|v| v.unit.clone(), |v, t| v.unit = t)}
                </div>
                <div class="form-group">
                    <label>"Stock"</label>
                    {variant_field(|v| v.stock.clone(), |v, t| v.stock = t)}
                </div>
            </Show>

            <Show when=move || step() == WizardStep::Review>
                {move || {
                    let w = wizard.get();
                    let brand = w.base.brand_id.and_then(|id| {
                        brands.with(|list| list.iter().find(|b| b.id == id).map(|b| b.name.clone()))
                    });
                    let category = w.base.category_id.and_then(|id| {
                        categories.with(|list| list.iter().find(|c| c.id == id).map(|c| c.name.clone()))
                    });
                    view! {
                        <dl class="wizard__review">
                            <dt>"Nombre"</dt><dd>{w.base.name.clone()}</dd>
                            <dt>"Marca"</dt><dd>{brand.unwrap_or_else(|| "-".into())}</dd>
                            <dt>"Categoría"</dt><dd>{category.unwrap_or_else(|| "-".into())}</dd>
                            <dt>"Precio"</dt><dd>{w.variant.price.clone()}</dd>
                            <dt>"Código"</dt><dd>{w.variant.barcode.clone()}</dd>
                            <dt>"Presentación"</dt>
                            <dd>{format!("{} {}", w.variant.capacity, w.variant.unit)}</dd>
                            <dt>"Stock"</dt><dd>{w.variant.stock.clone()}</dd>
                        </dl>
                    }
                }}
            </Show>

            <div class="wizard__actions">
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_cancel.run(())>
                    "Cancelar"
                </Button>
                <Show when=move || step() != WizardStep::BaseInfo>
                    <Button appearance=ButtonAppearance::Subtle on_click=back>
                        "Atrás"
                    </Button>
                </Show>
                <Show
                    when=move || wizard.with(|w| w.can_submit())
                    fallback=move || view! {
                        <Button appearance=ButtonAppearance::Primary on_click=next>
                            "Siguiente"
                        </Button>
                    }
                >
                    <Button
                        appearance=ButtonAppearance::Primary
                        disabled=Signal::derive(move || submitting.get())
                        on_click=submit
                    >
                        {move || if submitting.get() { "Guardando..." } else { "Crear producto" }}
                    </Button>
                </Show>
            </div>
        </div>
    }
}
