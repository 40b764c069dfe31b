use contracts::domain::a001_product::ProductId;
use contracts::domain::a002_product_variant::ProductVariant;
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use super::form::VariantForm;
use crate::domain::a002_product_variant::api::save_variant;
use crate::shared::config::AppConfig;
use crate::system::auth::context::use_auth;

/// Inline create/edit form for one variant of `product_id`
#[component]
pub fn VariantEditor(
    product_id: ProductId,
    #[prop(optional)] variant: Option<ProductVariant>,
    on_saved: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let config = use_context::<AppConfig>().expect("AppConfig not provided in context");
    let auth = use_auth();
    let min_barcode_length = config.scanner.min_barcode_length;

    let variant_id = variant.as_ref().map(|v| v.id);
    let form = RwSignal::new(
        variant
            .as_ref()
            .map(VariantForm::from_variant)
            .unwrap_or_default(),
    );
    let (error, set_error) = signal(Option::<String>::None);
    let (saving, set_saving) = signal(false);

    let save = move |_: leptos::ev::MouseEvent| {
        let dto = match form.with_untracked(|f| f.to_dto(variant_id, Some(product_id), min_barcode_length)) {
            Ok(dto) => dto,
            Err(msg) => {
                set_error.set(Some(msg));
                return;
            }
        };
        set_saving.set(true);
        spawn_local(async move {
            match auth.call(|client| save_variant(client, dto.clone())).await {
                Ok(_) => {
                    set_error.set(None);
                    on_saved.run(());
                }
                Err(e) => set_error.set(Some(e.to_string())),
            }
            set_saving.set(false);
        });
    };

    let field = move |label: &'static str,
                      read: fn(&VariantForm) -> String,
                      write: fn(&mut VariantForm, String)| {
        view! {
            <label class="variant-editor__field">
                {label}
                <input
                    type="text"
                    prop:value=move || form.with(|f| read(f))
                    on:input=move |ev| {
                        let text = event_target_value(&ev);
                        form.update(|f| write(f, text));
                    }
                />
            </label>
        }
    };

    view! {
        <div class="variant-editor">
            {move || error.get().map(|e| view! { <div class="error-message">{e}</div> })}
            {field("Precio", |f| f.price.clone(), |f, t| f.price = t)}
            {field("Código de barras", |f| f.barcode.clone(), |f, t| f.barcode = t)}
            {field("Contenido", |f| f.capacity.clone(), |f, t| f.capacity = t)}
            {field("Unidad", |f| f.unit.clone(), |f, t| f.unit = t)}
            {field("Stock", |f| f.stock.clone(), |f, t| f.stock = t)}
            <div class="variant-editor__actions">
                <Button appearance=ButtonAppearance::Secondary on_click=move |_| on_cancel.run(())>
                    "Cancelar"
                </Button>
                <Button
                    appearance=ButtonAppearance::Primary
                    disabled=Signal::derive(move || saving.get())
                    on_click=save
                >
                    "Guardar"
                </Button>
            </div>
        </div>
    }
}
