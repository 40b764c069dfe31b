use contracts::domain::a001_product::{BaseProductDto, ProductId};
use contracts::domain::a002_product_variant::{ProductVariant, VariantId};
use contracts::domain::a003_brand::Brand;
use contracts::domain::a004_category::Category;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::domain::a001_product::api::{fetch_base_product, save_base_product};
use crate::domain::a002_product_variant::api::{delete_variant, fetch_variants};
use crate::domain::a003_brand::api::fetch_brands;
use crate::domain::a004_category::api::fetch_categories;
use crate::shared::toast::ToastService;
use crate::system::auth::context::AuthStore;

/// Which variant row, if any, is open in the inline editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VariantEdit {
    Closed,
    New,
    Existing(VariantId),
}

/// ViewModel for the base product details page
#[derive(Clone, Copy)]
pub struct ProductDetailsViewModel {
    pub id: ProductId,
    pub form: RwSignal<BaseProductDto>,
    pub variants: RwSignal<Vec<ProductVariant>>,
    pub brands: RwSignal<Vec<Brand>>,
    pub categories: RwSignal<Vec<Category>>,
    pub editing: RwSignal<VariantEdit>,
    pub error: RwSignal<Option<String>>,
    pub saving: RwSignal<bool>,
    auth: AuthStore,
    toasts: ToastService,
}

impl ProductDetailsViewModel {
    pub fn new(id: ProductId, auth: AuthStore, toasts: ToastService) -> Self {
        Self {
            id,
            form: RwSignal::new(BaseProductDto::default()),
            variants: RwSignal::new(Vec::new()),
            brands: RwSignal::new(Vec::new()),
            categories: RwSignal::new(Vec::new()),
            editing: RwSignal::new(VariantEdit::Closed),
            error: RwSignal::new(None),
            saving: RwSignal::new(false),
            auth,
            toasts,
        }
    }

    pub fn load(&self) {
        let this = *self;
        spawn_local(async move {
            match this.auth.call(|client| fetch_base_product(client, this.id)).await {
                Ok(product) => this.form.set(BaseProductDto::from(&product)),
                Err(e) => this.error.set(Some(format!("Error al cargar: {}", e))),
            }
        });
        spawn_local(async move {
            if let Ok(list) = this.auth.call(fetch_brands).await {
                this.brands.set(list);
            }
        });
        spawn_local(async move {
            if let Ok(list) = this.auth.call(fetch_categories).await {
                this.categories.set(list);
            }
        });
        self.reload_variants();
    }

    pub fn reload_variants(&self) {
        let this = *self;
        spawn_local(async move {
            match this.auth.call(|client| fetch_variants(client, this.id)).await {
                Ok(list) => this.variants.set(list),
                Err(e) => this.error.set(Some(e.to_string())),
            }
        });
    }

    pub fn save(&self) {
        let this = *self;
        let dto = self.form.get_untracked();
        if let Err(msg) = dto.validate() {
            self.error.set(Some(msg));
            return;
        }
        self.saving.set(true);
        spawn_local(async move {
            match this
                .auth
                .call(|client| save_base_product(client, dto.clone()))
                .await
            {
                Ok(product) => {
                    this.form.set(BaseProductDto::from(&product));
                    this.error.set(None);
                    this.toasts.success("Producto guardado");
                }
                Err(e) => this.error.set(Some(e.to_string())),
            }
            this.saving.set(false);
        });
    }

    pub fn delete_variant(&self, id: VariantId) {
        let this = *self;
        spawn_local(async move {
            match this.auth.call(|client| delete_variant(client, id)).await {
                Ok(()) => {
                    this.toasts.success("Variante eliminada");
                    this.reload_variants();
                }
                Err(e) => this.toasts.error(e.to_string()),
            }
        });
    }

    pub fn variant_saved(&self) {
        self.editing.set(VariantEdit::Closed);
        self.toasts.success("Variante guardada");
        self.reload_variants();
    }
}
