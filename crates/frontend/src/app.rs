use crate::layout::global_context::AppGlobalContext;
use crate::routes::routes::AppRoutes;
use crate::shared::api_utils::api_base;
use crate::shared::config::AppConfig;
use crate::shared::toast::{ToastHost, ToastService};
use crate::system::auth::context::AuthProvider;
use leptos::prelude::*;

#[component]
pub fn App(config: AppConfig) -> impl IntoView {
    let base = api_base(&config.api);
    log::info!("api base {}", base);

    provide_context(ToastService::new(config.sales.toast_duration_ms));
    provide_context(config);
    provide_context(AppGlobalContext::new());

    view! {
        <AuthProvider api_base=base>
            <AppRoutes />
        </AuthProvider>
        <ToastHost />
    }
}
