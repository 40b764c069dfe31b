//! Application top bar: sidebar toggle, title and the signed-in user.

use crate::layout::global_context::use_global_context;
use crate::system::auth::context::use_auth;
use crate::system::pages::account_dialog::AccountDialog;
use leptos::prelude::*;

#[component]
pub fn TopHeader() -> impl IntoView {
    let ctx = use_global_context();
    let auth = use_auth();
    let account_open = RwSignal::new(false);

    let is_sidebar_visible = move || ctx.left_open.get();

    view! {
        <div class="top-header">
            <div class="top-header__brand">
                <button
                    class="top-header__icon-btn"
                    on:click=move |_| ctx.toggle_left()
                    title=move || if is_sidebar_visible() { "Ocultar menú" } else { "Mostrar menú" }
                >
                    "☰"
                </button>
                <span class="top-header__title">"Punto de Venta"</span>
                <span class="top-header__page">{move || ctx.active.get().title()}</span>
            </div>

            <div class="top-header__actions">
                <button
                    class="top-header__user"
                    title="Mi cuenta"
                    on:click=move |_| account_open.set(true)
                >
                    {move || auth
                        .user()
                        .map(|u| u.display_name().to_string())
                        .unwrap_or_else(|| "Invitado".to_string())}
                </button>
            </div>

            <AccountDialog open=account_open />
        </div>
    }
}
