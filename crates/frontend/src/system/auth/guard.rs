use leptos::prelude::*;

use super::context::use_auth;

/// Component that requires authentication
/// Shows fallback if not authenticated
#[component]
pub fn RequireAuth(children: ChildrenFn) -> impl IntoView {
    let auth = use_auth();

    view! {
        <Show
            when=move || auth.is_authenticated()
            fallback=|| view! { <div class="warning-box">"Inicie sesión para continuar."</div> }
        >
            {children()}
        </Show>
    }
}
