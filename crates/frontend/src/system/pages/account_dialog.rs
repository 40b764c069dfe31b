use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::system::auth::context::use_auth;

/// Signed-in user details and logout
#[component]
pub fn AccountDialog(open: RwSignal<bool>) -> impl IntoView {
    let auth = use_auth();
    let (busy, set_busy) = signal(false);

    let on_logout = move |_| {
        set_busy.set(true);
        spawn_local(async move {
            auth.logout().await;
            // signing out unmounts the shell together with this dialog
            let _ = set_busy.try_set(false);
            let _ = open.try_set(false);
        });
    };

    view! {
        <Dialog open=open>
            <DialogSurface>
                <DialogBody>
                    <DialogTitle>"Mi cuenta"</DialogTitle>
                    <DialogContent>
                        {move || match auth.user() {
                            Some(user) => view! {
                                <dl class="account-details">
                                    <dt>"Nombre"</dt>
                                    <dd>{user.display_name().to_string()}</dd>
                                    <dt>"Usuario"</dt>
                                    <dd>{user.username.clone()}</dd>
                                    <dt>"Correo"</dt>
                                    <dd>{user.email.clone().unwrap_or_else(|| "-".to_string())}</dd>
                                    <dt>"Rol"</dt>
                                    <dd>{if user.is_admin { "Administrador" } else { "Cajero" }}</dd>
                                </dl>
                            }.into_any(),
                            None => view! { <p>"Sin sesión activa"</p> }.into_any(),
                        }}
                    </DialogContent>
                    <DialogActions>
                        <Button
                            appearance=ButtonAppearance::Primary
                            disabled=Signal::from(busy)
                            on_click=on_logout
                        >
                            "Cerrar sesión"
                        </Button>
                        <Button
                            appearance=ButtonAppearance::Subtle
                            on_click=move |_| open.set(false)
                        >
                            "Cerrar"
                        </Button>
                    </DialogActions>
                </DialogBody>
            </DialogSurface>
        </Dialog>
    }
}
