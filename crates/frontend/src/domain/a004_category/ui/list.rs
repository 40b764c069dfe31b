use contracts::domain::a004_category::{Category, CategoryDto, CategoryId};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a004_category::api::{delete_category, fetch_categories, save_category};
use crate::shared::toast::use_toasts;
use crate::system::auth::context::use_auth;

/// Categories with inline create, rename and delete
#[component]
pub fn CategoryList() -> impl IntoView {
    let auth = use_auth();
    let toasts = use_toasts();

    let (items, set_items) = signal(Vec::<Category>::new());
    let (error, set_error) = signal(Option::<String>::None);
    let new_name = RwSignal::new(String::new());
    let renaming = RwSignal::new(Option::<(CategoryId, String)>::None);

    let fetch = move || {
        spawn_local(async move {
            match auth.call(fetch_categories).await {
                Ok(list) => {
                    set_items.set(list);
                    set_error.set(None);
                }
                Err(e) => set_error.set(Some(e.to_string())),
            }
        });
    };
    fetch();

    let save = move |dto: CategoryDto| {
        spawn_local(async move {
            match auth.call(|client| save_category(client, dto.clone())).await {
                Ok(category) => {
                    log::info!("category {} saved", category.name);
                    renaming.set(None);
                    new_name.set(String::new());
                    fetch();
                }
                Err(e) => toasts.error(e.to_string()),
            }
        });
    };

    let remove = move |id: CategoryId| {
        let confirmed = web_sys::window()
            .and_then(|w| w.confirm_with_message("¿Eliminar la categoría?").ok())
            .unwrap_or(false);
        if !confirmed {
            return;
        }
        spawn_local(async move {
            match auth.call(|client| delete_category(client, id)).await {
                Ok(()) => fetch(),
                Err(e) => toasts.error(e.to_string()),
            }
        });
    };

    view! {
        <div class="page">
            <h1>"Categorías"</h1>
            {move || error.get().map(|e| view! { <div class="error-message">{e}</div> })}

            <div class="inline-create">
                <Input value=new_name placeholder="Nueva categoría"/>
                <Button
                    appearance=ButtonAppearance::Primary
                    on_click=move |_| save(CategoryDto { id: None, name: new_name.get_untracked().trim().to_string() })
                >
                    "Agregar"
                </Button>
            </div>

            <ul class="named-list">
                <For
                    each=move || items.get()
                    key=|b| (b.id, b.name.clone())
                    children=move |category| {
                        let id = category.id;
                        let name = category.name.clone();
                        let is_renaming = move || renaming.with(|r| r.as_ref().is_some_and(|(rid, _)| *rid == id));
                        view! {
                            <li>
                                <Show
                                    when=is_renaming
                                    fallback=move || view! { <span>{name.clone()}</span> }
                                >
                                    <input
                                        type="text"
                                        prop:value=move || renaming.with(|r| r.as_ref().map(|(_, n)| n.clone()).unwrap_or_default())
                                        on:input=move |ev| {
                                            let text = event_target_value(&ev);
                                            renaming.update(|r| if let Some((_, n)) = r { *n = text });
                                        }
                                    />
                                    <Button
                                        appearance=ButtonAppearance::Primary
                                        on_click=move |_| {
                                            if let Some((id, name)) = renaming.get_untracked() {
                                                save(CategoryDto { id: Some(id), name: name.trim().to_string() });
                                            }
                                        }
                                    >
                                        "Guardar"
                                    </Button>
                                </Show>
                                <Button
                                    appearance=ButtonAppearance::Subtle
                                    on_click={
                                        let name = category.name.clone();
                                        move |_| renaming.set(Some((id, name.clone())))
                                    }
                                >
                                    "Renombrar"
                                </Button>
                                <Button appearance=ButtonAppearance::Subtle on_click=move |_| remove(id)>
                                    "Eliminar"
                                </Button>
                            </li>
                        }
                    }
                />
            </ul>
        </div>
    }
}
