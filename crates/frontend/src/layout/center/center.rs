use crate::domain::a001_product::ui::details::ProductDetails;
use crate::domain::a001_product::ui::list::ProductList;
use crate::domain::a001_product::ui::wizard::ProductWizardView;
use crate::domain::a003_brand::ui::BrandList;
use crate::domain::a004_category::ui::CategoryList;
use crate::layout::global_context::{use_global_context, Page};
use crate::usecases::u501_touch_sale::SalesScreen;
use leptos::prelude::*;

#[component]
pub fn Center(children: Children) -> impl IntoView {
    view! {
        <div data-zone="center" class="app-content" style="flex: 1; overflow: auto;">
            {children()}
        </div>
    }
}

/// Renders the active page; switching pages disposes the previous one.
#[component]
pub fn PageView() -> impl IntoView {
    let ctx = use_global_context();
    let active = Memo::new(move |_| ctx.active.get());

    move || match active.get() {
        Page::Sale => view! { <SalesScreen /> }.into_any(),
        Page::Products => view! { <ProductList /> }.into_any(),
        Page::ProductDetails(id) => view! { <ProductDetails id=id /> }.into_any(),
        Page::NewProduct => view! {
            <ProductWizardView
                on_created=Callback::new(move |id| ctx.open(Page::ProductDetails(id)))
                on_cancel=Callback::new(move |_: ()| ctx.open(Page::Products))
            />
        }
        .into_any(),
        Page::Brands => view! { <BrandList /> }.into_any(),
        Page::Categories => view! { <CategoryList /> }.into_any(),
    }
}
