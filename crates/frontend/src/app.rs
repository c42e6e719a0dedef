use crate::domain::a001_product::ui::list::ProductsPage;
use crate::shared::config::{load_config, AppConfig};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn App() -> impl IntoView {
    // The page waits for /config.toml (or the defaults) before it talks to the API.
    let (config, set_config) = signal(Option::<AppConfig>::None);

    spawn_local(async move {
        set_config.set(Some(load_config().await));
    });

    view! {
        {move || match config.get() {
            Some(config) => view! { <ProductsPage config=config /> }.into_any(),
            None => view! { <div class="page page--loading"><thaw::Spinner /></div> }.into_any(),
        }}
    }
}
