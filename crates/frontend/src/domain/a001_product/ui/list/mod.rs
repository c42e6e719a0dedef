pub mod row;

use self::row::ProductRow;
use crate::domain::a001_product::api::{HttpProductApi, SharedProductApi};
use crate::shared::config::AppConfig;
use crate::shared::icons::icon;
use crate::shared::modal::Modal;
use crate::usecases::u501_import_collections::CollectionsImport;
use contracts::domain::a001_product::Product;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::rc::Rc;

pub const IMPORT_DIALOG_TITLE: &str = "Add Product collections (csv, excel)";

/// Ключ строки таблицы. Записи без `_id` различаются по позиции.
fn row_key(idx: usize, product: &Product) -> String {
    if product.id.is_empty() {
        format!("#{}", idx)
    } else {
        product.id.clone()
    }
}

#[component]
#[allow(non_snake_case)]
pub fn ProductsPage(config: AppConfig) -> impl IntoView {
    let (items, set_items) = signal::<Vec<Product>>(Vec::new());
    let (error, set_error) = signal::<Option<String>>(None);
    let (show_import, set_show_import) = signal(false);
    let import_busy = RwSignal::new(false);

    let http: SharedProductApi = Rc::new(HttpProductApi::new(&config.api.base_url));
    let api = StoredValue::new_local(http);
    let config = StoredValue::new(config);

    let fetch = move || {
        let api = api.get_value();
        spawn_local(async move {
            match api.fetch_products().await {
                Ok(products) => {
                    log::debug!("Loaded {} products", products.len());
                    set_items.set(products);
                    set_error.set(None);
                }
                Err(e) => {
                    log::error!("Failed to load products: {}", e);
                    set_error.set(Some(e));
                }
            }
        });
    };

    fetch();

    view! {
        <div class="page">
            <div class="header">
                <div class="header__content">
                    <h1 class="header__title">{"Products"}</h1>
                </div>
                <div class="header__actions">
                    <button class="button button--primary" on:click=move |_| set_show_import.set(true)>
                        {icon("upload")}
                        {"Add collections"}
                    </button>
                    <button class="button button--secondary" on:click=move |_| fetch()>
                        {icon("refresh")}
                        {"Refresh"}
                    </button>
                </div>
            </div>

            {move || error.get().map(|e| view! {
                <div class="warning-box warning-box--error">
                    <span class="warning-box__icon">"⚠"</span>
                    <span class="warning-box__text">{e}</span>
                </div>
            })}

            <div class="table-container">
                <table class="table__data">
                    <thead class="table__head">
                        <tr>
                            <th class="table__header-cell">"Image"</th>
                            <th class="table__header-cell">"Name"</th>
                            <th class="table__header-cell">"Model number"</th>
                            <th class="table__header-cell">"Actions"</th>
                        </tr>
                    </thead>
                    <tbody>
                        <For
                            each={move || items.get().into_iter().enumerate().collect::<Vec<_>>()}
                            key={|(idx, p): &(usize, Product)| row_key(*idx, p)}
                            children=move |(_, product): (usize, Product)| {
                                view! { <ProductRow product=product api=api.get_value() /> }
                            }
                        />
                    </tbody>
                </table>
            </div>

            <Show when=move || show_import.get()>
                <Modal
                    title=IMPORT_DIALOG_TITLE
                    on_close=Callback::new(move |_| set_show_import.set(false))
                    locked=Signal::derive(move || import_busy.get())
                >
                    <CollectionsImport
                        products=items
                        api=api.get_value()
                        config=config.get_value()
                        on_refresh=Callback::new(move |_| fetch())
                        busy=import_busy
                    />
                </Modal>
            </Show>
        </div>
    }
}
