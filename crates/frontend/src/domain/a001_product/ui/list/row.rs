use crate::domain::a001_product::api::{ProductApi, SharedProductApi};
use crate::shared::icons::icon;
use crate::shared::notification::Notification;
use contracts::domain::a001_product::Product;
use contracts::usecases::u501_import_collections::DeleteProductRequest;
use leptos::prelude::*;
use leptos::task::spawn_local;

pub const CONFIRM_DELETE_MESSAGE: &str = "Are you sure you want to delete this product?";
const DELETE_FAILED_MESSAGE: &str = "Failed to delete product";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Cancelled,
    Deleted,
    Failed(Notification),
}

/// Удаление товара. Запрос уходит только если `confirm` вернул true.
pub async fn delete_with_confirmation(
    api: &dyn ProductApi,
    product_id: &str,
    confirm: impl FnOnce(&str) -> bool,
) -> DeleteOutcome {
    if !confirm(CONFIRM_DELETE_MESSAGE) {
        return DeleteOutcome::Cancelled;
    }

    let request = DeleteProductRequest {
        id: product_id.to_string(),
    };
    match api.delete_product(&request).await {
        Ok(result) if result.success => {
            log::info!("Deleted product {}", product_id);
            DeleteOutcome::Deleted
        }
        Ok(result) => {
            log::warn!("Backend refused to delete {}: {:?}", product_id, result.message);
            DeleteOutcome::Failed(Notification::error(
                result.message.unwrap_or_else(|| DELETE_FAILED_MESSAGE.to_string()),
            ))
        }
        Err(e) => {
            log::error!("Failed to delete product {}: {}", product_id, e);
            DeleteOutcome::Failed(Notification::error(DELETE_FAILED_MESSAGE))
        }
    }
}

fn confirm_in_browser(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

#[component]
pub fn ProductRow(
    product: Product,
    api: SharedProductApi,
    /// Вызывается с id удалённого товара
    #[prop(optional)]
    on_deleted: Option<Callback<String>>,
) -> impl IntoView {
    let api = StoredValue::new_local(api);
    let product_id = product.id.clone();

    let thumbnail = match product.thumbnail_url() {
        Some(url) => view! {
            <img class="product-row__thumb" src=url.to_string() alt=product.name.clone() />
        }
        .into_any(),
        None => view! {
            <span class="product-row__thumb product-row__thumb--empty">{icon("products")}</span>
        }
        .into_any(),
    };

    let on_delete = move |_| {
        let api = api.get_value();
        let id = product_id.clone();
        spawn_local(async move {
            match delete_with_confirmation(api.as_ref(), &id, confirm_in_browser).await {
                DeleteOutcome::Deleted => {
                    if let Some(cb) = on_deleted {
                        cb.run(id);
                    }
                }
                DeleteOutcome::Failed(notice) => notice.present(),
                DeleteOutcome::Cancelled => {}
            }
        });
    };

    view! {
        <tr class="table__row product-row">
            <td class="table__cell">{thumbnail}</td>
            <td class="table__cell">{product.name.clone()}</td>
            <td class="table__cell">{product.model_number.clone()}</td>
            <td class="table__cell table__cell--actions">
                <button class="button button--icon" title="Edit">
                    {icon("edit")}
                </button>
                <button class="button button--icon button--danger" title="Delete" on:click=on_delete>
                    {icon("delete")}
                </button>
            </td>
        </tr>
    }
}
