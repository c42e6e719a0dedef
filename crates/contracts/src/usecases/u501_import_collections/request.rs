use crate::domain::a001_product::CollectionItem;
use serde::{Deserialize, Serialize};

/// Тело `POST /api/product/update-collection`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateCollectionRequest {
    /// ID товара, коллекция которого заменяется целиком
    pub id: String,
    pub collections: Vec<CollectionItem>,
}

/// Тело `POST /api/product/delete/`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteProductRequest {
    pub id: String,
}

/// Query string для `GET /api/product/get-products`.
/// Без `product_id` бэкенд отдаёт список всех товаров.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product_id: Option<String>,
}
