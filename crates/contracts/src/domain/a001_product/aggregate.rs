use super::cell::CellValue;
use serde::{Deserialize, Serialize};

/// Товар каталога. Владелец данных - бэкенд, фронтенд только читает его
/// и переписывает список `collections`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub model_number: String,
    #[serde(default)]
    pub product_images: Vec<ProductImage>,
    #[serde(default)]
    pub collections: Vec<CollectionItem>,
}

impl Product {
    /// Первая картинка товара для миниатюры в таблице
    pub fn thumbnail_url(&self) -> Option<&str> {
        self.product_images
            .first()
            .map(|img| img.url.as_str())
            .filter(|url| !url.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProductImage {
    #[serde(default)]
    pub url: String,
}

/// Элемент коллекции товара (размер, вариант исполнения)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionItem {
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub name: CellValue,
    #[serde(default)]
    pub width: CellValue,
    #[serde(default)]
    pub tag: CellValue,
    #[serde(default)]
    pub price: CellValue,
    #[serde(default)]
    pub discounted_price: CellValue,
    #[serde(default)]
    pub in_stock: CellValue,
    #[serde(default)]
    pub image: CollectionImage,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CollectionImage {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub id: String,
}

impl CollectionImage {
    /// Имя файла картинки - последний сегмент URL
    pub fn file_name(&self) -> &str {
        self.url.rsplit('/').next().unwrap_or_default()
    }
}
