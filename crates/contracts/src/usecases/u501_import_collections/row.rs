use serde::{Deserialize, Serialize};

/// Колонки, без которых файл коллекции не принимается
pub const REQUIRED_HEADERS: [&str; 6] = [
    "Name",
    "Width",
    "Tag",
    "Price",
    "DiscountedPrice",
    "InStock",
];

pub const NAME_HEADER: &str = "Name";
pub const IMAGE_HEADER: &str = "Image";

/// Порядок колонок при экспорте коллекции в CSV
pub const EXPORT_HEADERS: [&str; 7] = [
    "Name",
    "Width",
    "Tag",
    "Price",
    "DiscountedPrice",
    "InStock",
    "Image",
];

/// Строка коллекции в табличном виде (формат файла импорта/экспорта)
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CollectionRow {
    pub name: String,
    pub width: String,
    pub tag: String,
    pub price: String,
    pub discounted_price: String,
    pub in_stock: String,
    /// Имя файла картинки без базового URL
    pub image: String,
}

impl CollectionRow {
    /// Значения в порядке [`EXPORT_HEADERS`]
    pub fn values(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.width.clone(),
            self.tag.clone(),
            self.price.clone(),
            self.discounted_price.clone(),
            self.in_stock.clone(),
            self.image.clone(),
        ]
    }
}
