//! Преобразования между строками файла и элементами коллекции.
//!
//! Здесь нет ввода-вывода: сессия загрузки и экран вызывают эти функции,
//! а сеть и файлы остаются на их стороне.

use crate::shared::config::{ImageConfig, SampleConfig};
use crate::shared::excel_importer::{RawRow, RowSet};
use crate::shared::export::CsvExportable;
use contracts::domain::a001_product::{CellValue, CollectionImage, CollectionItem, Product};
use contracts::usecases::u501_import_collections::{
    CollectionRow, EXPORT_HEADERS, IMAGE_HEADER, NAME_HEADER, REQUIRED_HEADERS,
};

/// Обязательные колонки, которых нет в первой строке данных (в порядке
/// [`REQUIRED_HEADERS`])
pub fn missing_headers(rows: &RowSet) -> Vec<String> {
    let present = rows.first_row_columns();
    REQUIRED_HEADERS
        .iter()
        .filter(|required| !present.contains(*required))
        .map(|required| required.to_string())
        .collect()
}

pub fn new_item_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Ссылка на картинку по имени файла из колонки `Image`.
///
/// `id` строится из текста после последней точки в имени файла
/// (или из всего имени, если точки нет).
pub fn image_reference(file_name: &str, images: &ImageConfig) -> CollectionImage {
    let suffix = file_name.rsplit('.').next().unwrap_or_default();
    CollectionImage {
        url: format!("{}{}", images.base_url, file_name),
        id: format!("{}{}", images.id_prefix, suffix),
    }
}

fn has_name(row: &RawRow) -> bool {
    row.get(NAME_HEADER).is_some_and(|name| !name.is_blank())
}

fn cell(row: &RawRow, header: &str) -> CellValue {
    row.get(header).cloned().unwrap_or_default()
}

pub fn row_to_item(row: &RawRow, images: &ImageConfig, id: String) -> CollectionItem {
    let image_file = row
        .get(IMAGE_HEADER)
        .map(|value| value.to_string())
        .unwrap_or_default();

    CollectionItem {
        id,
        name: cell(row, "Name"),
        width: cell(row, "Width"),
        tag: cell(row, "Tag"),
        price: cell(row, "Price"),
        discounted_price: cell(row, "DiscountedPrice"),
        in_stock: cell(row, "InStock"),
        image: image_reference(image_file.trim(), images),
    }
}

/// Один элемент на каждую строку с непустым `Name`, у каждого свой `_id`
pub fn build_collection(
    rows: &RowSet,
    images: &ImageConfig,
    mut next_id: impl FnMut() -> String,
) -> Vec<CollectionItem> {
    rows.rows
        .iter()
        .filter(|row| has_name(row))
        .map(|row| row_to_item(row, images, next_id()))
        .collect()
}

/// Обратное преобразование для экспорта: из URL остаётся имя файла
pub fn item_to_row(item: &CollectionItem) -> CollectionRow {
    CollectionRow {
        name: item.name.to_string(),
        width: item.width.to_string(),
        tag: item.tag.to_string(),
        price: item.price.to_string(),
        discounted_price: item.discounted_price.to_string(),
        in_stock: item.in_stock.to_string(),
        image: item.image.file_name().to_string(),
    }
}

pub fn export_rows(product: &Product) -> Vec<CollectionRow> {
    product.collections.iter().map(item_to_row).collect()
}

pub fn export_file_name(product: &Product) -> String {
    format!("{}_collection_data.csv", product.name)
}

impl CsvExportable for CollectionRow {
    fn headers() -> Vec<&'static str> {
        EXPORT_HEADERS.to_vec()
    }

    fn to_csv_row(&self) -> Vec<String> {
        self.values()
    }
}

/// Формат шаблона для скачивания
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleFormat {
    Csv,
    Excel,
}

impl SampleFormat {
    /// Значение из выпадающего списка: `csv` | `excel`
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "csv" => Some(SampleFormat::Csv),
            "excel" => Some(SampleFormat::Excel),
            _ => None,
        }
    }
}

/// Путь к статическому шаблону и имя файла для сохранения
pub fn sample_template(format: SampleFormat, samples: &SampleConfig) -> (String, String) {
    let file_name = match format {
        SampleFormat::Csv => samples.csv_file.clone(),
        SampleFormat::Excel => samples.excel_file.clone(),
    };
    (format!("{}{}", samples.path, file_name), file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), CellValue::from(*v)))
            .collect()
    }

    fn set(rows: Vec<RawRow>) -> RowSet {
        RowSet {
            headers: Vec::new(),
            rows,
        }
    }

    fn full_row(name: &str) -> RawRow {
        row(&[
            ("Name", name),
            ("Width", "30"),
            ("Tag", "wood"),
            ("Price", "100"),
            ("DiscountedPrice", "90"),
            ("InStock", "yes"),
            ("Image", "a.jpg"),
        ])
    }

    #[test]
    fn test_missing_headers_in_required_order() {
        let rows = set(vec![row(&[("Name", "x"), ("Width", "1"), ("Image", "a.jpg")])]);
        assert_eq!(
            missing_headers(&rows),
            vec!["Tag", "Price", "DiscountedPrice", "InStock"]
        );
        assert!(missing_headers(&set(vec![full_row("Shelf A")])).is_empty());
    }

    #[test]
    fn test_image_reference() {
        let images = ImageConfig {
            base_url: "https://cdn/cabinet-photos/".to_string(),
            id_prefix: "cabinet-photos/".to_string(),
        };
        assert_eq!(
            image_reference("a.jpg", &images),
            CollectionImage {
                url: "https://cdn/cabinet-photos/a.jpg".to_string(),
                id: "cabinet-photos/jpg".to_string(),
            }
        );
        assert_eq!(image_reference("noext", &images).id, "cabinet-photos/noext");
        assert_eq!(image_reference("", &images).url, "https://cdn/cabinet-photos/");
    }

    #[test]
    fn test_build_collection_drops_rows_without_name() {
        let mut nameless = full_row("");
        nameless.insert("Name".to_string(), CellValue::from("   "));
        let mut missing_name = full_row("x");
        missing_name.remove("Name");

        let rows = set(vec![full_row("Shelf A"), nameless, missing_name, full_row("Shelf B")]);
        let mut counter = 0;
        let items = build_collection(&rows, &ImageConfig::default(), || {
            counter += 1;
            format!("id-{counter}")
        });

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id, "id-1");
        assert_eq!(items[0].name, CellValue::from("Shelf A"));
        assert_eq!(items[1].id, "id-2");
        assert_eq!(items[1].name, CellValue::from("Shelf B"));
    }

    #[test]
    fn test_row_to_item_keeps_numbers() {
        let mut source = full_row("Shelf A");
        source.insert("Price".to_string(), CellValue::Number(100.0));
        source.insert("Image".to_string(), CellValue::from(" a.jpg "));

        let item = row_to_item(&source, &ImageConfig::default(), "c1".to_string());
        assert_eq!(item.price, CellValue::Number(100.0));
        assert_eq!(item.discounted_price, CellValue::from("90"));
        assert!(item.image.url.ends_with("/a.jpg"));
    }

    #[test]
    fn test_new_item_ids_are_unique() {
        let a = new_item_id();
        let b = new_item_id();
        assert!(!a.is_empty());
        assert_ne!(a, b);
    }

    #[test]
    fn test_item_to_row() {
        let item = CollectionItem {
            id: "c1".to_string(),
            name: CellValue::from("Shelf A"),
            width: CellValue::Number(30.0),
            tag: CellValue::from("wood"),
            price: CellValue::Number(100.0),
            discounted_price: CellValue::from("90"),
            in_stock: CellValue::Bool(true),
            image: CollectionImage {
                url: "https://cdn/cabinet-photos/a.jpg".to_string(),
                id: "cabinet-photos/jpg".to_string(),
            },
        };

        let exported = item_to_row(&item);
        assert_eq!(exported.width, "30");
        assert_eq!(exported.price, "100");
        assert_eq!(exported.in_stock, "true");
        assert_eq!(exported.image, "a.jpg");
        assert_eq!(exported.to_csv_row().len(), CollectionRow::headers().len());
    }

    #[test]
    fn test_export_file_name() {
        let product = Product {
            name: "Cabinet".to_string(),
            ..Default::default()
        };
        assert_eq!(export_file_name(&product), "Cabinet_collection_data.csv");
        assert!(export_rows(&product).is_empty());
    }

    #[test]
    fn test_sample_template() {
        let samples = SampleConfig::default();
        assert_eq!(
            sample_template(SampleFormat::Csv, &samples),
            (
                "/samples/sample-prod-collection.csv".to_string(),
                "sample-prod-collection.csv".to_string()
            )
        );
        assert_eq!(
            sample_template(SampleFormat::Excel, &samples).0,
            "/samples/sample-prod-collection.xlsx"
        );
        assert_eq!(SampleFormat::parse("excel"), Some(SampleFormat::Excel));
        assert_eq!(SampleFormat::parse(""), None);
    }
}
