/// Экспорт данных в CSV и скачивание файлов через браузер
use wasm_bindgen::JsCast;
use web_sys::{Blob, BlobPropertyBag, HtmlAnchorElement, Url};

/// Trait для типов, которые могут быть выгружены в CSV
pub trait CsvExportable {
    /// Возвращает массив заголовков колонок
    fn headers() -> Vec<&'static str>;

    /// Преобразует объект в массив значений в порядке заголовков
    fn to_csv_row(&self) -> Vec<String>;
}

/// Собирает CSV (разделитель - запятая, UTF-8 BOM для Excel).
/// Пустой список даёт файл из одной строки заголовков.
pub fn build_csv<T: CsvExportable>(data: &[T]) -> Result<String, String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer
        .write_record(T::headers())
        .map_err(|e| format!("Failed to write CSV header: {}", e))?;

    for item in data {
        writer
            .write_record(item.to_csv_row())
            .map_err(|e| format!("Failed to write CSV row: {}", e))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| format!("Failed to flush CSV: {}", e))?;
    let body = String::from_utf8(bytes).map_err(|e| format!("CSV is not UTF-8: {}", e))?;

    Ok(format!("\u{FEFF}{}", body))
}

/// Выгружает список в CSV файл и инициирует скачивание
pub fn export_to_csv<T: CsvExportable>(data: &[T], filename: &str) -> Result<(), String> {
    let csv_content = build_csv(data)?;
    let blob = create_csv_blob(&csv_content)?;
    download_blob(&blob, filename)
}

/// Создает Blob объект с CSV данными
fn create_csv_blob(content: &str) -> Result<Blob, String> {
    let array = js_sys::Array::new();
    array.push(&wasm_bindgen::JsValue::from_str(content));

    let properties = BlobPropertyBag::new();
    properties.set_type("text/csv;charset=utf-8;");

    Blob::new_with_str_sequence_and_options(&array, &properties)
        .map_err(|e| format!("Failed to create blob: {:?}", e))
}

/// Инициирует скачивание Blob через браузер
fn download_blob(blob: &Blob, filename: &str) -> Result<(), String> {
    let url = Url::create_object_url_with_blob(blob)
        .map_err(|e| format!("Failed to create object URL: {:?}", e))?;

    let result = download_url(&url, filename);

    // Освобождаем URL даже если клик не удался
    Url::revoke_object_url(&url).map_err(|e| format!("Failed to revoke URL: {:?}", e))?;

    result
}

/// Скачивает файл по ссылке через временный `<a download>`
pub fn download_url(href: &str, filename: &str) -> Result<(), String> {
    let window = web_sys::window().ok_or("No window object")?;
    let document = window.document().ok_or("No document object")?;
    let body = document.body().ok_or("No body element")?;

    let anchor = document
        .create_element("a")
        .map_err(|e| format!("Failed to create anchor: {:?}", e))?
        .dyn_into::<HtmlAnchorElement>()
        .map_err(|e| format!("Failed to cast to anchor: {:?}", e))?;

    anchor.set_href(href);
    anchor.set_download(filename);
    anchor
        .style()
        .set_property("display", "none")
        .map_err(|e| format!("Failed to set style: {:?}", e))?;

    body.append_child(&anchor)
        .map_err(|e| format!("Failed to append anchor: {:?}", e))?;

    anchor.click();

    body.remove_child(&anchor)
        .map_err(|e| format!("Failed to remove anchor: {:?}", e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Pair(&'static str, &'static str);

    impl CsvExportable for Pair {
        fn headers() -> Vec<&'static str> {
            vec!["Name", "Tag"]
        }

        fn to_csv_row(&self) -> Vec<String> {
            vec![self.0.to_string(), self.1.to_string()]
        }
    }

    #[test]
    fn test_build_csv() {
        let csv = build_csv(&[Pair("Shelf A", "wood"), Pair("Shelf, wide", "oak \"x\"")]).unwrap();
        assert_eq!(
            csv,
            "\u{FEFF}Name,Tag\nShelf A,wood\n\"Shelf, wide\",\"oak \"\"x\"\"\"\n"
        );
    }

    #[test]
    fn test_build_csv_header_only() {
        let csv = build_csv::<Pair>(&[]).unwrap();
        assert_eq!(csv, "\u{FEFF}Name,Tag\n");
    }
}
