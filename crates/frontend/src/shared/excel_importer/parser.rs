use super::types::{ParsedRows, RawRow, RowSet, UploadKind};
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use contracts::domain::a001_product::CellValue;
use std::io::Cursor;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Читает содержимое выбранного файла целиком
pub async fn read_file_bytes(file: &web_sys::File) -> Result<Vec<u8>, String> {
    use wasm_bindgen_futures::JsFuture;

    let array_buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|e| format!("Failed to read file: {:?}", e))?;

    let uint8_array = js_sys::Uint8Array::new(&array_buffer);
    let mut bytes = vec![0; uint8_array.length() as usize];
    uint8_array.copy_to(&mut bytes);

    Ok(bytes)
}

/// Разбирает файл в строки вида "заголовок -> значение"
pub fn parse_upload(kind: UploadKind, bytes: Vec<u8>) -> Result<ParsedRows, String> {
    match kind {
        UploadKind::Csv => parse_csv(&bytes).map(ParsedRows::Csv),
        UploadKind::LegacySpreadsheet | UploadKind::Spreadsheet => {
            parse_spreadsheet(bytes).map(ParsedRows::Spreadsheet)
        }
    }
}

/// CSV с заголовком в первой строке. Все значения - текст.
pub fn parse_csv(bytes: &[u8]) -> Result<RowSet, String> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::Headers)
        .from_reader(bytes);

    let columns: Vec<(usize, String)> = reader
        .headers()
        .map_err(|e| format!("Invalid CSV header: {}", e))?
        .iter()
        .enumerate()
        .filter(|(_, title)| !title.is_empty())
        .map(|(idx, title)| (idx, title.to_string()))
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| format!("Invalid CSV record: {}", e))?;
        let row: RawRow = columns
            .iter()
            .map(|(idx, title)| {
                let value = record.get(*idx).map(CellValue::from).unwrap_or_default();
                (title.clone(), value)
            })
            .collect();
        rows.push(row);
    }

    Ok(RowSet {
        headers: columns.into_iter().map(|(_, title)| title).collect(),
        rows,
    })
}

/// Первый лист .xls/.xlsx, первая строка - заголовки
pub fn parse_spreadsheet(bytes: Vec<u8>) -> Result<RowSet, String> {
    let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes))
        .map_err(|e| format!("Failed to open spreadsheet: {}", e))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| "Spreadsheet has no sheets".to_string())?
        .map_err(|e| format!("Failed to read first sheet: {}", e))?;

    let grid = range
        .rows()
        .map(|row| row.iter().map(cell_value).collect())
        .collect();

    Ok(RowSet::from_grid(grid))
}

fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(b) => CellValue::Bool(*b),
        other => CellValue::Text(other.to_string()),
    }
}
