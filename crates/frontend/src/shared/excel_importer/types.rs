use contracts::domain::a001_product::CellValue;
use std::collections::HashMap;

/// Строка загруженного файла: заголовок колонки -> значение
pub type RawRow = HashMap<String, CellValue>;

pub const CSV_MIME: &str = "text/csv";
pub const XLS_MIME: &str = "application/vnd.ms-excel";
pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Значение атрибута `accept` для `<input type="file">`
pub const ACCEPT: &str = ".csv, .xls, .xlsx";

/// Формат загружаемого файла
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    Csv,
    /// .xls
    LegacySpreadsheet,
    /// .xlsx
    Spreadsheet,
}

impl UploadKind {
    pub fn from_mime(mime: &str) -> Option<Self> {
        match mime {
            CSV_MIME => Some(UploadKind::Csv),
            XLS_MIME => Some(UploadKind::LegacySpreadsheet),
            XLSX_MIME => Some(UploadKind::Spreadsheet),
            _ => None,
        }
    }

    fn from_extension(file_name: &str) -> Option<Self> {
        let (_, ext) = file_name.rsplit_once('.')?;
        match ext.to_ascii_lowercase().as_str() {
            "csv" => Some(UploadKind::Csv),
            "xls" => Some(UploadKind::LegacySpreadsheet),
            "xlsx" => Some(UploadKind::Spreadsheet),
            _ => None,
        }
    }

    /// Определить формат по MIME типу, который сообщил браузер.
    ///
    /// Пустой MIME (бывает на некоторых ОС) разрешается по расширению.
    /// Windows отдаёт `.csv` как `application/vnd.ms-excel`, такие файлы
    /// разбираются как CSV.
    pub fn detect(mime: &str, file_name: &str) -> Option<Self> {
        let mime = mime.trim();
        if mime.is_empty() {
            return Self::from_extension(file_name);
        }
        match Self::from_mime(mime)? {
            UploadKind::LegacySpreadsheet
                if Self::from_extension(file_name) == Some(UploadKind::Csv) =>
            {
                Some(UploadKind::Csv)
            }
            kind => Some(kind),
        }
    }

    pub fn is_spreadsheet(self) -> bool {
        !matches!(self, UploadKind::Csv)
    }

    pub fn mime(self) -> &'static str {
        match self {
            UploadKind::Csv => CSV_MIME,
            UploadKind::LegacySpreadsheet => XLS_MIME,
            UploadKind::Spreadsheet => XLSX_MIME,
        }
    }
}

/// Выбранный пользователем файл
#[derive(Debug, Clone, PartialEq)]
pub struct SelectedFile {
    pub name: String,
    pub size: u64,
    pub kind: UploadKind,
}

impl SelectedFile {
    pub fn size_label(&self) -> String {
        format!("{:.2} KB", self.size as f64 / 1024.0)
    }
}

/// Разобранные строки с сохранением порядка колонок для предпросмотра
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RowSet {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl RowSet {
    /// Построить строки из двумерного массива: первая строка - заголовки.
    ///
    /// Короткие строки дополняются пустыми ячейками, полностью пустые
    /// строки пропускаются, колонки без заголовка игнорируются.
    pub fn from_grid(grid: Vec<Vec<CellValue>>) -> Self {
        let mut lines = grid.into_iter();
        let Some(header_row) = lines.next() else {
            return Self::default();
        };

        let columns: Vec<(usize, String)> = header_row
            .iter()
            .enumerate()
            .map(|(idx, cell)| (idx, cell.to_string().trim().to_string()))
            .filter(|(_, title)| !title.is_empty())
            .collect();

        let rows = lines
            .filter(|line| line.iter().any(|cell| !cell.is_blank()))
            .map(|line| {
                columns
                    .iter()
                    .map(|(idx, title)| (title.clone(), line.get(*idx).cloned().unwrap_or_default()))
                    .collect::<RawRow>()
            })
            .collect();

        Self {
            headers: columns.into_iter().map(|(_, title)| title).collect(),
            rows,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Колонки первой строки данных (по ним проверяются обязательные заголовки)
    pub fn first_row_columns(&self) -> Vec<&str> {
        self.rows
            .first()
            .map(|row| row.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }
}

/// Результат разбора файла. Новая загрузка заменяет вариант целиком.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedRows {
    Csv(RowSet),
    Spreadsheet(RowSet),
}

impl ParsedRows {
    pub fn row_set(&self) -> &RowSet {
        match self {
            ParsedRows::Csv(set) | ParsedRows::Spreadsheet(set) => set,
        }
    }

    pub fn is_csv(&self) -> bool {
        matches!(self, ParsedRows::Csv(_))
    }

    pub fn len(&self) -> usize {
        self.row_set().len()
    }

    pub fn is_empty(&self) -> bool {
        self.row_set().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_row(cells: &[&str]) -> Vec<CellValue> {
        cells.iter().map(|c| CellValue::from(*c)).collect()
    }

    #[test]
    fn test_detect_by_mime() {
        assert_eq!(UploadKind::detect(CSV_MIME, "a.csv"), Some(UploadKind::Csv));
        assert_eq!(
            UploadKind::detect(XLSX_MIME, "a.xlsx"),
            Some(UploadKind::Spreadsheet)
        );
        assert_eq!(
            UploadKind::detect(XLS_MIME, "a.xls"),
            Some(UploadKind::LegacySpreadsheet)
        );
        assert_eq!(UploadKind::detect("application/pdf", "a.csv"), None);
        assert_eq!(UploadKind::detect("image/png", "a.png"), None);
    }

    #[test]
    fn test_detect_fallbacks() {
        assert_eq!(UploadKind::detect("", "rows.CSV"), Some(UploadKind::Csv));
        assert_eq!(UploadKind::detect("", "rows.txt"), None);
        assert_eq!(UploadKind::detect("", "rows"), None);
        assert_eq!(UploadKind::detect(XLS_MIME, "rows.csv"), Some(UploadKind::Csv));
    }

    #[test]
    fn test_from_grid_uses_first_row_as_headers() {
        let grid = vec![
            text_row(&["Name", " Width ", "Tag"]),
            vec![
                CellValue::from("Shelf A"),
                CellValue::Number(30.0),
                CellValue::from("wood"),
            ],
            text_row(&["Shelf B"]),
        ];

        let set = RowSet::from_grid(grid);
        assert_eq!(set.headers, vec!["Name", "Width", "Tag"]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.rows[0]["Width"], CellValue::Number(30.0));
        assert_eq!(set.rows[1]["Name"], CellValue::from("Shelf B"));
        assert_eq!(set.rows[1]["Tag"], CellValue::Empty);
    }

    #[test]
    fn test_from_grid_skips_blank_rows_and_columns() {
        let grid = vec![
            vec![CellValue::from("Name"), CellValue::Empty, CellValue::from("Tag")],
            vec![CellValue::Empty, CellValue::from(""), CellValue::Empty],
            text_row(&["Shelf A", "ignored", "wood"]),
        ];

        let set = RowSet::from_grid(grid);
        assert_eq!(set.headers, vec!["Name", "Tag"]);
        assert_eq!(set.len(), 1);
        assert!(!set.rows[0].contains_key(""));
    }

    #[test]
    fn test_from_grid_empty() {
        assert!(RowSet::from_grid(Vec::new()).is_empty());
        let only_headers = RowSet::from_grid(vec![text_row(&["Name"])]);
        assert!(only_headers.is_empty());
        assert!(only_headers.first_row_columns().is_empty());
    }
}
