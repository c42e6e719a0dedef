pub mod parser;
pub mod types;

pub use parser::{parse_upload, read_file_bytes};
pub use types::{ParsedRows, RawRow, RowSet, SelectedFile, UploadKind, ACCEPT};
