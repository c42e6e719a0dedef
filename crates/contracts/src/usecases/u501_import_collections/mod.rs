pub mod request;
pub mod response;
pub mod row;

pub use request::{DeleteProductRequest, ProductQuery, UpdateCollectionRequest};
pub use response::ApiResult;
pub use row::{CollectionRow, EXPORT_HEADERS, IMAGE_HEADER, NAME_HEADER, REQUIRED_HEADERS};
