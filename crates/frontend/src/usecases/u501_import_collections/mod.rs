pub mod error;
pub mod pipeline;
pub mod session;
pub mod view;

pub use error::ImportError;
pub use session::{submit, UploadSession, UploadState};
pub use view::CollectionsImport;
