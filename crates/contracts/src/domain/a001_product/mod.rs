pub mod aggregate;
pub mod cell;

pub use aggregate::{CollectionImage, CollectionItem, Product, ProductImage};
pub use cell::CellValue;
