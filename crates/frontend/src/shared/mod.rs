pub mod api_utils;
pub mod config;
pub mod excel_importer;
pub mod export;
pub mod icons;
pub mod modal;
pub mod notification;
