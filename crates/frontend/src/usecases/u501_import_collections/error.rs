use crate::shared::notification::Notification;
use thiserror::Error;

/// Ошибки импорта коллекции. `Display` - готовое сообщение для пользователя,
/// технические подробности остаются в полях и уходят в лог.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImportError {
    #[error("Please upload a valid CSV, or Excel file.")]
    InvalidFileType { mime: String },

    #[error("Error reading file. Please try again.")]
    Parse(String),

    #[error("Please select a product")]
    NoProductSelected,

    #[error("Please Upload a file.")]
    NoRows,

    #[error("{}", missing_headers_message(.0))]
    MissingHeaders(Vec<String>),

    #[error("Failed to load the selected product.")]
    ProductLoad(String),

    /// Бэкенд ответил `success: false`
    #[error("{0}")]
    Rejected(String),

    #[error("Error handling file data. Please try again.")]
    Transport(String),
}

const REJECTED_WITHOUT_MESSAGE: &str = "Product collection update failed";

impl ImportError {
    pub fn rejected(message: Option<String>) -> Self {
        ImportError::Rejected(
            message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| REJECTED_WITHOUT_MESSAGE.to_string()),
        )
    }
}

/// "Name, Width are required!" / "Tag is required!"
fn missing_headers_message(missing: &[String]) -> String {
    let verb = if missing.len() > 1 { "are" } else { "is" };
    format!("{} {} required!", missing.join(", "), verb)
}

impl From<ImportError> for Notification {
    fn from(err: ImportError) -> Self {
        Notification::error(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_headers_phrasing() {
        let one = ImportError::MissingHeaders(vec!["InStock".to_string()]);
        assert_eq!(one.to_string(), "InStock is required!");

        let many = ImportError::MissingHeaders(vec!["Tag".to_string(), "Price".to_string()]);
        assert_eq!(many.to_string(), "Tag, Price are required!");
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(ImportError::NoRows.to_string(), "Please Upload a file.");
        assert_eq!(
            ImportError::NoProductSelected.to_string(),
            "Please select a product"
        );
        assert_eq!(
            ImportError::InvalidFileType {
                mime: "image/png".to_string()
            }
            .to_string(),
            "Please upload a valid CSV, or Excel file."
        );
        assert_eq!(
            ImportError::Transport("Failed to send request".to_string()).to_string(),
            "Error handling file data. Please try again."
        );
    }

    #[test]
    fn test_rejected_uses_server_message() {
        assert_eq!(
            ImportError::rejected(Some("Product not found".to_string())).to_string(),
            "Product not found"
        );
        assert_eq!(
            ImportError::rejected(None).to_string(),
            REJECTED_WITHOUT_MESSAGE
        );
        assert_eq!(
            ImportError::rejected(Some("  ".to_string())).to_string(),
            REJECTED_WITHOUT_MESSAGE
        );
    }

    #[test]
    fn test_into_notification() {
        let notice: Notification = ImportError::NoRows.into();
        assert!(notice.is_error());
        assert!(!notice.reload);
        assert_eq!(notice.message, "Please Upload a file.");
    }
}
