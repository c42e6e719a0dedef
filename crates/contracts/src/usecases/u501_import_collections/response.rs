use serde::{Deserialize, Serialize};

/// Ответ мутирующих эндпоинтов товара
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ApiResult {
    pub success: bool,
    /// Сообщение сервера, показывается пользователю как есть
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
