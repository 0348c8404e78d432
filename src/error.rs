//! Ошибки приложения
//!
//! Все вызовы бэкенда и проверки форм возвращают `Result<T, AppError>`.

/// Единый тип ошибки
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AppError {
    /// Не задан адрес бэкенда или ключ API
    #[error("Настройки подключения: {0}")]
    Config(String),

    /// fetch не выполнился (сеть, CORS, отсутствие window)
    #[error("Ошибка сети: {0}")]
    Network(String),

    /// Бэкенд ответил кодом вне 2xx
    #[error("{message}")]
    Http { status: u16, message: String },

    /// Ответ не удалось разобрать
    #[error("Ошибка разбора ответа: {0}")]
    Decode(String),

    /// Не заполнены обязательные поля формы
    #[error("Заполните обязательные поля: {}", .0.join(", "))]
    MissingFields(Vec<String>),

    /// Предыдущая отправка формы ещё не завершилась
    #[error("Сохранение уже выполняется")]
    Busy,
}

pub type Result<T> = std::result::Result<T, AppError>;

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Decode(e.to_string())
    }
}

impl From<serde_wasm_bindgen::Error> for AppError {
    fn from(e: serde_wasm_bindgen::Error) -> Self {
        AppError::Decode(e.to_string())
    }
}
