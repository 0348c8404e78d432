//! Настройки подключения к бэкенду
//!
//! Значения из localStorage (экран настроек) важнее встроенных при сборке
//! `BACKEND_URL` / `BACKEND_API_KEY`.

use crate::error::{AppError, Result};
use crate::utils::log_trace::log_info;
use crate::utils::storage;

const URL_KEY: &str = "contract_registry_backend_url";
const API_KEY_KEY: &str = "contract_registry_backend_key";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    /// Без завершающего `/`
    pub url: String,
    pub api_key: String,
}

impl BackendConfig {
    /// Первое непустое значение по приоритету
    pub fn resolve(
        stored_url: Option<String>,
        stored_key: Option<String>,
        built_url: Option<&str>,
        built_key: Option<&str>,
    ) -> Result<Self> {
        let pick = |stored: Option<String>, built: Option<&str>| {
            stored
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .or_else(|| built.map(str::trim).filter(|s| !s.is_empty()).map(str::to_string))
        };

        let url = pick(stored_url, built_url)
            .ok_or_else(|| AppError::Config("не задан адрес бэкенда".into()))?;
        let api_key = pick(stored_key, built_key)
            .ok_or_else(|| AppError::Config("не задан ключ API".into()))?;

        let url = url.trim_end_matches('/').to_string();
        if !(url.starts_with("https://") || url.starts_with("http://")) {
            return Err(AppError::Config(format!("некорректный адрес: {}", url)));
        }
        Ok(Self { url, api_key })
    }

    pub fn load() -> Result<Self> {
        Self::resolve(
            storage::load(URL_KEY),
            storage::load(API_KEY_KEY),
            option_env!("BACKEND_URL"),
            option_env!("BACKEND_API_KEY"),
        )
    }
}

/// Сохранить значения из экрана настроек
pub fn save_backend(url: &str, api_key: &str) {
    storage::save(URL_KEY, url.trim());
    storage::save(API_KEY_KEY, api_key.trim());
    log_info("config", "настройки подключения сохранены");
}

pub fn clear_backend() {
    storage::remove(URL_KEY);
    storage::remove(API_KEY_KEY);
    log_info("config", "настройки подключения сброшены");
}

/// Сохранённый адрес для предзаполнения формы настроек
pub fn stored_url() -> Option<String> {
    storage::load(URL_KEY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_values_win_over_build_values() {
        let cfg = BackendConfig::resolve(
            Some("https://local.example.ru/".into()),
            Some("local-key".into()),
            Some("https://built.example.ru"),
            Some("built-key"),
        )
        .unwrap();
        assert_eq!(cfg.url, "https://local.example.ru");
        assert_eq!(cfg.api_key, "local-key");
    }

    #[test]
    fn blank_stored_values_fall_back() {
        let cfg = BackendConfig::resolve(
            Some("  ".into()),
            None,
            Some("https://built.example.ru"),
            Some("built-key"),
        )
        .unwrap();
        assert_eq!(cfg.url, "https://built.example.ru");
    }

    #[test]
    fn missing_values_are_config_errors() {
        assert!(matches!(
            BackendConfig::resolve(None, Some("k".into()), None, None),
            Err(AppError::Config(_))
        ));
        assert!(matches!(
            BackendConfig::resolve(Some("https://x.ru".into()), None, None, None),
            Err(AppError::Config(_))
        ));
        assert!(matches!(
            BackendConfig::resolve(Some("x.ru".into()), Some("k".into()), None, None),
            Err(AppError::Config(_))
        ));
    }
}
