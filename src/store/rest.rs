//! PostgREST-совместимый бэкенд через `window.fetch`

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use super::{DataStore, SelectQuery};
use crate::config::BackendConfig;
use crate::error::{AppError, Result};

/// Клиент REST API таблиц
#[derive(Debug, Clone, PartialEq)]
pub struct RestStore {
    config: BackendConfig,
}

/// Тело ошибки PostgREST
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    details: Option<String>,
}

impl RestStore {
    pub fn new(config: BackendConfig) -> Self {
        Self { config }
    }

    pub fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.config.url, table)
    }

    pub fn select_url(&self, query: &SelectQuery) -> String {
        format!("{}?{}", self.table_url(query.table), query.query_string())
    }

    /// Ключ API в каждом запросе; тип тела и `Prefer` только для вставки
    fn headers(&self, has_body: bool) -> Vec<(&'static str, String)> {
        let mut headers = vec![
            ("apikey", self.config.api_key.clone()),
            ("Authorization", format!("Bearer {}", self.config.api_key)),
        ];
        if has_body {
            headers.push(("Content-Type", "application/json".to_string()));
            headers.push(("Prefer", "return=minimal".to_string()));
        }
        headers
    }

    fn build_request(&self, url: &str, method: &str, body: Option<String>) -> Result<Request> {
        let opts = RequestInit::new();
        opts.set_method(method);
        opts.set_mode(RequestMode::Cors);
        let has_body = body.is_some();
        if let Some(body) = body {
            opts.set_body(&JsValue::from_str(&body));
        }

        let request = Request::new_with_str_and_init(url, &opts)
            .map_err(|e| AppError::Network(format!("Request создать не удалось: {:?}", e)))?;

        let headers = request.headers();
        for (name, value) in self.headers(has_body) {
            headers
                .set(name, &value)
                .map_err(|e| AppError::Network(format!("заголовок {}: {:?}", name, e)))?;
        }
        Ok(request)
    }

    async fn send(&self, request: Request) -> Result<Response> {
        let window = web_sys::window().ok_or_else(|| AppError::Network("window недоступен".into()))?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(|e| AppError::Network(format!("fetch: {:?}", e)))?;
        let resp: Response = resp_value
            .dyn_into()
            .map_err(|_| AppError::Network("ответ не является Response".into()))?;

        if resp.ok() {
            Ok(resp)
        } else {
            Err(http_error(&resp).await)
        }
    }
}

/// Сообщение из тела ответа; если тело пустое — текст статуса
async fn http_error(resp: &Response) -> AppError {
    let status = resp.status();
    let body = match resp.text() {
        Ok(promise) => JsFuture::from(promise)
            .await
            .ok()
            .and_then(|v| v.as_string())
            .unwrap_or_default(),
        Err(_) => String::new(),
    };
    AppError::Http {
        status,
        message: error_message(status, &resp.status_text(), &body),
    }
}

/// Выбор текста ошибки для пользователя
pub(crate) fn error_message(status: u16, status_text: &str, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        if let Some(message) = parsed.message.filter(|m| !m.is_empty()) {
            return match parsed.details.filter(|d| !d.is_empty()) {
                Some(details) => format!("{} ({})", message, details),
                None => message,
            };
        }
    }
    let body = body.trim();
    if !body.is_empty() {
        body.to_string()
    } else if !status_text.is_empty() {
        format!("{} {}", status, status_text)
    } else {
        format!("HTTP {}", status)
    }
}

impl DataStore for RestStore {
    async fn select<T: DeserializeOwned>(&self, query: &SelectQuery) -> Result<Vec<T>> {
        let request = self.build_request(&self.select_url(query), "GET", None)?;
        let resp = self.send(request).await?;
        let json = JsFuture::from(
            resp.json()
                .map_err(|e| AppError::Decode(format!("json(): {:?}", e)))?,
        )
        .await
        .map_err(|e| AppError::Decode(format!("{:?}", e)))?;
        Ok(serde_wasm_bindgen::from_value(json)?)
    }

    async fn insert<R: Serialize>(&self, table: &str, record: &R) -> Result<()> {
        let body = serde_json::to_string(record)?;
        let request = self.build_request(&self.table_url(table), "POST", Some(body))?;
        self.send(request).await?;
        Ok(())
    }
}
