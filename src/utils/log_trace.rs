//! Журнал событий
//!
//! Каждая запись дублируется в консоль браузера и хранится в кольцевом
//! буфере, который сохраняется в localStorage.

use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::collections::VecDeque;

use super::storage;

const MAX_LOG_ENTRIES: usize = 1000;
const STORAGE_KEY: &str = "contract_registry_log_trace";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Info,
    Warn,
    Error,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: Level,
    /// "contracts", "objects", "contacts", "config"
    pub category: String,
    pub message: String,
}

pub struct LogTrace {
    logs: VecDeque<LogEntry>,
}

impl LogTrace {
    pub fn new() -> Self {
        let mut trace = LogTrace {
            logs: VecDeque::with_capacity(MAX_LOG_ENTRIES),
        };
        trace.load_from_storage();
        trace
    }

    pub fn log(&mut self, level: Level, category: &str, message: &str) {
        let entry = LogEntry {
            timestamp: chrono::Utc::now().to_rfc3339(),
            level,
            category: category.to_string(),
            message: message.to_string(),
        };

        echo(&entry);

        if self.logs.len() >= MAX_LOG_ENTRIES {
            self.logs.pop_front();
        }
        self.logs.push_back(entry);
        self.save_to_storage();
    }

    pub fn entries(&self) -> Vec<LogEntry> {
        self.logs.iter().cloned().collect()
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(&self.logs).unwrap_or_else(|_| "[]".to_string())
    }

    pub fn clear(&mut self) {
        self.logs.clear();
        self.save_to_storage();
    }

    fn load_from_storage(&mut self) {
        if let Some(json) = storage::load(STORAGE_KEY) {
            if let Ok(logs) = serde_json::from_str::<Vec<LogEntry>>(&json) {
                let skip = logs.len().saturating_sub(MAX_LOG_ENTRIES);
                self.logs = logs.into_iter().skip(skip).collect();
            }
        }
    }

    fn save_to_storage(&self) {
        if let Ok(json) = serde_json::to_string(&self.logs) {
            storage::save(STORAGE_KEY, &json);
        }
    }
}

impl Default for LogTrace {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(target_arch = "wasm32")]
fn echo(entry: &LogEntry) {
    let line = wasm_bindgen::JsValue::from_str(&format!("[{}] {}", entry.category, entry.message));
    match entry.level {
        Level::Error => web_sys::console::error_1(&line),
        Level::Warn => web_sys::console::warn_1(&line),
        Level::Info => web_sys::console::log_1(&line),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn echo(entry: &LogEntry) {
    eprintln!("{:?} [{}] {}", entry.level, entry.category, entry.message);
}

thread_local! {
    static LOG_TRACE: RefCell<LogTrace> = RefCell::new(LogTrace::new());
}

pub fn log_info(category: &str, message: &str) {
    LOG_TRACE.with(|t| t.borrow_mut().log(Level::Info, category, message));
}

pub fn log_warn(category: &str, message: &str) {
    LOG_TRACE.with(|t| t.borrow_mut().log(Level::Warn, category, message));
}

pub fn log_error(category: &str, message: &str) {
    LOG_TRACE.with(|t| t.borrow_mut().log(Level::Error, category, message));
}

/// Записи текущего потока, от старых к новым
pub fn entries() -> Vec<LogEntry> {
    LOG_TRACE.with(|t| t.borrow().entries())
}

pub fn logs_json() -> String {
    LOG_TRACE.with(|t| t.borrow().to_json())
}

pub fn clear_logs() {
    LOG_TRACE.with(|t| t.borrow_mut().clear());
}

/// Последние ошибки, от новых к старым
pub fn recent_errors(limit: usize) -> Vec<LogEntry> {
    entries()
        .into_iter()
        .rev()
        .filter(|e| e.level == Level::Error)
        .take(limit)
        .collect()
}

fn export_filename(now: chrono::DateTime<chrono::Utc>) -> String {
    format!("log_trace_{}.json", now.format("%Y-%m-%dT%H-%M-%S"))
}

/// Сохраняет журнал файлом JSON через временную ссылку
#[cfg(target_arch = "wasm32")]
pub fn download_logs() {
    use wasm_bindgen::JsCast;

    let json = logs_json();
    let filename = export_filename(chrono::Utc::now());

    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };
    let parts = js_sys::Array::new();
    parts.push(&wasm_bindgen::JsValue::from_str(&json));

    let options = web_sys::BlobPropertyBag::new();
    options.set_type("application/json");

    let Ok(blob) = web_sys::Blob::new_with_str_sequence_and_options(&parts, &options) else {
        log_error("log", "не удалось создать файл журнала");
        return;
    };
    if let Ok(url) = web_sys::Url::create_object_url_with_blob(&blob) {
        if let Ok(a) = document.create_element("a") {
            let _ = a.set_attribute("href", &url);
            let _ = a.set_attribute("download", &filename);
            if let Some(element) = a.dyn_ref::<web_sys::HtmlElement>() {
                element.click();
            }
        }
        let _ = web_sys::Url::revoke_object_url(&url);
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn download_logs() {
    eprintln!("{}: {}", export_filename(chrono::Utc::now()), logs_json());
}
