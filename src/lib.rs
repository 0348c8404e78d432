//! Реестр строительных договоров: договоры, объекты и контакты
//!
//! Клиентское приложение на Leptos (CSR); данные хранятся в
//! PostgREST-совместимом бэкенде.

pub mod app;
pub mod components;
pub mod config;
pub mod error;
pub mod format;
pub mod forms;
pub mod models;
pub mod panels;
pub mod store;
pub mod table;
pub mod utils;

pub use app::{App, AppContext};
pub use error::{AppError, Result};
