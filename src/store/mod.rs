//! Доступ к таблицам бэкенда
//!
//! Панели знают только о двух операциях: выборка с сортировкой и вставка.

pub mod rest;
#[cfg(test)]
pub mod memory;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::Result;

pub use rest::RestStore;

pub const CONTRACTS: &str = "contracts";
pub const OBJECTS: &str = "objects";
pub const CONTACTS: &str = "contacts";

/// Сортировка выборки
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Order {
    pub column: &'static str,
    pub ascending: bool,
}

impl Order {
    pub const fn asc(column: &'static str) -> Self {
        Self { column, ascending: true }
    }

    pub const fn desc(column: &'static str) -> Self {
        Self { column, ascending: false }
    }
}

/// Параметры выборки из одной таблицы
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectQuery {
    pub table: &'static str,
    /// Список столбцов в синтаксисе PostgREST, например `*,objects(name)`
    pub columns: &'static str,
    pub order: Option<Order>,
}

impl SelectQuery {
    pub const fn all(table: &'static str) -> Self {
        Self { table, columns: "*", order: None }
    }

    pub const fn columns(self, columns: &'static str) -> Self {
        Self { columns, ..self }
    }

    pub const fn order(self, order: Order) -> Self {
        Self { order: Some(order), ..self }
    }

    /// Строка запроса без `?`
    pub fn query_string(&self) -> String {
        let mut qs = format!("select={}", urlencoding::encode(self.columns));
        if let Some(o) = self.order {
            qs.push_str(&format!(
                "&order={}.{}",
                urlencoding::encode(o.column),
                if o.ascending { "asc" } else { "desc" }
            ));
        }
        qs
    }
}

/// Хранилище записей
///
/// Вызывается из однопоточного UI, поэтому `Send` от futures не требуется.
#[allow(async_fn_in_trait)]
pub trait DataStore {
    async fn select<T: DeserializeOwned>(&self, query: &SelectQuery) -> Result<Vec<T>>;

    async fn insert<R: Serialize>(&self, table: &str, record: &R) -> Result<()>;
}
