//! Хранилище в памяти для тестов панелей

use std::cell::RefCell;
use std::cmp::Ordering;
use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use super::{DataStore, SelectQuery, OBJECTS};
use crate::error::{AppError, Result};

#[derive(Default)]
pub struct MemoryStore {
    tables: RefCell<HashMap<String, Vec<Value>>>,
    next_id: RefCell<i64>,
    failing_selects: RefCell<HashMap<String, String>>,
    failing_inserts: RefCell<HashMap<String, String>>,
    select_calls: RefCell<Vec<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Вставка в обход `DataStore`, для подготовки данных
    pub fn seed(&self, table: &str, row: Value) -> i64 {
        let id = {
            let mut next = self.next_id.borrow_mut();
            *next += 1;
            *next
        };
        let mut row = row;
        if let Value::Object(map) = &mut row {
            map.entry("id").or_insert(Value::from(id));
        }
        self.tables
            .borrow_mut()
            .entry(table.to_string())
            .or_default()
            .push(row);
        id
    }

    pub fn fail_select(&self, table: &str, message: &str) {
        self.failing_selects
            .borrow_mut()
            .insert(table.to_string(), message.to_string());
    }

    pub fn fail_insert(&self, table: &str, message: &str) {
        self.failing_inserts
            .borrow_mut()
            .insert(table.to_string(), message.to_string());
    }

    pub fn heal(&self) {
        self.failing_selects.borrow_mut().clear();
        self.failing_inserts.borrow_mut().clear();
    }

    pub fn rows(&self, table: &str) -> Vec<Value> {
        self.tables.borrow().get(table).cloned().unwrap_or_default()
    }

    /// Таблицы, из которых читали, по порядку вызовов
    pub fn select_calls(&self) -> Vec<String> {
        self.select_calls.borrow().clone()
    }

    pub fn clear_calls(&self) {
        self.select_calls.borrow_mut().clear();
    }

    fn site_name(&self, id: &Value) -> Value {
        let tables = self.tables.borrow();
        tables
            .get(OBJECTS)
            .and_then(|rows| rows.iter().find(|r| r.get("id") == Some(id)))
            .map(|r| {
                let mut m = Map::new();
                m.insert("name".into(), r.get("name").cloned().unwrap_or(Value::Null));
                Value::Object(m)
            })
            .unwrap_or(Value::Null)
    }
}

fn compare(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => x
            .as_f64()
            .partial_cmp(&y.as_f64())
            .unwrap_or(Ordering::Equal),
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (None | Some(Value::Null), None | Some(Value::Null)) => Ordering::Equal,
        // null в конце при asc
        (None | Some(Value::Null), _) => Ordering::Greater,
        (_, None | Some(Value::Null)) => Ordering::Less,
        _ => Ordering::Equal,
    }
}

impl DataStore for MemoryStore {
    async fn select<T: DeserializeOwned>(&self, query: &SelectQuery) -> Result<Vec<T>> {
        self.select_calls.borrow_mut().push(query.table.to_string());
        if let Some(message) = self.failing_selects.borrow().get(query.table) {
            return Err(AppError::Http { status: 500, message: message.clone() });
        }

        let mut rows = self.rows(query.table);
        if query.columns.contains("objects(") {
            for row in rows.iter_mut() {
                let site = match row.get("object_id") {
                    Some(id) if !id.is_null() => self.site_name(id),
                    _ => Value::Null,
                };
                if let Value::Object(map) = row {
                    map.insert("objects".into(), site);
                }
            }
        }
        if let Some(order) = query.order {
            rows.sort_by(|a, b| {
                let ord = compare(a.get(order.column), b.get(order.column));
                if order.ascending { ord } else { ord.reverse() }
            });
        }

        rows.into_iter()
            .map(|r| serde_json::from_value(r).map_err(AppError::from))
            .collect()
    }

    async fn insert<R: Serialize>(&self, table: &str, record: &R) -> Result<()> {
        if let Some(message) = self.failing_inserts.borrow().get(table) {
            return Err(AppError::Http { status: 400, message: message.clone() });
        }
        let row = serde_json::to_value(record)?;
        self.seed(table, row);
        Ok(())
    }
}
