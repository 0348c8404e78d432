//! Описание форм создания и их состояние
//!
//! Форма задаётся статическим `FormSpec`; значения хранятся строками,
//! как их отдают `<input>`. Обязательные поля проверяются перед отправкой,
//! в разметке они же получают атрибут `required`.

use std::collections::HashMap;

use crate::error::{AppError, Result};

/// Тип поля ввода
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    TextArea,
    Date,
    Number,
    Tel,
    Email,
    /// Фиксированный список значений
    Choice(&'static [&'static str]),
    /// Ссылка на объект; варианты подставляет панель
    SiteRef,
}

impl FieldKind {
    /// Значение атрибута `type` для `<input>`
    pub fn input_type(self) -> &'static str {
        match self {
            FieldKind::Date => "date",
            FieldKind::Number => "number",
            FieldKind::Tel => "tel",
            FieldKind::Email => "email",
            _ => "text",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

impl FieldSpec {
    pub const fn required(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { key, label, kind, required: true }
    }

    pub const fn optional(key: &'static str, label: &'static str, kind: FieldKind) -> Self {
        Self { key, label, kind, required: false }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormSpec {
    pub title: &'static str,
    /// Таблица, в которую вставляется запись
    pub table: &'static str,
    pub fields: &'static [FieldSpec],
}

impl FormSpec {
    pub fn field(&self, key: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.key == key)
    }
}

/// Текущие значения полей формы
#[derive(Debug, Clone, PartialEq)]
pub struct FormState {
    spec: &'static FormSpec,
    values: HashMap<&'static str, String>,
}

impl FormState {
    pub fn new(spec: &'static FormSpec) -> Self {
        Self { spec, values: HashMap::new() }
    }

    pub fn spec(&self) -> &'static FormSpec {
        self.spec
    }

    /// Ключи вне `FormSpec` игнорируются
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        if let Some(field) = self.spec.field(key) {
            self.values.insert(field.key, value.into());
        }
    }

    pub fn get(&self, key: &str) -> &str {
        self.values.get(key).map(String::as_str).unwrap_or("")
    }

    /// Значение без пробелов по краям; пустое → None
    pub fn optional(&self, key: &str) -> Option<String> {
        let v = self.get(key).trim();
        (!v.is_empty()).then(|| v.to_string())
    }

    pub fn text(&self, key: &str) -> String {
        self.get(key).trim().to_string()
    }

    pub fn is_empty(&self) -> bool {
        self.values.values().all(|v| v.is_empty())
    }

    /// Подписи незаполненных обязательных полей, в порядке формы
    pub fn missing_required(&self) -> Vec<&'static str> {
        self.spec
            .fields
            .iter()
            .filter(|f| f.required && self.get(f.key).trim().is_empty())
            .map(|f| f.label)
            .collect()
    }

    pub fn validate(&self) -> Result<()> {
        let missing = self.missing_required();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(AppError::MissingFields(
                missing.into_iter().map(str::to_string).collect(),
            ))
        }
    }

    pub fn reset(&mut self) {
        self.values.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static TEST_FORM: FormSpec = FormSpec {
        title: "Тест",
        table: "things",
        fields: &[
            FieldSpec::required("name", "Название", FieldKind::Text),
            FieldSpec::optional("note", "Примечание", FieldKind::TextArea),
            FieldSpec::required("date", "Дата", FieldKind::Date),
        ],
    };

    #[test]
    fn missing_required_follows_form_order() {
        let mut form = FormState::new(&TEST_FORM);
        form.set("date", "2024-01-01");
        assert_eq!(form.missing_required(), vec!["Название"]);

        form.set("name", "   ");
        assert_eq!(
            form.validate(),
            Err(AppError::MissingFields(vec!["Название".to_string()]))
        );

        form.set("name", "Склад");
        assert!(form.validate().is_ok());
    }

    #[test]
    fn unknown_keys_are_dropped() {
        let mut form = FormState::new(&TEST_FORM);
        form.set("unknown", "x");
        assert!(form.is_empty());
        assert_eq!(form.get("unknown"), "");
    }

    #[test]
    fn reset_restores_empty_defaults() {
        let mut form = FormState::new(&TEST_FORM);
        form.set("name", "Склад");
        form.set("note", "у реки");
        form.reset();
        assert!(form.is_empty());
        assert_eq!(form.optional("note"), None);
        assert_eq!(form, FormState::new(&TEST_FORM));
    }

    #[test]
    fn input_types() {
        assert_eq!(FieldKind::Date.input_type(), "date");
        assert_eq!(FieldKind::Choice(&["a"]).input_type(), "text");
    }
}
