//! Состояние панелей: загрузка списков и формы создания
//!
//! Переходы синхронны; запросы к бэкенду делают функции панелей,
//! а компоненты связывают одно с другим через сигналы.
//!
//! Список: `Idle → Loading → Loaded`, повторно `Loaded → Loading`.
//! Форма: `Closed ↔ Open`, закрывается только после успешной вставки или по «Отмена».

pub mod contracts;
pub mod general_info;

use crate::error::{AppError, Result};
use crate::forms::{FormSpec, FormState};
use crate::utils::log_trace::{log_error, log_info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadPhase {
    Idle,
    Loading,
    Loaded,
}

/// Последний полученный список записей
#[derive(Debug, Clone, PartialEq)]
pub struct Collection<T> {
    rows: Vec<T>,
    phase: LoadPhase,
}

impl<T> Default for Collection<T> {
    fn default() -> Self {
        Self { rows: Vec::new(), phase: LoadPhase::Idle }
    }
}

impl<T> Collection<T> {
    pub fn rows(&self) -> &[T] {
        &self.rows
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == LoadPhase::Loading
    }

    pub fn begin_load(&mut self) {
        self.phase = LoadPhase::Loading;
    }

    /// При ошибке пишет в журнал и оставляет прежние строки
    pub fn finish_load(&mut self, category: &str, result: Result<Vec<T>>) {
        match result {
            Ok(rows) => {
                log_info(category, &format!("загружено записей: {}", rows.len()));
                self.rows = rows;
            }
            Err(e) => log_error(category, &format!("ошибка загрузки: {}", e)),
        }
        self.phase = LoadPhase::Loaded;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalState {
    Closed,
    Open,
}

/// Итог отправки формы
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Запись создана: модальное окно закрыто, поля сброшены, список нужно перечитать
    Created,
    /// Сообщение для alert; окно и поля остаются как были
    Failed(String),
}

/// Модальная форма создания записи
#[derive(Debug, Clone, PartialEq)]
pub struct CreateForm {
    form: FormState,
    modal: ModalState,
    submitting: bool,
}

impl CreateForm {
    pub fn new(spec: &'static FormSpec) -> Self {
        Self {
            form: FormState::new(spec),
            modal: ModalState::Closed,
            submitting: false,
        }
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn modal(&self) -> ModalState {
        self.modal
    }

    pub fn is_open(&self) -> bool {
        self.modal == ModalState::Open
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn open(&mut self) {
        self.modal = ModalState::Open;
    }

    /// Закрытие по «Отмена»; введённые значения сохраняются
    pub fn cancel(&mut self) {
        if !self.submitting {
            self.modal = ModalState::Closed;
        }
    }

    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.form.set(key, value);
    }

    /// Проверка обязательных полей; при успехе форма переходит в отправку
    pub fn begin_submit(&mut self) -> Result<FormState> {
        if self.submitting {
            return Err(AppError::Busy);
        }
        self.form.validate()?;
        self.submitting = true;
        Ok(self.form.clone())
    }

    pub fn finish_submit(&mut self, category: &str, result: Result<()>) -> SubmitOutcome {
        self.submitting = false;
        match result {
            Ok(()) => {
                log_info(category, "запись создана");
                self.modal = ModalState::Closed;
                self.form.reset();
                SubmitOutcome::Created
            }
            Err(e) => {
                log_error(category, &format!("ошибка создания: {}", e));
                SubmitOutcome::Failed(e.to_string())
            }
        }
    }
}
