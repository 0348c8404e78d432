//! Модель таблицы: заголовки и строки ячеек

/// Подпись строки-заглушки для пустой коллекции
pub const NO_DATA: &str = "Нет данных";

/// Запись, которую можно вывести строкой таблицы
pub trait TableRow {
    /// Заголовки столбцов; их число равно числу ячеек в `cells`
    const COLUMNS: &'static [&'static str];

    /// Ключ строки для keyed-рендера
    fn row_key(&self) -> String;

    fn cells(&self) -> Vec<String>;
}

/// Тело таблицы, готовое к выводу
#[derive(Debug, Clone, PartialEq)]
pub enum TableBody {
    /// Одна строка «Нет данных» на всю ширину
    Placeholder { colspan: usize },
    Rows(Vec<(String, Vec<String>)>),
}

impl TableBody {
    pub fn build<T: TableRow>(rows: &[T]) -> Self {
        if rows.is_empty() {
            TableBody::Placeholder { colspan: T::COLUMNS.len() }
        } else {
            TableBody::Rows(rows.iter().map(|r| (r.row_key(), r.cells())).collect())
        }
    }
}
