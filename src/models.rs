//! Модели записей: договоры, объекты, контакты

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

// ============================================
// Идентификаторы и числовые поля
// ============================================

/// Первичный ключ записи: bigint или uuid, в зависимости от схемы таблицы
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Text(String),
}

impl RecordId {
    /// Значение из `<select>`: числа уходят числом, остальное строкой
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            None
        } else if let Ok(n) = raw.parse::<i64>() {
            Some(RecordId::Int(n))
        } else {
            Some(RecordId::Text(raw.to_string()))
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(n) => write!(f, "{}", n),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}

/// numeric приходит то числом, то строкой
fn de_decimal<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Num(f64),
        Text(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        Some(Raw::Num(n)) => Some(n),
        Some(Raw::Text(s)) => s.trim().replace(',', ".").parse().ok(),
        None => None,
    })
}

// ============================================
// Договор
// ============================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Contract {
    pub id: RecordId,
    #[serde(default)]
    pub contract_number: String,
    #[serde(default)]
    pub contract_date: Option<String>,
    #[serde(default)]
    pub work_object: Option<String>,
    #[serde(default, deserialize_with = "de_decimal")]
    pub contract_amount: Option<f64>,
    #[serde(default, deserialize_with = "de_decimal")]
    pub warranty_retention_percent: Option<f64>,
    #[serde(default)]
    pub warranty_retention_period: Option<String>,
    #[serde(default)]
    pub work_start_date: Option<String>,
    #[serde(default)]
    pub work_end_date: Option<String>,
    #[serde(default)]
    pub warranty_period: Option<String>,
}

/// Тело insert для `contracts`; пустые поля уходят как null
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewContract {
    pub contract_number: String,
    pub contract_date: String,
    pub work_object: String,
    pub contract_amount: String,
    pub warranty_retention_percent: Option<String>,
    pub warranty_retention_period: Option<String>,
    pub work_start_date: Option<String>,
    pub work_end_date: Option<String>,
    pub warranty_period: Option<String>,
}

// ============================================
// Объект (площадка)
// ============================================

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Site {
    pub id: RecordId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewSite {
    pub name: String,
    pub address: Option<String>,
    pub description: Option<String>,
}

// ============================================
// Контакт
// ============================================

/// Должность контактного лица
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Position {
    #[serde(rename = "Руководитель")]
    Head,
    #[serde(rename = "Экономист")]
    Economist,
    #[serde(rename = "Старший инженер")]
    SeniorEngineer,
    #[serde(rename = "Инженер")]
    Engineer,
    #[serde(rename = "Прораб")]
    Foreman,
}

impl Position {
    pub const ALL: [Position; 5] = [
        Position::Head,
        Position::Economist,
        Position::SeniorEngineer,
        Position::Engineer,
        Position::Foreman,
    ];

    /// Подписи в порядке `ALL`, для выпадающего списка формы
    pub const LABELS: [&'static str; 5] = {
        let mut labels = [""; 5];
        let mut i = 0;
        while i < Self::ALL.len() {
            labels[i] = Self::ALL[i].label();
            i += 1;
        }
        labels
    };

    pub const fn label(self) -> &'static str {
        match self {
            Position::Head => "Руководитель",
            Position::Economist => "Экономист",
            Position::SeniorEngineer => "Старший инженер",
            Position::Engineer => "Инженер",
            Position::Foreman => "Прораб",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.label() == label.trim())
    }
}

/// Вложенный объект из `select=*,objects(name)`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SiteRef {
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Contact {
    pub id: RecordId,
    #[serde(default)]
    pub full_name: String,
    /// Строкой: в таблице могут оказаться значения вне перечня
    #[serde(default)]
    pub position: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub object_id: Option<RecordId>,
    #[serde(default)]
    pub objects: Option<SiteRef>,
}

impl Contact {
    /// Название связанного объекта, если контакт к нему привязан
    pub fn site_name(&self) -> Option<&str> {
        self.object_id.as_ref()?;
        self.objects
            .as_ref()
            .map(|o| o.name.as_str())
            .filter(|n| !n.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewContact {
    pub full_name: String,
    pub position: Position,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub object_id: Option<RecordId>,
}
