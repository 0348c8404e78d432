//! Панель «Общие сведения»: объекты и контакты на двух вкладках

use crate::error::{AppError, Result};
use crate::format::text_or_dash;
use crate::forms::{FieldKind, FieldSpec, FormSpec, FormState};
use crate::models::{Contact, NewContact, NewSite, Position, RecordId, Site};
use crate::store::{DataStore, Order, SelectQuery, CONTACTS, OBJECTS};
use crate::table::TableRow;

use super::Collection;

pub const SITES_CATEGORY: &str = "objects";
pub const CONTACTS_CATEGORY: &str = "contacts";

pub const SITES_QUERY: SelectQuery = SelectQuery::all(OBJECTS).order(Order::asc("name"));

pub const CONTACTS_QUERY: SelectQuery = SelectQuery::all(CONTACTS)
    .columns("*,objects(name)")
    .order(Order::asc("full_name"));

pub static SITE_FORM: FormSpec = FormSpec {
    title: "Новый объект",
    table: OBJECTS,
    fields: &[
        FieldSpec::required("name", "Название", FieldKind::Text),
        FieldSpec::optional("address", "Адрес", FieldKind::Text),
        FieldSpec::optional("description", "Описание", FieldKind::TextArea),
    ],
};

pub static CONTACT_FORM: FormSpec = FormSpec {
    title: "Новый контакт",
    table: CONTACTS,
    fields: &[
        FieldSpec::required("full_name", "ФИО", FieldKind::Text),
        FieldSpec::required("position", "Должность", FieldKind::Choice(&Position::LABELS)),
        FieldSpec::optional("phone", "Телефон", FieldKind::Tel),
        FieldSpec::optional("email", "Email", FieldKind::Email),
        FieldSpec::optional("object_id", "Объект", FieldKind::SiteRef),
    ],
};

// ============================================
// Вкладки
// ============================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    Sites,
    Contacts,
}

impl Section {
    pub fn label(self) -> &'static str {
        match self {
            Section::Sites => "Объекты",
            Section::Contacts => "Контакты",
        }
    }
}

/// Активная вкладка и списки обеих вкладок
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GeneralInfo {
    section: Section,
    pub sites: Collection<Site>,
    pub contacts: Collection<Contact>,
}

impl GeneralInfo {
    pub fn section(&self) -> Section {
        self.section
    }

    /// Переключение вкладки; возвращает вкладку, которую нужно перечитать
    pub fn switch_to(&mut self, section: Section) -> Option<Section> {
        if self.section == section {
            return None;
        }
        self.section = section;
        Some(section)
    }
}

// ============================================
// Формы → записи
// ============================================

impl NewSite {
    pub fn from_form(form: &FormState) -> Result<Self> {
        form.validate()?;
        Ok(Self {
            name: form.text("name"),
            address: form.optional("address"),
            description: form.optional("description"),
        })
    }
}

impl NewContact {
    pub fn from_form(form: &FormState) -> Result<Self> {
        form.validate()?;
        let position = Position::from_label(form.get("position"))
            .ok_or_else(|| AppError::MissingFields(vec!["Должность".to_string()]))?;
        Ok(Self {
            full_name: form.text("full_name"),
            position,
            phone: form.optional("phone"),
            email: form.optional("email"),
            object_id: RecordId::parse(form.get("object_id")),
        })
    }
}

// ============================================
// Строки таблиц
// ============================================

impl TableRow for Site {
    const COLUMNS: &'static [&'static str] = &["Название", "Адрес", "Описание"];

    fn row_key(&self) -> String {
        self.id.to_string()
    }

    fn cells(&self) -> Vec<String> {
        vec![
            text_or_dash(Some(&self.name)),
            text_or_dash(self.address.as_deref()),
            text_or_dash(self.description.as_deref()),
        ]
    }
}

impl TableRow for Contact {
    const COLUMNS: &'static [&'static str] = &["ФИО", "Должность", "Телефон", "Email", "Объект"];

    fn row_key(&self) -> String {
        self.id.to_string()
    }

    fn cells(&self) -> Vec<String> {
        vec![
            text_or_dash(Some(&self.full_name)),
            text_or_dash(self.position.as_deref()),
            text_or_dash(self.phone.as_deref()),
            text_or_dash(self.email.as_deref()),
            text_or_dash(self.site_name()),
        ]
    }
}

/// Варианты выпадающего списка объектов: (id, название)
pub fn site_options(sites: &[Site]) -> Vec<(String, String)> {
    sites
        .iter()
        .map(|s| (s.id.to_string(), s.name.clone()))
        .collect()
}

// ============================================
// Запросы
// ============================================

pub async fn load_sites<S: DataStore>(store: &S) -> Result<Vec<Site>> {
    store.select(&SITES_QUERY).await
}

pub async fn load_contacts<S: DataStore>(store: &S) -> Result<Vec<Contact>> {
    store.select(&CONTACTS_QUERY).await
}

pub async fn create_site<S: DataStore>(store: &S, form: &FormState) -> Result<()> {
    let record = NewSite::from_form(form)?;
    store.insert(form.spec().table, &record).await
}

pub async fn create_contact<S: DataStore>(store: &S, form: &FormState) -> Result<()> {
    let record = NewContact::from_form(form)?;
    store.insert(form.spec().table, &record).await
}
