//! Панель договоров: список по дате договора (новые сверху) и форма создания

use crate::error::Result;
use crate::format::{format_currency, format_date, format_percent, text_or_dash};
use crate::forms::{FieldKind, FieldSpec, FormSpec, FormState};
use crate::models::{Contract, NewContract};
use crate::store::{DataStore, Order, SelectQuery, CONTRACTS};
use crate::table::TableRow;

/// Категория журнала
pub const CATEGORY: &str = "contracts";

pub const CONTRACTS_QUERY: SelectQuery =
    SelectQuery::all(CONTRACTS).order(Order::desc("contract_date"));

pub static CONTRACT_FORM: FormSpec = FormSpec {
    title: "Новый договор",
    table: CONTRACTS,
    fields: &[
        FieldSpec::required("contract_number", "Номер договора", FieldKind::Text),
        FieldSpec::required("contract_date", "Дата договора", FieldKind::Date),
        FieldSpec::required("work_object", "Объект работ", FieldKind::TextArea),
        FieldSpec::required("contract_amount", "Сумма договора, ₽", FieldKind::Number),
        FieldSpec::optional("warranty_retention_percent", "Гарантийное удержание, %", FieldKind::Number),
        FieldSpec::optional("warranty_retention_period", "Срок гарантийного удержания", FieldKind::Text),
        FieldSpec::optional("work_start_date", "Начало работ", FieldKind::Date),
        FieldSpec::optional("work_end_date", "Окончание работ", FieldKind::Date),
        FieldSpec::optional("warranty_period", "Гарантийный срок", FieldKind::Text),
    ],
};

impl NewContract {
    pub fn from_form(form: &FormState) -> Result<Self> {
        form.validate()?;
        Ok(Self {
            contract_number: form.text("contract_number"),
            contract_date: form.text("contract_date"),
            work_object: form.text("work_object"),
            contract_amount: form.text("contract_amount"),
            warranty_retention_percent: form.optional("warranty_retention_percent"),
            warranty_retention_period: form.optional("warranty_retention_period"),
            work_start_date: form.optional("work_start_date"),
            work_end_date: form.optional("work_end_date"),
            warranty_period: form.optional("warranty_period"),
        })
    }
}

impl TableRow for Contract {
    const COLUMNS: &'static [&'static str] = &[
        "№ договора",
        "Дата",
        "Объект работ",
        "Сумма",
        "Удержание",
        "Срок удержания",
        "Начало работ",
        "Окончание работ",
        "Гарантийный срок",
    ];

    fn row_key(&self) -> String {
        self.id.to_string()
    }

    fn cells(&self) -> Vec<String> {
        vec![
            text_or_dash(Some(&self.contract_number)),
            format_date(self.contract_date.as_deref()),
            text_or_dash(self.work_object.as_deref()),
            format_currency(self.contract_amount),
            format_percent(self.warranty_retention_percent),
            text_or_dash(self.warranty_retention_period.as_deref()),
            format_date(self.work_start_date.as_deref()),
            format_date(self.work_end_date.as_deref()),
            text_or_dash(self.warranty_period.as_deref()),
        ]
    }
}

pub async fn load_contracts<S: DataStore>(store: &S) -> Result<Vec<Contract>> {
    store.select(&CONTRACTS_QUERY).await
}

pub async fn create_contract<S: DataStore>(store: &S, form: &FormState) -> Result<()> {
    let record = NewContract::from_form(form)?;
    store.insert(form.spec().table, &record).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::panels::{Collection, CreateForm, ModalState, SubmitOutcome};
    use crate::store::memory::MemoryStore;
    use crate::table::TableBody;
    use serde_json::json;

    fn filled(form: &mut CreateForm, number: &str, date: &str) {
        form.set("contract_number", number);
        form.set("contract_date", date);
        form.set("work_object", "Капремонт кровли, ул. Ленина 5");
        form.set("contract_amount", "2500000");
    }

    #[tokio::test]
    async fn empty_backend_renders_placeholder() {
        let store = MemoryStore::new();
        let mut list = Collection::default();
        list.begin_load();
        list.finish_load(CATEGORY, load_contracts(&store).await);
        assert_eq!(
            TableBody::build(list.rows()),
            TableBody::Placeholder { colspan: Contract::COLUMNS.len() }
        );
    }

    #[tokio::test]
    async fn list_is_newest_first() {
        let store = MemoryStore::new();
        for (n, d) in [("1", "2023-06-01"), ("2", "2024-01-15"), ("3", "2022-12-31"), ("4", "2024-01-16")] {
            store.seed(CONTRACTS, json!({ "contract_number": n, "contract_date": d }));
        }
        let rows = load_contracts(&store).await.unwrap();
        let dates: Vec<_> = rows.iter().map(|c| c.contract_date.clone().unwrap()).collect();
        assert_eq!(dates, vec!["2024-01-16", "2024-01-15", "2023-06-01", "2022-12-31"]);
    }

    #[tokio::test]
    async fn created_rows_sort_by_date_with_undated_first() {
        let store = MemoryStore::new();
        store.seed(CONTRACTS, json!({ "contract_number": "без даты", "contract_date": null }));

        for (n, d) in [("A", "2023-02-01"), ("B", "2024-09-30"), ("C", "2023-11-15")] {
            let mut create = CreateForm::new(&CONTRACT_FORM);
            create.open();
            filled(&mut create, n, d);
            let form = create.begin_submit().unwrap();
            let outcome = create.finish_submit(CATEGORY, create_contract(&store, &form).await);
            assert_eq!(outcome, SubmitOutcome::Created);
        }

        let rows = load_contracts(&store).await.unwrap();
        let numbers: Vec<_> = rows.iter().map(|c| c.contract_number.as_str()).collect();
        assert_eq!(numbers, vec!["без даты", "B", "C", "A"]);
        assert_eq!(rows[0].cells()[1], "-");
    }

    #[tokio::test]
    async fn create_closes_resets_and_reloads() {
        let store = MemoryStore::new();
        store.seed(CONTRACTS, json!({ "contract_number": "старый", "contract_date": "2020-01-01" }));

        let mut list = Collection::default();
        list.begin_load();
        list.finish_load(CATEGORY, load_contracts(&store).await);

        let mut create = CreateForm::new(&CONTRACT_FORM);
        create.open();
        filled(&mut create, "15/24", "2024-04-10");
        create.set("warranty_retention_percent", "5");

        let form = create.begin_submit().unwrap();
        let outcome = create.finish_submit(CATEGORY, create_contract(&store, &form).await);
        assert_eq!(outcome, SubmitOutcome::Created);
        assert_eq!(create.modal(), ModalState::Closed);
        assert!(create.form().is_empty());

        list.begin_load();
        list.finish_load(CATEGORY, load_contracts(&store).await);
        assert_eq!(list.rows().len(), 2);
        assert_eq!(list.rows()[0].contract_number, "15/24");
        assert_eq!(list.rows()[0].warranty_retention_percent, Some(5.0));
        assert_eq!(list.rows()[0].work_end_date, None);
    }

    #[tokio::test]
    async fn failed_insert_keeps_form_open() {
        let store = MemoryStore::new();
        store.fail_insert(CONTRACTS, "permission denied for table contracts");

        let mut create = CreateForm::new(&CONTRACT_FORM);
        create.open();
        filled(&mut create, "16/24", "2024-04-11");

        let form = create.begin_submit().unwrap();
        let outcome = create.finish_submit(CATEGORY, create_contract(&store, &form).await);
        assert_eq!(
            outcome,
            SubmitOutcome::Failed("permission denied for table contracts".into())
        );
        assert!(create.is_open());
        assert_eq!(create.form().get("contract_number"), "16/24");
        assert!(store.rows(CONTRACTS).is_empty());
    }

    #[tokio::test]
    async fn failed_fetch_keeps_last_rows() {
        let store = MemoryStore::new();
        store.seed(CONTRACTS, json!({ "contract_number": "1", "contract_date": "2024-01-01" }));

        let mut list = Collection::default();
        list.begin_load();
        list.finish_load(CATEGORY, load_contracts(&store).await);

        store.fail_select(CONTRACTS, "timeout");
        list.begin_load();
        list.finish_load(CATEGORY, load_contracts(&store).await);
        assert_eq!(list.rows().len(), 1);
    }

    #[tokio::test]
    async fn create_rejects_missing_required() {
        let store = MemoryStore::new();
        let mut form = FormState::new(&CONTRACT_FORM);
        form.set("contract_number", "17/24");
        let err = create_contract(&store, &form).await.unwrap_err();
        assert_eq!(
            err,
            AppError::MissingFields(vec![
                "Дата договора".into(),
                "Объект работ".into(),
                "Сумма договора, ₽".into(),
            ])
        );
    }

    #[test]
    fn cells_are_formatted() {
        let c: Contract = serde_json::from_value(json!({
            "id": 1,
            "contract_number": "15/24",
            "contract_date": "2024-04-10",
            "work_object": "Кровля",
            "contract_amount": 2500000,
            "warranty_retention_percent": 5,
            "warranty_period": "24 мес."
        }))
        .unwrap();
        let cells = c.cells();
        assert_eq!(cells.len(), Contract::COLUMNS.len());
        assert_eq!(cells[1], "10.04.2024");
        assert_eq!(cells[3], "2\u{a0}500\u{a0}000,00\u{a0}₽");
        assert_eq!(cells[6], "-");
    }

    #[test]
    fn empty_optional_fields_are_null() {
        let mut form = FormState::new(&CONTRACT_FORM);
        form.set("contract_number", "1");
        form.set("contract_date", "2024-01-01");
        form.set("work_object", "x");
        form.set("contract_amount", "10.5");
        form.set("warranty_period", "  ");
        let body = serde_json::to_value(NewContract::from_form(&form).unwrap()).unwrap();
        assert_eq!(body["warranty_period"], serde_json::Value::Null);
        assert_eq!(body["contract_amount"], "10.5");
    }
}
