//! Панель договоров

use leptos::*;

use super::{CreateModal, DataTable};
use crate::forms::FormState;
use crate::models::Contract;
use crate::panels::contracts::{create_contract, load_contracts, CATEGORY, CONTRACT_FORM};
use crate::panels::{Collection, CreateForm, SubmitOutcome};
use crate::utils::alert;
use crate::AppContext;

#[component]
pub fn ContractPanel() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext not found");

    let contracts = create_rw_signal(Collection::<Contract>::default());
    let create = create_rw_signal(CreateForm::new(&CONTRACT_FORM));

    let reload = move || {
        contracts.update(|c| c.begin_load());
        let store = ctx.store();
        spawn_local(async move {
            let result = async move { load_contracts(&store?).await }.await;
            contracts.update(|c| c.finish_load(CATEGORY, result));
        });
    };

    let on_submit = Callback::new(move |form: FormState| {
        let store = ctx.store();
        spawn_local(async move {
            let result = async move { create_contract(&store?, &form).await }.await;
            match create.try_update(|c| c.finish_submit(CATEGORY, result)) {
                Some(SubmitOutcome::Created) => reload(),
                Some(SubmitOutcome::Failed(message)) => alert(&message),
                None => {}
            }
        });
    });

    // Первая загрузка при монтировании
    reload();

    let rows = Signal::derive(move || contracts.with(|c| c.rows().to_vec()));
    let loading = Signal::derive(move || contracts.with(|c| c.is_loading()));

    view! {
        <section class="panel contract-panel">
            <div class="panel-header">
                <h2>"Договоры"</h2>
                <div class="panel-actions">
                    <button class="refresh-btn" on:click=move |_| reload() disabled=move || loading.get()>
                        "Обновить"
                    </button>
                    <button class="add-btn" on:click=move |_| create.update(|c| c.open())>
                        "+ Добавить договор"
                    </button>
                </div>
            </div>
            <DataTable rows=rows loading=loading />
            <CreateModal form=create on_submit=on_submit />
        </section>
    }
}
