//! Панель «Общие сведения»

use leptos::*;

use super::{CreateModal, DataTable};
use crate::forms::FormState;
use crate::panels::general_info::{
    create_contact, create_site, load_contacts, load_sites, site_options, GeneralInfo, Section,
    CONTACTS_CATEGORY, CONTACT_FORM, SITES_CATEGORY, SITE_FORM,
};
use crate::panels::{CreateForm, LoadPhase, SubmitOutcome};
use crate::utils::alert;
use crate::AppContext;

#[component]
pub fn GeneralInfoPanel() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext not found");

    let state = create_rw_signal(GeneralInfo::default());
    let site_form = create_rw_signal(CreateForm::new(&SITE_FORM));
    let contact_form = create_rw_signal(CreateForm::new(&CONTACT_FORM));

    let refresh = move |section: Section| {
        let store = ctx.store();
        match section {
            Section::Sites => {
                state.update(|s| s.sites.begin_load());
                spawn_local(async move {
                    let result = async move { load_sites(&store?).await }.await;
                    state.update(|s| s.sites.finish_load(SITES_CATEGORY, result));
                });
            }
            Section::Contacts => {
                state.update(|s| s.contacts.begin_load());
                spawn_local(async move {
                    let result = async move { load_contacts(&store?).await }.await;
                    state.update(|s| s.contacts.finish_load(CONTACTS_CATEGORY, result));
                });
            }
        }
    };

    // При смене вкладки перечитывается только новая вкладка
    let activate = move |section: Section| {
        if let Some(section) = state.try_update(|s| s.switch_to(section)).flatten() {
            refresh(section);
        }
    };

    let open_create = move |_| match state.with_untracked(|s| s.section()) {
        Section::Sites => site_form.update(|f| f.open()),
        Section::Contacts => {
            // Выпадающему списку объектов нужны объекты, даже если вкладку не открывали
            if state.with_untracked(|s| s.sites.phase() == LoadPhase::Idle) {
                refresh(Section::Sites);
            }
            contact_form.update(|f| f.open());
        }
    };

    let on_site_submit = Callback::new(move |form: FormState| {
        let store = ctx.store();
        spawn_local(async move {
            let result = async move { create_site(&store?, &form).await }.await;
            match site_form.try_update(|f| f.finish_submit(SITES_CATEGORY, result)) {
                Some(SubmitOutcome::Created) => refresh(Section::Sites),
                Some(SubmitOutcome::Failed(message)) => alert(&message),
                None => {}
            }
        });
    });

    let on_contact_submit = Callback::new(move |form: FormState| {
        let store = ctx.store();
        spawn_local(async move {
            let result = async move { create_contact(&store?, &form).await }.await;
            match contact_form.try_update(|f| f.finish_submit(CONTACTS_CATEGORY, result)) {
                Some(SubmitOutcome::Created) => refresh(Section::Contacts),
                Some(SubmitOutcome::Failed(message)) => alert(&message),
                None => {}
            }
        });
    });

    refresh(state.with_untracked(|s| s.section()));

    let section = active_section(state);
    let sites = Signal::derive(move || state.with(|s| s.sites.rows().to_vec()));
    let sites_loading = Signal::derive(move || state.with(|s| s.sites.is_loading()));
    let contacts = Signal::derive(move || state.with(|s| s.contacts.rows().to_vec()));
    let contacts_loading = Signal::derive(move || state.with(|s| s.contacts.is_loading()));
    let options = Signal::derive(move || state.with(|s| site_options(s.sites.rows())));

    let tab = move |target: Section| {
        view! {
            <button
                class=move || if section.get() == target { "active" } else { "" }
                on:click=move |_| activate(target)
            >
                {target.label()}
            </button>
        }
    };

    view! {
        <section class="panel general-info-panel">
            <div class="panel-header">
                <h2>"Общие сведения"</h2>
                <nav class="tabs sub-tabs">
                    {tab(Section::Sites)}
                    {tab(Section::Contacts)}
                </nav>
                <div class="panel-actions">
                    <button class="add-btn" on:click=open_create>
                        {move || match section.get() {
                            Section::Sites => "+ Добавить объект",
                            Section::Contacts => "+ Добавить контакт",
                        }}
                    </button>
                </div>
            </div>

            {move || match section.get() {
                Section::Sites => view! {
                    <DataTable rows=sites loading=sites_loading />
                }.into_view(),
                Section::Contacts => view! {
                    <DataTable rows=contacts loading=contacts_loading />
                }.into_view(),
            }}

            <CreateModal form=site_form on_submit=on_site_submit />
            <CreateModal form=contact_form on_submit=on_contact_submit site_options=options />
        </section>
    }
}

/// Активная вкладка; загрузки списков её не трогают
pub(crate) fn active_section(state: RwSignal<GeneralInfo>) -> Memo<Section> {
    create_memo(move |_| state.with(|s| s.section()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn loads_do_not_remount_active_table() {
        let runtime = create_runtime();
        let state = create_rw_signal(GeneralInfo::default());
        let section = active_section(state);

        let runs = Rc::new(Cell::new(0));
        let counter = runs.clone();
        create_effect(move |_| {
            section.with(|_| ());
            counter.set(counter.get() + 1);
        });

        state.update(|s| s.sites.begin_load());
        state.update(|s| s.sites.finish_load(SITES_CATEGORY, Ok(Vec::new())));
        state.update(|s| s.contacts.begin_load());
        state.update(|s| {
            s.contacts
                .finish_load(CONTACTS_CATEGORY, Err(AppError::Network("offline".into())))
        });
        assert_eq!(runs.get(), 1);

        state.update(|s| {
            s.switch_to(Section::Contacts);
        });
        assert_eq!(runs.get(), 2);
        assert_eq!(section.get_untracked(), Section::Contacts);

        runtime.dispose();
    }
}
