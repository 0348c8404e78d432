//! Модальное окно с формой создания записи

use leptos::*;

use crate::error::AppError;
use crate::forms::{FieldKind, FieldSpec, FormState};
use crate::panels::CreateForm;
use crate::utils::alert;

/// Форма по `FormSpec` из `CreateForm`
///
/// После проверки обязательных полей вызывает `on_submit` со снимком значений;
/// закрытие после вставки делает панель через `CreateForm::finish_submit`.
#[component]
pub fn CreateModal(
    form: RwSignal<CreateForm>,
    on_submit: Callback<FormState>,
    /// Варианты для полей `FieldKind::SiteRef`
    #[prop(optional, into)]
    site_options: Option<Signal<Vec<(String, String)>>>,
) -> impl IntoView {
    let spec = form.with_untracked(|f| f.form().spec());
    let is_open = open_flag(form);
    let submitting = create_memo(move |_| form.with(|f| f.is_submitting()));

    let handle_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        match form.try_update(|f| f.begin_submit()) {
            Some(Ok(values)) => on_submit.call(values),
            Some(Err(AppError::Busy)) | None => {}
            Some(Err(e)) => alert(&e.to_string()),
        }
    };

    let cancel = move |_| form.update(|f| f.cancel());

    view! {
        <Show when=move || is_open.get()>
            <div class="modal-overlay">
                <div class="modal">
                    <div class="modal-header">
                        <h3>{spec.title}</h3>
                        <button type="button" class="close-btn" on:click=cancel>"×"</button>
                    </div>
                    <form class="modal-form" on:submit=handle_submit>
                        {spec.fields.iter().map(|field| view! {
                            <FormField field=*field form=form site_options=site_options />
                        }).collect_view()}
                        <div class="modal-actions">
                            <button type="button" class="cancel-btn" on:click=cancel>"Отмена"</button>
                            <button type="submit" class="save-btn" disabled=move || submitting.get()>
                                {move || if submitting.get() { "Сохранение..." } else { "Сохранить" }}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </Show>
    }
}

/// Открыто ли окно; не меняется при вводе в поля формы
pub(crate) fn open_flag(form: RwSignal<CreateForm>) -> Memo<bool> {
    create_memo(move |_| form.with(|f| f.is_open()))
}

/// Значение одного поля; меняется только при вводе в это поле
pub(crate) fn field_value(form: RwSignal<CreateForm>, key: &'static str) -> Memo<String> {
    create_memo(move |_| form.with(|f| f.form().get(key).to_string()))
}

#[component]
fn FormField(
    field: FieldSpec,
    form: RwSignal<CreateForm>,
    site_options: Option<Signal<Vec<(String, String)>>>,
) -> impl IntoView {
    let key = field.key;
    let value = field_value(form, key);
    let set_value = move |ev: ev::Event| {
        let v = event_target_value(&ev);
        form.update(|f| f.set(key, v));
    };

    let input = match field.kind {
        FieldKind::TextArea => view! {
            <textarea id=key name=key required=field.required
                prop:value=move || value.get() on:input=set_value></textarea>
        }
        .into_view(),
        FieldKind::Choice(options) => view! {
            <select id=key name=key required=field.required on:change=set_value>
                <option value="">"Выберите..."</option>
                {options.iter().map(|opt| {
                    let opt = *opt;
                    view! {
                        <option value=opt selected=move || value.with(|v| v == opt)>{opt}</option>
                    }
                }).collect_view()}
            </select>
        }
        .into_view(),
        FieldKind::SiteRef => view! {
            <select id=key name=key required=field.required on:change=set_value>
                <option value="">"Не выбран"</option>
                {move || site_options
                    .map(|opts| opts.get())
                    .unwrap_or_default()
                    .into_iter()
                    .map(|(id, name)| {
                        let id_for_check = id.clone();
                        view! {
                            <option value=id selected=move || value.with(|v| *v == id_for_check)>{name}</option>
                        }
                    })
                    .collect_view()}
            </select>
        }
        .into_view(),
        kind => view! {
            <input type=kind.input_type() id=key name=key required=field.required
                step=(kind == FieldKind::Number).then_some("any")
                prop:value=move || value.get() on:input=set_value />
        }
        .into_view(),
    };

    view! {
        <div class="form-group">
            <label for=key>
                {field.label}
                {field.required.then(|| view! { <span class="required-mark">" *"</span> })}
            </label>
            {input}
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::panels::contracts::CONTRACT_FORM;
    use std::cell::Cell;
    use std::rc::Rc;

    fn count_runs<T: 'static>(memo: Memo<T>) -> Rc<Cell<usize>> {
        let runs = Rc::new(Cell::new(0));
        let counter = runs.clone();
        create_effect(move |_| {
            memo.with(|_| ());
            counter.set(counter.get() + 1);
        });
        runs
    }

    #[test]
    fn typing_keeps_modal_mounted() {
        let runtime = create_runtime();
        let form = create_rw_signal(CreateForm::new(&CONTRACT_FORM));
        form.update(|f| f.open());

        let is_open = open_flag(form);
        let runs = count_runs(is_open);
        assert_eq!(runs.get(), 1);

        for typed in ["1", "15", "15/24"] {
            form.update(|f| f.set("contract_number", typed));
        }
        assert_eq!(runs.get(), 1);
        assert!(is_open.get_untracked());

        form.update(|f| f.cancel());
        assert_eq!(runs.get(), 2);
        assert!(!is_open.get_untracked());

        runtime.dispose();
    }

    #[test]
    fn field_value_ignores_other_fields() {
        let runtime = create_runtime();
        let form = create_rw_signal(CreateForm::new(&CONTRACT_FORM));
        form.update(|f| f.open());

        let number = field_value(form, "contract_number");
        let runs = count_runs(number);

        form.update(|f| f.set("work_object", "Кровля"));
        assert_eq!(runs.get(), 1);

        form.update(|f| f.set("contract_number", "7-П"));
        assert_eq!(runs.get(), 2);
        assert_eq!(number.get_untracked(), "7-П");

        runtime.dispose();
    }
}
