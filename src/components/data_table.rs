//! Таблица записей со строкой «Нет данных»

use leptos::*;

use crate::table::{TableBody, TableRow, NO_DATA};

/// Таблица по заголовкам `T::COLUMNS`
#[component]
pub fn DataTable<T>(
    rows: Signal<Vec<T>>,
    loading: Signal<bool>,
) -> impl IntoView
where
    T: TableRow + Clone + 'static,
{
    let body = create_memo(move |_| rows.with(|r| TableBody::build(r)));

    view! {
        <div class="table-wrapper" class:loading=move || loading.get()>
            {move || loading.get().then(|| view! {
                <div class="table-status">"Загрузка..."</div>
            })}
            <table class="data-table">
                <thead>
                    <tr>
                        {T::COLUMNS.iter().map(|title| view! { <th>{*title}</th> }).collect_view()}
                    </tr>
                </thead>
                <tbody>
                    {move || match body.get() {
                        TableBody::Placeholder { colspan } => view! {
                            <tr class="empty-row">
                                <td colspan=colspan.to_string()>{NO_DATA}</td>
                            </tr>
                        }.into_view(),
                        TableBody::Rows(rows) => rows.into_iter().map(|(key, cells)| view! {
                            <tr data-key=key>
                                {cells.into_iter().map(|cell| view! { <td>{cell}</td> }).collect_view()}
                            </tr>
                        }).collect_view(),
                    }}
                </tbody>
            </table>
        </div>
    }
}
