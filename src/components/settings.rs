//! Экран настроек подключения

use leptos::*;

use crate::config::{clear_backend, save_backend, stored_url};
use crate::format::format_date;
use crate::utils::log_trace::{clear_logs, download_logs, recent_errors};
use crate::AppContext;

const RECENT_ERRORS: usize = 5;

#[component]
pub fn SettingsView() -> impl IntoView {
    let ctx = use_context::<AppContext>().expect("AppContext not found");

    let (url, set_url) = create_signal(stored_url().unwrap_or_default());
    let (api_key, set_api_key) = create_signal(String::new());
    let (message, set_message) = create_signal(None::<(bool, String)>);
    let (errors, set_errors) = create_signal(recent_errors(RECENT_ERRORS));

    let on_save = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        save_backend(&url.get_untracked(), &api_key.get_untracked());
        match ctx.reload_config() {
            Ok(()) => {
                set_api_key.set(String::new());
                set_message.set(Some((true, "Подключение сохранено".to_string())));
            }
            Err(e) => set_message.set(Some((false, e.to_string()))),
        }
    };

    let on_clear = move |_| {
        clear_backend();
        set_url.set(String::new());
        set_api_key.set(String::new());
        let status = match ctx.reload_config() {
            Ok(()) => (true, "Используются настройки сборки".to_string()),
            Err(e) => (false, e.to_string()),
        };
        set_message.set(Some(status));
    };

    let on_clear_logs = move |_| {
        clear_logs();
        set_errors.set(Vec::new());
    };

    view! {
        <section class="panel settings-panel">
            <h2>"Подключение к базе данных"</h2>
            <p class="connection-status">
                {move || if ctx.connected() { "Подключено" } else { "Не настроено" }}
            </p>
            <form class="settings-form" on:submit=on_save>
                <div class="form-group">
                    <label for="backend-url">"Адрес"</label>
                    <input id="backend-url" type="url" placeholder="https://project.example.ru" required
                        prop:value=move || url.get()
                        on:input=move |ev| set_url.set(event_target_value(&ev)) />
                </div>
                <div class="form-group">
                    <label for="backend-key">"Ключ API"</label>
                    <input id="backend-key" type="password" required
                        prop:value=move || api_key.get()
                        on:input=move |ev| set_api_key.set(event_target_value(&ev)) />
                </div>
                <div class="form-actions">
                    <button type="button" class="cancel-btn" on:click=on_clear>"Сбросить"</button>
                    <button type="submit" class="save-btn">"Сохранить"</button>
                </div>
            </form>
            {move || message.get().map(|(ok, text)| view! {
                <p class=if ok { "status success" } else { "status error" }>{text}</p>
            })}

            <h3>"Журнал"</h3>
            <div class="form-actions">
                <button type="button" class="cancel-btn" on:click=on_clear_logs>"Очистить журнал"</button>
                <button type="button" class="save-btn" on:click=move |_| download_logs()>"Скачать журнал"</button>
            </div>
            {move || {
                let list = errors.get();
                (!list.is_empty()).then(|| view! {
                    <ul class="log-errors">
                        {list.into_iter().map(|e| view! {
                            <li>
                                <span class="log-time">{format_date(Some(&e.timestamp))}</span>
                                " [" {e.category} "] " {e.message}
                            </li>
                        }).collect_view()}
                    </ul>
                })
            }}
        </section>
    }
}
