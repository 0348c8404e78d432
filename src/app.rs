//! Оболочка приложения: контекст подключения и верхние вкладки

use leptos::*;

use crate::components::{ContractPanel, GeneralInfoPanel, SettingsView};
use crate::config::BackendConfig;
use crate::error::{AppError, Result};
use crate::store::RestStore;
use crate::utils::log_trace::{log_info, log_warn};

/// Общий для панелей доступ к бэкенду
#[derive(Clone, Copy)]
pub struct AppContext {
    store: RwSignal<Result<RestStore>>,
}

impl AppContext {
    pub fn new() -> Self {
        Self {
            store: create_rw_signal(connect()),
        }
    }

    /// Клиент для очередного запроса; без настроек — `AppError::Config`
    pub fn store(&self) -> Result<RestStore> {
        self.store.get_untracked()
    }

    pub fn connected(&self) -> bool {
        self.store.with(|s| s.is_ok())
    }

    /// Перечитать настройки после их изменения
    pub fn reload_config(&self) -> Result<()> {
        let next = connect();
        let status = next.as_ref().map(|_| ()).map_err(AppError::clone);
        self.store.set(next);
        status
    }
}

impl Default for AppContext {
    fn default() -> Self {
        Self::new()
    }
}

fn connect() -> Result<RestStore> {
    match BackendConfig::load() {
        Ok(config) => {
            log_info("config", &format!("бэкенд: {}", config.url));
            Ok(RestStore::new(config))
        }
        Err(e) => {
            log_warn("config", &e.to_string());
            Err(e)
        }
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Tab {
    Contracts,
    GeneralInfo,
    Settings,
}

#[component]
pub fn App() -> impl IntoView {
    let ctx = AppContext::new();
    provide_context(ctx);

    let initial = if ctx.connected() { Tab::Contracts } else { Tab::Settings };
    let (current_tab, set_current_tab) = create_signal(initial);

    let tab_button = move |tab: Tab, label: &'static str| {
        view! {
            <button
                class=move || if current_tab.get() == tab { "active" } else { "" }
                on:click=move |_| set_current_tab.set(tab)
            >
                {label}
            </button>
        }
    };

    view! {
        <div class="app">
            <header class="app-header">
                <h1>"Реестр договоров"</h1>
                <nav class="tabs">
                    {tab_button(Tab::Contracts, "Договоры")}
                    {tab_button(Tab::GeneralInfo, "Общие сведения")}
                    {tab_button(Tab::Settings, "Настройки")}
                </nav>
            </header>

            <main class="container">
                {move || match current_tab.get() {
                    Tab::Contracts => view! { <ContractPanel /> }.into_view(),
                    Tab::GeneralInfo => view! { <GeneralInfoPanel /> }.into_view(),
                    Tab::Settings => view! { <SettingsView /> }.into_view(),
                }}
            </main>
        </div>
    }
}
