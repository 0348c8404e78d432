//! UI-компоненты

pub mod contract_panel;
pub mod create_modal;
pub mod data_table;
pub mod general_info_panel;
pub mod settings;

pub use contract_panel::ContractPanel;
pub use create_modal::CreateModal;
pub use data_table::DataTable;
pub use general_info_panel::GeneralInfoPanel;
pub use settings::SettingsView;
