//! Работа с localStorage
//!
//! Вне wasm32 (юнит-тесты) хранилища нет: чтение даёт None, запись ничего не делает.

use web_sys::Storage;

#[cfg(target_arch = "wasm32")]
fn local_storage() -> Option<Storage> {
    web_sys::window()?.local_storage().ok()?
}

#[cfg(not(target_arch = "wasm32"))]
fn local_storage() -> Option<Storage> {
    None
}

/// Пустая строка считается отсутствием значения
pub fn load(key: &str) -> Option<String> {
    let value = local_storage()?.get_item(key).ok()??;
    if value.is_empty() { None } else { Some(value) }
}

pub fn save(key: &str, value: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.set_item(key, value);
    }
}

pub fn remove(key: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(key);
    }
}
