//! Вспомогательные модули браузерного окружения

pub mod log_trace;
pub mod storage;

/// Блокирующее окно с сообщением
pub fn alert(message: &str) {
    #[cfg(target_arch = "wasm32")]
    gloo::dialogs::alert(message);
    #[cfg(not(target_arch = "wasm32"))]
    eprintln!("alert: {}", message);
}
