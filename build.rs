use std::env;

fn main() {
    // Адрес бэкенда встраивается при сборке (значения из настроек приоритетнее)
    for key in ["BACKEND_URL", "BACKEND_API_KEY"] {
        match env::var(key) {
            Ok(value) if !value.trim().is_empty() => {
                println!("cargo:rustc-env={}={}", key, value.trim());
            }
            _ => {
                println!("cargo:warning={} is not set; configure the backend in the settings view", key);
            }
        }
        println!("cargo:rerun-if-env-changed={}", key);
    }
}
