//! localStorage access for persisted UI slices.

use serde::de::DeserializeOwned;
use serde::Serialize;

fn storage() -> Option<web_sys::Storage> {
    web_sys::window().and_then(|w| w.local_storage().ok().flatten())
}

pub fn load_raw(key: &str) -> Option<String> {
    storage()?.get_item(key).ok().flatten()
}

pub fn save_raw(key: &str, raw: &str) {
    let Some(storage) = storage() else { return };
    if storage.set_item(key, raw).is_err() {
        log::warn!("Failed to persist {}", key);
    }
}

pub fn remove(key: &str) {
    if let Some(storage) = storage() {
        let _ = storage.remove_item(key);
    }
}

pub fn load_json<T: DeserializeOwned>(key: &str) -> Option<T> {
    let raw = load_raw(key)?;
    match serde_json::from_str::<T>(&raw) {
        Ok(value) => Some(value),
        Err(e) => {
            log::warn!("Ignoring unreadable {}: {}", key, e);
            None
        }
    }
}

pub fn save_json<T: Serialize>(key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(raw) => save_raw(key, &raw),
        Err(e) => log::warn!("Failed to encode {}: {}", key, e),
    }
}
