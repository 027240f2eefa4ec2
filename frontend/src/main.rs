//! Entry point for the WASM application

pub fn main() {
    if let Err(err) = anagrams_ui::start() {
        wasm_bindgen::throw_str(&err.to_string());
    }
}
