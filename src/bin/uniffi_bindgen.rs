//! UniFFI bindgen CLI tool for generating language bindings.
//!
//! Generates the Swift and Kotlin bindings used by the mobile apps
//! from the recipe-planner library.
//!
//! ## Usage
//!
//! ```bash
//! cargo run --features cli --bin uniffi-bindgen generate --library target/release/librecipe_planner.so --language kotlin --out-dir ./bindings
//! ```

fn main() {
    uniffi::uniffi_bindgen_main()
}
