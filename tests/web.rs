//! WebAssembly integration tests.
//!
//! These tests run in a headless browser using wasm-bindgen-test.
//!
//! Run with: wasm-pack test --headless --chrome

#![cfg(target_arch = "wasm32")]

use card_pager::wasm::flat_buffer::{MAGIC, SCHEMA_VERSION};
use card_pager::WasmPrintSession;
use js_sys::Function;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

fn session() -> WasmPrintSession {
    WasmPrintSession::new("a4", "portrait", 2.5, 3.5)
        .map_err(JsValue::from)
        .unwrap()
}

/// Overflows past 20 UTF-16 units
fn short_card() -> Function {
    Function::new_with_args("content", "return content.length > 20;")
}

fn drive_until_converged(session: &mut WasmPrintSession, id: u32, measure: &Function) {
    for _ in 0..100 {
        if session.drive(id, measure) {
            return;
        }
    }
    panic!("card {id} did not converge");
}

#[wasm_bindgen_test]
fn test_init_installs_console_logger() {
    card_pager::wasm::init();
    card_pager::wasm::init();
    assert!(log::log_enabled!(log::Level::Warn));
    assert!(!log::log_enabled!(log::Level::Trace));
}

#[wasm_bindgen_test]
fn test_new_session() {
    let session = session();
    assert_eq!(session.total_sheets(), 0);
    assert!(session.is_settled());
}

#[wasm_bindgen_test]
fn test_unknown_paper_is_an_error() {
    assert!(WasmPrintSession::new("b5", "portrait", 2.5, 3.5).is_err());
    assert!(WasmPrintSession::new("a4", "sideways", 2.5, 3.5).is_err());
    assert!(WasmPrintSession::new("a4", "portrait", 0.0, 3.5).is_err());
}

#[wasm_bindgen_test]
fn test_from_config() {
    let session = WasmPrintSession::from_config(r#"{"paper":{"type":"letter"}}"#)
        .map_err(JsValue::from)
        .unwrap();
    assert_eq!(session.total_sheets(), 0);
}

#[wasm_bindgen_test]
fn test_drive_with_js_measure() {
    let mut session = session();
    session.mount(1, "one two three four five six seven eight nine ten");
    assert_eq!(session.page_count(1), None);

    drive_until_converged(&mut session, 1, &short_card());
    let count = session.page_count(1).unwrap();
    assert!(count > 1);
    assert_eq!(session.total_sheets(), 1);
    assert!(!session.pages(1).is_null());
    assert!(session.pages(2).is_null());
}

#[wasm_bindgen_test]
fn test_throwing_measure_counts_as_fit() {
    let mut session = session();
    session.mount(3, "anything at all");
    let broken = Function::new_with_args("content", "throw new Error('no layout');");
    drive_until_converged(&mut session, 3, &broken);
    assert_eq!(session.page_count(3), Some(1));
}

#[wasm_bindgen_test]
fn test_unmount_and_set_paper() {
    let mut session = session();
    session.mount(1, "short");
    drive_until_converged(&mut session, 1, &short_card());
    assert!(session.set_paper("a3", "landscape").is_ok());
    assert!(session.set_paper("b5", "landscape").is_err());
    assert!(session.unmount(1));
    assert!(!session.unmount(1));
    assert_eq!(session.total_sheets(), 0);
}

#[wasm_bindgen_test]
fn test_sheet_buffer() {
    let mut session = session();
    session.mount(1, "short");
    drive_until_converged(&mut session, 1, &short_card());
    session.build_sheet_buffer();

    assert!(session.sheet_u32_len() > 0);
    assert!(session.sheet_f32_len() > 0);

    let memory = wasm_bindgen::memory()
        .dyn_into::<js_sys::WebAssembly::Memory>()
        .unwrap();
    let words = js_sys::Uint32Array::new(&memory.buffer());
    let base = session.sheet_u32_ptr() / 4;
    assert_eq!(words.get_index(base), MAGIC);
    assert_eq!(words.get_index(base + 1), SCHEMA_VERSION);
    assert_eq!(words.get_index(base + 2), 1);
}
