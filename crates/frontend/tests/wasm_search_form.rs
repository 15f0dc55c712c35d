#![cfg(target_arch = "wasm32")]

use frontend::shared::search_form::dom::{current_path, persist_form, restore_form};
use frontend::shared::search_form::{
    bind_document, PersistedSearchForm, PersisterConfig, RestoreOutcome,
};
use gloo_timers::future::TimeoutFuture;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
use web_sys::{
    Document, Event, EventInit, HtmlElement, HtmlFormElement, HtmlInputElement,
    HtmlSelectElement, Storage,
};

wasm_bindgen_test_configure!(run_in_browser);

// Checkbox first in the markup: text/select fields must still be saved before it.
const SEARCH_FIELDS: &str = r#"
    <input type="checkbox" id="exact" checked>
    <input type="text" id="q" value="hello">
    <input id="plain" value="untyped">
    <select id="lang">
        <option value="en">en</option>
        <option value="cs" selected>cs</option>
    </select>
    <input type="text" class="anonymous" value="anonymous">
"#;

const SAVED_FIELDS: &str = r#"{"q":"hello","plain":"untyped","lang":"cs","exact":true}"#;

fn document() -> Document {
    web_sys::window().unwrap().document().unwrap()
}

fn local_storage() -> Storage {
    web_sys::window().unwrap().local_storage().unwrap().unwrap()
}

fn page_key() -> String {
    PersisterConfig::default().storage_key(&current_path().unwrap())
}

fn mount_form(id: &str) -> HtmlFormElement {
    let form: HtmlFormElement = document()
        .create_element("form")
        .unwrap()
        .dyn_into()
        .unwrap();
    form.set_id(id);
    form.set_inner_html(SEARCH_FIELDS);
    document().body().unwrap().append_child(&form).unwrap();
    form
}

fn mount_host() -> HtmlElement {
    let host: HtmlElement = document()
        .create_element("div")
        .unwrap()
        .dyn_into()
        .unwrap();
    document().body().unwrap().append_child(&host).unwrap();
    host
}

fn input(root: &web_sys::Element, selector: &str) -> HtmlInputElement {
    root.query_selector(selector)
        .unwrap()
        .unwrap()
        .dyn_into()
        .unwrap()
}

fn select(root: &web_sys::Element, selector: &str) -> HtmlSelectElement {
    root.query_selector(selector)
        .unwrap()
        .unwrap()
        .dyn_into()
        .unwrap()
}

fn clear_fields(form: &HtmlFormElement) {
    input(form, "#q").set_value("");
    input(form, "#plain").set_value("");
    input(form, ".anonymous").set_value("");
    select(form, "#lang").set_value("en");
    input(form, "#exact").set_checked(false);
}

// Synthetic submit events never navigate.
fn submit(form: &HtmlFormElement) {
    let init = EventInit::new();
    init.set_bubbles(true);
    let event = Event::new_with_event_init_dict("submit", &init).unwrap();
    form.dispatch_event(&event).unwrap();
}

#[wasm_bindgen_test]
fn test_persist_form_saves_text_fields_before_checkboxes() {
    local_storage().remove_item(&page_key()).unwrap();
    let form = mount_form("persist-form");

    persist_form(&form, &PersisterConfig::default());

    assert_eq!(
        local_storage().get_item(&page_key()).unwrap().as_deref(),
        Some(SAVED_FIELDS)
    );
    form.remove();
}

#[wasm_bindgen_test]
fn test_restore_form_sets_values_and_checked_state() {
    local_storage().remove_item(&page_key()).unwrap();
    let config = PersisterConfig::default();
    let form = mount_form("restore-form");

    persist_form(&form, &config);
    clear_fields(&form);
    let outcome = restore_form(&form, &config);

    assert_eq!(outcome, Some(RestoreOutcome::Restored { applied: 4 }));
    assert_eq!(input(&form, "#q").value(), "hello");
    assert_eq!(input(&form, "#plain").value(), "untyped");
    assert_eq!(select(&form, "#lang").value(), "cs");
    assert!(input(&form, "#exact").checked());
    assert_eq!(input(&form, ".anonymous").value(), "");
    form.remove();
}

#[wasm_bindgen_test]
fn test_restore_form_without_snapshot_keeps_markup_defaults() {
    local_storage().remove_item(&page_key()).unwrap();
    let form = mount_form("empty-form");

    let outcome = restore_form(&form, &PersisterConfig::default());

    assert_eq!(outcome, Some(RestoreOutcome::NothingStored));
    assert_eq!(input(&form, "#q").value(), "hello");
    assert_eq!(select(&form, "#lang").value(), "cs");
    assert!(input(&form, "#exact").checked());
    form.remove();
}

#[wasm_bindgen_test]
fn test_restore_form_ignores_malformed_snapshot() {
    local_storage()
        .set_item(&page_key(), r#"{"q":"new","exact":1}"#)
        .unwrap();
    let form = mount_form("malformed-form");

    let outcome = restore_form(&form, &PersisterConfig::default());

    assert_eq!(outcome, Some(RestoreOutcome::Malformed));
    assert_eq!(input(&form, "#q").value(), "hello");
    assert!(input(&form, "#exact").checked());
    form.remove();
}

#[wasm_bindgen_test]
fn test_bind_document_restores_and_saves_on_submit() {
    local_storage()
        .set_item(&page_key(), r#"{"q":"restored","exact":false}"#)
        .unwrap();
    let form = mount_form("bound-search-form");
    let config = PersisterConfig {
        form_selector: "#bound-search-form".to_string(),
        ..Default::default()
    };

    bind_document(config);

    assert_eq!(input(&form, "#q").value(), "restored");
    assert!(!input(&form, "#exact").checked());
    assert_eq!(input(&form, "#plain").value(), "untyped");

    input(&form, "#q").set_value("typed");
    submit(&form);

    assert_eq!(
        local_storage().get_item(&page_key()).unwrap().as_deref(),
        Some(r#"{"q":"typed","plain":"untyped","lang":"cs","exact":false}"#)
    );
    form.remove();
}

fn component_view() -> impl IntoView {
    view! {
        <PersistedSearchForm>
            <input type="text" id="component-q" value="" />
            <input type="checkbox" id="component-exact" />
        </PersistedSearchForm>
    }
}

#[wasm_bindgen_test]
async fn test_persisted_search_form_restores_after_remount() {
    local_storage().remove_item(&page_key()).unwrap();

    let first_host = mount_host();
    let handle = leptos::mount::mount_to(first_host.clone(), component_view);
    TimeoutFuture::new(0).await;

    let form: HtmlFormElement = first_host
        .query_selector("form")
        .unwrap()
        .unwrap()
        .dyn_into()
        .unwrap();
    assert_eq!(input(&form, "#component-q").value(), "");

    input(&form, "#component-q").set_value("kept");
    input(&form, "#component-exact").set_checked(true);
    submit(&form);

    assert_eq!(
        local_storage().get_item(&page_key()).unwrap().as_deref(),
        Some(r#"{"component-q":"kept","component-exact":true}"#)
    );
    drop(handle);
    first_host.remove();

    let second_host = mount_host();
    let _handle = leptos::mount::mount_to(second_host.clone(), component_view);
    TimeoutFuture::new(0).await;

    assert_eq!(input(&second_host, "#component-q").value(), "kept");
    assert!(input(&second_host, "#component-exact").checked());

    // Later changes are not overwritten by a second restore
    input(&second_host, "#component-q").set_value("edited");
    TimeoutFuture::new(0).await;
    assert_eq!(input(&second_host, "#component-q").value(), "edited");
    second_host.remove();
}
