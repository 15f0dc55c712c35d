//! Binding of the persister to a server-rendered `<form>`.

use contracts::shared::search_form::FieldValue;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlFormElement, HtmlInputElement, HtmlSelectElement};

use super::config::PersisterConfig;
use super::form::{FieldKind, FormField, SearchForm};
use super::persister::{FormStatePersister, RestoreOutcome};
use super::store::LocalStorage;

// An input without a type attribute is a text input
const TEXT_FIELDS: &str = "input:not([type]), input[type=text], select";
const CHECKBOX_FIELDS: &str = "input[type=checkbox]";

/// [`SearchForm`] over a live DOM form element.
pub struct DomForm {
    form: HtmlFormElement,
}

impl DomForm {
    pub fn new(form: HtmlFormElement) -> Self {
        Self { form }
    }

    fn elements(&self, selector: &str) -> Vec<Element> {
        let Ok(list) = self.form.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..list.length())
            .filter_map(|i| list.item(i))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }
}

fn element_id(element: &Element) -> Option<String> {
    let id = element.id();
    if id.is_empty() {
        None
    } else {
        Some(id)
    }
}

fn text_value(element: &Element) -> Option<String> {
    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
        Some(input.value())
    } else {
        element.dyn_ref::<HtmlSelectElement>().map(|select| select.value())
    }
}

impl SearchForm for DomForm {
    fn fields(&self) -> Vec<FormField> {
        let mut fields = Vec::new();

        for element in self.elements(TEXT_FIELDS) {
            if let Some(value) = text_value(&element) {
                fields.push(FormField {
                    id: element_id(&element),
                    kind: FieldKind::Text,
                    value: FieldValue::Text(value),
                });
            }
        }

        for element in self.elements(CHECKBOX_FIELDS) {
            if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
                fields.push(FormField {
                    id: element_id(&element),
                    kind: FieldKind::Checkbox,
                    value: FieldValue::Checked(input.checked()),
                });
            }
        }

        fields
    }

    fn write(&mut self, id: &str, value: &FieldValue) {
        match value {
            FieldValue::Text(text) => {
                for element in self.elements(TEXT_FIELDS) {
                    if element.id() != id {
                        continue;
                    }
                    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
                        input.set_value(text);
                    } else if let Some(select) = element.dyn_ref::<HtmlSelectElement>() {
                        select.set_value(text);
                    }
                }
            }
            FieldValue::Checked(checked) => {
                for element in self.elements(CHECKBOX_FIELDS) {
                    if element.id() != id {
                        continue;
                    }
                    if let Some(input) = element.dyn_ref::<HtmlInputElement>() {
                        input.set_checked(*checked);
                    }
                }
            }
        }
    }
}

/// Path of the current page, e.g. `/projects/x/`.
pub fn current_path() -> Option<String> {
    web_sys::window()?.location().pathname().ok()
}

/// Restore `form` from the snapshot stored for the current page.
pub fn restore_form(form: &HtmlFormElement, config: &PersisterConfig) -> Option<RestoreOutcome> {
    let path = current_path()?;
    let persister = FormStatePersister::new(LocalStorage::open(), config.clone());
    let outcome = persister.restore(&path, &mut DomForm::new(form.clone()));
    log::debug!("Search form restore on {}: {:?}", path, outcome);
    Some(outcome)
}

/// Save the current values of `form` for the current page.
pub fn persist_form(form: &HtmlFormElement, config: &PersisterConfig) {
    let Some(path) = current_path() else { return };
    let mut persister = FormStatePersister::new(LocalStorage::open(), config.clone());
    match persister.persist(&path, &DomForm::new(form.clone())) {
        Ok(Some(snapshot)) => {
            log::debug!("Saved {} search form fields for {}", snapshot.len(), path)
        }
        Ok(None) => {}
        Err(err) => log::warn!("Failed to save search form state for {}: {}", path, err),
    }
}

fn attach(document: &web_sys::Document, config: PersisterConfig) {
    let element = match document.query_selector(&config.form_selector) {
        Ok(Some(element)) => element,
        _ => return,
    };
    let Ok(form) = element.dyn_into::<HtmlFormElement>() else {
        log::warn!("{} is not a form element", config.form_selector);
        return;
    };

    restore_form(&form, &config);

    let target = form.clone();
    let on_submit = Closure::wrap(Box::new(move |_event: web_sys::Event| {
        persist_form(&target, &config);
    }) as Box<dyn FnMut(_)>);

    if let Err(err) =
        form.add_event_listener_with_callback("submit", on_submit.as_ref().unchecked_ref())
    {
        log::warn!("Failed to bind search form submit handler: {:?}", err);
        return;
    }
    on_submit.forget(); // Lives as long as the page
}

/// Restore the server-rendered search form once the document is ready and
/// save its state on every submit.
pub fn bind_document(config: PersisterConfig) {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };

    if document.ready_state() != "loading" {
        attach(&document, config);
        return;
    }

    let ready_document = document.clone();
    let mut config = Some(config);
    let on_ready = Closure::wrap(Box::new(move |_event: web_sys::Event| {
        if let Some(config) = config.take() {
            attach(&ready_document, config);
        }
    }) as Box<dyn FnMut(_)>);

    if document
        .add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())
        .is_ok()
    {
        on_ready.forget();
    }
}
