use leptos::html::Form;
use leptos::prelude::*;

use super::config::PersisterConfig;
use super::dom::{persist_form, restore_form};

/// `<form>` whose field values are remembered per page path.
///
/// Restores the last submitted values once the form is mounted and saves
/// them again on every submit.
#[component]
pub fn PersistedSearchForm(
    #[prop(optional, into)] action: Option<String>,
    #[prop(optional)] config: Option<PersisterConfig>,
    children: Children,
) -> impl IntoView {
    let config = StoredValue::new(config.unwrap_or_default());
    let form_ref = NodeRef::<Form>::new();
    let restored = StoredValue::new(false);

    // Restore once, after children are in the DOM
    Effect::new(move |_| {
        let Some(form) = form_ref.get() else { return };
        if restored.get_value() {
            return;
        }
        restored.set_value(true);
        config.with_value(|config| {
            restore_form(&form, config);
        });
    });

    let on_submit = move |_ev: leptos::ev::SubmitEvent| {
        if let Some(form) = form_ref.get_untracked() {
            config.with_value(|config| persist_form(&form, config));
        }
    };

    view! {
        <form node_ref=form_ref method="get" action=action on:submit=on_submit>
            {children()}
        </form>
    }
}
