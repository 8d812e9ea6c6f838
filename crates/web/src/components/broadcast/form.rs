use beasiswa_client::BroadcastForm;
use dioxus::prelude::*;

use crate::components::ui::{Button, ButtonVariant, ErrorText, TextArea, TextInput};

/// Create/edit form. Field edits go straight back to the store through the
/// change handlers; submission is handled by the page.
#[component]
pub fn BroadcastFormPanel(
    form: BroadcastForm,
    submitting: bool,
    error: Option<String>,
    on_title: EventHandler<String>,
    on_content: EventHandler<String>,
    on_submit: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    let heading = if form.editing.is_some() {
        "Edit Broadcast"
    } else {
        "New Broadcast"
    };
    let submit_label = match (submitting, form.editing.is_some()) {
        (true, _) => "Saving...",
        (false, true) => "Update",
        (false, false) => "Save",
    };

    rsx! {
        form {
            class: "bg-white rounded-xl shadow-sm border border-gray-200 p-6 space-y-4",
            onsubmit: move |e: FormEvent| {
                e.prevent_default();
                on_submit.call(());
            },
            h3 { class: "text-lg font-semibold text-gray-900", "{heading}" }
            div {
                label { class: "block text-sm font-medium text-gray-700 mb-1", r#for: "broadcast-title",
                    "Title"
                }
                TextInput {
                    id: "broadcast-title",
                    value: form.title.clone(),
                    placeholder: "Scholarship announcement",
                    oninput: move |e: FormEvent| on_title.call(e.value()),
                }
            }
            div {
                label { class: "block text-sm font-medium text-gray-700 mb-1", r#for: "broadcast-content",
                    "Message"
                }
                TextArea {
                    id: "broadcast-content",
                    value: form.content.clone(),
                    rows: 6,
                    placeholder: "Write the message recipients will receive",
                    oninput: move |e: FormEvent| on_content.call(e.value()),
                }
            }
            if let Some(message) = error {
                ErrorText { message }
            }
            div { class: "flex justify-end gap-3",
                Button {
                    variant: ButtonVariant::Ghost,
                    onclick: move |_| on_cancel.call(()),
                    "Cancel"
                }
                Button { r#type: "submit", disabled: submitting, "{submit_label}" }
            }
        }
    }
}
