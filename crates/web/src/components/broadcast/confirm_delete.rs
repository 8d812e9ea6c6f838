use dioxus::prelude::*;

use crate::components::ui::{Button, ButtonVariant};

/// Modal asking the operator to confirm a delete.
#[component]
pub fn ConfirmDeleteDialog(
    title: String,
    on_confirm: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    rsx! {
        div { class: "fixed inset-0 bg-black/50 flex items-center justify-center z-50",
            div { class: "bg-white rounded-xl shadow-2xl w-full max-w-sm mx-4",
                div { class: "px-6 py-4 border-b border-gray-200",
                    h3 { class: "text-lg font-bold text-gray-900", "Delete broadcast" }
                }
                div { class: "p-6 text-sm text-gray-700",
                    "Are you sure you want to delete \"{title}\"?"
                }
                div { class: "px-6 py-4 border-t border-gray-200 flex justify-end gap-3",
                    Button {
                        variant: ButtonVariant::Ghost,
                        onclick: move |_| on_cancel.call(()),
                        "Cancel"
                    }
                    Button {
                        variant: ButtonVariant::Danger,
                        onclick: move |_| on_confirm.call(()),
                        "Delete"
                    }
                }
            }
        }
    }
}
