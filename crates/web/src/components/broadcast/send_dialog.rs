use beasiswa_shared::DeliveryChannel;
use dioxus::prelude::*;

use crate::components::ui::{Button, ButtonVariant};

/// Channel picker shown while a delivery is pending.
#[component]
pub fn SendDialog(
    title: Option<String>,
    recipient_count: usize,
    channel: DeliveryChannel,
    sending: bool,
    on_select: EventHandler<DeliveryChannel>,
    on_send: EventHandler<()>,
    on_cancel: EventHandler<()>,
) -> Element {
    rsx! {
        div { class: "fixed inset-0 bg-black/50 flex items-center justify-center z-50",
            div { class: "bg-white rounded-xl shadow-2xl w-full max-w-md mx-4",
                div { class: "px-6 py-4 border-b border-gray-200",
                    h3 { class: "text-lg font-bold text-gray-900", "Send Broadcast" }
                    if let Some(title) = title {
                        p { class: "text-sm text-gray-500 mt-1", "{title}" }
                    }
                }
                div { class: "p-6 space-y-4",
                    p { class: "text-sm text-gray-700",
                        "{recipient_count} recipient(s) selected. Choose a delivery channel:"
                    }
                    for option in DeliveryChannel::ALL {
                        label { class: "flex items-center gap-3 cursor-pointer",
                            input {
                                r#type: "radio",
                                name: "delivery-channel",
                                value: option.tag(),
                                checked: option == channel,
                                disabled: sending,
                                onchange: move |_| on_select.call(option),
                            }
                            span { class: "text-sm text-gray-800", {option.label()} }
                        }
                    }
                }
                div { class: "px-6 py-4 border-t border-gray-200 flex justify-end gap-3",
                    Button {
                        variant: ButtonVariant::Ghost,
                        disabled: sending,
                        onclick: move |_| on_cancel.call(()),
                        "Cancel"
                    }
                    Button {
                        disabled: sending,
                        onclick: move |_| on_send.call(()),
                        if sending {
                            "Sending..."
                        } else {
                            "Send"
                        }
                    }
                }
            }
        }
    }
}
