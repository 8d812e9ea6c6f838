use beasiswa_shared::{Broadcast, BroadcastStatus};
use dioxus::prelude::*;

use crate::components::ui::{Button, ButtonVariant};

fn status_badge(status: BroadcastStatus) -> &'static str {
    match status {
        BroadcastStatus::Draft => "bg-gray-100 text-gray-700",
        BroadcastStatus::Sent => "bg-green-100 text-green-700",
        BroadcastStatus::Failed => "bg-red-100 text-red-700",
    }
}

#[component]
pub fn BroadcastTable(
    broadcasts: Vec<Broadcast>,
    loading: bool,
    deleting: Option<i64>,
    on_edit: EventHandler<i64>,
    on_delete: EventHandler<i64>,
    on_send: EventHandler<i64>,
) -> Element {
    if loading && broadcasts.is_empty() {
        return rsx! {
            div { class: "p-8 text-center text-gray-500", "Loading broadcasts..." }
        };
    }
    if broadcasts.is_empty() {
        return rsx! {
            div { class: "p-8 text-center text-gray-500", "No broadcasts yet." }
        };
    }

    rsx! {
        div { class: "overflow-x-auto bg-white rounded-xl shadow-sm border border-gray-200",
            table { class: "min-w-full divide-y divide-gray-200 text-sm",
                thead { class: "bg-gray-50 text-left text-gray-600 uppercase text-xs",
                    tr {
                        th { class: "px-4 py-3", "Title" }
                        th { class: "px-4 py-3", "Message" }
                        th { class: "px-4 py-3", "Status" }
                        th { class: "px-4 py-3", "Updated" }
                        th { class: "px-4 py-3 text-right", "Actions" }
                    }
                }
                tbody { class: "divide-y divide-gray-100",
                    for broadcast in broadcasts {
                        BroadcastRow {
                            key: "{broadcast.id}",
                            deleting: deleting == Some(broadcast.id),
                            broadcast: broadcast.clone(),
                            on_edit,
                            on_delete,
                            on_send,
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn BroadcastRow(
    broadcast: Broadcast,
    deleting: bool,
    on_edit: EventHandler<i64>,
    on_delete: EventHandler<i64>,
    on_send: EventHandler<i64>,
) -> Element {
    let id = broadcast.id;
    let badge = status_badge(broadcast.status);
    let updated = broadcast.updated_at.format("%d %b %Y %H:%M").to_string();
    let sent_at = broadcast
        .sent_at
        .map(|at| at.format("%d %b %Y %H:%M").to_string());

    rsx! {
        tr { class: "hover:bg-gray-50",
            td { class: "px-4 py-3 font-medium text-gray-900", "{broadcast.title}" }
            td { class: "px-4 py-3 text-gray-600 max-w-md truncate", "{broadcast.content}" }
            td { class: "px-4 py-3",
                span { class: "px-2 py-1 rounded-full text-xs font-semibold {badge}",
                    "{broadcast.status}"
                }
                if let Some(sent_at) = sent_at {
                    div { class: "text-xs text-gray-400 mt-1", "{sent_at}" }
                }
            }
            td { class: "px-4 py-3 text-gray-500 whitespace-nowrap", "{updated}" }
            td { class: "px-4 py-3",
                div { class: "flex justify-end gap-2",
                    Button {
                        variant: ButtonVariant::Primary,
                        title: "Choose recipients and send",
                        onclick: move |_| on_send.call(id),
                        "Send"
                    }
                    Button {
                        variant: ButtonVariant::Secondary,
                        onclick: move |_| on_edit.call(id),
                        "Edit"
                    }
                    Button {
                        variant: ButtonVariant::Danger,
                        disabled: deleting,
                        onclick: move |_| on_delete.call(id),
                        if deleting {
                            "Deleting..."
                        } else {
                            "Delete"
                        }
                    }
                }
            }
        }
    }
}
