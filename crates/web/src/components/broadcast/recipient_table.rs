use beasiswa_client::SelectionSet;
use beasiswa_shared::Recipient;
use dioxus::prelude::*;

/// Recipient directory with one checkbox per row.
#[component]
pub fn RecipientTable(
    recipients: Vec<Recipient>,
    selection: SelectionSet,
    loading: bool,
    on_toggle: EventHandler<i64>,
) -> Element {
    if loading && recipients.is_empty() {
        return rsx! {
            div { class: "p-8 text-center text-gray-500", "Loading recipients..." }
        };
    }
    if recipients.is_empty() {
        return rsx! {
            div { class: "p-8 text-center text-gray-500", "No recipients found." }
        };
    }

    rsx! {
        div { class: "overflow-x-auto bg-white rounded-xl shadow-sm border border-gray-200",
            table { class: "min-w-full divide-y divide-gray-200 text-sm",
                thead { class: "bg-gray-50 text-left text-gray-600 uppercase text-xs",
                    tr {
                        th { class: "px-4 py-3 w-10" }
                        th { class: "px-4 py-3", "Name" }
                        th { class: "px-4 py-3", "NRP" }
                        th { class: "px-4 py-3", "Department" }
                        th { class: "px-4 py-3", "GPA" }
                        th { class: "px-4 py-3", "Phone" }
                        th { class: "px-4 py-3", "Email" }
                    }
                }
                tbody { class: "divide-y divide-gray-100",
                    for recipient in recipients {
                        tr {
                            key: "{recipient.id}",
                            class: "hover:bg-gray-50 cursor-pointer",
                            onclick: {
                                let id = recipient.id;
                                move |_| on_toggle.call(id)
                            },
                            td { class: "px-4 py-3",
                                input {
                                    r#type: "checkbox",
                                    checked: selection.contains(recipient.id),
                                    // Row click already toggles
                                    onclick: move |e: MouseEvent| e.stop_propagation(),
                                    onchange: {
                                        let id = recipient.id;
                                        move |_| on_toggle.call(id)
                                    },
                                }
                            }
                            td { class: "px-4 py-3 font-medium text-gray-900", "{recipient.name}" }
                            td { class: "px-4 py-3 text-gray-600", "{recipient.registration_number}" }
                            td { class: "px-4 py-3 text-gray-600", "{recipient.department}" }
                            td { class: "px-4 py-3 text-gray-600", {format!("{:.2}", recipient.gpa)} }
                            td { class: "px-4 py-3 text-gray-600", "{recipient.phone}" }
                            td { class: "px-4 py-3 text-gray-600", "{recipient.email}" }
                        }
                    }
                }
            }
        }
    }
}
