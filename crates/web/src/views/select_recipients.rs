//! Recipient selection for one broadcast.

use crate::auth_session::AuthContext;
use crate::components::broadcast::RecipientTable;
use crate::components::ui::{Button, ButtonVariant, ErrorText, TextInput};
use crate::routes::{BroadcastQuery, RecipientsQuery};
use crate::Route;
use beasiswa_client::{Backend, RecipientSelector};
use beasiswa_shared::WorkflowError;
use dioxus::prelude::*;

#[component]
pub fn SelectRecipients(query: RecipientsQuery) -> Element {
    let auth = use_context::<AuthContext>();
    let nav = use_navigator();
    let mut selector = use_signal(|| RecipientSelector::new(&query.0));

    let mut load = move || {
        selector.write().begin_load();
        spawn(async move {
            let result = auth
                .client()
                .list_recipients()
                .await
                .map_err(WorkflowError::from);
            selector.write().finish_load(result);
        });
    };

    use_hook(move || load());

    let confirm = move |_: MouseEvent| {
        // A rejected confirmation leaves its message in `alert`
        let Ok(handoff) = selector.write().confirm() else {
            return;
        };
        nav.push(Route::BroadcastView {
            query: BroadcastQuery(handoff),
        });
    };

    let state = selector.read();
    let visible: Vec<_> = state.filtered().into_iter().cloned().collect();
    let selected = state.selection().len();
    let heading = match state.broadcast_id() {
        Some(id) => format!("Select recipients for broadcast #{id}"),
        None => "Select recipients".to_string(),
    };

    rsx! {
        div { class: "space-y-6",
            div { class: "flex flex-wrap items-center justify-between gap-4",
                div {
                    h1 { class: "text-2xl font-bold text-gray-900", "{heading}" }
                    p { class: "text-sm text-gray-500 mt-1", "{selected} selected" }
                }
                div { class: "flex items-center gap-3",
                    TextInput {
                        class: "w-64",
                        value: state.search.clone(),
                        placeholder: "Search by name",
                        oninput: move |e: FormEvent| selector.write().search = e.value(),
                    }
                    Button {
                        variant: ButtonVariant::Secondary,
                        disabled: state.loading,
                        onclick: move |_| load(),
                        "Refresh"
                    }
                    Button {
                        variant: ButtonVariant::Ghost,
                        onclick: move |_| {
                            nav.push(Route::broadcasts());
                        },
                        "Back"
                    }
                    Button { onclick: confirm, "Continue" }
                }
            }

            if let Some(message) = state.alert.clone() {
                div { class: "flex items-start justify-between gap-4 p-3 rounded-lg text-sm bg-yellow-50 border border-yellow-200 text-yellow-800",
                    role: "alert",
                    span { "{message}" }
                    button {
                        class: "font-bold opacity-60 hover:opacity-100",
                        r#type: "button",
                        onclick: move |_| selector.write().alert = None,
                        "×"
                    }
                }
            }
            if let Some(message) = state.error.clone() {
                ErrorText { message }
            }

            RecipientTable {
                recipients: visible,
                selection: state.selection().clone(),
                loading: state.loading,
                on_toggle: move |id: i64| {
                    selector.write().toggle(id);
                },
            }
        }
    }
}
