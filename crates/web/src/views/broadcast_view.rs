//! Broadcast list page with the create/edit form and the send dialog.

use crate::auth_session::AuthContext;
use crate::components::broadcast::{
    BroadcastFormPanel, BroadcastTable, ConfirmDeleteDialog, SendDialog,
};
use crate::components::ui::{Button, ButtonVariant, ErrorText, NoticeBanner, TextInput};
use crate::routes::{BroadcastQuery, RecipientsQuery};
use crate::Route;
use beasiswa_client::{Backend, BroadcastStore, DeliveryDispatcher, DispatchState};
use beasiswa_shared::WorkflowError;
use dioxus::prelude::*;

#[component]
pub fn BroadcastView(query: BroadcastQuery) -> Element {
    let auth = use_context::<AuthContext>();
    let nav = use_navigator();
    let mut store = use_signal(BroadcastStore::new);
    // Opened by a hand-off from recipient selection; later query changes on
    // this mount are ignored.
    let mut dispatcher = use_signal(|| {
        let mut dispatcher = DeliveryDispatcher::new();
        dispatcher.arm(&query.0);
        dispatcher
    });

    let mut refresh = move || {
        store.write().begin_refresh();
        spawn(async move {
            let result = auth
                .client()
                .list_broadcasts()
                .await
                .map_err(WorkflowError::from);
            store.write().finish_refresh(result);
        });
    };

    use_hook(move || refresh());

    let submit = move |_: ()| {
        let Ok(submission) = store.write().begin_submit(&auth.session.read()) else {
            return;
        };
        spawn(async move {
            let result = submission.run(&auth.client()).await;
            store.write().finish_submit(&submission, result);
        });
    };

    let confirm_delete = move |_: ()| {
        let Ok(deletion) = store.write().confirm_delete(&auth.session.read()) else {
            return;
        };
        spawn(async move {
            let result = deletion.run(&auth.client()).await;
            store.write().finish_delete(&deletion, result);
        });
    };

    let send = move |_: ()| {
        let Ok(request) = dispatcher.write().begin_send(&auth.session.read()) else {
            return;
        };
        spawn(async move {
            let result = request.run(&auth.client()).await;
            dispatcher
                .write()
                .finish_send(&request, result, &mut store.write());
            nav.replace(Route::broadcasts());
        });
    };

    let cancel_send = move |_: ()| {
        dispatcher.write().cancel();
        nav.replace(Route::broadcasts());
    };

    let state = store.read();
    let visible: Vec<_> = state.filtered().into_iter().cloned().collect();
    let pending_delete = state
        .pending_delete()
        .map(|id| state.get(id).map(|b| b.title.clone()).unwrap_or_else(|| format!("#{id}")));
    let dispatch = dispatcher.read();
    let pending_send = match dispatch.state() {
        DispatchState::Idle => None,
        DispatchState::Pending {
            broadcast_id,
            recipients,
            channel,
        } => Some((*broadcast_id, recipients.len(), *channel)),
        DispatchState::Sending {
            broadcast_id,
            recipient_count,
            channel,
        } => Some((*broadcast_id, *recipient_count, *channel)),
    };

    rsx! {
        div { class: "space-y-6",
            div { class: "flex flex-wrap items-center justify-between gap-4",
                h1 { class: "text-2xl font-bold text-gray-900", "Broadcasts" }
                div { class: "flex items-center gap-3",
                    TextInput {
                        class: "w-64",
                        value: state.search.clone(),
                        placeholder: "Search by title",
                        oninput: move |e: FormEvent| store.write().search = e.value(),
                    }
                    Button {
                        variant: ButtonVariant::Secondary,
                        disabled: state.loading,
                        onclick: move |_| refresh(),
                        if state.loading {
                            "Refreshing..."
                        } else {
                            "Refresh"
                        }
                    }
                    Button {
                        onclick: move |_| store.write().toggle_form(),
                        if state.form.open {
                            "Close"
                        } else {
                            "New Broadcast"
                        }
                    }
                }
            }

            if let Some(notice) = dispatch.notice.clone() {
                NoticeBanner {
                    notice,
                    on_dismiss: move |_| dispatcher.write().notice = None,
                }
            }
            if let Some(notice) = state.notice.clone() {
                NoticeBanner {
                    notice,
                    on_dismiss: move |_| store.write().dismiss_notice(),
                }
            }

            if state.form.open {
                BroadcastFormPanel {
                    form: state.form.clone(),
                    submitting: state.submitting,
                    error: state.error.clone(),
                    on_title: move |value: String| store.write().form.title = value,
                    on_content: move |value: String| store.write().form.content = value,
                    on_submit: submit,
                    on_cancel: move |_| store.write().close_form(),
                }
            } else if let Some(message) = state.error.clone() {
                ErrorText { message }
            }

            BroadcastTable {
                broadcasts: visible,
                loading: state.loading,
                deleting: state.deleting(),
                on_edit: move |id: i64| {
                    store.write().start_edit(id);
                },
                on_delete: move |id: i64| {
                    store.write().request_delete(id);
                },
                on_send: move |id: i64| {
                    let query = RecipientsQuery(store.read().send_target(id));
                    nav.push(Route::SelectRecipients { query });
                },
            }
        }

        if let Some(title) = pending_delete {
            ConfirmDeleteDialog {
                title,
                on_confirm: confirm_delete,
                on_cancel: move |_| store.write().cancel_delete(),
            }
        }

        if let Some((broadcast_id, recipient_count, channel)) = pending_send {
            SendDialog {
                title: state.get(broadcast_id).map(|b| b.title.clone()),
                recipient_count,
                channel,
                sending: dispatch.is_sending(),
                on_select: move |channel| dispatcher.write().select_channel(channel),
                on_send: send,
                on_cancel: cancel_send,
            }
        }
    }
}
