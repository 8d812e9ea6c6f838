//! Admin dashboard shell with the session guard.

use crate::auth_session::AuthContext;
use crate::components::ui::{Button, ButtonVariant, TextInput};
use crate::Route;
use dioxus::prelude::*;

/// Header plus the routed page. Anonymous operators get a sign-in panel
/// instead of the page.
#[component]
pub fn DashboardLayout() -> Element {
    let mut auth = use_context::<AuthContext>();

    // Check the restored token once per mount
    use_hook(move || {
        if auth.is_authenticated() {
            spawn(auth.verify());
        }
    });

    if !auth.is_authenticated() {
        return rsx! { SignInPanel {} };
    }

    let username = auth.username().unwrap_or_else(|| "admin".to_string());

    rsx! {
        div { class: "min-h-screen bg-gray-50",
            header { class: "bg-white border-b border-gray-200",
                div { class: "max-w-6xl mx-auto px-6 h-14 flex items-center justify-between",
                    Link {
                        to: Route::broadcasts(),
                        class: "text-lg font-bold text-gray-900",
                        "Beasiswa Broadcast"
                    }
                    div { class: "flex items-center gap-4 text-sm text-gray-600",
                        span { "{username}" }
                        Button {
                            variant: ButtonVariant::Ghost,
                            onclick: move |_| auth.logout(),
                            "Log out"
                        }
                    }
                }
            }
            main { class: "max-w-6xl mx-auto px-6 py-8", Outlet::<Route> {} }
        }
    }
}

#[component]
fn SignInPanel() -> Element {
    let mut auth = use_context::<AuthContext>();
    let mut token = use_signal(String::new);

    let handle_submit = move |e: FormEvent| {
        e.prevent_default();
        let value = token.read().trim().to_string();
        if value.is_empty() {
            return;
        }
        auth.login(value);
        spawn(auth.verify());
    };

    rsx! {
        div { class: "min-h-screen flex items-center justify-center bg-gray-50",
            form {
                class: "bg-white rounded-xl shadow-sm border border-gray-200 p-8 w-full max-w-sm space-y-4",
                onsubmit: handle_submit,
                h2 { class: "text-xl font-bold text-gray-900", "You must log in first" }
                p { class: "text-sm text-gray-500",
                    "Paste an admin access token to open the broadcast dashboard."
                }
                TextInput {
                    value: token.read().clone(),
                    placeholder: "Access token",
                    oninput: move |e: FormEvent| token.set(e.value()),
                }
                Button { r#type: "submit", class: "w-full", "Continue" }
            }
        }
    }
}
