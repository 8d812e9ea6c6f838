use beasiswa_client::Notice;
use dioxus::prelude::*;

/// Dismissible success/error banner.
#[component]
pub fn NoticeBanner(notice: Notice, on_dismiss: EventHandler<()>) -> Element {
    let class = if notice.is_error() {
        "flex items-start justify-between gap-4 p-3 rounded-lg text-sm bg-red-50 border border-red-200 text-red-700"
    } else {
        "flex items-start justify-between gap-4 p-3 rounded-lg text-sm bg-green-50 border border-green-200 text-green-700"
    };

    rsx! {
        div { class, role: "alert",
            span { {notice.message().to_string()} }
            button {
                class: "font-bold opacity-60 hover:opacity-100",
                r#type: "button",
                onclick: move |_| on_dismiss.call(()),
                "×"
            }
        }
    }
}

/// Inline error text under a form or table.
#[component]
pub fn ErrorText(message: String) -> Element {
    rsx! {
        div { class: "p-3 bg-red-50 border border-red-200 rounded-lg text-red-700 text-sm",
            "{message}"
        }
    }
}
