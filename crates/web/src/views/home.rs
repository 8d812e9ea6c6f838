use crate::Route;
use dioxus::prelude::*;

/// Landing page that redirects to the broadcast dashboard
#[component]
pub fn Home() -> Element {
    let nav = use_navigator();

    use_effect(move || {
        nav.replace(Route::broadcasts());
    });

    rsx! {
        div { class: "flex items-center justify-center min-h-screen bg-gray-50 text-gray-500",
            "Redirecting..."
        }
    }
}
