//! Beasiswa Web - Dioxus dashboard for scholarship broadcasts
//!
//! Renders the stores from `beasiswa-client`: the broadcast list with its
//! create/edit form, recipient selection, and the delivery dialog.

pub mod auth_session;
pub mod components;
pub mod routes;
pub mod views;

pub use auth_session::{AuthContext, AuthProvider};
pub use routes::Route;
