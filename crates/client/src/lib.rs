//! Beasiswa Client - broadcast workflow core
//!
//! Headless half of the scholarship dashboard: the REST client, the session
//! context and the stores behind the broadcast pages. The Dioxus views in
//! `beasiswa-web` hold these stores in signals and render them.

pub mod api_client;
pub mod auth_session;
pub mod backend;
pub mod config;
pub mod handoff;
pub mod logging;
pub mod storage;
pub mod stores;
#[cfg(any(test, feature = "testing"))]
pub mod testing;

pub use api_client::ApiClient;
pub use auth_session::{AuthSession, SessionContext};
pub use backend::Backend;
pub use config::ClientConfig;
pub use handoff::{PendingHandoff, SelectorQuery};
pub use stores::{
    BroadcastStore, DeliveryDispatcher, DispatchState, Notice, RecipientSelector, SelectionSet,
};
