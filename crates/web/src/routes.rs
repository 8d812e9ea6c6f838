//! Application routing configuration.

use std::fmt;

use beasiswa_client::{PendingHandoff, SelectorQuery};
use dioxus::prelude::*;

use crate::views::{BroadcastView, DashboardLayout, Home, SelectRecipients};

/// Query of the broadcast page: a recipient hand-off, possibly empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BroadcastQuery(pub PendingHandoff);

impl FromQuery for BroadcastQuery {
    fn from_query(query: &str) -> Self {
        Self(PendingHandoff::parse(query))
    }
}

impl fmt::Display for BroadcastQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Query of the recipient selection page: the broadcast being sent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipientsQuery(pub SelectorQuery);

impl FromQuery for RecipientsQuery {
    fn from_query(query: &str) -> Self {
        Self(SelectorQuery::parse(query))
    }
}

impl fmt::Display for RecipientsQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// Router configuration
#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    // Landing page redirects to the broadcast dashboard
    #[route("/")]
    Home {},

    #[layout(DashboardLayout)]
        #[route("/dashboard/broadcast?:..query")]
        BroadcastView { query: BroadcastQuery },
        #[route("/dashboard/broadcast/select-recipients?:..query")]
        SelectRecipients { query: RecipientsQuery },
}

impl Route {
    /// The broadcast page with no pending hand-off.
    pub fn broadcasts() -> Self {
        Route::BroadcastView {
            query: BroadcastQuery::default(),
        }
    }
}
