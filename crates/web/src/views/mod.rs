//! View components for the application.

pub mod broadcast_view;
pub mod dashboard_layout;
pub mod home;
pub mod select_recipients;

pub use broadcast_view::BroadcastView;
pub use dashboard_layout::DashboardLayout;
pub use home::Home;
pub use select_recipients::SelectRecipients;
