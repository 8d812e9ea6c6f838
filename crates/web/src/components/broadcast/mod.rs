//! Broadcast and recipient page components.

pub mod confirm_delete;
pub mod form;
pub mod recipient_table;
pub mod send_dialog;
pub mod table;

pub use confirm_delete::ConfirmDeleteDialog;
pub use form::BroadcastFormPanel;
pub use recipient_table::RecipientTable;
pub use send_dialog::SendDialog;
pub use table::BroadcastTable;
