pub mod broadcast;
pub mod ui;
