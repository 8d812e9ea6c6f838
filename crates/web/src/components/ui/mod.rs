//! UI primitives (Button, TextInput, TextArea, NoticeBanner)

pub mod button;
pub mod input;
pub mod notice;

pub use button::*;
pub use input::*;
pub use notice::*;
