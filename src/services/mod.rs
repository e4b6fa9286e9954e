pub mod backend;
pub mod scroll;
pub mod widget;
