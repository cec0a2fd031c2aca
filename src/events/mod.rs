pub mod navigation;
pub mod pointer;

pub use navigation::{navigate_handler, wire_popstate, AppSlot};
pub use pointer::{wire_input_handlers, InputWiring};
