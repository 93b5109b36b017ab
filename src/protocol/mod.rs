//! Wire protocol for the multi-participant server.

mod messages;

pub use messages::{ClientMessage, DEFAULT_PORT, OptionView, ReviewItem, ServerMessage};
