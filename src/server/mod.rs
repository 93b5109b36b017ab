//! Quiz server module.
//!
//! Hosts many participants over WebSocket, one session per connection.

mod server;
mod state;

pub use server::serve;
pub use state::{ParticipantStatus, ServerState};
