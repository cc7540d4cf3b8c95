mod invocations;
mod ping;

pub use invocations::{ErrorResponse, invocations_handler, status_for};
pub use ping::ping_handler;
