//! Web layer for the station lottery.
//!
//! Serves the draw form, the JSON endpoints it calls while the user fills
//! it in, and the draw itself.

mod dto;
mod routes;
mod state;
pub mod templates;

pub use dto::*;
pub use routes::create_router;
pub use state::AppState;
pub use templates::*;
