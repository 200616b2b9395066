mod health;
mod router;
mod webhook;

pub use router::{router, AppState};
