//! BookVoyage server internals, shared by the binary and its tests.

pub mod routes;
pub mod sample;
pub mod state;
pub mod validate;

pub use routes::build_router;
pub use state::AppState;
