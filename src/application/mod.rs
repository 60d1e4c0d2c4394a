// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - Boundary between transports and the services
// - Wires repositories, services and the event bus
// - Translates errors into transport-neutral responses

pub mod error_handling;
pub mod state;

pub use error_handling::{ErrorResponse, ErrorType, ToErrorResponse};
pub use state::AppState;
