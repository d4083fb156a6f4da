pub mod dto;
pub mod handlers;
pub mod services;

use crate::state::AppState;
use axum::Router;

pub use dto::{ActivityLevel, BiometricInput, CalculateBmrRequest, EnergyEstimate, Gender};
pub use services::{calculate, compute_energy, ValidationError};

pub fn router() -> Router<AppState> {
    handlers::energy_routes()
}
