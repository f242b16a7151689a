use axum::{extract::State, Json};
use tracing::debug;

use roleta_core::{spin_once, EngineParams, RngSource};
use roleta_shared::{HealthResponse, SpinResponse};

use crate::AppState;

/// Draws from a fresh thread RNG; nothing is shared between requests but the params.
pub fn spin_response(params: &EngineParams) -> SpinResponse {
    let mut rng = RngSource::thread();
    let outcome = spin_once(&mut rng, params);
    debug!(
        label = %outcome.total_label,
        value = outcome.total_value,
        reels = ?outcome.reels,
        "spin"
    );
    SpinResponse {
        total_label: outcome.total_label,
        total_value: outcome.total_value,
        reels: outcome.reels,
    }
}

// Any request body is ignored.
pub async fn route_spin(State(state): State<AppState>) -> Json<SpinResponse> {
    Json(spin_response(&state.params))
}

pub async fn route_health() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
