use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of `POST /spin`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct SpinResponse {
    pub total_label: String,
    pub total_value: f64,
    pub reels: [f64; 3], // display order, sums to total_value
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".into(),
            timestamp: Utc::now(),
        }
    }
}

/// Replayed spin as printed by the CLI.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ReplayReport {
    pub server_seed_hash: String,
    pub client_seed: String,
    pub nonce: u64,
    pub spin: SpinResponse,
}

/// One row of a simulation CSV export.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SpinLogEntry {
    pub n: u64,
    pub total_label: String,
    pub total_value: f64,
    pub reel_1: f64,
    pub reel_2: f64,
    pub reel_3: f64,
}

impl SpinLogEntry {
    pub fn new(n: u64, spin: &SpinResponse) -> Self {
        let [reel_1, reel_2, reel_3] = spin.reels;
        Self {
            n,
            total_label: spin.total_label.clone(),
            total_value: spin.total_value,
            reel_1,
            reel_2,
            reel_3,
        }
    }
}
