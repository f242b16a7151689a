use roleta_core::{spin_once, EngineParams, ProvablyFairSource};

fn main() {
    // Example end-to-end spin
    let server_seed = "example-server-seed";
    let client_seed = "example-client-seed";
    let nonce = 1u64;
    let mut rng = ProvablyFairSource::new(server_seed, client_seed, nonce);
    let params = EngineParams::standard();
    let outcome = spin_once(&mut rng, &params);
    println!(
        "server_seed_hash={} prize={} reels={:?}",
        rng.server_seed_hash_hex(),
        outcome.total_label,
        outcome.reels
    );
}
