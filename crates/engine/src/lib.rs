//! CivicSim Engine library.
//!
//! Runs the civic simulation and serves the dialogue oracle it talks to.
//!
//! ## Structure
//!
//! - `world/` - The fixed city: obstacles and the issue roster
//! - `use_cases/` - Movement, interaction, progress and oracle orchestration
//! - `simulation/` - The tick loop composing the use cases
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `api/` - HTTP entry points of the oracle proxy
//! - `app` - Oracle proxy composition

pub mod api;
pub mod app;
pub mod infrastructure;
pub mod simulation;
pub mod use_cases;
pub mod world;

pub use app::App;
pub use simulation::{Panel, Simulation};
pub use world::CityWorld;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Load `.env.local` then `.env` from the repository root.
pub fn load_dotenv_from_repo_root() {
    let repo_root = std::path::Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..");

    // Prefer local overrides.
    for filename in [".env.local", ".env"] {
        let path = repo_root.join(filename);
        if path.exists() {
            let _ = dotenvy::from_path(path);
        }
    }
}

/// Install the tracing subscriber used by both binaries.
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "civicsim_engine=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
