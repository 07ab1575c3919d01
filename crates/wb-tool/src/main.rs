//! Pointer tool replay entry point

use std::process::ExitCode;

use wb_tool::{Replay, ReplayScript};

fn main() -> ExitCode {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wb_tool=debug,wb_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let Some(path) = std::env::args().nth(1) else {
        eprintln!("usage: wb-replay <script.ron>");
        return ExitCode::FAILURE;
    };

    let script = match ReplayScript::load(&path) {
        Ok(script) => script,
        Err(e) => {
            tracing::error!("Failed to load {}: {}", path, e);
            return ExitCode::FAILURE;
        }
    };

    tracing::info!("Replaying {}", path);
    let replay = Replay::run(script);

    for entity in replay.doc.scene.entities() {
        tracing::info!(
            "{} [{}]: position={:?} angle={:.1} selected={}",
            entity.name,
            entity
                .derived_category()
                .map_or("uncategorized", |category| category.display_name()),
            entity.position,
            entity.angle.to_degrees(),
            entity.is_selected()
        );
    }
    tracing::info!("Undo history: {} edits", replay.doc.history().len());
    if !replay.doc.status_text().is_empty() {
        tracing::info!("Status: {}", replay.doc.status_text());
    }

    ExitCode::SUCCESS
}
