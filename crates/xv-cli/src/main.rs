//! Exploded-view command-line driver
//!
//! Loads a scene description, extracts its parts and logs every part's
//! position for one factor or a sweep from rest to full explosion.

mod args;
mod error;

use std::process::ExitCode;

use xv_core::{ExplodeConfig, ExplodedView, SceneDescription};

use args::{Args, USAGE};
use error::CliError;

fn main() -> ExitCode {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "xv_core=debug,xv_cli=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = match Args::parse(std::env::args().skip(1)) {
        Ok(args) => args,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("{USAGE}");
            return ExitCode::from(2);
        }
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), CliError> {
    let config = match &args.config {
        Some(path) => ExplodeConfig::load(path)?,
        None if args.catalog => ExplodeConfig::catalog(),
        None => ExplodeConfig::default(),
    };

    let description = SceneDescription::load(&args.scene)?;
    let mut scene = description.build()?;
    tracing::info!(
        "Loaded '{}' from {}: {} parts",
        scene.name,
        args.scene.display(),
        scene.part_count()
    );

    let mut view = ExplodedView::new(config);
    let table = view.load(args.scene.display().to_string(), &mut scene);

    for factor in args.factors() {
        view.set_factor(factor);
        view.update(&mut scene);
        tracing::info!("{}", view.percent_label());

        for record in table.iter() {
            let (Some(node), Some(position)) =
                (scene.node(record.handle), scene.position(record.handle))
            else {
                continue;
            };
            tracing::info!(
                "  {:<20} {:>8.3} {:>8.3} {:>8.3}{}",
                node.name,
                position.x,
                position.y,
                position.z,
                if record.randomized { "  (random direction)" } else { "" }
            );
        }
    }
    Ok(())
}
