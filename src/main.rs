use anyhow::{Context, Result};
use clap::Parser;
use states_lived_map::config::Config;
use states_lived_map::map::MapRenderer;
use states_lived_map::{data, join, preview, svg};
use std::fs;

fn main() -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive("info".parse().expect("invalid filter"))
                .from_env_lossy(),
        )
        .try_init();

    let config = Config::parse();
    run(&config)
}

fn run(config: &Config) -> Result<()> {
    // All three datasets must load before anything is drawn
    let mut datasets = data::load_all(&config.data_dir)
        .with_context(|| format!("loading datasets from {}", config.data_dir.display()))?;

    join::join_visits(&mut datasets.states, &datasets.visits, config.join)
        .context("joining visit table into state boundaries")?;

    let renderer = MapRenderer::default();
    let scene = renderer.render(&datasets.states, &datasets.cities);

    if let Some(parent) = config.output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }
    fs::write(&config.output, svg::document(&scene))
        .with_context(|| format!("writing {}", config.output.display()))?;
    tracing::info!(
        path = %config.output.display(),
        states = scene.states.len(),
        cities = scene.cities.len(),
        "map written"
    );

    if config.preview {
        if let Err(e) = preview::print(&scene, config.preview_width) {
            tracing::warn!("terminal preview failed: {e}");
        }
    }

    Ok(())
}
