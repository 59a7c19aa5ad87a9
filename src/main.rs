//! Recursive tree generator, drawing to a PNG preview and a DXF for laser cutting
//!
//! A turtle draws a slotted base stand, then a trunk, then forks repeatedly: at the end of each
//! arm it either forks again or finishes with an ornament, chosen at random. Every line and arc is
//! drawn to both outputs as it's produced, with the DXF scaled to millimetres.
//!
//! The main entrypoint is actually in [`cli::run`] ('src/cli.rs'), which parses the arguments --
//! that in turn calls the `run` method on [`AppSettings`].

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process::exit;

use eyre::WrapErr;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod cli;
mod config;
mod cutfile;
mod float;
mod geometry;
mod img;
mod point;
mod render;
mod stand;
mod tree;
mod turtle;

use config::TreeConfig;
use cutfile::DxfDrawing;
use float::Float;
use geometry::TreeGeometry;
use img::PreviewCanvas;
use point::Point;
use render::{DualRenderer, EmitCounts};
use stand::{StandDims, StandType};
use tree::{RandomChooser, TreeGenerator};
use turtle::Turtle;

struct AppSettings {
    stand: StandType,
    /// JSON file to read the tree config from, if not using the defaults
    config: Option<PathBuf>,
    dxf_path: PathBuf,
    preview_path: PathBuf,
    seed: Option<u64>,
    max_depth: Option<NonZeroUsize>,
}

fn main() {
    init_logging();

    // Internally calls `AppSettings::run`
    cli::run()
}

/// Sets up `tracing` output on stderr, at `info` unless overridden by `RUST_LOG`
fn init_logging() {
    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

impl AppSettings {
    /// Runs the app until completion, using the settings filled by the `cli` module
    fn run(&self) {
        if let Err(e) = self.generate().map(drop) {
            eprintln!("{:?}", e.wrap_err("failed to generate tree"));
            exit(1)
        }
    }

    fn load_config(&self) -> eyre::Result<TreeConfig> {
        match &self.config {
            Some(file) => TreeConfig::from_file(file),
            None => Ok(TreeConfig::default()),
        }
    }

    /// Draws one tree to both output files, returning what was emitted
    fn generate(&self) -> eyre::Result<EmitCounts> {
        let config = self.load_config()?;
        let geometry = TreeGeometry::new(&config).wrap_err("invalid tree geometry")?;
        info!(
            mitre = geometry.mitre,
            stand_unit = config.stand_unit(),
            slot_unit = config.slot_unit(),
            "tree geometry"
        );

        let renderer = DualRenderer::new(
            PreviewCanvas::new(config.canvas),
            DxfDrawing::default(),
            config.fabrication_scale,
        );
        let turtle = Turtle::new(renderer, config.start);

        let rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut generator = TreeGenerator::new(turtle, RandomChooser::new(rng), geometry)
            .with_max_depth(self.max_depth);

        info!("making a tree with stand type {}", self.stand);
        let tree = generator.start(self.stand, StandDims::from_config(&config));
        debug_assert_eq!(tree.ornaments(), generator.ornament_count());
        info!(
            forks = tree.forks(),
            depth = tree.depth(),
            ornaments = tree.ornaments(),
            "tree complete"
        );

        let renderer = generator.into_turtle().into_renderer();
        let counts = renderer.counts();
        info!(
            lines = counts.segments,
            arcs = counts.arcs,
            "emitted primitives, {:.1} mm to cut",
            counts.cut_length
        );

        let (preview, fabrication) = renderer.into_sinks();

        fabrication.save(&self.dxf_path)?;
        info!("a DXF file was written to {}", self.dxf_path.display());

        preview.save(&self.preview_path)?;
        info!("a preview was written to {}", self.preview_path.display());

        Ok(counts)
    }
}
