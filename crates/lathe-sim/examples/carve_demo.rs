//! Spin a stock and sweep a tool along it, printing what was removed.
//!
//! ```bash
//! RUST_LOG=debug cargo run -p lathe-sim --example carve_demo [config.toml]
//! ```

use std::process;

use lathe_core::LatheConfig;
use lathe_math::DVec3;
use lathe_sim::{prepare_mesh, Lathe, ToolInput};

fn run() -> lathe_core::Result<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => LatheConfig::load(path)?,
        None => LatheConfig {
            tool_width: 0.05,
            ..Default::default()
        },
    };
    let length = config.length;
    let radius = config.base_radius;

    let mut lathe = Lathe::new(config)?;
    lathe.initialize()?;

    let frames = 600;
    let dt = 1.0 / 60.0;
    let mut refreshes = 0;
    for frame in 0..frames {
        let t = frame as f64 / frames as f64;
        // Plunge deeper towards the middle of the stock.
        let depth = radius * (0.4 + 0.4 * (t * std::f64::consts::PI).cos().abs());
        let input = ToolInput {
            tip: Some(DVec3::new(t * length, 0.0, depth)),
            grab_strength: Some(1.0 - 0.5 * t),
        };
        if lathe.tick(dt, &input)?.refreshed {
            refreshes += 1;
        }
    }

    let profile = lathe.profile();
    println!(
        "{} of {} cells carved, thinnest radius {:.4}, {} mesh refreshes",
        profile.carved_cell_count(),
        profile.radial_segments() * (profile.axial_segments() + 1),
        profile.min_radius(),
        refreshes
    );

    if let Some(mesh) = lathe.mesh() {
        let render = prepare_mesh(mesh.mesh());
        println!(
            "render buffers: {} vertex bytes, {} index bytes, bounds {:?}",
            render.vertex_bytes().len(),
            render.index_bytes().len(),
            mesh.bounds()
        );
    }
    Ok(())
}

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}
