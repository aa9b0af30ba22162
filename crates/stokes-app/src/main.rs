//! Stokes' theorem visualizer CLI
//!
//! Compiles a surface and a field, prints the flux of the curl through the
//! surface next to the circulation around its boundary, and optionally writes
//! the drawn scene as JSON.
//!
//! # Usage
//!
//! ```bash
//! stokes --curve "u" "v" "1 - u^2 - v^2" --field "-y" "x" "0"
//! stokes --config rates.json --scene scene.json
//! ```

use std::process;

use log::info;
use stokes_app::cli::{self, Command, RunOptions};
use stokes_app::{LatexEquations, StokesController};
use stokes_core::{StokesConfig, Tolerance};
use stokes_render::Scene;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let command = match cli::parse_args(std::env::args().skip(1)) {
        Ok(command) => command,
        Err(e) => {
            eprintln!("Error: {e}\n");
            eprintln!("{}", cli::USAGE);
            process::exit(1);
        }
    };

    match command {
        Command::Help => {
            eprintln!("{}", cli::USAGE);
        }
        Command::Run(options) => {
            if let Err(e) = run(options) {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        }
    }
}

fn run(options: RunOptions) -> stokes_core::Result<()> {
    let config = match &options.config {
        Some(path) => StokesConfig::load(path)?,
        None => StokesConfig::default(),
    };

    let mut controller = StokesController::with_formulas(config, options.formulas)?;
    let mut equations = LatexEquations::new();
    let result = controller.refresh(&mut equations);

    let tolerance = Tolerance::for_rate(controller.config().integral_rate);
    println!("Surface integral:  {}", result.surface_integral);
    println!("Boundary integral: {}", result.boundary_integral);
    println!(
        "Difference:        {} ({})",
        result.difference(),
        if result.agrees(tolerance) { "agree" } else { "differ" }
    );
    println!();
    println!("{equations}");

    if let Some(path) = &options.scene {
        let mut scene = Scene::new();
        controller.draw(&mut scene);
        scene.save_json(path)?;
        info!("Scene: {} drawables, {} triangles", scene.len(), scene.total_triangles());
        println!("\nScene written to {}", path.display());
    }
    Ok(())
}
