//! Command-line arguments of the `stokes` binary.

use std::path::PathBuf;

use stokes_core::{Result, StokesError};

use crate::inputs::FormulaSet;

pub const USAGE: &str = r#"Stokes' theorem visualizer

USAGE:
    stokes [OPTIONS]

OPTIONS:
    --config <file.json>    Load sampling rates, ranges and camera settings
    --curve <x> <y> <z>     Surface components in u and v
    --field <x> <y> <z>     Field components in x, y and z
    --scene <out.json>      Write the drawn scene as JSON
    --help                  Show this help message

EXAMPLES:
    # Default torus in the field (x, y + z, z)
    stokes

    # Paraboloid cap in a rotation field
    stokes --curve "u" "v" "1 - u^2 - v^2" --field "-y" "x" "0"

    # Export the scene for a viewer
    stokes --config rates.json --scene scene.json
"#;

/// Parsed invocation.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Help,
    Run(RunOptions),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunOptions {
    pub config: Option<PathBuf>,
    pub formulas: FormulaSet,
    pub scene: Option<PathBuf>,
}

/// Parse arguments, excluding the program name.
pub fn parse_args<I, S>(args: I) -> Result<Command>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut args = args.into_iter().map(Into::into);
    let mut options = RunOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--help" | "-h" => return Ok(Command::Help),
            "--config" => options.config = Some(PathBuf::from(value(&mut args, "--config")?)),
            "--scene" => options.scene = Some(PathBuf::from(value(&mut args, "--scene")?)),
            "--curve" => options.formulas.curve = triple(&mut args, "--curve")?,
            "--field" => options.formulas.field = triple(&mut args, "--field")?,
            other => {
                return Err(StokesError::InvalidOperation(format!("unknown argument `{other}`")));
            }
        }
    }
    Ok(Command::Run(options))
}

fn value(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<String> {
    args.next()
        .ok_or_else(|| StokesError::InvalidOperation(format!("{flag} requires a value")))
}

fn triple(args: &mut impl Iterator<Item = String>, flag: &str) -> Result<[String; 3]> {
    let missing = || StokesError::InvalidOperation(format!("{flag} requires three formulas"));
    let x = args.next().ok_or_else(missing)?;
    let y = args.next().ok_or_else(missing)?;
    let z = args.next().ok_or_else(missing)?;
    Ok([x, y, z])
}
