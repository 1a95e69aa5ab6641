//! `icosphere`: build, check and size subdivided icosahedra.
//!
//! # Commands
//!
//! - `icosphere generate --levels 3 --output sphere.obj` - write the mesh
//! - `icosphere report --levels 3 --tolerance 1e-9` - check the sphere
//!   invariants, exiting non-zero if any fail
//! - `icosphere buffers --levels 3 --shading smooth` - print buffer sizes and
//!   attribute slots
//!
//! Logging goes to stderr. `RUST_LOG` sets the filter; each `-v` raises the
//! default level one step from `warn`.

mod commands;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use mesh::buffers::ShadingMode;
use mesh::subdivide::SubdivisionMethod;

/// Icosphere generator
///
/// Subdivides the 20-face icosahedron onto a sphere.
#[derive(Debug, Parser)]
#[command(name = "icosphere")]
#[command(about = "Generate and inspect subdivided icospheres", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Raise log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Write the refined mesh as OBJ or STL, chosen by extension
    Generate {
        #[command(flatten)]
        sphere: SphereArgs,

        /// Where midpoints go
        #[arg(long, value_enum, default_value_t = MethodArg::Spherical)]
        method: MethodArg,

        /// Output file (.obj or .stl)
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },

    /// Print the subdivision summary and the sphere report
    Report {
        #[command(flatten)]
        sphere: SphereArgs,

        /// Allowed deviation of a vertex from the radius
        #[arg(long, default_value_t = 1e-9)]
        tolerance: f64,
    },

    /// Print render buffer sizes and attribute slots
    Buffers {
        #[command(flatten)]
        sphere: SphereArgs,

        /// Normal layout
        #[arg(long, value_enum, default_value_t = ShadingArg::Flat)]
        shading: ShadingArg,
    },
}

/// Size of the sphere to build.
#[derive(Debug, Clone, Copy, Args)]
struct SphereArgs {
    /// Subdivision passes over the icosahedron
    #[arg(short, long, default_value_t = 2, value_parser = clap::value_parser!(u32).range(0..=8))]
    levels: u32,

    /// Sphere radius
    #[arg(short, long, default_value_t = 1.0)]
    radius: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum MethodArg {
    Spherical,
    Midpoint,
}

impl From<MethodArg> for SubdivisionMethod {
    fn from(arg: MethodArg) -> Self {
        match arg {
            MethodArg::Spherical => Self::Spherical,
            MethodArg::Midpoint => Self::Midpoint,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ShadingArg {
    Flat,
    Smooth,
}

impl From<ShadingArg> for ShadingMode {
    fn from(arg: ShadingArg) -> Self {
        match arg {
            ShadingArg::Flat => Self::Flat,
            ShadingArg::Smooth => Self::Smooth,
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .target(env_logger::Target::Stderr)
        .init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut out = std::io::stdout().lock();
    match cli.command {
        Commands::Generate {
            sphere,
            method,
            output,
        } => commands::generate(sphere, method.into(), &output, &mut out)?,
        Commands::Report { sphere, tolerance } => {
            if !commands::report(sphere, tolerance, &mut out)? {
                return Ok(ExitCode::FAILURE);
            }
        }
        Commands::Buffers { sphere, shading } => {
            commands::buffers(sphere, shading.into(), &mut out)?;
        }
    }

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parses_generate() {
        let cli = Cli::try_parse_from([
            "icosphere",
            "generate",
            "--levels",
            "3",
            "--radius",
            "2.5",
            "--method",
            "midpoint",
            "-o",
            "out.stl",
        ])
        .unwrap();

        let Commands::Generate {
            sphere,
            method,
            output,
        } = cli.command
        else {
            panic!("expected generate");
        };
        assert_eq!(sphere.levels, 3);
        assert!((sphere.radius - 2.5).abs() < f64::EPSILON);
        assert_eq!(method, MethodArg::Midpoint);
        assert_eq!(output, PathBuf::from("out.stl"));
    }

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["icosphere", "buffers"]).unwrap();
        assert_eq!(cli.verbose, 0);
        let Commands::Buffers { sphere, shading } = cli.command else {
            panic!("expected buffers");
        };
        assert_eq!(sphere.levels, 2);
        assert_eq!(shading, ShadingArg::Flat);
    }

    #[test]
    fn levels_are_bounded() {
        assert!(Cli::try_parse_from(["icosphere", "report", "--levels", "8"]).is_ok());
        assert!(Cli::try_parse_from(["icosphere", "report", "--levels", "9"]).is_err());
    }

    #[test]
    fn verbosity_counts() {
        let cli = Cli::try_parse_from(["icosphere", "-vv", "report"]).unwrap();
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
