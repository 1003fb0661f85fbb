//! Command-line parsing for the `fatigue` binary.
//!
//! Argument parsing lives here; dispatch is in `main.rs` and text output in
//! `report.rs`.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use clap::{Args, Parser, Subcommand, ValueEnum};

use fatigue_core::file_io::load_sn_table_file;
use fatigue_core::materials::{lookup_material, SnCurveSource, DEFAULT_CURVE_POINTS, MATERIAL_KEYS};
use fatigue_core::units::{ExposureTime, TimeUnit};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "fatigue",
    version,
    about = "Spectral fatigue life from a stress PSD (narrow-band + Wirsching-Light)"
)]
pub struct Cli {
    /// Enable debug logging (RUST_LOG overrides).
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute damage and life for a PSD export.
    Analyze(AnalyzeArgs),
    /// Print the Basquin parameters and a sampled S-N curve.
    SnCurve(SnCurveArgs),
    /// Evaluate every case stored in a project file.
    Run(RunArgs),
    /// Create an empty project file.
    Init(InitArgs),
    /// Add a fatigue case to a project file.
    Add(AddArgs),
    /// Print the equation reference.
    Equations,
}

/// S-N curve selection shared by several commands.
///
/// Exactly one of `--m/--k`, `--rm`, `--material`, `--points` or
/// `--sn-table` must be given.
#[derive(Debug, Args, Clone)]
pub struct SnArgs {
    /// Basquin exponent m (with --k).
    #[arg(long, requires = "k")]
    pub m: Option<f64>,

    /// Basquin constant K (with --m).
    #[arg(long, requires = "m")]
    pub k: Option<f64>,

    /// Ultimate strength Rm in MPa (material estimate).
    #[arg(long)]
    pub rm: Option<f64>,

    /// Endurance limit Se in MPa at 10^6 cycles (default 0.5·Rm).
    #[arg(long, requires = "rm")]
    pub se: Option<f64>,

    /// Material preset (e.g. structural-steel).
    #[arg(long)]
    pub material: Option<String>,

    /// Two curve points: N1 S1 N2 S2.
    #[arg(long, num_args = 4, value_names = ["N1", "S1", "N2", "S2"], allow_negative_numbers = true)]
    pub points: Option<Vec<f64>>,

    /// S-N test table (cycles, stress per line) for a regression fit.
    #[arg(long, value_name = "FILE")]
    pub sn_table: Option<PathBuf>,
}

impl SnArgs {
    /// Turn the flags into a curve source.
    pub fn to_source(&self) -> anyhow::Result<SnCurveSource> {
        let given = [
            self.m.is_some(),
            self.rm.is_some(),
            self.material.is_some(),
            self.points.is_some(),
            self.sn_table.is_some(),
        ]
        .iter()
        .filter(|g| **g)
        .count();
        if given != 1 {
            bail!("choose exactly one S-N curve: --m/--k, --rm [--se], --material, --points or --sn-table");
        }

        if let (Some(m), Some(k)) = (self.m, self.k) {
            return Ok(SnCurveSource::Direct { m, k });
        }
        if let Some(rm) = self.rm {
            return Ok(SnCurveSource::Material {
                ultimate_strength: rm,
                endurance_limit: self.se,
            });
        }
        if let Some(key) = &self.material {
            let material = lookup_material(key).with_context(|| {
                format!("unknown material '{}' (available: {})", key, MATERIAL_KEYS.join(", "))
            })?;
            return Ok(material.sn_source());
        }
        if let Some(p) = &self.points {
            if let [n1, s1, n2, s2] = p[..] {
                return Ok(SnCurveSource::TwoPoint { n1, s1, n2, s2 });
            }
            bail!("--points takes exactly four values");
        }
        if let Some(path) = &self.sn_table {
            return load_table(path);
        }
        bail!("--m requires --k")
    }
}

fn load_table(path: &Path) -> anyhow::Result<SnCurveSource> {
    let points = load_sn_table_file(path)
        .with_context(|| format!("reading S-N table {}", path.display()))?;
    Ok(SnCurveSource::Regression { points })
}

/// Exposure time units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum UnitArg {
    Seconds,
    Minutes,
    Hours,
}

impl From<UnitArg> for TimeUnit {
    fn from(unit: UnitArg) -> Self {
        match unit {
            UnitArg::Seconds => TimeUnit::Seconds,
            UnitArg::Minutes => TimeUnit::Minutes,
            UnitArg::Hours => TimeUnit::Hours,
        }
    }
}

/// Exposure duration flags.
#[derive(Debug, Args, Clone)]
pub struct ExposureArgs {
    /// Exposure duration.
    #[arg(long, default_value_t = 1.0)]
    pub exposure: f64,

    /// Unit of --exposure.
    #[arg(long, value_enum, default_value_t = UnitArg::Hours)]
    pub unit: UnitArg,
}

impl ExposureArgs {
    pub fn exposure(&self) -> ExposureTime {
        ExposureTime::new(self.exposure, self.unit.into())
    }
}

/// Options for `fatigue analyze`.
#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// PSD text export (frequency, stress PSD columns).
    #[arg(long, value_name = "FILE")]
    pub psd: PathBuf,

    #[command(flatten)]
    pub exposure: ExposureArgs,

    #[command(flatten)]
    pub sn: SnArgs,

    /// Emit the result as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Options for `fatigue sn-curve`.
#[derive(Debug, Args)]
pub struct SnCurveArgs {
    #[command(flatten)]
    pub sn: SnArgs,

    /// Number of sampled points between 10^2 and 10^8 cycles.
    #[arg(long, default_value_t = DEFAULT_CURVE_POINTS)]
    pub count: usize,

    /// Emit parameters and points as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Options for `fatigue run`.
#[derive(Debug, Args)]
pub struct RunArgs {
    /// Project file (.flp).
    pub project: PathBuf,

    /// Also print each case's sampled S-N curve.
    #[arg(long)]
    pub curves: bool,

    /// Emit all case results as JSON.
    #[arg(long)]
    pub json: bool,
}

/// Options for `fatigue init`.
#[derive(Debug, Args)]
pub struct InitArgs {
    /// Project file to create (.flp).
    pub project: PathBuf,

    #[arg(long, default_value = "")]
    pub engineer: String,

    #[arg(long, default_value = "")]
    pub job: String,

    #[arg(long, default_value = "")]
    pub client: String,

    /// Overwrite an existing file.
    #[arg(long)]
    pub force: bool,
}

/// Options for `fatigue add`.
#[derive(Debug, Args)]
pub struct AddArgs {
    /// Project file (.flp).
    pub project: PathBuf,

    /// Case label.
    #[arg(long)]
    pub label: String,

    /// PSD text export to store in the case.
    #[arg(long, value_name = "FILE")]
    pub psd: PathBuf,

    /// Exposure duration (project default when omitted).
    #[arg(long)]
    pub exposure: Option<f64>,

    /// Unit of --exposure.
    #[arg(long, value_enum, default_value_t = UnitArg::Hours)]
    pub unit: UnitArg,

    #[command(flatten)]
    pub sn: SnArgs,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_analyze_material() {
        let cli = Cli::try_parse_from([
            "fatigue", "analyze", "--psd", "psd.txt", "--exposure", "30", "--unit", "minutes", "--rm", "460",
        ])
        .unwrap();
        let Command::Analyze(args) = cli.command else {
            panic!("expected analyze");
        };
        assert_eq!(args.exposure.exposure().seconds(), 1800.0);
        assert_eq!(
            args.sn.to_source().unwrap(),
            SnCurveSource::Material {
                ultimate_strength: 460.0,
                endurance_limit: None
            }
        );
    }

    #[test]
    fn test_parse_points() {
        let cli = Cli::try_parse_from([
            "fatigue", "sn-curve", "--points", "1000", "414", "1e6", "230", "--count", "5",
        ])
        .unwrap();
        let Command::SnCurve(args) = cli.command else {
            panic!("expected sn-curve");
        };
        assert_eq!(args.count, 5);
        assert_eq!(
            args.sn.to_source().unwrap(),
            SnCurveSource::TwoPoint {
                n1: 1000.0,
                s1: 414.0,
                n2: 1.0e6,
                s2: 230.0
            }
        );
    }

    #[test]
    fn test_sn_selection_must_be_unique() {
        let cli = Cli::try_parse_from(["fatigue", "sn-curve", "--m", "3", "--k", "1e12", "--rm", "400"]).unwrap();
        let Command::SnCurve(args) = cli.command else {
            panic!("expected sn-curve");
        };
        assert!(args.sn.to_source().is_err());

        let cli = Cli::try_parse_from(["fatigue", "sn-curve"]).unwrap();
        let Command::SnCurve(args) = cli.command else {
            panic!("expected sn-curve");
        };
        assert!(args.sn.to_source().is_err());

        // --m without --k is rejected by clap itself
        assert!(Cli::try_parse_from(["fatigue", "sn-curve", "--m", "3"]).is_err());
    }

    #[test]
    fn test_material_preset() {
        let cli = Cli::try_parse_from(["fatigue", "sn-curve", "--material", "structural-steel"]).unwrap();
        let Command::SnCurve(args) = cli.command else {
            panic!("expected sn-curve");
        };
        assert!(args.sn.to_source().unwrap().resolve().is_ok());

        let cli = Cli::try_parse_from(["fatigue", "sn-curve", "--material", "cheese"]).unwrap();
        let Command::SnCurve(args) = cli.command else {
            panic!("expected sn-curve");
        };
        assert!(args.sn.to_source().is_err());
    }

    #[test]
    fn test_verbose_is_global() {
        let cli = Cli::try_parse_from(["fatigue", "equations", "-v"]).unwrap();
        assert!(cli.verbose);
    }
}
