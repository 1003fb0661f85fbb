//! # FatigueLife CLI
//!
//! Command-line front end for `fatigue_core`: analyze a PSD export, inspect
//! S-N curves, and manage `.flp` project files.
//!
//! Errors are printed as text plus the structured `CalcError` JSON, with
//! exit code 1.

mod cli;
mod report;

use std::process::ExitCode;

use anyhow::{bail, Context};
use clap::Parser;
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use uuid::Uuid;

use fatigue_core::calculations::{calculate_fatigue, FatigueCaseResult, FatigueInput};
use fatigue_core::equations::generate_equations_markdown;
use fatigue_core::file_io::{load_project, load_psd_file, save_project};
use fatigue_core::project::Project;
use fatigue_core::units::ExposureTime;
use fatigue_core::CalcError;

use cli::{AddArgs, AnalyzeArgs, Cli, Command, InitArgs, RunArgs, SnCurveArgs};

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "debug"
    } else {
        "warn,fatigue_core=info"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            if let Some(calc) = e.chain().find_map(|c| c.downcast_ref::<CalcError>()) {
                if let Ok(json) = serde_json::to_string_pretty(calc) {
                    eprintln!("{}", json);
                }
            }
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Analyze(args) => analyze(args),
        Command::SnCurve(args) => sn_curve(args),
        Command::Run(args) => run_project(args),
        Command::Init(args) => init_project(args),
        Command::Add(args) => add_case(args),
        Command::Equations => {
            print!("{}", generate_equations_markdown());
            Ok(())
        }
    }
}

fn analyze(args: AnalyzeArgs) -> anyhow::Result<()> {
    let import = load_psd_file(&args.psd).with_context(|| format!("loading PSD {}", args.psd.display()))?;
    let source = args.sn.to_source()?;
    let sn = source.resolve().context("resolving S-N curve")?;
    let exposure = args.exposure.exposure();

    debug!(m = sn.m, k = sn.k, seconds = exposure.seconds(), "running analysis");
    let result = calculate_fatigue(&import.samples, &sn, exposure.seconds())?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        let name = args.psd.display().to_string();
        print!(
            "{}",
            report::analyze_report(&name, &import, source.method_name(), &sn, &exposure, &result)
        );
    }
    Ok(())
}

#[derive(Serialize)]
struct CurveOutput {
    m: f64,
    k: f64,
    points: Vec<fatigue_core::materials::SnDataPoint>,
}

fn sn_curve(args: SnCurveArgs) -> anyhow::Result<()> {
    let source = args.sn.to_source()?;
    let sn = source.resolve().context("resolving S-N curve")?;

    if args.json {
        let output = CurveOutput {
            m: sn.m,
            k: sn.k,
            points: sn.curve_points(args.count).collect(),
        };
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        print!("{}", report::sn_summary(source.method_name(), &sn));
        println!();
        print!("{}", report::curve_table(sn.curve_points(args.count)));
    }
    Ok(())
}

#[derive(Serialize)]
struct CaseOutput {
    id: Uuid,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<FatigueCaseResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<CalcError>,
}

fn run_project(args: RunArgs) -> anyhow::Result<()> {
    let project = load_project(&args.project)
        .with_context(|| format!("loading project {}", args.project.display()))?;
    let evaluated = project.evaluate_all();
    let failed = evaluated.iter().filter(|(_, r)| r.is_err()).count();

    if args.json {
        let output: Vec<CaseOutput> = evaluated
            .into_iter()
            .map(|(id, r)| match r {
                Ok(case) => CaseOutput {
                    id,
                    result: Some(case),
                    error: None,
                },
                Err(e) => CaseOutput {
                    id,
                    result: None,
                    error: Some(e),
                },
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!(
            "Project {} ({}), engineer {}: {} case(s)",
            project.meta.job_id,
            project.meta.client,
            project.meta.engineer,
            project.item_count()
        );
        for (id, r) in &evaluated {
            println!();
            match r {
                Ok(case) => {
                    print!("{}", report::case_report(case));
                    if args.curves {
                        println!();
                        print!(
                            "{}",
                            report::curve_table(case.sn_curve.curve_points(project.settings.curve_points))
                        );
                    }
                }
                Err(e) => {
                    let label = project.get_item(id).map(|i| i.label()).unwrap_or("?");
                    println!("✗ {}: {} [{}]", label, e, e.error_code());
                }
            }
        }
    }

    if failed > 0 {
        bail!("{} of {} case(s) failed", failed, project.item_count());
    }
    Ok(())
}

fn init_project(args: InitArgs) -> anyhow::Result<()> {
    if args.project.exists() && !args.force {
        bail!("{} already exists (use --force to overwrite)", args.project.display());
    }
    let project = Project::new(args.engineer, args.job, args.client);
    save_project(&project, &args.project)?;
    info!(path = %args.project.display(), "project created");
    println!("Created {}", args.project.display());
    Ok(())
}

fn add_case(args: AddArgs) -> anyhow::Result<()> {
    let mut project = load_project(&args.project)
        .with_context(|| format!("loading project {}", args.project.display()))?;
    let import = load_psd_file(&args.psd).with_context(|| format!("loading PSD {}", args.psd.display()))?;
    let source = args.sn.to_source()?;

    let exposure = match args.exposure {
        Some(value) => ExposureTime::new(value, args.unit.into()),
        None => project.settings.default_exposure,
    };
    let input = FatigueInput::new(args.label, import.samples, source).with_exposure(exposure);
    input.validate()?;

    let id = project.add_item(input);
    save_project(&project, &args.project)?;
    println!("Added case {} to {}", id, args.project.display());
    Ok(())
}
