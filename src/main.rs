//! MediTrack - Main CLI Entry Point

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use meditrack::{
    artifacts::{CachedArtifactStore, FileArtifactStore},
    cli::{Args, Commands, Config, ScreenArgs, Verbosity},
    display::DisplayManager,
    doctor::Doctor,
    form::{FormOutcome, FormPrompter},
    telemetry::{TelemetryCollector, TelemetryDisplay},
    DiseaseTarget, RiskEvaluator,
};

/// Effective verbosity: explicit flags win over the config default
fn resolve_verbosity(args: &Args, config: &Config) -> Verbosity {
    if args.quiet || args.verbose > 0 {
        args.verbosity()
    } else {
        Verbosity::from_name(&config.display.default_verbosity).unwrap_or(Verbosity::Normal)
    }
}

fn init_logging(verbosity: Verbosity) {
    let _ = env_logger::Builder::new()
        .filter_level(verbosity.log_level())
        .format_timestamp_millis()
        .try_init();
}

fn file_store(args: &Args, config: &Config) -> FileArtifactStore {
    FileArtifactStore::new(config.artifact_layout(args.artifacts_dir.as_deref()))
}

/// Evaluator over the configured artifacts directory
fn build_evaluator(args: &Args, config: &Config, telemetry: &TelemetryCollector) -> RiskEvaluator {
    let store = file_store(args, config);
    let evaluator = if config.artifacts.cache && !args.no_cache {
        RiskEvaluator::new(CachedArtifactStore::new(store))
    } else {
        RiskEvaluator::new(store)
    };
    evaluator.with_telemetry(telemetry.clone())
}

/// Interactive form loop
async fn run_form(args: &Args, config: &Config, verbosity: Verbosity) -> Result<()> {
    let telemetry = TelemetryCollector::new();
    let evaluator = build_evaluator(args, config, &telemetry);
    let display = DisplayManager::new(config.display.show_vitals, verbosity.show_progress());

    display.show_banner(env!("CARGO_PKG_VERSION"));
    display.show_info("Enter patient information. Press Enter to keep a default, Ctrl-D to quit.");

    let mut prompter = FormPrompter::with_history(config.history_file())?;

    loop {
        let Some(form) = prompter.read_form()? else {
            break;
        };

        if let Ok(observation) = form.observation() {
            display.show_vitals(&observation);
        }

        let spinner = if form.certified { display.start_analysis() } else { None };
        let outcome = form.submit_async(&evaluator).await;
        if let Some(pb) = spinner {
            pb.finish_and_clear();
        }
        display.show_outcome(&outcome);

        match prompter.confirm("Screen another patient?")? {
            Some(true) => println!(),
            _ => break,
        }
    }

    prompter.save_history()?;
    TelemetryDisplay::new(telemetry, verbosity).display_summary();
    Ok(())
}

/// One non-interactive screening; exits non-zero unless it completes
async fn run_screen(args: &Args, config: &Config, screen: &ScreenArgs, verbosity: Verbosity) -> Result<()> {
    let telemetry = TelemetryCollector::new();
    let evaluator = build_evaluator(args, config, &telemetry);
    let display = DisplayManager::new(
        config.display.show_vitals && !screen.json,
        verbosity.show_progress() && !screen.json,
    );

    let form = screen.to_form();
    if let Ok(observation) = form.observation() {
        display.show_vitals(&observation);
    }

    let spinner = if form.certified { display.start_analysis() } else { None };
    let outcome = form.submit_async(&evaluator).await;
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }

    match (&outcome, screen.json) {
        (FormOutcome::Completed(report), true) => println!("{}", report.to_json()?),
        _ => display.show_outcome(&outcome),
    }

    if !outcome.is_success() {
        std::process::exit(1);
    }
    Ok(())
}

/// List targets with their artifact files
fn list_targets(args: &Args, config: &Config) {
    let store = file_store(args, config);
    let layout = store.layout();

    println!("\n{}", "Screening Targets".bold());
    println!("─────────────────────────────────────");
    for target in DiseaseTarget::ALL {
        let status = match layout.missing_file(target) {
            None => "ready".green(),
            Some(_) => "missing".red(),
        };
        println!("{:<16} {:<10} {}", target.label(), target.short_name(), status);
        println!("    {}", layout.vectorizer_path(target).display().to_string().dimmed());
        println!("    {}", layout.model_path(target).display().to_string().dimmed());
    }
    println!();
}

fn run_doctor(args: &Args, config: &Config) -> Result<()> {
    let doctor = Doctor::new(file_store(args, config));
    let checks = doctor.run_diagnostics();
    Doctor::display_results(&checks);

    if Doctor::has_failures(&checks) {
        std::process::exit(1);
    }
    Ok(())
}

fn show_config(args: &Args, config: &Config) -> Result<()> {
    let source = match &args.config {
        Some(path) => path.display().to_string(),
        None => match Config::default_path() {
            Some(path) if path.exists() => path.display().to_string(),
            _ => "built-in defaults".to_string(),
        },
    };
    let layout = config.artifact_layout(args.artifacts_dir.as_deref());

    println!("\n{} ({})", "MediTrack Configuration".bold(), source.dimmed());
    println!("─────────────────────────────────────");
    println!("{}", config.to_toml()?);
    println!("Effective artifacts dir: {}", layout.dir().display());
    println!();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = Config::load(args.config.as_deref())?;
    let verbosity = resolve_verbosity(&args, &config);

    init_logging(verbosity);
    if args.no_color || !config.display.color_output {
        colored::control::set_override(false);
    }

    match &args.command {
        Some(Commands::Form) => {
            run_form(&args, &config, verbosity).await?;
        }
        Some(Commands::Screen(screen)) => {
            run_screen(&args, &config, screen, verbosity).await?;
        }
        Some(Commands::Targets) => {
            list_targets(&args, &config);
        }
        Some(Commands::Doctor) => {
            run_doctor(&args, &config)?;
        }
        Some(Commands::Config) => {
            show_config(&args, &config)?;
        }
        None => {
            println!("MediTrack Health v{} - AI Patient Risk", env!("CARGO_PKG_VERSION"));
            println!("\nUsage:");
            println!("  meditrack form                 Fill in the screening form");
            println!("  meditrack screen -t <target>   Screen one patient from flags");
            println!("  meditrack targets              List targets and artifacts");
            println!("  meditrack doctor               Check artifacts");
            println!("  meditrack config               Show configuration");
            println!("\nExample:");
            println!("  meditrack screen -t diabetes --age 30 --bmi 22 --glucose 90 --bp 120 --hr 72 --temp 98.6 --certify");
            println!();
        }
    }

    Ok(())
}
