use clap::{Args, Parser, Subcommand};
use rd_app::{AppResult, EstimateReport, ManualRequest, catalog_service, estimate_service, run_service};
use rd_estimator::CdaBoundsSource;
use rd_vehicles::{BodyType, Drivetrain};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "rundyno")]
#[command(about = "RunDyno - engine power from a logged acceleration run", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Estimate power from command-line values
    Estimate(EstimateArgs),
    /// Estimate power for a run file
    Run {
        /// Path to the run YAML/JSON file
        run_path: PathBuf,
        /// Vehicle profile catalog used to resolve `vehicle.profile`
        #[arg(long)]
        catalog: Option<PathBuf>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Validate run file syntax and values
    Validate {
        /// Path to the run YAML/JSON file
        run_path: PathBuf,
    },
    /// List vehicle profiles in a catalog
    Profiles {
        /// Path to the catalog YAML/JSON file
        catalog_path: PathBuf,
        /// Only this make (exact match)
        #[arg(long)]
        make: Option<String>,
        /// Only this model (exact match)
        #[arg(long)]
        model: Option<String>,
    },
}

#[derive(Args)]
struct EstimateArgs {
    /// Vehicle mass with driver and fuel (kg)
    #[arg(long)]
    mass_kg: f64,
    /// Start speed (km/h)
    #[arg(long)]
    v1_kmh: f64,
    /// End speed (km/h)
    #[arg(long)]
    v2_kmh: f64,
    /// Elapsed time between v1 and v2 (s)
    #[arg(long)]
    time_s: f64,
    /// Distance covered between v1 and v2 (m)
    #[arg(long)]
    distance_m: f64,
    /// Road grade (%), positive uphill
    #[arg(long, allow_hyphen_values = true)]
    grade_pct: Option<f64>,
    /// Air density (kg/m³)
    #[arg(long)]
    rho: Option<f64>,
    /// Rolling resistance coefficient
    #[arg(long)]
    crr: Option<f64>,
    /// Drag area Cd·A (m²)
    #[arg(long, conflicts_with = "body_type")]
    cda: Option<f64>,
    /// Body type for a default drag area: hatch, sedan, suv
    #[arg(long, default_value = "hatch")]
    body_type: BodyType,
    /// Drivetrain for a default efficiency: fwd_rwd, awd
    #[arg(long, default_value = "fwd_rwd")]
    drivetrain: Drivetrain,
    /// Drivetrain efficiency override
    #[arg(long)]
    eta: Option<f64>,
    /// Lower CdA bound for the range sweep
    #[arg(long, requires = "cda_max")]
    cda_min: Option<f64>,
    /// Upper CdA bound for the range sweep
    #[arg(long, requires = "cda_min")]
    cda_max: Option<f64>,
    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

impl EstimateArgs {
    fn request(&self) -> ManualRequest {
        ManualRequest {
            grade_pct: self.grade_pct,
            rho: self.rho,
            crr: self.crr,
            cda_m2: self.cda,
            body_type: self.body_type,
            drivetrain: self.drivetrain,
            eta: self.eta,
            cda_bounds: self.cda_min.zip(self.cda_max),
            ..ManualRequest::new(
                self.mass_kg,
                self.v1_kmh,
                self.v2_kmh,
                self.time_s,
                self.distance_m,
            )
        }
    }
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Estimate(args) => cmd_estimate(&args),
        Commands::Run {
            run_path,
            catalog,
            json,
        } => cmd_run(&run_path, catalog.as_deref(), json),
        Commands::Validate { run_path } => cmd_validate(&run_path),
        Commands::Profiles {
            catalog_path,
            make,
            model,
        } => cmd_profiles(&catalog_path, make.as_deref(), model.as_deref()),
    }
}

fn cmd_estimate(args: &EstimateArgs) -> AppResult<()> {
    let report = estimate_service::estimate_manual(&args.request())?;
    emit(&report, args.json)
}

fn cmd_run(run_path: &Path, catalog: Option<&Path>, json: bool) -> AppResult<()> {
    let report = estimate_service::run_file(run_path, catalog)?;
    emit(&report, json)
}

fn cmd_validate(run_path: &Path) -> AppResult<()> {
    println!("Validating run file: {}", run_path.display());
    let summary = run_service::validate_run(run_path)?;
    println!("✓ Run file is valid");
    println!("  Name: {}", summary.name);
    println!("  Vehicle: {}", summary.vehicle);
    if !summary.uncertainty_overrides.is_empty() {
        println!(
            "  Uncertainty overrides: {}",
            summary.uncertainty_overrides.join(", ")
        );
    }
    Ok(())
}

fn cmd_profiles(catalog_path: &Path, make: Option<&str>, model: Option<&str>) -> AppResult<()> {
    let catalog = catalog_service::load_catalog(catalog_path)?;
    let rows = catalog_service::list_profiles(&catalog, make, model);

    if rows.is_empty() {
        println!("No matching profiles");
        return Ok(());
    }

    for row in rows {
        let bounds = match row.cda_bounds {
            Some((min, max)) => format!(" [{:.2}, {:.2}]", min, max),
            None => String::new(),
        };
        println!(
            "  {} {} - {}: CdA {:.2} m²{}",
            row.make, row.model, row.key, row.cda_m2, bounds
        );
    }
    Ok(())
}

fn emit(report: &EstimateReport, json: bool) -> AppResult<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
    } else {
        print_report(report);
    }
    Ok(())
}

fn print_report(report: &EstimateReport) {
    let (eng_lo, eng_hi) = report.engine_hp_range;
    let (whl_lo, whl_hi) = report.wheel_hp_range;
    let b = &report.point.breakdown;

    println!("{}", report.name);
    println!(
        "  Engine: {:.0} hp ({:.1} kW)  range {:.0}-{:.0} hp",
        report.engine_hp, report.engine_kw, eng_lo, eng_hi
    );
    println!(
        "  Wheel:  {:.0} hp ({:.1} kW)  range {:.0}-{:.0} hp",
        report.wheel_hp, report.wheel_kw, whl_lo, whl_hi
    );
    println!("  Energy over the run:");
    println!("    kinetic  {:>10.1} kJ", b.de_j / 1000.0);
    println!("    drag     {:>10.1} kJ", b.e_drag_j / 1000.0);
    println!("    rolling  {:>10.1} kJ", b.e_roll_j / 1000.0);
    println!("    grade    {:>10.1} kJ", b.e_grade_j / 1000.0);

    let cda_note = match (&report.cda.detail, report.cda.range_source) {
        (Some(detail), CdaBoundsSource::Supplied) => format!("{} ({}, profile bounds)", report.cda.origin, detail),
        (Some(detail), CdaBoundsSource::RelativeFallback) => format!("{} ({})", report.cda.origin, detail),
        (None, CdaBoundsSource::Supplied) => format!("{}, supplied bounds", report.cda.origin),
        (None, CdaBoundsSource::RelativeFallback) => report.cda.origin.to_string(),
    };
    println!("  CdA {:.3} m² from {}", report.cda.value_m2, cda_note);
    if let Some(source) = &report.cda.source {
        println!("    source: {}", source);
    }
    if let Some(notes) = &report.cda.notes {
        println!("    notes: {}", notes);
    }
}
