//! gradecast CLI - predict a student's GPA from fitted artifacts and explore
//! the training data.
//!
//! ```bash
//! gradecast --scaler scaler.json --model model.json predict \
//!     --age 17 --gender 0 --ethnicity 1 --parental-education 2 \
//!     --study-time-weekly 12.5 --absences 3 --tutoring 1 --parental-support 3 \
//!     --extracurricular 1 --sports 0 --music 0 --volunteering 1
//!
//! gradecast predict --input request.json --json
//! gradecast explore --bins 10
//! gradecast inspect
//! ```

use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use gradecast::explore::sturges_bins;
use gradecast::{AppConfig, AppContext, ArtifactState, FeatureInput, Field, ValidationPolicy};

/// Student GPA prediction.
#[derive(Parser, Debug)]
#[command(name = "gradecast", version, about)]
struct Cli {
    /// Configuration file (defaults to ./gradecast.toml when present)
    #[arg(long, short = 'c', global = true, env = "GRADECAST_CONFIG")]
    config: Option<PathBuf>,

    /// Scaler artifact (overrides the config file)
    #[arg(long, global = true, env = "GRADECAST_SCALER")]
    scaler: Option<PathBuf>,

    /// Model artifact (overrides the config file)
    #[arg(long, global = true, env = "GRADECAST_MODEL")]
    model: Option<PathBuf>,

    /// Dataset CSV used by `explore` (overrides the config file)
    #[arg(long, global = true, env = "GRADECAST_DATASET")]
    dataset: Option<PathBuf>,

    /// Accept out-of-range values and ignore unknown fields
    #[arg(long, global = true)]
    lenient: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Predict a GPA for one student
    Predict(PredictCommand),
    /// Summarise the student performance dataset
    Explore(ExploreCommand),
    /// Show whether the prediction artifacts loaded
    Inspect,
}

#[derive(Args, Debug)]
struct PredictCommand {
    /// JSON object with the input fields (`-` for stdin); flags override it
    #[arg(long, short = 'i')]
    input: Option<PathBuf>,

    /// Print the prediction as JSON
    #[arg(long)]
    json: bool,

    #[arg(long)]
    age: Option<String>,
    #[arg(long)]
    gender: Option<String>,
    #[arg(long)]
    ethnicity: Option<String>,
    #[arg(long)]
    parental_education: Option<String>,
    #[arg(long)]
    study_time_weekly: Option<String>,
    #[arg(long)]
    absences: Option<String>,
    #[arg(long)]
    tutoring: Option<String>,
    #[arg(long)]
    parental_support: Option<String>,
    #[arg(long)]
    extracurricular: Option<String>,
    #[arg(long)]
    sports: Option<String>,
    #[arg(long)]
    music: Option<String>,
    #[arg(long)]
    volunteering: Option<String>,
}

impl PredictCommand {
    fn read_input(&self) -> Result<FeatureInput> {
        let mut input = match &self.input {
            None => FeatureInput::new(),
            Some(path) if path.as_os_str() == "-" => {
                let mut text = String::new();
                io::stdin().read_to_string(&mut text)?;
                serde_json::from_str(&text).context("failed to parse input JSON from stdin")?
            }
            Some(path) => {
                let file = File::open(path)
                    .with_context(|| format!("failed to open {}", path.display()))?;
                serde_json::from_reader(BufReader::new(file))
                    .with_context(|| format!("failed to parse {}", path.display()))?
            }
        };

        let flags = [
            ("Age", &self.age),
            ("Gender", &self.gender),
            ("Ethnicity", &self.ethnicity),
            ("ParentalEducation", &self.parental_education),
            ("StudyTimeWeekly", &self.study_time_weekly),
            ("Absences", &self.absences),
            ("Tutoring", &self.tutoring),
            ("ParentalSupport", &self.parental_support),
            ("Extracurricular", &self.extracurricular),
            ("Sports", &self.sports),
            ("Music", &self.music),
            ("Volunteering", &self.volunteering),
        ];
        for (name, value) in flags {
            if let Some(value) = value {
                input.insert(name, value.as_str());
            }
        }
        Ok(input)
    }

    fn run(&self, ctx: &AppContext) -> Result<()> {
        let input = self.read_input()?;
        match ctx.predict(&input) {
            Ok(prediction) => {
                if self.json {
                    println!("{}", serde_json::to_string_pretty(&prediction)?);
                } else {
                    println!("{prediction}");
                    println!("{}", progress_bar(prediction.display_ratio, 40));
                }
                Ok(())
            }
            Err(err) => {
                eprintln!("{}", err.user_message());
                Err(err).context("prediction failed")
            }
        }
    }
}

fn progress_bar(ratio: f64, width: usize) -> String {
    let filled = (ratio * width as f64).round() as usize;
    format!(
        "[{}{}] {:>3.0}%",
        "#".repeat(filled.min(width)),
        "-".repeat(width.saturating_sub(filled)),
        ratio * 100.0
    )
}

#[derive(Args, Debug)]
struct ExploreCommand {
    /// Histogram bins for weekly study time (default: Sturges' rule)
    #[arg(long, short = 'b')]
    bins: Option<usize>,
}

impl ExploreCommand {
    fn run(&self, ctx: &AppContext) -> Result<()> {
        let dataset = ctx.explore().context("exploration failed")?;

        println!("{} students\n", dataset.len());
        print!("{}", dataset.summary());

        match dataset.absences_gpa_correlation() {
            Some(r) => println!("\nGPA vs Absences: Pearson r = {r:.3}"),
            None => println!("\nGPA vs Absences: correlation undefined"),
        }

        let bins = self.bins.unwrap_or_else(|| sturges_bins(dataset.len()));
        let histogram = dataset.study_time_histogram(bins)?;
        let peak = histogram.counts().iter().copied().max().unwrap_or(0).max(1);
        println!("\nWeekly Study Time");
        for (lo, hi, count) in histogram.bins() {
            let bar = "#".repeat(count * 40 / peak);
            println!("{lo:>6.2} - {hi:>6.2} | {count:>5} {bar}");
        }
        Ok(())
    }
}

fn inspect(ctx: &AppContext) {
    println!("artifacts: {}", ctx.artifact_status());
    if let ArtifactState::Ready(artifacts) = ctx.artifact_status() {
        for (label, meta) in [
            ("scaler", artifacts.scaler_meta()),
            ("model", artifacts.model_meta()),
        ] {
            println!(
                "  {label}: {} features, producer {}",
                meta.n_features,
                meta.producer.as_deref().unwrap_or("unknown")
            );
        }
    }
    println!("validation: {:?}", ctx.policy());
    println!("dataset: {}", ctx.dataset_path().display());

    println!("\nfields:");
    for field in Field::ALL {
        let kind = field.kind();
        let (min, max) = kind.bounds();
        let codes: Vec<String> = (0..)
            .map_while(|code| field.label(code).map(|label| format!("{code}={label}")))
            .collect();
        if codes.is_empty() {
            println!("  {:<18} {} in [{min}, {max}]", field.name(), kind.type_name());
        } else {
            println!("  {:<18} {}", field.name(), codes.join(", "));
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::from_default_env().add_directive("gradecast=info".parse()?))
        .init();

    let cli = Cli::parse();

    let mut config = AppConfig::load(cli.config.as_deref()).context("failed to load config")?;
    if let Some(scaler) = cli.scaler {
        config.artifacts.scaler = scaler;
    }
    if let Some(model) = cli.model {
        config.artifacts.model = model;
    }
    if let Some(dataset) = cli.dataset {
        config.data.dataset = dataset;
    }
    if cli.lenient {
        config.validation.policy = ValidationPolicy::Lenient;
    }

    let ctx = AppContext::initialize(&config);
    info!(status = %ctx.artifact_status(), "gradecast ready");

    match cli.command {
        Command::Predict(cmd) => cmd.run(&ctx)?,
        Command::Explore(cmd) => cmd.run(&ctx)?,
        Command::Inspect => inspect(&ctx),
    }
    Ok(())
}
