use anyhow::Context;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand, ValueEnum};
use medvoice_core::{
    config::{catalog_dir_from_env_value, issued_by_from_env_value},
    constants::{CATALOG_DIR_ENV, EXAMPLE_SYMPTOMS, ISSUED_BY_ENV},
    render::{render_tips, write_document},
    speech::{capture_transcript, LineCapture},
    Consultation, CoreConfig, CoreError, DocumentFormat, PrescriptionService, ShareTarget,
};
use std::io::Write as _;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Log filter used when `RUST_LOG` is unset or unparsable.
const DEFAULT_LOG_FILTER: &str = "medvoice=warn";

#[derive(Parser)]
#[command(name = "medvoice")]
#[command(about = "Describe your symptoms, get a prescription with health tips")]
struct Cli {
    /// Identity printed on prescriptions (default: $MEDVOICE_ISSUED_BY or "Dr. AI Assistant")
    #[arg(long, global = true)]
    issued_by: Option<String>,

    /// Directory with conditions.yaml and advisories.yaml
    /// (default: $MEDVOICE_CATALOG_DIR or the built-in catalog)
    #[arg(long, global = true)]
    catalog_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a prescription from a symptom description
    Prescribe {
        /// Symptom description, e.g. "I have a fever and headache"
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Read one spoken (dictated) line from stdin and generate a prescription
    Listen {
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Print a share link for the prescription
    Share {
        /// Where to share
        #[arg(value_enum)]
        target: Target,
        /// Symptom description
        #[arg(required = true, num_args = 1..)]
        text: Vec<String>,
        /// Prescription date (YYYY-MM-DD, default: today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// List conditions in the order they are matched
    Conditions,
    /// Show health tips for a condition
    Tips {
        /// Condition name as listed by `conditions`
        condition: String,
    },
    /// Show example symptom descriptions
    Examples,
}

#[derive(Args)]
struct OutputArgs {
    /// Prescription date (YYYY-MM-DD, default: today)
    #[arg(long)]
    date: Option<NaiveDate>,
    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
    /// Save the document to this file instead of printing it (PDF is always saved)
    #[arg(long, short)]
    output: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Markdown,
    Json,
    Pdf,
}

impl From<Format> for DocumentFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => DocumentFormat::Text,
            Format::Markdown => DocumentFormat::Markdown,
            Format::Json => DocumentFormat::Json,
            Format::Pdf => DocumentFormat::Pdf,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Target {
    Whatsapp,
    Email,
}

impl From<Target> for ShareTarget {
    fn from(target: Target) -> Self {
        match target {
            Target::Whatsapp => ShareTarget::WhatsApp,
            Target::Email => ShareTarget::Email,
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let issued_by = resolve_issued_by(cli.issued_by, std::env::var(ISSUED_BY_ENV).ok());
    let catalog_dir = cli
        .catalog_dir
        .or_else(|| catalog_dir_from_env_value(std::env::var(CATALOG_DIR_ENV).ok()));

    let config = CoreConfig::new(issued_by, catalog_dir)?;
    let catalog = config
        .load_catalog()
        .context("refusing to start with an invalid symptom catalog")?;
    let service = PrescriptionService::new(&catalog, config);

    match cli.command {
        Some(Commands::Prescribe { text, output }) => {
            prescribe(&service, &text.join(" "), &output)
        }
        Some(Commands::Listen { output }) => {
            eprintln!("Listening... type your symptoms and press Enter");
            let mut capture = LineCapture::new(std::io::stdin().lock());
            let transcript = capture_transcript(&mut capture)?;
            prescribe(&service, &transcript, &output)
        }
        Some(Commands::Share { target, text, date }) => {
            let Some(consultation) = consult(&service, &text.join(" "), date)? else {
                return Ok(ExitCode::FAILURE);
            };
            println!("{}", ShareTarget::from(target).link(&consultation.prescription));
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Conditions) => {
            for (index, condition) in service.conditions().enumerate() {
                let symptoms: Vec<&str> =
                    condition.symptoms.iter().map(|s| s.as_str()).collect();
                println!("{:>2}. {}: {}", index + 1, condition.name, symptoms.join(", "));
            }
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Tips { condition }) => match service.tips(&condition) {
            Ok(Some(advisory)) => {
                print!("{}", render_tips(advisory));
                Ok(ExitCode::SUCCESS)
            }
            Ok(None) => {
                println!("No tips available for {condition}.");
                Ok(ExitCode::SUCCESS)
            }
            Err(CoreError::UnknownCondition(name)) => {
                eprintln!("Unknown condition: {name}. Run 'medvoice conditions' to list them.");
                Ok(ExitCode::FAILURE)
            }
            Err(e) => Err(e.into()),
        },
        Some(Commands::Examples) => {
            for example in EXAMPLE_SYMPTOMS {
                println!("\"{example}\"");
            }
            Ok(ExitCode::SUCCESS)
        }
        None => {
            println!("Use 'medvoice --help' for commands");
            Ok(ExitCode::SUCCESS)
        }
    }
}

/// `RUST_LOG` when it is set and valid, otherwise [`DEFAULT_LOG_FILTER`].
fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    rust_log
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}

/// An explicit flag wins as given, so a blank one is rejected by [`CoreConfig::new`]
/// instead of silently falling back.
fn resolve_issued_by(flag: Option<String>, env_value: Option<String>) -> String {
    flag.unwrap_or_else(|| issued_by_from_env_value(env_value))
}

/// Gate, match and assemble. `Ok(None)` means the user has already been told why.
fn consult<'a>(
    service: &PrescriptionService<'a>,
    raw: &str,
    date: Option<NaiveDate>,
) -> anyhow::Result<Option<Consultation<'a>>> {
    let transcript = match PrescriptionService::accept_transcript(raw) {
        Ok(transcript) => transcript,
        Err(CoreError::EmptyTranscript) => {
            eprintln!("No symptoms detected. Please describe your symptoms first.");
            return Ok(None);
        }
        Err(e) => return Err(e.into()),
    };

    let today = date.unwrap_or_else(|| chrono::Local::now().date_naive());
    let consultation = service.consult(&transcript, today);
    if consultation.is_none() {
        eprintln!("No matching condition found. Please try describing your symptoms differently.");
    }
    Ok(consultation)
}

fn prescribe(
    service: &PrescriptionService<'_>,
    raw: &str,
    output: &OutputArgs,
) -> anyhow::Result<ExitCode> {
    let Some(consultation) = consult(service, raw, output.date)? else {
        return Ok(ExitCode::FAILURE);
    };

    let format = DocumentFormat::from(output.format);
    let document = format.render(&consultation)?;

    let path = output.output.clone().or_else(|| {
        format
            .is_binary()
            .then(|| PathBuf::from(format.default_file_name(&consultation.prescription)))
    });

    match path {
        Some(path) => {
            write_document(&path, &document)?;
            eprintln!(
                "Prescription for {} saved to {}",
                consultation.prescription.condition_name,
                path.display()
            );
        }
        None => std::io::stdout()
            .lock()
            .write_all(&document)
            .context("failed to write document to stdout")?,
    }

    Ok(ExitCode::SUCCESS)
}
