use clap::{Parser, Subcommand};
use qform_core::{
    config::{date_format_from_env_value, default_language_from_env_value},
    validate_document, CoreConfig, ExportService, FeedbackStatus, LanguageCode,
    QuestionnaireDocument, Resolver, SubmissionExport,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "qform")]
#[command(about = "qform questionnaire tools")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a questionnaire with every text resolved for one language
    Resolve {
        /// Questionnaire document (.yaml, .yml or .json)
        document: PathBuf,
        /// Display language (defaults to the document's default language)
        #[arg(long)]
        lang: Option<LanguageCode>,
    },
    /// Check a questionnaire document for structural problems
    Validate {
        /// Questionnaire document (.yaml, .yml or .json)
        document: PathBuf,
    },
    /// Show answered and missing questions of a submission
    Progress {
        /// Submission export file (.yaml, .yml or .json)
        submission: PathBuf,
    },
    /// Export a submission as an .xlsx spreadsheet
    Export {
        /// Submission export file (.yaml, .yml or .json)
        submission: PathBuf,
        /// Output path (defaults to submission_<subjectCode>_<date>.xlsx)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// List the feedback statuses reachable from a status
    Transitions {
        /// Current status: new, investigating, resolved or closed
        status: String,
    },
}

fn core_config() -> Result<CoreConfig, Box<dyn std::error::Error>> {
    let default_language =
        default_language_from_env_value(std::env::var("QFORM_DEFAULT_LANGUAGE").ok())?;
    let date_format = date_format_from_env_value(std::env::var("QFORM_DATE_FORMAT").ok());
    Ok(CoreConfig::new(default_language, date_format)?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Resolve { document, lang }) => {
            let doc = QuestionnaireDocument::from_path(&document)?;
            let lang = lang.unwrap_or(doc.default_language);
            let resolver = Resolver::new(core_config()?.default_language());

            println!(
                "{} (v{}, {})",
                resolver.resolve(Some(&doc.title), &lang),
                doc.version,
                lang
            );
            for section in &doc.sections {
                println!();
                println!("[{}] {}", section.id, resolver.resolve(Some(&section.title), &lang));
                for question in &section.questions {
                    let marker = if question.required { "*" } else { " " };
                    println!(
                        "  {marker} {}: {} ({})",
                        question.id,
                        resolver.resolve(Some(&question.text), &lang),
                        question.kind.as_str()
                    );
                    for option in question.options.iter().flatten() {
                        println!(
                            "      - {} = {}",
                            option.value,
                            resolver.resolve(Some(&option.text), &lang)
                        );
                    }
                }
            }
        }
        Some(Commands::Validate { document }) => {
            let doc = QuestionnaireDocument::from_path(&document)?;
            let problems = validate_document(&doc);
            if problems.is_empty() {
                println!("{}: no problems found", document.display());
            } else {
                for problem in &problems {
                    eprintln!("{}: {}", document.display(), problem);
                }
                return Err(format!("{} problem(s) found", problems.len()).into());
            }
        }
        Some(Commands::Progress { submission }) => {
            let submission = SubmissionExport::from_path(&submission)?;
            let progress = submission.progress();
            println!(
                "Answered {} of {} questions ({}%)",
                progress.answered,
                progress.total,
                progress.percent()
            );
            if progress.is_complete() {
                println!("All required questions answered.");
            } else {
                println!("Missing required: {}", progress.missing_required.join(", "));
            }
        }
        Some(Commands::Export { submission, out }) => {
            let submission = SubmissionExport::from_path(&submission)?;
            let out = out.unwrap_or_else(|| {
                PathBuf::from(submission.filename(chrono::Utc::now().date_naive()))
            });
            let service = ExportService::new(Arc::new(core_config()?));
            service.export_to_path(&submission, &out)?;
            println!("Exported submission {} to {}", submission.metadata.id, out.display());
        }
        Some(Commands::Transitions { status }) => {
            let status = FeedbackStatus::parse(&status)?;
            if status.is_terminal() {
                println!("{status} is terminal");
            } else {
                let next: Vec<&str> = status.next().iter().map(|s| s.as_str()).collect();
                println!("{status} -> {}", next.join(", "));
            }
        }
        None => {
            println!("Use 'qform --help' for commands");
        }
    }

    Ok(())
}
