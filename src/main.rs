use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use smart_assist::application::services::SymptomInput;
use smart_assist::infrastructure::adapters::ConsoleAdapter;
use smart_assist::{build_router, AiProviderRouter, AppConfig, AppError, AssistantService};

#[derive(Parser)]
#[command(name = "smart-assist")]
#[command(about = "AI assistant with multi-provider fallback", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml", global = true)]
    config: PathBuf,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze symptoms
    Symptom {
        /// Comma-separated symptom description
        #[arg(short, long)]
        symptoms: String,
        #[arg(short, long)]
        age: u32,
        #[arg(short, long)]
        gender: String,
        /// How long the symptoms have lasted
        #[arg(short, long)]
        duration: String,
    },
    /// Ask the health chatbot; starts a session when no question is given
    Chat {
        question: Option<String>,
    },
    /// Review a plain-text resume
    Resume {
        /// Path to the resume text
        #[arg(short, long)]
        file: PathBuf,
        /// Role the resume targets
        #[arg(short, long)]
        role: String,
    },
    /// List providers in the order they are tried
    Providers,
    /// Show version
    Version,
    /// Generate default config
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

fn main() -> ExitCode {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    match cli.command {
        Commands::Version => {
            println!("smart-assist v{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Commands::InitConfig { force } => init_config(&cli.config, force),
        command => {
            let config = AppConfig::load_or_env(&cli.config)?;
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(run_assistant(command, config, cli.json))
        }
    }
}

async fn run_assistant(command: Commands, config: AppConfig, json: bool) -> Result<(), AppError> {
    let router = Arc::new(build_router(&config)?);
    let service = AssistantService::new(router.clone()).with_max_tokens(config.ai.default_max_tokens);

    match command {
        Commands::Symptom { symptoms, age, gender, duration } => {
            let input = SymptomInput { symptoms, age, gender, duration };
            let analysis = service.analyze_symptoms(&input).await?;
            if json {
                print_json(&analysis)?;
            } else {
                println!("{}\n\n{}\n\n(via {})", analysis.ai_response, analysis.disclaimer, analysis.provider_used);
            }
        }
        Commands::Chat { question: Some(question) } => {
            let response = service.chatbot_reply(&question, &[]).await?;
            if json {
                print_json(&serde_json::json!({
                    "text": response.text,
                    "provider_used": response.provider_used,
                    "latency_ms": response.latency_ms(),
                }))?;
            } else {
                println!("{}\n\n(via {} in {} ms)", response.text, response.provider_used, response.latency_ms());
            }
        }
        Commands::Chat { question: None } => {
            let mut console = ConsoleAdapter::new();
            console.run(&service).await?;
        }
        Commands::Resume { file, role } => {
            let resume_text = tokio::fs::read_to_string(&file).await?;
            let feedback = service.analyze_resume(&resume_text, &role).await?;
            if json {
                print_json(&feedback)?;
            } else {
                println!("{}\n\n(via {})", feedback.analysis, feedback.provider_used);
            }
        }
        Commands::Providers => print_providers(&config, &router, json)?,
        Commands::Version | Commands::InitConfig { .. } => {}
    }

    Ok(())
}

#[derive(Serialize)]
struct ProviderRow {
    name: String,
    kind: smart_assist::ProviderKind,
    priority: i32,
    model: String,
    enabled: bool,
    timeout_secs: u64,
}

fn print_providers(config: &AppConfig, router: &AiProviderRouter, json: bool) -> Result<(), AppError> {
    let mut rows: Vec<ProviderRow> = config
        .provider_configs()?
        .into_iter()
        .map(|p| ProviderRow {
            timeout_secs: p.timeout.unwrap_or(router.default_timeout()).as_secs(),
            name: p.name,
            kind: p.kind,
            priority: p.priority,
            model: p.model,
            enabled: p.enabled,
        })
        .collect();
    rows.sort_by_key(|r| r.priority);

    if json {
        return print_json(&rows);
    }

    if rows.is_empty() {
        println!("No providers configured");
    }
    for row in &rows {
        println!(
            "{:>3}  {:<12} {:<4} {} (timeout {}s)",
            row.priority,
            row.name,
            if row.enabled { "on" } else { "off" },
            row.model,
            row.timeout_secs
        );
    }
    println!("Fallback order: {}", router.order().join(" -> "));
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), AppError> {
    let out = serde_json::to_string_pretty(value)?;
    println!("{}", out);
    Ok(())
}

fn init_config(path: &Path, force: bool) -> Result<(), AppError> {
    if path.exists() && !force {
        println!("Config already exists at {} (use --force to overwrite)", path.display());
        return Ok(());
    }

    let yaml = AppConfig::default().to_yaml()?;
    std::fs::write(path, yaml)?;
    println!("Default config written to {}", path.display());
    println!("Set GEMINI_API_KEY, GROQ_API_KEY or HUGGINGFACE_API_KEY to enable providers.");
    Ok(())
}
