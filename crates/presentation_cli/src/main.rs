//! meshcall CLI
//!
//! Command-line interface for exercising the resilience layer and the
//! registry utility.

#![allow(clippy::print_stdout)]

use std::path::PathBuf;

use application::{
    ApplicationError, CommandOutput, ImageService, PushTarget, RegistryCredentials,
};
use clap::{Parser, Subcommand};
use domain::RemoteOperation;
use infrastructure::{AppConfig, LogFormat, build_image_service, build_provider_client, init_logging};
use presentation_http::{ApiError, ApiResponse, translate_with_data};

/// meshcall CLI
#[derive(Parser)]
#[command(name = "meshcall-cli")]
#[command(author, version, about = "Resilient service-to-service call toolkit", long_about = None)]
struct Cli {
    /// Verbosity level
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file (defaults to config.toml plus MESHCALL__* overrides)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Call a provider operation through retry and fallback
    ///
    /// Example: meshcall-cli call getUserById 42
    Call {
        /// Operation name (e.g. getInfo, getUserById, health)
        operation: String,

        /// Operation arguments, in order
        args: Vec<String>,
    },

    /// Registry image utilities
    Image {
        #[command(subcommand)]
        action: ImageCommand,
    },

    /// Check server health (used by Docker healthcheck)
    Health {
        /// Server URL
        #[arg(short, long, default_value = "http://localhost:8081")]
        url: String,
    },
}

#[derive(Subcommand)]
enum ImageCommand {
    /// Validate a private registry image reference
    Validate {
        /// Reference, e.g. harbor.example.com/project/image:tag
        reference: String,
    },

    /// Inspect an image in the registry
    Inspect {
        /// Image reference
        reference: String,

        /// Registry username
        #[arg(short, long)]
        username: String,

        /// Registry password
        #[arg(short, long, env = "MESHCALL_REGISTRY_PASSWORD")]
        password: String,
    },

    /// Push a local image archive (tar) to the registry
    ///
    /// Example: meshcall-cli image push ./app.tar --registry harbor.example.com -u admin -p secret
    Push {
        /// Path to the image archive
        archive: PathBuf,

        /// Registry host, optionally with port
        #[arg(long)]
        registry: String,

        /// Project / namespace (default: "default")
        #[arg(long)]
        project: Option<String>,

        /// Image name (default: "default-image")
        #[arg(long)]
        image: Option<String>,

        /// Tag (default: "latest")
        #[arg(long)]
        tag: Option<String>,

        /// Registry username
        #[arg(short, long)]
        username: String,

        /// Registry password
        #[arg(short, long, env = "MESHCALL_REGISTRY_PASSWORD")]
        password: String,
    },
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Format endpoint URL
fn endpoint_url(base_url: &str, path: &str) -> String {
    format!("{}{path}", base_url.trim_end_matches('/'))
}

fn load_config(path: Option<&PathBuf>) -> anyhow::Result<AppConfig> {
    let config = match path {
        Some(path) => AppConfig::load_from(&path.to_string_lossy())?,
        None => AppConfig::load()?,
    };
    config.validate()?;
    Ok(config)
}

/// Envelope for an outcome, including surfaced failures
fn envelope(result: Result<ApiResponse, ApiError>) -> ApiResponse {
    result.unwrap_or_else(ApiError::into_envelope)
}

fn print_command_output(output: &CommandOutput) {
    if !output.output.is_empty() {
        println!("{}", output.output.trim_end());
    }
    match output.exit_code {
        Some(code) if !output.success => println!("❌ Exited with code {code}"),
        None if !output.success => println!("❌ Terminated by signal"),
        _ => {},
    }
}

async fn run_image(service: &ImageService, action: ImageCommand) -> Result<bool, ApplicationError> {
    match action {
        ImageCommand::Validate { reference } => {
            let image = ImageService::validate_reference(&reference)?;
            println!("✅ Valid image reference: {image}");
            Ok(true)
        },

        ImageCommand::Inspect {
            reference,
            username,
            password,
        } => {
            let credentials = RegistryCredentials::new(username, password);
            println!("🔍 Inspecting {}", reference.trim());
            let output = service.inspect(&reference, &credentials).await?;
            print_command_output(&output);
            Ok(output.success)
        },

        ImageCommand::Push {
            archive,
            registry,
            project,
            image,
            tag,
            username,
            password,
        } => {
            let credentials = RegistryCredentials::new(username, password);
            let target = PushTarget::new(registry)
                .with_project(project)
                .with_image(image)
                .with_tag(tag);
            println!("📦 Pushing {}", archive.display());
            let output = service.push_archive(&archive, &target, &credentials).await?;
            print_command_output(&output);
            if output.success {
                println!("✅ Push completed");
            }
            Ok(output.success)
        },
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Set up logging based on verbosity
    init_logging(LogFormat::Text, log_filter_from_verbosity(cli.verbose))?;

    match cli.command {
        Commands::Call { operation, args } => {
            let config = load_config(cli.config.as_ref())?;
            let client = build_provider_client(&config)?;
            let operation = RemoteOperation::with_args(operation, args);

            let outcome = client.call(&operation).await;
            let body = envelope(translate_with_data(&outcome));
            println!("{}", serde_json::to_string_pretty(&body)?);

            if !body.success {
                std::process::exit(1);
            }
        },

        Commands::Image { action } => {
            let config = load_config(cli.config.as_ref())?;
            let service = build_image_service(&config);
            match run_image(&service, action).await {
                Ok(true) => {},
                Ok(false) => std::process::exit(1),
                Err(e) => {
                    println!("❌ {e}");
                    std::process::exit(1);
                },
            }
        },

        Commands::Health { url } => {
            let client = reqwest::Client::new();
            match client.get(endpoint_url(&url, "/health")).send().await {
                Ok(resp) if resp.status().is_success() => {
                    println!("✅ Healthy");
                    std::process::exit(0);
                },
                Ok(resp) => {
                    println!("❌ Unhealthy: HTTP {}", resp.status());
                    std::process::exit(1);
                },
                Err(e) => {
                    println!("❌ Unhealthy: {e}");
                    std::process::exit(1);
                },
            }
        },
    }

    Ok(())
}
