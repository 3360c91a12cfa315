use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::time::Instant;

const EXIT_SUCCESS: i32 = 0;
const EXIT_AUTH: i32 = 1;
const EXIT_NETWORK: i32 = 2;
const EXIT_DATA: i32 = 3;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Take the questionnaire (default if no subcommand)
    Take,
    /// Show the stored result for this participant
    Result,
    /// Create a config file interactively
    Init,
}

#[derive(Parser, Debug)]
#[command(name = "enneamind")]
#[command(about = "Terminal Enneagram questionnaire", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/enneamind/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[tokio::main]
async fn main() {
    // Install rustls crypto provider (required for rustls 0.23+)
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Commands::Take);
    let start_time = Instant::now();
    let config_path = cli.config.map(PathBuf::from);

    // Init needs no existing config
    if let Commands::Init = command {
        if let Err(e) = enneamind::config::run_init_wizard(config_path) {
            eprintln!("Init error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
        std::process::exit(EXIT_SUCCESS);
    }

    // Load config
    let config = match enneamind::config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate config at startup
    if let Err(errors) = enneamind::config::validate_config(&config) {
        eprintln!("Config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    if cli.verbose {
        eprintln!("Store: {}", config.store.url);
    }

    // Resolve the API key (prompts on first run)
    let api_key = match enneamind::credentials::setup_key_if_missing(&config) {
        Ok(k) => k,
        Err(e) => {
            eprintln!("Credential error: {}", e);
            std::process::exit(EXIT_AUTH);
        }
    };

    // Create data service client
    let client = match enneamind::store::StoreClient::new(&config.store.url, &api_key) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to create data service client: {}", e);
            std::process::exit(EXIT_NETWORK);
        }
    };

    // Load the local session state (participant identity + resume data)
    let session_path = enneamind::session::get_session_path();
    let mut state = match enneamind::session::load_session_state(&session_path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Session state error: {}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if cli.verbose {
        eprintln!("Participant: {}", state.participant_id);
        if !state.answers.is_empty() {
            eprintln!("Resuming with {} answers recorded", state.answers.len());
        }
    }

    match command {
        Commands::Take => {
            let fetch_start = Instant::now();
            let items = match client.fetch_items().await {
                Ok(items) => items,
                Err(e) => {
                    eprintln!("Failed to fetch the item bank: {}", e);
                    std::process::exit(EXIT_NETWORK);
                }
            };

            if cli.verbose {
                eprintln!("Fetched {} items in {:?}", items.len(), fetch_start.elapsed());
            }

            let inventory = config.inventory.clone().unwrap_or_default();
            if let Err(e) = enneamind::survey::run_survey(
                &client,
                &items,
                &inventory,
                &mut state,
                &session_path,
                cli.verbose,
            )
            .await
            {
                eprintln!("Error: {}", e);
                let code = if e.downcast_ref::<enneamind::scoring::ScoringError>().is_some() {
                    EXIT_DATA
                } else {
                    EXIT_NETWORK
                };
                std::process::exit(code);
            }

            if cli.verbose {
                eprintln!();
                eprintln!("Done in {:?}", start_time.elapsed());
            }
        }
        Commands::Result => {
            let row = match client.fetch_result(&state.participant_id).await {
                Ok(Some(row)) => row,
                Ok(None) => {
                    eprintln!(
                        "No stored result for this participant. Run `enneamind` to take the questionnaire."
                    );
                    std::process::exit(EXIT_DATA);
                }
                Err(e) => {
                    eprintln!("Failed to fetch the result: {}", e);
                    std::process::exit(EXIT_NETWORK);
                }
            };

            let (outcome, scores) = match (row.outcome(), row.score_map()) {
                (Ok(outcome), Ok(scores)) => (outcome, scores),
                (Err(e), _) | (_, Err(e)) => {
                    eprintln!("Stored result is corrupt: {}", e);
                    std::process::exit(EXIT_DATA);
                }
            };

            let use_colors = enneamind::output::should_use_colors();
            println!("{}", enneamind::output::format_outcome(&outcome, use_colors));
            println!();
            println!(
                "{}",
                enneamind::output::format_profile_chart(&scores, use_colors)
            );
        }
        Commands::Init => unreachable!("handled above"),
    }

    std::process::exit(EXIT_SUCCESS);
}
