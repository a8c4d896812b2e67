// src/main.rs
// =============================================================================
// This is the entry point of our CLI application.
//
// What happens here:
// 1. Parse command-line arguments using clap
// 2. Dispatch to the appropriate subcommand handler
// 3. Print the rewritten link or the mirror status
// 4. Exit with proper code (0 = success, 1 = rejected/unhealthy, 2 = error)
//
// Rust concepts used:
// - async/await: The status commands make concurrent network requests
// - Result<T, E>: For error handling (T = success type, E = error type)
// - match: Pattern matching to handle different subcommands
// =============================================================================

// Module declarations - tells Rust about our other source files
mod cli;           // src/cli.rs - command-line parsing
mod rewrite;       // src/rewrite/ - link rewriting logic
mod status;        // src/status/ - mirror status API client

// Import items we need from our modules
use cli::{Cli, Commands};
use clap::Parser;  // Parser trait enables the parse() method
use rewrite::{Origin, RewriteResult};

// anyhow::Result is like std::result::Result but simpler for applications
// It lets us return any error type with the ? operator
use anyhow::Result;

// The #[tokio::main] attribute transforms our async main into a real main function
// It creates a tokio runtime and runs our async code inside it
#[tokio::main]
async fn main() {
    // Run our application logic and capture the exit code
    // std::process::exit() terminates the program with the given code
    let exit_code = match run().await {
        Ok(code) => code,
        Err(e) => {
            // If an unexpected error occurred, print it and exit with code 2
            eprintln!("Error: {:#}", e);
            2
        }
    };

    std::process::exit(exit_code);
}

// This is the main application logic
// Returns:
//   Ok(0) = success
//   Ok(1) = link rejected / mirror unhealthy
//   Err = unexpected error (exit code 2)
async fn run() -> Result<i32> {
    // Parse command-line arguments into our Cli struct
    // This will automatically handle --help, --version, etc.
    let cli = Cli::parse();

    // Match on which subcommand was used
    // Each branch handles a different command (rewrite, status, ping)
    match cli.command {
        Commands::Rewrite { url, origin, json } => handle_rewrite(&url, &origin, json),
        Commands::Status { base_url, json } => handle_status(&base_url, json).await,
        Commands::Ping { base_url } => handle_ping(&base_url).await,
    }
}

// Handles the 'rewrite' subcommand
//
// This is entirely synchronous - rewriting never touches the network.
// Parameters:
//   url: the GitHub-family link to rewrite
//   origin: the mirror base URL (e.g. "https://mirror.example")
//   json: whether to output JSON format
fn handle_rewrite(url: &str, origin: &str, json: bool) -> Result<i32> {
    // Parse the mirror origin once; a bad origin is a usage error, not a
    // rejection of the input link
    let origin = Origin::parse(origin)?;

    let result = rewrite::rewrite(url, &origin);

    if json {
        // Serialize the result to JSON and print
        let json_output = serde_json::to_string_pretty(&result)?;
        println!("{}", json_output);
    } else {
        match &result {
            RewriteResult::Rewritten { url } => {
                println!("{}", url);
            }
            RewriteResult::Rejected { reason } => {
                eprintln!("❌ {}", reason.message());
            }
        }
    }

    // Exit code 1 signals rejection so scripts can branch on it
    if result.is_rewritten() {
        Ok(0)
    } else {
        Ok(1)
    }
}

// Handles the 'status' subcommand
//
// Fetches all four status endpoints concurrently; if any of them fails,
// the whole command fails and nothing partial is printed.
async fn handle_status(base_url: &str, json: bool) -> Result<i32> {
    let client = http_client()?;

    let service_status = status::load_status(&client, base_url).await?;

    if json {
        let json_output = serde_json::to_string_pretty(&service_status)?;
        println!("{}", json_output);
    } else {
        print_status(base_url, &service_status);
    }

    Ok(0)
}

// Handles the 'ping' subcommand
async fn handle_ping(base_url: &str) -> Result<i32> {
    let client = http_client()?;

    match status::healthcheck(&client, base_url).await {
        Ok(()) => {
            println!("✅ {} is healthy", base_url);
            Ok(0)
        }
        Err(e) => {
            eprintln!("❌ {} is not healthy: {:#}", base_url, e);
            Ok(1)
        }
    }
}

// Creates the HTTP client shared by the status commands
//
// 10 second timeout so a dead mirror fails fast instead of hanging
fn http_client() -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .timeout(std::time::Duration::from_secs(10))
        .build()?;
    Ok(client)
}

// Prints the status snapshot as a human-readable block
fn print_status(base_url: &str, service_status: &status::ServiceStatus) {
    println!("📊 Mirror status for {}:", base_url);
    println!("   📦 Size limit: {} MB", service_status.max_response_body_size_mb);
    println!("   ✅ Whitelist: {}", on_off(service_status.whitelist_enabled));
    println!("   🚫 Blacklist: {}", on_off(service_status.blacklist_enabled));
    println!("   🏷️  Version: {}", service_status.version);
}

// Formats a feature toggle as "on"/"off"
fn on_off(enabled: bool) -> &'static str {
    if enabled {
        "on"
    } else {
        "off"
    }
}
