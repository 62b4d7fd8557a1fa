// Visitor Pass Manager - Main Entry Point
//
// You can run it via Cargo:
//
// ```console
// $ cargo build --release
// $ ./target/release/visitor-pass-manager
// ```
//
// Or with custom configuration:
//
// ```console
// $ ./target/release/visitor-pass-manager --config config.json --no-latency --verbose
// ```

use std::process;
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Context, Result};
use chrono::{Local, NaiveDate};
use clap::Parser;
use tracing::{error, info};

use visitor_pass_manager::types::config::CliArgs;
use visitor_pass_manager::{
    seed_demo_data, summarize, Actor, LoggingConfig, Notifier, QrLookup, RegistrationForm,
    RegistrationWorkflow, SystemConfig, TransitionEngine, VisitorStore,
};

/// Notifier for the demo run: logs the send and keeps the last code so the
/// scripted walk can play the visitor's side of the OTP exchange.
#[derive(Debug, Default)]
struct DemoNotifier {
    last_code: Mutex<Option<String>>,
}

impl Notifier for DemoNotifier {
    fn send_otp(&self, email: &str, code: &str) {
        info!(email, "OTP dispatched");
        if let Ok(mut last) = self.last_code.lock() {
            *last = Some(code.to_string());
        }
    }
}

impl DemoNotifier {
    fn take_code(&self) -> Option<String> {
        self.last_code.lock().ok().and_then(|mut last| last.take())
    }
}

fn main() {
    // Parse CLI arguments first to check for special flags
    let args = CliArgs::parse();

    // Handle special CLI flags that don't require full initialization
    if args.print_config {
        let default_config = SystemConfig::default();
        match default_config.print_json() {
            Ok(json) => {
                println!("{}", json);
                return;
            }
            Err(e) => {
                eprintln!("Failed to serialize default configuration: {}", e);
                process::exit(1);
            }
        }
    }

    // Initialize logging based on CLI flags
    let logging_result = if args.debug {
        LoggingConfig::init_debug()
    } else if args.verbose {
        LoggingConfig::init_verbose()
    } else {
        // Default: minimal logging for normal users
        LoggingConfig::new().with_level(tracing::Level::WARN).init()
    };

    if let Err(e) = logging_result {
        eprintln!("Failed to initialize logging: {}", e);
        process::exit(1);
    }

    info!("Starting Visitor Pass Manager");

    // Load configuration from CLI arguments and optional config file
    let config = match SystemConfig::from_cli_args(&args) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            process::exit(1);
        }
    };

    // Validate configuration
    if let Err(e) = config.validate() {
        error!("Configuration validation failed: {}", e);
        process::exit(1);
    }

    info!("Configuration loaded and validated successfully");

    // Handle dry run mode
    if args.dry_run {
        eprintln!("Configuration validation successful!");
        eprintln!("Dry run mode - the demo will not be executed.");
        print_configuration_summary(&config);
        return;
    }

    print_startup_banner(&config);

    if let Err(e) = run_demo(&config, &args) {
        error!("Demo run failed: {:#}", e);
        process::exit(1);
    }

    info!("Visitor Pass Manager completed successfully");
}

/// Run the scripted lifecycle walk against a (optionally seeded) store
#[tokio::main]
async fn run_demo(config: &SystemConfig, args: &CliArgs) -> Result<()> {
    let today = Local::now().date_naive();
    let store = Arc::new(VisitorStore::new(config));

    if !args.no_seed {
        eprintln!("Seeding demo visitors and employees...");
        seed_demo_data(&store, today).await?;
    }

    let notifier = Arc::new(DemoNotifier::default());
    let workflow = RegistrationWorkflow::new(store.clone(), config, notifier.clone());
    let engine = TransitionEngine::new(store.clone());
    let lookup = QrLookup::new(store.clone());

    // A walk-in visitor registers for a same-day visit
    eprintln!("Submitting a registration...");
    let record = workflow
        .submit(RegistrationForm {
            full_name: "Jane Doe".to_string(),
            email: "jane.doe@example.com".to_string(),
            phone: "+1555000111".to_string(),
            purpose: "Quarterly partner sync".to_string(),
            visit_type: "Guest".to_string(),
            whom_to_meet: "Sarah Johnson".to_string(),
            visit_date: today.format("%Y-%m-%d").to_string(),
            visit_time: "09:00".to_string(),
        })
        .await?;
    eprintln!("  Created {} with pass code {} ({})", record.id, record.pass_code, record.status);

    // The visitor answers the OTP challenge
    let code = notifier.take_code().ok_or_else(|| anyhow!("no OTP was dispatched"))?;
    let pass = workflow
        .verify_otp("jane.doe@example.com", &code)
        .await
        .context("OTP verification failed")?;
    eprintln!("  Identity verified, pass {} issued", pass.pass_code);

    // Admin approves, Security runs the gate by scanning the pass
    let record = engine.approve(Actor::Admin, pass.visitor_id).await?;
    eprintln!("  Admin approved {}", record.id);

    let scanned = lookup
        .resolve_scan(&pass.pass_code.to_string())
        .await?
        .ok_or_else(|| anyhow!("issued pass code did not resolve"))?;
    eprintln!("  Gate scan resolved {} -> {} ({})", pass.pass_code, scanned.id, scanned.status);

    let record = engine.check_in(Actor::Security, pass.visitor_id).await?;
    eprintln!("  Security checked in {}", record.id);
    let record = engine.check_out(Actor::Security, pass.visitor_id).await?;
    eprintln!("  Security checked out {}", record.id);

    print_analytics(&store, today).await
}

/// Compute and print the dashboard snapshot as pretty JSON
async fn print_analytics(store: &VisitorStore, today: NaiveDate) -> Result<()> {
    let visitors = store.list_visitors().await?;
    let employees = store.list_employees().await?;

    let snapshot = summarize(&visitors, employees.len(), today);
    eprintln!("\nAnalytics snapshot:");
    println!("{}", serde_json::to_string_pretty(&snapshot)?);
    Ok(())
}

/// Print startup banner and configuration summary
fn print_startup_banner(config: &SystemConfig) {
    eprintln!("Visitor Pass Manager");
    eprintln!("====================");
    eprintln!("Registration, approval, and QR check-in/out lifecycle demo");
    eprintln!();

    print_configuration_summary(config);
}

/// Print configuration summary
fn print_configuration_summary(config: &SystemConfig) {
    eprintln!("Configuration:");
    eprintln!("  OTP TTL: {}s", config.otp_ttl_secs);
    eprintln!("  OTP Max Attempts: {}", config.otp_max_attempts);
    eprintln!("  Session TTL: {}s", config.session_ttl_secs);
    eprintln!("  Operation Timeout: {}ms", config.op_timeout_ms);
    if config.latency.enabled {
        eprintln!(
            "  Simulated Latency: submit {}ms, read {}ms, transition {}ms, lookup {}ms",
            config.latency.submit_ms,
            config.latency.read_ms,
            config.latency.transition_ms,
            config.latency.lookup_ms
        );
    } else {
        eprintln!("  Simulated Latency: disabled");
    }
    eprintln!();
}
