//!
//! complaint-desk CLI binary
//! -------------------------
//! Talks to the complaint service API on behalf of a signed-in student or administrator.
//! The session (token, profile, theme) is kept in a JSON file between invocations.

use std::env;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

use complaint_desk::cli::{self, print_usage};
use complaint_desk::{ApiClient, ClientConfig, LogNavigator, SessionStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    let mut args: Vec<String> = env::args().collect();
    let program = if args.is_empty() { "complaint-desk".to_string() } else { args.remove(0) };
    if args.is_empty() || matches!(args[0].as_str(), "-h" | "--help" | "help") {
        print_usage(&program);
        std::process::exit(if args.is_empty() { 2 } else { 0 });
    }

    let mut config = ClientConfig::from_env();
    let mut rest = Vec::with_capacity(args.len());
    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            flag @ ("--api-url" | "--session-file") => {
                let Some(value) = args.get(i + 1) else {
                    eprintln!("{} requires a value", flag);
                    print_usage(&program);
                    std::process::exit(2);
                };
                config = if flag == "--api-url" { config.with_api_url(value.clone()) } else { config.with_session_file(value.clone()) };
                i += 2;
            }
            _ => {
                rest.push(args[i].clone());
                i += 1;
            }
        }
    }

    let command = match cli::parse(&rest) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}", e);
            print_usage(&program);
            std::process::exit(2);
        }
    };

    let rust_log = env::var("RUST_LOG").unwrap_or_else(|_| "<unset>".to_string());
    info!(
        target: "complaint_desk",
        "complaint-desk: RUST_LOG='{}', api='{}', session='{}'",
        rust_log,
        config.base(),
        config.session_file.display()
    );

    let session = SessionStore::file(config.session_file.clone());
    let client = ApiClient::new(config, session, Arc::new(LogNavigator))?;
    cli::run(&client, command).await
}
