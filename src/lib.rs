use std::process::ExitCode;

use clap::Parser;

pub mod cli;
pub mod plugins;
pub mod services;
pub mod shell;

use cli::Cli;
use services::config::load_app_config;
use services::session::Session;
use shell::Shell;

/// Route `log` records through a `tracing` fmt subscriber; `RUST_LOG` sets the filter.
fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

async fn run_once(mut session: Session, text: &str) -> ExitCode {
    match session.convert(text).await {
        Ok(result) => {
            println!("{}", result.output_json);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{}", err.user_message());
            ExitCode::FAILURE
        }
    }
}

pub fn run() -> ExitCode {
    init_logging();

    let cli = Cli::parse();
    let config = cli.apply_overrides(load_app_config());

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("Failed to start async runtime: {err}");
            return ExitCode::FAILURE;
        }
    };

    let session = Session::new(config);

    runtime.block_on(async move {
        if let Some(text) = cli.once.as_deref() {
            return run_once(session, text).await;
        }

        let mut shell = match Shell::new(session) {
            Ok(shell) => shell,
            Err(err) => {
                eprintln!("{err}");
                return ExitCode::FAILURE;
            }
        };
        match shell.run().await {
            Ok(()) => ExitCode::SUCCESS,
            Err(err) => {
                eprintln!("{err}");
                ExitCode::FAILURE
            }
        }
    })
}
