// SPDX-License-Identifier: MPL-2.0
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;

use toast_rack::config::{self, Config};
use toast_rack::diagnostics::DiagnosticsCollector;
use toast_rack::domain::Capacity;
use toast_rack::notifications::{
    Board, NotificationOptions, Position, Severity, ToastService, Toasts,
};
use tracing_subscriber::EnvFilter;

const HELP: &str = "\
toast-rack: scripted toast session

USAGE:
  toast-rack [OPTIONS]

OPTIONS:
  --config <PATH>               Load settings from this TOML file
  --capacity <N>                Override the live toast limit
  --export-diagnostics <PATH>   Write a JSON diagnostics report on exit
  -h, --help                    Print this help
";

const BOARD_REFRESH: Duration = Duration::from_millis(500);

struct Flags {
    config_path: Option<PathBuf>,
    capacity: Option<usize>,
    export_path: Option<PathBuf>,
}

fn parse_flags() -> Result<Option<Flags>, pico_args::Error> {
    let mut args = pico_args::Arguments::from_env();
    if args.contains(["-h", "--help"]) {
        return Ok(None);
    }
    let flags = Flags {
        config_path: args.opt_value_from_str("--config")?,
        capacity: args.opt_value_from_str("--capacity")?,
        export_path: args.opt_value_from_str("--export-diagnostics")?,
    };
    let rest = args.finish();
    if !rest.is_empty() {
        tracing::warn!(?rest, "ignoring unexpected arguments");
    }
    Ok(Some(flags))
}

fn load_config(flags: &Flags) -> (Config, Option<String>) {
    let (mut config, warning) = match &flags.config_path {
        Some(path) => match config::load_from_path(path) {
            Ok(config) => (config, None),
            Err(err) => {
                tracing::warn!(path = %path.display(), %err, "falling back to default config");
                (
                    Config::default(),
                    Some("notification-config-load-error".to_string()),
                )
            }
        },
        None => config::load(),
    };
    if let Some(capacity) = flags.capacity {
        config.queue.max_capacity = Capacity::new(capacity);
    }
    (config, warning)
}

fn print_board(board: &Board) {
    println!("--- {} live ---", board.len());
    for group in board.groups() {
        println!("[{}]", group.position);
        for toast in &group.toasts {
            let progress = if toast.show_progress {
                format!("{:5.1}%", toast.progress_pct)
            } else {
                "  ---".to_string()
            };
            let paused = if toast.paused { " (paused)" } else { "" };
            println!(
                "  {} {} {}: {} {progress}{paused}",
                toast.id, toast.icon, toast.title, toast.message
            );
        }
    }
}

async fn run_session(toasts: ToastService, warning: Option<String>) {
    let mut toasts = toasts;

    if let Some(key) = warning {
        toasts.warning(
            format!("Settings could not be read ({key}); using defaults."),
            NotificationOptions::new().title("Configuration"),
        );
    }

    toasts.quiz_started("Ownership and borrowing");
    let hovered = toasts.info(
        "Hover keeps this one on screen for a while.",
        NotificationOptions::new().position(Position::BottomRight),
    );
    toasts.export_ready("results.csv", |n| {
        tracing::info!(id = %n.id(), "download requested");
    });
    let export = toasts
        .query_by_position(Position::TopRight)
        .into_iter()
        .find(|n| n.clickable())
        .map(|n| n.id());
    toasts.network_error();
    toasts.submit(
        NotificationOptions::new()
            .severity(Severity::Warning)
            .title("Battery")
            .message("Battery below 15%")
            .position(Position::BottomLeft)
            .duration_ms(2_000),
    );
    toasts.quiz_completed(17, 20);

    toasts.hover_enter(hovered);
    if let Some(export) = export {
        toasts.handle_activation(export);
    }

    let mut elapsed = Duration::ZERO;
    loop {
        print_board(&toasts.board());
        if toasts.notifications().iter().all(|n| n.is_persistent()) {
            break;
        }
        if elapsed >= Duration::from_secs(3) {
            toasts.hover_leave(hovered);
        }
        tokio::time::sleep(BOARD_REFRESH).await;
        elapsed += BOARD_REFRESH;
    }

    let cleared = toasts.clear_all();
    tracing::info!(cleared, "session finished");
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let flags = match parse_flags() {
        Ok(Some(flags)) => flags,
        Ok(None) => {
            print!("{HELP}");
            return ExitCode::SUCCESS;
        }
        Err(err) => {
            eprintln!("error: {err}\n\n{HELP}");
            return ExitCode::from(2);
        }
    };

    let (config, warning) = load_config(&flags);
    let mut collector = DiagnosticsCollector::new(config.diagnostics.buffer_capacity);
    let toasts = ToastService::from_config(&config, Some(collector.handle()));

    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            eprintln!("error: failed to start runtime: {err}");
            return ExitCode::FAILURE;
        }
    };
    let local = tokio::task::LocalSet::new();
    local.block_on(&runtime, run_session(toasts, warning));

    collector.process_pending();
    if let Some(path) = flags.export_path {
        if let Err(err) = collector.export_to_file(&path) {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
        tracing::info!(path = %path.display(), events = collector.len(), "diagnostics exported");
    }
    ExitCode::SUCCESS
}
