//! Hero Driver - headless frame driver for the chaos/order hero scene
//!
//! Reads newline-delimited JSON input events on stdin, runs the proximity
//! simulation on a fixed-rate display clock and writes one JSON line per
//! frame to stdout containing only the shapes, slots and lines that changed.
//! Logs go to stderr.
//!
//! Settings locations:
//! - Linux: ~/.config/chaos_order/driver.json
//! - Windows: %APPDATA%\chaos_order\driver.json
//! - MacOS: ~/Library/Application Support/chaos_order/driver.json

use std::path::PathBuf;
use std::time::Duration;

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader, Stdout};
use tokio::time::{self, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

mod driver;
mod error;
mod paths;
mod protocol;
mod settings;

use driver::{Control, Driver};
use error::DriverError;
use paths::AppPaths;
use protocol::{InputEvent, Output};
use settings::DriverSettings;

#[tokio::main]
async fn main() -> Result<(), DriverError> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() >= 2 && (args[1] == "--help" || args[1] == "-h" || args[1] == "help") {
        print_help();
        return Ok(());
    }
    let explicit_config = match args.get(1).map(String::as_str) {
        Some("--config") => match args.get(2) {
            Some(p) => Some(PathBuf::from(p)),
            None => {
                eprintln!("--config needs a path");
                print_help();
                std::process::exit(2);
            }
        },
        Some(other) => {
            eprintln!("Unknown argument: {other}");
            print_help();
            std::process::exit(2);
        }
        None => None,
    };

    // Logs on stderr; stdout carries the frame stream.
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let settings = match explicit_config {
        Some(path) => {
            info!("Settings file: {:?}", path);
            DriverSettings::load(&path, true)?
        }
        None => {
            let paths = AppPaths::new()?;
            info!("Config directory: {:?}", paths.config_dir());
            DriverSettings::load(&paths.settings_file(), false)?
        }
    };

    let mut driver = Driver::new(&settings);
    info!(
        breakpoint = driver.scene().breakpoint().label(),
        fps = settings.fps,
        reduced_motion = settings.reduced_motion,
        "hero driver started"
    );

    let token = CancellationToken::new();
    {
        let token = token.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                token.cancel();
            }
        });
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();
    let mut ticker = time::interval(Duration::from_millis(settings.frame_millis()));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
    let started = time::Instant::now();

    loop {
        tokio::select! {
            _ = token.cancelled() => {
                info!("Ctrl-C: shutting down");
                break;
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    info!("stdin closed; shutting down");
                    break;
                };
                if handle_line(&mut driver, &line, &mut stdout).await? {
                    info!("Shutdown requested");
                    break;
                }
            }
            _ = ticker.tick() => {
                if let Some(out) = driver.frame(started.elapsed().as_secs_f32()) {
                    write_line(&mut stdout, &out).await?;
                }
            }
        }
    }

    stdout.flush().await?;
    Ok(())
}

/// Returns true when the line asked for shutdown.
async fn handle_line(driver: &mut Driver, line: &str, stdout: &mut Stdout) -> Result<bool, DriverError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(false);
    }
    let event: InputEvent = match serde_json::from_str(line) {
        Ok(ev) => ev,
        Err(e) => {
            warn!("Ignoring invalid input: {}", e);
            let out = Output::Error {
                message: format!("Invalid input: {}", e),
            };
            write_line(stdout, &out).await?;
            return Ok(false);
        }
    };
    match driver.handle(event) {
        Control::Continue => Ok(false),
        Control::Reply(out) => {
            write_line(stdout, &out).await?;
            Ok(false)
        }
        Control::Shutdown => Ok(true),
    }
}

async fn write_line(stdout: &mut Stdout, out: &Output) -> Result<(), DriverError> {
    let mut buf = serde_json::to_vec(out)?;
    buf.push(b'\n');
    stdout.write_all(&buf).await?;
    stdout.flush().await?;
    Ok(())
}

fn print_help() {
    println!("hero-driver (chaos/order hero frame driver)");
    println!("usage:");
    println!("  hero-driver");
    println!("  hero-driver --config PATH");
    println!("  hero-driver --help");
    println!();
    println!("stdin:  one JSON event per line, e.g. {{\"type\":\"pointer_move\",\"x\":120,\"y\":60}}");
    println!("stdout: one JSON frame per line");
}
