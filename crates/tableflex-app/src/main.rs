//! Session replay entry point.

use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::init();

    let Some(path) = std::env::args_os().nth(1).map(PathBuf::from) else {
        eprintln!("usage: tableflex <session.json>");
        return ExitCode::from(2);
    };

    log::info!("Replaying {}", path.display());
    match tableflex_app::replay_file(&path) {
        Ok(report) => {
            log::info!(
                "Replayed {} events ({} size changes)",
                report.events,
                report.size_changes
            );
            match report.grid.to_json() {
                Ok(json) => {
                    println!("{}", json);
                    ExitCode::SUCCESS
                }
                Err(e) => {
                    log::error!("{}", e);
                    ExitCode::FAILURE
                }
            }
        }
        Err(e) => {
            log::error!("{}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
