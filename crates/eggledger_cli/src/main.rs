//! Terminal host for the dashboard core.
//!
//! # Responsibility
//! - Read one command per stdin line and deliver it as a `UiEvent`.
//! - Print every surface update so sessions can be scripted and diffed.

mod commands;
mod console;

use commands::{parse_line, Line, USAGE};
use console::ConsoleSurface;
use eggledger_core::{AppConfig, Dashboard, ModuleKind, Outcome};
use log::{debug, info};
use std::io::{self, BufRead, Write};
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = match AppConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("eggledger: {err}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(err) = config.apply_logging() {
        eprintln!("eggledger: {err}");
        return ExitCode::FAILURE;
    }

    println!("eggledger_core ping={}", eggledger_core::ping());
    println!("eggledger_core version={}", eggledger_core::core_version());

    match run(io::stdin().lock(), io::stdout()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("eggledger: {err}");
            ExitCode::FAILURE
        }
    }
}

fn run(input: impl BufRead, output: impl Write) -> io::Result<()> {
    let mut dashboard = Dashboard::with_system_clock();
    let mut surface = ConsoleSurface::new(output);
    dashboard.refresh_all(&mut surface);
    info!("event=session_start module=cli status=ok");

    for line in input.lines() {
        let line = line?;
        match parse_line(&line) {
            Ok(Line::Event(module, event)) => {
                let outcome = dashboard.handle(module, &event, &mut surface);
                debug!("event=command_done module={module} outcome={outcome:?}");
                if outcome == Outcome::Ignored {
                    eprintln!("(ignored)");
                }
            }
            Ok(Line::Stats(module)) => print_stats(&dashboard, module)?,
            Ok(Line::Help) => println!("{USAGE}"),
            Ok(Line::Quit) => break,
            Ok(Line::Blank) => {}
            Err(err) => eprintln!("eggledger: {err}"),
        }
    }

    info!("event=session_end module=cli status=ok");
    Ok(())
}

fn print_stats(dashboard: &Dashboard, module: ModuleKind) -> io::Result<()> {
    let json = match module {
        ModuleKind::Customers => serde_json::to_string_pretty(&dashboard.customers().stats()),
        ModuleKind::Inventory => serde_json::to_string_pretty(&dashboard.inventory().stats()),
        ModuleKind::Sales => serde_json::to_string_pretty(&dashboard.sales().stats()),
    }
    .map_err(io::Error::other)?;
    println!("{json}");
    Ok(())
}
