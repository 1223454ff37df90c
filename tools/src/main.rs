//! synth-runner: prints the dashboard's synthetic compliance data.
//!
//! Usage:
//!   synth-runner --identifier APP-001 --state approved
//!   synth-runner --data-dir ./data --ipc-mode

use anyhow::Result;
use kyb_synth_core::{
    deviation::Deviation,
    report::{ComplianceCategory, ReportSummary},
    seed::derive_seed,
    types::{Identifier, LifecycleState, Seed, DEFAULT_IDENTIFIER},
    SyntheticGenerator,
};
use std::env;
use std::io::{self, BufRead, Write};

#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    Report {
        #[serde(default = "default_identifier")]
        identifier: Identifier,
    },
    Deviations {
        #[serde(default = "default_identifier")]
        identifier: Identifier,
        #[serde(default = "default_state")]
        lifecycle_state: LifecycleState,
    },
    Quit,
}

#[derive(serde::Serialize)]
struct ApplicationView {
    identifier: Identifier,
    seed: Seed,
    report: Vec<ComplianceCategory>,
    summary: ReportSummary,
    deviations: Vec<Deviation>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let identifier = string_arg(&args, "--identifier").unwrap_or(DEFAULT_IDENTIFIER);
    let state = LifecycleState::from_label(string_arg(&args, "--state").unwrap_or("pending"));
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");

    let generator = match string_arg(&args, "--data-dir") {
        Some(dir) => SyntheticGenerator::from_data_dir(dir)?,
        None => SyntheticGenerator::builtin(),
    };

    if ipc_mode {
        let stdin = io::stdin();
        run_ipc_loop(&generator, stdin.lock(), &mut io::stdout())?;
    } else {
        let view = build_view(&generator, identifier, state);
        println!("{}", serde_json::to_string_pretty(&view)?);
    }

    Ok(())
}

fn run_ipc_loop(
    generator: &SyntheticGenerator,
    mut input: impl BufRead,
    output: &mut impl Write,
) -> Result<()> {
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = input.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        match handle_line(generator, &buffer) {
            Some(reply) => writeln!(output, "{}", reply)?,
            None => break,
        }
        output.flush()?;
    }
    Ok(())
}

/// Answer one IPC command line. `None` means quit.
fn handle_line(generator: &SyntheticGenerator, line: &str) -> Option<serde_json::Value> {
    let cmd: IpcCommand = match serde_json::from_str(line) {
        Ok(c) => c,
        Err(e) => {
            log::warn!("bad ipc command: {e}");
            return Some(serde_json::json!({ "error": e.to_string() }));
        }
    };

    match cmd {
        IpcCommand::Quit => None,
        IpcCommand::Report { identifier } => {
            let report = generator.build_report(&identifier);
            let summary = ReportSummary::from_categories(&report);
            Some(serde_json::json!({ "report": report, "summary": summary }))
        }
        IpcCommand::Deviations { identifier, lifecycle_state } => {
            let deviations = generator.build_deviations(&identifier, lifecycle_state);
            Some(serde_json::json!({ "deviations": deviations }))
        }
    }
}

fn build_view(generator: &SyntheticGenerator, identifier: &str, state: LifecycleState) -> ApplicationView {
    let report = generator.build_report(identifier);
    ApplicationView {
        identifier: identifier.to_string(),
        seed: derive_seed(identifier),
        summary: ReportSummary::from_categories(&report),
        report,
        deviations: generator.build_deviations(identifier, state),
    }
}

fn string_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn default_identifier() -> Identifier {
    DEFAULT_IDENTIFIER.to_string()
}

fn default_state() -> LifecycleState {
    LifecycleState::Pending
}
