use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use crossterm::style::Stylize;
use itertools::Itertools;
use log::{debug, info};
use rdp_launcher_cli::cli_args::Args;
use rdp_launcher_cli::selection::{confirm_launch, select_or_input, SelectionPrompt};
use rdp_launcher_core::config::{application_directory, display_path};
use rdp_launcher_core::error::Result;
use rdp_launcher_core::history::{load_history, ConnectionHistory, JsonFormat, LoadOutcome};
use rdp_launcher_core::launcher::RemoteDesktopClient;
use rdp_launcher_core::validation::{parse_monitor_ids, validate_hostname};
use rdp_launcher_core::workflow::{generate_connection_file, Locations};

/// Values collected from the user
struct Answers {
    hostname: String,
    monitor_input: String,
}

fn load_connection_history(locations: &Locations) -> ConnectionHistory {
    match load_history(&locations.config_path) {
        LoadOutcome::Loaded(history) => {
            debug!(
                "Loaded {} hostnames and {} monitor configurations from `{}`",
                history.hostnames.len(),
                history.monitor_configs.len(),
                locations.config_path.display()
            );
            history
        }
        LoadOutcome::Absent => {
            debug!("No history at `{}`", locations.config_path.display());
            ConnectionHistory::default()
        }
        LoadOutcome::Corrupt(e) => {
            debug!("Ignoring unreadable history: {e}");
            ConnectionHistory::default()
        }
    }
}

/// Asks for the hostname and monitor IDs. `None` if the user quit.
fn collect_answers(history: &ConnectionHistory) -> Result<Option<Answers>> {
    let hostnames: Vec<String> = history.hostnames.iter().cloned().collect();
    let hostname = select_or_input(&SelectionPrompt {
        title: "Select or enter a hostname",
        choices: &hostnames,
        new_value_label: "Enter a new hostname",
        input_label: "Hostname",
    })?;

    let Some(hostname) = hostname else {
        return Ok(None);
    };
    validate_hostname(&hostname)?;
    println!("Hostname: {}", hostname.as_str().cyan());

    let monitor_configs: Vec<String> = history.monitor_configs.iter().cloned().collect();
    let monitor_input = select_or_input(&SelectionPrompt {
        title: "Select or enter monitor IDs (e.g. 0,1,2)",
        choices: &monitor_configs,
        new_value_label: "Enter a new monitor configuration",
        input_label: "Monitor IDs (comma separated)",
    })?;

    let Some(monitor_input) = monitor_input else {
        return Ok(None);
    };
    let monitor_ids = parse_monitor_ids(&monitor_input)?;
    println!("Monitors: {}", monitor_ids.iter().join(", ").cyan());

    Ok(Some(Answers {
        hostname,
        monitor_input,
    }))
}

fn launch(client: &RemoteDesktopClient, output_path: &Path) {
    match client.launch(output_path) {
        Ok(()) => println!("{}", "Remote desktop client started.".green()),
        Err(e) => eprintln!("{}", e.to_string().red()),
    }
}

fn execute() -> Result<()> {
    let args = Args::parse();

    let base_dir = application_directory()?;
    let locations = args.locations(&base_dir);
    debug!("Locations: {:?}", locations);

    // Built once and used for every history write of this run
    let json_format = JsonFormat::default();

    let mut history = load_connection_history(&locations);

    let Some(answers) = collect_answers(&history)? else {
        info!("Cancelled by user, nothing written");
        return Ok(());
    };

    let output_path = generate_connection_file(
        &locations,
        &mut history,
        json_format,
        &answers.hostname,
        &answers.monitor_input,
    )?;

    println!(
        "{}",
        format!(
            "Created connection file: {}",
            display_path(&locations.base_dir, &output_path)
        )
        .green()
    );

    if args.no_launch {
        return Ok(());
    }

    if args.yes || confirm_launch()? {
        launch(&args.client(), &output_path);
    }

    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();

    match execute() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e.to_string().red());
            ExitCode::FAILURE
        }
    }
}
