use std::error::Error;
use std::thread;
use std::time::Duration;

use chrono::Utc;

use garden_monitor::alert::stalenesses::{ReadingWatch, ensure_fresh_at};
use garden_monitor::alert::thresholds::{AlertSeverity, check_plant_status};
use garden_monitor::analysis::history::{History, format_entry};
use garden_monitor::analysis::status::{PlantStatus, evaluate_all};
use garden_monitor::config::MonitorConfig;
use garden_monitor::dev_mode::Simulator;
use garden_monitor::evaluate::EvaluationPolicy;
use garden_monitor::ingest::backend::BackendClient;
use garden_monitor::logging::{self, Component};
use garden_monitor::model::{GardenError, ParameterKind, PlantProfile, PumpState, SensorReading};
use garden_monitor::{plants, verify};

const USAGE: &str = "usage: garden_monitor [monitor | once | simulate [--post] [--count N] | verify [--json] | plants [add|remove <plant_id>] | pump <on|off|status>]";

#[derive(Debug, PartialEq)]
enum Command {
    Monitor,
    Once,
    Simulate { post: bool, count: usize },
    Verify { json: bool },
    Plants,
    AddPlant(String),
    RemovePlant(String),
    Pump(Option<PumpState>),
}

fn parse_command(args: &[String]) -> Result<Command, GardenError> {
    let usage = || GardenError::Config(USAGE.to_string());
    let rest = args.get(1..).unwrap_or_default();
    match rest.first().map(String::as_str) {
        None | Some("monitor") => Ok(Command::Monitor),
        Some("once") => Ok(Command::Once),
        Some("plants") => match (rest.get(1).map(String::as_str), rest.get(2)) {
            (None, _) => Ok(Command::Plants),
            (Some("add"), Some(id)) => Ok(Command::AddPlant(id.clone())),
            (Some("remove"), Some(id)) => Ok(Command::RemovePlant(id.clone())),
            _ => Err(usage()),
        },
        Some("verify") => Ok(Command::Verify {
            json: rest.iter().any(|a| a == "--json"),
        }),
        Some("simulate") => {
            let mut post = false;
            let mut count = 1;
            let mut flags = rest[1..].iter();
            while let Some(flag) = flags.next() {
                match flag.as_str() {
                    "--post" => post = true,
                    "--count" => {
                        count = flags
                            .next()
                            .and_then(|n| n.parse().ok())
                            .filter(|n| *n > 0)
                            .ok_or_else(usage)?;
                    }
                    _ => return Err(usage()),
                }
            }
            Ok(Command::Simulate { post, count })
        }
        Some("pump") => match rest.get(1).map(String::as_str) {
            Some("status") => Ok(Command::Pump(None)),
            Some(state) => Ok(Command::Pump(Some(state.parse()?))),
            None => Err(usage()),
        },
        Some(_) => Err(usage()),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = std::env::args().collect();
    let command = parse_command(&args)?;

    let config = MonitorConfig::from_env()?;
    logging::init_logger(
        config.logging.level,
        config.logging.file.as_deref(),
        config.logging.console_timestamps,
    );

    match command {
        Command::Monitor => run_monitor(&config),
        Command::Once => run_once(&config),
        Command::Simulate { post, count } => run_simulate(&config, post, count),
        Command::Verify { json } => {
            let report = verify::run_full_verification(&config)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                verify::print_progress(&report);
                verify::print_summary(&report);
            }
            Ok(())
        }
        Command::Plants => {
            let client = BackendClient::from_config(&config.backend)?;
            for profile in load_profiles(&config, &client)? {
                print_profile(&profile);
            }
            Ok(())
        }
        Command::AddPlant(plant_id) => edit_user_plants(&config, &plant_id, true),
        Command::RemovePlant(plant_id) => edit_user_plants(&config, &plant_id, false),
        Command::Pump(state) => run_pump(&config, state),
    }
}

// ---------------------------------------------------------------------------
// Plant catalog
// ---------------------------------------------------------------------------

/// A user's plants from the backend when a user is configured, otherwise
/// the local catalog file or the built-in plants.
fn load_profiles(config: &MonitorConfig, client: &BackendClient) -> Result<Vec<PlantProfile>, GardenError> {
    let profiles = match config.backend.user_id.as_deref() {
        Some(user) => client.user_plants(user)?,
        None => plants::load_catalog(config.monitor.plants_file.as_deref())?,
    };

    let policy = config.policy();
    let unusable: Vec<&str> = profiles
        .iter()
        .filter(|p| match policy {
            EvaluationPolicy::Banded => p.standards().is_none(),
            EvaluationPolicy::Tolerance { .. } => p.ideals().is_none(),
            EvaluationPolicy::FixedThreshold(_) => false,
        })
        .map(|p| p.name.as_str())
        .collect();
    if !unusable.is_empty() {
        logging::warn(
            Component::Plants,
            None,
            &format!(
                "{} policy cannot rate {}; their values will show as unknown",
                policy.name(),
                unusable.join(", ")
            ),
        );
    }

    logging::info(
        Component::Plants,
        None,
        &format!("Monitoring {} plants with the {} policy", profiles.len(), policy.name()),
    );
    Ok(profiles)
}

fn print_profile(profile: &PlantProfile) {
    println!("🌱 {}", profile.name);
    if let Some(builtin) = plants::find_plant(&profile.name) {
        println!("   {}", builtin.description);
    }
    if let Some(standards) = profile.standards() {
        for kind in ParameterKind::ALL {
            let s = standards.get(kind);
            println!("   {:<14} óptimo {}  medio {}  malo {}", kind.to_string(), s.optimal, s.medium, s.poor);
        }
    }
    if let Some(ideals) = profile.ideals() {
        for kind in ParameterKind::ALL {
            match ideals.get(kind) {
                Some(v) => println!("   {:<14} ideal {} {}", kind.to_string(), v, kind.unit()),
                None => println!("   {:<14} ideal --", kind.to_string()),
            }
        }
        if let Some(ppm) = ideals.air_quality {
            println!("   {:<14} ideal {} ppm", "air_quality", ppm);
        }
    }
}

// ---------------------------------------------------------------------------
// Evaluation cycle
// ---------------------------------------------------------------------------

/// Evaluates one reading for every plant, logs alerts and records history.
fn process_reading(
    reading: &SensorReading,
    profiles: &[PlantProfile],
    policy: &EvaluationPolicy,
    history: &mut History,
) -> Vec<PlantStatus> {
    let now = Utc::now();
    let statuses = evaluate_all(profiles, reading, policy);

    let mut healthy = 0;
    let mut attention = 0;
    let mut critical = 0;
    for status in &statuses {
        history.record(&status.plant, reading, now);
        for alert in check_plant_status(status) {
            match alert.severity {
                AlertSeverity::Attention => logging::info(Component::Evaluator, Some(alert.plant.as_str()), &alert.message),
                AlertSeverity::Critical => logging::warn(Component::Evaluator, Some(alert.plant.as_str()), &alert.message),
            }
        }
        for field in status.unknown_fields() {
            logging::debug(
                Component::Evaluator,
                Some(status.plant.as_str()),
                &format!("{} could not be classified", field.title()),
            );
        }
        match status.worst_severity() {
            None => healthy += 1,
            Some(AlertSeverity::Attention) => attention += 1,
            Some(AlertSeverity::Critical) => critical += 1,
        }
    }

    logging::log_cycle_summary(statuses.len(), healthy, attention, critical);
    statuses
}

fn print_statuses(statuses: &[PlantStatus]) {
    for status in statuses {
        let marker = match status.worst_severity() {
            None => "✓",
            Some(AlertSeverity::Attention) => "⚠",
            Some(AlertSeverity::Critical) => "✗",
        };
        println!("\n{} {}", marker, status.plant);
        for field in &status.fields {
            println!("   {}", field.display_line());
        }
    }
}

/// Fetches the latest reading and warns when it is stale.
fn fetch_reading(client: &BackendClient, config: &MonitorConfig) -> Result<SensorReading, GardenError> {
    let reading = client.latest_reading()?;
    if let Err(e) = ensure_fresh_at(&reading, config.monitor.stale_after_minutes, Utc::now()) {
        logging::log_backend_failure(Component::Sensors, "freshness check", &e);
    }
    Ok(reading)
}

fn run_once(config: &MonitorConfig) -> Result<(), Box<dyn Error>> {
    let client = BackendClient::from_config(&config.backend)?;
    let profiles = load_profiles(config, &client)?;
    let mut history = History::new(config.monitor.history_capacity);

    let reading = fetch_reading(&client, config)?;
    let statuses = process_reading(&reading, &profiles, &config.policy(), &mut history);
    print_statuses(&statuses);
    Ok(())
}

fn run_monitor(config: &MonitorConfig) -> Result<(), Box<dyn Error>> {
    let client = BackendClient::from_config(&config.backend)?;
    let profiles = load_profiles(config, &client)?;
    let policy = config.policy();
    let mut history = History::new(config.monitor.history_capacity);
    let interval = Duration::from_secs(config.monitor.poll_interval_secs);

    logging::info(
        Component::System,
        None,
        &format!(
            "Polling {} every {}s",
            client.base_url(),
            config.monitor.poll_interval_secs
        ),
    );

    let mut watch = ReadingWatch::new();
    loop {
        match client.latest_reading() {
            Ok(reading) => {
                if let Some(e) =
                    watch.stale_warning_at(&reading, config.monitor.stale_after_minutes, Utc::now())
                {
                    logging::log_backend_failure(Component::Sensors, "freshness check", &e);
                }
                if watch.observe(&reading) {
                    process_reading(&reading, &profiles, &policy, &mut history);
                    if let Some(entry) = profiles.first().and_then(|p| history.latest_for(&p.name)) {
                        logging::debug(Component::Sensors, None, &format_entry(entry));
                    }
                } else {
                    logging::debug(Component::Sensors, None, "No new reading since last poll");
                }
            }
            Err(e) => logging::log_backend_failure(Component::Sensors, "latest reading", &e),
        }
        thread::sleep(interval);
    }
}

fn run_simulate(config: &MonitorConfig, post: bool, count: usize) -> Result<(), Box<dyn Error>> {
    let client = BackendClient::from_config(&config.backend)?;
    let profiles = if post {
        load_profiles(config, &client)?
    } else {
        plants::load_catalog(config.monitor.plants_file.as_deref())?
    };
    let policy = config.policy();
    let simulator = Simulator::new();
    let mut rng = rand::rng();
    let mut history = History::new(config.monitor.history_capacity);

    for i in 0..count {
        let reading = simulator.next_reading(&mut rng);
        if post {
            match client.post_reading(&reading) {
                Ok(()) => logging::info(Component::Sensors, None, "Posted simulated reading"),
                Err(e) => logging::log_backend_failure(Component::Sensors, "post reading", &e),
            }
        }
        let statuses = process_reading(&reading, &profiles, &policy, &mut history);
        print_statuses(&statuses);
        if i + 1 < count {
            thread::sleep(Duration::from_secs(config.monitor.poll_interval_secs));
        }
    }

    println!("\n📜 History");
    for entry in history.entries() {
        println!("{}\n", format_entry(entry));
    }
    Ok(())
}

/// Adds or removes a catalog plant on the configured user's list.
fn edit_user_plants(config: &MonitorConfig, plant_id: &str, add: bool) -> Result<(), Box<dyn Error>> {
    let user = config.backend.user_id.as_deref().ok_or_else(|| {
        GardenError::Config("GARDEN_USER_ID is required to edit a user's plants".to_string())
    })?;
    let client = BackendClient::from_config(&config.backend)?;
    if add {
        client.add_user_plant(user, plant_id)?;
        logging::info(Component::Plants, None, &format!("Added plant {} for user {}", plant_id, user));
    } else {
        client.remove_user_plant(user, plant_id)?;
        logging::info(Component::Plants, None, &format!("Removed plant {} for user {}", plant_id, user));
    }
    for profile in client.user_plants(user)? {
        println!("🌱 {} ({})", profile.name, profile.id.as_deref().unwrap_or("--"));
    }
    Ok(())
}

fn run_pump(config: &MonitorConfig, state: Option<PumpState>) -> Result<(), Box<dyn Error>> {
    let client = BackendClient::from_config(&config.backend)?;
    if let Some(state) = state {
        client.set_pump_state(state)?;
        logging::info(Component::Pump, None, &format!("Pump switched {}", state));
    }
    println!("💧 Bomba: {}", client.pump_state()?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        std::iter::once("garden_monitor")
            .chain(list.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn test_default_command_is_monitor() {
        assert_eq!(parse_command(&args(&[])), Ok(Command::Monitor));
        assert_eq!(parse_command(&args(&["once"])), Ok(Command::Once));
    }

    #[test]
    fn test_simulate_flags() {
        assert_eq!(
            parse_command(&args(&["simulate"])),
            Ok(Command::Simulate { post: false, count: 1 })
        );
        assert_eq!(
            parse_command(&args(&["simulate", "--count", "5", "--post"])),
            Ok(Command::Simulate { post: true, count: 5 })
        );
        assert!(parse_command(&args(&["simulate", "--count", "0"])).is_err());
        assert!(parse_command(&args(&["simulate", "--loud"])).is_err());
    }

    #[test]
    fn test_pump_commands() {
        assert_eq!(parse_command(&args(&["pump", "on"])), Ok(Command::Pump(Some(PumpState::On))));
        assert_eq!(parse_command(&args(&["pump", "status"])), Ok(Command::Pump(None)));
        assert_eq!(
            parse_command(&args(&["pump", "maybe"])),
            Err(GardenError::InvalidPumpState("maybe".to_string()))
        );
        assert!(parse_command(&args(&["pump"])).is_err());
    }

    #[test]
    fn test_plant_list_commands() {
        assert_eq!(parse_command(&args(&["plants"])), Ok(Command::Plants));
        assert_eq!(
            parse_command(&args(&["plants", "add", "66a1"])),
            Ok(Command::AddPlant("66a1".to_string()))
        );
        assert_eq!(
            parse_command(&args(&["plants", "remove", "66a1"])),
            Ok(Command::RemovePlant("66a1".to_string()))
        );
        assert!(parse_command(&args(&["plants", "add"])).is_err());
        assert!(parse_command(&args(&["plants", "rename", "66a1"])).is_err());
    }

    #[test]
    fn test_unknown_command_is_usage_error() {
        assert!(matches!(parse_command(&args(&["water"])), Err(GardenError::Config(_))));
        assert_eq!(parse_command(&args(&["verify", "--json"])), Ok(Command::Verify { json: true }));
    }
}
