// Small ops utility: re-derive lifecycle state for every animal in a herd
// snapshot and print the pending alerts as a daily report.
//
// Usage:
//   cargo run --bin herd_report -- [snapshot_path] [config_path]
//
// The snapshot is a JSON export from the herd management system; derived
// state changes are printed but not written back.

use chrono::Local;
use serde::Deserialize;
use std::error::Error;
use std::sync::Arc;

use herd_lifecycle_engine::config::StaticHerdConfig;
use herd_lifecycle_engine::domain::{Alert, CattleMaster, CattleState, PeriodicCareRecord};
use herd_lifecycle_engine::engine::{AlertEngine, LifecycleCoordinator};
use herd_lifecycle_engine::i18n::{t, t_with_args};
use herd_lifecycle_engine::{logging, AlertPriority};

const DEFAULT_SNAPSHOT_PATH: &str = "herd_snapshot.json";
const DEFAULT_CONFIG_PATH: &str = "herd_config.json";

#[derive(Debug, Deserialize)]
struct HerdSnapshot {
    animals: Vec<AnimalSnapshot>,
    #[serde(default)]
    care_records: Vec<PeriodicCareRecord>,
}

#[derive(Debug, Deserialize)]
struct AnimalSnapshot {
    master: CattleMaster,
    state: CattleState,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    logging::init();

    let mut args = std::env::args().skip(1);
    let snapshot_path = args.next().unwrap_or_else(|| DEFAULT_SNAPSHOT_PATH.to_string());
    let config_path = args.next().unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    let snapshot = load_snapshot(&snapshot_path)?;
    let config = Arc::new(StaticHerdConfig::load_or_default(&config_path)?);
    let coordinator = LifecycleCoordinator::new(config);

    let today = Local::now().naive_local().date();
    let animal_count = snapshot.animals.len();

    // Re-derive each animal; care alerts are handled once at herd level
    // to avoid reporting the same due item per animal and per record.
    let mut all_alerts: Vec<Alert> = Vec::new();
    let mut changed_count = 0usize;
    for entry in snapshot.animals {
        let mut state = entry.state;
        let outcome = coordinator
            .refresh_daily(&entry.master, &mut state, &[], today)
            .await?;
        if outcome.changed {
            changed_count += 1;
        }
        all_alerts.extend(outcome.alerts);
    }

    let care_outcome = coordinator.scan_due_care(&snapshot.care_records, today);
    all_alerts.extend(care_outcome.alerts.iter().cloned());
    AlertEngine::new().sort_for_presentation(&mut all_alerts);

    print_report(
        today,
        animal_count,
        changed_count,
        &all_alerts,
        &care_outcome.updated_records,
    );

    Ok(())
}

fn load_snapshot(path: &str) -> Result<HerdSnapshot, Box<dyn Error>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| format!("{} ({})", t_with_args("config.file_not_found", &[("path", path)]), e))?;
    let snapshot: HerdSnapshot = serde_json::from_str(&content)?;
    Ok(snapshot)
}

fn print_report(
    today: chrono::NaiveDate,
    animal_count: usize,
    changed_count: usize,
    alerts: &[Alert],
    due_care: &[PeriodicCareRecord],
) {
    println!("===== {} ({}) =====", t("report.title"), today);
    println!(
        "{} (changed: {})",
        t_with_args("report.animal_count", &[("count", &animal_count.to_string())]),
        changed_count
    );
    println!();

    if alerts.is_empty() {
        println!("{}", t("report.no_alerts"));
    } else {
        println!("--- {} ---", t("report.alert_section"));
        for alert in alerts {
            println!(
                "[{}] {} {} (due: {})",
                priority_label(alert.priority),
                alert.ear_tag,
                alert.message,
                alert.due_date
            );
        }
    }

    if !due_care.is_empty() {
        println!();
        println!("--- {} ---", t("report.care_section"));
        for record in due_care {
            println!(
                "{} {} (due: {})",
                record.ear_tag, record.name, record.next_due_date
            );
        }
    }
}

fn priority_label(priority: AlertPriority) -> String {
    match priority {
        AlertPriority::Emergency => t("priority.emergency"),
        AlertPriority::High => t("priority.high"),
        AlertPriority::Medium => t("priority.medium"),
        AlertPriority::Low => t("priority.low"),
    }
}
