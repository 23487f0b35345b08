//! Solves the built-in ESD term timetable and prints the report.
//!
//! ```text
//! u-timetable [PROFILE]
//! ```
//!
//! `PROFILE` selects a preference table (`tuned` by default, or `legacy`).
//! Logging goes to stderr and follows `RUST_LOG` (default `info`).
//!
//! Exit codes: 0 on success, 2 if the instance is infeasible, 1 otherwise.

use std::process::ExitCode;

use log::{error, info};

use u_timetable::dataset::{DatasetProvider, EsdTermDataset};
use u_timetable::error::TimetableError;
use u_timetable::report::TimetableReport;
use u_timetable::scheduler::{TimetableKpi, TimetableScheduler};

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let dataset = EsdTermDataset::new();
    let mut config = dataset.config();
    if let Some(profile) = std::env::args().nth(1) {
        config = config.with_active_profile(profile);
    }
    info!(
        "Loaded '{}': {} jobs, {} groups, profile '{}'",
        dataset.name(),
        config.jobs.len(),
        config.groups.len(),
        config.active_profile
    );

    match TimetableScheduler::new().schedule(&config) {
        Ok(timetable) => {
            println!("{}", TimetableReport::new(&timetable));
            let kpi = TimetableKpi::calculate(&timetable, &config);
            info!(
                "Preference cost {}, congestion penalty {}, peak contended {}",
                kpi.preference_cost, kpi.congestion_penalty, kpi.peak_contended
            );
            info!("Entries per day {:?}", kpi.entries_per_day);
            ExitCode::SUCCESS
        }
        Err(TimetableError::Infeasible) => {
            error!("No timetable satisfies every hard constraint");
            ExitCode::from(2)
        }
        Err(e) => {
            error!("{e}");
            ExitCode::from(1)
        }
    }
}
