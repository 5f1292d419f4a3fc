//! Binary entry point: resolve configuration, open the SQLite backend, and
//! drive the Ratatui event loop on the requested route.
use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use bed_capacity_manager::logging::init_tracing;
use bed_capacity_manager::{
    ensure_schema, open_in_memory, run_app, App, AppConfig, CapacityStore, Route,
};

/// Record bed capacity for a facility.
#[derive(Debug, Parser)]
#[command(name = "bed-capacity-manager", version)]
struct Cli {
    /// Facility whose bed capacity is being configured.
    facility_id: i64,

    /// Edit an existing capacity record instead of adding one.
    #[arg(long = "record", value_name = "ID")]
    record_id: Option<i64>,

    /// Start on the facility overview instead of the form.
    #[arg(long, conflicts_with = "record_id")]
    overview: bool,

    /// SQLite database to use (`:memory:` for a throwaway one).
    #[arg(long, env = "BED_CAPACITY_DB", value_name = "PATH")]
    db: Option<PathBuf>,
}

impl Cli {
    fn start_route(&self) -> Route {
        if self.overview {
            Route::FacilityOverview {
                facility_id: self.facility_id,
            }
        } else {
            Route::BedCapacity {
                facility_id: self.facility_id,
                record_id: self.record_id,
            }
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::resolve(cli.db.clone())?;
    init_tracing(&config.log_path)?;

    let conn = if config.uses_in_memory_db() {
        open_in_memory()?
    } else {
        ensure_schema(&config.db_path)?
    };
    info!(db = %config.db_path.display(), start = %cli.start_route(), "starting");

    let mut app = App::new(CapacityStore::new(conn), cli.start_route())?;
    run_app(&mut app)?;

    if let Some(route) = app.finished() {
        info!(path = %route, "bed capacity complete");
        println!("Bed capacity complete. Continue at {route}");
    }
    Ok(())
}
