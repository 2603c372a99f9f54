//! basic — the six-room reference sweep.
//!
//! Two responders enter a 30 m corridor from opposite ends and clear six
//! 16 m² offices.  Every strategy is run and compared; the best assignment
//! is replayed under both clearance policies and written to
//! `output/basic/`.
//!
//! Pass a scenario JSON path as the first argument to sweep that building
//! instead.  `RUST_LOG=debug` shows per-build statistics.

use std::io::Cursor;
use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use sweep_nav::Navigator;
use sweep_opt::{optimize_with, Strategy};
use sweep_output::{to_key_value, write_report, CsvWriter};
use sweep_scenario::{load_responders_reader, load_scenario_json, Scenario};
use sweep_sim::{ClearancePolicy, SimConfig, Simulator};

// ── Team CSV ──────────────────────────────────────────────────────────────────

// One responder per exit, default speeds for B.
const TEAM_CSV: &str = "\
id,start,walk_speed,stair_up_speed,stair_down_speed,check_rate,base_check_secs\n\
A,E1,1.5,0.4,0.7,1.0,10\n\
B,E2,,,,,\n\
";

const OUTPUT_DIR: &str = "output/basic";

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    println!("=== basic — building sweep ===");

    // 1. Scenario: a JSON file from the command line, or the reference corridor.
    let scenario = match std::env::args().nth(1).map(PathBuf::from) {
        Some(path) => load_scenario_json(&path).with_context(|| format!("loading {}", path.display()))?,
        None => {
            let team = load_responders_reader(Cursor::new(TEAM_CSV))?;
            Scenario { responders: team, ..Scenario::canonical_basic() }
        }
    };
    println!(
        "Building: {}  |  Rooms: {}  |  Floors: {}  |  Responders: {}",
        scenario.building.name,
        scenario.building.room_count(),
        scenario.building.floor_count(),
        scenario.responders.len(),
    );

    // 2. Lay out and validate.
    let nav: Navigator = scenario.navigator()?;
    println!(
        "Waypoint graph: {} waypoints, {} edges",
        nav.graph().node_count(),
        nav.graph().edge_count()
    );
    println!();

    // 3. Every strategy, same simulator.
    let config = scenario.opt_config();
    let sim = Simulator::new(&scenario.building, &nav, &scenario.responders, config.sim.clone())?;

    println!("{:<18} {:>10} {:>11} {:>12} {:>10}", "Strategy", "Total (s)", "Inversions", "Generations", "Wall (ms)");
    println!("{}", "-".repeat(65));
    let mut best = None;
    for strategy in Strategy::CONCRETE.into_iter().chain([Strategy::Auto]) {
        let t0 = Instant::now();
        let result = optimize_with(&sim, strategy, &config)?;
        let label = if strategy == Strategy::Auto {
            format!("auto → {}", result.strategy)
        } else {
            strategy.to_string()
        };
        println!(
            "{:<18} {:>10.3} {:>11} {:>12} {:>10.1}",
            label,
            result.cost.total_time.as_secs_f64(),
            result.cost.priority_inversions,
            result.generations,
            t0.elapsed().as_secs_f64() * 1e3,
        );
        if best.as_ref().is_none_or(|b: &sweep_opt::Optimized| result.cost < b.cost) {
            best = Some(result);
        }
    }
    let best = best.context("no strategy produced an assignment")?;
    println!();

    // 4. Replay the winner.
    let report = sim.simulate(&best.assignment)?;
    info!(strategy = %best.strategy, total = %report.total_time, "best assignment");
    println!("Best: {}, all rooms clear after {}", best.strategy, report.total_time);
    println!("{:<10} {:<20} {:>10} {:>12}", "Responder", "Rooms", "Time (s)", "Distance (m)");
    println!("{}", "-".repeat(55));
    for r in &report.responders {
        let rooms: Vec<&str> = r
            .rooms
            .iter()
            .filter_map(|&id| scenario.building.room(id).map(|room| room.id.as_str()))
            .collect();
        println!(
            "{:<10} {:<20} {:>10.3} {:>12.1}",
            r.label,
            rooms.join(" "),
            r.total_time.as_secs_f64(),
            r.distance_m,
        );
    }
    println!(
        "Load balance: {:.3}  |  Average clearance: {:.1} s",
        report.metrics.load_balance, report.metrics.average_clearance_secs
    );

    // 5. Same assignment, responders walking back out.
    let back_out = SimConfig { policy: ClearancePolicy::ReturnToExit, ..config.sim.clone() };
    let returned = Simulator::new(&scenario.building, &nav, &scenario.responders, back_out)?.simulate(&best.assignment)?;
    println!("With return to exit: {}", returned.total_time);
    println!();

    // 6. Output.
    std::fs::create_dir_all(OUTPUT_DIR)?;
    let mut writer = CsvWriter::new(Path::new(OUTPUT_DIR))?;
    write_report(&mut writer, &report, &scenario.building, &nav)?;
    let text = to_key_value(&report, &scenario.building, &nav)?;
    std::fs::write(Path::new(OUTPUT_DIR).join("result.txt"), &text)?;
    println!("Wrote CSV and key-value results to {OUTPUT_DIR}/");

    Ok(())
}
