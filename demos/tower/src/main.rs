//! tower — headless runner for the liftsim dispatch simulator.
//!
//! Loads a level (a directory with `customer_spawns.csv` and
//! `spawn_locations.csv`, or the embedded demo level), lets a selection
//! policy play it, writes per-run CSV output and appends the final penalty to
//! `game_history.csv` when every passenger was delivered.

mod level;

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{info, warn};

use lift_core::{CarId, Tick};
use lift_dispatch::{CarDispatcher, CarEvent};
use lift_output::{CsvWriter, GameHistory, HistoryEntry, OutputWriter, SimOutputObserver};
use lift_passenger::Passenger;
use lift_schedule::LevelLoader;
use lift_sim::{
    FixedCar, LeastLoaded, RunConfig, SelectionPolicy, SimBuilder, SimObserver, TickSummary,
};

// ── Command line ──────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PolicyArg {
    /// Fewest boarded plus waiting passengers.
    LeastLoaded,
    /// Everyone takes the car given by `--car`.
    Fixed,
}

#[derive(Debug, Parser)]
#[command(version, about = "Run a lift dispatch level headless and report its penalty")]
struct Args {
    /// Directory holding one folder per level.  Uses the embedded demo level
    /// when omitted.
    #[arg(long)]
    levels: Option<PathBuf>,

    #[arg(long, short, default_value = level::DEMO_LEVEL_NAME)]
    level: String,

    #[arg(long, default_value_t = lift_schedule::DEFAULT_FLOOR_COUNT)]
    floors: u32,

    /// JSON run configuration (clock, car kinematics, walking, car layout).
    #[arg(long, short)]
    config: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = PolicyArg::LeastLoaded)]
    policy: PolicyArg,

    /// Car index for `--policy fixed`.
    #[arg(long, default_value_t = 0)]
    car: u16,

    /// Ignore the level's schedule; every spawn location emits a passenger
    /// each N seconds until the tick limit.
    #[arg(long)]
    random_interval: Option<f64>,

    #[arg(long, default_value_t = 0.2)]
    high_priority_prob: f64,

    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, short, default_value = "output/tower")]
    output: PathBuf,

    #[arg(long, default_value_t = tracing::Level::INFO)]
    log_level: tracing::Level,
}

// ── Observer wrapper to tally per-car work ───────────────────────────────────

struct TallyObserver<W: OutputWriter> {
    inner:      SimOutputObserver<W>,
    departures: Vec<u32>,
    dropped:    Vec<u32>,
    deliveries: usize,
    summaries:  usize,
}

impl<W: OutputWriter> TallyObserver<W> {
    fn new(inner: SimOutputObserver<W>, car_count: usize) -> Self {
        Self {
            inner,
            departures: vec![0; car_count],
            dropped:    vec![0; car_count],
            deliveries: 0,
            summaries:  0,
        }
    }
}

impl<W: OutputWriter> SimObserver for TallyObserver<W> {
    fn on_tick_end(&mut self, tick: Tick, summary: &TickSummary) {
        self.summaries += 1;
        self.inner.on_tick_end(tick, summary);
    }

    fn on_car_event(&mut self, tick: Tick, car: CarId, event: &CarEvent) {
        let slot = car.index();
        match event {
            CarEvent::Departed { .. } => self.departures[slot] += 1,
            CarEvent::Alighted { .. } => self.dropped[slot] += 1,
            _ => {}
        }
        self.inner.on_car_event(tick, car, event);
    }

    fn on_delivered(&mut self, tick: Tick, passenger: &Passenger, penalty: f64) {
        self.deliveries += 1;
        self.inner.on_delivered(tick, passenger, penalty);
    }

    fn on_snapshot(&mut self, tick: Tick, cars: &[CarDispatcher]) {
        self.inner.on_snapshot(tick, cars);
    }

    fn on_sim_end(&mut self, final_tick: Tick) {
        self.inner.on_sim_end(final_tick);
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level)
        .with_target(false)
        .init();

    // 1. Run configuration.
    let mut run = match &args.config {
        Some(path) => load_run_config(path)?,
        None => RunConfig::default(),
    };
    if let Some(seed) = args.seed {
        run.sim.seed = seed;
    }
    let car_count = run.cars.len();

    // 2. Level.
    let level = match &args.levels {
        Some(root) => LevelLoader::new(root)
            .with_floor_count(args.floors)
            .load(&args.level)
            .with_context(|| format!("loading level {:?} from {}", args.level, root.display()))?,
        None => level::demo_level(args.floors).context("loading the embedded demo level")?,
    };
    println!("=== tower — {} ===", args.level);
    println!(
        "Floors: {}  |  Spawn locations: {}  |  Scripted passengers: {}  |  Cars: {car_count}",
        level.floor_count(),
        level.spawn_points().len(),
        level.events().len(),
    );

    // 3. Selection policy.
    let policy: Box<dyn SelectionPolicy> = match args.policy {
        PolicyArg::LeastLoaded => Box::new(LeastLoaded),
        PolicyArg::Fixed => Box::new(FixedCar(CarId(args.car))),
    };

    // 4. Build sim.
    let builder = SimBuilder::from_run_config(run.clone(), policy);
    let builder = match args.random_interval {
        Some(secs) => {
            let spawners = level::random_spawners(&level, secs, args.high_priority_prob)?;
            println!("Random mode: {} spawners, one passenger each per {secs} s", spawners.len());
            builder.level(level::without_events(level)?).random_spawners(spawners)
        }
        None => builder.level(level),
    };
    let mut sim = builder.build()?;

    // 5. Output.
    std::fs::create_dir_all(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    let writer = CsvWriter::new(&args.output)?;
    let mut obs = TallyObserver::new(SimOutputObserver::new(writer), car_count);

    // 6. Run.
    let t0 = Instant::now();
    sim.run(&mut obs)?;
    let elapsed = t0.elapsed();
    if let Some(e) = obs.inner.take_error() {
        warn!(error = %e, "run output is incomplete");
    }

    // 7. Summary.
    let ledger = sim.ledger();
    println!();
    println!("Simulated {:.1} s in {:.3} s", sim.clock().now_secs(), elapsed.as_secs_f64());
    println!("  delivered      : {}", ledger.delivered());
    println!("  total penalty  : {:.2}", ledger.total());
    println!("  mean penalty   : {:.2}", ledger.mean());
    println!("  tick summaries : {} rows", obs.summaries);
    println!("  complete       : {}", sim.is_complete());
    println!();

    println!("{:<6} {:<10} {:<10} {:<8}", "Car", "Trips", "Dropped", "Floor");
    println!("{}", "-".repeat(36));
    for car in sim.cars() {
        let i = car.id().index();
        println!(
            "{:<6} {:<10} {:<10} {:<8}",
            car.name(),
            obs.departures[i],
            obs.dropped[i],
            car.current_floor().0,
        );
    }

    // 8. History.
    if sim.is_complete() && args.random_interval.is_none() {
        let history = GameHistory::open(&args.output)?;
        history.append(&HistoryEntry::now(args.level.as_str(), ledger.total()))?;
        if let Some(best) = history.best_by_level()?.get(&args.level) {
            println!();
            println!("Best penalty for {}: {:.2}", args.level, best.penalty);
        }
    } else {
        info!(delivered = obs.deliveries, "run not complete; history left unchanged");
    }

    Ok(())
}

fn load_run_config(path: &Path) -> Result<RunConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading config {}", path.display()))?;
    let run = serde_json::from_str(&text)
        .with_context(|| format!("parsing config {}", path.display()))?;
    Ok(run)
}
