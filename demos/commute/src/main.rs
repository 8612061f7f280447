//! commute — an evening commute on the rust_statesim scheduling core.
//!
//! Every agent finishes work at a jittered time, optionally waits for a
//! vehicle (giving up and walking after a timeout), travels home and stops.
//! Two iterations are run with different seeds; the second removes one agent
//! mid-run to show dropped-callback accounting.
//!
//! Set `RUST_LOG=debug` to see every schedule, cancel and transition.

use std::path::Path;
use std::time::Instant;

use anyhow::Result;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

use ss_agent::AgentStoreBuilder;
use ss_core::{AgentId, AgentRng, CallbackHandle, DanglingPolicy, SimConfig, StateId, Tick};
use ss_output::{CsvWriter, IterationStats, SimOutputObserver};
use ss_schedule::Action;
use ss_sim::{Sim, SimBuilder};
use ss_state::{
    Reaction, ScheduledCallback, StateContext, StateListener, TerminalState, cancel_all,
};

// ── Constants ─────────────────────────────────────────────────────────────────

const AGENT_COUNT:        usize = 12;
const SEED:               u64   = 42;
const TICK_DURATION_SECS: u32   = 60;      // 1 tick = 1 minute
const SIM_TICKS:          u64   = 24 * 60; // one day
const ITERATIONS:         u32   = 2;

const SHIFT_END:          u64   = 17 * 60;
const SHIFT_SPREAD:       u64   = 60;
const TRANSIT_SHARE:      f64   = 0.4;
const WAIT_TIMEOUT:       u64   = 15;

// ── Actions and states ────────────────────────────────────────────────────────

#[derive(Clone, Debug, PartialEq, Eq)]
enum Commute {
    EndActivity,
    VehicleArrived,
    GiveUpWaiting,
    Arrive,
}

impl Action for Commute {
    fn name(&self) -> &str {
        match self {
            Commute::EndActivity    => "EndActivity",
            Commute::VehicleArrived => "VehicleArrived",
            Commute::GiveUpWaiting  => "GiveUpWaiting",
            Commute::Arrive         => "Arrive",
        }
    }
}

const IN_ACTIVITY: StateId = StateId(0);
const WAITING:     StateId = StateId(1);
const TRAVELING:   StateId = StateId(2);
const HOME:        StateId = StateId(3);

/// At work until a jittered end of shift.
struct InActivity;

impl StateListener<Commute> for InActivity {
    fn name(&self) -> &str {
        "in-activity"
    }

    fn on_enter(&self, _ctx: &StateContext<'_>, rng: &mut AgentRng) -> Vec<ScheduledCallback<Commute>> {
        let end = rng.jitter(SHIFT_END, SHIFT_SPREAD);
        vec![ScheduledCallback::new(Tick(end), Commute::EndActivity)]
    }

    fn on_action(&self, _ctx: &StateContext<'_>, action: &Commute, rng: &mut AgentRng) -> Reaction {
        match action {
            Commute::EndActivity if rng.gen_bool(TRANSIT_SHARE) => Reaction::TransitionTo(WAITING),
            Commute::EndActivity => Reaction::TransitionTo(TRAVELING),
            _ => Reaction::Stay,
        }
    }
}

/// At a stop.  Whichever of the vehicle and the timeout comes first wins;
/// the other is cancelled on exit.
struct WaitingForVehicle;

impl StateListener<Commute> for WaitingForVehicle {
    fn name(&self) -> &str {
        "waiting"
    }

    fn on_enter(&self, ctx: &StateContext<'_>, rng: &mut AgentRng) -> Vec<ScheduledCallback<Commute>> {
        let headway = rng.gen_range(2..25u64);
        vec![
            ScheduledCallback::new(ctx.after(headway), Commute::VehicleArrived),
            ScheduledCallback::new(ctx.after(WAIT_TIMEOUT), Commute::GiveUpWaiting),
        ]
    }

    fn on_exit(&self, ctx: &StateContext<'_>, _rng: &mut AgentRng) -> Vec<CallbackHandle> {
        cancel_all(ctx)
    }

    fn on_action(&self, _ctx: &StateContext<'_>, action: &Commute, _rng: &mut AgentRng) -> Reaction {
        match action {
            Commute::VehicleArrived | Commute::GiveUpWaiting => Reaction::TransitionTo(TRAVELING),
            _ => Reaction::Stay,
        }
    }
}

/// En route home.
struct Traveling;

impl StateListener<Commute> for Traveling {
    fn name(&self) -> &str {
        "traveling"
    }

    fn on_enter(&self, ctx: &StateContext<'_>, rng: &mut AgentRng) -> Vec<ScheduledCallback<Commute>> {
        vec![ScheduledCallback::new(ctx.after(rng.jitter(30, 15)), Commute::Arrive)]
    }

    fn on_exit(&self, ctx: &StateContext<'_>, _rng: &mut AgentRng) -> Vec<CallbackHandle> {
        cancel_all(ctx)
    }

    fn on_action(&self, _ctx: &StateContext<'_>, action: &Commute, _rng: &mut AgentRng) -> Reaction {
        match action {
            Commute::Arrive => Reaction::TransitionTo(HOME),
            _ => Reaction::Stay,
        }
    }
}

fn build_sim(seed: u64) -> Result<Sim<Commute>> {
    let config = SimConfig {
        start_unix_secs:    1_700_000_000, // fixed reference Monday 00:00 UTC
        tick_duration_secs: TICK_DURATION_SECS,
        total_ticks:        SIM_TICKS,
        seed,
        dangling_policy:    DanglingPolicy::Fail,
    };
    let (store, rngs) = AgentStoreBuilder::new(AGENT_COUNT, seed).build();
    let sim = SimBuilder::new(config, store, rngs)
        .listener(IN_ACTIVITY, InActivity)
        .listener(WAITING, WaitingForVehicle)
        .listener(TRAVELING, Traveling)
        .listener(HOME, TerminalState)
        .initial_state(IN_ACTIVITY)
        .build()?;
    Ok(sim)
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();

    println!("=== commute — rust_statesim ===");
    println!("Agents: {AGENT_COUNT}  |  Iterations: {ITERATIONS}  |  Seed: {SEED}");
    println!();

    let out_dir = Path::new("output/commute");
    let mut stats = IterationStats::new();

    for iteration in 0..ITERATIONS {
        let mut sim = build_sim(SEED + iteration as u64)?;
        let iter_dir = out_dir.join(format!("iter_{iteration}"));
        std::fs::create_dir_all(&iter_dir)?;
        let writer = CsvWriter::new(&iter_dir)?;

        stats.begin_iteration(iteration);
        let mut obs = (SimOutputObserver::new(writer, &sim.config), stats);

        let t0 = Instant::now();
        if iteration == 1 {
            // The last agent is called away before its shift ends.
            sim.run_until(Tick(SHIFT_END - SHIFT_SPREAD), &mut obs)?;
            sim.remove_agent(AgentId(AGENT_COUNT as u32 - 1))?;
        }
        sim.run(&mut obs)?;
        let elapsed = t0.elapsed();

        let (mut output, returned) = obs;
        stats = returned;
        if let Some(e) = output.take_error() {
            eprintln!("output error: {e}");
        }
        stats.finish_iteration();

        let d = sim.diagnostics();
        let (day, hour, minute) = sim.clock().elapsed_dhm();
        println!("Iteration {iteration} complete in {:.3} ms", elapsed.as_secs_f64() * 1e3);
        println!("  last event     : day {day} {hour:02}:{minute:02}");
        println!("  events fired   : {}", d.events_fired);
        println!("  transitions    : {}", d.transitions);
        println!("  dropped        : {}", d.unknown_targets);
        println!("  still pending  : {}", sim.scheduler().pending());
        println!();
    }

    let stats_path = out_dir.join("iterations.csv");
    stats.write_csv(&stats_path)?;

    println!("{:<10} {:<16} {:>6}", "Iteration", "Action", "Count");
    println!("{}", "-".repeat(34));
    for s in stats.iterations() {
        for (action, count) in &s.actions {
            println!("{:<10} {:<16} {:>6}", s.iteration, action, count);
        }
    }
    println!();
    println!("Per-iteration counts written to {}", stats_path.display());

    Ok(())
}
