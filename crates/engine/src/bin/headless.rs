//! Headless driver for the civic simulation.
//!
//! Runs the tick loop at `TICK_HZ` and reads one command per line from stdin.
//! Views and notifications are written to stdout as JSON lines, logs go to
//! stderr. Pass `--ephemeral` to keep progress in memory only.

use std::sync::Arc;
use std::time::Duration;

use civicsim_shared::Notification;
use serde::Serialize;
use tokio::io::{AsyncBufReadExt, BufReader};

use civicsim_engine::infrastructure::clock::SystemClock;
use civicsim_engine::infrastructure::oracle_client::HttpDialogueOracle;
use civicsim_engine::infrastructure::ports::StateStore;
use civicsim_engine::infrastructure::settings::SimulationSettings;
use civicsim_engine::infrastructure::state_store::{InMemoryStateStore, JsonFileStateStore};
use civicsim_engine::use_cases::movement::MoveKey;
use civicsim_engine::use_cases::progress::InteractionRoute;
use civicsim_engine::{CityWorld, Simulation};

const HELP: &str = "commands: start | press <w|a|s|d> | release <w|a|s|d> | interact | confirm | cancel \
| say <text> | submit <text> | close | look | quests | clear | reset | quit";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    civicsim_engine::load_dotenv_from_repo_root();
    civicsim_engine::init_tracing();

    let ephemeral = std::env::args().skip(1).any(|a| a == "--ephemeral");
    let settings = SimulationSettings::from_env();

    let store: Arc<dyn StateStore> = if ephemeral {
        tracing::info!("Ephemeral run; progress will not be saved");
        Arc::new(InMemoryStateStore::new())
    } else {
        tracing::info!(path = %settings.state_path.display(), "Using state file");
        Arc::new(JsonFileStateStore::new(
            settings.state_path.clone(),
            Arc::new(SystemClock::new()),
        ))
    };
    let oracle = Arc::new(HttpDialogueOracle::new(&settings.oracle_base_url));
    tracing::info!(oracle = %settings.oracle_base_url, tick_hz = settings.tick_hz, "Starting headless simulation");

    let world = CityWorld::standard()?;
    let mut sim = Simulation::new(world, store, oracle);

    let period = Duration::from_secs_f32(1.0 / settings.tick_hz as f32);
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut last_prompt = None;

    println!("{}", HELP);

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let frame = sim.tick(period.as_secs_f32());
                for notification in sim.drain_notifications() {
                    emit(&notification);
                    if matches!(
                        notification,
                        Notification::ChatReplied { .. } | Notification::ChatFailed { .. }
                    ) {
                        if let Some(view) = sim.transcript() {
                            emit(&view);
                        }
                    }
                }
                // Only report the zone prompt when it appears or goes away.
                let prompt = frame.zone_prompt.clone();
                if prompt != last_prompt {
                    if let Some(prompt) = &prompt {
                        emit(prompt);
                    }
                    last_prompt = prompt;
                }
            }
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };
                if !run_command(&mut sim, line.trim()) {
                    break;
                }
            }
        }
    }

    tracing::info!("Headless simulation stopped");
    Ok(())
}

/// Returns `false` when the driver should exit.
fn run_command(sim: &mut Simulation, line: &str) -> bool {
    let (command, rest) = match line.split_once(' ') {
        Some((command, rest)) => (command, rest.trim()),
        None => (line, ""),
    };

    match command {
        "" => {}
        "start" => sim.start(),
        "press" | "release" => match rest.parse::<MoveKey>() {
            Ok(key) => sim.set_key(key, command == "press"),
            Err(e) => eprintln!("{}", e),
        },
        "interact" => match sim.interact() {
            Ok(Some(InteractionRoute::Conversation { .. })) => {
                if let Some(view) = sim.transcript() {
                    emit(&view);
                }
            }
            Ok(Some(InteractionRoute::OrdinanceSubmission { .. })) => {
                if let Some(view) = sim.ordinance_form() {
                    emit(&view);
                }
            }
            Ok(None) => eprintln!("nobody to talk to"),
            Err(e) => tracing::warn!(error = %e, "Interaction failed"),
        },
        "confirm" => {
            if !sim.confirm_zone() {
                eprintln!("no zone prompt");
            }
        }
        "cancel" => {
            if !sim.cancel_zone() {
                eprintln!("no zone prompt");
            }
        }
        "say" => {
            if sim.send_chat(rest) {
                if let Some(view) = sim.transcript() {
                    emit(&view);
                }
            } else {
                eprintln!("cannot send right now");
            }
        }
        "submit" => {
            if !sim.submit_ordinance(rest) {
                eprintln!("cannot submit right now");
            }
        }
        "close" => sim.close_panel(),
        "look" => {
            emit(&sim.snapshot());
            if let Some(view) = sim.transcript() {
                emit(&view);
            }
            if let Some(view) = sim.ordinance_result() {
                emit(&view);
            }
        }
        "quests" => emit(&sim.quest_list()),
        "clear" => sim.clear_conversations(),
        "reset" => sim.reset_progress(),
        "quit" | "exit" => return false,
        _ => println!("{}", HELP),
    }
    true
}

fn emit(value: &impl Serialize) {
    match serde_json::to_string(value) {
        Ok(json) => println!("{}", json),
        Err(e) => tracing::warn!(error = %e, "Failed to serialize view"),
    }
}
