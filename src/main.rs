//! Grid Invaders entry point
//!
//! Headless driver for the simulation core: runs a scripted game at a fixed
//! timestep and reports what happened. Useful for smoke-testing determinism
//! and for producing state snapshots a renderer frontend can consume.
//!
//! Usage: grid-invaders [seed] [--dump]

use grid_invaders::sim::{GameEvent, GamePhase, GameState, TickInput, tick};

const DT: f32 = 1.0 / 60.0;
const RUN_SECONDS: f32 = 120.0;

fn main() {
    env_logger::init();

    let mut seed = 0u64;
    let mut dump = false;
    for arg in std::env::args().skip(1) {
        if arg == "--dump" {
            dump = true;
        } else if let Ok(value) = arg.parse() {
            seed = value;
        } else {
            eprintln!("Usage: grid-invaders [seed] [--dump]");
            std::process::exit(2);
        }
    }

    log::info!("Grid Invaders headless run, seed {seed}");
    let mut state = GameState::new(seed);

    // Leave the title screen once the input carry-over window has passed
    let confirm = TickInput {
        confirm: true,
        ..Default::default()
    };
    let quiet = TickInput::default();
    let mut elapsed = 0.0;
    while state.phase == GamePhase::Title && elapsed < 2.0 {
        tick(&mut state, &confirm, DT);
        state.drain_events();
        elapsed += DT;
    }

    // Scripted autopilot: sweep the cannon back and forth, firing steadily
    let mut frame = 0u64;
    let mut kills = 0u32;
    while elapsed < RUN_SECONDS {
        let sweep = frame % 360;
        let input = TickInput {
            move_left: sweep < 150,
            move_right: sweep >= 180 && sweep < 330,
            fire: frame % 11 == 0,
            confirm: false,
        };
        tick(&mut state, &input, DT);
        for event in state.drain_events() {
            if event == GameEvent::EnemyHit {
                kills += 1;
            }
        }
        frame += 1;
        elapsed += DT;
        if state.phase == GamePhase::Title {
            // The run ended and the state machine looped back
            break;
        }
    }

    println!(
        "seed {seed}: {frame} frames, {kills} kills, score {}, wave {}, lives {}, phase {:?}",
        state.score, state.wave, state.lives, state.phase
    );

    if dump {
        match serde_json::to_string_pretty(&state) {
            Ok(json) => println!("{json}"),
            Err(err) => {
                log::error!("Failed to serialize state: {err}");
                std::process::exit(1);
            }
        }
    }
}
