//! Infinite Runner entry point
//!
//! On web the crate is loaded as a library (`web::WebRunner`). Natively this
//! binary runs a headless autopilot demo of each variant.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use infinite_runner::consts::FRAME_MS;
    use infinite_runner::sim::{Command, GameEvent, Phase, autopilot};
    use infinite_runner::{MemoryStore, Runner, Variant};

    env_logger::init();

    let mut args = std::env::args().skip(1);
    let variants: Vec<Variant> = match args.next() {
        Some(name) if name != "all" => match Variant::from_str(&name) {
            Some(variant) => vec![variant],
            None => {
                eprintln!("Unknown variant '{name}' (side-jumper, perspective-lanes, top-down-lanes, all)");
                std::process::exit(2);
            }
        },
        _ => Variant::ALL.to_vec(),
    };
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(2024);
    let seconds: f64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(60.0);

    log::info!("Infinite Runner (native demo) starting...");

    for variant in variants {
        let mut runner = Runner::new(variant.config(), seed, MemoryStore::new());
        runner.push(Command::Start);

        let frames = (seconds * 1000.0 / FRAME_MS) as u64;
        let mut now = 0.0;
        let mut jumps = 0u32;
        let mut lane_changes = 0u32;
        for _ in 0..frames {
            if runner.phase() == Phase::Playing {
                if let Some(command) = autopilot(runner.session()) {
                    runner.push(command);
                }
            }
            for event in runner.frame(now) {
                match event {
                    GameEvent::Jumped | GameEvent::DoubleJumped => jumps += 1,
                    GameEvent::LaneChanged { .. } => lane_changes += 1,
                    _ => {}
                }
            }
            if runner.phase() == Phase::GameOver {
                break;
            }
            now += FRAME_MS;
        }

        let session = runner.session();
        println!(
            "{:<18} score {:>5}  best {:>5}  difficulty {:.2}  jumps {:>3}  lane changes {:>3}  {}",
            variant.as_str(),
            session.score,
            runner.best_score(),
            session.difficulty,
            jumps,
            lane_changes,
            if session.phase == Phase::GameOver { "crashed" } else { "survived" },
        );
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::wasm_start, this is just to satisfy the compiler
}
