// Demonstration: play one episode of the pursuit environment with a random seeker.
//
// Run from the repo root:
//   RUST_LOG=hideseek=debug cargo run --example random_rollout -- --evaders 2 --seed 7 --max-steps 200

use std::env;
use std::sync::Arc;

use hideseek::maze::GridMap;
use hideseek::sim::{EnvConfig, HideSeekEnv, SeekerAction};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("hideseek=info"));

    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_logging();

    let args: Vec<String> = env::args().collect();
    let evaders: usize = arg_value(&args, "--evaders")
        .and_then(|s| s.parse().ok())
        .unwrap_or(1);
    let seed: u64 = arg_value(&args, "--seed")
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);
    let max_steps: u32 = arg_value(&args, "--max-steps")
        .and_then(|s| s.parse().ok())
        .unwrap_or(100);

    let map = Arc::new(GridMap::classic()?);
    let mut env: HideSeekEnv = HideSeekEnv::new(map, EnvConfig::with_evaders(evaders), seed)?;
    let mut policy = StdRng::seed_from_u64(seed.wrapping_add(1));

    println!("{}", env.render_text());
    while env.steps() < max_steps {
        let action = SeekerAction::all()[policy.gen_range(0..SeekerAction::COUNT)];
        let result = env.step(action)?;
        println!("{}", env.render_text());
        println!(
            "turn {:>4}  action {:<10} reward {:>4}  done {}",
            result.steps, action.to_string(), result.reward, result.terminated
        );
        if result.terminated {
            break;
        }
    }

    tracing::info!(
        steps = env.steps(),
        cumulative_reward = env.cumulative_reward(),
        captured = env.state().evaders.len() - env.state().n_active(),
        "rollout finished"
    );
    Ok(())
}

fn arg_value<'a>(args: &'a [String], key: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == key)
        .and_then(|i| args.get(i + 1))
        .map(|s| s.as_str())
}
