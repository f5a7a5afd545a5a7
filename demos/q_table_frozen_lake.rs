use std::{error::Error, fs, path::Path};

use log::info;
use rand::{rngs::StdRng, SeedableRng};
use tabular_rl::{
    algo::tabular::QLearningConfig, evaluate, exploration::select_action, gym::FrozenLake, train,
};

const NUM_EPISODES: u32 = 10_000;
const SEED: u64 = 0;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let path = Path::new("demos/out");
    fs::create_dir_all(path)?;

    let mut env = FrozenLake::new();
    let mut rng = StdRng::seed_from_u64(SEED);
    let config = QLearningConfig::annealed(NUM_EPISODES)?;
    let outcome = train(&mut env, config, &mut rng)?;

    let mut wtr = csv::Writer::from_path(path.join("frozen_lake_rewards.csv"))?;
    wtr.write_record(["episode", "reward"])?;
    for (i, reward) in outcome.rewards.iter().enumerate() {
        wtr.write_record(&[i.to_string(), reward.to_string()])?;
    }
    wtr.flush()?;

    for (state, row) in outcome.table.rows().enumerate() {
        info!(
            "state {:>2}: greedy action {} values {:?}",
            state,
            select_action(state, &outcome.table, 0.0, &mut rng)?,
            row
        );
    }

    let reward = evaluate(&mut env, &outcome.table, 100, &mut rng)?;
    info!("greedy rollout reward: {reward}");

    Ok(())
}
