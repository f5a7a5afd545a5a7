use std::error::Error;

use log::info;
use rand::{rngs::StdRng, Rng, SeedableRng};
use tabular_rl::{env::Environment, gym::KArmedBandit};

const STEPS: u32 = 10;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut rng = StdRng::from_entropy();
    let mut env = KArmedBandit::<10>::new(STEPS, &mut rng);
    info!("arm means: {:?}", env.means());

    env.reset(&mut rng);
    let mut total = 0.0;
    loop {
        let action = rng.gen_range(0..env.action_space_size());
        let step = env.step(action, &mut rng)?;
        total += step.reward;
        info!("pulled arm {action}, reward {:.3}", step.reward);
        if step.is_done() {
            break;
        }
    }

    info!("total reward: {total:.3}");
    Ok(())
}
