use log::{debug, info, trace};
use rand::Rng;

use crate::{
    decay::{self, Cutoff, Decay, InverseTime},
    ensure_interval,
    env::{Environment, Exp},
    exploration::{select_action, EpsilonGreedy},
    Error, Result,
};

use super::{update, QTable};

/// Configuration for the [`QLearningAgent`]
#[derive(Debug, Clone)]
pub struct QLearningConfig<D: Decay = Cutoff<InverseTime>> {
    /// Episode-indexed exploration schedule
    ///
    /// **Default**: [`decay::annealed`] over 10 000 episodes, `k = 10 000`, exploring for the first 90%
    pub exploration: EpsilonGreedy<D>,
    /// The learning rate, in `(0,1]`
    ///
    /// **Default**: `0.7`
    pub alpha: f32,
    /// The discount factor, in `[0,1]`
    ///
    /// **Default**: `0.99`
    pub gamma: f32,
    /// **Default**: `10_000`
    pub num_episodes: u32,
    /// Step cap per episode, applied even if the environment never signals the end
    ///
    /// **Default**: `1_000`
    pub max_steps: u32,
    /// Log a progress summary every `log_interval` episodes, `0` to disable
    ///
    /// **Default**: `1_000`
    pub log_interval: u32,
}

impl QLearningConfig {
    /// The default configuration with the annealing schedule fitted to `num_episodes`
    pub fn annealed(num_episodes: u32) -> Result<Self> {
        Ok(Self {
            exploration: EpsilonGreedy::new(decay::annealed(num_episodes, 10_000.0, 0.9)?),
            alpha: 0.7,
            gamma: 0.99,
            num_episodes,
            max_steps: 1_000,
            log_interval: 1_000,
        })
    }
}

impl Default for QLearningConfig {
    fn default() -> Self {
        Self::annealed(10_000).expect("Reference schedule parameters are valid")
    }
}

impl<D: Decay> QLearningConfig<D> {
    /// Check every hyperparameter, see the field docs for the valid ranges
    pub fn validate(&self) -> Result<()> {
        let Self {
            alpha,
            gamma,
            num_episodes,
            max_steps,
            ..
        } = *self;
        if !(alpha > 0.0 && alpha <= 1.0) {
            return Err(Error::config("alpha", alpha, "must be in the interval (0, 1]"));
        }
        ensure_interval!(gamma, 0.0, 1.0);
        if num_episodes == 0 {
            return Err(Error::config("num_episodes", 0, "must be positive"));
        }
        if max_steps == 0 {
            return Err(Error::config("max_steps", 0, "must be positive"));
        }
        Ok(())
    }
}

/// Summary of a single episode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EpisodeReport {
    pub episode: u32,
    /// Cumulative undiscounted reward
    pub reward: f32,
    pub steps: u32,
    pub epsilon: f32,
    /// `true` if the environment reached a terminal state, `false` on truncation or step cap
    pub terminated: bool,
}

/// A Q-learning agent that learns its environment in a dense [`QTable`]
///
/// The agent exclusively owns its table for the duration of training. Every step selects an
/// action epsilon-greedily, steps the environment, and applies the off-policy TD update
/// ([`update::apply`]) before moving on.
#[derive(Debug, Clone)]
pub struct QLearningAgent<D: Decay = Cutoff<InverseTime>> {
    q_table: QTable,
    exploration: EpsilonGreedy<D>,
    alpha: f32,      // learning rate
    gamma: f32,      // discount factor
    max_steps: u32,  // step cap per episode
    episode: u32,    // current episode
}

impl<D: Decay> QLearningAgent<D> {
    /// Initialize a new agent with a zero-filled table sized for `env`
    ///
    /// **Errors** if the configuration is invalid or either space of `env` is empty
    pub fn new<E: Environment>(env: &E, config: &QLearningConfig<D>) -> Result<Self>
    where
        D: Clone,
    {
        config.validate()?;
        Ok(Self {
            q_table: QTable::for_env(env)?,
            exploration: config.exploration.clone(),
            alpha: config.alpha,
            gamma: config.gamma,
            max_steps: config.max_steps,
            episode: 0,
        })
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    pub fn into_q_table(self) -> QTable {
        self.q_table
    }

    /// Index of the next episode to run
    pub fn episode(&self) -> u32 {
        self.episode
    }

    fn act<R: Rng + ?Sized>(&self, state: usize, epsilon: f32, rng: &mut R) -> Result<usize> {
        select_action(state, &self.q_table, epsilon, rng)
    }

    fn learn(&mut self, exp: &Exp) -> Result<()> {
        update::apply(&mut self.q_table, exp, self.alpha, self.gamma)
    }

    /// Run one episode in the given environment, learning as it goes
    pub fn go<E, R>(&mut self, env: &mut E, rng: &mut R) -> Result<EpisodeReport>
    where
        E: Environment,
        R: Rng + ?Sized,
    {
        let epsilon = self.exploration.epsilon(self.episode)?;
        let (mut state, _) = env.reset(rng);
        let mut report = EpisodeReport {
            episode: self.episode,
            reward: 0.0,
            steps: 0,
            epsilon,
            terminated: false,
        };

        while report.steps < self.max_steps {
            let action = self.act(state, epsilon, rng)?;
            let step = env.step(action, rng)?;
            self.q_table.check_state(step.next_state)?;
            report.steps += 1;

            self.learn(&Exp::from_step(state, action, &step))?;
            report.reward += step.reward;
            trace!(
                "episode {} step {}: s={} a={} r={} s'={}",
                self.episode,
                report.steps,
                state,
                action,
                step.reward,
                step.next_state
            );

            if step.is_done() {
                report.terminated = step.terminated;
                break;
            }
            state = step.next_state;
        }

        debug!(
            "episode {} finished after {} steps with reward {:.3} (epsilon {:.4})",
            report.episode, report.steps, report.reward, report.epsilon
        );
        self.episode += 1;
        Ok(report)
    }
}

/// The result of a completed training run
#[derive(Debug, Clone, PartialEq)]
pub struct TrainingOutcome {
    /// The learned action values
    pub table: QTable,
    /// Cumulative reward of every episode, in order
    pub rewards: Vec<f32>,
}

impl TrainingOutcome {
    /// Mean reward over the last `n` episodes, `None` if there are none
    pub fn mean_reward(&self, n: usize) -> Option<f32> {
        let tail = &self.rewards[self.rewards.len().saturating_sub(n)..];
        (!tail.is_empty()).then(|| tail.iter().sum::<f32>() / tail.len() as f32)
    }
}

/// Train a fresh [`QLearningAgent`] on `env` for `config.num_episodes` episodes
///
/// Performs at most `num_episodes * max_steps` environment steps. Any error aborts the whole
/// run and no table is returned.
pub fn train<E, D, R>(env: &mut E, config: QLearningConfig<D>, rng: &mut R) -> Result<TrainingOutcome>
where
    E: Environment,
    D: Decay + Clone,
    R: Rng + ?Sized,
{
    let mut agent = QLearningAgent::new(&*env, &config)?;
    let (n_states, n_actions) = agent.q_table().shape();
    info!(
        "training on {} states x {} actions for {} episodes (alpha {}, gamma {}, step cap {})",
        n_states, n_actions, config.num_episodes, config.alpha, config.gamma, config.max_steps
    );

    let mut rewards = Vec::with_capacity(config.num_episodes as usize);
    for i in 0..config.num_episodes {
        let report = agent.go(env, rng)?;
        rewards.push(report.reward);

        let interval = config.log_interval as usize;
        if interval > 0 && (i + 1) % config.log_interval == 0 {
            let window = &rewards[rewards.len() - interval..];
            info!(
                "episode {}/{}: mean reward {:.3} over last {}, epsilon {:.4}",
                i + 1,
                config.num_episodes,
                window.iter().sum::<f32>() / interval as f32,
                interval,
                report.epsilon
            );
        }
    }

    let outcome = TrainingOutcome {
        table: agent.into_q_table(),
        rewards,
    };
    info!(
        "training finished, mean reward over the last 100 episodes: {:.3}",
        outcome.mean_reward(100).unwrap_or_default()
    );
    Ok(outcome)
}

/// Roll out one greedy (`epsilon = 0`) episode with a trained table, without learning
///
/// **Returns** the cumulative episode reward
pub fn evaluate<E, R>(env: &mut E, table: &QTable, max_steps: u32, rng: &mut R) -> Result<f32>
where
    E: Environment,
    R: Rng + ?Sized,
{
    let (mut state, _) = env.reset(rng);
    let mut reward = 0.0;
    for _ in 0..max_steps {
        let action = select_action(state, table, 0.0, rng)?;
        let step = env.step(action, rng)?;
        table.check_state(step.next_state)?;
        reward += step.reward;
        if step.is_done() {
            break;
        }
        state = step.next_state;
    }
    Ok(reward)
}
