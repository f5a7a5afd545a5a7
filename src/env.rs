use rand::Rng;

use crate::Result;

/// Represents a Markov decision process, defining the dynamics of an environment
/// in which an agent can operate.
///
/// This trait covers the tabular case: a single agent, a finite state space `[0, n_states)`
/// and a finite action space `[0, n_actions)`, both addressed by index.
///
/// Randomness is never ambient. The generator driving the episode is passed into
/// [`reset`](Environment::reset) and [`step`](Environment::step) so that a seeded run is reproducible.
pub trait Environment {
    /// Auxiliary diagnostics returned alongside every reset and step
    type Info;

    /// Number of distinct states
    fn observation_space_size(&self) -> usize;

    /// Number of distinct actions
    fn action_space_size(&self) -> usize;

    /// Reset the environment to an initial state
    ///
    /// **Returns** `(initial_state, info)`
    fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) -> (usize, Self::Info);

    /// Update the environment in response to an action taken by an agent
    ///
    /// **Errors** with [`Error::ContractViolation`](crate::Error::ContractViolation) if called after
    /// the episode terminated without an intervening [`reset`](Environment::reset)
    fn step<R: Rng + ?Sized>(&mut self, action: usize, rng: &mut R) -> Result<Step<Self::Info>>;
}

/// The outcome of a single [`Environment::step`]
#[derive(Debug, Clone, PartialEq)]
pub struct Step<I> {
    pub next_state: usize,
    pub reward: f32,
    /// The episode reached a terminal state
    pub terminated: bool,
    /// The episode was cut short by the environment, e.g. a time limit
    pub truncated: bool,
    pub info: I,
}

impl<I> Step<I> {
    /// True if the episode is over for either reason
    pub fn is_done(&self) -> bool {
        self.terminated || self.truncated
    }
}

/// Represents a single experience or transition in the environment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Exp {
    /// The state of the environment before taking the action
    pub state: usize,
    /// The action taken in the given state
    pub action: usize,
    /// The reward received after taking the action
    pub reward: f32,
    /// The state of the environment after the action is taken, or if terminal, `None`
    pub next_state: Option<usize>,
}

impl Exp {
    /// Build the experience for a step taken from `state` with `action`
    ///
    /// A terminated step has no successor to bootstrap from, while a truncated one does.
    pub fn from_step<I>(state: usize, action: usize, step: &Step<I>) -> Self {
        Self {
            state,
            action,
            reward: step.reward,
            next_state: (!step.terminated).then_some(step.next_state),
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::Error;

    /// One state, two actions. Action 0 pays 1.0, action 1 pays nothing, both terminate.
    pub struct MockEnv {
        done: bool,
    }

    impl MockEnv {
        pub fn new() -> Self {
            Self { done: true }
        }
    }

    impl Environment for MockEnv {
        type Info = ();

        fn observation_space_size(&self) -> usize {
            1
        }

        fn action_space_size(&self) -> usize {
            2
        }

        fn reset<R: Rng + ?Sized>(&mut self, _rng: &mut R) -> (usize, ()) {
            self.done = false;
            (0, ())
        }

        fn step<R: Rng + ?Sized>(&mut self, action: usize, _rng: &mut R) -> Result<Step<()>> {
            if self.done {
                return Err(Error::ContractViolation("action after game over".into()));
            }
            self.done = true;
            Ok(Step {
                next_state: 0,
                reward: if action == 0 { 1.0 } else { 0.0 },
                terminated: true,
                truncated: false,
                info: (),
            })
        }
    }

    #[test]
    fn mock_env_contract() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut env = MockEnv::new();
        assert!(
            env.step(0, &mut rng).is_err(),
            "Stepping before reset is rejected"
        );

        let (state, ()) = env.reset(&mut rng);
        assert_eq!(state, 0);
        let step = env.step(0, &mut rng).unwrap();
        assert_eq!(step.reward, 1.0);
        assert!(step.is_done());

        assert_eq!(
            env.step(1, &mut rng),
            Err(Error::ContractViolation("action after game over".into())),
            "Stepping after termination is rejected"
        );
    }

    #[test]
    fn exp_from_step() {
        let mut step = Step {
            next_state: 3,
            reward: -1.0,
            terminated: false,
            truncated: true,
            info: (),
        };
        let exp = Exp::from_step(2, 1, &step);
        assert_eq!(exp.next_state, Some(3), "Truncated steps keep their successor");
        assert_eq!(exp.reward, -1.0);

        step.terminated = true;
        let exp = Exp::from_step(2, 1, &step);
        assert_eq!(exp.next_state, None, "Terminated steps have no successor");
    }
}
