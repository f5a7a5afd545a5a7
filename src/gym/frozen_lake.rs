use rand::Rng;
use strum::{EnumCount, FromRepr};

use crate::{
    env::{Environment, Step},
    Error, Result,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Square {
    Frozen,
    Hole,
    Start,
    Goal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumCount, FromRepr)]
#[repr(usize)]
pub enum FLAction {
    Left = 0,
    Down = 1,
    Right = 2,
    Up = 3,
}

impl FLAction {
    /// The two actions at right angles to this one
    fn perpendicular(self) -> [Self; 2] {
        match self {
            FLAction::Left | FLAction::Right => [FLAction::Up, FLAction::Down],
            FLAction::Down | FLAction::Up => [FLAction::Left, FLAction::Right],
        }
    }
}

const SIZE: usize = 4;

/// A very simple RL environment taken from Python [gymnasium](https://gymnasium.farama.org/)
///
/// The agent walks a 4x4 frozen lake from the top left corner to the goal in the bottom right
/// corner without falling through a hole. Moving into the edge of the map leaves the agent in
/// place. Reaching the goal pays `1.0`, every other step pays nothing, and the episode
/// terminates on the goal or a hole. Episodes are truncated after `time_limit` steps.
///
/// On a slippery lake the intended move only happens a third of the time, otherwise the agent
/// slides in one of the two perpendicular directions.
pub struct FrozenLake {
    map: [Square; SIZE * SIZE],
    pos: usize,
    slippery: bool,
    time_limit: u32,
    elapsed: u32,
    done: bool,
}

impl FrozenLake {
    pub fn new() -> Self {
        use Square::*;
        #[rustfmt::skip]
        let map = [
            Start,  Frozen, Frozen, Frozen,
            Frozen, Hole,   Frozen, Hole,
            Frozen, Frozen, Frozen, Hole,
            Hole,   Frozen, Frozen, Goal,
        ];
        Self {
            map,
            pos: 0,
            slippery: false,
            time_limit: 100,
            elapsed: 0,
            done: true,
        }
    }

    /// A lake where moves only go as intended a third of the time
    pub fn slippery() -> Self {
        Self {
            slippery: true,
            ..Self::new()
        }
    }

    pub fn with_time_limit(mut self, time_limit: u32) -> Self {
        self.time_limit = time_limit;
        self
    }

    pub fn square(&self, state: usize) -> Option<Square> {
        self.map.get(state).copied()
    }

    fn moved(pos: usize, action: FLAction) -> usize {
        let (row, col) = (pos / SIZE, pos % SIZE);
        match action {
            FLAction::Left => row * SIZE + col.saturating_sub(1),
            FLAction::Down => (row + 1).min(SIZE - 1) * SIZE + col,
            FLAction::Right => row * SIZE + (col + 1).min(SIZE - 1),
            FLAction::Up => row.saturating_sub(1) * SIZE + col,
        }
    }
}

impl Default for FrozenLake {
    fn default() -> Self {
        Self::new()
    }
}

impl Environment for FrozenLake {
    type Info = ();

    fn observation_space_size(&self) -> usize {
        self.map.len()
    }

    fn action_space_size(&self) -> usize {
        FLAction::COUNT
    }

    fn reset<R: Rng + ?Sized>(&mut self, _rng: &mut R) -> (usize, ()) {
        self.pos = 0;
        self.elapsed = 0;
        self.done = false;
        (self.pos, ())
    }

    fn step<R: Rng + ?Sized>(&mut self, action: usize, rng: &mut R) -> Result<Step<()>> {
        if self.done {
            return Err(Error::ContractViolation("action after game over".into()));
        }
        let intended = FLAction::from_repr(action).ok_or(Error::IndexOutOfBounds {
            kind: "action",
            index: action,
            len: FLAction::COUNT,
        })?;

        let action = if self.slippery {
            match rng.gen_range(0..3) {
                0 => intended,
                i => intended.perpendicular()[i - 1],
            }
        } else {
            intended
        };

        self.pos = Self::moved(self.pos, action);
        self.elapsed += 1;

        let square = self.map[self.pos];
        let terminated = matches!(square, Square::Hole | Square::Goal);
        let truncated = !terminated && self.elapsed >= self.time_limit;
        self.done = terminated || truncated;

        Ok(Step {
            next_state: self.pos,
            reward: if square == Square::Goal { 1.0 } else { 0.0 },
            terminated,
            truncated,
            info: (),
        })
    }
}
