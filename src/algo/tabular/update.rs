use crate::{env::Exp, Result};

use super::QTable;

/// The off-policy (Q-learning) target for a transition
///
/// `reward + gamma * max_a Q(next_state, a)`, or just `reward` when the transition terminated.
/// The maximum is taken over the successor's actions regardless of which action the
/// behavior policy goes on to pick.
pub fn td_target(table: &QTable, exp: &Exp, gamma: f32) -> Result<f32> {
    let max_next_q = match exp.next_state {
        Some(next_state) => table.max_value(next_state)?,
        None => 0.0,
    };
    Ok(exp.reward + gamma * max_next_q)
}

/// Apply one temporal-difference update for `exp`, in place
///
/// Q(s,a) ← Q(s,a) + α (target − Q(s,a))
///
/// Exactly one cell, `(exp.state, exp.action)`, is overwritten.
pub fn apply(table: &mut QTable, exp: &Exp, alpha: f32, gamma: f32) -> Result<()> {
    let q_value = table.get(exp.state, exp.action)?;
    let target = td_target(table, exp, gamma)?;
    table.set(exp.state, exp.action, q_value + alpha * (target - q_value))
}
