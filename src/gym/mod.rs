pub mod frozen_lake;
pub mod k_armed_bandit;

pub use frozen_lake::FrozenLake;
pub use k_armed_bandit::KArmedBandit;
