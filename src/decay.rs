use crate::{ensure_interval, Error, Result};

/// An episode-indexed schedule for a time-decaying value such as epsilon
pub trait Decay {
    /// Calculate the value at episode `t`
    fn evaluate(&self, t: u32) -> f32;
}

fn validate(rate: f32, vi: f32, vf: f32) -> Result<()> {
    ((rate >= 0.0 && vi >= vf) || (rate < 0.0 && vi <= vf))
        .then_some(())
        .ok_or_else(|| Error::config("rate", rate, "`vi - vf` must have same sign as `rate`"))
}

/// A constant value
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Constant {
    value: f32,
}

impl Constant {
    pub fn new(value: f32) -> Self {
        Self { value }
    }
}

impl Decay for Constant {
    fn evaluate(&self, _t: u32) -> f32 {
        self.value
    }
}

/// v(t) = v<sub>f</sub> + (v<sub>i</sub> - v<sub>f</sub>) * e<sup>-rt</sup>
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Exponential {
    rate: f32,
    vi: f32,
    vf: f32,
}

impl Exponential {
    pub fn new(rate: f32, vi: f32, vf: f32) -> Result<Self> {
        validate(rate, vi, vf)?;
        Ok(Self { rate, vi, vf })
    }
}

impl Decay for Exponential {
    fn evaluate(&self, t: u32) -> f32 {
        let &Self { rate, vi, vf } = self;
        vf + (vi - vf) * (-rate * t as f32).exp()
    }
}

/// v(t) = v<sub>f</sub> + (v<sub>i</sub> - v<sub>f</sub>) / (1 + rt)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InverseTime {
    rate: f32,
    vi: f32,
    vf: f32,
}

impl InverseTime {
    pub fn new(rate: f32, vi: f32, vf: f32) -> Result<Self> {
        validate(rate, vi, vf)?;
        Ok(Self { rate, vi, vf })
    }
}

impl Decay for InverseTime {
    fn evaluate(&self, t: u32) -> f32 {
        let &Self { rate, vi, vf } = self;
        vf + (vi - vf) / (1.0 + rate * t as f32)
    }
}

/// v(t) = max(v<sub>i</sub> - rt, v<sub>f</sub>)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Linear {
    rate: f32,
    vi: f32,
    vf: f32,
}

impl Linear {
    pub fn new(rate: f32, vi: f32, vf: f32) -> Result<Self> {
        validate(rate, vi, vf)?;
        Ok(Self { rate, vi, vf })
    }
}

impl Decay for Linear {
    fn evaluate(&self, t: u32) -> f32 {
        let &Self { rate, vi, vf } = self;
        (vi - rate * t as f32).max(vf)
    }
}

/// v(t) = inner(t) while t < `at`, then exactly 0
///
/// Forces pure exploitation for the tail of a training run.
#[derive(Debug, Clone, PartialEq)]
pub struct Cutoff<D: Decay> {
    inner: D,
    at: f64,
}

impl<D: Decay> Cutoff<D> {
    pub fn new(inner: D, at: f64) -> Self {
        Self { inner, at }
    }

    /// The first episode index at which the value is forced to 0
    pub fn cutoff_episode(&self) -> u32 {
        self.at.max(0.0).ceil() as u32
    }
}

impl<D: Decay> Decay for Cutoff<D> {
    fn evaluate(&self, t: u32) -> f32 {
        if (t as f64) < self.at {
            self.inner.evaluate(t)
        } else {
            0.0
        }
    }
}

/// The annealing schedule used by default for Q-learning
///
/// ε(t) = 1 / (t/k + 1) for t below `fraction` of `num_episodes`, else 0.
///
/// ### Parameters
/// - `num_episodes` - Length of the training run the schedule is built for
/// - `k` - Decay-rate constant, larger is slower (`10_000` is a reasonable start, but retune per environment)
/// - `fraction` - Share of the run that explores at all, in `[0,1]`
pub fn annealed(num_episodes: u32, k: f32, fraction: f32) -> Result<Cutoff<InverseTime>> {
    if !(k > 0.0) {
        return Err(Error::config("k", k, "must be positive"));
    }
    ensure_interval!(fraction, 0.0, 1.0);
    let inner = InverseTime::new(1.0 / k, 1.0, 0.0)?;
    Ok(Cutoff::new(inner, fraction as f64 * num_episodes as f64))
}
