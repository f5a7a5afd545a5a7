/// Checks that a numerical value is in the closed interval `[a,b]` and returns early
/// with an [`Error::Configuration`](crate::Error::Configuration) if not
///
/// The expression must be `Copy` and convertible into `f64`. `NaN` is never in range.
///
/// ### Example
/// ```
/// # use tabular_rl::{ensure_interval, Result};
/// fn check(gamma: f32) -> Result<()> {
///     ensure_interval!(gamma, 0.0, 1.0);
///     Ok(())
/// }
/// assert!(check(0.5).is_ok());
/// assert!(check(2.0).is_err());
/// ```
/// The error message reads "invalid value 2 for \`gamma\`: must be in the interval \[0, 1\]".
#[macro_export]
macro_rules! ensure_interval {
    ($var:expr, $a:expr, $b:expr) => {
        if !($var >= $a && $var <= $b) {
            return Err($crate::Error::Configuration {
                name: stringify!($var),
                value: $var as f64,
                reason: format!("must be in the interval [{}, {}]", $a, $b),
            });
        }
    };
}
