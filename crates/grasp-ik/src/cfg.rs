//! Tolerance defaults for the closed-form solver (internal).
//!
//! Policy
//! - Fixed constants. The model carries geometry and joint ranges; numeric
//!   slack stays here so call sites never pass epsilons around.

/// Minimum norm of an approach vector that can still be normalized.
pub(crate) const DIRECTION_EPS: f64 = 1e-9;
/// Slack on the law-of-cosines argument before a target counts as unreachable.
pub(crate) const REACH_EPS: f64 = 1e-12;
/// Horizontal distance below which the target sits on the yaw axis.
pub(crate) const AXIS_EPS: f64 = 1e-12;
/// In-plane normal magnitude below which the normal does not fix the pitch.
pub(crate) const PITCH_EPS: f64 = 1e-9;
/// Slack on joint ranges and on the pitch hemisphere check.
pub(crate) const LIMIT_EPS: f64 = 1e-9;
