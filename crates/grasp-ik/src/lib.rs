//! Closed-form grasp inverse kinematics for a 5-DOF serial arm.
//!
//! Layout
//! - `model`: link lengths and joint ranges (`KinematicModel`).
//! - `branch`: the eight discrete configuration families and their indices.
//! - `solver`: one branch, one target, closed form.
//! - `select`: the caller-facing policies built on the solver.
//! - `forward`, `sampling`: forward kinematics and reachable-target draws.
//!
//! API Policy
//! - Every solve entry point is a pure function of `&KinematicModel` and plain
//!   values; nothing is cached or global, so calls are safe from any thread.
//! - Infeasibility is data (`JointSolution::status`), never an `Err`.

pub mod api;
pub mod branch;
pub(crate) mod cfg;
pub mod forward;
pub(crate) mod frame;
pub mod model;
pub mod sampling;
pub mod select;
pub mod solver;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use branch::{Branch, BranchIndex, BranchIndexError, BranchSpace};
pub use model::{JointLimits, Joints, KinematicModel, ModelError, ModelParams, JOINT_COUNT};
pub use solver::{JointSolution, SolveStatus, Target};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::branch::{Branch, BranchIndex, BranchSpace};
    pub use crate::forward::{forward, Pose};
    pub use crate::model::{Joints, KinematicModel, ModelParams};
    pub use crate::select::{
        closest_to, fully_constrained, fully_constrained_batch, preferred_pitch, preferred_type,
        FullyConstrainedRequest,
    };
    pub use crate::solver::{solve, JointSolution, SolveStatus, Target};
    pub use nalgebra::Vector3 as Vec3;
}

/// Wrap an angle into `(-π, π]`.
#[inline]
pub fn wrap_angle(a: f64) -> f64 {
    use std::f64::consts::{PI, TAU};
    PI - (PI - a).rem_euclid(TAU)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{PI, TAU};

    #[test]
    fn wrap_angle_is_half_open() {
        assert_eq!(wrap_angle(PI), PI);
        assert!((wrap_angle(-PI) - PI).abs() < 1e-15);
        assert!((wrap_angle(3.0 * PI / 2.0) + PI / 2.0).abs() < 1e-12);
        assert!((wrap_angle(0.25 + 3.0 * TAU) - 0.25).abs() < 1e-12);
        assert_eq!(wrap_angle(0.0), 0.0);
        for k in -20..=20 {
            let w = wrap_angle(0.1 * k as f64 + 0.05);
            assert!(w > -PI && w <= PI);
        }
    }
}
