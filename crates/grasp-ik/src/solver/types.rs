//! Solver inputs and outputs: `Target`, `SolveStatus`, `JointSolution`.

use std::fmt;

use nalgebra::{Vector3, Vector5};

use crate::branch::Branch;
use crate::cfg::DIRECTION_EPS;
use crate::forward::pitch_of;
use crate::model::Joints;

/// Cartesian goal: tool tip position plus approach (normal) direction.
///
/// `approach` need not be normalized; see `unit_approach`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Target {
    pub position: Vector3<f64>,
    pub approach: Vector3<f64>,
}

impl Target {
    #[inline]
    pub fn new(position: Vector3<f64>, approach: Vector3<f64>) -> Self {
        Self { position, approach }
    }

    /// From the flat arrays the service surface carries.
    #[inline]
    pub fn from_arrays(position: [f64; 3], approach: [f64; 3]) -> Self {
        Self::new(Vector3::from(position), Vector3::from(approach))
    }

    /// Unit approach vector; `None` when too short or non-finite to normalize.
    pub fn unit_approach(&self) -> Option<Vector3<f64>> {
        let norm = self.approach.norm();
        if !norm.is_finite() || norm < DIRECTION_EPS {
            return None;
        }
        Some(self.approach / norm)
    }
}

/// Outcome of solving one branch. Only `Feasible` counts as a solution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SolveStatus {
    Feasible,
    /// Approach vector of (near) zero length or non-finite.
    DegenerateApproach,
    /// Shoulder–wrist distance outside the elbow triangle, or non-finite position.
    Unreachable,
    /// Pinned pitch lies in the hemisphere the branch's wrist flag excludes.
    PitchMismatch,
    /// Joint `joint` (0-based) outside its mechanical range.
    JointLimit { joint: usize },
}

impl SolveStatus {
    #[inline]
    pub fn is_feasible(self) -> bool {
        matches!(self, SolveStatus::Feasible)
    }
}

impl fmt::Display for SolveStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SolveStatus::Feasible => write!(f, "feasible"),
            SolveStatus::DegenerateApproach => write!(f, "degenerate approach direction"),
            SolveStatus::Unreachable => write!(f, "target out of reach"),
            SolveStatus::PitchMismatch => write!(f, "pitch contradicts wrist flag"),
            SolveStatus::JointLimit { joint } => write!(f, "joint {} out of range", joint + 1),
        }
    }
}

/// One branch's joint angles plus whether they are usable.
///
/// Infeasible results still carry every angle the solver could compute
/// (zeros where it could not), so callers can log or inspect them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JointSolution {
    pub joints: Joints,
    pub status: SolveStatus,
    pub branch: Branch,
}

impl JointSolution {
    #[inline]
    pub fn feasible(&self) -> bool {
        self.status.is_feasible()
    }

    /// Wrist pitch realized by `joints` (tool-axis elevation in the arm plane).
    #[inline]
    pub fn pitch(&self) -> f64 {
        pitch_of(&self.joints)
    }

    /// Euclidean joint-space distance to `reference`.
    pub fn distance_to(&self, reference: &Joints) -> f64 {
        (Vector5::from(self.joints) - Vector5::from(*reference)).norm()
    }
}
