//! Closed-form solver for a single branch.
//!
//! Purpose
//! - Map `(branch, target, optional pitch)` to the five joint angles, or report
//!   why that branch cannot realize the target. No iteration, no allocation.
//!
//! Algorithm
//! 1. Yaw: face the target (front) or face away from it (rear); the target then
//!    sits at signed radial coordinate `reach` in the arm plane.
//! 2. Pitch: pinned by the caller, or derived from the approach vector. With the
//!    normal `n = (n_r, n_l, n_u)` in the arm frame, the tool axis must be
//!    orthogonal to `n`, which leaves `φ₀ = atan2(-n_r, n_u)` and `φ₀ + π`; the
//!    wrist flag picks the one in its hemisphere.
//! 3. Roll: best-fit rotation of the lateral axis onto `n` about the tool axis.
//! 4. Wrist point = tip − `l4`·tool axis; shoulder/elbow by the law of cosines.
//! 5. Wrist pitch joint closes the chain: `q4 = π/2 − φ − q2 − q3`.
//! 6. Range check on all five joints.
//!
//! Code cross-refs: `forward::forward` (inverse map), `select` (policies)

mod planar;
mod types;

pub use types::{JointSolution, SolveStatus, Target};

use std::f64::consts::{FRAC_PI_2, PI};

use crate::branch::Branch;
use crate::cfg::{LIMIT_EPS, PITCH_EPS};
use crate::frame::ArmFrame;
use crate::model::{KinematicModel, JOINT_COUNT};
use crate::wrap_angle;

use planar::two_link;

/// Solve one branch. `pitch = Some(φ)` pins the wrist pitch (radians, tool-axis
/// elevation); `None` derives it from the approach direction.
///
/// Never fails: every problem is reported through `JointSolution::status`.
pub fn solve(
    model: &KinematicModel,
    branch: Branch,
    target: &Target,
    pitch: Option<f64>,
) -> JointSolution {
    let Some(normal) = target.unit_approach() else {
        return JointSolution {
            joints: [0.0; JOINT_COUNT],
            status: SolveStatus::DegenerateApproach,
            branch,
        };
    };
    let position = target.position;
    if !position.iter().all(|v| v.is_finite()) {
        return JointSolution {
            joints: [0.0; JOINT_COUNT],
            status: SolveStatus::Unreachable,
            branch,
        };
    }

    let (frame, reach) = ArmFrame::facing(&position, branch.arm_to_front);
    let (n_r, n_l, n_u) = frame.components(&normal);

    let (phi, pitch_ok) = match pitch {
        Some(p) => {
            let p = wrap_angle(p);
            (p, pitch_in_hemisphere(p, branch.gripper_downwards))
        }
        None => (derived_pitch(n_r, n_u, branch.gripper_downwards), true),
    };
    let (sin_phi, cos_phi) = phi.sin_cos();
    // (-sin φ, cos φ) is the in-plane direction of tool_axis × lateral.
    let roll = (n_u * cos_phi - n_r * sin_phi).atan2(n_l);

    let mut joints = [frame.yaw, 0.0, 0.0, 0.0, roll];
    let wrist_r = reach - model.tool_length() * cos_phi - model.base_offset_x();
    let wrist_z = position.z - model.tool_length() * sin_phi - model.base_offset_z();
    let Some(arm) = two_link(
        model.upper_arm_length(),
        model.forearm_length(),
        wrist_r,
        wrist_z,
        branch.elbow_sign(),
    ) else {
        return JointSolution {
            joints,
            status: SolveStatus::Unreachable,
            branch,
        };
    };
    joints[1] = arm.shoulder;
    joints[2] = arm.elbow;
    joints[3] = wrap_angle(FRAC_PI_2 - phi - arm.shoulder - arm.elbow);

    let status = if !pitch_ok {
        SolveStatus::PitchMismatch
    } else if let Some(joint) = model.limits().first_violation(&joints) {
        SolveStatus::JointLimit { joint }
    } else {
        SolveStatus::Feasible
    };
    JointSolution {
        joints,
        status,
        branch,
    }
}

/// Pitch that keeps the tool axis orthogonal to the normal, in the requested
/// hemisphere. A normal along the lateral axis leaves the pitch free; it then
/// defaults to straight down (or straight up).
fn derived_pitch(n_r: f64, n_u: f64, downwards: bool) -> f64 {
    if n_r.hypot(n_u) < PITCH_EPS {
        return if downwards { -FRAC_PI_2 } else { FRAC_PI_2 };
    }
    let phi = wrap_angle((-n_r).atan2(n_u));
    if (phi <= 0.0) == downwards {
        phi
    } else {
        wrap_angle(phi + PI)
    }
}

/// Hemisphere check for a pinned pitch; horizontal pitches satisfy both flags.
#[inline]
fn pitch_in_hemisphere(phi: f64, downwards: bool) -> bool {
    let s = phi.sin();
    if downwards {
        s <= LIMIT_EPS
    } else {
        s >= -LIMIT_EPS
    }
}
