//! Forward kinematics: joint angles → tool tip, tool axis and approach axis.
//!
//! Conventions (see `model`)
//! - Planar joints are absolute-from-vertical: link k points along
//!   `(sin αk, cos αk)` in the arm plane `(r, z)` with `α1 = q2`,
//!   `α2 = q2 + q3`, `α3 = q2 + q3 + q4`.
//! - The approach axis is the gripper's lateral axis, rolled about the tool
//!   axis by `q5`: `b = cos q5 · ŷ + sin q5 · (a × ŷ)`.

use nalgebra::Vector3;

use crate::branch::Branch;
use crate::frame::ArmFrame;
use crate::model::{Joints, KinematicModel};
use crate::wrap_angle;

/// End-effector pose as far as a 5-DOF arm can control it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    /// Tool tip in the base frame.
    pub position: Vector3<f64>,
    /// Unit vector from wrist to tool tip.
    pub tool_axis: Vector3<f64>,
    /// Unit approach (normal) axis, orthogonal to `tool_axis`.
    pub approach: Vector3<f64>,
}

pub fn forward(model: &KinematicModel, q: &Joints) -> Pose {
    let frame = ArmFrame::from_yaw(q[0]);
    let a1 = q[1];
    let a2 = a1 + q[2];
    let a3 = a2 + q[3];
    let (l2, l3, l4) = (
        model.upper_arm_length(),
        model.forearm_length(),
        model.tool_length(),
    );
    let r = model.base_offset_x() + l2 * a1.sin() + l3 * a2.sin() + l4 * a3.sin();
    let z = model.base_offset_z() + l2 * a1.cos() + l3 * a2.cos() + l4 * a3.cos();

    let tool_axis = frame.lift(a3.sin(), a3.cos());
    let (s5, c5) = q[4].sin_cos();
    let approach = frame.lateral * c5 + tool_axis.cross(&frame.lateral) * s5;
    Pose {
        position: frame.lift(r, z),
        tool_axis,
        approach,
    }
}

/// Wrist pitch encoded by a joint vector: tool-axis elevation, wrapped to `(-π, π]`.
#[inline]
pub fn pitch_of(q: &Joints) -> f64 {
    wrap_angle(std::f64::consts::FRAC_PI_2 - (q[1] + q[2] + q[3]))
}

/// Branch a joint vector belongs to.
///
/// Reach side from the sign of the tip's radial coordinate, elbow from the sign
/// of `q3` relative to the reach side, wrist from the pitch hemisphere.
/// A tip on the yaw axis counts as front and a straight elbow as elbow-up; the
/// wrist uses the half-open hemisphere `(-π, 0]` for gripper-down.
pub fn branch_of(model: &KinematicModel, q: &Joints) -> Branch {
    let pose = forward(model, q);
    let frame = ArmFrame::from_yaw(q[0]);
    let arm_to_front = pose.position.dot(&frame.radial) >= 0.0;
    let elbow_forward = q[2] >= 0.0;
    let pitch = pitch_of(q);
    Branch::new(arm_to_front, elbow_forward == arm_to_front, pitch <= 0.0)
}
