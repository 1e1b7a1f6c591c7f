//! Vertical arm plane spanned by the yaw direction and the world up axis.
//!
//! Shared by the solver (target → plane) and forward kinematics (plane → world).

use nalgebra::Vector3;

use crate::cfg::AXIS_EPS;
use crate::wrap_angle;

/// Right-handed frame `(radial, lateral, up)` for a given base yaw.
///
/// Invariant: `lateral = up × radial`, so `radial × lateral = up`.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ArmFrame {
    pub yaw: f64,
    pub radial: Vector3<f64>,
    pub lateral: Vector3<f64>,
}

impl ArmFrame {
    pub fn from_yaw(yaw: f64) -> Self {
        let (s, c) = yaw.sin_cos();
        Self {
            yaw,
            radial: Vector3::new(c, s, 0.0),
            lateral: Vector3::new(-s, c, 0.0),
        }
    }

    /// Frame whose plane contains `position`, facing it (front) or facing away (rear).
    ///
    /// Returns the frame and the signed radial coordinate of `position` in it.
    /// A position on the yaw axis gets heading 0.
    pub fn facing(position: &Vector3<f64>, to_front: bool) -> (Self, f64) {
        let horizontal = position.x.hypot(position.y);
        let heading = if horizontal < AXIS_EPS {
            0.0
        } else {
            position.y.atan2(position.x)
        };
        if to_front {
            (Self::from_yaw(heading), horizontal)
        } else {
            (
                Self::from_yaw(wrap_angle(heading + std::f64::consts::PI)),
                -horizontal,
            )
        }
    }

    /// Express a world vector as `(radial, lateral, up)` components.
    #[inline]
    pub fn components(&self, v: &Vector3<f64>) -> (f64, f64, f64) {
        (v.dot(&self.radial), v.dot(&self.lateral), v.z)
    }

    /// Lift an in-plane `(r, z)` vector back to world coordinates.
    #[inline]
    pub fn lift(&self, r: f64, z: f64) -> Vector3<f64> {
        self.radial * r + Vector3::z() * z
    }
}
