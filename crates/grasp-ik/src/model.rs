//! Arm geometry and joint ranges.
//!
//! Purpose
//! - Hold the five link constants the closed-form solver needs, plus the
//!   mechanical range of every joint, as one immutable value.
//! - Validation happens once, at construction. Solving never re-checks the model.
//!
//! Conventions
//! - Lengths in metres, angles in radians.
//! - Joint order: base yaw, shoulder, elbow, wrist pitch, wrist roll.
//! - All joints zero means the arm points straight up ("candle").
//!
//! Code cross-refs: `solver::solve`, `forward::forward`

use thiserror::Error;

use crate::cfg::LIMIT_EPS;

/// Number of actuated joints.
pub const JOINT_COUNT: usize = 5;

/// Joint angles in chain order.
pub type Joints = [f64; JOINT_COUNT];

/// Horizontal offset from the yaw axis to the shoulder axis.
pub const DEFAULT_BASE_OFFSET_X: f64 = 0.033;
/// Height of the shoulder axis above the base frame.
pub const DEFAULT_BASE_OFFSET_Z: f64 = 0.1472;
/// Shoulder to elbow.
pub const DEFAULT_UPPER_ARM_LENGTH: f64 = 0.155;
/// Elbow to wrist.
pub const DEFAULT_FOREARM_LENGTH: f64 = 0.135;
/// Wrist to tool tip.
pub const DEFAULT_TOOL_LENGTH: f64 = 0.218;

/// Mechanical ranges of the reference arm in degrees (candle-zero convention).
const DEFAULT_LOWER_DEG: Joints = [-169.0, -65.0, -151.0, -102.5, -167.5];
const DEFAULT_UPPER_DEG: Joints = [169.0, 90.0, 146.0, 102.5, 167.5];

/// Configuration faults. Raised at construction only.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("invalid {field}: {value} (must be a positive, finite length)")]
    InvalidLength { field: &'static str, value: f64 },

    #[error("invalid range for joint {joint}: [{lower}, {upper}]")]
    InvalidLimits { joint: usize, lower: f64, upper: f64 },
}

/// Closed per-joint range `[lower[j], upper[j]]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct JointLimits {
    pub lower: Joints,
    pub upper: Joints,
}

impl Default for JointLimits {
    fn default() -> Self {
        Self {
            lower: DEFAULT_LOWER_DEG.map(f64::to_radians),
            upper: DEFAULT_UPPER_DEG.map(f64::to_radians),
        }
    }
}

impl JointLimits {
    pub fn new(lower: Joints, upper: Joints) -> Result<Self, ModelError> {
        let limits = Self { lower, upper };
        limits.validate()?;
        Ok(limits)
    }

    fn validate(&self) -> Result<(), ModelError> {
        for joint in 0..JOINT_COUNT {
            let (lower, upper) = (self.lower[joint], self.upper[joint]);
            if !(lower.is_finite() && upper.is_finite()) || lower > upper {
                return Err(ModelError::InvalidLimits {
                    joint,
                    lower,
                    upper,
                });
            }
        }
        Ok(())
    }

    #[inline]
    pub fn contains(&self, joint: usize, angle: f64) -> bool {
        angle >= self.lower[joint] - LIMIT_EPS && angle <= self.upper[joint] + LIMIT_EPS
    }

    /// First joint outside its range, if any. NaN counts as outside.
    pub fn first_violation(&self, q: &Joints) -> Option<usize> {
        (0..JOINT_COUNT).find(|&j| !self.contains(j, q[j]))
    }

    /// Midpoint of every range.
    pub fn center(&self) -> Joints {
        std::array::from_fn(|j| 0.5 * (self.lower[j] + self.upper[j]))
    }
}

/// Optional length overrides; `None` keeps the nominal value.
///
/// Field names follow the parameter names the service surface exposes.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ModelParams {
    pub lox: Option<f64>,
    pub loz: Option<f64>,
    pub l2: Option<f64>,
    pub l3: Option<f64>,
    pub l4: Option<f64>,
}

impl ModelParams {
    /// Fill unset fields from `fallback`; fields already set win.
    pub fn or(self, fallback: ModelParams) -> Self {
        Self {
            lox: self.lox.or(fallback.lox),
            loz: self.loz.or(fallback.loz),
            l2: self.l2.or(fallback.l2),
            l3: self.l3.or(fallback.l3),
            l4: self.l4.or(fallback.l4),
        }
    }
}

/// Immutable geometry of the arm.
///
/// Invariants:
/// - All five lengths are positive and finite.
/// - `limits` satisfies `lower <= upper` per joint.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KinematicModel {
    base_offset_x: f64,
    base_offset_z: f64,
    upper_arm_length: f64,
    forearm_length: f64,
    tool_length: f64,
    limits: JointLimits,
}

impl Default for KinematicModel {
    fn default() -> Self {
        Self {
            base_offset_x: DEFAULT_BASE_OFFSET_X,
            base_offset_z: DEFAULT_BASE_OFFSET_Z,
            upper_arm_length: DEFAULT_UPPER_ARM_LENGTH,
            forearm_length: DEFAULT_FOREARM_LENGTH,
            tool_length: DEFAULT_TOOL_LENGTH,
            limits: JointLimits::default(),
        }
    }
}

impl KinematicModel {
    pub fn new(
        base_offset_x: f64,
        base_offset_z: f64,
        upper_arm_length: f64,
        forearm_length: f64,
        tool_length: f64,
    ) -> Result<Self, ModelError> {
        let lengths = [
            ("base_offset_x", base_offset_x),
            ("base_offset_z", base_offset_z),
            ("upper_arm_length", upper_arm_length),
            ("forearm_length", forearm_length),
            ("tool_length", tool_length),
        ];
        for (field, value) in lengths {
            if !(value.is_finite() && value > 0.0) {
                return Err(ModelError::InvalidLength { field, value });
            }
        }
        Ok(Self {
            base_offset_x,
            base_offset_z,
            upper_arm_length,
            forearm_length,
            tool_length,
            limits: JointLimits::default(),
        })
    }

    /// Build from optional overrides, defaulting each omitted field.
    pub fn from_params(params: &ModelParams) -> Result<Self, ModelError> {
        Self::new(
            params.lox.unwrap_or(DEFAULT_BASE_OFFSET_X),
            params.loz.unwrap_or(DEFAULT_BASE_OFFSET_Z),
            params.l2.unwrap_or(DEFAULT_UPPER_ARM_LENGTH),
            params.l3.unwrap_or(DEFAULT_FOREARM_LENGTH),
            params.l4.unwrap_or(DEFAULT_TOOL_LENGTH),
        )
    }

    /// Replace the joint ranges.
    pub fn with_limits(mut self, limits: JointLimits) -> Result<Self, ModelError> {
        limits.validate()?;
        self.limits = limits;
        Ok(self)
    }

    /// Fully populated parameter set (for logging and provenance).
    pub fn params(&self) -> ModelParams {
        ModelParams {
            lox: Some(self.base_offset_x),
            loz: Some(self.base_offset_z),
            l2: Some(self.upper_arm_length),
            l3: Some(self.forearm_length),
            l4: Some(self.tool_length),
        }
    }

    #[inline]
    pub fn base_offset_x(&self) -> f64 {
        self.base_offset_x
    }
    #[inline]
    pub fn base_offset_z(&self) -> f64 {
        self.base_offset_z
    }
    #[inline]
    pub fn upper_arm_length(&self) -> f64 {
        self.upper_arm_length
    }
    #[inline]
    pub fn forearm_length(&self) -> f64 {
        self.forearm_length
    }
    #[inline]
    pub fn tool_length(&self) -> f64 {
        self.tool_length
    }
    #[inline]
    pub fn limits(&self) -> &JointLimits {
        &self.limits
    }

    /// Shoulder-to-wrist distance band `[|l2 - l3|, l2 + l3]` the elbow can span.
    pub fn reach_band(&self) -> (f64, f64) {
        (
            (self.upper_arm_length - self.forearm_length).abs(),
            self.upper_arm_length + self.forearm_length,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_reference_arm() {
        let m = KinematicModel::default();
        assert_eq!(m.base_offset_x(), 0.033);
        assert_eq!(m.base_offset_z(), 0.1472);
        assert_eq!(m.upper_arm_length(), 0.155);
        assert_eq!(m.forearm_length(), 0.135);
        assert_eq!(m.tool_length(), 0.218);
        let (lo, hi) = m.reach_band();
        assert!((lo - 0.02).abs() < 1e-12);
        assert!((hi - 0.29).abs() < 1e-12);
    }

    #[test]
    fn from_params_overrides_only_given_fields() {
        let params = ModelParams {
            l2: Some(0.2),
            l4: Some(0.1),
            ..Default::default()
        };
        let m = KinematicModel::from_params(&params).unwrap();
        assert_eq!(m.upper_arm_length(), 0.2);
        assert_eq!(m.tool_length(), 0.1);
        assert_eq!(m.forearm_length(), DEFAULT_FOREARM_LENGTH);
        assert_eq!(
            KinematicModel::from_params(&ModelParams::default()).unwrap(),
            KinematicModel::default()
        );
    }

    #[test]
    fn params_or_prefers_self() {
        let cli = ModelParams {
            lox: Some(0.05),
            ..Default::default()
        };
        let file = ModelParams {
            lox: Some(0.04),
            l3: Some(0.14),
            ..Default::default()
        };
        let merged = cli.or(file);
        assert_eq!(merged.lox, Some(0.05));
        assert_eq!(merged.l3, Some(0.14));
        assert_eq!(merged.l2, None);
    }

    #[test]
    fn rejects_non_positive_and_non_finite_lengths() {
        let err = KinematicModel::new(0.033, 0.1472, 0.0, 0.135, 0.218).unwrap_err();
        assert_eq!(
            err,
            ModelError::InvalidLength {
                field: "upper_arm_length",
                value: 0.0
            }
        );
        assert!(KinematicModel::new(-0.1, 0.1472, 0.155, 0.135, 0.218).is_err());
        assert!(KinematicModel::new(0.033, f64::NAN, 0.155, 0.135, 0.218).is_err());
        assert!(KinematicModel::new(0.033, 0.1472, 0.155, f64::INFINITY, 0.218).is_err());
    }

    #[test]
    fn limits_validate_and_check_membership() {
        assert!(JointLimits::new([1.0; 5], [0.0; 5]).is_err());
        assert!(JointLimits::new([f64::NAN; 5], [0.0; 5]).is_err());
        let limits = JointLimits::new([-1.0; 5], [1.0; 5]).unwrap();
        assert_eq!(limits.first_violation(&[0.0, 0.5, -0.5, 1.0, -1.0]), None);
        assert_eq!(limits.first_violation(&[0.0, 0.5, 1.5, 1.0, 2.0]), Some(2));
        assert_eq!(limits.first_violation(&[f64::NAN, 0.0, 0.0, 0.0, 0.0]), Some(0));
        assert_eq!(limits.center(), [0.0; 5]);

        let m = KinematicModel::default().with_limits(limits).unwrap();
        assert_eq!(*m.limits(), limits);
    }

    #[test]
    fn default_limits_in_radians() {
        let limits = JointLimits::default();
        assert!((limits.upper[1] - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert!((limits.lower[0] + 169f64.to_radians()).abs() < 1e-12);
    }
}
