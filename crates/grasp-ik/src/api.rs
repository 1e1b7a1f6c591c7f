//! Curated surface for the service layer and experiments.
//!
//! Important
//! - Convenience re-exports only; the modules stay the source of truth.
//! - The CLI imports from here so the marshaling code has one place to look.

// Model and configuration
pub use crate::model::{
    JointLimits, Joints, KinematicModel, ModelError, ModelParams, DEFAULT_BASE_OFFSET_X,
    DEFAULT_BASE_OFFSET_Z, DEFAULT_FOREARM_LENGTH, DEFAULT_TOOL_LENGTH, DEFAULT_UPPER_ARM_LENGTH,
    JOINT_COUNT,
};
// Branches
pub use crate::branch::{Branch, BranchIndex, BranchIndexError, BranchSpace};
// Solving and selection
pub use crate::select::{
    all_branches, closest_to, fully_constrained, fully_constrained_batch, preferred_pitch,
    preferred_type, FullyConstrainedRequest,
};
pub use crate::solver::{solve, JointSolution, SolveStatus, Target};
// Forward kinematics and sampling
pub use crate::forward::{branch_of, forward, pitch_of, Pose};
pub use crate::sampling::{
    draw_batch, draw_joints, draw_reachable, ReachableSample, ReplayToken as SampleReplay,
    SampleCfg,
};
