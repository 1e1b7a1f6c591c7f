//! Selection policies over the eight branches.
//!
//! Purpose
//! - Turn the per-branch solver into the entry points callers use: nearest to
//!   a reference pose, first feasible at a given pitch, one named branch, and
//!   the fully constrained mode (single and batched).
//!
//! Policy
//! - Nothing here fails. When no branch is feasible the policies that search
//!   return branch 0's raw result with its infeasible status; callers check
//!   `JointSolution::feasible`.
//! - Ties are broken by ascending branch index, so results are deterministic.
//!
//! Code cross-refs: `solver::solve`, `BranchSpace::ALL`

use tracing::{debug, trace};

use crate::branch::{Branch, BranchIndex, BranchSpace};
use crate::model::{Joints, KinematicModel};
use crate::solver::{solve, JointSolution, Target};

/// Raw results for all eight branches, in index order.
pub fn all_branches(
    model: &KinematicModel,
    target: &Target,
    pitch: Option<f64>,
) -> [JointSolution; BranchSpace::COUNT] {
    BranchSpace::ALL.map(|b| solve(model, b, target, pitch))
}

/// Feasible branch minimizing the Euclidean joint distance to `reference`.
pub fn closest_to(model: &KinematicModel, reference: &Joints, target: &Target) -> JointSolution {
    let candidates = all_branches(model, target, None);
    let mut best: Option<(JointSolution, f64)> = None;
    for sol in candidates.iter().filter(|s| s.feasible()) {
        let dist = sol.distance_to(reference);
        trace!(branch = %sol.branch, dist, "closest_to candidate");
        // Strict comparison keeps the lower index on ties.
        if best.as_ref().is_none_or(|(_, d)| dist < *d) {
            best = Some((*sol, dist));
        }
    }
    match best {
        Some((sol, dist)) => {
            debug!(branch = %sol.branch, dist, "closest_to picked");
            sol
        }
        None => {
            debug!(status = %candidates[0].status, "closest_to: no feasible branch");
            candidates[0]
        }
    }
}

/// First feasible branch, in ascending index order, with the pitch pinned.
pub fn preferred_pitch(model: &KinematicModel, pitch: f64, target: &Target) -> JointSolution {
    for branch in BranchSpace::iter() {
        let sol = solve(model, branch, target, Some(pitch));
        if sol.feasible() {
            debug!(branch = %branch, pitch, "preferred_pitch picked");
            return sol;
        }
        trace!(branch = %branch, status = %sol.status, "preferred_pitch rejected");
    }
    debug!(pitch, "preferred_pitch: no feasible branch");
    solve(model, BranchSpace::ALL[0], target, Some(pitch))
}

/// The named branch with the pitch derived from the approach direction.
#[inline]
pub fn preferred_type(model: &KinematicModel, branch: Branch, target: &Target) -> JointSolution {
    solve(model, branch, target, None)
}

/// Branch and pitch both fixed by the caller.
///
/// The pitch is authoritative; the approach direction only sets the wrist roll.
#[inline]
pub fn fully_constrained(
    model: &KinematicModel,
    index: BranchIndex,
    pitch: f64,
    target: &Target,
) -> JointSolution {
    solve(model, index.branch(), target, Some(pitch))
}

/// One entry of a fully constrained batch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FullyConstrainedRequest {
    pub branch: BranchIndex,
    pub pitch: f64,
    pub target: Target,
}

/// `fully_constrained` applied to each request; output order equals input order.
pub fn fully_constrained_batch(
    model: &KinematicModel,
    requests: &[FullyConstrainedRequest],
) -> Vec<JointSolution> {
    let out: Vec<JointSolution> = requests
        .iter()
        .map(|r| fully_constrained(model, r.branch, r.pitch, &r.target))
        .collect();
    debug!(
        requests = requests.len(),
        feasible = out.iter().filter(|s| s.feasible()).count(),
        "fully_constrained_batch done"
    );
    out
}
