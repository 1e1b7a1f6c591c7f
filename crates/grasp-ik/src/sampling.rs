//! Reachable targets from random joint configurations (replay tokens).
//!
//! Purpose
//! - Produce targets that are known to be reachable, by drawing joints inside
//!   the model's ranges and mapping them through forward kinematics. Tests,
//!   benchmarks and the CLI use these as ground truth.
//!
//! Model
//! - Each joint is uniform on its range shrunk by `limit_margin` on both sides.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG,
//!   so any draw of a batch can be regenerated on its own.
//!
//! Code cross-refs: `forward::forward`, `forward::branch_of`

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::branch::Branch;
use crate::forward::{branch_of, forward};
use crate::model::{Joints, KinematicModel, JOINT_COUNT};
use crate::solver::Target;

/// Sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct SampleCfg {
    /// Radians kept clear of each mechanical limit. Clamped so the range stays non-empty.
    pub limit_margin: f64,
}

impl Default for SampleCfg {
    fn default() -> Self {
        Self { limit_margin: 0.05 }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}

impl ReplayToken {
    #[inline]
    pub fn new(seed: u64, index: u64) -> Self {
        Self { seed, index }
    }

    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64 finalizer.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// Joints, the target they reach, and the branch they belong to.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ReachableSample {
    pub joints: Joints,
    pub target: Target,
    pub branch: Branch,
    pub replay: ReplayToken,
}

/// Draw one configuration inside the (shrunk) joint ranges.
pub fn draw_joints(model: &KinematicModel, cfg: SampleCfg, tok: ReplayToken) -> Joints {
    let mut rng = tok.to_std_rng();
    let limits = model.limits();
    let mut q = [0.0; JOINT_COUNT];
    for (j, angle) in q.iter_mut().enumerate() {
        let (lo, hi) = (limits.lower[j], limits.upper[j]);
        let margin = cfg.limit_margin.clamp(0.0, 0.5 * (hi - lo));
        let lo = lo + margin;
        *angle = rng.gen_range(lo..=(hi - margin).max(lo));
    }
    q
}

/// Draw a reachable target together with the joints that reach it.
pub fn draw_reachable(model: &KinematicModel, cfg: SampleCfg, tok: ReplayToken) -> ReachableSample {
    let joints = draw_joints(model, cfg, tok);
    let pose = forward(model, &joints);
    ReachableSample {
        joints,
        target: Target::new(pose.position, pose.approach),
        branch: branch_of(model, &joints),
        replay: tok,
    }
}

/// `count` draws with indices `0..count` under one seed.
pub fn draw_batch(
    model: &KinematicModel,
    cfg: SampleCfg,
    seed: u64,
    count: usize,
) -> Vec<ReachableSample> {
    (0..count as u64)
        .map(|index| draw_reachable(model, cfg, ReplayToken::new(seed, index)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replay_is_deterministic() {
        let m = KinematicModel::default();
        let cfg = SampleCfg::default();
        let a = draw_reachable(&m, cfg, ReplayToken::new(42, 7));
        let b = draw_reachable(&m, cfg, ReplayToken::new(42, 7));
        assert_eq!(a, b);
        let c = draw_reachable(&m, cfg, ReplayToken::new(42, 8));
        assert_ne!(a.joints, c.joints);
    }

    #[test]
    fn batch_entries_replay_individually() {
        let m = KinematicModel::default();
        let cfg = SampleCfg::default();
        let batch = draw_batch(&m, cfg, 2025, 16);
        assert_eq!(batch.len(), 16);
        for (i, s) in batch.iter().enumerate() {
            assert_eq!(s.replay, ReplayToken::new(2025, i as u64));
            assert_eq!(*s, draw_reachable(&m, cfg, s.replay));
        }
    }

    #[test]
    fn draws_stay_inside_shrunk_ranges() {
        let m = KinematicModel::default();
        let cfg = SampleCfg { limit_margin: 0.1 };
        let limits = m.limits();
        for s in draw_batch(&m, cfg, 3, 200) {
            for j in 0..JOINT_COUNT {
                assert!(s.joints[j] >= limits.lower[j] + 0.1 - 1e-12);
                assert!(s.joints[j] <= limits.upper[j] - 0.1 + 1e-12);
            }
            assert!((s.target.approach.norm() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn oversized_margin_collapses_to_range_center() {
        let m = KinematicModel::default();
        let q = draw_joints(&m, SampleCfg { limit_margin: 1e3 }, ReplayToken::new(1, 1));
        let center = m.limits().center();
        for j in 0..JOINT_COUNT {
            assert!((q[j] - center[j]).abs() < 1e-9);
        }
    }
}
