//! Continuity probe: follow a straight Cartesian path with `closest_to`.
//!
//! Purpose
//! - Show that seeding each call with the previous joints keeps the arm on one
//!   branch along a smooth path, and print the largest joint step per sample.
//!
//! Why this shape
//! - The path descends in front of the base with the gripper pointing down,
//!   which stays reachable for the nominal arm over its whole length.
//!
//! Code: crates/grasp-ik/src/select.rs::closest_to

use std::time::Instant;

use grasp_ik::api::{closest_to, forward, KinematicModel, Target};
use nalgebra::Vector3;

fn main() {
    let model = KinematicModel::default();
    let steps = 40;
    let start = Vector3::new(0.22, -0.08, 0.20);
    let end = Vector3::new(0.22, 0.08, 0.05);
    let approach = Vector3::x();

    let mut current = model.limits().center();
    let mut max_step: f64 = 0.0;
    let mut infeasible = 0usize;
    let t0 = Instant::now();
    for k in 0..=steps {
        let s = k as f64 / steps as f64;
        let target = Target::new(start.lerp(&end, s), approach);
        let sol = closest_to(&model, &current, &target);
        if !sol.feasible() {
            infeasible += 1;
            println!("k={k:>2} status={} branch={}", sol.status, sol.branch);
            continue;
        }
        let step = sol.distance_to(&current);
        if k > 0 {
            max_step = max_step.max(step);
        }
        let tip = forward(&model, &sol.joints).position;
        println!(
            "k={k:>2} branch={} pitch={:+.3} err={:.1e} step={:.4}",
            sol.branch,
            sol.pitch(),
            (tip - target.position).norm(),
            step
        );
        current = sol.joints;
    }
    let elapsed_us = t0.elapsed().as_secs_f64() * 1e6;
    println!(
        "samples={} infeasible={} max_step_rad={:.4} total_us={:.1}",
        steps + 1,
        infeasible,
        max_step,
        elapsed_us
    );
}
