//! JSON shapes exchanged with callers, and their mapping to engine types.
//!
//! Conventions
//! - Flat arrays on the wire: `des_position[3]`, `des_normal[3]`,
//!   `joint_angles[5]`. Radians and metres, as in the engine.
//! - A solve response is always `{joint_angles, feasible, arm_to_front,
//!   arm_bended_up, gripper_downwards}`; infeasibility is data, not an error.

use anyhow::{Context, Result};
use grasp_ik::api::{
    BranchIndex, FullyConstrainedRequest, JointSolution, Joints, ModelParams, Pose,
    ReachableSample, Target,
};
use serde::{Deserialize, Serialize};

/// Optional model overrides as read from `--model <file.json>`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelFile {
    pub lox: Option<f64>,
    pub loz: Option<f64>,
    pub l2: Option<f64>,
    pub l3: Option<f64>,
    pub l4: Option<f64>,
}

impl From<ModelFile> for ModelParams {
    fn from(f: ModelFile) -> Self {
        ModelParams {
            lox: f.lox,
            loz: f.loz,
            l2: f.l2,
            l3: f.l3,
            l4: f.l4,
        }
    }
}

impl From<ModelParams> for ModelFile {
    fn from(p: ModelParams) -> Self {
        ModelFile {
            lox: p.lox,
            loz: p.loz,
            l2: p.l2,
            l3: p.l3,
            l4: p.l4,
        }
    }
}

/// Solve response.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SolutionMsg {
    pub joint_angles: Joints,
    pub feasible: bool,
    pub arm_to_front: bool,
    pub arm_bended_up: bool,
    pub gripper_downwards: bool,
}

impl From<&JointSolution> for SolutionMsg {
    fn from(s: &JointSolution) -> Self {
        SolutionMsg {
            joint_angles: s.joints,
            feasible: s.feasible(),
            arm_to_front: s.branch.arm_to_front,
            arm_bended_up: s.branch.arm_bended_up,
            gripper_downwards: s.branch.gripper_downwards,
        }
    }
}

/// Per-branch diagnostics for the `branches` command.
#[derive(Clone, Debug, Serialize)]
pub struct BranchReport {
    pub index: u8,
    pub status: String,
    pub pitch: f64,
    #[serde(flatten)]
    pub solution: SolutionMsg,
}

impl From<&JointSolution> for BranchReport {
    fn from(s: &JointSolution) -> Self {
        BranchReport {
            index: s.branch.index().get(),
            status: s.status.to_string(),
            pitch: s.pitch(),
            solution: s.into(),
        }
    }
}

/// One entry of a `batch` input file.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BatchRequestMsg {
    pub branch_index: i64,
    pub pitch: f64,
    pub des_position: [f64; 3],
    pub des_normal: [f64; 3],
}

impl BatchRequestMsg {
    pub fn to_request(&self) -> Result<FullyConstrainedRequest> {
        let branch = BranchIndex::try_from(self.branch_index)?;
        Ok(FullyConstrainedRequest {
            branch,
            pitch: self.pitch,
            target: Target::from_arrays(self.des_position, self.des_normal),
        })
    }
}

/// Parse a batch document (a JSON array of requests) in input order.
pub fn parse_batch(text: &str) -> Result<Vec<FullyConstrainedRequest>> {
    let msgs: Vec<BatchRequestMsg> =
        serde_json::from_str(text).context("parsing batch requests")?;
    msgs.iter()
        .enumerate()
        .map(|(i, m)| m.to_request().with_context(|| format!("batch request {i}")))
        .collect()
}

/// Forward-kinematics response.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct PoseMsg {
    pub position: [f64; 3],
    pub tool_axis: [f64; 3],
    pub approach: [f64; 3],
    pub pitch: f64,
    pub arm_to_front: bool,
    pub arm_bended_up: bool,
    pub gripper_downwards: bool,
}

impl PoseMsg {
    pub fn new(pose: &Pose, pitch: f64, branch: grasp_ik::api::Branch) -> Self {
        PoseMsg {
            position: pose.position.into(),
            tool_axis: pose.tool_axis.into(),
            approach: pose.approach.into(),
            pitch,
            arm_to_front: branch.arm_to_front,
            arm_bended_up: branch.arm_bended_up,
            gripper_downwards: branch.gripper_downwards,
        }
    }
}

/// Sampled reachable target, replayable by `(seed, index)`.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct SampleMsg {
    pub seed: u64,
    pub index: u64,
    pub branch_index: u8,
    pub joint_angles: Joints,
    pub des_position: [f64; 3],
    pub des_normal: [f64; 3],
}

impl From<&ReachableSample> for SampleMsg {
    fn from(s: &ReachableSample) -> Self {
        SampleMsg {
            seed: s.replay.seed,
            index: s.replay.index,
            branch_index: s.branch.index().get(),
            joint_angles: s.joints,
            des_position: s.target.position.into(),
            des_normal: s.target.approach.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use grasp_ik::api::{solve, Branch, KinematicModel};
    use serde_json::json;

    #[test]
    fn solution_msg_has_the_service_shape() {
        let m = KinematicModel::default();
        let t = Target::from_arrays([0.25, 0.0, 0.05], [1.0, 0.0, 0.0]);
        let sol = solve(&m, Branch::new(true, true, true), &t, None);
        let v = serde_json::to_value(SolutionMsg::from(&sol)).unwrap();
        let obj = v.as_object().unwrap();
        let mut keys: Vec<_> = obj.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            [
                "arm_bended_up",
                "arm_to_front",
                "feasible",
                "gripper_downwards",
                "joint_angles"
            ]
        );
        assert_eq!(v["feasible"], json!(true));
        assert_eq!(v["joint_angles"].as_array().unwrap().len(), 5);
    }

    #[test]
    fn branch_report_flattens_solution() {
        let m = KinematicModel::default();
        let t = Target::from_arrays([0.25, 0.0, 0.05], [1.0, 0.0, 0.0]);
        let sol = solve(&m, Branch::new(true, false, true), &t, None);
        let v = serde_json::to_value(BranchReport::from(&sol)).unwrap();
        assert_eq!(v["index"], json!(5));
        assert_eq!(v["status"], json!("joint 4 out of range"));
        assert_eq!(v["feasible"], json!(false));
        assert_eq!(v["arm_bended_up"], json!(false));
    }

    #[test]
    fn batch_parsing_keeps_order_and_rejects_bad_index() {
        let text = json!([
            {"branch_index": 7, "pitch": -1.5, "des_position": [0.25, 0.0, 0.05], "des_normal": [1.0, 0.0, 0.0]},
            {"branch_index": 0, "pitch": 0.0, "des_position": [1.0, 0.0, 0.0], "des_normal": [0.0, 0.0, 1.0]}
        ])
        .to_string();
        let reqs = parse_batch(&text).unwrap();
        assert_eq!(reqs.len(), 2);
        assert_eq!(reqs[0].branch.get(), 7);
        assert_eq!(reqs[1].branch.get(), 0);
        assert_eq!(reqs[1].target.position.x, 1.0);

        let bad = json!([
            {"branch_index": 8, "pitch": 0.0, "des_position": [0.0, 0.0, 0.0], "des_normal": [0.0, 0.0, 1.0]}
        ])
        .to_string();
        let err = parse_batch(&bad).unwrap_err();
        assert!(format!("{err:#}").contains("batch request 0"));
        assert!(parse_batch("{}").is_err());
    }

    #[test]
    fn model_file_rejects_unknown_keys() {
        let f: ModelFile = serde_json::from_str(r#"{"l2": 0.2}"#).unwrap();
        assert_eq!(ModelParams::from(f).l2, Some(0.2));
        assert!(serde_json::from_str::<ModelFile>(r#"{"l5": 0.2}"#).is_err());
    }
}
