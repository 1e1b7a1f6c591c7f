use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use grasp_ik::api::{
    all_branches, branch_of, closest_to, draw_batch, forward, fully_constrained,
    fully_constrained_batch, pitch_of, preferred_pitch, preferred_type, Branch, BranchIndex,
    Joints, KinematicModel, ModelParams, SampleCfg, Target,
};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

mod provenance;
mod wire;

use wire::{BranchReport, ModelFile, PoseMsg, SampleMsg, SolutionMsg};

#[derive(Parser, Debug)]
#[command(name = "ik-cli")]
#[command(about = "Closed-form grasp IK for the 5-DOF arm")]
struct Cmd {
    #[command(flatten)]
    model: ModelArgs,

    #[command(subcommand)]
    action: Action,
}

/// Model geometry; flags win over `--model`, omitted values use the nominal arm.
#[derive(Args, Debug, Default)]
struct ModelArgs {
    /// JSON file with any of lox, loz, l2, l3, l4 (metres)
    #[arg(long, global = true)]
    model: Option<PathBuf>,
    /// Base-to-shoulder horizontal offset
    #[arg(long, global = true, allow_negative_numbers = true)]
    lox: Option<f64>,
    /// Base-to-shoulder vertical offset
    #[arg(long, global = true, allow_negative_numbers = true)]
    loz: Option<f64>,
    /// Upper arm length
    #[arg(long, global = true, allow_negative_numbers = true)]
    l2: Option<f64>,
    /// Forearm length
    #[arg(long, global = true, allow_negative_numbers = true)]
    l3: Option<f64>,
    /// Tool length
    #[arg(long, global = true, allow_negative_numbers = true)]
    l4: Option<f64>,
}

/// Cartesian goal shared by the solve commands.
#[derive(Args, Debug, Clone, Copy)]
struct TargetArgs {
    /// Tool tip position "x,y,z"
    #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
    position: [f64; 3],
    /// Approach (normal) direction "x,y,z"; need not be unit length
    #[arg(long, value_parser = parse_vec3, allow_hyphen_values = true)]
    normal: [f64; 3],
}

impl TargetArgs {
    fn target(&self) -> Target {
        Target::from_arrays(self.position, self.normal)
    }
}

#[derive(Subcommand, Debug)]
enum Action {
    /// Feasible branch nearest to the reference joints
    Closest {
        #[command(flatten)]
        target: TargetArgs,
        /// Reference joints "q1,...,q5" (radians)
        #[arg(long, value_parser = parse_joints, allow_hyphen_values = true)]
        reference: Joints,
    },
    /// First feasible branch with the wrist pitch pinned
    PreferredPitch {
        #[command(flatten)]
        target: TargetArgs,
        #[arg(long, allow_hyphen_values = true)]
        pitch: f64,
    },
    /// One named branch, pitch derived from the normal
    PreferredType {
        #[command(flatten)]
        target: TargetArgs,
        #[arg(long, action = clap::ArgAction::Set)]
        arm_to_front: bool,
        #[arg(long, action = clap::ArgAction::Set)]
        arm_bended_up: bool,
        #[arg(long, action = clap::ArgAction::Set)]
        gripper_downwards: bool,
    },
    /// Branch index and pitch both pinned
    FullyConstrained {
        #[command(flatten)]
        target: TargetArgs,
        /// Branch index 0..=7 (front*4 + bended_up*2 + downwards)
        #[arg(long, allow_hyphen_values = true)]
        branch: i64,
        #[arg(long, allow_hyphen_values = true)]
        pitch: f64,
    },
    /// Fully constrained solve over a JSON array of requests
    Batch {
        /// Request file, or "-" for stdin
        #[arg(long)]
        input: String,
        /// Write results here (plus a provenance sidecar) instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Raw result and status of all eight branches
    Branches {
        #[command(flatten)]
        target: TargetArgs,
        #[arg(long, allow_hyphen_values = true)]
        pitch: Option<f64>,
    },
    /// Forward kinematics for a joint vector
    Forward {
        #[arg(long, value_parser = parse_joints, allow_hyphen_values = true)]
        joints: Joints,
    },
    /// Reachable targets drawn from random joints
    Sample {
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(long, default_value_t = 8)]
        count: usize,
        /// Radians kept clear of each joint limit
        #[arg(long, default_value_t = SampleCfg::default().limit_margin)]
        margin: f64,
    },
    /// Print the resolved model parameters and joint ranges
    Params,
}

fn main() -> Result<()> {
    SubscriberBuilder::default()
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
    let cmd = Cmd::parse();
    let model = resolve_model(&cmd.model)?;
    tracing::info!(
        lox = model.base_offset_x(),
        loz = model.base_offset_z(),
        l2 = model.upper_arm_length(),
        l3 = model.forearm_length(),
        l4 = model.tool_length(),
        "model"
    );
    let out = execute(&model, cmd.action)?;
    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

/// Overlay flags on the optional model file, then validate.
fn resolve_model(args: &ModelArgs) -> Result<KinematicModel> {
    let from_file = match &args.model {
        Some(path) => read_model_file(path)?,
        None => ModelParams::default(),
    };
    let flags = ModelParams {
        lox: args.lox,
        loz: args.loz,
        l2: args.l2,
        l3: args.l3,
        l4: args.l4,
    };
    KinematicModel::from_params(&flags.or(from_file)).context("invalid model parameters")
}

fn read_model_file(path: &Path) -> Result<ModelParams> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading model file {}", path.display()))?;
    let file: ModelFile = serde_json::from_str(&text)
        .with_context(|| format!("parsing model file {}", path.display()))?;
    Ok(file.into())
}

fn execute(model: &KinematicModel, action: Action) -> Result<Value> {
    let value = match action {
        Action::Closest { target, reference } => {
            let sol = closest_to(model, &reference, &target.target());
            tracing::debug!(branch = %sol.branch, status = %sol.status, "closest");
            serde_json::to_value(SolutionMsg::from(&sol))?
        }
        Action::PreferredPitch { target, pitch } => {
            let sol = preferred_pitch(model, pitch, &target.target());
            serde_json::to_value(SolutionMsg::from(&sol))?
        }
        Action::PreferredType {
            target,
            arm_to_front,
            arm_bended_up,
            gripper_downwards,
        } => {
            let branch = Branch::new(arm_to_front, arm_bended_up, gripper_downwards);
            let sol = preferred_type(model, branch, &target.target());
            serde_json::to_value(SolutionMsg::from(&sol))?
        }
        Action::FullyConstrained {
            target,
            branch,
            pitch,
        } => {
            let index = BranchIndex::try_from(branch)?;
            let sol = fully_constrained(model, index, pitch, &target.target());
            serde_json::to_value(SolutionMsg::from(&sol))?
        }
        Action::Batch { input, out } => batch(model, &input, out.as_deref())?,
        Action::Branches { target, pitch } => {
            let reports: Vec<BranchReport> = all_branches(model, &target.target(), pitch)
                .iter()
                .map(BranchReport::from)
                .collect();
            serde_json::to_value(reports)?
        }
        Action::Forward { joints } => {
            let pose = forward(model, &joints);
            serde_json::to_value(PoseMsg::new(
                &pose,
                pitch_of(&joints),
                branch_of(model, &joints),
            ))?
        }
        Action::Sample {
            seed,
            count,
            margin,
        } => {
            let cfg = SampleCfg {
                limit_margin: margin,
            };
            let samples: Vec<SampleMsg> = draw_batch(model, cfg, seed, count)
                .iter()
                .map(SampleMsg::from)
                .collect();
            serde_json::to_value(samples)?
        }
        Action::Params => {
            let limits = model.limits();
            json!({
                "params": ModelFile::from(model.params()),
                "limits_deg": {
                    "lower": limits.lower.map(f64::to_degrees),
                    "upper": limits.upper.map(f64::to_degrees),
                },
                "version": grasp_ik::VERSION,
            })
        }
    };
    Ok(value)
}

fn batch(model: &KinematicModel, input: &str, out: Option<&Path>) -> Result<Value> {
    let text = if input == "-" {
        std::io::read_to_string(std::io::stdin()).context("reading batch from stdin")?
    } else {
        std::fs::read_to_string(input).with_context(|| format!("reading batch {input}"))?
    };
    let requests = wire::parse_batch(&text)?;
    let results: Vec<SolutionMsg> = fully_constrained_batch(model, &requests)
        .iter()
        .map(SolutionMsg::from)
        .collect();
    let feasible = results.iter().filter(|r| r.feasible).count();
    tracing::info!(requests = requests.len(), feasible, "batch");

    let Some(out) = out else {
        return Ok(serde_json::to_value(results)?);
    };
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    std::fs::write(out, serde_json::to_vec_pretty(&results)?)
        .with_context(|| format!("writing {}", out.display()))?;
    let payload = provenance::Payload::new(json!({
        "model": ModelFile::from(model.params()),
        "input": input,
        "requests": requests.len(),
        "feasible": feasible,
    }));
    let sidecar = provenance::write_sidecar(out, payload)?;
    Ok(json!({
        "out": out.to_string_lossy(),
        "provenance": sidecar.to_string_lossy(),
        "requests": requests.len(),
        "feasible": feasible,
    }))
}

fn parse_floats<const N: usize>(s: &str) -> Result<[f64; N]> {
    let parts: Vec<f64> = s
        .split(',')
        .map(|p| p.trim().parse::<f64>())
        .collect::<Result<_, _>>()
        .with_context(|| format!("not a number list: {s:?}"))?;
    match <[f64; N]>::try_from(parts) {
        Ok(arr) => Ok(arr),
        Err(parts) => bail!("expected {N} comma-separated values, got {}", parts.len()),
    }
}

fn parse_vec3(s: &str) -> Result<[f64; 3], String> {
    parse_floats::<3>(s).map_err(|e| format!("{e:#}"))
}

fn parse_joints(s: &str) -> Result<Joints, String> {
    parse_floats::<5>(s).map_err(|e| format!("{e:#}"))
}
