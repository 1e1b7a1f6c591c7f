//! Discrete solution branches and their index mapping.
//!
//! A target admits up to eight closed-form solutions, one per combination of
//! reach side, elbow configuration and wrist flip. `Branch` names one of them;
//! `BranchIndex` is its stable small-integer handle:
//!
//! `index = arm_to_front * 4 + arm_bended_up * 2 + gripper_downwards`
//!
//! The derived `Ord` on `Branch` (field order, `false < true`) agrees with the
//! index order, so `BranchSpace::ALL` is sorted under both.

use std::fmt;

use thiserror::Error;

/// One of the eight joint-configuration families for a Cartesian target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Branch {
    /// Reach over the front of the yaw axis (otherwise lean back over the rear).
    pub arm_to_front: bool,
    /// Elbow above the shoulder–wrist line.
    pub arm_bended_up: bool,
    /// Tool axis in the lower pitch hemisphere `(-π, 0]`.
    pub gripper_downwards: bool,
}

impl Branch {
    #[inline]
    pub const fn new(arm_to_front: bool, arm_bended_up: bool, gripper_downwards: bool) -> Self {
        Self {
            arm_to_front,
            arm_bended_up,
            gripper_downwards,
        }
    }

    #[inline]
    pub const fn index(self) -> BranchIndex {
        BranchIndex(
            (self.arm_to_front as u8) << 2
                | (self.arm_bended_up as u8) << 1
                | self.gripper_downwards as u8,
        )
    }

    #[inline]
    pub const fn from_index(index: BranchIndex) -> Self {
        let i = index.0;
        Self::new(i & 0b100 != 0, i & 0b010 != 0, i & 0b001 != 0)
    }

    /// Same reach and elbow, wrist flipped to the other pitch hemisphere.
    #[inline]
    pub const fn flipped_wrist(self) -> Self {
        Self::new(self.arm_to_front, self.arm_bended_up, !self.gripper_downwards)
    }

    /// +1 or -1: sign of the elbow angle in the candle-zero convention.
    ///
    /// Leaning back mirrors the arm plane, so "elbow up" flips sign there.
    #[inline]
    pub(crate) fn elbow_sign(self) -> f64 {
        if self.arm_bended_up == self.arm_to_front {
            1.0
        } else {
            -1.0
        }
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}/{}/{}",
            if self.arm_to_front { "front" } else { "back" },
            if self.arm_bended_up { "elbow-up" } else { "elbow-down" },
            if self.gripper_downwards {
                "gripper-down"
            } else {
                "gripper-up"
            },
        )
    }
}

/// Branch index outside `0..=7`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("branch index {0} outside 0..=7")]
pub struct BranchIndexError(pub i64);

/// Validated branch index in `0..=7`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BranchIndex(u8);

impl BranchIndex {
    pub const MAX: u8 = 7;

    #[inline]
    pub const fn new(index: u8) -> Option<Self> {
        if index <= Self::MAX {
            Some(Self(index))
        } else {
            None
        }
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn branch(self) -> Branch {
        Branch::from_index(self)
    }
}

impl TryFrom<i64> for BranchIndex {
    type Error = BranchIndexError;
    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .and_then(Self::new)
            .ok_or(BranchIndexError(value))
    }
}

impl TryFrom<u8> for BranchIndex {
    type Error = BranchIndexError;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or(BranchIndexError(i64::from(value)))
    }
}

impl TryFrom<usize> for BranchIndex {
    type Error = BranchIndexError;
    fn try_from(value: usize) -> Result<Self, Self::Error> {
        i64::try_from(value)
            .map_err(|_| BranchIndexError(i64::MAX))
            .and_then(|v: i64| Self::try_from(v))
    }
}

impl From<BranchIndex> for usize {
    #[inline]
    fn from(index: BranchIndex) -> Self {
        usize::from(index.0)
    }
}

impl From<Branch> for BranchIndex {
    #[inline]
    fn from(branch: Branch) -> Self {
        branch.index()
    }
}

impl fmt::Display for BranchIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The fixed, ordered set of all branches.
pub struct BranchSpace;

impl BranchSpace {
    pub const COUNT: usize = 8;

    /// All branches in ascending index order.
    pub const ALL: [Branch; Self::COUNT] = [
        Branch::from_index(BranchIndex(0)),
        Branch::from_index(BranchIndex(1)),
        Branch::from_index(BranchIndex(2)),
        Branch::from_index(BranchIndex(3)),
        Branch::from_index(BranchIndex(4)),
        Branch::from_index(BranchIndex(5)),
        Branch::from_index(BranchIndex(6)),
        Branch::from_index(BranchIndex(7)),
    ];

    #[inline]
    pub fn iter() -> impl Iterator<Item = Branch> {
        Self::ALL.into_iter()
    }

    #[inline]
    pub fn branch(index: BranchIndex) -> Branch {
        Self::ALL[usize::from(index)]
    }
}
