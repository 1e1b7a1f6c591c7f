//! Shoulder/elbow sub-chain: two links in the arm plane, law of cosines.

use crate::cfg::REACH_EPS;
use crate::wrap_angle;

/// Shoulder and elbow angles, absolute-from-vertical convention.
#[derive(Clone, Copy, Debug)]
pub(crate) struct TwoLink {
    pub shoulder: f64,
    pub elbow: f64,
}

/// Place the tip of links `(l2, l3)` at `(dr, dz)` relative to the shoulder.
///
/// `elbow_sign` (±1) picks one of the two mirror solutions. `None` when the
/// distance leaves `[|l2 - l3|, l2 + l3]` by more than `REACH_EPS` on the
/// cosine. Callers guarantee `l2, l3 > 0`.
pub(crate) fn two_link(l2: f64, l3: f64, dr: f64, dz: f64, elbow_sign: f64) -> Option<TwoLink> {
    let d2 = dr * dr + dz * dz;
    let cos_elbow = (d2 - l2 * l2 - l3 * l3) / (2.0 * l2 * l3);
    if !cos_elbow.is_finite() || cos_elbow.abs() > 1.0 + REACH_EPS {
        return None;
    }
    let elbow = elbow_sign * cos_elbow.clamp(-1.0, 1.0).acos();
    // Angle to the wrist minus the interior angle at the shoulder.
    let shoulder = dr.atan2(dz) - (l3 * elbow.sin()).atan2(l2 + l3 * elbow.cos());
    Some(TwoLink {
        shoulder: wrap_angle(shoulder),
        elbow,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tip(l2: f64, l3: f64, s: TwoLink) -> (f64, f64) {
        let a2 = s.shoulder + s.elbow;
        (
            l2 * s.shoulder.sin() + l3 * a2.sin(),
            l2 * s.shoulder.cos() + l3 * a2.cos(),
        )
    }

    #[test]
    fn both_signs_reach_the_same_point() {
        let (l2, l3) = (0.155, 0.135);
        let (dr, dz) = (0.2, 0.05);
        let up = two_link(l2, l3, dr, dz, 1.0).unwrap();
        let down = two_link(l2, l3, dr, dz, -1.0).unwrap();
        assert!(up.elbow > 0.0 && down.elbow < 0.0);
        assert!((up.elbow + down.elbow).abs() < 1e-12);
        for s in [up, down] {
            let (r, z) = tip(l2, l3, s);
            assert!((r - dr).abs() < 1e-12 && (z - dz).abs() < 1e-12);
        }
    }

    #[test]
    fn outside_the_annulus_is_unreachable() {
        let (l2, l3) = (0.155, 0.135);
        assert!(two_link(l2, l3, 0.3, 0.0, 1.0).is_none());
        assert!(two_link(l2, l3, 0.01, 0.0, 1.0).is_none());
        assert!(two_link(l2, l3, f64::NAN, 0.0, 1.0).is_none());
    }

    #[test]
    fn boundary_reach_is_accepted() {
        let (l2, l3) = (0.155, 0.135);
        let full = two_link(l2, l3, 0.0, l2 + l3, 1.0).unwrap();
        assert!(full.elbow.abs() < 1e-6);
        assert!(full.shoulder.abs() < 1e-6);
        let folded = two_link(l2, l3, 0.0, l2 - l3, -1.0).unwrap();
        assert!((folded.elbow.abs() - std::f64::consts::PI).abs() < 1e-6);
    }
}
