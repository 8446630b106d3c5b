//! Solution computation and verification.
//!
//! Computes, from the scrambled state alone, the descriptor a correct
//! user action must produce, and compares client submissions against it
//! with exact equality. No tolerance window applies to rotation values;
//! clients must snap to the same discrete degree steps the scrambler
//! draws from.

use crate::config::{CaptchaError, Result};
use crate::puzzle::Picture;
use crate::puzzle::tile::normalize_degrees;
use crate::scramble::Scheme;

/// Scheme-dependent solution descriptor.
#[derive(Debug, Clone, PartialEq)]
pub enum Solution {
    /// Rows: the inverse permutation of the current tile order.
    Rows(Vec<usize>),
    /// Grid: `(tile_id, rotation degrees)` per display slot.
    Grid(Vec<(usize, f64)>),
    /// Rings: rotation degrees per ring, excluding the fixed background.
    Rings(Vec<f64>),
}

impl Solution {
    /// The scheme whose shape this descriptor has.
    #[must_use]
    pub fn scheme(&self) -> Scheme {
        match self {
            Self::Rows(_) => Scheme::Rows,
            Self::Grid(_) => Scheme::Grid,
            Self::Rings(_) => Scheme::Rings,
        }
    }
}

/// Computes the descriptor a correctly-solved arrangement must match.
#[must_use]
pub fn solve(picture: &Picture) -> Solution {
    match picture.scheme() {
        Scheme::Rows => Solution::Rows(solve_rows(picture)),
        Scheme::Grid => Solution::Grid(solve_grid(picture)),
        Scheme::Rings => Solution::Rings(solve_rings(picture)),
    }
}

/// For each tile-id, the slot it currently occupies: the inverse
/// permutation of `tile_order`. Submitting this sequence restores the
/// identity order.
fn solve_rows(picture: &Picture) -> Vec<usize> {
    let order = picture.tile_order();
    // `order` is a validated permutation, so this fills every slot.
    let mut inverse = vec![0; order.len()];
    for (slot, &id) in order.iter().enumerate() {
        inverse[id] = slot;
    }
    inverse
}

/// For each display slot in order, the occupying tile-id and its current
/// rotation. Solved means every id equals its slot and every rotation is
/// zero.
fn solve_grid(picture: &Picture) -> Vec<(usize, f64)> {
    picture
        .tile_order()
        .iter()
        .map(|&id| (id, normalize_degrees(picture.tiles()[id].rotation())))
        .collect()
}

/// Current rotation per ring, background excluded. Solved means all
/// zeros.
fn solve_rings(picture: &Picture) -> Vec<f64> {
    picture.tiles()[1..]
        .iter()
        .map(|tile| normalize_degrees(tile.rotation()))
        .collect()
}

/// Compares a submitted descriptor against the solver's.
///
/// The picture is read, never mutated, so concurrent verification
/// attempts against one stored picture are safe.
///
/// # Errors
///
/// Returns [`CaptchaError::MalformedDescriptor`] if the submission's
/// variant or length does not match the active scheme's shape.
pub fn verify(picture: &Picture, submitted: &Solution) -> Result<bool> {
    if submitted.scheme() != picture.scheme() {
        return Err(CaptchaError::MalformedDescriptor(format!(
            "expected a {} descriptor, got {}",
            picture.scheme(),
            submitted.scheme()
        )));
    }
    let expected = solve(picture);
    let (expected_len, submitted_len) = match (&expected, submitted) {
        (Solution::Rows(a), Solution::Rows(b)) => (a.len(), b.len()),
        (Solution::Grid(a), Solution::Grid(b)) => (a.len(), b.len()),
        (Solution::Rings(a), Solution::Rings(b)) => (a.len(), b.len()),
        _ => unreachable!("scheme equality checked above"),
    };
    if expected_len != submitted_len {
        return Err(CaptchaError::MalformedDescriptor(format!(
            "expected {expected_len} elements, got {submitted_len}"
        )));
    }
    Ok(expected == *submitted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::scramble::{Scheme, scramble};
    use crate::test_utils::{gradient_image, seeded_rng};

    #[test]
    fn test_rows_inverse_permutation_scenario() {
        let image = gradient_image(64, 64);
        let mut pic = scramble(&image, Scheme::Rows, &Config::default(), &mut seeded_rng(0)).unwrap();
        pic.set_tile_order(vec![3, 0, 4, 1, 7, 2, 6, 5]).unwrap();

        assert_eq!(solve(&pic), Solution::Rows(vec![1, 3, 5, 0, 2, 7, 6, 4]));
        assert!(verify(&pic, &Solution::Rows(vec![1, 3, 5, 0, 2, 7, 6, 4])).unwrap());
    }

    #[test]
    fn test_rows_solution_restores_identity() {
        let image = gradient_image(64, 64);
        let pic = scramble(&image, Scheme::Rows, &Config::default(), &mut seeded_rng(11)).unwrap();

        let Solution::Rows(answer) = solve(&pic) else {
            panic!("rows picture must yield a rows descriptor");
        };
        // Arranging per the answer puts tile p into slot p.
        let restored: Vec<usize> = answer.iter().map(|&slot| pic.tile_order()[slot]).collect();
        assert_eq!(restored, (0..8).collect::<Vec<_>>());
    }

    #[test]
    fn test_verification_is_reflexive() {
        let image = gradient_image(72, 72);
        let config = Config::default();
        for scheme in [Scheme::Rows, Scheme::Grid, Scheme::Rings] {
            let pic = scramble(&image, scheme, &config, &mut seeded_rng(21)).unwrap();
            assert!(verify(&pic, &solve(&pic)).unwrap());
        }
    }

    #[test]
    fn test_single_element_difference_fails() {
        let image = gradient_image(64, 64);
        let pic = scramble(&image, Scheme::Grid, &Config::default(), &mut seeded_rng(5)).unwrap();

        let Solution::Grid(mut pairs) = solve(&pic) else {
            panic!("grid picture must yield a grid descriptor");
        };
        pairs[3].1 = normalize_degrees(pairs[3].1 + 90.0);
        assert!(!verify(&pic, &Solution::Grid(pairs)).unwrap());
    }

    #[test]
    fn test_grid_descriptor_follows_slot_order() {
        let image = gradient_image(64, 64);
        let pic = scramble(&image, Scheme::Grid, &Config::default(), &mut seeded_rng(9)).unwrap();

        let Solution::Grid(pairs) = solve(&pic) else {
            panic!("grid picture must yield a grid descriptor");
        };
        for (slot, &(id, rotation)) in pairs.iter().enumerate() {
            assert_eq!(id, pic.tile_order()[slot]);
            assert_eq!(rotation, pic.tiles()[id].rotation());
        }
    }

    #[test]
    fn test_rings_descriptor_excludes_background() {
        let image = gradient_image(72, 72);
        let pic = scramble(&image, Scheme::Rings, &Config::default(), &mut seeded_rng(13)).unwrap();

        let Solution::Rings(degrees) = solve(&pic) else {
            panic!("rings picture must yield a rings descriptor");
        };
        assert_eq!(degrees.len(), 5);
        for (ring, &deg) in degrees.iter().enumerate() {
            assert_eq!(deg, pic.tiles()[ring + 1].rotation());
        }
    }

    #[test]
    fn test_wrong_shape_is_malformed() {
        let image = gradient_image(64, 64);
        let pic = scramble(&image, Scheme::Rows, &Config::default(), &mut seeded_rng(3)).unwrap();

        let wrong_variant = verify(&pic, &Solution::Rings(vec![0.0; 5]));
        assert!(matches!(wrong_variant, Err(CaptchaError::MalformedDescriptor(_))));

        let wrong_length = verify(&pic, &Solution::Rows(vec![0, 1, 2]));
        assert!(matches!(wrong_length, Err(CaptchaError::MalformedDescriptor(_))));
    }

    #[test]
    fn test_solved_rings_read_all_zero() {
        let image = gradient_image(72, 72);
        let mut pic =
            scramble(&image, Scheme::Rings, &Config::default(), &mut seeded_rng(17)).unwrap();
        for ring in 1..pic.tiles().len() {
            pic.set_rotation(ring, 0.0).unwrap();
        }
        assert_eq!(solve(&pic), Solution::Rings(vec![0.0; 5]));
    }
}
