// Direction transition graph
// Grades the difficulty of consecutive cut directions

use crate::chart::types::CutDirection;
use crate::chart::types::CutDirection as D;

/// Successor table indexed by wire ordinal. Each row is ordered
/// `[easy, medium, medium, hard, hard]`: the reverse cut first, then the
/// diagonal neighbours, then the perpendicular cuts.
static TRANSITIONS: [[CutDirection; 5]; 8] = [
    // Up
    [D::Down, D::DownLeft, D::DownRight, D::Left, D::Right],
    // Down
    [D::Up, D::UpLeft, D::UpRight, D::Left, D::Right],
    // Left
    [D::Right, D::UpRight, D::DownRight, D::Up, D::Down],
    // Right
    [D::Left, D::UpLeft, D::DownLeft, D::Up, D::Down],
    // UpLeft
    [D::DownRight, D::Right, D::Down, D::DownLeft, D::UpRight],
    // UpRight
    [D::DownLeft, D::Left, D::Down, D::UpLeft, D::DownRight],
    // DownLeft
    [D::UpRight, D::Up, D::Right, D::UpLeft, D::DownRight],
    // DownRight
    [D::UpLeft, D::Up, D::Left, D::UpRight, D::DownLeft],
];

/// Permissible successors of a direction, drawn with uniform probability.
///
/// The table only biases the randomized draw toward playable swings; it
/// never hard-blocks a transition. A dot note imposes no constraint, so its
/// pool is all eight directional codes.
pub fn transitions(from: CutDirection) -> &'static [CutDirection] {
    match from {
        D::Dot => &CutDirection::DIRECTIONAL,
        directional => &TRANSITIONS[directional.ordinal() as usize],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_every_directional_has_five_distinct_successors() {
        for &from in &CutDirection::DIRECTIONAL {
            let pool = transitions(from);
            assert_eq!(pool.len(), 5, "{from:?}");

            let unique: HashSet<u8> = pool.iter().map(|d| d.ordinal()).collect();
            assert_eq!(unique.len(), 5, "{from:?} has duplicate successors");

            assert!(!pool.contains(&from), "{from:?} transitions to itself");
            assert!(!pool.contains(&CutDirection::Dot));
        }
    }

    #[test]
    fn test_easy_entry_is_the_opposite() {
        let opposites = [
            (D::Up, D::Down),
            (D::Down, D::Up),
            (D::Left, D::Right),
            (D::Right, D::Left),
            (D::UpLeft, D::DownRight),
            (D::UpRight, D::DownLeft),
            (D::DownLeft, D::UpRight),
            (D::DownRight, D::UpLeft),
        ];

        for (from, opposite) in opposites {
            assert_eq!(transitions(from)[0], opposite, "{from:?}");
        }
    }

    #[test]
    fn test_dot_allows_all_directionals() {
        assert_eq!(transitions(D::Dot), &CutDirection::DIRECTIONAL);
    }
}
