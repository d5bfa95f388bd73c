//! Randomized location search and neighbourhood scans over a chunk.

use super::{Chunk, KEYPAD_OFFSETS, KEYPAD_ORIGIN, Position};
use crate::env::{LineOfSight, RngOracle};
use crate::feature::FeatureId;

/// Result of a neighbourhood scan.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FeatCount {
    pub count: u32,
    /// Last matching square in scan order.
    pub last: Option<Position>,
}

impl Chunk {
    /// Picks a square near `origin`, for drops, teleports and blast targets.
    ///
    /// Candidates are drawn independently per axis, uniformly within
    /// `max_distance` of the origin. A candidate is accepted when it is fully
    /// in bounds, within `max_distance` game distance (only checked when
    /// `max_distance > 1`) and, if `need_los` is set, visible from `origin`.
    ///
    /// After `scatter_max_tries` rejections the last candidate is returned
    /// as is, so the result may violate any of the above. Callers that need a
    /// guarantee must check the returned square themselves.
    pub fn scatter<R, L>(
        &self,
        rng: &mut R,
        sight: &L,
        origin: Position,
        max_distance: i32,
        need_los: bool,
    ) -> Position
    where
        R: RngOracle + ?Sized,
        L: LineOfSight + ?Sized,
    {
        let tries = self.config.scatter_max_tries;
        let mut candidate = origin;

        for _ in 0..tries {
            candidate = Position::new(
                rng.spread(origin.y, max_distance),
                rng.spread(origin.x, max_distance),
            );

            if !self.in_bounds_fully(candidate) {
                continue;
            }
            if max_distance > 1 && origin.distance(candidate) > max_distance {
                continue;
            }
            if !need_los || sight.los(self, origin, candidate) {
                return candidate;
            }
        }

        tracing::warn!(
            id = %self.id(),
            %origin,
            %candidate,
            max_distance,
            need_los,
            tries,
            "scatter exhausted its attempts; returning unchecked candidate"
        );
        candidate
    }
}

/// Counts squares around `origin` that satisfy `predicate`.
///
/// Scans the eight neighbours in keypad order and then, when
/// `include_origin` is set, `origin` itself. Squares that are not fully in
/// bounds, or whose terrain in `known` is still `unknown`, are skipped.
pub fn count_feats<P>(
    cave: &Chunk,
    known: &Chunk,
    unknown: FeatureId,
    origin: Position,
    include_origin: bool,
    mut predicate: P,
) -> FeatCount
where
    P: FnMut(&Chunk, Position) -> bool,
{
    let mut result = FeatCount::default();

    for (index, offset) in KEYPAD_OFFSETS.iter().enumerate() {
        if index == KEYPAD_ORIGIN && !include_origin {
            continue;
        }

        let pos = origin.offset(*offset);
        if !cave.in_bounds_fully(pos) {
            continue;
        }
        if known.feat(pos).is_none_or(|feat| feat == unknown) {
            continue;
        }
        if !predicate(cave, pos) {
            continue;
        }

        result.count += 1;
        result.last = Some(pos);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CaveConfig;
    use crate::env::{PcgRng, ProjectablePath};
    use crate::feature::{FeatureTable, WellKnown, WellKnownFeatures};
    use crate::state::Tick;
    use crate::testing::{open_room, standard_features};

    fn see_all(_: &Chunk, _: Position, _: Position) -> bool {
        true
    }

    #[test]
    fn zero_spread_returns_the_origin() {
        let features = standard_features();
        let c = open_room(&features, 20, 20);
        let mut rng = PcgRng::new(3);
        let origin = Position::new(7, 11);
        for _ in 0..50 {
            assert_eq!(c.scatter(&mut rng, &see_all, origin, 0, false), origin);
        }
    }

    #[test]
    fn scatter_stays_within_the_disc() {
        let features = standard_features();
        let c = open_room(&features, 30, 30);
        let sight = ProjectablePath::new(&features);
        let mut rng = PcgRng::new(11);
        let origin = Position::new(15, 15);

        for _ in 0..500 {
            let pos = c.scatter(&mut rng, &sight, origin, 5, true);
            assert!(c.in_bounds_fully(pos));
            assert!(origin.distance(pos) <= 5);
        }
    }

    #[test]
    fn scatter_near_an_edge_stays_inside() {
        let features = standard_features();
        let c = open_room(&features, 10, 10);
        let mut rng = PcgRng::new(5);
        let origin = Position::new(1, 1);
        for _ in 0..200 {
            let pos = c.scatter(&mut rng, &see_all, origin, 3, false);
            assert!(c.in_bounds_fully(pos));
        }
    }

    #[test]
    fn scatter_requires_sight_when_asked() {
        let features = standard_features();
        let mut c = open_room(&features, 11, 11);
        let granite = features.lookup("granite wall").unwrap();
        for y in 0..11 {
            c.set_feat(Position::new(y, 6), granite);
        }
        let sight = ProjectablePath::new(&features);
        let mut rng = PcgRng::new(8);
        let origin = Position::new(5, 3);

        for _ in 0..300 {
            let pos = c.scatter(&mut rng, &sight, origin, 8, true);
            assert!(pos.x <= 6, "{pos} is behind the wall");
        }
    }

    #[test]
    fn exhausted_scatter_returns_last_candidate() {
        let features = standard_features();
        let config = CaveConfig::new().with_scatter_max_tries(10);
        // No square of a 2x2 chunk is fully in bounds.
        let c = Chunk::new(2, 2, &features, &config, Tick::ZERO);
        let mut rng = PcgRng::new(2);
        let origin = Position::new(0, 0);

        let pos = c.scatter(&mut rng, &see_all, origin, 4, false);
        assert!(!c.in_bounds_fully(pos));
        assert!((pos.y - origin.y).abs() <= 4 && (pos.x - origin.x).abs() <= 4);
    }

    fn door_ring(features: &FeatureTable) -> (Chunk, Chunk, WellKnownFeatures) {
        let well_known = WellKnownFeatures::resolve(features).unwrap();
        let closed = well_known.get(WellKnown::ClosedDoor);
        let mut cave = open_room(features, 5, 5);
        cave.set_feat(Position::new(3, 2), closed);
        cave.set_feat(Position::new(1, 1), closed);
        let known = cave.clone();
        (cave, known, well_known)
    }

    #[test]
    fn counts_closed_doors_and_reports_last_in_scan_order() {
        let features = standard_features();
        let (cave, known, well_known) = door_ring(&features);
        let origin = Position::new(2, 2);

        let found = count_feats(&cave, &known, well_known.unknown(), origin, true, |c, pos| {
            c.is_closed_door(&features, pos)
        });
        // (3, 2) is scanned first (south), (1, 1) last (north-west).
        assert_eq!(found.count, 2);
        assert_eq!(found.last, Some(Position::new(1, 1)));
    }

    #[test]
    fn origin_is_only_scanned_on_request() {
        let features = standard_features();
        let (cave, known, well_known) = door_ring(&features);
        let origin = Position::new(2, 2);
        let floor_only = |c: &Chunk, pos: Position| c.is_floor(&features, pos);

        let around = count_feats(&cave, &known, well_known.unknown(), origin, false, floor_only);
        let under = count_feats(&cave, &known, well_known.unknown(), origin, true, floor_only);
        assert_eq!(around.count, 6);
        assert_eq!(under.count, 7);
        assert_eq!(under.last, Some(origin));
    }

    #[test]
    fn unknown_squares_are_skipped() {
        let features = standard_features();
        let (cave, mut known, well_known) = door_ring(&features);
        known.set_feat(Position::new(1, 1), well_known.unknown());

        let found = count_feats(
            &cave,
            &known,
            well_known.unknown(),
            Position::new(2, 2),
            true,
            |c, pos| c.is_closed_door(&features, pos),
        );
        assert_eq!(found.count, 1);
        assert_eq!(found.last, Some(Position::new(3, 2)));
    }

    #[test]
    fn edge_squares_are_skipped() {
        let features = standard_features();
        let (cave, known, well_known) = door_ring(&features);

        let found = count_feats(
            &cave,
            &known,
            well_known.unknown(),
            Position::new(1, 1),
            false,
            |c, pos| c.is_rock(&features, pos),
        );
        assert_eq!(found, FeatCount::default());
    }
}
