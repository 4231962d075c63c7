#![allow(clippy::unwrap_used)]

mod common;

use common::{rectangle_loop, Fixture, ROOM};
use proptest::prelude::*;
use roomline::kernel::PrismKernel;
use roomline::math::{Vector3, POINT_TOLERANCE};
use roomline::model::{chain_segments, ElementId, MullionProfile};
use roomline::operations::{MergeBoundary, OffsetLoop, WallThickness};
use roomline::{BoundaryOptions, OffsetPolicy, Room};

fn profile() -> impl Strategy<Value = MullionProfile> {
    prop_oneof![
        (0.01f64..0.5).prop_map(|thickness| MullionProfile::Rectangular { thickness }),
        (0.005f64..0.25).prop_map(|radius| MullionProfile::Circular { radius }),
    ]
}

fn policy() -> impl Strategy<Value = OffsetPolicy> {
    prop_oneof![
        Just(OffsetPolicy::HalfThickness),
        Just(OffsetPolicy::Zero),
        (-1.0f64..1.0).prop_map(OffsetPolicy::Distance),
    ]
}

proptest! {
    #[test]
    fn merge_without_doors_is_identity(w in 1.0f64..50.0, h in 1.0f64..50.0) {
        let fixture = Fixture::rectangle(w, h, 0.2);
        let loops = vec![chain_segments(&rectangle_loop(w, h, fixture.walls)).unwrap()];
        let out = MergeBoundary::new(ROOM, loops.clone(), Vec::new())
            .execute(&fixture.doc, &mut PrismKernel::new())
            .unwrap();
        prop_assert_eq!(out, loops);
    }

    #[test]
    fn ordinary_walls_are_never_offset(
        w in 1.0f64..50.0,
        h in 1.0f64..50.0,
        policy in policy(),
    ) {
        let fixture = Fixture::rectangle(w, h, 0.3);
        let segments = rectangle_loop(w, h, fixture.walls);
        let out = OffsetLoop::new(ROOM, 0, &segments, policy)
            .execute(&fixture.doc, &PrismKernel::new())
            .unwrap();
        prop_assert_eq!(out, chain_segments(&segments).unwrap());
    }

    #[test]
    fn curtain_thickness_bounds_every_mullion_type(
        profiles in prop::collection::vec(profile(), 1..6),
    ) {
        let fixture = Fixture::square().curtain(2, &profiles);
        let t = WallThickness::new(fixture.walls[2]).execute(&fixture.doc).unwrap();
        for p in &profiles {
            prop_assert!(t >= p.thickness().unwrap());
        }
    }

    #[test]
    fn offset_and_merged_loops_stay_closed(
        w in 4.0f64..30.0,
        h in 4.0f64..30.0,
        curtains in prop::collection::vec(any::<bool>(), 4),
        distance in -0.5f64..0.5,
        ratio in 0.1f64..1.0,
    ) {
        let mut fixture = Fixture::rectangle(w, h, 0.2);
        for (index, curtain) in curtains.iter().enumerate() {
            if *curtain {
                let mullion = MullionProfile::Rectangular { thickness: 0.1 };
                fixture = fixture.curtain(index, &[mullion]);
            }
        }
        let fixture = fixture.bottom_door(ElementId(1), -Vector3::y());
        let room = Room::new(&fixture.doc, ROOM).unwrap();
        let options = BoundaryOptions {
            curtain_offset: OffsetPolicy::Distance(distance),
            door_depth_ratio: ratio,
            ..BoundaryOptions::default()
        };
        let loops = room.boundaries(&mut PrismKernel::new(), &options).unwrap();
        prop_assert!(!loops.is_empty());
        for l in &loops {
            prop_assert!(l.max_closure_gap() < POINT_TOLERANCE);
        }
    }
}
