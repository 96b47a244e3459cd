use proptest::prelude::*;
use treemap_core::{CategoryColorMap, Hierarchy, RawNode, Rect, TreemapLayout};

fn nested(groups: &[Vec<f64>]) -> Hierarchy {
    let children = groups
        .iter()
        .enumerate()
        .map(|(g, values)| {
            let leaves = values
                .iter()
                .enumerate()
                .map(|(i, v)| RawNode::leaf(&format!("g{g}-{i}"), &format!("c{}", i % 4), *v))
                .collect();
            RawNode::group(&format!("g{g}"), leaves)
        })
        .collect();
    Hierarchy::build(&RawNode::group("root", children)).unwrap()
}

fn groups_strategy() -> impl Strategy<Value = Vec<Vec<f64>>> {
    prop::collection::vec(prop::collection::vec(0.0f64..1000.0, 1..12), 1..6)
}

proptest! {
    #[test]
    fn prop_tiles_have_non_negative_size(
        groups in groups_strategy(),
        w in 0.0f64..1200.0,
        h in 0.0f64..800.0,
    ) {
        let layout = TreemapLayout::compute(&nested(&groups), w, h, 1.0);
        for (_, r) in layout.tiles() {
            prop_assert!(r.width() >= 0.0 && r.height() >= 0.0, "{:?}", r);
            prop_assert!(r.x0.is_finite() && r.y0.is_finite());
            prop_assert!(r.x1.is_finite() && r.y1.is_finite());
        }
    }

    #[test]
    fn prop_tiles_never_overlap(groups in groups_strategy()) {
        let layout = TreemapLayout::compute(&nested(&groups), 960.0, 600.0, 1.0);
        let tiles: Vec<Rect> = layout.tiles().map(|(_, r)| r).collect();
        for (i, a) in tiles.iter().enumerate() {
            for b in &tiles[i + 1..] {
                prop_assert!(a.overlap_area(b) < 1e-6, "{:?} overlaps {:?}", a, b);
            }
        }
    }

    #[test]
    fn prop_tiles_stay_on_canvas(groups in groups_strategy()) {
        let layout = TreemapLayout::compute(&nested(&groups), 960.0, 600.0, 1.0);
        // Collapsed slivers sit on a midpoint and may fall in the padding band.
        for (_, r) in layout.tiles().filter(|(_, r)| r.area() > 0.0) {
            prop_assert!(r.x0 >= -1e-9 && r.y0 >= -1e-9);
            prop_assert!(r.x1 <= 960.0 + 1e-9 && r.y1 <= 600.0 + 1e-9);
        }
    }

    #[test]
    fn prop_unpadded_area_is_conserved_and_proportional(
        values in prop::collection::vec(1.0f64..1000.0, 1..30),
    ) {
        let layout = TreemapLayout::compute(&nested(&[values.clone()]), 960.0, 600.0, 0.0);
        let total_value: f64 = values.iter().sum();
        let canvas = 960.0 * 600.0;
        let total_area: f64 = layout.tiles().map(|(_, r)| r.area()).sum();
        prop_assert!((total_area - canvas).abs() < 1e-6 * canvas);
        for ((_, r), v) in layout.tiles().zip(&values) {
            let expected = canvas * v / total_value;
            prop_assert!((r.area() - expected).abs() < 1e-6 * canvas);
        }
    }

    #[test]
    fn prop_color_assignment_is_deterministic(
        cats in prop::collection::vec("[a-e]{1,3}", 0..40),
    ) {
        let a = CategoryColorMap::assign(&cats);
        let b = CategoryColorMap::assign(&cats);
        let a: Vec<_> = a.iter().collect();
        let b: Vec<_> = b.iter().collect();
        prop_assert_eq!(a, b);
    }
}
