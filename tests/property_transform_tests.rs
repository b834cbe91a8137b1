use gantt_rs::core::{
    GranularityThresholds, MILLIS_PER_DAY, TimeDomain, TransformEngine, ZoomLimits, ZoomTransform,
    nearest_anchor,
};
use proptest::prelude::*;

const JAN_2024: f64 = 1_704_067_200_000.0;

fn engine(span_days: f64, width: f64) -> TransformEngine {
    let base = TimeDomain::new(JAN_2024, JAN_2024 + span_days * MILLIS_PER_DAY).expect("base");
    TransformEngine::new(base, width, ZoomLimits::default()).expect("engine")
}

proptest! {
    #[test]
    fn deeper_zoom_never_coarsens_granularity(
        span_days in 1.0f64..5_000.0,
        width in 100.0f64..4_000.0,
        k_low in 0.35f64..2_000.0,
        factor in 1.0f64..50.0
    ) {
        let thresholds = GranularityThresholds::default();
        let mut engine = engine(span_days, width);
        engine.apply_gesture(ZoomTransform { k: k_low, x: 0.0 }).expect("low");
        let coarse = engine.granularity(thresholds);
        engine.apply_gesture(ZoomTransform { k: k_low * factor, x: 0.0 }).expect("high");
        let fine = engine.granularity(thresholds);
        prop_assert!(fine <= coarse);
    }

    #[test]
    fn gestures_never_touch_the_original_scale(
        gestures in prop::collection::vec((0.01f64..5_000.0, -1.0e6f64..1.0e6), 1..24)
    ) {
        let mut engine = engine(60.0, 800.0);
        let original = engine.original_scale();
        for (k, x) in gestures {
            let effective = engine.apply_gesture(ZoomTransform { k, x }).expect("gesture");
            prop_assert_eq!(engine.original_scale(), original);

            let transform = engine.transform();
            prop_assert!(ZoomLimits::default().contains(transform.k));
            let probe = JAN_2024 + 17.5 * MILLIS_PER_DAY;
            let expected = transform.k * original.map(probe) + transform.x;
            prop_assert!((effective.map(probe) - expected).abs() <= 1e-6 * expected.abs().max(1.0));
        }
    }

    #[test]
    fn effective_scale_inverts_its_own_mapping(
        k in 0.35f64..2_000.0,
        x in -1.0e5f64..1.0e5,
        offset_days in 0.0f64..60.0
    ) {
        let mut engine = engine(60.0, 800.0);
        let effective = engine.apply_gesture(ZoomTransform { k, x }).expect("gesture");
        let time = JAN_2024 + offset_days * MILLIS_PER_DAY;
        let recovered = effective.invert(effective.map(time));
        prop_assert!((recovered - time).abs() <= 1.0);
    }

    #[test]
    fn nearest_anchor_is_always_one_of_the_starts(
        starts in prop::collection::vec(-1.0e9f64..1.0e9, 1..32),
        left_edge in -1.0e9f64..1.0e9
    ) {
        let anchor = nearest_anchor(starts.iter().copied(), left_edge).expect("anchor");
        prop_assert!(starts.contains(&anchor));
        if starts.iter().any(|start| *start >= left_edge) {
            prop_assert!(anchor >= left_edge);
            prop_assert!(starts.iter().all(|start| *start < left_edge || *start >= anchor));
        } else {
            prop_assert!(starts.iter().all(|start| *start <= anchor));
        }
    }
}
