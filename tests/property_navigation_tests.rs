use arrival_picker::core::{AmplitudeRange, PanDirection, TimeWindow, ZoomDirection};
use arrival_picker::model::{ComponentSet, PickTime, Side, StationPick};
use proptest::prelude::*;

proptest! {
    #[test]
    fn pan_later_then_earlier_restores_window(
        start in -100_000.0f64..100_000.0,
        span in 0.01f64..100_000.0,
        steps in 1usize..20
    ) {
        let mut window = TimeWindow::new(start, start + span).expect("valid window");
        for _ in 0..steps {
            window.pan(PanDirection::Later, 0.1).expect("pan later");
        }
        for _ in 0..steps {
            window.pan(PanDirection::Earlier, 0.1).expect("pan earlier");
        }

        let tolerance = 1e-9 * (start.abs() + span + 1.0);
        let (visible_start, visible_end) = window.visible_range();
        prop_assert!((visible_start - start).abs() <= tolerance);
        prop_assert!((visible_end - (start + span)).abs() <= tolerance);
    }

    #[test]
    fn zoom_in_then_out_keeps_span_and_midpoint(
        start in -100_000.0f64..100_000.0,
        span in 0.01f64..100_000.0,
        steps in 1usize..10
    ) {
        let mut window = TimeWindow::new(start, start + span).expect("valid window");
        let midpoint = window.midpoint();
        for _ in 0..steps {
            window.zoom(ZoomDirection::In, 1.2).expect("zoom in");
            prop_assert!(window.span() < span);
        }
        for _ in 0..steps {
            window.zoom(ZoomDirection::Out, 1.2).expect("zoom out");
        }

        let tolerance = 1e-9 * (start.abs() + span + 1.0);
        prop_assert!((window.span() - span).abs() <= tolerance);
        prop_assert!((window.midpoint() - midpoint).abs() <= tolerance);
        prop_assert_eq!(window.full_range(), (start, start + span));
    }

    #[test]
    fn amplitude_scaling_stays_symmetric(
        min in -1_000.0f64..-0.001,
        max in 0.001f64..1_000.0,
        ups in 0usize..8,
        downs in 0usize..8
    ) {
        let mut range = AmplitudeRange::new(min, max).expect("valid range");
        for _ in 0..ups {
            range.scale_about_zero(ZoomDirection::In, 1.2).expect("magnify");
        }
        for _ in 0..downs {
            range.scale_about_zero(ZoomDirection::Out, 1.2).expect("reduce");
        }

        let (low, high) = range.bounds();
        if ups + downs > 0 {
            prop_assert_eq!(low, -high);
        }
        prop_assert!(high > low);
    }

    #[test]
    fn first_pick_per_slot_is_kept(clicks in prop::collection::vec((any::<bool>(), 0usize..3, -50.0f64..600.0), 1..30)) {
        let components = ComponentSet::three_component();
        let mut pick = StationPick::unset(&components);
        let mut expected: [[Option<f64>; 3]; 2] = [[None; 3]; 2];

        for (left, axis, seconds) in clicks {
            let side = if left { Side::Left } else { Side::Right };
            let component = components.get(axis).expect("axis").as_str();
            let time = PickTime::round(seconds).expect("finite");
            let outcome = pick.record(side, component, time);

            let slot = &mut expected[usize::from(!left)][axis];
            prop_assert_eq!(outcome.is_recorded(), slot.is_none());
            slot.get_or_insert(time.seconds());
        }

        for (side_index, side) in Side::ALL.into_iter().enumerate() {
            for (axis, component) in components.iter().enumerate() {
                prop_assert_eq!(
                    pick.get(side, component.as_str()).map(PickTime::seconds),
                    expected[side_index][axis]
                );
            }
        }
    }
}
