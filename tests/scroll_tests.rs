// Host-side tests for smoothed gallery and page scrolling.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/core/constants.rs");
}
mod scroll {
    include!("../src/core/scroll.rs");
}

use constants::*;
use scroll::*;

fn steps_to_rest(axis: &mut ScrollAxis, cap: usize) -> usize {
    let mut steps = 0;
    while !axis.at_rest() && steps < cap {
        axis.step();
        steps += 1;
    }
    steps
}

#[test]
fn lerp_endpoints() {
    assert_eq!(lerp(2.0, 10.0, 0.0), 2.0);
    assert_eq!(lerp(2.0, 10.0, 1.0), 10.0);
    assert_eq!(lerp(2.0, 10.0, 0.5), 6.0);
}

#[test]
fn axis_converges_without_overshoot() {
    for distance in [1000.0, -640.0, 0.5] {
        let mut axis = ScrollAxis::new(SCROLL_LERP);
        axis.target = distance;
        let mut previous_gap = (axis.target - axis.current).abs();
        for _ in 0..500 {
            axis.step();
            let gap = (axis.target - axis.current).abs();
            assert!(gap <= previous_gap, "gap grew from {previous_gap} to {gap}");
            // never on the far side of the target
            assert!(axis.current * distance.signum() <= distance.abs() + 1e-12);
            previous_gap = gap;
        }
        assert!(axis.at_rest());
        assert_eq!(axis.current, distance);
    }
}

#[test]
fn axis_rests_within_bounded_steps() {
    let distance: f64 = 1000.0;
    let mut axis = ScrollAxis::new(SCROLL_LERP);
    axis.target = distance;
    let bound = ((SCROLL_EPSILON / distance).ln() / (1.0 - SCROLL_LERP).ln()).ceil() as usize + 1;
    let steps = steps_to_rest(&mut axis, 10_000);
    assert!(steps <= bound, "took {steps} steps, bound {bound}");
}

#[test]
fn full_lerp_jumps_straight_to_target() {
    let mut axis = ScrollAxis::new(1.0);
    axis.target = 321.0;
    assert_eq!(axis.step(), 321.0);
    assert!(axis.at_rest());
}

#[test]
fn reset_returns_to_origin() {
    let mut axis = ScrollAxis::new(SCROLL_LERP);
    axis.target = 50.0;
    axis.step();
    axis.reset();
    assert_eq!(axis.current, 0.0);
    assert_eq!(axis.target, 0.0);
}

#[test]
fn page_scroll_clamps_to_limit() {
    let mut page = PageScroll::default();
    page.set_limit(2400.0, 800.0);
    assert_eq!(page.limit, 1600.0);

    page.on_wheel(5000.0);
    page.update(PAGE_SCROLL_LERP);
    assert_eq!(page.target, 1600.0);
    for _ in 0..400 {
        page.update(PAGE_SCROLL_LERP);
    }
    assert!(page.current <= page.limit);
    assert!((page.current - 1600.0).abs() < 1e-6);

    page.on_wheel(-9000.0);
    page.update(PAGE_SCROLL_LERP);
    assert_eq!(page.target, 0.0);
}

#[test]
fn short_content_does_not_scroll() {
    let mut page = PageScroll::default();
    page.set_limit(500.0, 800.0);
    assert_eq!(page.limit, 0.0);
    page.on_wheel(300.0);
    assert_eq!(page.update(PAGE_SCROLL_LERP), 0.0);
}

#[test]
fn page_scroll_snaps_to_top() {
    let mut page = PageScroll {
        current: 0.005,
        limit: 100.0,
        ..PageScroll::default()
    };
    assert_eq!(page.update(PAGE_SCROLL_LERP), 0.0);
    assert_eq!(page.last, 0.005);
}
