use rhombus_compute::{
    create_renderer, AtomicBoolChecker, ColorBuffer, Mandelbrot, PlaneBounds, PollFn, RenderStatus, Renderer,
    SoiConfig, SoiRenderer,
};
use std::cell::Cell;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

/// Cancels once more than `limit` polls have been made.
fn cancel_after(polls: &Cell<u32>, limit: u32) -> PollFn<impl Fn() -> bool + '_> {
    PollFn(move || {
        polls.set(polls.get() + 1);
        polls.get() > limit
    })
}

fn painted_rows(buf: &ColorBuffer) -> Vec<usize> {
    (0..buf.height())
        .map(|y| buf.row(y).iter().filter(|&&p| p != ColorBuffer::UNPAINTED).count())
        .collect()
}

#[test]
fn preset_flag_cancels_before_painting() {
    let renderer: SoiRenderer<Mandelbrot> =
        SoiRenderer::new(Mandelbrot::default(), 256, SoiConfig::default()).unwrap();
    let cancel = AtomicBoolChecker::new(Arc::new(AtomicBool::new(true)));
    let mut buf = ColorBuffer::new(100, 100);

    let outcome = renderer
        .render(&PlaneBounds::new(-2.0, 1.0, -1.5, 1.5), (100, 100), &mut buf, &cancel)
        .unwrap();

    assert_eq!(outcome.status, RenderStatus::Cancelled);
    assert_eq!(outcome.stats.rhombi, 1);
    assert_eq!(buf.unpainted_count(), 100 * 100);
}

#[test]
fn cancel_during_scan_keeps_whole_rows() {
    let renderer: SoiRenderer<Mandelbrot> =
        SoiRenderer::new(Mandelbrot::default(), 256, SoiConfig::default()).unwrap();
    let polls = Cell::new(0);
    let cancel = cancel_after(&polls, 10);
    let mut buf = ColorBuffer::new(100, 100);

    // The corner orbits escape at once, so the whole canvas is one scan:
    // one poll for the rectangle, then one per row.
    let outcome = renderer
        .render(&PlaneBounds::new(-2.0, 1.0, -1.5, 1.5), (100, 100), &mut buf, &cancel)
        .unwrap();

    assert_eq!(outcome.status, RenderStatus::Cancelled);
    assert_eq!(polls.get(), 11);
    let rows = painted_rows(&buf);
    assert!(rows[..9].iter().all(|&n| n == 100), "{rows:?}");
    assert!(rows[9..].iter().all(|&n| n == 0), "{rows:?}");
}

#[test]
fn cancel_inside_subdivision_stops_the_walk() {
    let config = SoiConfig {
        tolerance: 0.0,
        min_profitable_iterations: 0,
        ..Default::default()
    };
    let renderer: SoiRenderer<Mandelbrot> = SoiRenderer::new(Mandelbrot::default(), 100, config).unwrap();
    let polls = Cell::new(0);
    let cancel = cancel_after(&polls, 7);
    let mut buf = ColorBuffer::new(128, 128);

    let outcome = renderer
        .render(&PlaneBounds::new(-0.25, 0.05, -0.15, 0.15), (128, 128), &mut buf, &cancel)
        .unwrap();

    // Root, 64-row and 32-row quadrants, then the first 16x16 leaf gets
    // three rows in before the next poll cancels.
    assert_eq!(outcome.status, RenderStatus::Cancelled);
    assert_eq!(outcome.stats.rhombi, 4);
    assert_eq!(outcome.stats.max_depth, 3);
    let rows = painted_rows(&buf);
    assert_eq!(&rows[..4], &[16, 16, 16, 0]);
    assert_eq!(buf.pixels().len() - buf.unpainted_count(), 48);
}

#[test]
fn cancelled_factory_renderer() {
    let renderer = create_renderer("one_pass", "mandelbrot", &SoiConfig::default()).unwrap();
    let polls = Cell::new(0);
    let cancel = cancel_after(&polls, 3);
    let mut buf = ColorBuffer::new(20, 20);

    let outcome = renderer
        .render(&PlaneBounds::new(-2.0, 1.0, -1.5, 1.5), (20, 20), &mut buf, &cancel)
        .unwrap();

    assert_eq!(outcome.status, RenderStatus::Cancelled);
    assert_eq!(buf.unpainted_count(), 17 * 20);
}
