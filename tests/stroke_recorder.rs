use egui::{Color32, Pos2, Rect, pos2, vec2};
use image::{Rgba, RgbaImage};
use photo_edit::{DrawSurface, DrawingTool, EditError, Paint, StrokeRecorder};

const BLUE: Rgba<u8> = Rgba([0, 0, 255, 255]);
const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Surface that records the calls made on it
#[derive(Debug, Default)]
struct RecordingSurface {
    ops: Vec<Op>,
}

#[derive(Debug, Clone, PartialEq)]
enum Op {
    Begin,
    MoveTo(Pos2),
    LineTo(Pos2),
    Stroke(f32, Paint),
}

impl DrawSurface for RecordingSurface {
    fn begin_path(&mut self) {
        self.ops.push(Op::Begin);
    }

    fn move_to(&mut self, point: Pos2) {
        self.ops.push(Op::MoveTo(point));
    }

    fn line_to(&mut self, point: Pos2) {
        self.ops.push(Op::LineTo(point));
    }

    fn stroke_path(&mut self, width: f32, paint: Paint) {
        self.ops.push(Op::Stroke(width, paint));
    }
}

// Helper to record a complete stroke through the given points
fn draw(recorder: &mut StrokeRecorder, tool: DrawingTool, width: f32, points: &[Pos2]) {
    recorder.begin_stroke(points[0], tool, Color32::WHITE, width).unwrap();
    for point in &points[1..] {
        recorder.extend_stroke(*point).unwrap();
    }
    recorder.end_stroke().unwrap();
}

#[test]
fn test_undo_removes_strokes_newest_first() {
    let mut recorder = StrokeRecorder::new();
    draw(&mut recorder, DrawingTool::Pen, 4.0, &[pos2(0.0, 0.0), pos2(1.0, 1.0)]);
    draw(&mut recorder, DrawingTool::Pen, 4.0, &[pos2(2.0, 2.0), pos2(3.0, 3.0)]);
    draw(&mut recorder, DrawingTool::Eraser, 20.0, &[pos2(4.0, 4.0), pos2(5.0, 5.0)]);
    let ids: Vec<_> = recorder.strokes().iter().map(|s| s.id()).collect();

    let removed = recorder.undo().unwrap();
    assert_eq!(removed.id(), ids[2]);
    let remaining: Vec<_> = recorder.strokes().iter().map(|s| s.id()).collect();
    assert_eq!(remaining, ids[..2].to_vec());

    recorder.undo();
    recorder.undo();
    assert!(recorder.is_empty());

    for _ in 0..3 {
        assert!(recorder.undo().is_none());
    }
    assert!(recorder.strokes().is_empty());
}

#[test]
fn test_stroke_collects_points_in_order() {
    let mut recorder = StrokeRecorder::new();
    recorder.begin_stroke(pos2(1.0, 1.0), DrawingTool::Pen, Color32::RED, 4.0).unwrap();
    assert!(recorder.is_drawing());
    assert!(recorder.strokes().is_empty());

    recorder.extend_stroke(pos2(2.0, 3.0)).unwrap();
    recorder.extend_stroke(pos2(5.0, 8.0)).unwrap();
    let stroke = recorder.end_stroke().unwrap().clone();

    assert_eq!(stroke.points(), &[pos2(1.0, 1.0), pos2(2.0, 3.0), pos2(5.0, 8.0)]);
    assert_eq!(stroke.paint(), Paint::Color(Color32::RED));
    assert_eq!(stroke.width(), 4.0);
    assert!(!recorder.is_drawing());
    assert_eq!(recorder.len(), 1);
}

#[test]
fn test_eraser_strokes_carry_clear_paint() {
    let mut recorder = StrokeRecorder::new();
    draw(&mut recorder, DrawingTool::Eraser, 20.0, &[pos2(0.0, 0.0)]);
    let stroke = &recorder.strokes()[0];
    assert_eq!(stroke.tool(), DrawingTool::Eraser);
    assert_eq!(stroke.paint(), Paint::Clear);
}

#[test]
fn test_extend_and_end_without_stroke_fail() {
    let mut recorder = StrokeRecorder::new();
    assert_eq!(recorder.extend_stroke(pos2(1.0, 1.0)), Err(EditError::NoActiveStroke));
    assert_eq!(recorder.end_stroke().err(), Some(EditError::NoActiveStroke));
    assert!(recorder.is_empty());
}

#[test]
fn test_second_begin_is_rejected() {
    let mut recorder = StrokeRecorder::new();
    recorder.begin_stroke(pos2(1.0, 1.0), DrawingTool::Pen, Color32::WHITE, 4.0).unwrap();
    let result = recorder.begin_stroke(pos2(9.0, 9.0), DrawingTool::Eraser, Color32::WHITE, 20.0);
    assert_eq!(result, Err(EditError::ConcurrentDragRejected));
    assert_eq!(recorder.current().unwrap().points(), &[pos2(1.0, 1.0)]);
}

#[test]
fn test_cancel_discards_only_the_current_stroke() {
    let mut recorder = StrokeRecorder::new();
    draw(&mut recorder, DrawingTool::Pen, 4.0, &[pos2(0.0, 0.0), pos2(1.0, 1.0)]);
    recorder.begin_stroke(pos2(5.0, 5.0), DrawingTool::Pen, Color32::WHITE, 4.0).unwrap();
    recorder.extend_stroke(pos2(6.0, 6.0)).unwrap();
    recorder.cancel_stroke();

    assert!(!recorder.is_drawing());
    assert_eq!(recorder.len(), 1);
}

#[test]
fn test_undo_leaves_current_stroke_alone() {
    let mut recorder = StrokeRecorder::new();
    draw(&mut recorder, DrawingTool::Pen, 4.0, &[pos2(0.0, 0.0)]);
    recorder.begin_stroke(pos2(5.0, 5.0), DrawingTool::Pen, Color32::WHITE, 4.0).unwrap();
    recorder.undo();

    assert!(recorder.is_empty());
    assert!(recorder.is_drawing());
}

#[test]
fn test_clear_drops_everything() {
    let mut recorder = StrokeRecorder::new();
    draw(&mut recorder, DrawingTool::Pen, 4.0, &[pos2(0.0, 0.0)]);
    recorder.begin_stroke(pos2(5.0, 5.0), DrawingTool::Pen, Color32::WHITE, 4.0).unwrap();
    recorder.clear();

    assert!(recorder.is_empty());
    assert!(!recorder.is_drawing());
}

#[test]
fn test_render_replays_strokes_in_order() {
    let mut recorder = StrokeRecorder::new();
    draw(&mut recorder, DrawingTool::Pen, 4.0, &[pos2(1.0, 1.0), pos2(2.0, 2.0), pos2(3.0, 1.0)]);
    draw(&mut recorder, DrawingTool::Eraser, 20.0, &[pos2(7.0, 7.0)]);

    let mut surface = RecordingSurface::default();
    recorder.render(&mut surface);

    assert_eq!(
        surface.ops,
        vec![
            Op::Begin,
            Op::MoveTo(pos2(1.0, 1.0)),
            Op::LineTo(pos2(2.0, 2.0)),
            Op::LineTo(pos2(3.0, 1.0)),
            Op::Stroke(4.0, Paint::Color(Color32::WHITE)),
            Op::Begin,
            Op::MoveTo(pos2(7.0, 7.0)),
            Op::Stroke(20.0, Paint::Clear),
        ]
    );
}

#[test]
fn test_render_with_preview_includes_current_stroke() {
    let mut recorder = StrokeRecorder::new();
    recorder.begin_stroke(pos2(1.0, 1.0), DrawingTool::Pen, Color32::GREEN, 2.0).unwrap();
    recorder.extend_stroke(pos2(4.0, 4.0)).unwrap();

    let mut committed_only = RecordingSurface::default();
    recorder.render(&mut committed_only);
    assert!(committed_only.ops.is_empty());

    let mut with_preview = RecordingSurface::default();
    recorder.render_with_preview(&mut with_preview);
    assert_eq!(with_preview.ops.len(), 4);
    assert_eq!(with_preview.ops[3], Op::Stroke(2.0, Paint::Color(Color32::GREEN)));
}

#[test]
fn test_composite_draws_strokes_over_base_and_clears() {
    let base = RgbaImage::from_pixel(20, 20, BLUE);
    let mut recorder = StrokeRecorder::new();
    draw(&mut recorder, DrawingTool::Pen, 4.0, &[pos2(2.0, 10.0), pos2(18.0, 10.0)]);

    let output = recorder.composite_onto_base(&base);

    assert_eq!(*output.get_pixel(10, 10), WHITE);
    assert_eq!(*output.get_pixel(10, 2), BLUE);
    assert_eq!(*base.get_pixel(10, 10), BLUE);
    assert!(recorder.is_empty());
}

#[test]
fn test_eraser_only_erases_uncommitted_strokes() {
    let base = RgbaImage::from_pixel(20, 20, BLUE);
    let mut recorder = StrokeRecorder::new();
    draw(&mut recorder, DrawingTool::Pen, 4.0, &[pos2(2.0, 10.0), pos2(18.0, 10.0)]);
    draw(&mut recorder, DrawingTool::Eraser, 8.0, &[pos2(10.0, 2.0), pos2(10.0, 18.0)]);

    let layer = recorder.compose_layer(20, 20);
    assert_eq!(layer.get_pixel(10, 10)[3], 0);
    assert_eq!(*layer.get_pixel(3, 10), WHITE);

    let output = recorder.composite_onto_base(&base);
    // The photo shows through where the pen line was erased
    assert_eq!(*output.get_pixel(10, 10), BLUE);
    assert_eq!(*output.get_pixel(3, 10), WHITE);

    // Once flattened, a fresh eraser stroke cannot reach the pen pixels
    draw(&mut recorder, DrawingTool::Eraser, 8.0, &[pos2(3.0, 2.0), pos2(3.0, 18.0)]);
    let again = recorder.composite_onto_base(&output);
    assert_eq!(*again.get_pixel(3, 10), WHITE);
}

#[test]
fn test_composite_onto_display_scales_strokes_to_pixels() {
    let base = RgbaImage::from_pixel(40, 40, BLUE);
    let mut recorder = StrokeRecorder::new();
    draw(&mut recorder, DrawingTool::Pen, 2.0, &[pos2(5.0, 5.0)]);

    let frame = Rect::from_min_size(Pos2::ZERO, vec2(10.0, 10.0));
    let output = recorder.composite_onto_display(&base, frame).unwrap();

    assert_eq!(output.dimensions(), (40, 40));
    assert_eq!(*output.get_pixel(20, 20), WHITE);
    assert_eq!(*output.get_pixel(17, 20), WHITE);
    assert_eq!(*output.get_pixel(5, 5), BLUE);
    assert!(recorder.is_empty());
}

#[test]
fn test_composite_onto_tiny_display_frame_clips_scaled_strokes() {
    let base = RgbaImage::from_pixel(40, 40, BLUE);
    let mut recorder = StrokeRecorder::new();
    // Scales by 40_000 into pixel space, far past the image's right edge
    draw(&mut recorder, DrawingTool::Pen, 0.0001, &[pos2(0.0, 0.0), pos2(1.0, 0.0)]);

    let frame = Rect::from_min_size(Pos2::ZERO, vec2(0.001, 0.001));
    let output = recorder.composite_onto_display(&base, frame).unwrap();

    assert_eq!(*output.get_pixel(20, 0), WHITE);
    assert_eq!(*output.get_pixel(39, 1), WHITE);
    assert_eq!(*output.get_pixel(20, 20), BLUE);
}

#[test]
fn test_preview_and_committed_stroke_share_id() {
    let mut recorder = StrokeRecorder::new();
    recorder.begin_stroke(pos2(1.0, 1.0), DrawingTool::Pen, Color32::WHITE, 4.0).unwrap();
    let before = recorder.current().unwrap().to_stroke().id();
    recorder.extend_stroke(pos2(2.0, 2.0)).unwrap();
    assert_eq!(recorder.current().unwrap().to_stroke().id(), before);

    assert_eq!(recorder.end_stroke().unwrap().id(), before);
}

#[test]
fn test_composite_onto_zero_display_frame_fails_and_keeps_strokes() {
    let base = RgbaImage::from_pixel(4, 4, BLUE);
    let mut recorder = StrokeRecorder::new();
    draw(&mut recorder, DrawingTool::Pen, 2.0, &[pos2(1.0, 1.0)]);

    let frame = Rect::from_min_size(Pos2::ZERO, vec2(0.0, 10.0));
    let result = recorder.composite_onto_display(&base, frame);

    assert!(matches!(result, Err(EditError::InvalidGeometry(_))));
    assert_eq!(recorder.len(), 1);
}

#[test]
fn test_stroke_bounds_include_half_width() {
    let mut recorder = StrokeRecorder::new();
    draw(&mut recorder, DrawingTool::Pen, 4.0, &[pos2(10.0, 10.0), pos2(30.0, 20.0)]);
    let bounds = recorder.strokes()[0].bounds();
    assert_eq!(bounds, Rect::from_min_max(pos2(8.0, 8.0), pos2(32.0, 22.0)));
}
