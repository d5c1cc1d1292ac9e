use courtside_annotate::{
    hit_test, ActionLabel, AnnotationBox, AnnotationResolver, CanvasScale, ResolverState,
};
use courtside_base::Vec2;
use courtside_infer::{BoundingBox, Keypoint, PersonPose};

fn person(x: f32, y: f32, width: f32, height: f32) -> PersonPose {
    PersonPose {
        bbox: BoundingBox {
            x,
            y,
            width,
            height,
            confidence: 0.9,
        },
        keypoints: [Keypoint::default(); 17],
    }
}

fn pending(label: ActionLabel) -> AnnotationResolver {
    let mut resolver = AnnotationResolver::new();
    assert!(resolver.select_label(label));
    resolver
}

#[test]
fn test_click_inside_person() {
    let poses = vec![person(100.0, 100.0, 50.0, 80.0)];
    let mut resolver = pending(ActionLabel::Spike);

    let annotation = resolver
        .pointer_down(Vec2::new(120.0, 150.0), &poses, 12.5)
        .unwrap();
    assert_eq!(annotation.label, "spike");
    assert_eq!(annotation.time, 12.5);
    assert_eq!(
        annotation.bbox,
        AnnotationBox {
            x: 100.0,
            y: 100.0,
            width: 50.0,
            height: 80.0
        }
    );
    assert_eq!(resolver.state(), ResolverState::Idle);
}

#[test]
fn test_edges_are_inclusive() {
    let poses = vec![person(10.0, 10.0, 20.0, 20.0)];
    assert_eq!(hit_test(&poses, Vec2::new(10.0, 10.0)), Some(0));
    assert_eq!(hit_test(&poses, Vec2::new(30.0, 30.0)), Some(0));
    assert_eq!(hit_test(&poses, Vec2::new(30.1, 30.0)), None);
}

#[test]
fn test_lowest_index_wins() {
    let poses = vec![person(0.0, 0.0, 100.0, 100.0), person(50.0, 50.0, 100.0, 100.0)];
    assert_eq!(hit_test(&poses, Vec2::new(75.0, 75.0)), Some(0));
    assert_eq!(hit_test(&poses, Vec2::new(125.0, 125.0)), Some(1));
}

#[test]
fn test_click_without_label_does_nothing() {
    let poses = vec![person(0.0, 0.0, 100.0, 100.0)];
    let mut resolver = AnnotationResolver::new();
    assert!(resolver.pointer_down(Vec2::new(50.0, 50.0), &poses, 0.0).is_none());
    assert_eq!(resolver.state(), ResolverState::Idle);
}

#[test]
fn test_drag_creates_box() {
    let mut resolver = pending(ActionLabel::Block);
    assert!(resolver.pointer_down(Vec2::new(200.0, 200.0), &[], 3.0).is_none());
    assert!(resolver.is_drawing());

    assert!(resolver.pointer_move(Vec2::new(180.0, 230.0)));
    let live = resolver.live_rect().unwrap();
    assert_eq!(live.origin, Vec2::new(180.0, 200.0));
    assert_eq!(live.size, Vec2::new(20.0, 30.0));

    // dragging up and to the left still gives a positive box
    let annotation = resolver.pointer_up(Vec2::new(150.0, 160.0), 3.0).unwrap();
    assert_eq!(annotation.label, "block");
    assert_eq!(
        annotation.bbox,
        AnnotationBox {
            x: 150.0,
            y: 160.0,
            width: 50.0,
            height: 40.0
        }
    );
    assert_eq!(resolver.state(), ResolverState::Idle);
    assert!(resolver.live_rect().is_none());
}

#[test]
fn test_small_drag_is_discarded_and_clears_label() {
    let mut resolver = pending(ActionLabel::Set);
    resolver.pointer_down(Vec2::new(10.0, 10.0), &[], 1.0);
    assert!(resolver.pointer_up(Vec2::new(15.0, 40.0), 1.0).is_none());
    assert_eq!(resolver.pending_label(), None);

    let mut resolver = pending(ActionLabel::Set);
    resolver.pointer_down(Vec2::new(10.0, 10.0), &[], 1.0);
    assert!(resolver.pointer_up(Vec2::new(40.0, 15.0), 1.0).is_none());

    let mut resolver = pending(ActionLabel::Set);
    resolver.pointer_down(Vec2::new(10.0, 10.0), &[], 1.0);
    assert!(resolver.pointer_up(Vec2::new(15.1, 15.1), 1.0).is_some());
}

#[test]
fn test_pointer_leave_ends_drag() {
    let mut resolver = pending(ActionLabel::Serve);
    resolver.pointer_down(Vec2::new(0.0, 0.0), &[], 2.0);
    resolver.pointer_move(Vec2::new(60.0, 60.0));
    let annotation = resolver.pointer_leave(2.0).unwrap();
    assert_eq!(annotation.bbox.width, 60.0);
    assert_eq!(resolver.state(), ResolverState::Idle);
}

#[test]
fn test_drag_starting_outside_ignores_boxes_it_ends_in() {
    let poses = vec![person(100.0, 100.0, 50.0, 50.0)];
    let mut resolver = pending(ActionLabel::Receive);
    resolver.pointer_down(Vec2::new(0.0, 0.0), &poses, 1.0);
    let annotation = resolver.pointer_up(Vec2::new(120.0, 120.0), 1.0).unwrap();
    assert_eq!(annotation.bbox.width, 120.0);
}

#[test]
fn test_reselect_replaces_label() {
    let mut resolver = pending(ActionLabel::Ball);
    assert!(resolver.select_label(ActionLabel::Serve));
    assert_eq!(resolver.pending_label(), Some(ActionLabel::Serve));
}

#[test]
fn test_select_during_drag_is_ignored() {
    let mut resolver = pending(ActionLabel::Ball);
    resolver.pointer_down(Vec2::new(0.0, 0.0), &[], 0.0);
    assert!(!resolver.select_label(ActionLabel::Spike));
    assert_eq!(resolver.pending_label(), Some(ActionLabel::Ball));
}

#[test]
fn test_cancel() {
    let mut resolver = pending(ActionLabel::Ball);
    assert!(resolver.cancel());
    assert!(!resolver.cancel());
    let poses = vec![person(0.0, 0.0, 100.0, 100.0)];
    assert!(resolver.pointer_down(Vec2::new(50.0, 50.0), &poses, 0.0).is_none());
}

#[test]
fn test_canvas_scale() {
    let scale = CanvasScale::new(Vec2::new(1920.0, 1080.0), Vec2::new(960.0, 540.0));
    assert_eq!(scale.to_canvas(Vec2::new(100.0, 50.0)), Vec2::new(200.0, 100.0));

    let degenerate = CanvasScale::new(Vec2::new(1920.0, 1080.0), Vec2::new(0.0, 0.0));
    assert_eq!(degenerate.to_canvas(Vec2::new(7.0, 9.0)), Vec2::new(7.0, 9.0));
}
