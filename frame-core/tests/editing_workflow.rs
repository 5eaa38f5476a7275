//! Editing Workflow Integration Tests
//!
//! Drives the core the way an editor does:
//! - Pointer press resolved to a target
//! - Gesture started from the target and the current modes
//! - Steps, then commit or cancel
//! - One-shot edits and persistence between gestures

use frame_core::{
    compute_layout, constrain_all, divider_quad, edit, resolve_target, templates, Axis, Edge,
    EditorConfig, EditorHost, Frame, FrameId, Gesture, ImageBinding, LayoutNode, ModeFlags, Point,
    Size, Target,
};
use tracing_subscriber::EnvFilter;

/// Editor stand-in that records what the core asked of it.
struct TestHost {
    config: EditorConfig,
    modes: ModeFlags,
    size: Size,
    commits: Vec<Frame>,
    reverts: usize,
    redraws: usize,
}

impl TestHost {
    fn page() -> Self {
        Self {
            config: EditorConfig::default(),
            modes: ModeFlags::default(),
            size: Size::new(840.0, 1188.0),
            commits: Vec::new(),
            reverts: 0,
            redraws: 0,
        }
    }
}

impl EditorHost for TestHost {
    fn canvas_size(&self) -> Size {
        self.size
    }

    fn modes(&self) -> ModeFlags {
        self.modes
    }

    fn config(&self) -> &EditorConfig {
        &self.config
    }

    fn request_redraw(&mut self) {
        self.redraws += 1;
    }

    fn on_commit(&mut self, tree: &Frame) {
        self.commits.push(tree.clone());
    }

    fn on_revert(&mut self) {
        self.reverts += 1;
    }
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_test_writer()
        .try_init();
}

/// Ids of the four stacked panels of the four-panel template.
fn panels(tree: &Frame) -> Vec<FrameId> {
    tree.children()[1].children()[1].children()[1]
        .children()
        .iter()
        .map(|f| f.id)
        .collect()
}

fn layout(tree: &Frame, host: &TestHost) -> LayoutNode {
    compute_layout(tree, host.canvas_size(), Point::default()).expect("should lay out")
}

fn assert_covers(tree: &Frame, layout: &LayoutNode, id: FrameId) {
    let image = tree.find(id).and_then(Frame::image).expect("image bound");
    let cell = layout.find(id).expect("laid out").cell_bounds().size();
    let scaled = image.scaled_size();
    assert!(scaled.width >= cell.width - 1e-9, "{scaled:?} vs {cell:?}");
    assert!(scaled.height >= cell.height - 1e-9, "{scaled:?} vs {cell:?}");
}

// ============================================================================
// Divider Gestures
// ============================================================================

#[test]
fn test_press_on_divider_moves_it() {
    init_tracing();
    let mut tree = templates::four_panel();
    let mut host = TestHost::page();
    let ids = panels(&tree);
    let column = tree.children()[1].children()[1].children()[1].id;

    edit::import_image(&mut tree, &mut host, ids[0], ImageBinding::new("p.png", 640.0, 480.0))
        .expect("should import");

    let before = layout(&tree, &host);
    let strip = divider_quad(before.find(column).expect("column"), 1, 0.0).expect("gap");
    let press = strip.bounding_rect().center();

    let target = resolve_target(&before, press, host.modes(), host.config()).expect("hit");
    assert_eq!(target, Target::Divider { container: column, index: 1 });

    let mut gesture = Gesture::begin(&mut tree, &mut host, target, press).expect("should start");
    gesture.step(press.offset(0.0, 30.0)).expect("should step");
    gesture.step(press.offset(0.0, 60.0)).expect("should step");
    gesture.commit();

    let first = tree.find(ids[0]).expect("panel").raw_size;
    let second = tree.find(ids[1]).expect("panel").raw_size;
    assert!(first > 8.0);
    assert!((first + second - 16.0).abs() < 1e-9);
    assert_eq!(host.commits.len(), 2);
    assert_eq!(host.commits.last(), Some(&tree));

    let after = layout(&tree, &host);
    assert_covers(&tree, &after, ids[0]);
}

#[test]
fn test_slant_modifier_tilts_divider() {
    init_tracing();
    let mut tree = templates::four_panel();
    let mut host = TestHost::page();
    host.modes.slant = true;
    let column = tree.children()[1].children()[1].children()[1].id;

    let target = Target::Divider { container: column, index: 2 };
    let mut gesture = Gesture::begin(&mut tree, &mut host, target, Point::new(400.0, 600.0))
        .expect("should start");
    gesture.step(Point::new(400.0, 650.0)).expect("should step");
    gesture.commit();

    let tilted = &tree.children()[1].children()[1].children()[1].children()[1];
    assert!((tilted.divider.slant - 10.0).abs() < 1e-9);

    // panels below the tilted divider now have a sheared top edge
    let after = layout(&tree, &host);
    let below = after.find(panels(&tree)[2]).expect("panel");
    assert!((below.corners.top_left.y - below.corners.top_right.y).abs() > 1.0);
}

// ============================================================================
// Band and Image Gestures
// ============================================================================

#[test]
fn test_margin_mode_grabs_band_before_leaf() {
    init_tracing();
    let mut tree = templates::four_panel();
    let mut host = TestHost::page();
    let first = panels(&tree)[0];

    let before = layout(&tree, &host);
    let cell = before.find(first).expect("panel");
    let press = Point::new(cell.raw_rect().center().x, cell.raw_origin.y + 6.0);

    assert_eq!(
        resolve_target(&before, press, host.modes(), host.config()),
        Some(Target::Leaf(first))
    );

    host.modes.margin_edit = true;
    let target = resolve_target(&before, press, host.modes(), host.config()).expect("hit");
    assert_eq!(target, Target::Margin { frame: first, edge: Edge::Top });

    let height = cell.raw_size.height;
    let mut gesture = Gesture::begin(&mut tree, &mut host, target, press).expect("should start");
    gesture.step(press.offset(0.0, height * 0.25)).expect("should step");
    gesture.commit();

    assert!((tree.find(first).expect("panel").margin.top - 0.25).abs() < 1e-9);
}

#[test]
fn test_pan_then_cancel_leaves_tree_untouched() {
    init_tracing();
    let mut tree = templates::single_panel();
    let mut host = TestHost::page();
    let panel = tree.children()[1].children()[1].id;
    edit::import_image(&mut tree, &mut host, panel, ImageBinding::new("wide.png", 4000.0, 1000.0))
        .expect("should import");
    let saved = tree.clone();

    let press = layout(&tree, &host).find(panel).expect("panel").cell_bounds().center();
    let target = resolve_target(&layout(&tree, &host), press, host.modes(), host.config())
        .expect("hit");
    assert_eq!(target, Target::Leaf(panel));

    let mut gesture = Gesture::begin(&mut tree, &mut host, target, press).expect("should start");
    gesture.step(press.offset(-5000.0, 40.0)).expect("should step");
    let panned = gesture.tree().find(panel).and_then(Frame::image).expect("image").translation;
    // clamped to the horizontal slack, no vertical slack at all
    assert!(panned[0] < 0.0);
    assert!(panned[1].abs() < 1e-9);
    gesture.cancel().expect("should cancel");

    assert_eq!(tree, saved);
    assert_eq!(host.reverts, 1);
    assert_eq!(host.commits.len(), 1);
}

// ============================================================================
// One-shot Edits and Persistence
// ============================================================================

#[test]
fn test_split_erase_and_round_trip() {
    init_tracing();
    let mut tree = templates::four_panel();
    let mut host = TestHost::page();
    let last = *panels(&tree).last().expect("panels");

    let (a, b) = edit::split(&mut tree, &mut host, last, Axis::Row).expect("should split");
    assert_eq!(panels(&tree).len(), 4);
    assert_eq!(tree.find(last).map(|f| f.children().len()), Some(2));

    edit::erase(&mut tree, &mut host, a).expect("should erase");
    let restored = tree.find(b).expect("survivor adopted into the slot");
    assert!(restored.is_leaf());
    assert!((restored.raw_size - 8.0).abs() < 1e-9);

    let json = tree.to_json().expect("should serialize");
    let loaded = Frame::from_json(&json).expect("should load");
    assert_eq!(loaded, tree);
    assert_eq!(host.commits.len(), 2);

    let mut reloaded = loaded;
    constrain_all(&mut reloaded, host.canvas_size()).expect("should lay out");
}
