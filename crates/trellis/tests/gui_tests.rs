//! End-to-end tests driving a GUI through raw window events.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use trellis::widget::widgets::{AnimatedPicture, Button, Checkbox, EditBox, Label, Panel, Slider};
use trellis::widget::{
    Event, Key, KeyEvent, MouseButton, MouseButtonEvent, MouseMoveEvent, MouseWheelEvent,
    TextEvent, Trigger, Widget,
};
use trellis::{Color, Context, Gui, Point, Rect, RenderTarget, Texture, View};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn click_at(gui: &mut Gui, pos: Point) {
    gui.handle_event(Event::MouseButtonPressed(MouseButtonEvent {
        button: MouseButton::Left,
        pos,
    }));
    gui.handle_event(Event::MouseButtonReleased(MouseButtonEvent {
        button: MouseButton::Left,
        pos,
    }));
}

fn tab(gui: &mut Gui) {
    gui.handle_event(Event::KeyReleased(KeyEvent { key: Key::Tab }));
}

fn type_text(gui: &mut Gui, text: &str) {
    for unicode in text.chars() {
        gui.handle_event(Event::TextEntered(TextEvent { unicode }));
    }
}

#[test]
fn test_click_triggers_button_callback() {
    init_tracing();
    let ctx = Context::new();
    let mut gui = Gui::new(ctx.clone());

    let clicks = Arc::new(AtomicUsize::new(0));
    let mut button = Button::new(&ctx, "Go");
    button.set_position(Point::new(10.0, 10.0));
    button.set_size((100.0, 30.0).into());
    let counter = Arc::clone(&clicks);
    button.connect(Trigger::LeftMouseClicked, move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    gui.add(Box::new(button), "go");

    click_at(&mut gui, Point::new(50.0, 20.0));
    assert_eq!(clicks.load(Ordering::SeqCst), 1);

    // Press on the button, release off it: no click.
    gui.handle_event(Event::MouseButtonPressed(MouseButtonEvent {
        button: MouseButton::Left,
        pos: Point::new(50.0, 20.0),
    }));
    gui.handle_event(Event::MouseButtonReleased(MouseButtonEvent {
        button: MouseButton::Left,
        pos: Point::new(300.0, 300.0),
    }));
    assert_eq!(clicks.load(Ordering::SeqCst), 1);
}

#[test]
fn test_tab_cycles_focus_and_skips_labels() {
    let ctx = Context::new();
    let mut gui = Gui::new(ctx.clone());

    let mut first = Button::new(&ctx, "First");
    first.set_size((80.0, 24.0).into());
    let mut label = Label::new(&ctx, "between");
    label.set_position(Point::new(0.0, 30.0));
    let mut second = Button::new(&ctx, "Second");
    second.set_position(Point::new(0.0, 60.0));
    second.set_size((80.0, 24.0).into());

    gui.add(Box::new(first), "first");
    gui.add(Box::new(label), "label");
    gui.add(Box::new(second), "second");

    tab(&mut gui);
    assert!(gui.get("first").unwrap().is_focused());

    tab(&mut gui);
    assert!(gui.get("second").unwrap().is_focused());
    assert!(!gui.get("label").unwrap().is_focused());

    tab(&mut gui);
    assert!(gui.get("first").unwrap().is_focused(), "wraps around");
}

#[test]
fn test_edit_box_receives_text_only_while_focused() {
    let ctx = Context::new();
    let mut gui = Gui::new(ctx.clone());

    let text_changes = Arc::new(AtomicUsize::new(0));
    let mut edit = EditBox::new(&ctx);
    edit.set_position(Point::new(10.0, 10.0));
    edit.set_size((200.0, 24.0).into());
    let counter = Arc::clone(&text_changes);
    edit.connect(Trigger::TextChanged, move |args| {
        assert!(args.text.is_some());
        counter.fetch_add(1, Ordering::SeqCst);
    });
    gui.add(Box::new(edit), "edit");

    // Nothing is focused yet, so typed text is dropped.
    type_text(&mut gui, "lost");
    assert_eq!(text_changes.load(Ordering::SeqCst), 0);

    click_at(&mut gui, Point::new(20.0, 20.0));
    assert!(gui.get("edit").unwrap().is_focused());

    type_text(&mut gui, "hey");
    gui.handle_event(Event::KeyPressed(KeyEvent { key: Key::Backspace }));
    assert_eq!(text_changes.load(Ordering::SeqCst), 4);
}

#[test]
fn test_edit_box_editing_operations() {
    let ctx = Context::new();
    let mut edit = EditBox::new(&ctx);

    edit.on_text_entered(&TextEvent { unicode: 'h' });
    edit.on_text_entered(&TextEvent { unicode: 'y' });
    edit.on_key_pressed(&KeyEvent { key: Key::Left });
    edit.on_text_entered(&TextEvent { unicode: 'e' });
    assert_eq!(edit.text(), "hey");
    assert_eq!(edit.caret_position(), 2);

    edit.on_key_pressed(&KeyEvent { key: Key::Delete });
    assert_eq!(edit.text(), "he");
    edit.on_key_pressed(&KeyEvent { key: Key::Backspace });
    assert_eq!(edit.text(), "h");
    assert_eq!(edit.caret_position(), 1);

    edit.set_max_length(Some(2));
    edit.on_text_entered(&TextEvent { unicode: 'i' });
    edit.on_text_entered(&TextEvent { unicode: '!' });
    assert_eq!(edit.text(), "hi", "input beyond the maximum is dropped");

    let returns = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&returns);
    edit.connect(Trigger::ReturnKeyPressed, move |args| {
        assert_eq!(args.text.as_deref(), Some("hi"));
        counter.fetch_add(1, Ordering::SeqCst);
    });
    edit.on_key_pressed(&KeyEvent { key: Key::Return });
    assert_eq!(returns.load(Ordering::SeqCst), 1);
}

#[test]
fn test_checkbox_toggles_on_click_and_space() {
    let ctx = Context::new();
    let mut gui = Gui::new(ctx.clone());

    let checked = Arc::new(AtomicUsize::new(0));
    let unchecked = Arc::new(AtomicUsize::new(0));

    let mut checkbox = Checkbox::new(&ctx, "Enable");
    checkbox.set_position(Point::new(10.0, 10.0));
    checkbox.set_size((20.0, 20.0).into());
    let on = Arc::clone(&checked);
    checkbox.connect(Trigger::Checked, move |args| {
        assert_eq!(args.checked, Some(true));
        on.fetch_add(1, Ordering::SeqCst);
    });
    let off = Arc::clone(&unchecked);
    checkbox.connect(Trigger::Unchecked, move |_| {
        off.fetch_add(1, Ordering::SeqCst);
    });
    gui.add(Box::new(checkbox), "enable");

    click_at(&mut gui, Point::new(15.0, 15.0));
    assert_eq!(checked.load(Ordering::SeqCst), 1);

    // The click focused the checkbox, so space toggles it back off.
    gui.handle_event(Event::KeyPressed(KeyEvent { key: Key::Space }));
    assert_eq!(unchecked.load(Ordering::SeqCst), 1);
}

#[test]
fn test_slider_changes_value_on_wheel_and_drag() {
    let ctx = Context::new();
    let mut gui = Gui::new(ctx.clone());

    let values = Arc::new(parking_lot::Mutex::new(Vec::new()));
    let mut slider = Slider::new();
    slider.set_vertical(false);
    slider.set_position(Point::new(10.0, 10.0));
    slider.set_size((100.0, 10.0).into());
    let recorded = Arc::clone(&values);
    slider.connect(Trigger::ValueChanged, move |args| {
        recorded.lock().push(args.value.unwrap() as i32);
    });
    gui.add(Box::new(slider), "volume");

    // Scrolling over the slider adjusts the value in place.
    gui.handle_event(Event::MouseWheelMoved(MouseWheelEvent {
        delta: -2.0,
        pos: Point::new(50.0, 15.0),
    }));

    // Press the track past the thumb, drag along it, release.
    gui.handle_event(Event::MouseButtonPressed(MouseButtonEvent {
        button: MouseButton::Left,
        pos: Point::new(45.0, 15.0),
    }));
    gui.handle_event(Event::MouseMoved(MouseMoveEvent {
        pos: Point::new(90.0, 15.0),
    }));
    gui.handle_event(Event::MouseButtonReleased(MouseButtonEvent {
        button: MouseButton::Left,
        pos: Point::new(90.0, 15.0),
    }));

    assert_eq!(*values.lock(), vec![2, 4, 8]);
    // A slider never holds keyboard focus.
    assert!(!gui.get("volume").unwrap().is_focused());
}

#[test]
fn test_view_maps_window_pixels_before_dispatch() {
    let ctx = Context::new();
    let mut gui = Gui::new(ctx.clone());
    gui.set_view(View {
        origin: Point::new(100.0, 0.0),
        scale: 2.0,
    });

    let clicks = Arc::new(AtomicUsize::new(0));
    let mut button = Button::new(&ctx, "Hit");
    button.set_position(Point::new(110.0, 10.0));
    button.set_size((20.0, 20.0).into());
    let counter = Arc::clone(&clicks);
    button.connect(Trigger::LeftMouseClicked, move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    gui.add(Box::new(button), "hit");

    // Pixel (10, 10) maps to world (120, 20), inside the button.
    click_at(&mut gui, Point::new(10.0, 10.0));
    assert_eq!(clicks.load(Ordering::SeqCst), 1);

    // Pixel (50, 50) maps to world (200, 100), outside.
    click_at(&mut gui, Point::new(50.0, 50.0));
    assert_eq!(clicks.load(Ordering::SeqCst), 1);
}

#[test]
fn test_animated_picture_advances_with_accumulated_time() {
    let dir = tempfile::tempdir().unwrap();
    let frame_a = dir.path().join("a.png");
    let frame_b = dir.path().join("b.png");
    for path in [&frame_a, &frame_b] {
        image::RgbaImage::from_pixel(2, 2, image::Rgba([255, 0, 0, 255]))
            .save(path)
            .unwrap();
    }

    let ctx = Context::new();
    let mut gui = Gui::new(ctx.clone());

    let finished = Arc::new(AtomicUsize::new(0));
    let mut animation = AnimatedPicture::new();
    animation
        .add_frame(&ctx, &frame_a, Duration::from_millis(100))
        .unwrap();
    animation
        .add_frame(&ctx, &frame_b, Duration::from_millis(100))
        .unwrap();
    let counter = Arc::clone(&finished);
    animation.connect(Trigger::AnimationFinished, move |_| {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    animation.play();
    gui.add(Box::new(animation), "anim");

    // 150ms covers one frame advance.
    gui.root_mut().update_time(Duration::from_millis(150));
    // Another 110ms passes the last frame and stops the run.
    gui.root_mut().update_time(Duration::from_millis(110));

    assert_eq!(finished.load(Ordering::SeqCst), 1);
    // Further time does nothing once stopped.
    gui.root_mut().update_time(Duration::from_millis(500));
    assert_eq!(finished.load(Ordering::SeqCst), 1);
}

/// Records draw calls for order and clipping assertions.
#[derive(Default)]
struct RecordingTarget {
    ops: Vec<String>,
}

impl RenderTarget for RecordingTarget {
    fn fill_rect(&mut self, rect: Rect, _color: Color) {
        self.ops
            .push(format!("fill({},{})", rect.origin.x, rect.origin.y));
    }

    fn draw_texture(&mut self, _texture: &Arc<Texture>, rect: Rect, _tint: Color) {
        self.ops
            .push(format!("texture({},{})", rect.origin.x, rect.origin.y));
    }

    fn draw_text(&mut self, text: &str, _pos: Point, _size: u32, _color: Color) {
        self.ops.push(format!("text({text})"));
    }

    fn push_clip(&mut self, _rect: Rect) {
        self.ops.push("push_clip".into());
    }

    fn pop_clip(&mut self) {
        self.ops.push("pop_clip".into());
    }
}

#[test]
fn test_panel_draws_children_clipped_and_translated() {
    let ctx = Context::new();
    let mut gui = Gui::new(ctx.clone());

    let mut panel = Panel::new((100.0, 100.0).into());
    panel.set_position(Point::new(50.0, 50.0));
    let mut inner = Button::new(&ctx, "In");
    inner.set_position(Point::new(10.0, 10.0));
    inner.set_size((30.0, 20.0).into());
    panel.children_mut().add(Box::new(inner), "in");
    gui.add(Box::new(panel), "panel");

    let mut target = RecordingTarget::default();
    gui.draw(&mut target);

    assert_eq!(
        target.ops,
        vec![
            "fill(50,50)".to_string(), // panel background in world space
            "push_clip".to_string(),
            "fill(60,60)".to_string(), // child translated by the panel origin
            "text(In)".to_string(),
            "pop_clip".to_string(),
        ]
    );
}

#[test]
fn test_hidden_widgets_are_not_drawn() {
    let ctx = Context::new();
    let mut gui = Gui::new(ctx.clone());

    let mut button = Button::new(&ctx, "Ghost");
    button.set_size((30.0, 20.0).into());
    button.set_visible(false);
    gui.add(Box::new(button), "ghost");

    let mut target = RecordingTarget::default();
    gui.draw(&mut target);
    assert!(target.ops.is_empty());
}
