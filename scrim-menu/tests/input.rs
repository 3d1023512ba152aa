use std::cell::RefCell;
use std::rc::Rc;

use scrim_menu::prelude::*;

fn context() -> MenuContext {
    let mut ctx = MenuContext::new("test", BasicTheme::new(), MemoryStore::new());
    ctx.set_anchor(Point::ZERO);
    ctx
}

fn down(x: i32, y: i32) -> InputMessage {
    InputMessage::pointer(MessageKind::PointerDown, Point::new(x, y))
}

fn up(x: i32, y: i32) -> InputMessage {
    InputMessage::pointer(MessageKind::PointerUp, Point::new(x, y))
}

fn pointer_move(x: i32, y: i32) -> InputMessage {
    InputMessage::pointer(MessageKind::PointerMove, Point::new(x, y))
}

fn key_down(key: Key) -> InputMessage {
    InputMessage::key(MessageKind::KeyDown, Point::ZERO, key)
}

fn key_up(key: Key) -> InputMessage {
    InputMessage::key(MessageKind::KeyUp, Point::ZERO, key)
}

fn header_center(ctx: &MenuContext, root: &str) -> Point {
    ctx.theme().menu_bounds(ctx.root(root).unwrap()).center()
}

fn control_bounds(ctx: &MenuContext, root: &str, path: &[&str], name: &str) -> Rect {
    let mut menu = ctx.root(root).unwrap();
    for segment in path {
        menu = menu.submenu(segment).unwrap();
    }
    ctx.theme().control_bounds(menu.control(name).unwrap())
}

/// Click (press + release) at a point and return the press events.
fn click(ctx: &mut MenuContext, at: Point) -> Vec<ChangeEvent> {
    let events = ctx.dispatch(&down(at.x, at.y));
    ctx.dispatch(&up(at.x, at.y));
    events
}

// ============================================================================
// Toggle and sibling exclusivity
// ============================================================================

#[test]
fn test_click_toggles_root() {
    let mut ctx = context();
    let mut root = Menu::root("root", "Root");
    root.add(Control::checkbox("c", "C", false)).unwrap();
    ctx.attach(root).unwrap();
    ctx.draw();

    let header = header_center(&ctx, "root");
    click(&mut ctx, header);
    assert!(ctx.root("root").unwrap().toggled());

    click(&mut ctx, header);
    assert!(!ctx.root("root").unwrap().toggled());
}

#[test]
fn test_empty_menu_does_not_toggle() {
    let mut ctx = context();
    ctx.attach(Menu::root("root", "Root")).unwrap();
    ctx.draw();

    let root_header = header_center(&ctx, "root");
    click(&mut ctx, root_header);
    assert!(!ctx.root("root").unwrap().toggled());
}

#[test]
fn test_opening_one_root_closes_all_others() {
    let mut ctx = context();
    for (name, display) in [("alpha", "Alpha"), ("beta", "Beta")] {
        let mut root = Menu::root(name, display);
        root.add(Control::checkbox("c", "C", false)).unwrap();
        ctx.attach(root).unwrap();
    }
    ctx.draw();

    let alpha_header = header_center(&ctx, "alpha");
    click(&mut ctx, alpha_header);
    assert!(ctx.root("alpha").unwrap().toggled());

    let beta_header = header_center(&ctx, "beta");
    click(&mut ctx, beta_header);
    assert!(ctx.root("beta").unwrap().toggled());
    assert!(!ctx.root("alpha").unwrap().toggled());
}

#[test]
fn test_nested_toggle_closes_direct_siblings_only() {
    let mut ctx = context();
    let mut root = Menu::root("root", "Root");

    let mut a = Menu::new("a", "A");
    let mut inner = Menu::new("inner", "Inner");
    inner.add(Control::checkbox("deep", "Deep", false)).unwrap();
    a.add(inner).unwrap();
    let mut b = Menu::new("b", "B");
    b.add(Control::checkbox("c", "C", false)).unwrap();
    root.add(a).unwrap();
    root.add(b).unwrap();
    ctx.attach(root).unwrap();
    ctx.draw();

    // Open the root, then open "a"
    let root_header = header_center(&ctx, "root");
    click(&mut ctx, root_header);
    ctx.draw();
    let a_header = ctx
        .theme()
        .menu_bounds(ctx.root("root").unwrap().submenu("a").unwrap())
        .center();
    click(&mut ctx, a_header);
    assert!(ctx.root("root").unwrap().submenu("a").unwrap().toggled());

    // Opening "b" forces "a" closed
    let b_header = ctx
        .theme()
        .menu_bounds(ctx.root("root").unwrap().submenu("b").unwrap())
        .center();
    click(&mut ctx, b_header);
    let root = ctx.root("root").unwrap();
    assert!(root.submenu("b").unwrap().toggled());
    assert!(!root.submenu("a").unwrap().toggled());
    // The root itself stays open: exclusivity is per level
    assert!(root.toggled());
}

#[test]
fn test_collapsing_menu_closes_descendants() {
    let mut ctx = context();
    let mut root = Menu::root("root", "Root");
    let mut a = Menu::new("a", "A");
    let mut inner = Menu::new("inner", "Inner");
    inner.add(Control::checkbox("deep", "Deep", false)).unwrap();
    a.add(inner).unwrap();
    root.add(a).unwrap();
    ctx.attach(root).unwrap();
    ctx.draw();

    let root_header = header_center(&ctx, "root");
    click(&mut ctx, root_header);
    ctx.draw();
    let a_header = ctx
        .theme()
        .menu_bounds(ctx.root("root").unwrap().submenu("a").unwrap())
        .center();
    click(&mut ctx, a_header);
    ctx.draw();
    let inner_header = ctx
        .theme()
        .menu_bounds(
            ctx.root("root")
                .unwrap()
                .submenu("a")
                .unwrap()
                .submenu("inner")
                .unwrap(),
        )
        .center();
    click(&mut ctx, inner_header);
    assert!(
        ctx.root("root")
            .unwrap()
            .submenu("a")
            .unwrap()
            .submenu("inner")
            .unwrap()
            .toggled()
    );

    // Toggling "a" closed forces "inner" closed too
    click(&mut ctx, a_header);
    let a = ctx.root("root").unwrap().submenu("a").unwrap();
    assert!(!a.toggled());
    assert!(!a.submenu("inner").unwrap().toggled());
    assert!(!a.submenu("inner").unwrap().visible());
}

// ============================================================================
// Drag
// ============================================================================

#[test]
fn test_header_drag_moves_anchor() {
    let mut ctx = context();
    let mut root = Menu::root("root", "Root");
    root.add(Control::checkbox("c", "C", false)).unwrap();
    ctx.attach(root).unwrap();
    ctx.draw();

    ctx.dispatch(&down(5, 5));
    ctx.dispatch(&pointer_move(30, 40));
    assert_eq!(ctx.anchor(), Point::new(25, 35));

    // Release ends the drag wherever the cursor is
    ctx.dispatch(&up(500, 500));
    ctx.dispatch(&pointer_move(100, 100));
    assert_eq!(ctx.anchor(), Point::new(25, 35));
}

// ============================================================================
// Slider scenario
// ============================================================================

#[test]
fn test_slider_press_drag_release() {
    let mut ctx = context();
    let mut root = Menu::root("root", "Root");
    root.add(Control::slider("speed", "Speed", 50, 0, 100)).unwrap();
    ctx.attach(root).unwrap();

    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    ctx.root_mut("root").unwrap().on_change(move |event| {
        sink.borrow_mut().push(event.clone());
    });

    ctx.draw();
    let root_header = header_center(&ctx, "root");
    click(&mut ctx, root_header);
    ctx.draw();

    let bounds = control_bounds(&ctx, "root", &[], "speed");

    // Press at the midpoint: computes 50, equal to the current value, so no
    // event fires, but the interaction starts.
    let mid = bounds.center();
    let events = ctx.dispatch(&down(mid.x, mid.y));
    assert!(events.is_empty());
    assert!(seen.borrow().is_empty());
    assert!(
        ctx.root("root")
            .unwrap()
            .control("speed")
            .unwrap()
            .interacting()
    );

    // Drag to the right edge: one event, value 100
    let events = ctx.dispatch(&pointer_move(bounds.right(), mid.y));
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].source, "speed");
    assert_eq!(events[0].container, "root");
    assert_eq!(events[0].value, ControlValue::Slider(100));
    assert_eq!(ctx.root("root").unwrap().value_of::<i32>("speed").unwrap(), 100);

    // Drag far past the edge: still clamped to 100, no second event
    let events = ctx.dispatch(&pointer_move(bounds.right() + 500, mid.y));
    assert!(events.is_empty());

    // Release anywhere ends the interaction
    ctx.dispatch(&up(-100, -100));
    assert!(
        !ctx.root("root")
            .unwrap()
            .control("speed")
            .unwrap()
            .interacting()
    );

    let seen = seen.borrow();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].value, ControlValue::Slider(100));
}

#[test]
fn test_slider_clamps_far_left() {
    let mut ctx = context();
    let mut root = Menu::root("root", "Root");
    root.add(Control::slider("speed", "Speed", 50, 10, 90)).unwrap();
    ctx.attach(root).unwrap();
    ctx.draw();
    ctx.root_mut("root").unwrap().set_toggled(true);
    ctx.draw();

    let bounds = control_bounds(&ctx, "root", &[], "speed");
    let mid = bounds.center();
    ctx.dispatch(&down(mid.x, mid.y));
    ctx.dispatch(&pointer_move(bounds.x - 1000, mid.y));
    assert_eq!(ctx.root("root").unwrap().value_of::<i32>("speed").unwrap(), 10);
}

#[test]
fn test_release_reaches_hidden_controls() {
    let mut ctx = context();
    let mut root = Menu::root("root", "Root");
    root.add(Control::slider("speed", "Speed", 50, 0, 100)).unwrap();
    ctx.attach(root).unwrap();
    ctx.draw();

    let header = header_center(&ctx, "root");
    click(&mut ctx, header);
    ctx.draw();

    // Start a slider drag, then collapse the root over it
    let mid = control_bounds(&ctx, "root", &[], "speed").center();
    ctx.dispatch(&down(mid.x, mid.y));
    ctx.dispatch(&down(header.x, header.y));
    assert!(!ctx.root("root").unwrap().control("speed").unwrap().visible());
    assert!(
        ctx.root("root")
            .unwrap()
            .control("speed")
            .unwrap()
            .interacting()
    );

    // The release still reaches the now-hidden control
    ctx.dispatch(&up(header.x, header.y));
    assert!(
        !ctx.root("root")
            .unwrap()
            .control("speed")
            .unwrap()
            .interacting()
    );
}

// ============================================================================
// Checkbox, list, keybind
// ============================================================================

#[test]
fn test_checkbox_click_fires_once_per_click() {
    let mut ctx = context();
    let mut root = Menu::root("root", "Root");
    root.add(Control::checkbox("on", "Enabled", false)).unwrap();
    ctx.attach(root).unwrap();
    ctx.draw();
    ctx.root_mut("root").unwrap().set_toggled(true);
    ctx.draw();

    let at = control_bounds(&ctx, "root", &[], "on").center();
    let events = click(&mut ctx, at);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].value, ControlValue::Checkbox(true));

    let events = click(&mut ctx, at);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].value, ControlValue::Checkbox(false));
}

#[test]
fn test_list_cycles_and_wraps() {
    let mut ctx = context();
    let mut root = Menu::root("root", "Root");
    root.add(Control::list(
        "mode",
        "Mode",
        vec!["A".into(), "B".into(), "C".into()],
        0,
    ))
    .unwrap();
    ctx.attach(root).unwrap();
    ctx.draw();
    ctx.root_mut("root").unwrap().set_toggled(true);
    ctx.draw();

    let bounds = control_bounds(&ctx, "root", &[], "mode");
    let right = Point::new(bounds.right() - 1, bounds.center().y);
    let left = Point::new(bounds.x + 1, bounds.center().y);

    let events = click(&mut ctx, right);
    assert_eq!(events[0].value, ControlValue::List(1));

    let events = click(&mut ctx, left);
    assert_eq!(events[0].value, ControlValue::List(0));

    // Stepping back from the first option wraps to the last
    let events = click(&mut ctx, left);
    assert_eq!(events[0].value, ControlValue::List(2));
    assert_eq!(
        ctx.root("root")
            .unwrap()
            .control("mode")
            .unwrap()
            .state()
            .kind(),
        ValueKind::List
    );
    assert_eq!(ctx.root("root").unwrap().value_of::<usize>("mode").unwrap(), 2);
}

#[test]
fn test_keybind_toggle_mode() {
    let mut ctx = context();
    let mut root = Menu::root("root", "Root");
    root.add(Control::keybind("bind", "Bind", Some(Key::F(1)), KeybindMode::Toggle))
        .unwrap();
    ctx.attach(root).unwrap();
    ctx.root_mut("root").unwrap().set_toggled(true);

    let events = ctx.dispatch(&key_down(Key::F(1)));
    assert_eq!(events.len(), 1);
    assert_eq!(
        events[0].value,
        ControlValue::Keybind(KeybindValue {
            key: Some(Key::F(1)),
            active: true
        })
    );

    // Unrelated keys do nothing
    assert!(ctx.dispatch(&key_down(Key::F(2))).is_empty());

    let events = ctx.dispatch(&key_down(Key::F(1)));
    assert_eq!(events.len(), 1);
    assert_eq!(
        events[0].value,
        ControlValue::Keybind(KeybindValue {
            key: Some(Key::F(1)),
            active: false
        })
    );
}

#[test]
fn test_keybind_hold_mode() {
    let mut ctx = context();
    let mut root = Menu::root("root", "Root");
    root.add(Control::keybind("bind", "Bind", Some(Key::Char(' ')), KeybindMode::Hold))
        .unwrap();
    ctx.attach(root).unwrap();
    ctx.root_mut("root").unwrap().set_toggled(true);

    let events = ctx.dispatch(&key_down(Key::Char(' ')));
    assert_eq!(events.len(), 1);

    // Key repeat while held: no further events
    assert!(ctx.dispatch(&key_down(Key::Char(' '))).is_empty());

    let events = ctx.dispatch(&key_up(Key::Char(' ')));
    assert_eq!(events.len(), 1);
    assert_eq!(
        events[0].value,
        ControlValue::Keybind(KeybindValue {
            key: Some(Key::Char(' ')),
            active: false
        })
    );
}

#[test]
fn test_keybind_capture_rebinds() {
    let mut ctx = context();
    let mut root = Menu::root("root", "Root");
    root.add(Control::keybind("bind", "Bind", None, KeybindMode::Toggle))
        .unwrap();
    ctx.attach(root).unwrap();
    ctx.draw();
    ctx.root_mut("root").unwrap().set_toggled(true);
    ctx.draw();

    // Click the control to enter capture mode
    let at = control_bounds(&ctx, "root", &[], "bind").center();
    click(&mut ctx, at);
    let capturing = match ctx.root("root").unwrap().control("bind").unwrap().state() {
        ControlState::Keybind(keybind) => keybind.capturing(),
        _ => unreachable!(),
    };
    assert!(capturing);

    // The next key press binds without activating
    let events = ctx.dispatch(&key_down(Key::Char('z')));
    assert!(events.is_empty());

    // From now on, 'z' toggles
    let events = ctx.dispatch(&key_down(Key::Char('z')));
    assert_eq!(events.len(), 1);
    assert_eq!(
        ctx.root("root").unwrap().value_of::<KeybindValue>("bind").unwrap(),
        KeybindValue {
            key: Some(Key::Char('z')),
            active: true
        }
    );
}

#[test]
fn test_hidden_control_ignores_clicks() {
    let mut ctx = context();
    let mut root = Menu::root("root", "Root");
    root.add(Control::checkbox("on", "Enabled", false)).unwrap();
    ctx.attach(root).unwrap();
    ctx.root_mut("root").unwrap().set_toggled(true);
    ctx.draw();
    let at = control_bounds(&ctx, "root", &[], "on").center();
    ctx.root_mut("root").unwrap().set_toggled(false);

    let events = click(&mut ctx, at);
    assert!(events.is_empty());
    assert!(!ctx.root("root").unwrap().value_of::<bool>("on").unwrap());
}

// ============================================================================
// Change notification plumbing
// ============================================================================

#[test]
fn test_events_bubble_to_ancestors_once() {
    let mut ctx = context();
    let mut root = Menu::root("root", "Root");
    let mut sub = Menu::new("sub", "Sub");
    sub.add(Control::checkbox("on", "Enabled", false)).unwrap();
    sub.on_change(|_| {});
    root.add(sub).unwrap();
    ctx.attach(root).unwrap();

    let root_seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&root_seen);
    ctx.root_mut("root").unwrap().on_change(move |event| {
        sink.borrow_mut().push(event.clone());
    });

    ctx.root_mut("root").unwrap().set_toggled(true);
    ctx.draw();
    ctx.root_mut("root")
        .unwrap()
        .submenu_mut("sub")
        .unwrap()
        .set_toggled(true);
    ctx.draw();

    let at = control_bounds(&ctx, "root", &["sub"], "on").center();
    let events = click(&mut ctx, at);

    // One event, delivered to the root subscriber, naming the immediate
    // container
    assert_eq!(events.len(), 1);
    let root_seen = root_seen.borrow();
    assert_eq!(root_seen.len(), 1);
    assert_eq!(root_seen[0].source, "on");
    assert_eq!(root_seen[0].container, "sub");
}

#[test]
fn test_unsubscribe_stops_delivery() {
    let mut ctx = context();
    let mut root = Menu::root("root", "Root");
    root.add(Control::checkbox("on", "Enabled", false)).unwrap();
    ctx.attach(root).unwrap();

    let seen = Rc::new(RefCell::new(0u32));
    let sink = Rc::clone(&seen);
    let handler = ctx.root_mut("root").unwrap().on_change(move |_| {
        *sink.borrow_mut() += 1;
    });

    ctx.root_mut("root").unwrap().set_toggled(true);
    ctx.draw();
    let at = control_bounds(&ctx, "root", &[], "on").center();
    click(&mut ctx, at);
    assert_eq!(*seen.borrow(), 1);

    assert!(ctx.root_mut("root").unwrap().remove_handler(handler));
    click(&mut ctx, at);
    assert_eq!(*seen.borrow(), 1);

    // Removing twice reports the handler as gone
    assert!(!ctx.root_mut("root").unwrap().remove_handler(handler));
}

// ============================================================================
// Button and update tick
// ============================================================================

#[test]
fn test_button_press_invokes_action_and_flash_decays() {
    let mut ctx = context();
    let mut root = Menu::root("root", "Root");
    let fired = Rc::new(RefCell::new(0u32));
    let sink = Rc::clone(&fired);
    root.add(Control::button("run", "Run", move || {
        *sink.borrow_mut() += 1;
    }))
    .unwrap();
    ctx.attach(root).unwrap();
    ctx.root_mut("root").unwrap().set_toggled(true);
    ctx.draw();

    let at = control_bounds(&ctx, "root", &[], "run").center();
    let events = click(&mut ctx, at);
    assert!(events.is_empty());
    assert_eq!(*fired.borrow(), 1);

    let pressed = |ctx: &MenuContext| match ctx.root("root").unwrap().control("run").unwrap().state() {
        ControlState::Button(button) => button.pressed(),
        _ => unreachable!(),
    };
    assert!(pressed(&ctx));
    ctx.update();
    assert!(!pressed(&ctx));
}
