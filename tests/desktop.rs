//! End-to-end routing through the public API: crossterm input in, widget hooks out.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crossterm::event::{
    Event as CtEvent, KeyCode, KeyEvent as CtKeyEvent, KeyModifiers, MouseButton,
    MouseEvent as CtMouseEvent, MouseEventKind as CtMouseEventKind,
};

use spark_vision::{
    Desktop, DesktopConfig, EventOutcome, Key, KeypressEvent, MouseButtons, MouseEvent,
    MouseEventKind, Point, Rect, ResizeEvent, ResizeKind, Widget, Window, WindowFlags,
};

#[derive(Debug, Clone, PartialEq)]
enum Seen {
    Mouse(&'static str, MouseEventKind, Point, Point),
    Key(&'static str, Key),
    Resize(&'static str, ResizeKind, i32, i32),
}

type Log = Rc<RefCell<Vec<Seen>>>;

struct Probe {
    name: &'static str,
    consume: bool,
    log: Log,
}

impl Probe {
    fn new(name: &'static str, consume: bool, log: &Log) -> Self {
        Self {
            name,
            consume,
            log: log.clone(),
        }
    }

    fn mouse(&self, event: &MouseEvent) -> EventOutcome {
        self.log.borrow_mut().push(Seen::Mouse(
            self.name,
            event.kind(),
            event.position(),
            event.absolute(),
        ));
        self.consume.into()
    }
}

impl Widget for Probe {
    fn name(&self) -> &str {
        self.name
    }

    fn on_mouse_down(&mut self, event: &MouseEvent) -> EventOutcome {
        self.mouse(event)
    }

    fn on_mouse_up(&mut self, event: &MouseEvent) -> EventOutcome {
        self.mouse(event)
    }

    fn on_mouse_motion(&mut self, event: &MouseEvent) -> EventOutcome {
        self.mouse(event)
    }

    fn on_mouse_double_click(&mut self, event: &MouseEvent) -> EventOutcome {
        self.mouse(event)
    }

    fn on_keypress(&mut self, event: &KeypressEvent) -> EventOutcome {
        self.log.borrow_mut().push(Seen::Key(self.name, event.key));
        self.consume.into()
    }

    fn on_resize(&mut self, event: &ResizeEvent, _bounds: Rect) {
        self.log
            .borrow_mut()
            .push(Seen::Resize(self.name, event.kind(), event.width(), event.height()));
    }
}

fn ct_mouse(kind: CtMouseEventKind, column: u16, row: u16) -> CtEvent {
    CtEvent::Mouse(CtMouseEvent {
        kind,
        column,
        row,
        modifiers: KeyModifiers::NONE,
    })
}

/// Editor window at (10, 5), 44x22, with a 42x20 editor at (1, 1) and a
/// button at (2, 3) inside the editor.
fn editor_desktop(log: &Log) -> (Desktop, [spark_vision::WidgetId; 3]) {
    let mut desktop = Desktop::new(DesktopConfig::default().with_screen_size(100, 40));
    let win = desktop.add_window(
        Window::new("Editor").with_flags(WindowFlags::RESIZABLE),
        Probe::new("window", false, log),
        Rect::new(10, 5, 44, 22),
    );
    let tree = desktop.tree_mut();
    let editor = tree
        .add_child(win, Probe::new("editor", false, log), Rect::new(1, 1, 42, 20))
        .unwrap();
    let button = tree
        .add_child(editor, Probe::new("button", true, log), Rect::new(2, 3, 6, 1))
        .unwrap();
    tree.set_primary(win, editor).unwrap();
    (desktop, [win, editor, button])
}

#[test]
fn test_click_is_relative_at_every_level() {
    let log = Log::default();
    let (mut desktop, [win, editor, button]) = editor_desktop(&log);

    // Screen (15, 9) -> window (5, 4) -> editor (4, 3) -> button (2, 0)
    let result = desktop
        .handle_crossterm(ct_mouse(CtMouseEventKind::Down(MouseButton::Left), 15, 9))
        .unwrap();

    assert_eq!(result.len(), 1);
    assert_eq!(result[0].target, button);
    assert_eq!(result[0].consumed_by, Some(button));
    assert_eq!(
        *log.borrow(),
        vec![Seen::Mouse(
            "button",
            MouseEventKind::Down,
            Point::new(2, 0),
            Point::new(15, 9)
        )]
    );

    let tree = desktop.tree();
    assert_eq!(tree.active_child(win).unwrap(), Some(editor));
    assert_eq!(tree.active_child(editor).unwrap(), Some(button));
}

#[test]
fn test_ignored_click_bubbles_in_each_widgets_coordinates() {
    let log = Log::default();
    let (mut desktop, [win, editor, _]) = editor_desktop(&log);

    // Inside the editor but not the button
    let result = desktop
        .handle_event(MouseEvent::down(30, 20, MouseButtons::LEFT).into())
        .unwrap()
        .unwrap();

    assert_eq!(result.target, editor);
    assert_eq!(result.consumed_by, None);
    assert_eq!(
        *log.borrow(),
        vec![
            Seen::Mouse("editor", MouseEventKind::Down, Point::new(19, 14), Point::new(30, 20)),
            Seen::Mouse("window", MouseEventKind::Down, Point::new(20, 15), Point::new(30, 20)),
        ]
    );
    assert_eq!(desktop.active_window(), Some(win));
}

#[test]
fn test_double_click_follows_press() {
    let log = Log::default();
    let (mut desktop, _) = editor_desktop(&log);
    let start = Instant::now();

    let mut inputs = Vec::new();
    for offset in [0, 100] {
        let event = ct_mouse(CtMouseEventKind::Down(MouseButton::Left), 15, 9);
        inputs.extend(
            desktop
                .decoder_mut()
                .decode_at(event, start + Duration::from_millis(offset)),
        );
    }
    for input in inputs {
        desktop.handle_event(input).unwrap();
    }

    let kinds: Vec<_> = log
        .borrow()
        .iter()
        .filter_map(|seen| match seen {
            Seen::Mouse(_, kind, _, _) => Some(*kind),
            _ => None,
        })
        .collect();
    assert_eq!(
        kinds,
        vec![MouseEventKind::Down, MouseEventKind::Down, MouseEventKind::DoubleClick]
    );
}

#[test]
fn test_keypress_follows_click_focus() {
    let log = Log::default();
    let (mut desktop, [_, _, button]) = editor_desktop(&log);

    desktop
        .handle_event(MouseEvent::down(15, 9, MouseButtons::LEFT).into())
        .unwrap();
    log.borrow_mut().clear();

    let key = CtEvent::Key(CtKeyEvent::new(KeyCode::Char('s'), KeyModifiers::CONTROL));
    let result = desktop.handle_crossterm(key).unwrap();

    assert_eq!(result[0].consumed_by, Some(button));
    assert_eq!(*log.borrow(), vec![Seen::Key("button", Key::Char('s'))]);
}

#[test]
fn test_resize_window_shrinks_editor_by_border() {
    let log = Log::default();
    let (mut desktop, [win, editor, button]) = editor_desktop(&log);

    desktop.resize_window(win, 60, 30).unwrap();

    let tree = desktop.tree();
    assert_eq!(tree.bounds(win).unwrap(), Rect::new(10, 5, 60, 30));
    assert_eq!(tree.bounds(editor).unwrap(), Rect::new(1, 1, 58, 28));
    assert_eq!(tree.bounds(button).unwrap(), Rect::new(2, 3, 6, 1));
    assert_eq!(
        *log.borrow(),
        vec![
            Seen::Resize("window", ResizeKind::Widget, 60, 30),
            Seen::Resize("editor", ResizeKind::Widget, 58, 28),
        ]
    );
}

#[test]
fn test_terminal_resize_reaches_every_widget() {
    let log = Log::default();
    let (mut desktop, _) = editor_desktop(&log);
    desktop.add_window(
        Window::new("Other"),
        Probe::new("other", false, &log),
        Rect::new(0, 0, 5, 5),
    );

    desktop.handle_crossterm(CtEvent::Resize(132, 43)).unwrap();

    assert_eq!(desktop.screen(), Rect::new(0, 0, 132, 43));
    let names: Vec<_> = log
        .borrow()
        .iter()
        .map(|seen| match seen {
            Seen::Resize(name, ResizeKind::Screen, 132, 43) => *name,
            other => panic!("unexpected {other:?}"),
        })
        .collect();
    assert_eq!(names, vec!["other", "window", "editor", "button"]);
}

#[test]
fn test_modal_dialog_blocks_windows_behind_it() {
    let log = Log::default();
    let (mut desktop, [win, ..]) = editor_desktop(&log);
    let dialog = desktop.add_window(
        Window::new("Save?").with_flags(WindowFlags::MODAL | WindowFlags::CENTERED),
        Probe::new("dialog", true, &log),
        Rect::new(0, 0, 30, 8),
    );
    assert_eq!(desktop.tree().bounds(dialog).unwrap(), Rect::new(35, 16, 30, 8));

    // Editor button lies outside the dialog
    assert_eq!(
        desktop
            .handle_event(MouseEvent::down(15, 9, MouseButtons::LEFT).into())
            .unwrap(),
        None
    );
    assert!(log.borrow().is_empty());
    assert_eq!(desktop.active_window(), Some(dialog));

    desktop.close_window(dialog).unwrap();
    assert_eq!(desktop.active_window(), Some(win));
    assert!(!desktop.tree().contains(dialog));
}
