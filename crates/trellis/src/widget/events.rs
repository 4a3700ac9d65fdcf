//! Input event types.
//!
//! These mirror the discrete events the windowing library produces: mouse
//! move/press/release, key press/release, text entry and wheel movement.
//! Positions are in the coordinate space of the container whose dispatcher
//! is handling the event; container widgets translate positions before
//! forwarding into their subtree.

use trellis_core::Point;

/// Mouse buttons reported by the windowing library.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Keyboard keys the toolkit routes.
///
/// The dispatcher only forwards a fixed allow-list of keys to widgets
/// (arrows, backspace, delete, space, return); everything else is dropped
/// at the routing layer. `Unknown` stands for any key the windowing library
/// could not identify.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Left,
    Right,
    Up,
    Down,
    Backspace,
    Delete,
    Space,
    Return,
    Tab,
    Escape,
    Unknown,
}

impl Key {
    /// Whether the dispatcher forwards this key to the focused widget.
    pub(crate) fn is_routed(self) -> bool {
        matches!(
            self,
            Self::Left
                | Self::Right
                | Self::Up
                | Self::Down
                | Self::Backspace
                | Self::Delete
                | Self::Space
                | Self::Return
        )
    }
}

/// The mouse moved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseMoveEvent {
    /// Pointer position.
    pub pos: Point,
}

impl MouseMoveEvent {
    /// The same event with its position translated by `-offset`.
    pub(crate) fn translated(&self, offset: Point) -> Self {
        Self {
            pos: self.pos - offset,
        }
    }
}

/// A mouse button was pressed or released.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseButtonEvent {
    /// Which button changed state.
    pub button: MouseButton,
    /// Pointer position at the time of the change.
    pub pos: Point,
}

impl MouseButtonEvent {
    pub(crate) fn translated(&self, offset: Point) -> Self {
        Self {
            button: self.button,
            pos: self.pos - offset,
        }
    }
}

/// A key was pressed or released.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    /// The key that changed state.
    pub key: Key,
}

/// A unicode code point was entered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextEvent {
    /// The entered character.
    pub unicode: char,
}

/// The mouse wheel moved.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MouseWheelEvent {
    /// Scroll amount; positive is away from the user.
    pub delta: f32,
    /// Pointer position at the time of the scroll.
    pub pos: Point,
}

impl MouseWheelEvent {
    pub(crate) fn translated(&self, offset: Point) -> Self {
        Self {
            delta: self.delta,
            pos: self.pos - offset,
        }
    }
}

/// A raw input event from the windowing library.
///
/// [`Gui::handle_event`](crate::Gui::handle_event) consumes this stream,
/// maps positions through the active view, and routes the result into the
/// root dispatcher.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    MouseMoved(MouseMoveEvent),
    MouseButtonPressed(MouseButtonEvent),
    MouseButtonReleased(MouseButtonEvent),
    KeyPressed(KeyEvent),
    KeyReleased(KeyEvent),
    TextEntered(TextEvent),
    MouseWheelMoved(MouseWheelEvent),
}
