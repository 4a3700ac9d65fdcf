//! Core systems for Trellis.
//!
//! This crate provides the foundational components of the Trellis widget
//! toolkit:
//!
//! - **Geometry**: `Point`, `Size`, `Rect` and `Color` vocabulary types
//! - **Widget Identity**: opaque, process-unique `WidgetId` handles
//! - **Signal/Slot System**: type-safe, synchronous callbacks delivered in
//!   registration order
//!
//! # Signal/Slot Example
//!
//! ```
//! use trellis_core::Signal;
//!
//! let value_changed = Signal::<i32>::new();
//!
//! let conn_id = value_changed.connect(|value| {
//!     println!("value changed to {value}");
//! });
//!
//! value_changed.emit(42);
//! value_changed.disconnect(conn_id);
//! ```

mod object;
mod signal;
mod types;

pub use object::WidgetId;
pub use signal::{ConnectionId, Signal};
pub use types::{Color, Point, Rect, Size};
