//! Concrete widget implementations.
//!
//! Each widget embeds a [`WidgetBase`](super::WidgetBase) and overrides
//! only the [`Widget`](super::Widget) hooks it needs; everything else comes
//! from the trait's clickable-widget defaults.

mod animated_picture;
mod button;
mod checkbox;
mod edit_box;
mod label;
mod panel;
mod picture;
mod slider;

pub use animated_picture::AnimatedPicture;
pub use button::Button;
pub use checkbox::Checkbox;
pub use edit_box::EditBox;
pub use label::Label;
pub use panel::Panel;
pub use picture::Picture;
pub use slider::Slider;
