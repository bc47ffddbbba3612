//! Ember UI: immediate-mode widgets painted through the engine's render queue.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use ember_ui::prelude::*;
//!
//! let hud = Panel::new()
//!     .background(Color::from_straight(0.1, 0.1, 0.15, 0.9))
//!     .border(1.0, Color::from_straight(0.3, 0.3, 0.35, 1.0))
//!     .padding(8.0)
//!     .child(Label::new("score: 120", font, 16.0, Color::white()));
//!
//! // Inside the frame callback:
//! let mut painter = Painter::new(queue, 10.0);
//! hud.paint(&mut painter, Rect::new(16.0, 16.0, 200.0, 40.0));
//! ```
//!
//! Every draw goes to `Source::Ui`, so the camera never applies.

pub mod painter;
pub mod widget;
pub mod widgets;

/// Everything needed to build and extend UI.
pub mod prelude {
    pub use crate::painter::{pass, Painter};
    pub use crate::widget::{Element, Widget};
    pub use crate::widgets::{ClipArea, Label, Panel, ProgressBar};

    pub use ember_engine::assets::{FontId, ShaderId, TextureId};
    pub use ember_engine::coords::{Rect, Vec2};
    pub use ember_engine::paint::Color;
}
