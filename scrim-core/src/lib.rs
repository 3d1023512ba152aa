pub mod geometry;
pub mod input;

pub use geometry::{Point, Rect};
pub use input::{InputMessage, Key, MessageKind};
