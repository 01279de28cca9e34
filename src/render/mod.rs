//! Renderers turning a [`crate::views::Screen`] into output.

pub mod html;
pub mod text;
