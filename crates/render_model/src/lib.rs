//! Render Model - Shared configuration for the format renderers
//!
//! Both renderers read every size, margin, gap and indent from the single
//! static [`RenderConfig`] table. Values are stored once, in points, and each
//! format derives its native unit through a fixed per-family factor (see
//! [`units`]), so the PDF and DOCX outputs describe the same physical page.

mod config;
mod conventions;
mod error;
pub mod units;

pub use config::*;
pub use conventions::*;
pub use error::*;
pub use units::{FontSize, Length, LineHeight};
