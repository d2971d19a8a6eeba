//! Terminal UI module using ratatui.
//!
//! This module provides the TUI rendering and input handling:
//!
//! - `render`: Frame layout, chrome and overlays
//! - `input`: Keyboard event handling
//! - `styles`: Color schemes and text styling
//! - `screens`: Per-screen content (login, tests, instructions, exam)

pub mod input;
pub mod render;
pub mod screens;
pub mod styles;
