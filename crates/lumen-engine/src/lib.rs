//! Lumen engine crate.
//!
//! Shading and color-management core of a small wgpu renderer:
//! - `shading`: CPU reference of every shader stage (color transforms,
//!   fullscreen quad, texture addressing, fragment stages)
//! - `render`: the matching WGSL passes, uniforms and binding contract
//! - `device`, `window`, `core`, `logging`, `time`: host plumbing used to run them

pub mod core;
pub mod device;
pub mod logging;
pub mod render;
pub mod shading;
pub mod time;
pub mod window;
