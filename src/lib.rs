pub mod clipboard;
pub mod config;
pub mod consts;
pub mod error;
pub mod floating;
pub mod geometry;
pub mod keycodes;
pub mod layouts;
pub mod modifiers;
pub mod session;
pub mod touch;
// cmd and reports belong to the binary (main.rs).
