pub mod client;
pub mod color_utils;
pub mod config;
pub mod layout;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod render;
pub mod storage;

#[cfg(feature = "tui")]
pub mod tui;
