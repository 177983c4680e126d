// src/map/mod.rs
pub mod bubble;
pub mod grid;
pub mod swapchain;

pub use bubble::{flood, list_bubbles, Bubble};
pub use grid::Grid;
pub use swapchain::Swapchain;
