/// diskviz GUI — egui-based desktop frontend.
///
/// This crate contains all UI code. Layout engines and analysis live in
/// `diskviz-core`.
pub mod app;
pub mod panels;
pub mod state;
pub mod theme;
pub mod widgets;

pub use app::{DiskVizApp, DiskVizState};
