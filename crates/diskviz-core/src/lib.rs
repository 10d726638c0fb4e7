/// DiskViz Core — data model, aggregation and layout engines.
///
/// This crate contains all transformation and layout logic with zero UI
/// dependencies. Every engine is a pure function of a scanned tree (plus a
/// canvas size), so the same code drives the GUI and the tests.
///
/// # Modules
///
/// - [`model`] — Recursive scan tree and size/label formatting.
/// - [`analysis`] — Per-extension aggregation, largest files, dashboard summary.
/// - [`treemap`] — Squarified nested treemap with focus navigation.
/// - [`graph`] — Top-N node-link graph and ancestry highlighting.
/// - [`force`] — Incremental force-directed simulator with drag and zoom.
/// - [`palette`] — Colour palettes and stable key → colour assignment.
/// - [`scan`] — Scan request/response boundary and snapshot loading.
/// - [`sample`] — Built-in demo tree.
pub mod analysis;
pub mod force;
pub mod graph;
pub mod model;
pub mod palette;
pub mod sample;
pub mod scan;
pub mod treemap;
