/// UI widgets for diskviz.

pub mod force_graph;
pub mod status_bar;
pub mod toolbar;
pub mod treemap;
