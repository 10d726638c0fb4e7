/// Full-view panels for diskviz.

pub mod chart_panel;
pub mod dashboard_panel;
