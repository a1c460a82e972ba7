mod central_panel;
mod tools_panel;

pub use central_panel::{central_panel, fit_rect};
pub use tools_panel::tools_panel;
