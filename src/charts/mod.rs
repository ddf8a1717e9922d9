//! Charts module - scales, colours and the animated bar chart model

mod palette;
mod scale;
mod transition;
mod view;

pub use transition::BarGeometry;
pub use view::{ChartFrame, ChartView, SortMode, ViewState};
