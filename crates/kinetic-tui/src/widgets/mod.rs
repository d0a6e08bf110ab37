mod page_indicator;
mod pager;
mod status_bar;

pub use page_indicator::PageIndicatorWidget;
pub use pager::{column_at, Column, PagerWidget};
pub use status_bar::StatusBarWidget;
