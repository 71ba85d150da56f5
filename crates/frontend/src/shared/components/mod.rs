pub mod filter_panel;
pub mod pagination_controls;
pub mod status_badge;
pub mod table;

pub use filter_panel::{FilterPanel, FilterTag};
pub use pagination_controls::PaginationControls;
pub use status_badge::StatusBadge;
