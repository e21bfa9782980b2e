pub mod category;
pub mod lot;
pub mod status;
pub mod timeline;

pub use category::ApplicationCategory;
pub use lot::{aggregate_lots, lot_number_of, search_lots, AggregationPolicy, Lot};
pub use status::{derive_lot_status, LotStatus};
pub use timeline::{permit_timeline, StepState, TimelineStep};
