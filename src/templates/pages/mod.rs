pub mod index;
pub mod lot;

pub use index::{index_page, IndexVm, LotRow};
pub use lot::{lot_page, LotVm};
