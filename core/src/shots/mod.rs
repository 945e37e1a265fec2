pub mod event;
pub mod export;
pub mod table;

#[cfg(test)]
pub(crate) mod fixtures;

pub use event::{ShotEvent, ShotResult, Situation};
pub use export::{detail_csv, DETAIL_FILE_NAME};
pub use table::ShotTable;
