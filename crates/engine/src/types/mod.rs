//! Type system for Ick operations

pub mod operation;
pub mod response;

pub use operation::IckOperation;
pub use response::IckResponse;
