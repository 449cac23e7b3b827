pub mod gesture;
pub mod snapshot;

pub use gesture::{Classification, GestureLabel};
pub use snapshot::{DetectionSnapshot, TickTally};
