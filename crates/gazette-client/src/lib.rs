pub mod maintenance_check;
pub mod wordpress;

pub use maintenance_check::{CheckOutcome, MaintenanceProbe};
pub use wordpress::{WordPressClient, WordPressConfig};
