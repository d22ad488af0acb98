pub mod dispatch;
pub mod features;
pub mod pairs;
pub mod resolve;
pub mod schema;
pub mod train;
