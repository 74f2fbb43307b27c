//! Hoopla resource kinds.

mod connection;
mod metric;
mod metric_value;
mod newsflash;
mod newsflash_event;
mod team;
mod user;

pub use connection::Connection;
pub use metric::Metric;
pub use metric_value::{MetricValue, METRIC_NAME};
pub use newsflash::Newsflash;
pub use newsflash_event::NewsflashEvent;
pub use team::Team;
pub use user::User;
