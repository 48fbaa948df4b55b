pub mod schedule;

pub use schedule::{get_schedule_config, ScheduleConfig};
