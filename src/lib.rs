pub mod boundary;
pub mod calendar;
pub mod catalog;
pub mod config;
pub mod display;
pub mod error;
pub mod logging;
pub mod pace;
pub mod planner;
pub mod resolver;
pub mod review;
pub mod state;
#[cfg(feature = "wasm")]
pub mod wasm;

pub use boundary::{is_chapter_end, is_section_end, Boundary};
pub use calendar::{CalendarGate, HolidayCalendar, NoHolidays, ScheduleKind};
pub use catalog::{mishnah, Catalog, ChapterSizes, Order, Section};
pub use error::{PathError, Result};
pub use pace::{DayAdvance, PaceKind, PacePolicy};
pub use planner::{plan_days, plan_horizon, PlanReport, StudyDay};
pub use resolver::{content_ref, resolve, GlobalPosition, ResolvedItem};
pub use review::{ReviewIntensity, ReviewItem, ReviewSchedule};
