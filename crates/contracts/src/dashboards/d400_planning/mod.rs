pub mod dto;

pub use dto::{MonthLabels, PlanningBuckets, PlanningRow};
