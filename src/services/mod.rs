pub mod exercises;
pub mod history;
pub mod meals;
pub mod metrics;
pub mod preferences;
pub mod programs;
pub mod sessions;
pub mod students;
pub mod supplements;
pub mod support;
pub mod tenant;
