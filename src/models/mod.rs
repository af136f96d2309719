pub mod exercise;
pub mod history;
pub mod meal;
pub mod preference;
pub mod program;
pub mod session;
pub mod student;
pub mod supplement;
pub mod support;
pub mod trainer;
