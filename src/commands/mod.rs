pub mod report;
pub mod repos;
