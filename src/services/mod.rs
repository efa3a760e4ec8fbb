pub mod export;
pub mod hierarchy;
pub mod report;
