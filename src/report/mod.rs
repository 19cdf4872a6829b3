pub mod dashboard;
pub mod export;
pub mod terminal;
