pub mod options;
pub mod portfolio;
