pub mod import;
pub mod measure;
pub mod portfolio;
