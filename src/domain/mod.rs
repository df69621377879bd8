pub mod models;
pub mod scan_results;
pub mod session;
pub mod settings;
