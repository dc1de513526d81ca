pub mod load;
pub mod report;

pub use load::{LoadOptions, LoadProgressCallback, LoadReport, PageRequest, load_page};
pub use report::{ReportFormat, generate_json_report, generate_load_report};
