pub mod commands;
pub mod handlers;

// Re-export commonly used handler functions for convenience
pub use handlers::{
    handle_load, init_tracing, load_options_from_matches, page_request_from_matches,
    report_format_from_matches, resolve_output_dir,
};

pub use page_loader_core::load::{LoadOptions, LoadReport, PageRequest, load_page};
