use colored::Colorize;
use page_loader::commands::command_argument_builder;
use page_loader::{handle_load, init_tracing};

#[tokio::main]
async fn main() {
    let matches = command_argument_builder().get_matches();
    init_tracing(matches.get_flag("verbose"));

    if let Err(e) = handle_load(&matches).await {
        eprintln!("{} {:#}", "✗ Error:".red().bold(), e);
        std::process::exit(1);
    }
}
