use clap::{Arg, ArgAction, arg};
use url::Url;

pub const CLAP_STYLING: clap::builder::styling::Styles = clap::builder::styling::Styles::styled()
    .header(clap_cargo::style::HEADER)
    .usage(clap_cargo::style::USAGE)
    .literal(clap_cargo::style::LITERAL)
    .placeholder(clap_cargo::style::PLACEHOLDER)
    .error(clap_cargo::style::ERROR)
    .valid(clap_cargo::style::VALID)
    .invalid(clap_cargo::style::INVALID);

pub fn command_argument_builder() -> clap::Command {
    clap::Command::new("page-loader")
        .version(env!("CARGO_PKG_VERSION"))
        .bin_name("page-loader")
        .about("Downloads a web page and its local resources for offline viewing")
        .styles(CLAP_STYLING)
        .arg(
            Arg::new("url")
                .value_name("URL")
                .required(true)
                .help("The page to download")
                .value_parser(clap::value_parser!(Url)),
        )
        .arg(
            arg!(-o --"output" <DIR>)
                .required(false)
                .help("Directory to save the page into (default: current directory)")
                .default_value("."),
        )
        .arg(
            arg!(-t --"timeout" <SECONDS>)
                .required(false)
                .help("Request timeout in seconds")
                .value_parser(clap::value_parser!(u64))
                .default_value("10"),
        )
        .arg(
            arg!(-c --"concurrency" <NUM>)
                .required(false)
                .help("Maximum number of resources downloaded at the same time (default: all)")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            arg!(-f --"format" <FORMAT>)
                .required(false)
                .help("Summary format: text, json")
                .value_parser(["text", "json"])
                .default_value("text"),
        )
        .arg(
            arg!(-q --"quiet" "Only print the path of the saved page")
                .required(false)
                .action(ArgAction::SetTrue),
        )
        .arg(
            arg!(-v --"verbose" "Enable debug logging")
                .required(false)
                .action(ArgAction::SetTrue),
        )
}
