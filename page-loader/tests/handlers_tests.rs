use page_loader::commands::command_argument_builder;
use page_loader::handlers::*;
use page_loader_core::report::ReportFormat;
use std::path::PathBuf;
use tempfile::TempDir;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path},
};

fn matches(args: &[&str]) -> clap::ArgMatches {
    let mut argv = vec!["page-loader"];
    argv.extend_from_slice(args);
    command_argument_builder().try_get_matches_from(argv).unwrap()
}

#[test]
fn test_url_is_required() {
    let result = command_argument_builder().try_get_matches_from(["page-loader"]);
    assert!(result.is_err());
}

#[test]
fn test_invalid_url_is_rejected() {
    let result = command_argument_builder().try_get_matches_from(["page-loader", "not a url"]);
    assert!(result.is_err());
}

#[test]
fn test_defaults() {
    let m = matches(&["https://example.com/courses"]);

    let request = page_request_from_matches(&m).unwrap();
    assert_eq!(request.source_url.as_str(), "https://example.com/courses");
    assert_eq!(request.output_dir, PathBuf::from("."));

    let options = load_options_from_matches(&m);
    assert_eq!(options.timeout_secs, 10);
    assert_eq!(options.max_concurrency, None);
    assert!(options.show_progress_bars);

    assert_eq!(report_format_from_matches(&m), ReportFormat::Text);
}

#[test]
fn test_options() {
    let m = matches(&[
        "-o", "/tmp/pages", "-t", "3", "-c", "4", "-f", "json", "--quiet",
        "https://example.com",
    ]);

    let request = page_request_from_matches(&m).unwrap();
    assert_eq!(request.output_dir, PathBuf::from("/tmp/pages"));

    let options = load_options_from_matches(&m);
    assert_eq!(options.timeout_secs, 3);
    assert_eq!(options.max_concurrency, Some(4));
    assert!(!options.show_progress_bars);

    assert_eq!(report_format_from_matches(&m), ReportFormat::Json);
}

#[test]
fn test_unknown_format_is_rejected() {
    let result = command_argument_builder()
        .try_get_matches_from(["page-loader", "-f", "csv", "https://example.com"]);
    assert!(result.is_err());
}

#[test]
fn test_resolve_output_dir_plain_path() {
    assert_eq!(resolve_output_dir("/var/tmp"), PathBuf::from("/var/tmp"));
    assert_eq!(resolve_output_dir("."), PathBuf::from("."));
}

#[test]
fn test_resolve_output_dir_expands_tilde() {
    let resolved = resolve_output_dir("~/pages");
    assert!(!resolved.to_string_lossy().starts_with('~'));
    assert!(resolved.ends_with("pages"));
}

#[tokio::test]
async fn test_handle_load_saves_page() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/courses"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body>hello</body></html>"))
        .mount(&mock_server)
        .await;
    let output = TempDir::new().unwrap();
    let url = format!("{}/courses", mock_server.uri());

    let m = matches(&["-q", "-o", output.path().to_str().unwrap(), &url]);
    let page_path = handle_load(&m).await.unwrap();

    assert!(page_path.is_absolute());
    let expected = format!("127-0-0-1:{}-courses.html", mock_server.address().port());
    assert!(page_path.ends_with(expected));
    assert!(std::fs::read_to_string(page_path).unwrap().contains("hello"));
}

#[tokio::test]
async fn test_handle_load_reports_missing_output_dir() {
    let mock_server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/courses"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html></html>"))
        .mount(&mock_server)
        .await;
    let output = TempDir::new().unwrap();
    let missing = output.path().join("missing");
    let url = format!("{}/courses", mock_server.uri());

    let m = matches(&["-q", "-o", missing.to_str().unwrap(), &url]);
    let err = handle_load(&m).await.unwrap_err();

    assert!(format!("{:#}", err).contains("Failed to download"));
}
