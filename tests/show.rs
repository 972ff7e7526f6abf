//! Headless `show` rendering from a saved response

use structview::cli::{run_show, OutputFormat, ShowArgs};
use structview::config::Config;
use structview::structure::StructureType;

fn saved_response(name: &str, body: &str) -> std::path::PathBuf {
    let path = std::env::temp_dir().join(format!("structview-{}-{}.json", name, std::process::id()));
    std::fs::write(&path, body).unwrap();
    path
}

fn args(file: std::path::PathBuf, format: OutputFormat) -> ShowArgs {
    ShowArgs {
        structure_type: StructureType::Footer,
        name: None,
        file: Some(file),
        format,
        select: None,
        collapsed: false,
    }
}

#[tokio::test]
async fn test_show_envelope_file_as_html() {
    let path = saved_response(
        "envelope",
        r#"{"status":"ok","code":200,"data":{"structure":[
            {"tag":"footer","children":[{"text":"<script>alert(1)</script>"}]}
        ]}}"#,
    );

    let html = run_show(&args(path.clone(), OutputFormat::Html), &Config::default())
        .await
        .unwrap();
    std::fs::remove_file(path).ok();

    assert!(html.contains("<h2 class=\"structure-title\">Structure: footer</h2>"));
    assert!(html.contains("&lt;script&gt;"));
    assert!(!html.contains("<script>"));
}

#[tokio::test]
async fn test_show_bare_file_as_text() {
    let path = saved_response("bare", r#"{"component":"SiteFooter"}"#);

    let text = run_show(&args(path.clone(), OutputFormat::Text), &Config::default())
        .await
        .unwrap();
    std::fs::remove_file(path).ok();

    assert_eq!(text, "Structure: footer\n\n<SiteFooter/>[0]\n");
}

#[tokio::test]
async fn test_show_missing_file_is_an_error() {
    let missing = std::env::temp_dir().join("structview-does-not-exist.json");
    let err = run_show(&args(missing, OutputFormat::Json), &Config::default())
        .await
        .unwrap_err();
    assert!(err.to_string().starts_with("Failed to read"));
}
