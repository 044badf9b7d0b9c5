use std::fs;

use helpcenter_core::{Article, ExportRecord, ExportStatus};
use helpcenter_engine::{
    build_article_document, ensure_output_dir, render_run_log, write_article, write_file_atomic,
    write_run_log, AtomicFileWriter, Converter, Html2MdConverter, MISSING_URL,
};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn sample_article() -> Article {
    Article {
        id: 42,
        title: "Reset your password".into(),
        body: Some("<p>Hello</p>".into()),
        section_id: 7,
        locale: "en-us".into(),
        label_names: vec!["account".into(), "login".into()],
        html_url: Some("https://acme.zendesk.com/hc/en-us/articles/42".into()),
        created_at: Some("2024-01-02T03:04:05Z".into()),
        updated_at: Some("2024-02-03T04:05:06Z".into()),
        draft: false,
    }
}

#[test]
fn converter_keeps_headings_and_emphasis() {
    let markdown = Html2MdConverter
        .to_markdown("<h1>Title</h1><p>Hello <strong>world</strong></p>")
        .unwrap();
    assert!(markdown.contains("# Title"), "{markdown}");
    assert!(markdown.contains("**world**"), "{markdown}");
}

#[test]
fn converter_handles_lists_and_links() {
    let markdown = Html2MdConverter
        .to_markdown(r#"<ul><li>one</li><li>two</li></ul><p><a href="https://acme.test/x">docs</a></p>"#)
        .unwrap();
    assert!(markdown.contains("one"), "{markdown}");
    assert!(markdown.contains("two"), "{markdown}");
    assert!(markdown.contains("[docs](https://acme.test/x)"), "{markdown}");
}

#[test]
fn document_layout_is_frontmatter_title_body() {
    let doc = build_article_document(&sample_article(), "Accounts", "Login", "Hello\n").unwrap();

    assert!(doc.starts_with("---\ntitle: Reset your password\narticle_id: 42\n"), "{doc}");
    assert!(doc.contains("category: Accounts\nsection: Login\n"), "{doc}");
    assert!(doc.contains("tags:\n- account\n- login\n"), "{doc}");
    assert!(doc.ends_with("---\n\n# Reset your password\n\nHello\n"), "{doc}");
}

#[test]
fn missing_url_uses_placeholder() {
    let article = Article {
        html_url: None,
        ..sample_article()
    };
    let doc = build_article_document(&article, "Accounts", "Login", "").unwrap();
    assert!(doc.contains(&format!("source_url: {MISSING_URL}\n")), "{doc}");
    assert!(doc.ends_with("# Reset your password\n\n"), "{doc}");
}

#[test]
fn multiline_title_stays_on_one_heading_line() {
    let article = Article {
        title: "Reset your\npassword\t now ".into(),
        ..sample_article()
    };
    let doc = build_article_document(&article, "Accounts", "Login", "Hello").unwrap();
    assert!(doc.ends_with("---\n\n# Reset your password now\n\nHello\n"), "{doc}");

    let rest = doc.strip_prefix("---\n").unwrap();
    let (yaml, _) = rest.split_once("---\n\n").unwrap();
    let meta: serde_yaml::Value = serde_yaml::from_str(yaml).unwrap();
    assert_eq!(meta["title"].as_str(), Some("Reset your\npassword\t now "));
}

#[test]
fn write_article_creates_directories() {
    let temp = TempDir::new().unwrap();
    let dir = temp.path().join("Accounts").join("Login");

    let path = write_article(
        &dir,
        "Reset your password.md",
        &sample_article(),
        "Accounts",
        "Login",
        "Hello",
    )
    .unwrap();

    assert_eq!(path, dir.join("Reset your password.md"));
    let doc = fs::read_to_string(path).unwrap();
    assert!(doc.contains("# Reset your password\n\nHello\n"));
}

#[test]
fn run_log_has_header_even_when_empty() {
    let bytes = render_run_log(&[]).unwrap();
    assert_eq!(
        String::from_utf8(bytes).unwrap(),
        "Article ID,Title,Status,Category,Section,Path,Article URL,Detail\n"
    );
}

#[test]
fn run_log_quotes_fields_with_commas() {
    let records = vec![
        ExportRecord {
            article_id: 1,
            title: "Billing, invoices".into(),
            status: ExportStatus::Exported,
            category: "Billing".into(),
            section: "FAQ".into(),
            path: "Billing/FAQ/Billing, invoices.md".into(),
            source_url: "https://acme.zendesk.com/hc/en-us/articles/1".into(),
            detail: String::new(),
        },
        ExportRecord {
            article_id: 2,
            title: "Draft".into(),
            status: ExportStatus::Skipped,
            category: "Billing".into(),
            section: "FAQ".into(),
            path: String::new(),
            source_url: MISSING_URL.into(),
            detail: "no body".into(),
        },
    ];

    let temp = TempDir::new().unwrap();
    let path = write_run_log(temp.path(), "_log.csv", &records).unwrap();
    let text = fs::read_to_string(path).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    assert_eq!(
        lines[1],
        "1,\"Billing, invoices\",exported,Billing,FAQ,\"Billing/FAQ/Billing, invoices.md\",https://acme.zendesk.com/hc/en-us/articles/1,"
    );
    assert_eq!(lines[2], "2,Draft,skipped,Billing,FAQ,,URL_Not_Available,no body");
}

#[test]
fn creates_missing_output_dir() {
    let temp = TempDir::new().unwrap();
    let new_dir = temp.path().join("out").join("nested");
    assert!(!new_dir.exists());
    ensure_output_dir(&new_dir).unwrap();
    assert!(new_dir.is_dir());
}

#[test]
fn output_dir_that_is_a_file_is_rejected() {
    let temp = TempDir::new().unwrap();
    let file_path = temp.path().join("taken");
    fs::write(&file_path, "x").unwrap();
    assert!(ensure_output_dir(&file_path).is_err());
}

#[test]
fn atomic_write_replaces_existing() {
    let temp = TempDir::new().unwrap();
    let writer = AtomicFileWriter::new(temp.path().to_path_buf());

    let first = writer.write("doc.md", "hello").unwrap();
    assert_eq!(fs::read_to_string(&first).unwrap(), "hello");

    let second = writer.write("doc.md", "world").unwrap();
    assert_eq!(first, second);
    assert_eq!(fs::read_to_string(&second).unwrap(), "world");
    assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 1);
}

#[test]
fn write_file_atomic_creates_parent() {
    let temp = TempDir::new().unwrap();
    let target = temp.path().join("reports").join("structure.json");
    let written = write_file_atomic(&target, "{}\n").unwrap();
    assert_eq!(written, target);
    assert_eq!(fs::read_to_string(target).unwrap(), "{}\n");
}
