#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::HashMap;
use std::path::Path;
use std::rc::Rc;

use helpcenter_engine::{FailureKind, FetchError, HelpCenterClient, PageSource};
use serde_json::{json, Value};
use url::Url;

pub const BASE: &str = "https://acme.zendesk.com/";
pub const LOCALE: &str = "en-us";

/// In-memory help center keyed by request path. Every list fits in one page.
#[derive(Default)]
pub struct Fixture {
    pages: HashMap<String, Value>,
    failures: HashMap<String, FailureKind>,
}

pub type RequestLog = Rc<RefCell<Vec<String>>>;

struct FixtureSource {
    pages: HashMap<String, Value>,
    failures: HashMap<String, FailureKind>,
    requests: RequestLog,
}

impl PageSource for FixtureSource {
    fn get_page(&self, url: &Url) -> Result<Value, FetchError> {
        let path = url.path().to_string();
        self.requests.borrow_mut().push(path.clone());
        if let Some(kind) = self.failures.get(&path) {
            return Err(FetchError::new(kind.clone(), url.as_str(), "fixture failure"));
        }
        self.pages
            .get(&path)
            .cloned()
            .ok_or_else(|| FetchError::new(FailureKind::HttpStatus(404), url.as_str(), "not found"))
    }
}

pub fn categories_path() -> String {
    format!("/api/v2/help_center/{LOCALE}/categories.json")
}

pub fn sections_path(category_id: u64) -> String {
    format!("/api/v2/help_center/{LOCALE}/categories/{category_id}/sections.json")
}

pub fn articles_path(section_id: u64) -> String {
    format!("/api/v2/help_center/{LOCALE}/sections/{section_id}/articles.json")
}

impl Fixture {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn categories(mut self, items: Vec<Value>) -> Self {
        self.pages.insert(
            categories_path(),
            json!({ "categories": items, "next_page": null }),
        );
        self
    }

    pub fn sections(mut self, category_id: u64, items: Vec<Value>) -> Self {
        self.pages.insert(
            sections_path(category_id),
            json!({ "sections": items, "next_page": null }),
        );
        self
    }

    pub fn articles(mut self, section_id: u64, items: Vec<Value>) -> Self {
        self.pages.insert(
            articles_path(section_id),
            json!({ "articles": items, "next_page": null }),
        );
        self
    }

    pub fn fail(mut self, path: String, kind: FailureKind) -> Self {
        self.failures.insert(path, kind);
        self
    }

    pub fn client(self) -> (HelpCenterClient, RequestLog) {
        let requests: RequestLog = Rc::new(RefCell::new(Vec::new()));
        let source = FixtureSource {
            pages: self.pages,
            failures: self.failures,
            requests: requests.clone(),
        };
        let client = HelpCenterClient::new(source, Url::parse(BASE).unwrap(), LOCALE);
        (client, requests)
    }
}

pub fn category(id: u64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "locale": LOCALE,
        "html_url": format!("https://acme.zendesk.com/hc/en-us/categories/{id}")
    })
}

pub fn section(id: u64, category_id: u64, name: &str) -> Value {
    json!({
        "id": id,
        "name": name,
        "category_id": category_id,
        "locale": LOCALE,
        "html_url": format!("https://acme.zendesk.com/hc/en-us/sections/{id}")
    })
}

pub fn article(id: u64, section_id: u64, title: &str, body: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "body": body,
        "section_id": section_id,
        "locale": LOCALE,
        "label_names": [],
        "html_url": format!("https://acme.zendesk.com/hc/en-us/articles/{id}"),
        "created_at": "2024-01-02T03:04:05Z",
        "updated_at": "2024-02-03T04:05:06Z"
    })
}

/// Relative paths (with `/`) of every file below `root`, sorted.
pub fn list_files(root: &Path) -> Vec<String> {
    let mut files: Vec<String> = walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|entry| entry.file_type().is_file())
        .map(|entry| {
            entry
                .path()
                .strip_prefix(root)
                .unwrap()
                .components()
                .map(|c| c.as_os_str().to_string_lossy().into_owned())
                .collect::<Vec<_>>()
                .join("/")
        })
        .collect();
    files.sort();
    files
}
