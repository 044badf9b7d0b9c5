use std::collections::{HashSet, VecDeque};

use export_logging::{export_debug, export_warn};
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::fetch::PageSource;
use crate::{FailureKind, FetchError};

/// Lazy walk over a paginated list endpoint.
///
/// Items are read from the array under `key` on each page, and `next_page`
/// is followed until it is null or revisits a page. The first error is yielded once and ends
/// the sequence. A `Pages` cannot be rewound; build a new one to start over.
pub struct Pages<'a, T> {
    source: &'a dyn PageSource,
    key: &'static str,
    next: Option<Result<Url, FetchError>>,
    buffered: VecDeque<T>,
    visited: HashSet<Url>,
    pages_read: usize,
}

impl<'a, T: DeserializeOwned> Pages<'a, T> {
    pub fn new(source: &'a dyn PageSource, key: &'static str, first: Result<Url, FetchError>) -> Self {
        Self {
            source,
            key,
            next: Some(first),
            buffered: VecDeque::new(),
            visited: HashSet::new(),
            pages_read: 0,
        }
    }

    pub fn pages_read(&self) -> usize {
        self.pages_read
    }

    fn load(&mut self, url: Url) -> Result<(), FetchError> {
        let mut page = self.source.get_page(&url)?;
        self.pages_read += 1;
        self.visited.insert(url.clone());

        match page.get_mut(self.key).map(Value::take) {
            Some(items) => {
                let items: Vec<T> = serde_json::from_value(items).map_err(|err| {
                    FetchError::new(FailureKind::InvalidBody, url.as_str(), err.to_string())
                })?;
                export_debug!("Fetched {} {} from {}", items.len(), self.key, url);
                self.buffered.extend(items);
            }
            None => {
                export_warn!("No '{}' list in response from {}", self.key, url);
            }
        }

        self.next = match page.get("next_page").and_then(Value::as_str) {
            None => None,
            Some(raw) => match Url::parse(raw) {
                Ok(next) if self.visited.contains(&next) => {
                    export_warn!("next_page of {} revisits {}, stopping", url, next);
                    None
                }
                Ok(next) => Some(Ok(next)),
                Err(err) => Some(Err(FetchError::new(
                    FailureKind::InvalidUrl,
                    raw,
                    err.to_string(),
                ))),
            },
        };
        Ok(())
    }
}

impl<T: DeserializeOwned> Iterator for Pages<'_, T> {
    type Item = Result<T, FetchError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.buffered.pop_front() {
                return Some(Ok(item));
            }
            match self.next.take()? {
                Ok(url) => {
                    if let Err(err) = self.load(url) {
                        self.next = None;
                        return Some(Err(err));
                    }
                }
                Err(err) => return Some(Err(err)),
            }
        }
    }
}
