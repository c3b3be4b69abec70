use crate::api::{RecordsApi, SearchHits};
use crate::types::{Category, FetchOutcome, ListRow, SearchSection};
use anyhow::Result;
use std::sync::{mpsc, Arc};
use std::thread;

/// A single view-controller operation to run against the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchRequest {
    Summary,
    CategoryPage { category: Category, page: String },
    /// Query must already be normalized.
    Search { query: String },
    OwnerDetail { owner_id: u64 },
}

/// Run one request in the background and report on the channel.
/// Nothing is cancelled or de-duplicated; the last outcome to arrive
/// wins the view.
pub fn spawn_fetch(
    api: Arc<dyn RecordsApi>,
    request: FetchRequest,
    tx: mpsc::Sender<FetchOutcome>,
) {
    thread::spawn(move || {
        let outcome = perform(api.as_ref(), &request);
        let _ = tx.send(outcome);
    });
}

/// Run one request to completion. Errors are folded into the outcome;
/// callers never see a `Result`.
pub fn perform(api: &dyn RecordsApi, request: &FetchRequest) -> FetchOutcome {
    match run(api, request) {
        Ok(outcome) => outcome,
        Err(e) => FetchOutcome::Failed(truncate_error(&format!("{e:#}"))),
    }
}

fn run(api: &dyn RecordsApi, request: &FetchRequest) -> Result<FetchOutcome> {
    match request {
        FetchRequest::Summary => Ok(FetchOutcome::SummaryLoaded(api.top_owners()?)),
        FetchRequest::CategoryPage { category, page } => {
            let (rows, nav) = match category {
                Category::Owners => {
                    let (owners, nav) = api.owners_page(page)?;
                    (owners.iter().map(ListRow::owner).collect(), nav)
                }
                Category::Properties => {
                    let (properties, nav) = api.properties_page(page)?;
                    (properties.iter().map(ListRow::property).collect(), nav)
                }
                Category::Companies => {
                    let (companies, nav) = api.companies_page(page)?;
                    (companies.iter().map(ListRow::company).collect(), nav)
                }
            };
            Ok(FetchOutcome::PageLoaded {
                category: *category,
                page: page.clone(),
                rows,
                nav,
            })
        }
        FetchRequest::Search { query } => {
            let hits = api.search(query)?;
            Ok(FetchOutcome::SearchLoaded(sections_from(&hits)))
        }
        FetchRequest::OwnerDetail { owner_id } => {
            Ok(FetchOutcome::DetailLoaded(api.owner_detail(*owner_id)?))
        }
    }
}

/// Project search hits into titled sections, keeping only the
/// categories that returned records.
pub fn sections_from(hits: &SearchHits) -> Vec<SearchSection> {
    let mut sections = Vec::new();
    if !hits.owners.is_empty() {
        sections.push(SearchSection {
            category: Category::Owners,
            rows: hits.owners.iter().map(ListRow::owner).collect(),
        });
    }
    if !hits.properties.is_empty() {
        sections.push(SearchSection {
            category: Category::Properties,
            rows: hits.properties.iter().map(ListRow::property).collect(),
        });
    }
    if !hits.companies.is_empty() {
        sections.push(SearchSection {
            category: Category::Companies,
            rows: hits.companies.iter().map(ListRow::company).collect(),
        });
    }
    sections
}

/// Truncate an error message for display on the status line.
pub fn truncate_error(err: &str) -> String {
    let cleaned = err.trim().lines().next().unwrap_or(err);
    if cleaned.chars().count() > 60 {
        let head: String = cleaned.chars().take(57).collect();
        format!("{head}...")
    } else {
        cleaned.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Owner, OwnerDetail, OwnerSummary, PageNav, Property};
    use anyhow::bail;

    /// Canned backend: serves one owner everywhere, or fails everything.
    struct FakeApi {
        fail: bool,
    }

    impl RecordsApi for FakeApi {
        fn top_owners(&self) -> Result<Vec<OwnerSummary>> {
            if self.fail {
                bail!("connection refused");
            }
            Ok(vec![OwnerSummary {
                id: 1,
                full_name: "SMITH JOHN".to_string(),
                property_count: 4,
            }])
        }

        fn owners_page(&self, _page: &str) -> Result<(Vec<Owner>, PageNav)> {
            if self.fail {
                bail!("connection refused");
            }
            Ok((
                vec![Owner {
                    id: 1,
                    full_name: "SMITH JOHN".to_string(),
                }],
                PageNav {
                    prev_page: None,
                    next_page: Some("2".to_string()),
                },
            ))
        }

        fn properties_page(&self, _page: &str) -> Result<(Vec<Property>, PageNav)> {
            bail!("not used");
        }

        fn companies_page(&self, _page: &str) -> Result<(Vec<crate::types::Company>, PageNav)> {
            bail!("not used");
        }

        fn owner_detail(&self, owner_id: u64) -> Result<OwnerDetail> {
            if self.fail {
                bail!("connection refused");
            }
            Ok(OwnerDetail {
                id: owner_id,
                full_name: "SMITH JOHN".to_string(),
                address: "PO BOX 1".to_string(),
                property_count: Some(4),
                llc_name: None,
                properties: vec!["1 ELM ST".to_string()],
            })
        }

        fn search(&self, query: &str) -> Result<SearchHits> {
            if self.fail {
                bail!("connection refused");
            }
            let mut hits = SearchHits::default();
            if query.contains("SMITH") {
                hits.owners.push(Owner {
                    id: 1,
                    full_name: "SMITH JOHN".to_string(),
                });
            }
            Ok(hits)
        }
    }

    #[test]
    fn errors_fold_into_failed_outcome() {
        let api = FakeApi { fail: true };
        let outcome = perform(&api, &FetchRequest::Summary);
        match outcome {
            FetchOutcome::Failed(msg) => assert!(msg.contains("connection refused")),
            other => panic!("expected Failed, got {other:?}"),
        }
    }

    #[test]
    fn page_request_carries_nav_and_rows() {
        let api = FakeApi { fail: false };
        let request = FetchRequest::CategoryPage {
            category: Category::Owners,
            page: "1".to_string(),
        };
        match perform(&api, &request) {
            FetchOutcome::PageLoaded {
                category,
                page,
                rows,
                nav,
            } => {
                assert_eq!(category, Category::Owners);
                assert_eq!(page, "1");
                assert_eq!(rows[0].label, "SMITH JOHN");
                assert_eq!(nav.next_page.as_deref(), Some("2"));
                assert_eq!(nav.prev_page, None);
            }
            other => panic!("expected PageLoaded, got {other:?}"),
        }
    }

    #[test]
    fn search_sections_skip_empty_categories() {
        let api = FakeApi { fail: false };
        let request = FetchRequest::Search {
            query: "SMITH".to_string(),
        };
        match perform(&api, &request) {
            FetchOutcome::SearchLoaded(sections) => {
                assert_eq!(sections.len(), 1);
                assert_eq!(sections[0].category, Category::Owners);
            }
            other => panic!("expected SearchLoaded, got {other:?}"),
        }

        let request = FetchRequest::Search {
            query: "ZZZ".to_string(),
        };
        match perform(&api, &request) {
            FetchOutcome::SearchLoaded(sections) => assert!(sections.is_empty()),
            other => panic!("expected SearchLoaded, got {other:?}"),
        }
    }

    #[test]
    fn truncates_long_errors_to_one_line() {
        let long = "x".repeat(100);
        assert_eq!(truncate_error(&long).chars().count(), 60);
        assert_eq!(truncate_error("first\nsecond"), "first");
    }
}
