use crate::types::{Company, Owner, OwnerDetail, OwnerSummary, PageNav, Property};
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use serde::Deserialize;

// ============================================================
// WIRE TYPES
// ============================================================
// One envelope per endpoint, validated here before anything renders.

#[derive(Debug, Deserialize)]
struct SummaryEnvelope {
    owners: Vec<WireOwnerSummary>,
}

#[derive(Debug, Deserialize)]
struct WireOwnerSummary {
    id: u64,
    full_name: String,
    property_count: u64,
}

#[derive(Debug, Deserialize)]
struct OwnersPageEnvelope {
    owners: Vec<WireOwner>,
    page_nav: WirePageNav,
}

#[derive(Debug, Deserialize)]
struct PropertiesPageEnvelope {
    properties: Vec<WireProperty>,
    page_nav: WirePageNav,
}

#[derive(Debug, Deserialize)]
struct CompaniesPageEnvelope {
    companies: Vec<WireCompany>,
    page_nav: WirePageNav,
}

#[derive(Debug, Deserialize, Default)]
struct WirePageNav {
    prev_page: Option<String>,
    next_page: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireOwner {
    id: u64,
    full_name: String,
}

#[derive(Debug, Deserialize)]
struct WireProperty {
    id: u64,
    owner_id: u64,
    address: String,
}

#[derive(Debug, Deserialize)]
struct WireCompany {
    id: u64,
    owner_id: u64,
    llc_name: String,
}

#[derive(Debug, Deserialize)]
struct DetailEnvelope {
    owner: WireOwnerDetail,
}

#[derive(Debug, Deserialize)]
struct WireOwnerDetail {
    id: u64,
    full_name: String,
    address: String,
    property_count: Option<u64>,
    llc_name: Option<String>,
    properties: Option<Vec<WireOwnerProperty>>,
}

#[derive(Debug, Deserialize)]
struct WireOwnerProperty {
    address: String,
}

#[derive(Debug, Deserialize)]
struct SearchEnvelope {
    owners: Option<Vec<WireOwner>>,
    properties: Option<Vec<WireProperty>>,
    companies: Option<Vec<WireCompany>>,
}

impl From<WirePageNav> for PageNav {
    fn from(nav: WirePageNav) -> Self {
        Self {
            prev_page: nav.prev_page,
            next_page: nav.next_page,
        }
    }
}

impl From<WireOwner> for Owner {
    fn from(o: WireOwner) -> Self {
        Self {
            id: o.id,
            full_name: o.full_name,
        }
    }
}

impl From<WireProperty> for Property {
    fn from(p: WireProperty) -> Self {
        Self {
            id: p.id,
            owner_id: p.owner_id,
            address: p.address,
        }
    }
}

impl From<WireCompany> for Company {
    fn from(c: WireCompany) -> Self {
        Self {
            id: c.id,
            owner_id: c.owner_id,
            llc_name: c.llc_name,
        }
    }
}

impl From<WireOwnerDetail> for OwnerDetail {
    fn from(o: WireOwnerDetail) -> Self {
        Self {
            id: o.id,
            full_name: o.full_name,
            address: o.address,
            property_count: o.property_count,
            llc_name: o.llc_name,
            properties: o
                .properties
                .unwrap_or_default()
                .into_iter()
                .map(|p| p.address)
                .collect(),
        }
    }
}

// ============================================================
// API TRAIT
// ============================================================

/// Combined results from the cross-category search endpoint. Categories
/// the server omitted come back as empty lists.
#[derive(Debug, Default)]
pub struct SearchHits {
    pub owners: Vec<Owner>,
    pub properties: Vec<Property>,
    pub companies: Vec<Company>,
}

/// The records API consumed by every view. Kept as a trait so tests can
/// substitute a canned backend for the HTTP client.
pub trait RecordsApi: Send + Sync {
    /// Top owners by property count.
    fn top_owners(&self) -> Result<Vec<OwnerSummary>>;

    fn owners_page(&self, page: &str) -> Result<(Vec<Owner>, PageNav)>;

    fn properties_page(&self, page: &str) -> Result<(Vec<Property>, PageNav)>;

    fn companies_page(&self, page: &str) -> Result<(Vec<Company>, PageNav)>;

    fn owner_detail(&self, owner_id: u64) -> Result<OwnerDetail>;

    /// Cross-category search. The query must already be normalized.
    fn search(&self, query: &str) -> Result<SearchHits>;
}

/// Case-fold a raw search query the way the server indexes its columns.
/// URL encoding happens at request construction.
pub fn normalize_query(raw: &str) -> String {
    raw.trim().to_uppercase()
}

// ============================================================
// HTTP CLIENT
// ============================================================

pub struct HttpApi {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl HttpApi {
    pub fn new(base_url: &str) -> Self {
        Self {
            client: reqwest::blocking::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = format!("{}{path}", self.base_url);
        let response = self
            .client
            .get(&url)
            .send()
            .with_context(|| format!("GET {url} failed"))?
            .error_for_status()
            .with_context(|| format!("GET {url} returned an error status"))?;
        response
            .json()
            .with_context(|| format!("Failed to parse response from {url}"))
    }
}

impl RecordsApi for HttpApi {
    fn top_owners(&self) -> Result<Vec<OwnerSummary>> {
        let envelope: SummaryEnvelope = self.get_json("/api/owners/most")?;
        Ok(envelope
            .owners
            .into_iter()
            .map(|o| OwnerSummary {
                id: o.id,
                full_name: o.full_name,
                property_count: o.property_count,
            })
            .collect())
    }

    fn owners_page(&self, page: &str) -> Result<(Vec<Owner>, PageNav)> {
        let envelope: OwnersPageEnvelope = self.get_json(&format!("/api/owners/{page}"))?;
        Ok((
            envelope.owners.into_iter().map(Into::into).collect(),
            envelope.page_nav.into(),
        ))
    }

    fn properties_page(&self, page: &str) -> Result<(Vec<Property>, PageNav)> {
        let envelope: PropertiesPageEnvelope = self.get_json(&format!("/api/properties/{page}"))?;
        Ok((
            envelope.properties.into_iter().map(Into::into).collect(),
            envelope.page_nav.into(),
        ))
    }

    fn companies_page(&self, page: &str) -> Result<(Vec<Company>, PageNav)> {
        let envelope: CompaniesPageEnvelope = self.get_json(&format!("/api/companies/{page}"))?;
        Ok((
            envelope.companies.into_iter().map(Into::into).collect(),
            envelope.page_nav.into(),
        ))
    }

    fn owner_detail(&self, owner_id: u64) -> Result<OwnerDetail> {
        let envelope: DetailEnvelope = self.get_json(&format!("/api/owner/{owner_id}"))?;
        Ok(envelope.owner.into())
    }

    fn search(&self, query: &str) -> Result<SearchHits> {
        let url = format!("{}/api/search", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("query", query)])
            .send()
            .with_context(|| format!("GET {url} failed"))?
            .error_for_status()
            .with_context(|| format!("GET {url} returned an error status"))?;
        let envelope: SearchEnvelope = response
            .json()
            .with_context(|| format!("Failed to parse response from {url}"))?;
        Ok(SearchHits {
            owners: envelope
                .owners
                .unwrap_or_default()
                .into_iter()
                .map(Into::into)
                .collect(),
            properties: envelope
                .properties
                .unwrap_or_default()
                .into_iter()
                .map(Into::into)
                .collect(),
            companies: envelope
                .companies
                .unwrap_or_default()
                .into_iter()
                .map(Into::into)
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_summary_envelope() {
        let json = r#"{"owners": [
            {"id": 1, "full_name": "SMITH JOHN", "property_count": 12},
            {"id": 2, "full_name": "DOE JANE", "property_count": 9}
        ]}"#;
        let envelope: SummaryEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.owners.len(), 2);
        assert_eq!(envelope.owners[0].property_count, 12);
    }

    #[test]
    fn parses_page_nav_with_optional_tokens() {
        let json = r#"{"owners": [{"id": 3, "full_name": "ROE R"}],
                       "page_nav": {"next_page": "2"}}"#;
        let envelope: OwnersPageEnvelope = serde_json::from_str(json).unwrap();
        let nav: PageNav = envelope.page_nav.into();
        assert_eq!(nav.prev_page, None);
        assert_eq!(nav.next_page.as_deref(), Some("2"));

        let json = r#"{"owners": [], "page_nav": {}}"#;
        let envelope: OwnersPageEnvelope = serde_json::from_str(json).unwrap();
        let nav: PageNav = envelope.page_nav.into();
        assert_eq!(nav.prev_page, None);
        assert_eq!(nav.next_page, None);
    }

    #[test]
    fn rejects_property_without_linkage() {
        // owner_id is the canonical linkage field and is required.
        let json = r#"{"properties": [{"id": 4, "address": "1 ELM ST"}],
                       "page_nav": {}}"#;
        assert!(serde_json::from_str::<PropertiesPageEnvelope>(json).is_err());
    }

    #[test]
    fn parses_search_with_missing_categories() {
        let json = r#"{"owners": [{"id": 7, "full_name": "SMITH A"}]}"#;
        let envelope: SearchEnvelope = serde_json::from_str(json).unwrap();
        assert!(envelope.owners.is_some());
        assert!(envelope.properties.is_none());
        assert!(envelope.companies.is_none());
    }

    #[test]
    fn parses_detail_with_and_without_company() {
        let json = r#"{"owner": {"id": 42, "full_name": "SMITH JOHN",
                       "address": "PO BOX 1", "property_count": 3,
                       "properties": [{"address": "1 ELM ST"}, {"address": "2 OAK AVE"}]}}"#;
        let envelope: DetailEnvelope = serde_json::from_str(json).unwrap();
        let owner: OwnerDetail = envelope.owner.into();
        assert_eq!(owner.llc_name, None);
        assert_eq!(owner.properties, vec!["1 ELM ST", "2 OAK AVE"]);

        let json = r#"{"owner": {"id": 43, "full_name": "DOE JANE",
                       "address": "PO BOX 2", "llc_name": "DOE HOLDINGS LLC"}}"#;
        let envelope: DetailEnvelope = serde_json::from_str(json).unwrap();
        let owner: OwnerDetail = envelope.owner.into();
        assert_eq!(owner.llc_name.as_deref(), Some("DOE HOLDINGS LLC"));
        assert!(owner.properties.is_empty());
    }

    #[test]
    fn normalizes_queries() {
        assert_eq!(normalize_query("  smith  "), "SMITH");
        assert_eq!(normalize_query("Main St"), "MAIN ST");
    }
}
