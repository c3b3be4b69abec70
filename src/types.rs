use anyhow::Result;

// ============================================================
// SESSION STORAGE TRAIT
// ============================================================

/// Trait for session persistence backends.
/// Implementations can use `SQLite` or any other datastore.
pub trait SessionStore: Send {
    /// Load the view the previous run ended on, if any.
    fn load_last_view(&self) -> Result<Option<SavedView>>;

    /// Record the view the user is currently on.
    fn save_last_view(&self, view: &SavedView) -> Result<()>;

    /// Raise the one-shot "came from search" flag.
    fn set_from_search(&self) -> Result<()>;

    /// Read and clear the "came from search" flag.
    fn take_from_search(&self) -> Result<bool>;
}

// ============================================================
// DOMAIN RECORDS
// ============================================================

/// Summary row from the top-owners endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerSummary {
    pub id: u64,
    pub full_name: String,
    pub property_count: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner {
    pub id: u64,
    pub full_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub id: u64,
    pub owner_id: u64,
    pub address: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Company {
    pub id: u64,
    pub owner_id: u64,
    pub llc_name: String,
}

/// Full owner record from the detail endpoint. Property count, company
/// name and the property-address list are only populated there.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OwnerDetail {
    pub id: u64,
    pub full_name: String,
    pub address: String,
    pub property_count: Option<u64>,
    pub llc_name: Option<String>,
    pub properties: Vec<String>,
}

/// Cursor pair for a paginated listing. Tokens are opaque and are sent
/// back to the API verbatim as the page path segment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageNav {
    pub prev_page: Option<String>,
    pub next_page: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    Owners,
    Properties,
    Companies,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Self::Owners => "Owners",
            Self::Properties => "Properties",
            Self::Companies => "Companies",
        }
    }

    /// URL path segment for this category's listing endpoint.
    pub fn path(self) -> &'static str {
        match self {
            Self::Owners => "owners",
            Self::Properties => "properties",
            Self::Companies => "companies",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "owners" => Some(Self::Owners),
            "properties" => Some(Self::Properties),
            "companies" => Some(Self::Companies),
            _ => None,
        }
    }
}

// ============================================================
// VIEW STATE
// ============================================================

/// A selectable list row: display label plus the owner it links to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListRow {
    pub owner_id: u64,
    pub label: String,
}

impl ListRow {
    pub fn owner(o: &Owner) -> Self {
        Self {
            owner_id: o.id,
            label: o.full_name.clone(),
        }
    }

    pub fn property(p: &Property) -> Self {
        Self {
            owner_id: p.owner_id,
            label: p.address.clone(),
        }
    }

    pub fn company(c: &Company) -> Self {
        Self {
            owner_id: c.owner_id,
            label: c.llc_name.clone(),
        }
    }
}

/// One titled sub-list of search results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchSection {
    pub category: Category,
    pub rows: Vec<ListRow>,
}

/// The active display region. Exactly one `View` exists at a time;
/// switching views replaces the whole value, which is what keeps the
/// four regions mutually exclusive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum View {
    Summary {
        owners: Vec<OwnerSummary>,
    },
    CategoryList {
        category: Category,
        page: String,
        rows: Vec<ListRow>,
        nav: PageNav,
    },
    SearchResults {
        sections: Vec<SearchSection>,
    },
    OwnerDetail {
        owner: OwnerDetail,
    },
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum Mode {
    Browse,
    Search,
}

// ============================================================
// SAVED SESSION STATE
// ============================================================

/// The address of a view, without its data. This is what the session
/// store remembers between runs. Search results are deliberately not
/// restorable (the query is gone); the variant exists so the
/// from-search flag has something to suppress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SavedView {
    Summary,
    CategoryList { category: Category, page: String },
    OwnerDetail { owner_id: u64 },
    SearchResults,
}

impl SavedView {
    pub fn encode(&self) -> String {
        match self {
            Self::Summary => "summary".to_string(),
            Self::CategoryList { category, page } => {
                format!("list:{}:{}", category.path(), page)
            }
            Self::OwnerDetail { owner_id } => format!("detail:{owner_id}"),
            Self::SearchResults => "search".to_string(),
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "summary" => return Some(Self::Summary),
            "search" => return Some(Self::SearchResults),
            _ => {}
        }
        if let Some(rest) = s.strip_prefix("list:") {
            let (category, page) = rest.split_once(':')?;
            return Some(Self::CategoryList {
                category: Category::parse(category)?,
                page: page.to_string(),
            });
        }
        if let Some(id) = s.strip_prefix("detail:") {
            return Some(Self::OwnerDetail {
                owner_id: id.parse().ok()?,
            });
        }
        None
    }
}

// ============================================================
// CHANNEL MESSAGES
// ============================================================

/// Result of a background fetch, reported over the event-loop channel.
/// There is no request identity and no cancellation: the last outcome
/// to arrive wins the view.
#[derive(Debug)]
pub enum FetchOutcome {
    SummaryLoaded(Vec<OwnerSummary>),
    PageLoaded {
        category: Category,
        page: String,
        rows: Vec<ListRow>,
        nav: PageNav,
    },
    SearchLoaded(Vec<SearchSection>),
    DetailLoaded(OwnerDetail),
    Failed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saved_view_roundtrip() {
        let views = [
            SavedView::Summary,
            SavedView::CategoryList {
                category: Category::Properties,
                page: "7".to_string(),
            },
            SavedView::OwnerDetail { owner_id: 42 },
            SavedView::SearchResults,
        ];
        for view in views {
            assert_eq!(SavedView::parse(&view.encode()), Some(view));
        }
    }

    #[test]
    fn saved_view_rejects_garbage() {
        assert_eq!(SavedView::parse(""), None);
        assert_eq!(SavedView::parse("list:parcels:1"), None);
        assert_eq!(SavedView::parse("detail:abc"), None);
        assert_eq!(SavedView::parse("list:owners"), None);
    }

    #[test]
    fn list_row_links_to_owning_owner() {
        let p = Property {
            id: 9,
            owner_id: 3,
            address: "123 MAIN ST".to_string(),
        };
        let row = ListRow::property(&p);
        assert_eq!(row.owner_id, 3);
        assert_eq!(row.label, "123 MAIN ST");

        let c = Company {
            id: 5,
            owner_id: 8,
            llc_name: "ACME HOLDINGS LLC".to_string(),
        };
        assert_eq!(ListRow::company(&c).owner_id, 8);
    }
}
