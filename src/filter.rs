//! Dashboard scope selection and detail lookup over a cleaned table.
//!
//! The two dimensions are independent: the dashboard filter narrows what the
//! metrics and rollups see, while the detail lookup always searches the full
//! product list of the table.

use std::collections::BTreeSet;

use crate::{
    records::{CleanedTable, SalesRecord, Scope},
    transform::string_ops::contains_ignore_case,
};

/// Multi-select of product labels. Empty means "no filter", not "no rows".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardFilter {
    products: BTreeSet<String>,
}

impl DashboardFilter {
    pub fn new<I, S>(products: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            products: products.into_iter().map(Into::into).collect(),
        }
    }

    pub fn all() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn selected(&self) -> impl Iterator<Item = &str> {
        self.products.iter().map(String::as_str)
    }

    pub fn matches(&self, record: &SalesRecord) -> bool {
        self.products.is_empty() || self.products.contains(&record.product)
    }

    pub fn apply<'a>(&self, table: &'a CleanedTable) -> Scope<'a> {
        if self.products.is_empty() {
            return table.full_scope();
        }
        Scope::new(
            table
                .records()
                .iter()
                .filter(|record| self.matches(record))
                .collect(),
        )
    }
}

#[derive(Debug, Clone)]
pub struct DetailLookup<'a> {
    table: &'a CleanedTable,
    products: Vec<&'a str>,
    search: Option<String>,
}

impl<'a> DetailLookup<'a> {
    /// An empty search string is the same as no search.
    pub fn new(table: &'a CleanedTable, search: Option<&str>) -> Self {
        Self {
            table,
            products: table.products(),
            search: search.filter(|term| !term.is_empty()).map(str::to_string),
        }
    }

    pub fn search(&self) -> Option<&str> {
        self.search.as_deref()
    }

    /// Every distinct product label in the table, sorted.
    pub fn products(&self) -> &[&'a str] {
        &self.products
    }

    /// Product labels offered for selection after applying the search.
    pub fn options(&self) -> Vec<&'a str> {
        match self.search.as_deref() {
            Some(term) => self
                .products
                .iter()
                .copied()
                .filter(|product| contains_ignore_case(product, term))
                .collect(),
            None => self.products.clone(),
        }
    }

    pub fn default_selection(&self) -> Vec<&'a str> {
        if self.search.is_some() {
            self.options()
        } else {
            self.products.first().copied().into_iter().collect()
        }
    }

    /// Keeps only the requested labels that are currently offered, in option
    /// order. Labels outside the narrowed options select nothing.
    pub fn select<S: AsRef<str>>(&self, requested: &[S]) -> Vec<&'a str> {
        self.options()
            .into_iter()
            .filter(|option| requested.iter().any(|name| name.as_ref() == *option))
            .collect()
    }

    /// Rows of the selected products, newest first, ties by product descending.
    pub fn rows<S: AsRef<str>>(&self, selection: &[S]) -> Vec<&'a SalesRecord> {
        let selected = self.select(selection).into_iter().collect::<BTreeSet<&str>>();
        if selected.is_empty() {
            return Vec::new();
        }
        let mut rows = self
            .table
            .records()
            .iter()
            .filter(|record| selected.contains(record.product.as_str()))
            .collect::<Vec<_>>();
        rows.sort_by(|a, b| (b.date, &b.product).cmp(&(a.date, &a.product)));
        rows
    }
}
