//! OData query options

/// Standard OData query options. Unset options are left out of the URL.
///
/// Keys and values are percent-encoded on the way out, with a space sent as
/// `%20` rather than `+`. Graph decodes `%24` and `%27` back to `$` and `'`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ODataQuery {
    pub top: Option<u32>,
    pub skip: Option<u32>,
    pub filter: Option<String>,
    pub search: Option<String>,
    pub count: Option<bool>,
    pub orderby: Vec<String>,
    pub select: Vec<String>,
    pub expand: Vec<String>,
}

impl ODataQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn top(mut self, top: u32) -> Self {
        self.top = Some(top);
        self
    }

    pub fn skip(mut self, skip: u32) -> Self {
        self.skip = Some(skip);
        self
    }

    pub fn filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn count(mut self, count: bool) -> Self {
        self.count = Some(count);
        self
    }

    pub fn orderby(mut self, field: impl Into<String>) -> Self {
        self.orderby.push(field.into());
        self
    }

    pub fn select<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.select.extend(fields.into_iter().map(Into::into));
        self
    }

    pub fn expand<I, S>(mut self, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.expand.extend(fields.into_iter().map(Into::into));
        self
    }

    /// Query pairs in a stable order, skipping anything unset.
    pub fn pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(top) = self.top {
            pairs.push(("$top", top.to_string()));
        }
        if let Some(skip) = self.skip {
            pairs.push(("$skip", skip.to_string()));
        }
        if let Some(ref filter) = self.filter {
            pairs.push(("$filter", filter.clone()));
        }
        if let Some(ref search) = self.search {
            pairs.push(("$search", search.clone()));
        }
        if let Some(count) = self.count {
            pairs.push(("$count", count.to_string()));
        }
        if !self.orderby.is_empty() {
            pairs.push(("$orderby", self.orderby.join(",")));
        }
        if !self.select.is_empty() {
            pairs.push(("$select", self.select.join(",")));
        }
        if !self.expand.is_empty() {
            pairs.push(("$expand", self.expand.join(",")));
        }
        pairs
    }

    pub fn is_empty(&self) -> bool {
        self.pairs().is_empty()
    }
}

/// Quote a value for an alternate-key segment such as `externalId='...'`.
pub fn odata_key_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}
