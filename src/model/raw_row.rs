/// One parsed CSV line, keyed by the header it appeared under.
///
/// Column order follows the source header so the row can be written back out
/// unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    fields: Vec<(String, String)>,
}

impl RawRow {
    pub fn new(fields: Vec<(String, String)>) -> Self {
        RawRow { fields }
    }

    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        RawRow {
            fields: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    #[cfg(test)]
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == column)
            .map(|(_, v)| v.as_str())
    }

    /// Value in the `index`-th column, counting from the left of the source
    /// header. Tells apart columns that share a header name.
    pub fn value_at(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(|(_, v)| v.as_str())
    }

    /// First non-blank value stored under a header equal to `column`, ignoring
    /// ASCII case and surrounding whitespace in the header.
    pub fn get_ignore_case(&self, column: &str) -> Option<&str> {
        self.fields
            .iter()
            .filter(|(k, _)| k.trim().eq_ignore_ascii_case(column))
            .map(|(_, v)| v.as_str())
            .find(|v| !v.trim().is_empty())
    }
}

/// Everything a CSV source yielded: its header and the rows in file order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl RawTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}
