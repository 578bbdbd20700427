//! Pagination configuration
//!
//! Zero means "not set" for both limit and offset.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    pub limit: Option<u64>,
    pub offset: Option<u64>,
}

impl Pagination {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = (limit != 0).then_some(limit);
        self
    }

    pub fn with_offset(mut self, offset: u64) -> Self {
        self.offset = (offset != 0).then_some(offset);
        self
    }

    /// Apply the same window to an already ordered sequence
    pub fn window<T>(&self, items: impl IntoIterator<Item = T>) -> Vec<T> {
        let skipped = items
            .into_iter()
            .skip(self.offset.unwrap_or(0).try_into().unwrap_or(usize::MAX));
        match self.limit {
            Some(limit) => skipped
                .take(limit.try_into().unwrap_or(usize::MAX))
                .collect(),
            None => skipped.collect(),
        }
    }
}
