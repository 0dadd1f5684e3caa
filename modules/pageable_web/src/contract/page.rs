//! A page of results together with the pageable that produced it

use super::model::Pageable;

/// One slice of a larger result set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    content: Vec<T>,
    pageable: Pageable,
    total: u64,
}

impl<T> Page<T> {
    /// Create a page.
    ///
    /// When the content is the last, partially filled page the reported total
    /// may be stale (e.g. counted before a concurrent delete); it is corrected
    /// to `offset + content.len()` in that case.
    pub fn new(content: Vec<T>, pageable: Pageable, total: u64) -> Self {
        let total = match pageable.page_request() {
            Some(request)
                if !content.is_empty()
                    && request.offset() + u64::from(request.page_size()) > total =>
            {
                request.offset() + content.len() as u64
            }
            _ => total,
        };
        Self {
            content,
            pageable,
            total,
        }
    }

    /// Single page holding all of `content`
    pub fn unpaged(content: Vec<T>) -> Self {
        let total = content.len() as u64;
        Self::new(content, Pageable::unpaged(), total)
    }

    /// Cut the page described by `pageable` out of an in-memory collection.
    /// Ordering is the caller's responsibility.
    pub fn paginate(all: Vec<T>, pageable: &Pageable) -> Self {
        let total = all.len() as u64;
        let content = match pageable.page_request() {
            Some(request) => {
                let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
                all.into_iter()
                    .skip(offset)
                    .take(request.page_size() as usize)
                    .collect()
            }
            None => all,
        };
        Self::new(content, pageable.clone(), total)
    }

    pub fn content(&self) -> &[T] {
        &self.content
    }

    pub fn into_content(self) -> Vec<T> {
        self.content
    }

    pub fn pageable(&self) -> &Pageable {
        &self.pageable
    }

    pub fn total_elements(&self) -> u64 {
        self.total
    }

    /// Zero-based page number; 0 when unpaged
    pub fn number(&self) -> u32 {
        self.pageable.page_number().unwrap_or(0)
    }

    /// Requested page size; the content length when unpaged
    pub fn size(&self) -> u32 {
        self.pageable
            .page_size()
            .unwrap_or_else(|| u32::try_from(self.content.len()).unwrap_or(u32::MAX))
    }

    pub fn number_of_elements(&self) -> usize {
        self.content.len()
    }

    pub fn has_content(&self) -> bool {
        !self.content.is_empty()
    }

    pub fn total_pages(&self) -> u64 {
        match self.pageable.page_size() {
            Some(size) => self.total.div_ceil(u64::from(size)),
            None => 1,
        }
    }

    pub fn has_next(&self) -> bool {
        u64::from(self.number()) + 1 < self.total_pages()
    }

    pub fn has_previous(&self) -> bool {
        self.number() > 0
    }

    pub fn is_first(&self) -> bool {
        !self.has_previous()
    }

    pub fn is_last(&self) -> bool {
        !self.has_next()
    }

    pub fn next_pageable(&self) -> Option<Pageable> {
        self.has_next().then(|| self.pageable.next())
    }

    pub fn previous_pageable(&self) -> Option<Pageable> {
        self.has_previous()
            .then(|| self.pageable.previous_or_first())
    }

    /// Pageable pointing at the last page, `None` when unpaged
    pub fn last_pageable(&self) -> Option<Pageable> {
        let request = self.pageable.page_request()?;
        let last = self.total_pages().saturating_sub(1);
        Some(Pageable::Paged(
            request.with_page(u32::try_from(last).unwrap_or(u32::MAX)),
        ))
    }

    /// Convert the content, keeping the paging metadata
    pub fn map<U, F>(self, f: F) -> Page<U>
    where
        F: FnMut(T) -> U,
    {
        Page {
            content: self.content.into_iter().map(f).collect(),
            pageable: self.pageable,
            total: self.total,
        }
    }
}
