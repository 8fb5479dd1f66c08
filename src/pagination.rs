//! Pagination state of the migrated file listing.
//!
//! All mutations go through [`Pagination::update`], which returns the page
//! request to issue (if any). Next/Prev are gated by the `has_next`/`has_prev`
//! flags of the last successful listing, jumps by its total page count; the
//! server is not consulted until the request round-trips.

use crate::error::{ConsoleError, ConsoleResult};
use crate::types::FilesPage;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub per_page: u32,
}

impl PageRequest {
    pub fn query(&self) -> String {
        format!("page={}&per_page={}", self.page, self.per_page)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageEvent {
    Refresh,
    Next,
    Prev,
    Jump(i64),
    PerPageChanged(u32),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pagination {
    page: u32,
    per_page: u32,
    total_count: u64,
    total_pages: u32,
    has_prev: bool,
    has_next: bool,
}

impl Pagination {
    pub fn new(per_page: u32) -> Self {
        Self {
            page: 1,
            per_page: per_page.max(1),
            total_count: 0,
            total_pages: 0,
            has_prev: false,
            has_next: false,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn per_page(&self) -> u32 {
        self.per_page
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn total_pages(&self) -> u32 {
        self.total_pages
    }

    pub fn has_prev(&self) -> bool {
        self.has_prev
    }

    pub fn has_next(&self) -> bool {
        self.has_next
    }

    pub fn current_request(&self) -> PageRequest {
        PageRequest { page: self.page, per_page: self.per_page }
    }

    /// Applies a navigation event. On success the returned request is the
    /// one to fetch next; on rejection the state is left untouched.
    pub fn update(&mut self, event: PageEvent) -> ConsoleResult<PageRequest> {
        match event {
            PageEvent::Refresh => {}
            PageEvent::Next => self.step(self.has_next, self.page as i64 + 1)?,
            PageEvent::Prev => self.step(self.has_prev, self.page as i64 - 1)?,
            PageEvent::Jump(p) => self.jump(p)?,
            PageEvent::PerPageChanged(n) => {
                if n == 0 {
                    return Err(ConsoleError::InvalidInput("Page size must be > 0".into()));
                }
                self.per_page = n;
                self.page = 1;
            }
        }
        Ok(self.current_request())
    }

    /// Adopts totals and navigation flags from a successful listing.
    /// The current page and page size stay the client's own values.
    pub fn apply_listing(&mut self, listing: &FilesPage) {
        self.total_count = listing.total_count;
        self.total_pages = listing.pages;
        self.has_prev = listing.has_prev;
        self.has_next = listing.has_next;
    }

    pub fn page_info(&self) -> String {
        format!("Page {} of {}", self.page, self.total_pages)
    }

    /// Next/Prev follow the listing's `has_next`/`has_prev` flags rather than
    /// the page count.
    fn step(&mut self, allowed: bool, requested: i64) -> ConsoleResult<()> {
        if !allowed || requested < 1 {
            return Err(ConsoleError::PageOutOfRange { requested, total_pages: self.total_pages });
        }
        self.page = u32::try_from(requested).unwrap_or(u32::MAX);
        Ok(())
    }

    fn jump(&mut self, requested: i64) -> ConsoleResult<()> {
        if requested < 1 || requested > self.total_pages as i64 {
            return Err(ConsoleError::PageOutOfRange { requested, total_pages: self.total_pages });
        }
        self.page = requested as u32;
        Ok(())
    }
}
