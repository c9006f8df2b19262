//! Per-session pagination cursor.

/// Tracks which list page to request next.
///
/// Owned by one browsing session, so separate sessions paginate
/// independently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::module_name_repetitions)]
pub struct PageCursor {
    /// Next page to request (1-based).
    next_page: u32,
}

impl PageCursor {
    /// First page of a list endpoint.
    pub const FIRST_PAGE: u32 = 1;

    /// Creates a cursor positioned at the first page.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            next_page: Self::FIRST_PAGE,
        }
    }

    /// Creates a cursor positioned at `page` (values below 1 become 1).
    #[must_use]
    pub const fn starting_at(page: u32) -> Self {
        if page < Self::FIRST_PAGE {
            Self::new()
        } else {
            Self { next_page: page }
        }
    }

    /// Page the next request will ask for.
    #[must_use]
    pub const fn current(&self) -> u32 {
        self.next_page
    }

    /// Moves to the following page.
    ///
    /// Stops at `u32::MAX`: once there, further calls leave the cursor in
    /// place. List endpoints cap out far below that, so a live session
    /// never reaches it.
    pub const fn advance(&mut self) {
        self.next_page = self.next_page.saturating_add(1);
    }
}

impl Default for PageCursor {
    fn default() -> Self {
        Self::new()
    }
}
