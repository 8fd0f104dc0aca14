/// Per-URL state definitions for the crawl loop
use std::fmt;

/// Represents the state of a URL in the crawl process
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PageState {
    // ===== Active States =====
    /// URL is waiting in `to_explore`
    Queued,

    /// URL is being fetched and classified
    Visiting,

    // ===== Terminal Success States =====
    /// Page carries the main-content marker; recorded, never expanded
    VisitedContent,

    /// Page has no main-content marker; its links were queued
    VisitedHub,

    // ===== Terminal Failure States =====
    /// Site answered 403; URL was put back in `to_explore` and the run stopped
    SkippedDenied,

    /// Fetch failed; URL is neither visited nor re-queued
    Dropped,
}

impl PageState {
    /// Returns true if no further processing happens in this run
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Queued | Self::Visiting)
    }

    /// Returns true if the URL ended up in `visited`
    pub fn is_visited(&self) -> bool {
        matches!(self, Self::VisitedContent | Self::VisitedHub)
    }

    /// Returns true if this represents a failure
    pub fn is_error(&self) -> bool {
        matches!(self, Self::SkippedDenied | Self::Dropped)
    }

    /// Returns true if moving from `self` to `next` is a legal step
    pub fn can_transition_to(&self, next: PageState) -> bool {
        match self {
            Self::Queued => matches!(next, Self::Visiting),
            Self::Visiting => next.is_terminal(),
            _ => false,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Queued => "queued",
            Self::Visiting => "visiting",
            Self::VisitedContent => "visited_content",
            Self::VisitedHub => "visited_hub",
            Self::SkippedDenied => "skipped_denied",
            Self::Dropped => "dropped",
        }
    }

    /// Returns all possible page states
    pub fn all_states() -> Vec<Self> {
        vec![
            Self::Queued,
            Self::Visiting,
            Self::VisitedContent,
            Self::VisitedHub,
            Self::SkippedDenied,
            Self::Dropped,
        ]
    }
}

impl fmt::Display for PageState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
