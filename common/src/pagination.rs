//! Windowing of an ordered sequence into pages or a growing prefix.

use std::cmp;

use derive_more::Display;

use crate::define_kind;

define_kind! {
    #[doc = "Strategy of exposing an ordered sequence for rendering."]
    enum Mode {
        #[doc = "Discrete pages of a fixed size."]
        Paged = 1,

        #[doc = "Prefix growing by a page each time its end is reached."]
        Growing = 2,
    }
}

/// State of a window over an ordered sequence.
///
/// Page size is not stored here: it's owned by the caller and passed into
/// every operation, so that changing it is always accompanied by a
/// [`Window::reset()`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Window {
    /// [`Mode::Paged`] window.
    Paged {
        /// Requested page number, starting from `1`.
        ///
        /// May exceed the number of available pages, in which case the last
        /// page is exposed.
        page: usize,
    },

    /// [`Mode::Growing`] window.
    Growing {
        /// Number of leading items to expose.
        shown: usize,
    },
}

impl Window {
    /// Creates a new [`Window`] of the provided [`Mode`] at its initial
    /// position.
    #[must_use]
    pub fn new(mode: Mode, page_size: usize) -> Self {
        match mode {
            Mode::Paged => Self::Paged { page: 1 },
            Mode::Growing => Self::Growing {
                shown: page_size.max(1),
            },
        }
    }

    /// Returns [`Mode`] of this [`Window`].
    #[must_use]
    pub fn mode(&self) -> Mode {
        match self {
            Self::Paged { .. } => Mode::Paged,
            Self::Growing { .. } => Mode::Growing,
        }
    }

    /// Moves this [`Window`] back to its initial position.
    ///
    /// Must be called whenever the shape of the windowed sequence changes.
    pub fn reset(&mut self, page_size: usize) {
        *self = Self::new(self.mode(), page_size);
    }

    /// Switches this [`Window`] to the provided [`Mode`], resetting it.
    ///
    /// Returns `false` if this [`Window`] is in the provided [`Mode`] already,
    /// in which case nothing changes.
    pub fn switch(&mut self, mode: Mode, page_size: usize) -> bool {
        if self.mode() == mode {
            return false;
        }
        *self = Self::new(mode, page_size);
        true
    }

    /// Requests the provided `page` to be exposed.
    ///
    /// Page `0` is treated as the first one. Has no effect on a
    /// [`Mode::Growing`] window, returning `false`.
    pub fn request_page(&mut self, page: usize) -> bool {
        match self {
            Self::Paged { page: requested } => {
                *requested = page.max(1);
                true
            }
            Self::Growing { .. } => false,
        }
    }

    /// Moves a [`Mode::Paged`] window to the page following the currently
    /// exposed one, if there is any.
    pub fn next_page(&mut self, total: usize, page_size: usize) -> bool {
        let Self::Paged { page } = self else {
            return false;
        };
        let (current, pages) = clamp(*page, total, page_size);
        if current >= pages {
            return false;
        }
        *page = current + 1;
        true
    }

    /// Moves a [`Mode::Paged`] window to the page preceding the currently
    /// exposed one, if there is any.
    pub fn previous_page(&mut self, total: usize, page_size: usize) -> bool {
        let Self::Paged { page } = self else {
            return false;
        };
        let (current, _) = clamp(*page, total, page_size);
        if current <= 1 {
            return false;
        }
        *page = current - 1;
        true
    }

    /// Grows a [`Mode::Growing`] window by one page, never past the `total`.
    ///
    /// Returns `false` if nothing has changed, so repeated calls at the end of
    /// the sequence are harmless.
    pub fn advance(&mut self, total: usize, page_size: usize) -> bool {
        let Self::Growing { shown } = self else {
            return false;
        };
        if *shown >= total {
            return false;
        }
        *shown = cmp::min(total, *shown + page_size.max(1));
        true
    }

    /// Exposes the part of the provided ordered `items` covered by this
    /// [`Window`].
    #[must_use]
    pub fn slice<'i, T>(
        &self,
        items: &'i [T],
        page_size: usize,
    ) -> Slice<'i, T> {
        let total = items.len();
        let page_size = page_size.max(1);
        match *self {
            Self::Paged { page } => {
                let (page, total_pages) = clamp(page, total, page_size);
                let start = cmp::min((page - 1) * page_size, total);
                let end = cmp::min(start + page_size, total);
                Slice {
                    items: &items[start..end],
                    info: Info::Paged(PageInfo {
                        page,
                        total_pages,
                        page_size,
                        total,
                    }),
                }
            }
            Self::Growing { shown } => {
                let end = cmp::min(shown, total);
                Slice {
                    items: &items[..end],
                    info: Info::Growing(GrowthInfo { shown: end, total }),
                }
            }
        }
    }
}

/// Returns the number of pages needed for `total` items, being at least `1`.
#[must_use]
pub fn total_pages(total: usize, page_size: usize) -> usize {
    cmp::max(1, total.div_ceil(page_size.max(1)))
}

/// Clamps the requested `page` into the available range, returning it along
/// with the total number of pages.
fn clamp(page: usize, total: usize, page_size: usize) -> (usize, usize) {
    let pages = total_pages(total, page_size);
    (page.clamp(1, pages), pages)
}

/// Part of an ordered sequence exposed by a [`Window`].
#[derive(Clone, Copy, Debug)]
pub struct Slice<'i, T> {
    /// Exposed items.
    pub items: &'i [T],

    /// [`Info`] about the exposed items.
    pub info: Info,
}

/// Information about a [`Slice`] relative to the whole sequence.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
pub enum Info {
    /// [`Mode::Paged`] window information.
    Paged(PageInfo),

    /// [`Mode::Growing`] window information.
    Growing(GrowthInfo),
}

/// Information about an exposed page.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
#[display("Page {page} of {total_pages}")]
pub struct PageInfo {
    /// Number of the exposed page, starting from `1`.
    pub page: usize,

    /// Total number of pages, being at least `1`.
    pub total_pages: usize,

    /// Size of a page.
    pub page_size: usize,

    /// Total number of items in the sequence.
    pub total: usize,
}

impl PageInfo {
    /// Indicates whether there is a page before the exposed one.
    #[must_use]
    pub fn has_previous_page(&self) -> bool {
        self.page > 1
    }

    /// Indicates whether there is a page after the exposed one.
    #[must_use]
    pub fn has_next_page(&self) -> bool {
        self.page < self.total_pages
    }
}

/// Information about an exposed growing prefix.
#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
#[display("Showing {shown} of {total}")]
pub struct GrowthInfo {
    /// Number of exposed items.
    pub shown: usize,

    /// Total number of items in the sequence.
    pub total: usize,
}

impl GrowthInfo {
    /// Indicates whether the sequence has items not exposed yet.
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.shown < self.total
    }
}

/// Order of a sequence.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum Order {
    /// Ascending order.
    #[default]
    Ascending,

    /// Descending order.
    Descending,
}

impl Order {
    /// Returns the opposite [`Order`].
    #[must_use]
    pub const fn reversed(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Applies this [`Order`] to the provided ascending comparison result.
    #[must_use]
    pub fn apply(self, ordering: cmp::Ordering) -> cmp::Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}
