// SPDX-License-Identifier: MPL-2.0
//! Page indicator text.

use std::fmt;

/// `current/total` with a 1-based `current`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageIndicator {
    current: usize,
    total: usize,
}

impl PageIndicator {
    /// Indicator for the zero-based `position`; `None` for an empty list or
    /// a position outside it.
    #[must_use]
    pub fn for_position(position: usize, total: usize) -> Option<Self> {
        (position < total).then_some(Self {
            current: position + 1,
            total,
        })
    }

    #[must_use]
    pub fn current(self) -> usize {
        self.current
    }

    #[must_use]
    pub fn total(self) -> usize {
        self.total
    }
}

impl fmt::Display for PageIndicator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.current, self.total)
    }
}
