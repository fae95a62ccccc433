// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Rapidseq-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Rapidseq and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use smallvec::SmallVec;
use smol_str::SmolStr;

/// Sanitized actor identity (slashes stripped, surrounding whitespace trimmed).
pub type ActorName = SmolStr;

/// Signed line-number marks describing when an actor is "alive".
///
/// A positive mark opens an interval on that line, the following negative mark closes it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Existence {
    marks: SmallVec<[i64; 4]>,
}

impl Existence {
    pub fn marks(&self) -> &[i64] {
        &self.marks
    }

    pub fn len(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    pub fn last_mark(&self) -> Option<i64> {
        self.marks.last().copied()
    }

    /// An odd number of marks means the latest interval has not been closed yet.
    pub fn is_open(&self) -> bool {
        self.marks.len() % 2 == 1
    }

    pub(crate) fn open(&mut self, line_no: usize) {
        self.marks.push(line_mark(line_no));
    }

    pub(crate) fn close(&mut self, line_no: usize) {
        self.marks.push(-line_mark(line_no));
    }

    /// Closed `(open_line, close_line)` pairs in push order.
    ///
    /// A trailing unpaired mark (only possible before finalization) is skipped.
    pub fn intervals(&self) -> Vec<(usize, usize)> {
        self.marks
            .chunks_exact(2)
            .map(|pair| (pair[0].unsigned_abs() as usize, pair[1].unsigned_abs() as usize))
            .collect()
    }
}

fn line_mark(line_no: usize) -> i64 {
    i64::try_from(line_no).unwrap_or(i64::MAX)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    name: ActorName,
    x: usize,
    dx: usize,
    y: usize,
    dy: usize,
    mid: usize,
    existence: Existence,
}

impl Actor {
    pub fn new(name: impl Into<ActorName>) -> Self {
        Self {
            name: name.into(),
            x: 0,
            dx: 0,
            y: 0,
            dy: 0,
            mid: 0,
            existence: Existence::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn x(&self) -> usize {
        self.x
    }

    pub fn dx(&self) -> usize {
        self.dx
    }

    pub fn y(&self) -> usize {
        self.y
    }

    pub fn dy(&self) -> usize {
        self.dy
    }

    /// Horizontal centerline of the slot: `floor((2x + dx) / 2)`.
    pub fn mid(&self) -> usize {
        self.mid
    }

    pub fn bottom(&self) -> usize {
        self.y + self.dy
    }

    pub fn existence(&self) -> &Existence {
        &self.existence
    }

    pub(crate) fn existence_mut(&mut self) -> &mut Existence {
        &mut self.existence
    }

    pub(crate) fn set_header_pos(&mut self, x: usize, dx: usize) {
        self.x = x;
        self.dx = dx;
        self.mid = (2 * x + dx) / 2;
    }

    pub(crate) fn set_header_row(&mut self, y: usize, dy: usize) {
        self.y = y;
        self.dy = dy;
    }
}
