// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Rapidseq-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Rapidseq and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Text rendering.
//!
//! Diagrams are painted onto a fixed-size character [`Canvas`] whose box-drawing strokes merge
//! into junctions where they cross (a lifeline passing a message bar becomes `┼`, not `─`).

use std::fmt;

pub mod sequence;
mod text;

pub use sequence::{paint_sequence, RenderConfig, SequenceRenderError, TerminalMeasure};

pub const UNICODE_BOX_HORIZONTAL: char = '─';
pub const UNICODE_BOX_VERTICAL: char = '│';
pub const UNICODE_BOX_TOP_LEFT: char = '┌';
pub const UNICODE_BOX_TOP_RIGHT: char = '┐';
pub const UNICODE_BOX_BOTTOM_LEFT: char = '└';
pub const UNICODE_BOX_BOTTOM_RIGHT: char = '┘';
pub const UNICODE_BOX_TEE_RIGHT: char = '├';
pub const UNICODE_BOX_TEE_LEFT: char = '┤';
pub const UNICODE_BOX_TEE_DOWN: char = '┬';
pub const UNICODE_BOX_TEE_UP: char = '┴';
pub const UNICODE_BOX_CROSS: char = '┼';
/// Thick message bars. Not a mergeable stroke: it overwrites whatever it crosses.
pub const HEAVY_HORIZONTAL: char = '═';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct BoxEdges(u8);

impl BoxEdges {
    const NONE: Self = Self(0);
    const LEFT: Self = Self(1 << 0);
    const RIGHT: Self = Self(1 << 1);
    const UP: Self = Self(1 << 2);
    const DOWN: Self = Self(1 << 3);

    fn is_empty(self) -> bool {
        self.0 == 0
    }

    fn contains(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    fn of(ch: char) -> Option<Self> {
        let (l, r, u, d) = (Self::LEFT, Self::RIGHT, Self::UP, Self::DOWN);
        let edges = match ch {
            UNICODE_BOX_HORIZONTAL => l.union(r),
            UNICODE_BOX_VERTICAL => u.union(d),
            UNICODE_BOX_TOP_LEFT => r.union(d),
            UNICODE_BOX_TOP_RIGHT => l.union(d),
            UNICODE_BOX_BOTTOM_LEFT => r.union(u),
            UNICODE_BOX_BOTTOM_RIGHT => l.union(u),
            UNICODE_BOX_TEE_RIGHT => u.union(d).union(r),
            UNICODE_BOX_TEE_LEFT => u.union(d).union(l),
            UNICODE_BOX_TEE_DOWN => l.union(r).union(d),
            UNICODE_BOX_TEE_UP => l.union(r).union(u),
            UNICODE_BOX_CROSS => l.union(r).union(u).union(d),
            _ => return None,
        };
        Some(edges)
    }

    fn glyph(self) -> char {
        match self.0 {
            0 => ' ',
            1..=3 => UNICODE_BOX_HORIZONTAL,
            4 | 8 | 12 => UNICODE_BOX_VERTICAL,
            10 => UNICODE_BOX_TOP_LEFT,
            9 => UNICODE_BOX_TOP_RIGHT,
            6 => UNICODE_BOX_BOTTOM_LEFT,
            5 => UNICODE_BOX_BOTTOM_RIGHT,
            14 => UNICODE_BOX_TEE_RIGHT,
            13 => UNICODE_BOX_TEE_LEFT,
            11 => UNICODE_BOX_TEE_DOWN,
            7 => UNICODE_BOX_TEE_UP,
            _ => UNICODE_BOX_CROSS,
        }
    }
}

/// A fixed-size, bounds-checked character grid.
///
/// - non-box characters overwrite (last writer wins)
/// - box-drawing characters accumulate edges and render as the matching junction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Canvas {
    width: usize,
    height: usize,
    cells: Vec<char>,
    box_edges: Vec<BoxEdges>,
}

impl Canvas {
    /// Creates a new canvas filled with spaces.
    pub fn new(width: usize, height: usize) -> Result<Self, CanvasError> {
        Self::new_filled(width, height, ' ')
    }

    pub fn new_filled(width: usize, height: usize, fill: char) -> Result<Self, CanvasError> {
        let len = width.checked_mul(height).ok_or(CanvasError::AreaOverflow { width, height })?;

        Ok(Self { width, height, cells: vec![fill; len], box_edges: vec![BoxEdges::NONE; len] })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn in_bounds(&self, x: usize, y: usize) -> bool {
        x < self.width && y < self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Result<char, CanvasError> {
        let idx = self.index_of(x, y)?;
        Ok(self.render_at(x, y, idx))
    }

    pub fn set(&mut self, x: usize, y: usize, ch: char) -> Result<(), CanvasError> {
        let idx = self.index_of(x, y)?;
        match BoxEdges::of(ch) {
            Some(edges) => self.box_edges[idx] = self.box_edges[idx].union(edges),
            None => {
                self.cells[idx] = ch;
                self.box_edges[idx] = BoxEdges::NONE;
            }
        }
        Ok(())
    }

    /// Writes `text` left-to-right from `(x, y)`, clipping at the right edge.
    pub fn write_str(&mut self, x: usize, y: usize, text: &str) -> Result<(), CanvasError> {
        if y >= self.height {
            return Err(CanvasError::OutOfBounds { x, y, width: self.width, height: self.height });
        }

        for (offset, ch) in text.chars().enumerate() {
            let cx = x + offset;
            if cx >= self.width {
                break;
            }
            self.set(cx, y, ch)?;
        }
        Ok(())
    }

    /// Blanks every cell of the inclusive rectangle, dropping any box strokes in it.
    pub fn clear_rect(
        &mut self,
        x0: usize,
        y0: usize,
        x1: usize,
        y1: usize,
    ) -> Result<(), CanvasError> {
        let (min_x, min_y, max_x, max_y) = self.check_rect(x0, y0, x1, y1)?;
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                self.set(x, y, ' ')?;
            }
        }
        Ok(())
    }

    pub fn draw_hline(&mut self, x0: usize, x1: usize, y: usize) -> Result<(), CanvasError> {
        self.fill_hline(x0, x1, y, UNICODE_BOX_HORIZONTAL)
    }

    /// Heavy bar that replaces the cells it crosses.
    pub fn draw_heavy_hline(&mut self, x0: usize, x1: usize, y: usize) -> Result<(), CanvasError> {
        self.fill_hline(x0, x1, y, HEAVY_HORIZONTAL)
    }

    pub fn draw_vline(&mut self, x: usize, y0: usize, y1: usize) -> Result<(), CanvasError> {
        let (_, min_y, _, max_y) = self.check_rect(x, y0, x, y1)?;
        for y in min_y..=max_y {
            self.set(x, y, UNICODE_BOX_VERTICAL)?;
        }
        Ok(())
    }

    /// Draws a single-line box with corners at `(x0, y0)` and `(x1, y1)`.
    ///
    /// Nothing is drawn when any corner is out of bounds.
    pub fn draw_box(
        &mut self,
        x0: usize,
        y0: usize,
        x1: usize,
        y1: usize,
    ) -> Result<(), CanvasError> {
        let (min_x, min_y, max_x, max_y) = self.check_rect(x0, y0, x1, y1)?;

        if min_y == max_y {
            return self.draw_hline(min_x, max_x, min_y);
        }
        if min_x == max_x {
            return self.draw_vline(min_x, min_y, max_y);
        }

        for x in (min_x + 1)..max_x {
            self.set(x, min_y, UNICODE_BOX_HORIZONTAL)?;
            self.set(x, max_y, UNICODE_BOX_HORIZONTAL)?;
        }
        for y in (min_y + 1)..max_y {
            self.set(min_x, y, UNICODE_BOX_VERTICAL)?;
            self.set(max_x, y, UNICODE_BOX_VERTICAL)?;
        }

        self.set(min_x, min_y, UNICODE_BOX_TOP_LEFT)?;
        self.set(max_x, min_y, UNICODE_BOX_TOP_RIGHT)?;
        self.set(min_x, max_y, UNICODE_BOX_BOTTOM_LEFT)?;
        self.set(max_x, max_y, UNICODE_BOX_BOTTOM_RIGHT)?;
        Ok(())
    }

    fn fill_hline(&mut self, x0: usize, x1: usize, y: usize, ch: char) -> Result<(), CanvasError> {
        let (min_x, _, max_x, _) = self.check_rect(x0, y, x1, y)?;
        for x in min_x..=max_x {
            self.set(x, y, ch)?;
        }
        Ok(())
    }

    /// Normalizes the rectangle and checks its far corner; returns `(min_x, min_y, max_x, max_y)`.
    fn check_rect(
        &self,
        x0: usize,
        y0: usize,
        x1: usize,
        y1: usize,
    ) -> Result<(usize, usize, usize, usize), CanvasError> {
        let (min_x, max_x) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        let (min_y, max_y) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
        self.index_of(max_x, max_y)?;
        Ok((min_x, min_y, max_x, max_y))
    }

    fn index_of(&self, x: usize, y: usize) -> Result<usize, CanvasError> {
        if !self.in_bounds(x, y) {
            return Err(CanvasError::OutOfBounds { x, y, width: self.width, height: self.height });
        }
        Ok((y * self.width) + x)
    }

    fn render_at(&self, x: usize, y: usize, idx: usize) -> char {
        let edges = self.box_edges[idx];
        if edges.is_empty() {
            return self.cells[idx];
        }

        // Only keep the arms that actually meet a neighbour, so a `┼` stamped next to nothing on
        // one side still reads as a tee or a corner.
        let connected = self.connected_box_edges(x, y, edges);
        if connected.is_empty() {
            edges.glyph()
        } else {
            connected.glyph()
        }
    }

    fn connected_box_edges(&self, x: usize, y: usize, edges: BoxEdges) -> BoxEdges {
        let neighbour = |nx: usize, ny: usize, want: BoxEdges| {
            self.box_edges[(ny * self.width) + nx].contains(want)
        };

        let mut connected = BoxEdges::NONE;
        if edges.contains(BoxEdges::LEFT) && x > 0 && neighbour(x - 1, y, BoxEdges::RIGHT) {
            connected = connected.union(BoxEdges::LEFT);
        }
        if edges.contains(BoxEdges::RIGHT)
            && x + 1 < self.width
            && neighbour(x + 1, y, BoxEdges::LEFT)
        {
            connected = connected.union(BoxEdges::RIGHT);
        }
        if edges.contains(BoxEdges::UP) && y > 0 && neighbour(x, y - 1, BoxEdges::DOWN) {
            connected = connected.union(BoxEdges::UP);
        }
        if edges.contains(BoxEdges::DOWN)
            && y + 1 < self.height
            && neighbour(x, y + 1, BoxEdges::UP)
        {
            connected = connected.union(BoxEdges::DOWN);
        }
        connected
    }
}

impl fmt::Display for Canvas {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use std::fmt::Write as _;

        for y in 0..self.height {
            for x in 0..self.width {
                f.write_char(self.render_at(x, y, (y * self.width) + x))?;
            }
            if y + 1 < self.height {
                f.write_char('\n')?;
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CanvasError {
    AreaOverflow { width: usize, height: usize },
    OutOfBounds { x: usize, y: usize, width: usize, height: usize },
}

impl fmt::Display for CanvasError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AreaOverflow { width, height } => {
                write!(f, "canvas area overflow: {width}*{height}")
            }
            Self::OutOfBounds { x, y, width, height } => {
                write!(f, "out of bounds: ({x},{y}) for {width}x{height} canvas")
            }
        }
    }
}

impl std::error::Error for CanvasError {}

#[cfg(test)]
mod tests {
    use super::{Canvas, CanvasError};

    #[test]
    fn set_and_get_in_bounds() {
        let mut c = Canvas::new_filled(3, 2, '.').expect("canvas");
        c.set(1, 0, 'X').unwrap();
        assert_eq!(c.get(1, 0).unwrap(), 'X');
        assert_eq!(c.to_string(), ".X.\n...");
    }

    #[test]
    fn out_of_bounds_access_errors() {
        let mut c = Canvas::new(2, 2).expect("canvas");
        assert_eq!(
            c.set(2, 0, 'X').unwrap_err(),
            CanvasError::OutOfBounds { x: 2, y: 0, width: 2, height: 2 }
        );
        assert_eq!(
            c.get(0, 2).unwrap_err(),
            CanvasError::OutOfBounds { x: 0, y: 2, width: 2, height: 2 }
        );
    }

    #[test]
    fn write_str_clips_at_right_edge() {
        let mut c = Canvas::new_filled(4, 1, '.').expect("canvas");
        c.write_str(2, 0, "abcdef").unwrap();
        assert_eq!(c.to_string(), "..ab");

        c.write_str(9, 0, "zz").unwrap();
        assert_eq!(c.to_string(), "..ab");
        assert!(c.write_str(0, 1, "a").is_err());
    }

    #[test]
    fn rejects_area_overflow() {
        assert_eq!(
            Canvas::new_filled(usize::MAX, 2, '.').unwrap_err(),
            CanvasError::AreaOverflow { width: usize::MAX, height: 2 }
        );
    }

    #[test]
    fn draw_box_out_of_bounds_is_not_partial() {
        let mut c = Canvas::new_filled(4, 3, '.').expect("canvas");
        assert!(c.draw_box(0, 0, 4, 2).is_err());
        assert_eq!(c.to_string(), "....\n....\n....");
    }

    #[test]
    fn draw_box_draws_corners_and_edges() {
        let mut c = Canvas::new_filled(6, 5, '.').expect("canvas");
        c.draw_box(1, 1, 4, 3).unwrap();
        assert_eq!(c.to_string(), "......\n.┌──┐.\n.│..│.\n.└──┘.\n......");
    }

    #[test]
    fn lifeline_crossing_a_bar_becomes_a_junction() {
        let mut c = Canvas::new_filled(5, 3, '.').expect("canvas");
        c.draw_vline(2, 0, 2).unwrap();
        c.draw_hline(0, 4, 1).unwrap();
        assert_eq!(c.to_string(), "..│..\n──┼──\n..│..");

        let mut c = Canvas::new_filled(5, 3, '.').expect("canvas");
        c.draw_vline(2, 0, 2).unwrap();
        c.draw_hline(2, 4, 1).unwrap();
        assert_eq!(c.to_string(), "..│..\n..├──\n..│..");
    }

    #[test]
    fn heavy_bar_overwrites_strokes() {
        let mut c = Canvas::new_filled(5, 3, '.').expect("canvas");
        c.draw_vline(2, 0, 2).unwrap();
        c.draw_heavy_hline(0, 4, 1).unwrap();
        assert_eq!(c.to_string(), "..│..\n═════\n..│..");
    }

    #[test]
    fn clear_rect_drops_strokes_inside() {
        let mut c = Canvas::new(3, 3).expect("canvas");
        c.draw_vline(1, 0, 2).unwrap();
        c.clear_rect(0, 1, 2, 1).unwrap();
        assert_eq!(c.to_string(), " │ \n   \n │ ");
    }
}
