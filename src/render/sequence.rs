// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Rapidseq-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Rapidseq and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use crate::layout::{LayoutOutcome, TextMeasure};
use crate::model::{Actor, ActorName, ArrowWeight, Instruction, ParsedDiagram};

use super::text::{canvas_to_string_trimmed, text_len};
use super::{Canvas, CanvasError, UNICODE_BOX_BOTTOM_RIGHT, UNICODE_BOX_TOP_RIGHT};

const RIGHT_MARGIN: usize = 2;
const HEAD_RIGHT: char = '▶';
const HEAD_LEFT: char = '◀';
const HEAVY_TOP_RIGHT: char = '╕';
const HEAVY_BOTTOM_RIGHT: char = '╛';
const ELLIPSIS: char = '…';
/// Cells from the box edge to a self-loop's corner.
const SELF_LOOP_REACH: usize = 3;
/// Blank cells kept between a label and the strokes around it.
const LABEL_PAD: usize = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    /// Vertical distance between message rows.
    pub row_height: usize,
    /// Half-width of existence boxes around the lifeline; bars start this far from `mid`.
    pub box_dist: usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { row_height: 2, box_dist: 1 }
    }
}

impl RenderConfig {
    /// Measure that reserves the cells this renderer draws around each label.
    pub fn measure(&self) -> TerminalMeasure {
        TerminalMeasure { box_dist: self.box_dist }
    }
}

/// Monospace widths padded for existence boxes and self-loops.
///
/// A message label sits between the two boxes with one blank cell on each side. A self-loop
/// label sits right of the loop corner and stays one cell clear of the next actor's box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalMeasure {
    pub box_dist: usize,
}

impl TextMeasure for TerminalMeasure {
    fn header_width(&self, text: &str) -> usize {
        text_len(text)
    }

    fn message_width(&self, text: &str) -> usize {
        text_len(text) + 2 * (self.box_dist + LABEL_PAD) + 1
    }

    fn self_message_width(&self, text: &str) -> usize {
        text_len(text) + 2 * (self.box_dist + LABEL_PAD) + SELF_LOOP_REACH + 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceRenderError {
    Canvas(CanvasError),
    UnknownActor { name: ActorName },
    UnresolvedDirection { instruction_index: usize },
}

impl fmt::Display for SequenceRenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Canvas(err) => write!(f, "canvas error: {err}"),
            Self::UnknownActor { name } => write!(f, "missing actor '{name}' in registry"),
            Self::UnresolvedDirection { instruction_index } => {
                write!(
                    f,
                    "instruction {instruction_index} has no resolved direction; run layout first"
                )
            }
        }
    }
}

impl std::error::Error for SequenceRenderError {}

impl From<CanvasError> for SequenceRenderError {
    fn from(value: CanvasError) -> Self {
        Self::Canvas(value)
    }
}

/// A message with its endpoints looked up, ready to paint.
struct Placed<'a> {
    source: &'a Actor,
    target: &'a Actor,
    /// Lifeline of the actor right of the source; bounds self-loops.
    next_mid: Option<usize>,
    instruction: &'a Instruction,
    rightward: bool,
    y: usize,
}

/// Paints a laid-out diagram and returns it as text (trailing blanks trimmed).
///
/// Draw order: headers and lifelines, existence boxes, then messages with their labels. Labels
/// that do not fit the room the layout left them are cut short with `…`.
pub fn paint_sequence(
    diagram: &ParsedDiagram,
    outcome: &LayoutOutcome,
    config: &RenderConfig,
) -> Result<String, SequenceRenderError> {
    let registry = diagram.registry();
    if registry.is_empty() {
        return Ok(String::new());
    }

    let row_height = config.row_height.max(1);
    let header_offset = outcome.header_offset();
    let row_y = |line_no: usize| header_offset + line_no * row_height;
    let bottom_y = row_y(diagram.line_count() + 1);

    let placed = place_messages(diagram, &row_y)?;

    let mut width = registry.iter().map(|actor| actor.x() + actor.dx()).max().unwrap_or(0);
    for msg in &placed {
        width = width.max(message_right_extent(msg, config.box_dist));
    }
    let mut canvas = Canvas::new(width + RIGHT_MARGIN, bottom_y + 1)?;

    for actor in registry.iter() {
        draw_header(&mut canvas, actor, bottom_y)?;
    }

    for actor in registry.iter() {
        for (open, close) in actor.existence().intervals() {
            draw_existence_box(&mut canvas, actor.mid(), row_y(open), row_y(close), config)?;
        }
    }

    for msg in &placed {
        if msg.instruction.is_self_message() {
            draw_self_message(&mut canvas, msg, config.box_dist)?;
        } else {
            draw_message(&mut canvas, msg, config.box_dist)?;
        }
    }

    Ok(canvas_to_string_trimmed(&canvas))
}

fn place_messages<'a>(
    diagram: &'a ParsedDiagram,
    row_y: &dyn Fn(usize) -> usize,
) -> Result<Vec<Placed<'a>>, SequenceRenderError> {
    let registry = diagram.registry();
    let lookup = |name: &ActorName| {
        registry.get(name).ok_or_else(|| SequenceRenderError::UnknownActor { name: name.clone() })
    };

    diagram
        .instructions()
        .iter()
        .enumerate()
        .map(|(instruction_index, instruction)| {
            let rightward = instruction
                .rightward()
                .ok_or(SequenceRenderError::UnresolvedDirection { instruction_index })?;
            let next_mid = registry
                .index_of(instruction.source())
                .and_then(|idx| registry.actor_at(idx + 1))
                .map(Actor::mid);
            Ok(Placed {
                source: lookup(instruction.source())?,
                target: lookup(instruction.target())?,
                next_mid,
                instruction,
                rightward,
                y: row_y(instruction_index + 1),
            })
        })
        .collect()
}

fn message_right_extent(msg: &Placed<'_>, box_dist: usize) -> usize {
    if msg.instruction.is_self_message() {
        let loop_shape = SelfLoop::new(msg, box_dist);
        (loop_shape.corner_x + 1).max(loop_shape.label_x + text_len(&loop_shape.label))
    } else {
        let (left, right) = span(msg);
        let (label_x, label) = bar_label(left, right, msg.instruction.label(), box_dist);
        (right + 1).max(label_x + text_len(&label))
    }
}

fn span(msg: &Placed<'_>) -> (usize, usize) {
    let (a, b) = (msg.source.mid(), msg.target.mid());
    (a.min(b), a.max(b))
}

/// Cuts `text` to `room` cells, marking the cut with `…`.
fn fit_label(text: &str, room: usize) -> String {
    if text_len(text) <= room {
        return text.to_owned();
    }
    if room == 0 {
        return String::new();
    }
    text.chars().take(room - 1).chain(std::iter::once(ELLIPSIS)).collect()
}

/// Label centred in the blank run between the two existence boxes.
fn bar_label(left: usize, right: usize, text: &str, box_dist: usize) -> (usize, String) {
    let inset = box_dist + LABEL_PAD + 1;
    let start = left + inset;
    let room = (right + 1).saturating_sub(start + inset);
    let label = fit_label(text, room);
    (start + (room - text_len(&label)) / 2, label)
}

/// Corner and label placement of a self-message loop.
struct SelfLoop {
    x0: usize,
    corner_x: usize,
    label_x: usize,
    label: String,
}

impl SelfLoop {
    fn new(msg: &Placed<'_>, box_dist: usize) -> Self {
        let x0 = msg.source.mid() + box_dist;
        let mut corner_x = x0 + SELF_LOOP_REACH;
        if let Some(next_mid) = msg.next_mid {
            corner_x = corner_x.min(next_mid.saturating_sub(box_dist + 1)).max(x0 + 1);
        }

        let label_x = corner_x + LABEL_PAD + 1;
        let text = msg.instruction.label();
        let room = match msg.next_mid {
            Some(next_mid) => (next_mid + 1).saturating_sub(label_x + box_dist + LABEL_PAD + 1),
            None => text_len(text),
        };
        Self { x0, corner_x, label_x, label: fit_label(text, room) }
    }
}

fn draw_header(canvas: &mut Canvas, actor: &Actor, bottom_y: usize) -> Result<(), CanvasError> {
    let x1 = actor.x() + actor.dx().max(1) - 1;
    let y1 = actor.y() + actor.dy().max(1) - 1;
    canvas.draw_box(actor.x(), actor.y(), x1, y1)?;

    let name_x = actor.x() + actor.dx().saturating_sub(text_len(actor.name())) / 2;
    canvas.write_str(name_x, actor.y() + actor.dy() / 2, actor.name())?;

    canvas.draw_vline(actor.mid(), y1, bottom_y.max(y1))
}

/// Boxes from the label row above `open_y` to the row below `close_y`.
///
/// Only the interior is blanked, so back-to-back intervals share one edge row (`├─┤`) and the
/// lifeline still joins the outer edges as `┴` / `┬`.
fn draw_existence_box(
    canvas: &mut Canvas,
    mid: usize,
    open_y: usize,
    close_y: usize,
    config: &RenderConfig,
) -> Result<(), CanvasError> {
    let (x0, x1) = (mid.saturating_sub(config.box_dist), mid + config.box_dist);
    let (y0, y1) = (open_y.saturating_sub(1), close_y + 1);

    if y1 > y0 + 1 {
        canvas.clear_rect(x0, y0 + 1, x1, y1 - 1)?;
    }
    canvas.draw_box(x0, y0, x1, y1)
}

fn draw_message(
    canvas: &mut Canvas,
    msg: &Placed<'_>,
    box_dist: usize,
) -> Result<(), CanvasError> {
    let (left, right) = span(msg);

    // Keep clear of existence boxes when there is room for it.
    let (x0, x1) = if right - left > 2 * box_dist + 1 {
        (left + box_dist, right - box_dist)
    } else {
        (left, right)
    };

    // Inclusive bar span; the head sits on the end the message travels towards.
    let (start, end) = if msg.rightward { (x0, x1 - 1) } else { (x0 + 1, x1) };
    let head_x = if msg.rightward { end } else { start };
    match msg.instruction.weight() {
        ArrowWeight::Thin => canvas.draw_hline(start, end, msg.y)?,
        // Heavy cells overwrite strokes, so leave the tail's box edge alone.
        ArrowWeight::Thick if end > start => {
            let (from, to) = if msg.rightward { (start + 1, end) } else { (start, end - 1) };
            canvas.draw_heavy_hline(from, to, msg.y)?;
        }
        ArrowWeight::Thick => {}
    }
    canvas.set(head_x, msg.y, if msg.rightward { HEAD_RIGHT } else { HEAD_LEFT })?;

    let (label_x, label) = bar_label(left, right, msg.instruction.label(), box_dist);
    if label.is_empty() {
        return Ok(());
    }
    canvas.write_str(label_x, msg.y - 1, &label)
}

/// Two-row loop beside the lifeline: out on the label row, back on the message row.
fn draw_self_message(
    canvas: &mut Canvas,
    msg: &Placed<'_>,
    box_dist: usize,
) -> Result<(), CanvasError> {
    let SelfLoop { x0, corner_x, label_x, label } = SelfLoop::new(msg, box_dist);
    let (top_y, bottom_y) = (msg.y - 1, msg.y);

    match msg.instruction.weight() {
        ArrowWeight::Thin => {
            canvas.draw_hline(x0, corner_x - 1, top_y)?;
            canvas.draw_hline(x0, corner_x - 1, bottom_y)?;
            canvas.set(corner_x, top_y, UNICODE_BOX_TOP_RIGHT)?;
            canvas.set(corner_x, bottom_y, UNICODE_BOX_BOTTOM_RIGHT)?;
        }
        ArrowWeight::Thick => {
            if corner_x > x0 + 1 {
                canvas.draw_heavy_hline(x0 + 1, corner_x - 1, top_y)?;
                canvas.draw_heavy_hline(x0 + 1, corner_x - 1, bottom_y)?;
            }
            canvas.set(corner_x, top_y, HEAVY_TOP_RIGHT)?;
            canvas.set(corner_x, bottom_y, HEAVY_BOTTOM_RIGHT)?;
        }
    }

    if msg.rightward {
        canvas.set(x0 + 1, top_y, HEAD_RIGHT)?;
    } else {
        canvas.set(x0 + 1, bottom_y, HEAD_LEFT)?;
    }

    if label.is_empty() {
        return Ok(());
    }
    canvas.write_str(label_x, top_y, &label)
}
