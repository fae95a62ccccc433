// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Rapidseq-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Rapidseq and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Shared application state for the editor loop and the one-shot CLI pipeline.
//!
//! Everything the parse/layout/paint cycle needs between key presses lives in [`AppContext`]:
//! viewport geometry, the debounce deadline, the current notice and the last good render.

use std::fmt;
use std::time::{Duration, Instant};

use crossterm::event::KeyCode;

use crate::format::{build_instructions, ParseError};
use crate::layout::{
    compute_layout, LayoutConfig, LayoutError, LayoutOutcome, LayoutWarning, TextMeasure,
};
use crate::model::ParsedDiagram;
use crate::render::{paint_sequence, RenderConfig, SequenceRenderError};

/// Quiet period after the last edit before a re-parse runs.
pub const PARSE_DEBOUNCE: Duration = Duration::from_millis(250);
/// Share of the viewport width given to the diagram pane.
pub const DIAGRAM_PANE_PERCENT: u16 = 80;

#[derive(Debug)]
pub enum PipelineError {
    Parse(ParseError),
    Layout(LayoutError),
    Render(SequenceRenderError),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "{err}"),
            Self::Layout(err) => write!(f, "layout failed: {err}"),
            Self::Render(err) => write!(f, "render failed: {err}"),
        }
    }
}

impl std::error::Error for PipelineError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Layout(err) => Some(err),
            Self::Render(err) => Some(err),
        }
    }
}

impl From<ParseError> for PipelineError {
    fn from(value: ParseError) -> Self {
        Self::Parse(value)
    }
}

impl From<LayoutError> for PipelineError {
    fn from(value: LayoutError) -> Self {
        Self::Layout(value)
    }
}

impl From<SequenceRenderError> for PipelineError {
    fn from(value: SequenceRenderError) -> Self {
        Self::Render(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub text: String,
    pub warnings: Vec<LayoutWarning>,
}

/// Parses and lays out `text` without painting it.
pub fn parse_and_layout(
    text: &str,
    measure: &impl TextMeasure,
    layout: &LayoutConfig,
) -> Result<(ParsedDiagram, LayoutOutcome), PipelineError> {
    let mut diagram = build_instructions(text)?;
    let outcome = compute_layout(&mut diagram, measure, layout)?;
    Ok((diagram, outcome))
}

/// Runs the whole text-to-picture pipeline once.
pub fn render_text(
    text: &str,
    measure: &impl TextMeasure,
    layout: &LayoutConfig,
    render: &RenderConfig,
) -> Result<Rendered, PipelineError> {
    let (diagram, outcome) = parse_and_layout(text, measure, layout)?;
    let text = paint_sequence(&diagram, &outcome, render)?;
    tracing::debug!(
        instructions = diagram.instructions().len(),
        warnings = outcome.warnings().len(),
        rows = text.lines().count(),
        "rendered diagram"
    );
    Ok(Rendered { text, warnings: outcome.warnings().to_vec() })
}

/// Single-slot deadline: scheduling again replaces the pending one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Debouncer {
    delay: Duration,
    deadline: Option<Instant>,
}

impl Default for Debouncer {
    fn default() -> Self {
        Self::new(PARSE_DEBOUNCE)
    }
}

impl Debouncer {
    pub fn new(delay: Duration) -> Self {
        Self { delay, deadline: None }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    pub fn schedule(&mut self, now: Instant) {
        self.deadline = Some(now + self.delay);
    }

    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    /// Returns `true` exactly once when the pending deadline has passed.
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }
}

/// Navigation and modifier keys leave the text unchanged, so they never trigger a re-parse.
pub fn is_muted_key(code: KeyCode) -> bool {
    matches!(
        code,
        KeyCode::Left
            | KeyCode::Right
            | KeyCode::Up
            | KeyCode::Down
            | KeyCode::Modifier(_)
            | KeyCode::CapsLock
    )
}

fn drawing_width(viewport_width: u16, gutter: usize) -> usize {
    let pane = usize::from(viewport_width) * usize::from(DIAGRAM_PANE_PERCENT) / 100;
    pane.saturating_sub(2 * gutter)
}

#[derive(Debug, Clone)]
pub struct AppContext {
    viewport: (u16, u16),
    layout: LayoutConfig,
    render: RenderConfig,
    debouncer: Debouncer,
    notice: Option<String>,
    rendered: Option<String>,
}

impl AppContext {
    pub fn new(width: u16, height: u16) -> Self {
        let base = LayoutConfig::terminal(0);
        let layout = LayoutConfig::terminal(drawing_width(width, base.gutter));
        Self {
            viewport: (width, height),
            layout,
            render: RenderConfig::default(),
            debouncer: Debouncer::default(),
            notice: None,
            rendered: None,
        }
    }

    pub fn viewport(&self) -> (u16, u16) {
        self.viewport
    }

    pub fn layout_config(&self) -> &LayoutConfig {
        &self.layout
    }

    pub fn render_config(&self) -> &RenderConfig {
        &self.render
    }

    pub fn debouncer(&self) -> &Debouncer {
        &self.debouncer
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Last successful render; kept while the current text fails to parse.
    pub fn rendered(&self) -> Option<&str> {
        self.rendered.as_deref()
    }

    pub fn resize(&mut self, width: u16, height: u16, now: Instant) {
        self.viewport = (width, height);
        self.layout.canvas_width = drawing_width(width, self.layout.gutter);
        self.debouncer.schedule(now);
    }

    /// Records a key press; returns whether it scheduled a re-parse.
    pub fn note_key(&mut self, code: KeyCode, now: Instant) -> bool {
        if is_muted_key(code) {
            return false;
        }
        self.debouncer.schedule(now);
        true
    }

    pub fn schedule_parse(&mut self, now: Instant) {
        self.debouncer.schedule(now);
    }

    /// Runs the pending parse if its deadline has passed.
    pub fn poll_parse(&mut self, text: &str, now: Instant) -> bool {
        if !self.debouncer.take_due(now) {
            return false;
        }
        self.run_parse(text);
        true
    }

    pub fn run_parse(&mut self, text: &str) {
        match render_text(text, &self.render.measure(), &self.layout, &self.render) {
            Ok(rendered) => {
                self.notice = rendered.warnings.last().map(ToString::to_string);
                self.rendered = Some(rendered.text);
            }
            Err(err) => {
                tracing::debug!(error = %err, "parse failed; keeping previous render");
                self.notice = Some(err.to_string());
            }
        }
    }
}
