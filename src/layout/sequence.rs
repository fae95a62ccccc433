// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Rapidseq-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Rapidseq and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;

use serde::Serialize;

use crate::model::{ActorName, ActorRegistry, ParsedDiagram};

/// Width measurement seam. Headers and message labels may use different fonts.
pub trait TextMeasure {
    fn header_width(&self, text: &str) -> usize;
    fn message_width(&self, text: &str) -> usize;

    /// Room a self-message needs towards the next actor; loops usually want more than a bar.
    fn self_message_width(&self, text: &str) -> usize {
        self.message_width(text)
    }
}

/// One unit per `char`, for terminal cell grids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MonospaceMeasure;

impl TextMeasure for MonospaceMeasure {
    fn header_width(&self, text: &str) -> usize {
        text.chars().count()
    }

    fn message_width(&self, text: &str) -> usize {
        text.chars().count()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutConfig {
    /// Width available to all actor slots together.
    pub canvas_width: usize,
    /// Padding around header text and between slots.
    pub gutter: usize,
    /// Header row height.
    pub line_height: usize,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self { canvas_width: 800, gutter: 10, line_height: 25 }
    }
}

impl LayoutConfig {
    /// Cell-based preset: `│ Name │` headers, three rows tall.
    pub fn terminal(canvas_width: usize) -> Self {
        Self { canvas_width, gutter: 2, line_height: 3 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LayoutWarning {
    /// Header text does not fit the slot cap; nothing wraps, so headers will overlap.
    LabelOverflow { actor_index: usize, name: ActorName, width: usize, max_width: usize },
}

impl fmt::Display for LayoutWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::LabelOverflow { actor_index, name, .. } => {
                write!(f, "Label #{actor_index} ('{name}') is very large.")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LayoutOutcome {
    header_offset: usize,
    warnings: Vec<LayoutWarning>,
}

impl LayoutOutcome {
    /// Bottom edge of the tallest header; message rows start below it.
    pub fn header_offset(&self) -> usize {
        self.header_offset
    }

    pub fn warnings(&self) -> &[LayoutWarning] {
        &self.warnings
    }
}

/// Internal consistency failures. These indicate a broken `ParsedDiagram`, not bad user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutError {
    UnknownActor { instruction_index: usize, name: ActorName },
    AlreadyResolved { instruction_index: usize },
}

impl fmt::Display for LayoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownActor { instruction_index, name } => {
                write!(f, "instruction {instruction_index} references unknown actor '{name}'")
            }
            Self::AlreadyResolved { instruction_index } => {
                write!(f, "instruction {instruction_index} direction was already resolved")
            }
        }
    }
}

impl std::error::Error for LayoutError {}

/// Places actor headers and widens slots until every message label fits between its endpoints.
///
/// Mutates actor geometry and resolves each instruction's direction. Instructions are processed
/// in order, so later labels see slots already widened by earlier ones.
pub fn compute_layout(
    diagram: &mut ParsedDiagram,
    measure: &impl TextMeasure,
    config: &LayoutConfig,
) -> Result<LayoutOutcome, LayoutError> {
    let (registry, instructions) = diagram.parts_mut();
    if registry.is_empty() {
        return Ok(LayoutOutcome::default());
    }

    // Check everything up front so a rejected diagram keeps its previous geometry.
    let mut slots = Vec::with_capacity(instructions.len());
    for (instruction_index, instruction) in instructions.iter().enumerate() {
        if instruction.rightward().is_some() {
            return Err(LayoutError::AlreadyResolved { instruction_index });
        }
        slots.push((
            slot_index(registry, instruction.source(), instruction_index)?,
            slot_index(registry, instruction.target(), instruction_index)?,
        ));
    }

    let warnings = place_headers(registry, measure, config);

    for (instruction_index, (instruction, (source_idx, target_idx))) in
        instructions.iter_mut().zip(slots).enumerate()
    {
        let rightward = (target_idx > source_idx) ^ instruction.arrow().points_backward();
        instruction.resolve_direction(rightward);

        let required = if instruction.is_self_message() {
            measure.self_message_width(instruction.label())
        } else {
            measure.message_width(instruction.label())
        };
        let fits = ensure_label_room(
            registry,
            source_idx.min(target_idx),
            source_idx.max(target_idx),
            required,
        );
        if !fits {
            tracing::debug!(instruction_index, required, "widened slots for label");
        }
    }

    let header_offset = registry.iter().map(|actor| actor.bottom()).max().unwrap_or(0);
    Ok(LayoutOutcome { header_offset, warnings })
}

fn slot_index(
    registry: &ActorRegistry,
    name: &ActorName,
    instruction_index: usize,
) -> Result<usize, LayoutError> {
    registry
        .index_of(name)
        .ok_or_else(|| LayoutError::UnknownActor { instruction_index, name: name.clone() })
}

fn place_headers(
    registry: &mut ActorRegistry,
    measure: &impl TextMeasure,
    config: &LayoutConfig,
) -> Vec<LayoutWarning> {
    let max_slot_width = config.canvas_width / registry.len();
    let mut warnings = Vec::new();
    let mut offset_x = config.gutter;

    for idx in 0..registry.len() {
        let Some(actor) = registry.actor_at_mut(idx) else {
            continue;
        };
        let slot_width = measure.header_width(actor.name()) + 2 * config.gutter;

        if slot_width >= max_slot_width {
            tracing::warn!(
                actor = actor.name(),
                slot_width,
                max_slot_width,
                "actor header wider than its slot"
            );
            warnings.push(LayoutWarning::LabelOverflow {
                actor_index: idx,
                name: ActorName::new(actor.name()),
                width: slot_width,
                max_width: max_slot_width,
            });
        }

        actor.set_header_pos(offset_x, slot_width);
        actor.set_header_row(config.gutter, config.line_height);

        offset_x += slot_width + config.gutter;
    }

    warnings
}

/// Returns `true` when the current spacing already fits `required`; otherwise shifts the slot at
/// `max_idx` and everything after it right by the shortfall and returns `false`.
fn ensure_label_room(
    registry: &mut ActorRegistry,
    min_idx: usize,
    max_idx: usize,
    required: usize,
) -> bool {
    let last_idx = registry.len() - 1;
    let max_idx = if min_idx == max_idx {
        // A loop on the last actor has nothing to its right to push away.
        if min_idx == last_idx {
            return true;
        }
        min_idx + 1
    } else {
        max_idx
    };

    let initial_offset = mid_at(registry, min_idx);

    let fits = (min_idx..=max_idx)
        .any(|idx| mid_at(registry, idx).saturating_sub(initial_offset) > required);
    if fits {
        return true;
    }

    let extra = required.saturating_sub(mid_at(registry, max_idx).saturating_sub(initial_offset));
    for idx in max_idx..registry.len() {
        if let Some(actor) = registry.actor_at_mut(idx) {
            let (x, dx) = (actor.x(), actor.dx());
            actor.set_header_pos(x + extra, dx);
        }
    }

    false
}

fn mid_at(registry: &ActorRegistry, idx: usize) -> usize {
    registry.actor_at(idx).map_or(0, |actor| actor.mid())
}
