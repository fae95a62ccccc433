// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Rapidseq-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Rapidseq and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Machine-readable snapshot of a laid-out diagram.

use serde::Serialize;

use crate::layout::{LayoutOutcome, LayoutWarning};
use crate::model::{Actor, ArrowWeight, Instruction, ParsedDiagram};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ActorSnapshot {
    pub name: String,
    pub x: usize,
    pub dx: usize,
    pub y: usize,
    pub dy: usize,
    pub mid: usize,
    /// Signed line marks: positive opens an existence interval, negative closes it.
    pub existence: Vec<i64>,
}

impl From<&Actor> for ActorSnapshot {
    fn from(actor: &Actor) -> Self {
        Self {
            name: actor.name().to_owned(),
            x: actor.x(),
            dx: actor.dx(),
            y: actor.y(),
            dy: actor.dy(),
            mid: actor.mid(),
            existence: actor.existence().marks().to_vec(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstructionSnapshot {
    pub source: String,
    pub target: String,
    pub arrow: &'static str,
    pub weight: ArrowWeight,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rightward: Option<bool>,
    pub label: String,
}

impl From<&Instruction> for InstructionSnapshot {
    fn from(instruction: &Instruction) -> Self {
        Self {
            source: instruction.source().to_string(),
            target: instruction.target().to_string(),
            arrow: instruction.arrow().as_token(),
            weight: instruction.weight(),
            rightward: instruction.rightward(),
            label: instruction.label().to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiagramSnapshot {
    pub line_count: usize,
    pub header_offset: usize,
    pub actors: Vec<ActorSnapshot>,
    pub instructions: Vec<InstructionSnapshot>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<LayoutWarning>,
}

impl DiagramSnapshot {
    /// Captures actors in registration order and instructions in line order.
    pub fn capture(diagram: &ParsedDiagram, outcome: &LayoutOutcome) -> Self {
        Self {
            line_count: diagram.line_count(),
            header_offset: outcome.header_offset(),
            actors: diagram.registry().iter().map(ActorSnapshot::from).collect(),
            instructions: diagram.instructions().iter().map(InstructionSnapshot::from).collect(),
            warnings: outcome.warnings().to_vec(),
        }
    }

    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}
