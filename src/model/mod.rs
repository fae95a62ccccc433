// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Rapidseq-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Rapidseq and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Core data model.
//!
//! A parsed diagram is an insertion-ordered actor registry plus the ordered instruction list.

pub mod actor;
pub mod instruction;
pub mod registry;

pub use actor::{Actor, ActorName, Existence};
pub use instruction::{Arrow, ArrowWeight, Instruction};
pub use registry::{ActorRegistry, LifecycleError};

/// Result of a successful parse: everything the layout engine and renderer need.
///
/// Rebuilt from scratch on every parse.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ParsedDiagram {
    registry: ActorRegistry,
    instructions: Vec<Instruction>,
    line_count: usize,
}

impl ParsedDiagram {
    pub fn new(registry: ActorRegistry, instructions: Vec<Instruction>, line_count: usize) -> Self {
        Self { registry, instructions, line_count }
    }

    pub fn registry(&self) -> &ActorRegistry {
        &self.registry
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    pub(crate) fn parts_mut(&mut self) -> (&mut ActorRegistry, &mut [Instruction]) {
        (&mut self.registry, &mut self.instructions)
    }

    pub fn line_count(&self) -> usize {
        self.line_count
    }
}
