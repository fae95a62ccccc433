// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Rapidseq-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Rapidseq and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Rapidseq: sequence diagrams from a tiny arrow DSL.
//!
//! `format` turns text into a [`model::ParsedDiagram`], `layout` places actor slots and resolves
//! message directions, `render` paints box-drawing text. `app` wires the three together for the
//! CLI and the live editor in `tui`; `export` snapshots a layout as JSON.

pub mod app;
pub mod export;
pub mod format;
pub mod layout;
pub mod model;
pub mod render;
pub mod tui;
