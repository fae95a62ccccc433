// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Rapidseq-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Rapidseq and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! DSL parsing.
//!
//! One instruction per line: `<actor> <arrow> <actor>: <label>` with arrows `->`, `<-`, `=>`,
//! `<=`. Actor tokens may carry a single leading (`/A`, close) or trailing (`A/`, one-shot)
//! lifecycle marker.

use std::fmt;

use crate::model::LifecycleError;

pub mod builder;
pub mod tokenizer;

pub use builder::build_instructions;
pub use tokenizer::{tokenize_line, RawInstruction};

/// User input errors. All of them abort the current parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    MalformedLine { line_no: usize },
    Lifecycle(LifecycleError),
}

impl ParseError {
    pub fn line_no(&self) -> usize {
        match self {
            Self::MalformedLine { line_no } => *line_no,
            Self::Lifecycle(err) => err.line_no(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedLine { line_no } => write!(f, "Line {line_no} malformed."),
            Self::Lifecycle(err) => fmt::Display::fmt(err, f),
        }
    }
}

impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::MalformedLine { .. } => None,
            Self::Lifecycle(err) => Some(err),
        }
    }
}

impl From<LifecycleError> for ParseError {
    fn from(value: LifecycleError) -> Self {
        Self::Lifecycle(value)
    }
}
