// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Rapidseq-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Rapidseq and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use serde::Serialize;

use super::actor::ActorName;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrowWeight {
    Thin,
    Thick,
}

/// The four arrow glyphs of the DSL.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Arrow {
    /// `<=`
    LeftThick,
    /// `<-`
    LeftThin,
    /// `->`
    RightThin,
    /// `=>`
    RightThick,
}

impl Arrow {
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "<=" => Some(Self::LeftThick),
            "<-" => Some(Self::LeftThin),
            "->" => Some(Self::RightThin),
            "=>" => Some(Self::RightThick),
            _ => None,
        }
    }

    pub fn as_token(self) -> &'static str {
        match self {
            Self::LeftThick => "<=",
            Self::LeftThin => "<-",
            Self::RightThin => "->",
            Self::RightThick => "=>",
        }
    }

    pub fn weight(self) -> ArrowWeight {
        if self.as_token().contains('=') {
            ArrowWeight::Thick
        } else {
            ArrowWeight::Thin
        }
    }

    /// `<-` and `<=` point from the target back towards the source.
    pub fn points_backward(self) -> bool {
        self.as_token().starts_with('<')
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Instruction {
    arrow: Arrow,
    source: ActorName,
    target: ActorName,
    label: String,
    rightward: Option<bool>,
}

impl Instruction {
    pub fn new(
        arrow: Arrow,
        source: ActorName,
        target: ActorName,
        label: impl Into<String>,
    ) -> Self {
        Self { arrow, source, target, label: label.into(), rightward: None }
    }

    pub fn arrow(&self) -> Arrow {
        self.arrow
    }

    pub fn weight(&self) -> ArrowWeight {
        self.arrow.weight()
    }

    pub fn source(&self) -> &ActorName {
        &self.source
    }

    pub fn target(&self) -> &ActorName {
        &self.target
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn is_self_message(&self) -> bool {
        self.source == self.target
    }

    /// Whether the arrowhead points towards increasing slot index.
    ///
    /// `None` until the layout pass has resolved it.
    pub fn rightward(&self) -> Option<bool> {
        self.rightward
    }

    pub(crate) fn resolve_direction(&mut self, rightward: bool) {
        self.rightward = Some(rightward);
    }
}
