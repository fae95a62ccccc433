// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Rapidseq-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Rapidseq and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;
use std::fmt;

use super::actor::{Actor, ActorName};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleError {
    /// `/name` with no interval open.
    BadTermination { name: ActorName, line_no: usize },
    /// `name/` while an interval is still open.
    BadOneShotNesting { name: ActorName, line_no: usize },
    /// `/name/`: leading and trailing markers on the same token.
    AmbiguousLifecycle { name: ActorName, line_no: usize },
}

impl LifecycleError {
    pub fn line_no(&self) -> usize {
        match self {
            Self::BadTermination { line_no, .. }
            | Self::BadOneShotNesting { line_no, .. }
            | Self::AmbiguousLifecycle { line_no, .. } => *line_no,
        }
    }
}

impl fmt::Display for LifecycleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadTermination { name, line_no } => {
                write!(f, "Bad Termination of '{name}' @ {line_no}?")
            }
            Self::BadOneShotNesting { name, line_no } => {
                write!(f, "Badly nested one off of '{name}' @ {line_no}?")
            }
            Self::AmbiguousLifecycle { name, line_no } => write!(
                f,
                "Ambiguous lifecycle marker on '{name}' @ {line_no}? \
                 (use '/{name}' or '{name}/', not both)"
            ),
        }
    }
}

impl std::error::Error for LifecycleError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Reference {
    Plain,
    Terminate,
    OneShot,
    Ambiguous,
}

impl Reference {
    fn classify(raw_token: &str) -> Self {
        let token = raw_token.trim();
        match (token.starts_with('/'), token.len() > 1 && token.ends_with('/')) {
            (false, false) => Self::Plain,
            (true, false) => Self::Terminate,
            (false, true) => Self::OneShot,
            (true, true) => Self::Ambiguous,
        }
    }
}

/// Actors of a single diagram, kept in first-reference order.
///
/// The order drives horizontal placement, so it is stored explicitly next to the lookup table
/// instead of relying on map iteration order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ActorRegistry {
    order: Vec<ActorName>,
    actors: BTreeMap<ActorName, Actor>,
}

impl ActorRegistry {
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn order(&self) -> &[ActorName] {
        &self.order
    }

    pub fn get(&self, name: &str) -> Option<&Actor> {
        self.actors.get(name)
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.order.iter().position(|candidate| candidate == name)
    }

    pub fn actor_at(&self, idx: usize) -> Option<&Actor> {
        self.order.get(idx).and_then(|name| self.actors.get(name))
    }

    pub(crate) fn actor_at_mut(&mut self, idx: usize) -> Option<&mut Actor> {
        let name = self.order.get(idx)?;
        self.actors.get_mut(name)
    }

    /// Actors in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Actor> + '_ {
        self.order.iter().filter_map(|name| self.actors.get(name))
    }

    /// Records one actor reference from an instruction and applies its lifecycle marker.
    ///
    /// Returns the sanitized identity.
    pub fn register_reference(
        &mut self,
        raw_token: &str,
        line_no: usize,
    ) -> Result<ActorName, LifecycleError> {
        let name = ActorName::new(raw_token.replace('/', "").trim());

        let actor = match self.actors.entry(name.clone()) {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => {
                self.order.push(name.clone());
                entry.insert(Actor::new(name.clone()))
            }
        };
        let existence = actor.existence_mut();

        match Reference::classify(raw_token) {
            Reference::Plain => {
                if existence.last_mark().map_or(true, |mark| mark < 0) {
                    existence.open(line_no);
                }
            }
            Reference::Terminate => {
                if !existence.is_open() {
                    return Err(LifecycleError::BadTermination { name, line_no });
                }
                existence.close(line_no);
            }
            Reference::OneShot => {
                if existence.is_open() {
                    return Err(LifecycleError::BadOneShotNesting { name, line_no });
                }
                existence.open(line_no);
                existence.close(line_no);
            }
            Reference::Ambiguous => {
                return Err(LifecycleError::AmbiguousLifecycle { name, line_no });
            }
        }

        Ok(name)
    }

    /// Closes every interval still open at end of input on `max_line_no`.
    pub fn cap_existence(&mut self, max_line_no: usize) {
        for name in &self.order {
            let Some(actor) = self.actors.get_mut(name) else {
                continue;
            };
            let existence = actor.existence_mut();
            if existence.is_open() && existence.last_mark().is_some_and(|mark| mark > 0) {
                existence.close(max_line_no);
            }
        }
    }
}
