// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Rapidseq-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Rapidseq and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::tokenizer::tokenize_line;
use super::ParseError;
use crate::model::{ActorRegistry, Instruction, ParsedDiagram};

/// Parses the whole input into an ordered instruction list plus its actor registry.
///
/// Lines are numbered from 1. Parsing stops at the first empty line; anything after it is
/// ignored. The first bad line aborts the parse and nothing partial is returned. Existence
/// intervals still open at the end are closed on the last consumed line.
pub fn build_instructions(text: &str) -> Result<ParsedDiagram, ParseError> {
    let mut registry = ActorRegistry::default();
    let mut instructions = Vec::<Instruction>::new();
    let mut line_count = 0usize;

    for (idx, line) in text.lines().enumerate() {
        if line.is_empty() {
            tracing::debug!(line_no = idx + 1, "blank line ends the diagram");
            break;
        }

        let line_no = idx + 1;
        line_count = line_no;

        let raw = tokenize_line(line, line_no)?;
        let source = registry.register_reference(raw.source, line_no)?;
        let target = registry.register_reference(raw.target, line_no)?;
        instructions.push(Instruction::new(raw.arrow, source, target, raw.label));
    }

    registry.cap_existence(line_count);

    tracing::debug!(
        actors = registry.len(),
        instructions = instructions.len(),
        line_count,
        "parsed diagram"
    );
    Ok(ParsedDiagram::new(registry, instructions, line_count))
}

#[cfg(test)]
mod tests {
    use super::build_instructions;
    use crate::format::ParseError;
    use crate::model::{Arrow, ArrowWeight, LifecycleError};

    fn actor_names(text: &str) -> Vec<String> {
        let diagram = build_instructions(text).expect("parse");
        diagram.registry().order().iter().map(|name| name.to_string()).collect()
    }

    #[test]
    fn single_message_produces_two_actors_and_one_thin_instruction() {
        let diagram = build_instructions("A -> B: hi").expect("parse");
        assert_eq!(actor_names("A -> B: hi"), vec!["A", "B"]);
        assert_eq!(diagram.line_count(), 1);

        let [instruction] = diagram.instructions() else {
            panic!("expected one instruction");
        };
        assert_eq!(instruction.arrow(), Arrow::RightThin);
        assert_eq!(instruction.weight(), ArrowWeight::Thin);
        assert_eq!(instruction.source(), "A");
        assert_eq!(instruction.target(), "B");
        assert_eq!(instruction.label(), "hi");
        assert_eq!(instruction.rightward(), None);
    }

    #[test]
    fn actor_order_follows_first_appearance_source_then_target() {
        let text = "C -> A: one\nB <- A: two\nD => C: three";
        assert_eq!(actor_names(text), vec!["C", "A", "B", "D"]);
    }

    #[test]
    fn thick_arrows_are_detected_from_the_glyph() {
        let diagram = build_instructions("A => B: go\nA <= B: back").expect("parse");
        assert!(diagram.instructions().iter().all(|i| i.weight() == ArrowWeight::Thick));
    }

    #[test]
    fn open_intervals_are_capped_at_the_last_line() {
        let diagram =
            build_instructions("A -> B: start\n/A -> B: end\nB -> C: more").expect("parse");
        let registry = diagram.registry();
        assert_eq!(registry.get("A").unwrap().existence().marks(), &[1, -2]);
        assert_eq!(registry.get("B").unwrap().existence().marks(), &[1, -3]);
        assert_eq!(registry.get("C").unwrap().existence().marks(), &[3, -3]);
    }

    #[test]
    fn terminating_an_already_closed_actor_is_rejected() {
        let err = build_instructions("A => B: go\n/B -> A: done\n/B -> A: again").unwrap_err();
        assert_eq!(
            err,
            ParseError::Lifecycle(LifecycleError::BadTermination { name: "B".into(), line_no: 3 })
        );
    }

    #[test]
    fn terminating_a_never_opened_actor_is_rejected() {
        let err = build_instructions("A -> C: x\n/B -> A: done").unwrap_err();
        assert_eq!(err.to_string(), "Bad Termination of 'B' @ 2?");
    }

    #[test]
    fn malformed_line_aborts_with_its_line_number() {
        assert_eq!(
            build_instructions("A --> B: x"),
            Err(ParseError::MalformedLine { line_no: 1 })
        );
        let err = build_instructions("A -> B: ok\nnope").unwrap_err();
        assert_eq!(err.to_string(), "Line 2 malformed.");
    }

    #[test]
    fn blank_line_truncates_the_rest_of_the_input() {
        let diagram =
            build_instructions("A -> B: one\nB -> C: two\n\nthis is ignored").expect("parse");
        assert_eq!(diagram.instructions().len(), 2);
        assert_eq!(diagram.line_count(), 2);
        assert_eq!(diagram.registry().len(), 3);
    }

    #[test]
    fn crlf_input_parses_like_lf() {
        let diagram = build_instructions("A -> B: one\r\nB -> A: two\r\n").expect("parse");
        assert_eq!(diagram.instructions().len(), 2);
        assert_eq!(diagram.instructions()[1].label(), "two");
    }

    #[test]
    fn empty_input_yields_empty_diagram() {
        let diagram = build_instructions("").expect("parse");
        assert!(diagram.registry().is_empty());
        assert!(diagram.instructions().is_empty());
        assert_eq!(diagram.line_count(), 0);
    }
}
