// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Rapidseq-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Rapidseq and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::sync::OnceLock;

use regex::Regex;

use super::ParseError;
use crate::model::Arrow;

// Word runs are ASCII-only; the label is everything after `": "` and is kept verbatim.
const LINE_GRAMMAR: &str = concat!(
    r"^(/?(?:[A-Za-z0-9_]+ *)+/?)",
    r" (<=|<-|->|=>) +",
    r"(/?(?:[A-Za-z0-9_]+ *)+/?)",
    r": +(.+)$",
);

fn line_grammar() -> &'static Regex {
    static GRAMMAR: OnceLock<Regex> = OnceLock::new();
    GRAMMAR.get_or_init(|| Regex::new(LINE_GRAMMAR).expect("valid line grammar"))
}

/// One tokenized DSL line. Actor tokens still carry their lifecycle slashes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawInstruction<'a> {
    pub source: &'a str,
    pub arrow: Arrow,
    pub target: &'a str,
    pub label: &'a str,
}

/// Splits a single line into source token, arrow, target token and label.
pub fn tokenize_line(line: &str, line_no: usize) -> Result<RawInstruction<'_>, ParseError> {
    let malformed = || ParseError::MalformedLine { line_no };

    let captures = line_grammar().captures(line).ok_or_else(malformed)?;
    let (Some(source), Some(arrow), Some(target), Some(label)) =
        (captures.get(1), captures.get(2), captures.get(3), captures.get(4))
    else {
        return Err(malformed());
    };
    let arrow = Arrow::from_token(arrow.as_str()).ok_or_else(malformed)?;

    Ok(RawInstruction {
        source: source.as_str(),
        arrow,
        target: target.as_str(),
        label: label.as_str(),
    })
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{tokenize_line, RawInstruction};
    use crate::format::ParseError;
    use crate::model::Arrow;

    #[test]
    fn tokenizes_plain_message() {
        assert_eq!(
            tokenize_line("A -> B: hi", 1),
            Ok(RawInstruction { source: "A", arrow: Arrow::RightThin, target: "B", label: "hi" })
        );
    }

    #[test]
    fn keeps_lifecycle_slashes_and_multi_word_names() {
        let raw = tokenize_line("/Web Server <= Client/: 200 OK", 4).expect("tokenize");
        assert_eq!(raw.source, "/Web Server");
        assert_eq!(raw.arrow, Arrow::LeftThick);
        assert_eq!(raw.target, "Client/");
        assert_eq!(raw.label, "200 OK");
    }

    #[test]
    fn label_keeps_trailing_whitespace_and_colons() {
        let raw = tokenize_line("A => B:   key: value  ", 1).expect("tokenize");
        assert_eq!(raw.label, "key: value  ");
    }

    #[rstest]
    #[case::bad_arrow("A --> B: x")]
    #[case::missing_label_space("A -> B:x")]
    #[case::no_spaces_around_arrow("A->B: x")]
    #[case::missing_label("A -> B: ")]
    #[case::missing_colon("A -> B hi")]
    #[case::leading_garbage("# A -> B: x")]
    #[case::non_ascii_name("Ålice -> B: x")]
    #[case::whitespace_only("   ")]
    fn rejects_malformed_lines(#[case] line: &str) {
        assert_eq!(tokenize_line(line, 7), Err(ParseError::MalformedLine { line_no: 7 }));
    }
}
