// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Rapidseq-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Rapidseq and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fs;
use std::path::{Path, PathBuf};

use rapidseq::app::{parse_and_layout, render_text};
use rapidseq::export::DiagramSnapshot;
use rapidseq::format::{build_instructions, ParseError};
use rapidseq::layout::{LayoutConfig, MonospaceMeasure};
use rapidseq::model::{ArrowWeight, LifecycleError, ParsedDiagram};
use rapidseq::render::RenderConfig;

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures").join("pipeline")
}

fn read_fixture(name: &str) -> String {
    let path = fixtures_dir().join(name);
    fs::read_to_string(&path).unwrap_or_else(|err| panic!("failed to read {path:?}: {err}"))
}

fn laid_out(text: &str) -> ParsedDiagram {
    let (diagram, _) = parse_and_layout(text, &MonospaceMeasure, &LayoutConfig::terminal(120))
        .unwrap_or_else(|err| panic!("expected {text:?} to lay out, got: {err}"));
    diagram
}

fn marks(diagram: &ParsedDiagram, name: &str) -> Vec<i64> {
    diagram.registry().get(name).expect("actor").existence().marks().to_vec()
}

#[test]
fn single_message_scenario() {
    let diagram = laid_out("A -> B: hi");

    assert_eq!(diagram.registry().order(), ["A", "B"]);
    assert_eq!(diagram.instructions().len(), 1);
    let instruction = &diagram.instructions()[0];
    assert_eq!(instruction.weight(), ArrowWeight::Thin);
    assert_eq!(instruction.label(), "hi");
    assert_eq!(instruction.rightward(), Some(true));
}

#[test]
fn direction_follows_slot_order_and_arrow() {
    let forward = laid_out("A -> B: x\nB -> C: y\nA -> C: z");
    assert_eq!(forward.instructions()[2].rightward(), Some(true));

    let backward = laid_out("A -> B: x\nB -> C: y\nA <- C: z");
    assert_eq!(backward.instructions()[2].rightward(), Some(false));
}

#[test]
fn terminating_an_open_actor_closes_its_interval() {
    let diagram = laid_out("A -> B: start\n/A -> B: end");
    assert_eq!(marks(&diagram, "A"), vec![1, -2]);
    assert_eq!(marks(&diagram, "B"), vec![1, -2]);
}

#[test]
fn terminating_an_actor_that_was_never_opened_fails() {
    let err = build_instructions("/A -> B: start\nA/ -> B: end").unwrap_err();
    assert_eq!(
        err,
        ParseError::Lifecycle(LifecycleError::BadTermination { name: "A".into(), line_no: 1 })
    );
}

#[test]
fn terminating_after_a_one_shot_fails() {
    let err = build_instructions("A => B/: go\n/B -> A: done").unwrap_err();
    assert_eq!(err.line_no(), 2);
    assert_eq!(err.to_string(), "Bad Termination of 'B' @ 2?");
}

#[test]
fn invalid_arrow_glyph_is_malformed_on_line_one() {
    let err = build_instructions("A --> B: x").unwrap_err();
    assert_eq!(err, ParseError::MalformedLine { line_no: 1 });
    assert_eq!(err.to_string(), "Line 1 malformed.");
}

#[test]
fn checkout_fixture_keeps_lifecycles_balanced() {
    let diagram = laid_out(&read_fixture("checkout.seq"));

    assert_eq!(diagram.registry().order(), ["Browser", "Shop", "Inventory", "Payments"]);
    assert_eq!(diagram.instructions().len(), 7);
    assert_eq!(marks(&diagram, "Inventory"), vec![2, -2, 3, -3]);
    assert_eq!(marks(&diagram, "Payments"), vec![4, -6]);
    assert_eq!(marks(&diagram, "Browser"), vec![1, -7]);
    for actor in diagram.registry().iter() {
        assert_eq!(actor.existence().len() % 2, 0, "{} left open", actor.name());
    }
}

#[test]
fn blank_line_stops_the_parse() {
    let diagram = laid_out(&read_fixture("handshake.seq"));
    assert_eq!(diagram.instructions().len(), 3);
    assert_eq!(diagram.line_count(), 3);
}

#[test]
fn layout_is_a_pure_function_of_the_text() {
    let text = read_fixture("checkout.seq");
    let first = laid_out(&text);
    let second = laid_out(&text);

    for (a, b) in first.registry().iter().zip(second.registry().iter()) {
        assert_eq!((a.x(), a.mid(), a.existence()), (b.x(), b.mid(), b.existence()));
    }
}

#[test]
fn labels_fit_between_their_endpoints() {
    let diagram = laid_out(&read_fixture("checkout.seq"));
    let registry = diagram.registry();

    for instruction in diagram.instructions() {
        if instruction.is_self_message() {
            continue;
        }
        let a = registry.get(instruction.source()).expect("source").mid();
        let b = registry.get(instruction.target()).expect("target").mid();
        assert!(
            a.abs_diff(b) >= instruction.label().chars().count(),
            "label {:?} does not fit",
            instruction.label()
        );
    }
}

#[test]
fn fixtures_render_to_box_drawing_text() {
    for case in ["checkout.seq", "handshake.seq"] {
        let render = RenderConfig::default();
        let rendered = render_text(
            &read_fixture(case),
            &render.measure(),
            &LayoutConfig::terminal(120),
            &render,
        )
        .unwrap_or_else(|err| panic!("expected {case} to render, got: {err}"));
        assert!(rendered.text.contains('┌'), "{case}:\n{}", rendered.text);
        assert!(!rendered.text.contains('…'), "{case} clipped a label:\n{}", rendered.text);
        assert!(rendered.warnings.is_empty(), "{case}: {:?}", rendered.warnings);
    }
}

#[test]
fn json_snapshot_round_trips_through_serde_json() {
    let (diagram, outcome) = parse_and_layout(
        &read_fixture("handshake.seq"),
        &MonospaceMeasure,
        &LayoutConfig::terminal(120),
    )
    .expect("layout");
    let json = DiagramSnapshot::capture(&diagram, &outcome).to_json_pretty().expect("json");
    let value: serde_json::Value = serde_json::from_str(&json).expect("valid json");

    assert_eq!(value["actors"][0]["name"], "Client");
    assert_eq!(value["instructions"][1]["arrow"], "<-");
    assert_eq!(value["instructions"][1]["rightward"], false);
}
