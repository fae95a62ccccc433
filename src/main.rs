// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Rapidseq-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Rapidseq and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Rapidseq CLI entrypoint.
//!
//! Reads a diagram from `<file>` (or stdin) and prints it as box-drawing text, or as a JSON layout
//! snapshot with `--json`. `--tui` opens the live editor instead.

use std::error::Error;
use std::io::{self, IsTerminal, Read};

use rapidseq::app::{parse_and_layout, render_text};
use rapidseq::export::DiagramSnapshot;
use rapidseq::layout::LayoutConfig;
use rapidseq::render::RenderConfig;
use tracing_subscriber::EnvFilter;

const DEFAULT_WIDTH: usize = 120;

fn print_usage(program: &str) {
    eprintln!(
        "Usage:\n  {program} [<file>] [--width <cells>] [--json]\n  {program} [<file>] --tui\n\nWithout <file> the diagram is read from stdin.\n--width sets the drawing width shared by all actor slots (default {DEFAULT_WIDTH}).\n--json prints the computed layout instead of the picture.\n--tui opens the live editor, seeded with <file> if given.\n\nSet RUST_LOG (e.g. RUST_LOG=debug) for diagnostics on stderr."
    );
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
struct CliOptions {
    file: Option<String>,
    json: bool,
    width: Option<usize>,
    tui: bool,
}

fn parse_options(mut args: impl Iterator<Item = String>) -> Result<CliOptions, ()> {
    let mut options = CliOptions::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--json" => {
                if options.json {
                    return Err(());
                }
                options.json = true;
            }
            "--tui" => {
                if options.tui {
                    return Err(());
                }
                options.tui = true;
            }
            "--width" => {
                if options.width.is_some() {
                    return Err(());
                }
                let raw = args.next().ok_or(())?;
                let width: usize = raw.parse().map_err(|_| ())?;
                if width == 0 {
                    return Err(());
                }
                options.width = Some(width);
            }
            "-" => {
                if options.file.is_some() {
                    return Err(());
                }
                options.file = Some(arg);
            }
            _ if arg.starts_with('-') => return Err(()),
            _ => {
                if options.file.is_some() {
                    return Err(());
                }
                options.file = Some(arg);
            }
        }
    }

    // The editor sizes itself from the terminal and has nothing to print.
    if options.tui && (options.json || options.width.is_some()) {
        return Err(());
    }
    // Raw mode owns stdin, so the editor can only be seeded from a file.
    if options.tui && options.file.as_deref() == Some("-") {
        return Err(());
    }

    Ok(options)
}

fn read_input(file: Option<&str>) -> io::Result<String> {
    match file {
        Some(path) if path != "-" => std::fs::read_to_string(path),
        _ => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            Ok(text)
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

fn main() {
    let result = (|| -> Result<(), Box<dyn Error>> {
        let mut args = std::env::args();
        let program = args.next().unwrap_or_else(|| "rapidseq".to_owned());

        let options = match parse_options(args) {
            Ok(options) => options,
            Err(()) => {
                print_usage(&program);
                std::process::exit(2);
            }
        };

        if options.tui {
            let text = match options.file.as_deref() {
                Some(path) => std::fs::read_to_string(path)?,
                None => String::new(),
            };
            return rapidseq::tui::run(&text);
        }

        init_tracing();

        if options.file.is_none() && io::stdin().is_terminal() {
            print_usage(&program);
            std::process::exit(2);
        }

        let text = read_input(options.file.as_deref())?;
        let layout = LayoutConfig::terminal(options.width.unwrap_or(DEFAULT_WIDTH));
        let render = RenderConfig::default();
        let measure = render.measure();

        if options.json {
            let (diagram, outcome) = parse_and_layout(&text, &measure, &layout)?;
            let snapshot = DiagramSnapshot::capture(&diagram, &outcome);
            println!("{}", snapshot.to_json_pretty()?);
            return Ok(());
        }

        let rendered = render_text(&text, &measure, &layout, &render)?;
        for warning in &rendered.warnings {
            eprintln!("rapidseq: {warning}");
        }
        println!("{}", rendered.text);
        Ok(())
    })();

    if let Err(err) = result {
        eprintln!("rapidseq: {err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::{parse_options, CliOptions};

    fn args(raw: &[&str]) -> impl Iterator<Item = String> {
        raw.iter().map(|arg| (*arg).to_owned()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn parses_empty_args() {
        let options = parse_options(std::iter::empty()).expect("parse options");
        assert_eq!(options, CliOptions::default());
    }

    #[test]
    fn parses_positional_file_and_flags_in_any_order() {
        let options =
            parse_options(args(&["--json", "flow.seq", "--width", "90"])).expect("parse options");
        assert_eq!(options.file.as_deref(), Some("flow.seq"));
        assert!(options.json);
        assert_eq!(options.width, Some(90));
        assert!(!options.tui);
    }

    #[test]
    fn parses_tui_with_seed_file() {
        let options = parse_options(args(&["flow.seq", "--tui"])).expect("parse options");
        assert!(options.tui);
        assert_eq!(options.file.as_deref(), Some("flow.seq"));
    }

    #[test]
    fn accepts_dash_for_stdin() {
        let options = parse_options(args(&["-"])).expect("parse options");
        assert_eq!(options.file.as_deref(), Some("-"));
    }

    #[test]
    fn rejects_unknown_args() {
        parse_options(args(&["--nope"])).unwrap_err();
    }

    #[test]
    fn rejects_duplicate_flags() {
        parse_options(args(&["--json", "--json"])).unwrap_err();
        parse_options(args(&["--tui", "--tui"])).unwrap_err();
        parse_options(args(&["--width", "10", "--width", "20"])).unwrap_err();
    }

    #[test]
    fn rejects_multiple_files() {
        parse_options(args(&["one", "two"])).unwrap_err();
    }

    #[test]
    fn rejects_bad_width_values() {
        parse_options(args(&["--width"])).unwrap_err();
        parse_options(args(&["--width", "wide"])).unwrap_err();
        parse_options(args(&["--width", "0"])).unwrap_err();
    }

    #[test]
    fn rejects_output_flags_with_tui() {
        parse_options(args(&["--tui", "--json"])).unwrap_err();
        parse_options(args(&["--width", "80", "--tui"])).unwrap_err();
    }

    #[test]
    fn rejects_stdin_seed_for_tui() {
        parse_options(args(&["--tui", "-"])).unwrap_err();
        parse_options(args(&["-", "--tui"])).unwrap_err();
    }
}
