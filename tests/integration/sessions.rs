//! REPL and session integration tests
//!
//! Drives the runtime layer with a scripted line editor.

use std::collections::VecDeque;
use std::path::PathBuf;

use tether::foundation::{Item, Value};
use tether::runtime::{LineEditor, ReadResult, Repl, ReplConfig, Session};
use tether::stdlib::standard_registry_with_items;

struct ScriptedEditor {
    lines: VecDeque<String>,
    history: Vec<String>,
}

impl ScriptedEditor {
    fn new(lines: &[&str]) -> Self {
        Self {
            lines: lines.iter().map(|l| (*l).to_string()).collect(),
            history: Vec::new(),
        }
    }
}

impl LineEditor for ScriptedEditor {
    fn read_line(&mut self, _prompt: &str) -> tether::runtime::Result<ReadResult> {
        Ok(self.lines.pop_front().map_or(ReadResult::Eof, ReadResult::Line))
    }

    fn add_history(&mut self, line: &str) {
        self.history.push(line.to_string());
    }

    fn set_commands(&mut self, _commands: Vec<String>) {}
}

fn repl(lines: &[&str], config: ReplConfig) -> Repl<ScriptedEditor> {
    let session = Session::with_catalog(tether::stdlib::standard_registry(), &config).capturing();
    Repl::with_editor(ScriptedEditor::new(lines), config).with_session(session)
}

#[test]
fn interactive_session() {
    let mut repl = repl(
        &[
            "select count",
            "frob",
            r#"select filter:bytag "light" map name"#,
            ":quit",
        ],
        ReplConfig::plain(),
    );
    repl.run().unwrap();

    let output = repl.session_mut().take_output();
    assert_eq!(output[0], "4");
    assert!(output[1].starts_with("error: unknown command 'frob'"));
    assert_eq!(output[2], r#"["lamp", "torch"]"#);
    assert_eq!(repl.session().evaluations(), 3);
    assert_eq!(repl.session().failures(), 1);
}

#[test]
fn json_session() {
    let mut repl = repl(&[], ReplConfig::plain().with_json_output(true));
    repl.execute("select first").unwrap();
    repl.execute("range 3").unwrap();
    let output = repl.session_mut().take_output();
    assert_eq!(output[0], r#"{"name":"lamp","tags":["brass","light"]}"#);
    assert_eq!(output[1], "[0.0,1.0,2.0]");
}

#[test]
fn script_files() {
    let path: PathBuf = std::env::temp_dir().join(format!("tether-script-{}.tt", std::process::id()));
    std::fs::write(
        &path,
        "# count the light sources\nselect filter:bytag \"light\" count\nselect frob\n",
    )
    .unwrap();

    let config = ReplConfig::plain();
    let session = Session::with_catalog(
        standard_registry_with_items([Item::new("candle").with_tag("light")]),
        &config,
    )
    .capturing();
    let mut repl = Repl::with_editor(ScriptedEditor::new(&[]), config).with_session(session);
    let report = repl.eval_file(&path).unwrap();
    let _ = std::fs::remove_file(&path);

    assert_eq!(report.pipelines, 2);
    assert_eq!(report.failures, 1);
    assert!(!report.succeeded());
    assert_eq!(repl.session_mut().take_output()[0], "1");
    assert_eq!(repl.eval("select first name"), Some(Value::text("candle")));
}
