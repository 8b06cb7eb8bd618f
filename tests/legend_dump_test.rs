//! The headless dump binary runs the demo scene and emits a valid stream.

use std::process::Command;

use subtile::adapter::{parse_message, ParsedMessage};

fn dump(args: &[&str]) -> Vec<ParsedMessage> {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_legend-dump"));
    for var in [
        "SUBTILE_TILE_SIZE",
        "SUBTILE_GRID_W",
        "SUBTILE_GRID_H",
        "SUBTILE_KEY_BUDGET",
        "SUBTILE_FIRST_KEY",
        "SUBTILE_EXACT_BLIT",
    ] {
        cmd.env_remove(var);
    }
    let output = cmd.args(args).output().unwrap();
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));
    String::from_utf8(output.stdout)
        .unwrap()
        .lines()
        .map(|line| parse_message(line).unwrap())
        .collect()
}

#[test]
fn dump_writes_map_then_one_legend_per_frame() {
    let messages = dump(&["3"]);
    // Blank legend at construction, backdrop frame, then three ticks.
    assert_eq!(messages.len(), 6);
    assert!(matches!(messages[0], ParsedMessage::Map(_)));
    assert!(messages[1..]
        .iter()
        .all(|m| matches!(m, ParsedMessage::Legend(_))));
    let seqs: Vec<u64> = messages.iter().map(|m| m.seq()).collect();
    assert_eq!(seqs, vec![1, 2, 3, 4, 5, 6]);
}

#[test]
fn changed_only_dump_sends_fewer_entries() {
    let entries = |messages: &[ParsedMessage]| -> usize {
        messages
            .iter()
            .map(|m| match m {
                ParsedMessage::Legend(l) => l.entries.len(),
                ParsedMessage::Map(_) => 0,
            })
            .sum()
    };
    let full = dump(&["5"]);
    let delta = dump(&["5", "--changed-only"]);
    assert_eq!(full.len(), delta.len());
    assert!(entries(&delta) < entries(&full));
}

#[test]
fn unknown_option_fails() {
    let status = Command::new(env!("CARGO_BIN_EXE_legend-dump"))
        .arg("--bogus")
        .output()
        .unwrap()
        .status;
    assert!(!status.success());
}
