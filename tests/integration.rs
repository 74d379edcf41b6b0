//! Integration tests for the skirmish engine binary.
//!
//! Spawns the engine process, feeds it protocol commands on stdin, and
//! checks the response lines on stdout.

use std::io::{BufRead, Write};
use std::process::{Command, Stdio};

/// Sends a sequence of commands to the engine and collects stdout lines.
fn run_engine(commands: &[&str]) -> Vec<String> {
    let exe = env!("CARGO_BIN_EXE_skirmish");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to start skirmish");

    let mut stdin = child.stdin.take().unwrap();
    let stdout = child.stdout.take().unwrap();
    let reader = std::io::BufReader::new(stdout);

    for cmd in commands {
        writeln!(stdin, "{}", cmd).unwrap();
    }
    stdin.flush().unwrap();
    drop(stdin);

    let lines: Vec<String> = reader.lines().map(|l| l.unwrap()).collect();
    let status = child.wait().expect("failed to wait on child");
    assert!(status.success());
    lines
}

/// Swordsman on cell 0 facing an Undead on cell 9, both 20 attack / 5 defence.
fn duel(undead_health: f64) -> String {
    format!(
        concat!(
            r#"load {{"size":8,"turn":"ally","units":["#,
            r#"{{"cell":0,"archetype":"Swordsman","side":"ally","level":1,"attack":20.0,"defence":5.0,"health":100.0,"health_level":"high"}},"#,
            r#"{{"cell":9,"archetype":"Undead","side":"enemy","level":1,"attack":20.0,"defence":5.0,"health":{},"health_level":"normal"}}"#,
            r#"]}}"#
        ),
        undead_health
    )
}

#[test]
fn isready_response() {
    let lines = run_engine(&["isready", "quit"]);
    assert_eq!(lines, vec!["readyok"]);
}

#[test]
fn unknown_commands_are_ignored() {
    let lines = run_engine(&["fly away", "select", "", "isready"]);
    assert_eq!(lines, vec!["readyok"]);
}

#[test]
fn commands_need_a_game() {
    let lines = run_engine(&["select 0", "snapshot"]);
    assert_eq!(lines.len(), 2);
    assert!(lines.iter().all(|l| l.starts_with("error no_game:")));
}

#[test]
fn seeded_newgame_is_reproducible() {
    let a = run_engine(&["newgame 5", "snapshot"]);
    let b = run_engine(&["newgame 5", "snapshot"]);
    assert_eq!(a.len(), 1);
    assert!(a[0].starts_with("snapshot {"));
    assert_eq!(a, b);
}

#[test]
fn newgame_deploys_both_sides() {
    let lines = run_engine(&["newgame 11", "snapshot"]);
    let json = lines[0].strip_prefix("snapshot ").unwrap();
    let snap: serde_json::Value = serde_json::from_str(json).unwrap();
    let units = snap["units"].as_array().unwrap();
    assert_eq!(units.len(), 8);
    for unit in units {
        let col = unit["cell"].as_u64().unwrap() % 8;
        match unit["side"].as_str().unwrap() {
            "ally" => assert!(col < 2, "{}", unit),
            "enemy" => assert!(col >= 6, "{}", unit),
            other => panic!("unexpected side {}", other),
        }
    }
}

#[test]
fn attack_with_reply() {
    let load = duel(40.0);
    let lines = run_engine(&[&load, "select 0", "attack 9", "snapshot"]);
    assert_eq!(lines[0], "turn ally");
    assert!(lines[1].starts_with("selected 0 moves "), "{}", lines[1]);
    assert!(lines[1].contains(" attacks 9 reselect -"), "{}", lines[1]);
    assert_eq!(lines[2], "attacked 9 damage 15 died false");
    assert_eq!(lines[3], "reply attack 9 0 damage 15 died false");
    assert_eq!(lines[4], "turn ally");

    let json = lines[5].strip_prefix("snapshot ").unwrap();
    let snap: serde_json::Value = serde_json::from_str(json).unwrap();
    let health = |cell: u64| {
        snap["units"]
            .as_array()
            .unwrap()
            .iter()
            .find(|u| u["cell"] == cell)
            .map(|u| u["health"].as_f64().unwrap())
    };
    assert_eq!(health(9), Some(25.0));
    assert_eq!(health(0), Some(85.0));
}

#[test]
fn click_drives_a_turn() {
    let load = duel(40.0);
    let lines = run_engine(&[&load, "click 0", "click 1"]);
    assert!(lines[1].starts_with("selected 0 "), "{}", lines[1]);
    assert_eq!(lines[2], "moved 0 1");
    assert!(lines[3].starts_with("reply attack 9 1 "), "{}", lines[3]);
    assert_eq!(lines[4], "turn ally");
}

#[test]
fn killing_the_last_enemy_ends_the_game() {
    let load = duel(10.0);
    let lines = run_engine(&[&load, "select 0", "attack 9", "select 0"]);
    assert_eq!(lines[2], "attacked 9 damage 15 died true");
    assert_eq!(lines[3], "gameover ally");
    assert!(lines[4].starts_with("error game_already_over:"), "{}", lines[4]);
}

#[test]
fn rule_violations_are_reported() {
    let load = duel(40.0);
    let lines = run_engine(&[&load, "select 99", "select 9", "move 5", "select 0", "attack 1"]);
    assert!(lines[1].starts_with("error out_of_bounds:"), "{}", lines[1]);
    assert!(lines[2].starts_with("error not_your_turn:"), "{}", lines[2]);
    assert!(lines[3].starts_with("error no_active_selection:"), "{}", lines[3]);
    assert!(lines[5].starts_with("error illegal_attack_target:"), "{}", lines[5]);
}

#[test]
fn bad_snapshot_is_rejected() {
    let lines = run_engine(&["load {\"size\":8}", "snapshot"]);
    assert!(lines[0].starts_with("error load:"), "{}", lines[0]);
    assert!(lines[1].starts_with("error no_game:"), "{}", lines[1]);
}

#[test]
fn quit_stops_processing() {
    let lines = run_engine(&["quit", "isready"]);
    assert!(lines.is_empty());
}
