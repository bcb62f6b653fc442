use kanji_2048::actuator::{build_game_page, ActuatorConfig, HtmlActuator, MessageState};
use kanji_2048::dom::Surface;
use kanji_2048::replay::{Replay, ReplayStep};
use kanji_2048::types::NumeralType;

const DEMO: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/demos/replay.jsonl");

fn actuator() -> HtmlActuator {
    HtmlActuator::new(build_game_page(4), ActuatorConfig::default()).unwrap()
}

fn inner_texts(act: &HtmlActuator) -> Vec<String> {
    let doc = act.surface();
    doc.query_selector_all(".tile-inner")
        .into_iter()
        .map(|el| doc.text_content(el))
        .collect()
}

#[test]
fn demo_script_loads() {
    let replay = Replay::load(DEMO).unwrap();
    assert_eq!(replay.len(), 7);
    assert!(matches!(replay.steps()[0].step, ReplayStep::Actuate { .. }));
    assert!(matches!(replay.steps()[3].step, ReplayStep::UpdateGrid { .. }));
    assert_eq!(replay.steps()[5].step, ReplayStep::Continue);
}

#[test]
fn demo_script_runs_to_a_lost_game() {
    let mut replay = Replay::load(DEMO).unwrap();
    let mut act = actuator();

    assert_eq!(replay.run_to_end(&mut act).unwrap(), 7);
    assert!(replay.is_finished());
    assert!(!act.has_pending_frames());
    assert_eq!(act.message_state(), MessageState::Lost);

    let html = act.surface().to_html();
    assert!(html.contains("game-message game-over"));
    assert!(!html.contains("game-won"));
    assert!(html.contains("<p>失敗</p>"));
    assert_eq!(act.surface().query_selector_all(".tile").len(), 16);
    assert_eq!(
        act.surface().text(act.containers().score),
        "貳壹零零零"
    );
}

#[test]
fn numeral_switch_rewrites_the_current_board() {
    let script = r#"{"op":"actuate","grid":{"size":2,"cells":[[{"value":2,"x":0,"y":0},null],[null,{"value":16,"x":1,"y":1}]]},"metadata":{"score":0,"bestScore":0,"numeralType":0}}"#;
    let mut replay = Replay::parse_str(script).unwrap();
    let mut act = HtmlActuator::new(build_game_page(2), ActuatorConfig::default()).unwrap();

    assert!(!replay.set_numerals(&mut act, NumeralType::Kanji).unwrap());

    replay.run_to_end(&mut act).unwrap();
    assert_eq!(inner_texts(&act), vec!["2", "16"]);

    assert!(replay.set_numerals(&mut act, NumeralType::Daiji).unwrap());
    assert_eq!(inner_texts(&act), vec!["貳", "壹陸"]);
    assert_eq!(act.numeral_type(), NumeralType::Daiji);
}

#[test]
fn numeral_switch_waits_while_a_render_is_queued() {
    let mut replay = Replay::load(DEMO).unwrap();
    let mut act = actuator();

    replay.apply_next(&mut act).unwrap();
    act.flush_frames();
    replay.apply_next(&mut act).unwrap();

    // The merge is still queued: the board on screen is the opening one.
    assert!(!replay.set_numerals(&mut act, NumeralType::Kanji).unwrap());
    assert_eq!(inner_texts(&act), vec!["貳", "貳"]);
}

#[test]
fn update_grid_step_against_a_different_board_fails_with_its_line() {
    let script = concat!(
        r#"{"op":"actuate","grid":{"size":2,"cells":[[{"value":2,"x":0,"y":0},null],[null,null]]},"metadata":{"score":0,"bestScore":0}}"#,
        "\n",
        r#"{"op":"updateGrid","grid":{"size":2,"cells":[[null,null],[null,null]]},"metadata":{"score":0,"bestScore":0}}"#,
        "\n"
    );
    let mut replay = Replay::parse_str(script).unwrap();
    let mut act = HtmlActuator::new(build_game_page(2), ActuatorConfig::default()).unwrap();

    let err = replay.run_to_end(&mut act).unwrap_err();
    assert!(err.to_string().contains("line 2"), "{}", err);
}
