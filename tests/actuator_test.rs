use kanji_2048::actuator::{build_game_page, ActuatorConfig, ActuatorError, HtmlActuator, MessageState};
use kanji_2048::dom::{Document, Surface};
use kanji_2048::types::{Grid, Metadata, NumeralType, Position, Tile};

fn actuator() -> HtmlActuator {
    HtmlActuator::new(build_game_page(4), ActuatorConfig::default()).unwrap()
}

fn render(act: &mut HtmlActuator, grid: &Grid, metadata: Metadata) {
    act.actuate(grid, &metadata);
    act.run_animation_frame();
}

fn tile_wrappers(act: &HtmlActuator) -> Vec<String> {
    let doc = act.surface();
    doc.children(act.containers().tiles)
        .iter()
        .map(|&el| doc.class_name(el))
        .collect()
}

fn inner_texts(act: &HtmlActuator) -> Vec<String> {
    let doc = act.surface();
    doc.query_selector_all(".tile-inner")
        .into_iter()
        .map(|el| doc.text_content(el))
        .collect()
}

fn score_text(doc: &Document, act: &HtmlActuator) -> String {
    doc.text(act.containers().score).to_string()
}

#[test]
fn single_tile_in_plain_digits() {
    let mut act = actuator();
    let mut grid = Grid::new(4);
    grid.insert_tile(Tile::new(4, 0, 0)).unwrap();

    render(&mut act, &grid, Metadata::new(0, 0, NumeralType::Arabic));

    assert_eq!(tile_wrappers(&act), vec!["tile tile-4 tile-position-1-1 tile-new"]);
    assert_eq!(inner_texts(&act), vec!["4"]);
}

#[test]
fn single_tile_in_daiji() {
    let mut act = actuator();
    let mut grid = Grid::new(4);
    grid.insert_tile(Tile::new(4, 0, 0)).unwrap();

    render(&mut act, &grid, Metadata::new(0, 0, NumeralType::Daiji));

    assert_eq!(inner_texts(&act), vec!["肆"]);
}

#[test]
fn wrapper_count_is_occupied_cells_plus_merge_sources() {
    let mut act = actuator();
    let mut grid = Grid::new(4);
    let merged = Tile::new(4, 0, 0).merged_from(
        Tile::new(2, 0, 0).slid_from(0, 0),
        Tile::new(2, 0, 0).slid_from(1, 0),
    );
    grid.insert_tile(merged).unwrap();
    grid.insert_tile(Tile::new(2, 3, 3)).unwrap();
    grid.insert_tile(Tile::new(8, 2, 1).slid_from(2, 3)).unwrap();

    render(&mut act, &grid, Metadata::new(4, 4, NumeralType::Arabic));

    let expected: usize = grid.tiles().map(Tile::rendered_count).sum();
    assert_eq!(expected, 5);
    assert_eq!(tile_wrappers(&act).len(), expected);
}

#[test]
fn merge_sources_are_placed_before_the_result() {
    let mut act = actuator();
    let mut grid = Grid::new(4);
    let merged = Tile::new(4, 0, 0).merged_from(
        Tile::new(2, 0, 0).slid_from(0, 0),
        Tile::new(2, 0, 0).slid_from(1, 0),
    );
    grid.insert_tile(merged).unwrap();

    render(&mut act, &grid, Metadata::new(4, 4, NumeralType::Arabic));

    let wrappers = tile_wrappers(&act);
    assert_eq!(wrappers.len(), 3);
    assert_eq!(wrappers[0], "tile tile-2 tile-position-1-1");
    assert_eq!(wrappers[1], "tile tile-2 tile-position-2-1");
    assert_eq!(wrappers[2], "tile tile-4 tile-position-1-1 tile-merged");

    // Sources slide onto the merge cell one frame later.
    act.run_animation_frame();
    let wrappers = tile_wrappers(&act);
    assert_eq!(wrappers[0], "tile tile-2 tile-position-1-1");
    assert_eq!(wrappers[1], "tile tile-2 tile-position-1-1");
}

#[test]
fn previous_position_wins_over_merge_sources() {
    let mut act = actuator();
    let mut grid = Grid::new(4);
    let tile = Tile::new(4, 1, 0)
        .slid_from(3, 0)
        .merged_from(Tile::new(2, 1, 0), Tile::new(2, 1, 0));
    grid.insert_tile(tile).unwrap();

    render(&mut act, &grid, Metadata::new(0, 0, NumeralType::Arabic));

    assert_eq!(tile_wrappers(&act), vec!["tile tile-4 tile-position-4-1"]);
}

#[test]
fn super_tile_only_above_2048() {
    let mut act = actuator();
    let mut grid = Grid::new(4);
    grid.insert_tile(Tile::new(2048, 0, 0)).unwrap();
    grid.insert_tile(Tile::new(4096, 1, 0)).unwrap();

    render(&mut act, &grid, Metadata::new(0, 0, NumeralType::Daiji));

    let wrappers = tile_wrappers(&act);
    assert!(!wrappers[0].contains("tile-super"));
    assert!(wrappers[1].contains("tile-super"));
    assert_eq!(inner_texts(&act), vec!["貳零肆捌", "肆零玖陸"]);
}

#[test]
fn render_uses_the_grid_as_it_was_when_actuated() {
    let mut act = actuator();
    let mut grid = Grid::new(4);
    grid.insert_tile(Tile::new(2, 0, 0)).unwrap();

    act.actuate(&grid, &Metadata::new(0, 0, NumeralType::Arabic));
    grid.insert_tile(Tile::new(8, 0, 0)).unwrap();
    grid.insert_tile(Tile::new(2, 2, 2)).unwrap();
    act.run_animation_frame();

    assert_eq!(inner_texts(&act), vec!["2"]);
}

#[test]
fn repeated_actuation_replaces_the_tile_layer() {
    let mut act = actuator();
    let mut grid = Grid::new(4);
    grid.insert_tile(Tile::new(2, 0, 0)).unwrap();
    render(&mut act, &grid, Metadata::new(0, 0, NumeralType::Arabic));
    render(&mut act, &grid, Metadata::new(0, 0, NumeralType::Arabic));

    assert_eq!(tile_wrappers(&act).len(), 1);
}

#[test]
fn score_addition_only_when_score_rises() {
    let mut act = actuator();

    act.update_score(8);
    let doc = act.surface();
    let addition = doc.query_selector(".score-addition").unwrap();
    assert_eq!(doc.text_content(addition), "+捌");
    assert_eq!(score_text(doc, &act), "捌");

    act.update_score(8);
    assert!(act.surface().query_selector(".score-addition").is_none());

    act.update_score(4);
    assert!(act.surface().query_selector(".score-addition").is_none());
    assert_eq!(act.score(), 4);
}

#[test]
fn best_score_is_translated() {
    let mut act = actuator();
    act.update_best_score(128);
    let doc = act.surface();
    assert_eq!(doc.text_content(act.containers().best), "壹貳捌");
}

#[test]
fn clear_message_removes_both_outcomes() {
    for won in [true, false] {
        let mut act = actuator();
        act.message(won);
        act.clear_message();
        let doc = act.surface();
        let region = act.containers().message;
        assert!(!doc.has_class(region, "game-won"));
        assert!(!doc.has_class(region, "game-over"));
        assert_eq!(act.message_state(), MessageState::Hidden);
    }
}

#[test]
fn switching_outcome_keeps_classes_exclusive() {
    let mut act = actuator();
    act.message(true);
    act.message(false);

    let doc = act.surface();
    let region = act.containers().message;
    assert!(doc.has_class(region, "game-over"));
    assert!(!doc.has_class(region, "game-won"));
    assert_eq!(doc.text_content(act.containers().message_text), "失敗");
}

#[test]
fn terminated_games_show_their_outcome() {
    let grid = Grid::new(4);

    let mut act = actuator();
    render(&mut act, &grid, Metadata::new(0, 0, NumeralType::Arabic).game_over());
    assert_eq!(act.message_state(), MessageState::Lost);
    assert_eq!(act.surface().text_content(act.containers().message_text), "失敗");

    let mut act = actuator();
    render(&mut act, &grid, Metadata::new(0, 0, NumeralType::Arabic).game_won());
    assert_eq!(act.message_state(), MessageState::Won);
    assert_eq!(act.surface().text_content(act.containers().message_text), "勝利");

    let mut act = actuator();
    let mut metadata = Metadata::new(0, 0, NumeralType::Arabic);
    metadata.terminated = true;
    render(&mut act, &grid, metadata);
    assert_eq!(act.message_state(), MessageState::Hidden);
}

#[test]
fn continue_game_hides_the_message() {
    let mut act = actuator();
    render(&mut act, &Grid::new(4), Metadata::new(0, 0, NumeralType::Arabic).game_won());
    act.continue_game();
    let region = act.containers().message;
    assert!(!act.surface().has_class(region, "game-won"));
}

#[test]
fn update_grid_rewrites_text_in_place() {
    let mut act = actuator();
    let mut grid = Grid::new(4);
    grid.insert_tile(Tile::new(2048, 1, 2)).unwrap();
    grid.insert_tile(Tile::new(2, 3, 0)).unwrap();
    render(&mut act, &grid, Metadata::new(0, 0, NumeralType::Arabic));
    render(&mut act, &grid, Metadata::new(32, 64, NumeralType::Arabic));
    let wrappers_before = tile_wrappers(&act);

    act.update_grid(&grid, &Metadata::new(32, 64, NumeralType::Kanji))
        .unwrap();

    assert_eq!(act.numeral_type(), NumeralType::Kanji);
    assert_eq!(inner_texts(&act), vec!["二〇四八", "二"]);
    assert_eq!(tile_wrappers(&act), wrappers_before);

    let doc = act.surface();
    assert_eq!(doc.text_content(act.containers().score), "三二");
    assert_eq!(doc.text_content(act.containers().best), "六四");
    assert!(doc.query_selector(".score-addition").is_none());
    assert_eq!(act.score(), 32);
}

#[test]
fn update_grid_with_missing_tile_changes_nothing() {
    let mut act = actuator();
    let mut grid = Grid::new(4);
    grid.insert_tile(Tile::new(2, 0, 0)).unwrap();
    grid.insert_tile(Tile::new(4, 2, 3)).unwrap();
    render(&mut act, &grid, Metadata::new(0, 0, NumeralType::Arabic));

    let revision = act.surface().revision();
    grid.remove_tile(Position::new(2, 3));
    let err = act
        .update_grid(&grid, &Metadata::new(0, 0, NumeralType::Daiji))
        .unwrap_err();

    assert_eq!(err, ActuatorError::EmptyCell { x: 2, y: 3 });
    assert_eq!(act.surface().revision(), revision);
    assert_eq!(act.numeral_type(), NumeralType::Arabic);
}

#[test]
fn translate_kanji_follows_the_cached_mode() {
    let mut act = actuator();
    assert_eq!(act.translate_kanji(2048), "貳零肆捌");

    act.update_grid(&Grid::new(4), &Metadata::new(0, 0, NumeralType::Kanji))
        .unwrap();
    assert_eq!(act.translate_kanji(2048), "二〇四八");

    act.update_grid(&Grid::new(4), &Metadata::new(0, 0, NumeralType::Arabic))
        .unwrap();
    assert_eq!(act.translate_kanji(2048), "2048");
}

#[test]
fn frames_requested_during_a_frame_wait_for_the_next() {
    let mut act = actuator();
    let mut grid = Grid::new(4);
    grid.insert_tile(Tile::new(2, 1, 0).slid_from(0, 0)).unwrap();

    act.actuate(&grid, &Metadata::new(0, 0, NumeralType::Arabic));
    assert_eq!(act.pending_frame_tasks(), 1);
    assert_eq!(act.run_animation_frame(), 1);
    assert_eq!(act.pending_frame_tasks(), 1);
    assert_eq!(act.run_animation_frame(), 1);
    assert!(!act.has_pending_frames());
    assert_eq!(act.run_animation_frame(), 0);
}

#[test]
fn wire_metadata_without_numeral_type_renders_plain_digits() {
    let mut act = actuator();
    let metadata: Metadata = serde_json::from_str(r#"{"score": 12, "bestScore": 40}"#).unwrap();

    act.update_grid(&Grid::new(4), &metadata).unwrap();

    assert_eq!(act.numeral_type(), NumeralType::Arabic);
    assert_eq!(act.surface().text_content(act.containers().best), "40");
}
