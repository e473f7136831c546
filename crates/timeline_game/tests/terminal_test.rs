//! Scripted sessions against the terminal front-end.

use std::io::Cursor;
use timeline_core::{
    Category, Difficulty, GameConfig, GamePhase, GameSession, HistoricalEvent, InteractionMode,
};
use timeline_game::Terminal;

/// Events that all share one year, so every slot is correct.
fn same_year_pool(n: usize) -> Vec<HistoricalEvent> {
    (0..n)
        .map(|i| {
            HistoricalEvent::new(
                format!("tie-{i}"),
                format!("Tied event {i}"),
                1500,
                Category::Cultural,
                Difficulty::Easy,
            )
            .with_description("Happened the same year as the others")
        })
        .collect()
}

fn play(
    script: &str,
    pool: Vec<HistoricalEvent>,
    config: GameConfig,
    mode: InteractionMode,
) -> (String, GameSession) {
    let session = GameSession::new(pool, Some(1));
    let mut terminal = Terminal::new(
        Cursor::new(script.to_string()),
        Vec::new(),
        session,
        config,
        mode,
    );
    terminal.run().expect("terminal runs");
    let session = terminal.session().clone();
    let output = String::from_utf8(terminal.into_output()).expect("utf8");
    (output, session)
}

fn solo() -> GameConfig {
    GameConfig::new(1, 1, 1).with_player_names(vec!["Solo".to_string()])
}

#[test]
fn test_tap_flow_wins_solo_game() {
    let (output, session) = play(
        "select 1\nplace 0\nquit\n",
        same_year_pool(2),
        solo(),
        InteractionMode::Tap,
    );

    assert!(output.contains("Welcome to Timeline!"));
    assert!(output.contains("Selected \"Tied event"));
    assert!(output.contains("[0] before 1500 CE"));
    assert!(output.contains("Correct!"));
    assert!(output.contains("Game over!"));
    assert!(output.contains("1. Solo (turn 1)"));
    assert!(output.contains("Goodbye!"));
    assert_eq!(session.state().map(|s| s.phase()), Some(GamePhase::GameOver));
}

#[test]
fn test_drag_flow_commits_placement() {
    let (output, session) = play(
        "mode drag\ndrag 1 slot 1\n",
        same_year_pool(2),
        solo(),
        InteractionMode::Tap,
    );

    assert!(output.contains("Interaction mode: drag"));
    assert!(output.contains("Correct!"));
    let state = session.state().expect("started");
    assert_eq!(state.timeline().len(), 2);
    assert!(state.is_over());
}

#[test]
fn test_long_press_hides_hand_year() {
    let (output, _) = play(
        "hold hand 1\nhold timeline 1\n",
        same_year_pool(2),
        solo(),
        InteractionMode::Tap,
    );

    assert!(output.contains("(????)"));
    assert!(output.contains("(1500 CE)"));
    assert!(output.contains("Happened the same year as the others"));
}

#[test]
fn test_reorder_does_not_end_turn() {
    let config = GameConfig::new(1, 2, 1);
    let (output, session) = play("move 1 2\n", same_year_pool(3), config, InteractionMode::Drag);

    assert!(output.contains("Hand reordered."));
    assert_eq!(session.state().map(|s| s.turn_number()), Some(1));
}

#[test]
fn test_mode_mismatch_is_reported() {
    let (output, session) = play(
        "drag 1 slot 0\n",
        same_year_pool(2),
        solo(),
        InteractionMode::Tap,
    );
    assert!(output.contains("`drag` needs drag mode"));
    assert_eq!(session.state().map(|s| s.turn_number()), Some(1));

    let (output, _) = play("select 1\n", same_year_pool(2), solo(), InteractionMode::Drag);
    assert!(output.contains("need tap mode"));
}

#[test]
fn test_place_without_selection() {
    let (output, _) = play("place 0\n", same_year_pool(2), solo(), InteractionMode::Tap);
    assert!(output.contains("Select a card first"));
}

#[test]
fn test_bad_input_keeps_going() {
    let (output, _) = play(
        "dance\nselect zero\nshow\n",
        same_year_pool(2),
        solo(),
        InteractionMode::Tap,
    );
    assert!(output.contains("Unknown command: dance"));
    assert!(output.contains("Not a number: zero"));
    assert!(output.contains("Solo's hand:"));
}

#[test]
fn test_game_over_then_restart() {
    let script = "select 1\nplace 1\nselect 1\nrestart\nshow\n";
    let (output, session) = play(script, same_year_pool(2), solo(), InteractionMode::Tap);

    assert!(output.contains("The game is over. Type `restart` or `quit`."));
    assert!(output.contains("New game dealt."));
    assert_eq!(session.state().map(|s| s.phase()), Some(GamePhase::Playing));
}

#[test]
fn test_empty_hand_seat_passes() {
    // One card seeds the timeline, the first two seats get one each and
    // the third seat is dealt nothing.
    let config = GameConfig::new(3, 1, 1);
    let script = "select 1\nplace 0\nselect 1\nplace 0\n";
    let (output, session) = play(script, same_year_pool(3), config, InteractionMode::Tap);

    assert!(output.contains("Player 1 has emptied their hand! The round plays out."));
    assert!(output.contains("Player 3 has no cards and passes."));
    let state = session.state().expect("started");
    assert!(state.is_over());
    assert_eq!(state.winners().len(), 2);
}

#[test]
fn test_drag_past_the_last_slot_snaps_back() {
    let config = GameConfig::new(1, 2, 1);
    let (output, session) = play(
        "mode drag\ndrag 1 slot 99\n",
        same_year_pool(3),
        config,
        InteractionMode::Tap,
    );

    assert!(output.contains("Card returned to your hand."));
    assert!(!output.contains("Correct!"));
    let state = session.state().expect("started");
    assert_eq!(state.turn_number(), 1);
    assert_eq!(state.timeline().len(), 1);
    assert_eq!(state.players()[0].hand.len(), 2);
}

#[test]
fn test_drag_to_end_slot_appends() {
    let config = GameConfig::new(1, 2, 1);
    let (output, session) = play(
        "mode drag\ndrag 1 slot 1\n",
        same_year_pool(3),
        config,
        InteractionMode::Tap,
    );

    assert!(output.contains("Correct!"));
    let state = session.state().expect("started");
    assert_eq!(state.timeline().len(), 2);
    assert_eq!(state.players()[0].hand.len(), 1);
}

#[test]
fn test_emptied_hand_notice_with_shared_names() {
    let config = GameConfig::new(3, 1, 1).with_player_names(vec![
        "Ada".to_string(),
        "Ada".to_string(),
        "Cy".to_string(),
    ]);
    let (output, session) = play(
        "select 1\nplace 0\n",
        same_year_pool(4),
        config,
        InteractionMode::Tap,
    );

    assert_eq!(output.matches("Ada has emptied their hand!").count(), 1);
    assert_eq!(session.state().map(|s| s.current_player_index()), Some(1));
}

#[test]
fn test_no_cards_anywhere_is_reported() {
    let (output, session) = play("", same_year_pool(1), solo(), InteractionMode::Tap);

    assert!(output.contains("Solo has no cards and passes."));
    assert!(output.contains("No player has cards left. Type `restart` or `quit`."));
    assert_eq!(session.state().map(|s| s.phase()), Some(GamePhase::Playing));
}
