//! Session flow: menu, game switching, end screen, faults and shutdown.

mod common;

use std::time::Duration;

use arcade::engine::{Direction, Flow};
use arcade::types::{Event, GameState};
use common::{steps, Arcade, Behavior, Rules};

#[test]
fn starts_in_menu_without_a_game() {
    let mut fx = Arcade::new();
    let a = fx.renderer("A", Behavior::Opens);
    fx.game("Pacman", Rules::scoring(10));
    fx.game("Snake", Rules::scoring(10));
    let mut orch = fx.orchestrator();

    orch.start(&a, None).unwrap();
    assert_eq!(orch.state(), GameState::Menu);
    assert_eq!(orch.modules().games.len(), 2);

    steps(&mut orch, 1);
    assert!(fx.script.saw_text("ARCADE"));
    assert!(fx.script.saw_text("game_pacman"));
}

#[test]
fn menu_selection_wraps_and_action_starts_the_game() {
    let mut fx = Arcade::new();
    let a = fx.renderer("A", Behavior::Opens);
    fx.game("Pacman", Rules::scoring(10));
    fx.game("Snake", Rules::scoring(10));
    let mut orch = fx.orchestrator();
    orch.start(&a, None).unwrap();

    fx.script.push([Event::MoveDown]);
    steps(&mut orch, 1);
    assert_eq!(orch.game_index(), 1);

    fx.script.push([Event::MoveDown]);
    steps(&mut orch, 1);
    assert_eq!(orch.game_index(), 0);

    fx.script.push([Event::MoveUp, Event::Action]);
    steps(&mut orch, 2);
    assert_eq!(orch.state(), GameState::Playing);
    assert_eq!(orch.game_name(), Some("Snake"));
}

#[test]
fn unknown_game_argument_falls_back_to_menu() {
    let mut fx = Arcade::new();
    let a = fx.renderer("A", Behavior::Opens);
    fx.game("Snake", Rules::scoring(10));
    let mut orch = fx.orchestrator();

    orch.start(&a, Some("pong")).unwrap();
    assert_eq!(orch.state(), GameState::Menu);
    assert!(orch.game_path().is_none());
}

#[test]
fn game_argument_may_be_a_path() {
    let mut fx = Arcade::new();
    let a = fx.renderer("A", Behavior::Opens);
    fx.game("Pacman", Rules::scoring(10));
    let snake = fx.game("Snake", Rules::scoring(10));
    let mut orch = fx.orchestrator();

    orch.start(&a, snake.to_str()).unwrap();
    assert_eq!(orch.game_index(), 1);
    assert_eq!(orch.game_name(), Some("Snake"));
}

#[test]
fn game_switch_commits_score_and_starts_neighbour() {
    let mut fx = Arcade::new();
    let a = fx.renderer("A", Behavior::Opens);
    fx.game("Pacman", Rules::scoring(10));
    fx.game("Snake", Rules::scoring(5));
    let mut orch = fx.orchestrator();

    orch.start(&a, Some("pacman")).unwrap();
    steps(&mut orch, 3);

    orch.switch_game(Direction::Next);
    assert_eq!(orch.game_index(), 1);
    assert_eq!(orch.game_name(), Some("Snake"));
    assert_eq!(orch.state(), GameState::Playing);
    assert_eq!(orch.high_scores().best("Pacman"), Some(30));
    assert_eq!(fx.script.count("Pacman:drop"), 1);

    fx.script.push([Event::NextGame]);
    steps(&mut orch, 1);
    assert_eq!(orch.game_index(), 0);
    assert_eq!(orch.game_name(), Some("Pacman"));
    assert_eq!(orch.game_score(), Some(0));
}

#[test]
fn failed_game_switch_degrades_to_menu() {
    let mut fx = Arcade::new();
    let a = fx.renderer("A", Behavior::Opens);
    fx.game("Pacman", Rules::scoring(10));
    fx.game(
        "Snake",
        Rules {
            fail_init: true,
            ..Rules::default()
        },
    );
    let mut orch = fx.orchestrator();

    orch.start(&a, Some("pacman")).unwrap();
    orch.switch_game(Direction::Prev);

    assert_eq!(orch.state(), GameState::Menu);
    assert!(orch.game_path().is_none());
    assert_eq!(orch.game_index(), 1);
    assert!(orch.renderer_is_open());
}

#[test]
fn switching_without_games_does_nothing() {
    let mut fx = Arcade::new();
    let a = fx.renderer("A", Behavior::Opens);
    let mut orch = fx.orchestrator();
    orch.start(&a, None).unwrap();

    orch.switch_game(Direction::Next);
    assert_eq!(orch.state(), GameState::Menu);
    assert_eq!(orch.game_index(), 0);
}

#[test]
fn menu_hotkey_keeps_handle_and_action_restarts() {
    let mut fx = Arcade::new();
    let a = fx.renderer("A", Behavior::Opens);
    fx.game("Snake", Rules::scoring(10));
    let mut orch = fx.orchestrator();
    orch.start(&a, Some("snake")).unwrap();
    steps(&mut orch, 3);

    fx.script.push([Event::Menu]);
    steps(&mut orch, 1);
    assert_eq!(orch.state(), GameState::Menu);
    assert!(orch.game_path().is_some());
    assert_eq!(orch.high_scores().best("Snake"), Some(30));

    fx.script.push([Event::Action]);
    steps(&mut orch, 1);
    assert_eq!(orch.state(), GameState::Playing);
    assert_eq!(orch.game_score(), Some(0));
    assert_eq!(fx.script.count("Snake:new"), 1);
    assert_eq!(fx.script.count("Snake:restart"), 1);
}

#[test]
fn gameplay_events_reach_the_game_and_pause_toggles() {
    let mut fx = Arcade::new();
    let a = fx.renderer("A", Behavior::Opens);
    fx.game("Snake", Rules::scoring(10));
    let mut orch = fx.orchestrator();
    orch.start(&a, Some("snake")).unwrap();

    fx.script.push([Event::MoveUp, Event::Pause]);
    steps(&mut orch, 2);
    assert_eq!(fx.script.count("Snake:moveUp"), 1);
    assert_eq!(fx.script.count("Snake:pause"), 0);
    assert_eq!(orch.state(), GameState::Paused);
    assert_eq!(orch.game_score(), Some(10));
    assert!(fx.script.saw_text("PAUSED"));

    steps(&mut orch, 2);
    assert_eq!(orch.game_score(), Some(10));

    fx.script.push([Event::Pause]);
    steps(&mut orch, 1);
    assert_eq!(orch.state(), GameState::Playing);
    assert_eq!(orch.game_score(), Some(20));
}

#[test]
fn end_screen_action_returns_to_menu() {
    let mut fx = Arcade::new();
    let a = fx.renderer("A", Behavior::Opens);
    fx.game(
        "Snake",
        Rules {
            end_at: Some((20, GameState::GameOver)),
            ..Rules::scoring(10)
        },
    );
    let mut orch = fx.orchestrator();
    orch.start(&a, Some("snake")).unwrap();

    // Two frames of play, then the end screen reads the third event.
    fx.script.push([Event::None, Event::None, Event::Action]);
    steps(&mut orch, 2);

    assert_eq!(orch.state(), GameState::Menu);
    assert_eq!(orch.high_scores().best("Snake"), Some(20));
    assert!(fx.script.saw_text("GAME OVER"));
    assert!(fx.script.saw_text("Final Score: 20"));
    assert!(orch.game_path().is_some());
}

#[test]
fn end_screen_pause_replays_the_same_game() {
    let mut fx = Arcade::new();
    let a = fx.renderer("A", Behavior::Opens);
    fx.game(
        "Snake",
        Rules {
            end_at: Some((20, GameState::Win)),
            ..Rules::scoring(10)
        },
    );
    let mut orch = fx.orchestrator();
    orch.start(&a, Some("snake")).unwrap();

    fx.script.push([Event::None, Event::None, Event::Pause]);
    steps(&mut orch, 2);

    assert_eq!(orch.state(), GameState::Playing);
    assert_eq!(orch.game_score(), Some(0));
    assert!(fx.script.saw_text("YOU WIN"));
    assert_eq!(fx.script.count("Snake:restart"), 1);
    assert_eq!(orch.high_scores().best("Snake"), Some(20));
}

#[test]
fn end_screen_waits_until_an_answer_arrives() {
    let mut fx = Arcade::new();
    let a = fx.renderer("A", Behavior::Opens);
    fx.game(
        "Snake",
        Rules {
            end_at: Some((10, GameState::GameOver)),
            ..Rules::scoring(10)
        },
    );
    let mut orch = fx.orchestrator();
    orch.start(&a, Some("snake")).unwrap();

    fx.script.push([
        Event::None,
        Event::MoveUp,
        Event::None,
        Event::NextGame,
        Event::Quit,
    ]);
    assert_eq!(orch.step().unwrap(), Flow::Exit);
    assert_eq!(fx.script.pending(), 0);
    assert!(!orch.renderer_is_open());
    assert_eq!(orch.high_scores().best("Snake"), Some(10));
}

#[test]
fn game_error_during_frame_returns_to_menu() {
    let mut fx = Arcade::new();
    let a = fx.renderer("A", Behavior::Opens);
    fx.game(
        "Snake",
        Rules {
            fail_update_at: Some(20),
            ..Rules::scoring(10)
        },
    );
    let mut orch = fx.orchestrator();
    orch.start(&a, Some("snake")).unwrap();

    steps(&mut orch, 3);

    assert_eq!(orch.state(), GameState::Menu);
    assert!(orch.game_path().is_none());
    assert_eq!(orch.high_scores().best("Snake"), Some(20));
    assert_eq!(fx.script.count("Snake:drop"), 1);
    assert!(orch.renderer_is_open());
}

#[test]
fn frame_delta_is_clamped() {
    let mut fx = Arcade::new();
    let a = fx.renderer("A", Behavior::Opens);
    fx.game("Snake", Rules::scoring(1));
    let mut orch = fx.orchestrator();
    orch.start(&a, Some("snake")).unwrap();
    let cap = orch.config().timing.max_frame_dt.as_secs_f32();

    std::thread::sleep(Duration::from_millis(60));
    steps(&mut orch, 3);

    let dts = fx.script.dts();
    assert_eq!(dts.len(), 3);
    assert_eq!(dts[0], cap);
    assert!(dts.iter().all(|&dt| dt <= cap));
}

#[test]
fn quit_ends_run_and_persists_scores() {
    let mut fx = Arcade::new();
    std::fs::write(&fx.config.high_score_file, "Pacman 80\nSnake 5\n").unwrap();
    let a = fx.renderer("A", Behavior::Opens);
    fx.game("Snake", Rules::scoring(10));
    let mut orch = fx.orchestrator();
    orch.start(&a, Some("snake")).unwrap();
    assert_eq!(orch.high_scores().best("Pacman"), Some(80));

    fx.script.push([Event::None, Event::None, Event::Quit]);
    orch.run().unwrap();

    assert_eq!(fx.high_score_text(), "Pacman 80\nSnake 20\n");
    assert!(!orch.renderer_is_open());
    assert_eq!(fx.script.count("A:close"), 1);
}

#[test]
fn run_ends_when_the_renderer_closes() {
    let mut fx = Arcade::new();
    let a = fx.renderer("A", Behavior::DiesAfterFirstFrame);
    let mut orch = fx.orchestrator();
    orch.start(&a, None).unwrap();

    orch.run().unwrap();
    assert!(fx.script.saw_text("ARCADE"));
}

#[test]
fn shutdown_runs_once() {
    let mut fx = Arcade::new();
    let a = fx.renderer("A", Behavior::Opens);
    fx.game("Snake", Rules::scoring(10));
    let mut orch = fx.orchestrator();
    orch.start(&a, Some("snake")).unwrap();
    steps(&mut orch, 2);

    orch.shutdown();
    orch.shutdown();
    drop(orch);

    assert_eq!(fx.script.count("A:close"), 1);
    assert_eq!(fx.script.count("Snake:drop"), 1);
    assert_eq!(fx.high_score_text(), "Snake 20\n");
}

#[test]
fn unstarted_orchestrator_leaves_score_file_alone() {
    let mut fx = Arcade::new();
    std::fs::write(&fx.config.high_score_file, "Pacman 80\n").unwrap();
    fx.renderer("A", Behavior::Opens);
    drop(fx.orchestrator());

    assert_eq!(fx.high_score_text(), "Pacman 80\n");
}
