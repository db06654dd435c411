//! Tests for command parsing and notification rendering.

use strictly_duel::{Command, CommandError, GameOver, Mark, ServerMessage};

#[test]
fn test_parse_name_keeps_spaces() {
    assert_eq!(
        "NAME Ada Lovelace".parse::<Command>(),
        Ok(Command::Name("Ada Lovelace".to_string()))
    );
}

#[test]
fn test_parse_chat() {
    assert_eq!(
        "Chat good luck, have fun".parse::<Command>(),
        Ok(Command::Chat("good luck, have fun".to_string()))
    );
}

#[test]
fn test_parse_move() {
    assert_eq!("Move 2,1".parse::<Command>(), Ok(Command::Move { row: 2, col: 1 }));
}

#[test]
fn test_parse_move_out_of_range_left_to_board() {
    assert_eq!("Move 5,9".parse::<Command>(), Ok(Command::Move { row: 5, col: 9 }));
}

#[test]
fn test_parse_malformed_moves() {
    for line in ["Move 1", "Move a,b", "Move -1,0", "Move 1,2,3", "Move 1, 2", "Move "] {
        assert!(
            matches!(line.parse::<Command>(), Err(CommandError::MalformedMove(_))),
            "{line:?} should be malformed"
        );
    }
}

#[test]
fn test_parse_restart_exact() {
    assert_eq!("RESTART".parse::<Command>(), Ok(Command::Restart));
    assert!(matches!(
        "RESTART now".parse::<Command>(),
        Err(CommandError::Unknown(_))
    ));
}

#[test]
fn test_parse_unknown_and_empty() {
    assert_eq!("".parse::<Command>(), Err(CommandError::Empty));
    assert!(matches!("move 0,0".parse::<Command>(), Err(CommandError::Unknown(_))));
    assert!(matches!("NAME".parse::<Command>(), Err(CommandError::Unknown(_))));
}

#[test]
fn test_render_server_messages() {
    assert_eq!(ServerMessage::YouAre(Mark::X).to_string(), "You are X");
    assert_eq!(ServerMessage::YouAre(Mark::O).to_string(), "You are O");
    assert_eq!(ServerMessage::YourTurn.to_string(), "Your turn");
    assert_eq!(ServerMessage::OpponentsTurn.to_string(), "Opponent's turn");
    assert_eq!(
        ServerMessage::Move { mark: Mark::O, row: 2, col: 0 }.to_string(),
        "Move O 2,0"
    );
    assert_eq!(
        ServerMessage::Chat { name: "Ada".to_string(), text: "hi".to_string() }.to_string(),
        "Chat Ada: hi"
    );
    assert_eq!(
        ServerMessage::System("hello".to_string()).to_string(),
        "Chat System: hello"
    );
    assert_eq!(ServerMessage::ResetGame.to_string(), "RESET_GAME");
}

#[test]
fn test_render_game_over() {
    assert_eq!(
        ServerMessage::GameOver(GameOver::Won("Ada".to_string())).to_string(),
        "GAME_OVER Ada wins!"
    );
    assert_eq!(ServerMessage::GameOver(GameOver::Draw).to_string(), "GAME_OVER Draw!");
    assert_eq!(
        ServerMessage::GameOver(GameOver::OpponentDisconnected).to_string(),
        "GAME_OVER Opponent disconnected"
    );
}

#[test]
fn test_turn_notice() {
    assert_eq!(ServerMessage::turn_notice(Mark::X, Mark::X), ServerMessage::YourTurn);
    assert_eq!(ServerMessage::turn_notice(Mark::O, Mark::X), ServerMessage::OpponentsTurn);
}
