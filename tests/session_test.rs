//! Session-loop tests against the in-process chat client.

use reaction_ttt::{
    ChannelChat, ChatError, GameSession, Mark, Participant, Position, ReactionEvent,
    SessionConfig, SessionController, SessionOutcome, symbols,
};
use std::time::Duration;
use tokio::sync::mpsc;

const ANA: u64 = 1;
const BEN: u64 = 2;

fn controller() -> SessionController {
    let session = GameSession::new(Participant::new(ANA, "ana"), Participant::new(BEN, "ben"));
    SessionController::with_config(
        session,
        SessionConfig {
            move_timeout: Duration::from_secs(60),
        },
    )
}

fn react(tx: &mpsc::UnboundedSender<ReactionEvent>, id: u64, pos: Position) {
    tx.send(ReactionEvent {
        participant_id: id,
        symbol: symbols::symbol_for(pos).to_string(),
    })
    .unwrap();
}

#[tokio::test]
async fn top_row_win_for_challenger() {
    let (mut chat, tx) = ChannelChat::new();
    react(&tx, ANA, Position::TopLeft);
    react(&tx, BEN, Position::MiddleLeft);
    react(&tx, ANA, Position::TopCenter);
    react(&tx, BEN, Position::Center);
    react(&tx, ANA, Position::TopRight);

    let outcome = controller().run(&mut chat, 0).await.unwrap();

    assert_eq!(outcome, SessionOutcome::Won(Mark::A));
    assert_eq!(chat.clear_calls(), 1);
    let embed = chat.last_message().unwrap();
    assert!(embed.description.contains("ana has won!"));
}

#[tokio::test]
async fn full_board_without_line_is_a_draw() {
    let (mut chat, tx) = ChannelChat::new();
    // Indices 0 2 1 4 5 3 6 8 7, alternating starting with ana: no line
    // ever completes.
    let script = [0, 2, 1, 4, 5, 3, 6, 8, 7];
    for (n, idx) in script.into_iter().enumerate() {
        let id = if n % 2 == 0 { ANA } else { BEN };
        react(&tx, id, Position::from_index(idx).unwrap());
    }

    let outcome = controller().run(&mut chat, 0).await.unwrap();

    assert_eq!(outcome, SessionOutcome::Draw);
    assert_eq!(chat.clear_calls(), 1);
    let embed = chat.last_message().unwrap();
    assert!(embed.description.contains("It's a draw!"));
}

#[tokio::test]
async fn consumed_symbol_is_rejected_without_turn_change() {
    let (mut chat, tx) = ChannelChat::new();
    react(&tx, ANA, Position::TopLeft);
    // ben tries the square ana just took.
    react(&tx, BEN, Position::TopLeft);
    drop(tx);

    let err = controller().run(&mut chat, 0).await.unwrap_err();

    // Event source closed with the game unfinished.
    assert_eq!(err, ChatError::Closed);
    // Only the accepted move triggered a render; the rejected event
    // changed nothing and ben is still the active player.
    assert_eq!(chat.edits(), 1);
    let embed = chat.last_message().unwrap();
    assert!(embed.description.contains("ben's turn!"));
}

#[tokio::test]
async fn foreign_participant_never_mutates_the_board() {
    let (mut chat, tx) = ChannelChat::new();
    let outsider = 99;
    react(&tx, outsider, Position::TopLeft);
    react(&tx, outsider, Position::Center);
    // ben reacting out of turn is just as foreign to the predicate.
    react(&tx, BEN, Position::Center);
    drop(tx);

    let err = controller().run(&mut chat, 0).await.unwrap_err();

    assert_eq!(err, ChatError::Closed);
    assert_eq!(chat.edits(), 0);
    let embed = chat.last_message().unwrap();
    assert!(embed.description.contains("ana's turn!"));
    assert!(embed.grid.chars().all(|c| c == '\u{2b1c}' || c == '\n'));
}

#[tokio::test]
async fn unknown_symbol_is_ignored() {
    let (mut chat, tx) = ChannelChat::new();
    tx.send(ReactionEvent {
        participant_id: ANA,
        symbol: "\u{1f600}".to_string(),
    })
    .unwrap();
    react(&tx, ANA, Position::Center);
    drop(tx);

    let err = controller().run(&mut chat, 0).await.unwrap_err();

    assert_eq!(err, ChatError::Closed);
    assert_eq!(chat.edits(), 1);
    let embed = chat.last_message().unwrap();
    assert!(embed.description.contains("ben's turn!"));
}

#[tokio::test(start_paused = true)]
async fn timeout_ends_the_session_silently() {
    let (mut chat, tx) = ChannelChat::new();

    let outcome = controller().run(&mut chat, 0).await.unwrap();

    assert_eq!(outcome, SessionOutcome::TimedOut);
    // Controls released exactly once, and no outcome announcement.
    assert_eq!(chat.clear_calls(), 1);
    assert_eq!(chat.edits(), 0);
    let embed = chat.last_message().unwrap();
    assert!(embed.description.contains("ana's turn!"));

    drop(tx);
}

#[tokio::test(start_paused = true)]
async fn invalid_events_do_not_extend_the_deadline() {
    let (mut chat, tx) = ChannelChat::new();
    let outsider = 99;

    let chat_task = async {
        controller().run(&mut chat, 0).await
    };
    let feeder = async {
        // A steady drip of foreign reactions, none of which should
        // keep the session alive.
        for _ in 0..10 {
            react(&tx, outsider, Position::Center);
            tokio::time::sleep(Duration::from_secs(10)).await;
        }
    };

    let (outcome, ()) = tokio::join!(chat_task, feeder);
    assert_eq!(outcome.unwrap(), SessionOutcome::TimedOut);
}

#[tokio::test]
async fn stale_message_aborts_the_session() {
    let (mut chat, tx) = ChannelChat::new();
    chat.fail_edits_from(0);
    react(&tx, ANA, Position::TopLeft);

    let outcome = controller().run(&mut chat, 0).await.unwrap();

    assert_eq!(outcome, SessionOutcome::Aborted);
    assert_eq!(chat.clear_calls(), 1);
    assert_eq!(chat.edits(), 0);
}

#[tokio::test]
async fn registered_controls_cover_all_nine_squares() {
    let (mut chat, tx) = ChannelChat::new();
    react(&tx, ANA, Position::TopLeft);
    drop(tx);

    let _ = controller().run(&mut chat, 0).await;

    // One control per square, registered row-major before any events
    // were processed, then cleared on teardown.
    assert_eq!(chat.registered_symbols(), &symbols::all_symbols()[..]);
    assert_eq!(chat.clear_calls(), 1);
}
