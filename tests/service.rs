use lib::chess::{Color, Move, Square};
use lib::eval::Evaluator;
use lib::game::Game;
use lib::search::Minimax;
use lib::service::{Service, ServiceError};
use lib::store::{InMemory, Snapshot};

fn service() -> Service<InMemory> {
    let engine = Minimax::with_depth(Evaluator::default(), 2);
    Service::with_engine(InMemory::default(), engine)
}

fn m(from: (u8, u8), to: (u8, u8)) -> Move {
    Move(Square::new(from.0, from.1), Square::new(to.0, to.1))
}

#[test]
fn a_game_can_be_played_against_the_engine_end_to_end() {
    let svc = service();

    svc.create("kasparov-machine").unwrap();
    assert_eq!(svc.names().unwrap(), vec!["kasparov-machine"]);

    // the player opens as White, the engine answers as Black
    svc.play("kasparov-machine", m((6, 4), (4, 4)), Some(Color::White))
        .unwrap();

    let (_, state) = svc.respond("kasparov-machine").unwrap();
    assert_eq!(state.turn, 0);
    assert_eq!(state.history.len(), 2);
    assert_eq!(state.cursor, 2);

    let legal = svc.moves("kasparov-machine", Square::new(6, 3)).unwrap();
    assert_eq!(legal.len(), 2);

    // the clock can be turned back and the position replayed
    let rewound = svc.seek("kasparov-machine", 0).unwrap();
    assert_eq!(rewound.board, Snapshot::from(&Game::default()).board);

    let replayed = svc.seek("kasparov-machine", 2).unwrap();
    assert_eq!(replayed.board, state.board);

    svc.delete("kasparov-machine").unwrap();
    assert!(svc.names().unwrap().is_empty());
}

#[test]
fn the_engine_grabs_a_hanging_queen() {
    let svc = service();
    svc.create("greed").unwrap();

    // 1. e4 d5 2. Qg4?? hangs the queen to the c8 bishop
    svc.play("greed", m((6, 4), (4, 4)), None).unwrap();
    svc.play("greed", m((1, 3), (3, 3)), None).unwrap();
    svc.play("greed", m((7, 3), (4, 6)), None).unwrap();

    let (reply, _) = svc.respond("greed").unwrap();
    assert_eq!(reply.whither(), Square::new(4, 6));
}

#[test]
fn out_of_turn_moves_are_rejected_unless_playing_both_sides() {
    let svc = service();
    svc.create("etiquette").unwrap();

    assert!(matches!(
        svc.play("etiquette", m((1, 4), (3, 4)), Some(Color::Black)),
        Err(ServiceError::OutOfTurn)
    ));

    svc.play("etiquette", m((6, 4), (4, 4)), None).unwrap();
    svc.play("etiquette", m((1, 4), (3, 4)), None).unwrap();
}

#[test]
fn branching_from_a_rewound_position_discards_the_future() {
    let svc = service();
    svc.create("branch").unwrap();

    svc.play("branch", m((6, 4), (4, 4)), None).unwrap();
    svc.play("branch", m((1, 4), (3, 4)), None).unwrap();

    svc.seek("branch", 0).unwrap();
    let state = svc.play("branch", m((6, 3), (4, 3)), None).unwrap();

    assert_eq!(state.history.len(), 1);
    assert!(matches!(
        svc.seek("branch", 2),
        Err(ServiceError::Cursor(_))
    ));
}
