use katarenga::victory::winner;
use katarenga::{
    apply_move, valid_moves, Board, Cell, GameSession, GameVariant, Move, Outcome, Player,
    RandomAi, Tile,
};
use rand::{rngs::SmallRng, SeedableRng};

const MAX_PLIES: usize = 500;

/// Play AI against AI on a hot-seat session. Returns the moves made and the
/// outcome, if the game ended within the ply limit.
fn self_play(variant: GameVariant, seed: u64) -> (Vec<Move>, Option<Outcome>) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut ai = RandomAi::new();
    let mut session = GameSession::local(variant);
    session.set_board(variant.standard_board().unwrap());
    session.start_game().unwrap();

    let mut history = Vec::new();
    while session.outcome().is_none() && history.len() < MAX_PLIES {
        let player = session.current_player();
        let board = session.board().unwrap().clone();
        let Some(mv) = ai.choose_move(&mut rng, &board, variant, player) else {
            break;
        };
        assert!(valid_moves(&board, variant, player).contains(&mv));
        session
            .make_move(mv)
            .unwrap_or_else(|e| panic!("{} rejected {} for {}: {}", variant, mv, player, e));
        history.push(mv);
    }
    (history, session.outcome())
}

#[test]
fn test_ai_plays_every_variant() {
    for variant in GameVariant::ALL {
        for seed in 0..4 {
            let (history, outcome) = self_play(variant, seed);
            assert!(!history.is_empty(), "{} seed {} made no move", variant, seed);
            if let Some(outcome) = outcome {
                assert!(matches!(outcome, Outcome::Winner(_)));
            }
        }
    }
}

#[test]
fn test_isolation_always_finishes() {
    for seed in 0..16 {
        let (history, outcome) = self_play(GameVariant::Isolation, seed);
        assert!(history.len() <= 64);
        assert!(history.iter().all(|mv| mv.from.is_none()));
        // The player who made the final placement wins.
        let last = if history.len() % 2 == 1 { Player::One } else { Player::Two };
        assert_eq!(outcome, Some(Outcome::Winner(last)), "seed {}", seed);
    }
}

#[test]
fn test_same_seed_same_game() {
    for variant in GameVariant::ALL {
        assert_eq!(self_play(variant, 42), self_play(variant, 42));
    }
}

#[test]
fn test_session_outcome_matches_final_position() {
    for variant in [GameVariant::Katarenga, GameVariant::Congress] {
        for seed in 0..4 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let mut ai = RandomAi::new();
            let mut board = variant.standard_board().unwrap();
            let mut session = GameSession::local(variant);
            session.set_board(board.clone());
            session.start_game().unwrap();
            let mut player = Player::One;
            for _ in 0..MAX_PLIES {
                let Some(mv) = ai.choose_move(&mut rng, &board, variant, player) else {
                    break;
                };
                apply_move(&mut board, player, mv).unwrap();
                session.make_move(mv).unwrap();
                assert_eq!(session.board(), Some(&board));
                let expected = winner(&board, variant, player).map(Outcome::Winner);
                assert_eq!(session.outcome(), expected);
                if expected.is_some() {
                    break;
                }
                player = player.opponent();
            }
        }
    }
}

#[test]
fn test_no_move_when_nothing_is_playable() {
    let mut rng = SmallRng::seed_from_u64(7);
    let mut ai = RandomAi::new();

    let full = Board::filled(8, 8, Cell::new(Tile::Red, Some(Player::Two)));
    assert_eq!(ai.choose_move(&mut rng, &full, GameVariant::Isolation, Player::One), None);

    // Player one owns no pawn on an empty board.
    let empty = Board::filled(8, 8, Cell::empty(Tile::Blue));
    assert_eq!(ai.choose_move(&mut rng, &empty, GameVariant::Congress, Player::One), None);

    let mut lone = empty.clone();
    lone.set_occupant((0, 0), Some(Player::One)).unwrap();
    let mv = ai.choose_move(&mut rng, &lone, GameVariant::Congress, Player::One).unwrap();
    assert_eq!(mv.from, Some((0, 0)));
    assert!([(0, 1), (1, 0), (1, 1)].contains(&mv.to));
}
