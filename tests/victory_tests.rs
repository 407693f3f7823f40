use katarenga::victory::{
    analyze, blocked_winner, congress_winner, connected_components, corner_status, is_connected, is_safe,
    isolation_winner, katarenga_winner, pawn_counts, safe_cells, winner, VariantDetail,
};
use katarenga::{Board, Cell, Coord, GameVariant, Player, Tile};
use proptest::prelude::*;
use rand::{rngs::SmallRng, Rng, SeedableRng};

fn katarenga_empty() -> Board {
    GameVariant::Katarenga.standard_board().unwrap().base()
}

fn with_pieces(mut board: Board, one: &[Coord], two: &[Coord]) -> Board {
    for &at in one {
        board.set_occupant(at, Some(Player::One)).unwrap();
    }
    for &at in two {
        board.set_occupant(at, Some(Player::Two)).unwrap();
    }
    board
}

fn open_board(tile: Tile) -> Board {
    Board::filled(8, 8, Cell::empty(tile))
}

#[test]
fn test_katarenga_standard_board_is_not_over() {
    let board = GameVariant::Katarenga.standard_board().unwrap();
    assert_eq!(katarenga_winner(&board), None);
    assert_eq!(winner(&board, GameVariant::Katarenga, Player::One), None);
}

#[test]
fn test_katarenga_elimination() {
    let board = with_pieces(katarenga_empty(), &[(4, 4)], &[]);
    assert_eq!(katarenga_winner(&board), Some(Player::One));
    let board = with_pieces(katarenga_empty(), &[], &[(4, 4), (5, 5)]);
    assert_eq!(katarenga_winner(&board), Some(Player::Two));
}

#[test]
fn test_katarenga_needs_both_corners() {
    let board = with_pieces(katarenga_empty(), &[(9, 0)], &[(3, 3)]);
    assert_eq!(katarenga_winner(&board), None);
    let board = with_pieces(katarenga_empty(), &[(9, 0), (9, 9)], &[(3, 3)]);
    assert_eq!(katarenga_winner(&board), Some(Player::One));
    let board = with_pieces(katarenga_empty(), &[(5, 5)], &[(0, 0), (0, 9)]);
    assert_eq!(katarenga_winner(&board), Some(Player::Two));

    // Each player races towards their own pair of corners only.
    let board = with_pieces(katarenga_empty(), &[(0, 0), (0, 9)], &[(9, 0), (9, 9)]);
    assert_eq!(katarenga_winner(&board), None);
}

#[test]
fn test_katarenga_player_without_moves_loses() {
    // Player 1's only pawn sits in a corner, which has no movement rule.
    let board = with_pieces(katarenga_empty(), &[(9, 0)], &[(4, 4)]);
    assert_eq!(katarenga_winner(&board), None);
    assert_eq!(winner(&board, GameVariant::Katarenga, Player::Two), Some(Player::Two));
    assert_eq!(winner(&board, GameVariant::Katarenga, Player::One), None);
    assert_eq!(blocked_winner(&board, GameVariant::Katarenga, Player::One), None);
}

#[test]
fn test_congress_player_without_moves_loses() {
    let board = with_pieces(open_board(Tile::Blue), &[(0, 0), (5, 5)], &[]);
    assert_eq!(congress_winner(&board), None);
    assert_eq!(winner(&board, GameVariant::Congress, Player::One), Some(Player::One));

    let board = with_pieces(open_board(Tile::Blue), &[(0, 0), (5, 5)], &[(7, 0), (7, 7)]);
    assert_eq!(winner(&board, GameVariant::Congress, Player::One), None);
}

#[test]
fn test_congress_standard_board_is_not_over() {
    let board = GameVariant::Congress.standard_board().unwrap();
    assert_eq!(congress_winner(&board), None);
    assert_eq!(connected_components(&board, Player::One).len(), 8);
}

#[test]
fn test_congress_connected_group_wins() {
    let board = with_pieces(
        open_board(Tile::Blue),
        &[(2, 2), (2, 3), (3, 3), (4, 3)],
        &[(0, 0), (7, 7)],
    );
    assert!(is_connected(&board, Player::One));
    assert!(!is_connected(&board, Player::Two));
    assert_eq!(congress_winner(&board), Some(Player::One));

    // Diagonal contact does not connect.
    let board = with_pieces(open_board(Tile::Blue), &[(2, 2), (3, 3)], &[(0, 0), (7, 7)]);
    assert_eq!(congress_winner(&board), None);
}

#[test]
fn test_congress_player_without_pieces_is_skipped() {
    let board = with_pieces(open_board(Tile::Red), &[], &[(5, 5), (5, 6)]);
    assert_eq!(congress_winner(&board), Some(Player::Two));
    assert_eq!(congress_winner(&open_board(Tile::Red)), None);
}

#[test]
fn test_congress_tie_goes_to_player_one() {
    let board = with_pieces(open_board(Tile::Green), &[(0, 0), (0, 1)], &[(7, 7), (6, 7)]);
    assert!(is_connected(&board, Player::Two));
    assert_eq!(congress_winner(&board), Some(Player::One));
}

#[test]
fn test_isolation_empty_board_is_safe_everywhere() {
    let board = open_board(Tile::Yellow);
    assert_eq!(safe_cells(&board).len(), 64);
    assert_eq!(isolation_winner(&board, Player::One), None);
}

#[test]
fn test_isolation_full_board_goes_to_last_mover() {
    let full = Board::filled(8, 8, Cell::new(Tile::Blue, Some(Player::One)));
    assert_eq!(isolation_winner(&full, Player::Two), Some(Player::Two));
    assert_eq!(isolation_winner(&full, Player::One), Some(Player::One));
    assert_eq!(winner(&full, GameVariant::Isolation, Player::Two), Some(Player::Two));
}

#[test]
fn test_isolation_no_safe_cell_goes_to_last_mover() {
    // Nine kings cover every empty cell of an all-blue board.
    let kings = [
        (1, 1),
        (1, 4),
        (1, 7),
        (4, 1),
        (4, 4),
        (4, 7),
        (7, 1),
        (7, 4),
        (7, 7),
    ];
    let board = with_pieces(open_board(Tile::Blue), &kings[..5], &kings[5..]);
    assert!(safe_cells(&board).is_empty());
    assert_eq!(isolation_winner(&board, Player::Two), Some(Player::Two));

    let mut open = board.clone();
    open.set_occupant((7, 7), None).unwrap();
    assert!(is_safe(&open, (7, 7)));
    assert_eq!(isolation_winner(&open, Player::One), None);
}

#[test]
fn test_safety_counts_both_players() {
    let board = with_pieces(open_board(Tile::Red), &[(3, 3)], &[]);
    // Red next to red only reaches adjacent cells.
    assert!(!is_safe(&board, (3, 4)));
    assert!(!is_safe(&board, (2, 3)));
    assert!(is_safe(&board, (3, 5)));
    assert!(!is_safe(&board, (3, 3)), "occupied cells are not safe");
    assert!(!is_safe(&board, (8, 8)));
}

#[test]
fn test_analysis() {
    let board = GameVariant::Katarenga.standard_board().unwrap();
    let counts = pawn_counts(&board);
    assert_eq!((counts.one, counts.two), (8, 8));
    assert_eq!(counts.of(Player::Two), 8);

    let corners = corner_status(&board).unwrap();
    assert_eq!(corners.top, [None, None]);
    assert_eq!(corners.bottom, [None, None]);
    assert_eq!(corner_status(&open_board(Tile::Blue)), None);

    let info = analyze(&board, GameVariant::Katarenga, Player::Two);
    assert_eq!(info.size, (10, 10));
    assert_eq!(info.current_player, Player::Two);
    assert!(matches!(info.detail, VariantDetail::Katarenga { corners: Some(_) }));

    let info = analyze(&open_board(Tile::Blue), GameVariant::Isolation, Player::One);
    assert_eq!(
        info.detail,
        VariantDetail::Isolation {
            safe_cells: 64,
            empty_cells: 64
        }
    );

    let congress = GameVariant::Congress.standard_board().unwrap();
    let info = analyze(&congress, GameVariant::Congress, Player::One);
    assert_eq!(info.detail, VariantDetail::Congress { groups: [8, 8] });
}

/// Reference connectivity by union-find over orthogonal neighbours.
fn union_find_connected(cells: &[Coord]) -> bool {
    fn find(parent: &mut Vec<usize>, i: usize) -> usize {
        if parent[i] != i {
            let root = find(parent, parent[i]);
            parent[i] = root;
        }
        parent[i]
    }
    let mut parent: Vec<usize> = (0..cells.len()).collect();
    for i in 0..cells.len() {
        for j in i + 1..cells.len() {
            let (a, b) = (cells[i], cells[j]);
            if a.0.abs_diff(b.0) + a.1.abs_diff(b.1) == 1 {
                let (ra, rb) = (find(&mut parent, i), find(&mut parent, j));
                parent[ra] = rb;
            }
        }
    }
    let roots: std::collections::HashSet<usize> =
        (0..cells.len()).map(|i| find(&mut parent, i)).collect();
    roots.len() == 1
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn congress_win_iff_single_group(seed in any::<u64>(), density in 1u32..6) {
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = open_board(Tile::Blue);
        for r in 0..8 {
            for c in 0..8 {
                if rng.random_ratio(density, 16) {
                    board.set_occupant((r, c), Some(Player::One)).unwrap();
                }
            }
        }
        let pieces = board.pieces(Player::One);
        prop_assume!(!pieces.is_empty());
        let expected = union_find_connected(&pieces);
        prop_assert_eq!(is_connected(&board, Player::One), expected);
        prop_assert_eq!(congress_winner(&board) == Some(Player::One), expected);
        prop_assert_eq!(connected_components(&board, Player::One).len() == 1, expected);
        let total: usize = connected_components(&board, Player::One).iter().map(Vec::len).sum();
        prop_assert_eq!(total, pieces.len());
    }
}
