use katarenga::{
    flip_horizontal, rotate_left, rotate_right, Board, BoardError, Cell, GameVariant, Player, Tile,
    DEFAULT_SQUARES,
};

fn default_layout() -> Board {
    let [a, b, c, d] = &DEFAULT_SQUARES;
    Board::from_squares([a, b, c, d])
}

#[test]
fn test_squares_fill_their_quadrants() {
    let board = default_layout();
    let [a, b, c, d] = &DEFAULT_SQUARES;
    assert_eq!((board.rows(), board.cols()), (8, 8));
    assert_eq!(board.tile((0, 0)), Some(a[0][0]));
    assert_eq!(board.tile((0, 4)), Some(b[0][0]));
    assert_eq!(board.tile((4, 0)), Some(c[0][0]));
    assert_eq!(board.tile((7, 7)), Some(d[3][3]));
    assert_eq!(board.tile((2, 5)), Some(b[2][1]));
    assert_eq!(board.occupied_count(), 0);
    assert_eq!(board.playable_count(), 64);
}

#[test]
fn test_rotations_and_flip() {
    // Rows are Blue, Green, Yellow, Red from top to bottom.
    let striped = DEFAULT_SQUARES[2];
    let right = rotate_right(&striped);
    let left = rotate_left(&striped);
    for r in 0..4 {
        assert_eq!(right[r], [Tile::Red, Tile::Yellow, Tile::Green, Tile::Blue]);
        assert_eq!(left[r], [Tile::Blue, Tile::Green, Tile::Yellow, Tile::Red]);
    }
    assert_eq!(left[0], [striped[0][3], striped[1][3], striped[2][3], striped[3][3]]);

    let flipped = flip_horizontal(&DEFAULT_SQUARES[3]);
    assert_eq!(flipped[0], [Tile::Blue, Tile::Green, Tile::Yellow, Tile::Red]);

    for square in DEFAULT_SQUARES.iter() {
        assert_eq!(rotate_left(&rotate_right(square)), *square);
        assert_eq!(flip_horizontal(&flip_horizontal(square)), *square);
        let full_turn = (0..4).fold(*square, |s, _| rotate_right(&s));
        assert_eq!(full_turn, *square);
    }
}

#[test]
fn test_border_and_corners() {
    let bordered = default_layout().with_border();
    assert_eq!((bordered.rows(), bordered.cols()), (10, 10));
    assert_eq!(bordered.tile((0, 0)), Some(Tile::TopCorner));
    assert_eq!(bordered.tile((0, 9)), Some(Tile::TopCorner));
    assert_eq!(bordered.tile((9, 0)), Some(Tile::BottomCorner));
    assert_eq!(bordered.tile((9, 9)), Some(Tile::BottomCorner));
    assert_eq!(bordered.tile((0, 5)), Some(Tile::Border));
    assert_eq!(bordered.tile((5, 9)), Some(Tile::Border));
    assert_eq!(bordered.tile((1, 1)), default_layout().tile((0, 0)));

    let codes = bordered.to_codes();
    assert_eq!(codes[0][0], 50);
    assert_eq!(codes[9][9], 60);
    assert_eq!(codes[0][1], 0);
    assert_eq!(bordered.playable_count(), 64);
}

#[test]
fn test_from_codes_checks_structure() {
    assert_eq!(Board::from_codes(&[]), Err(BoardError::Empty));
    assert_eq!(Board::from_codes(&[vec![]]), Err(BoardError::Empty));
    assert_eq!(
        Board::from_codes(&[vec![10, 20], vec![30]]),
        Err(BoardError::Ragged)
    );
    assert_eq!(
        Board::from_codes(&[vec![10, 7]]),
        Err(BoardError::InvalidCell(7))
    );

    let board = Board::from_codes(&[vec![11, 22], vec![30, 61]]).unwrap();
    assert_eq!(board.occupant((0, 0)), Some(Player::One));
    assert_eq!(board.occupant((0, 1)), Some(Player::Two));
    assert_eq!(board.occupant((1, 1)), Some(Player::One));
    assert_eq!(board.tile((1, 1)), Some(Tile::BottomCorner));
    assert_eq!(board.to_codes(), vec![vec![11, 22], vec![30, 61]]);
}

#[test]
fn test_occupants_change_but_tiles_do_not() {
    let mut board = GameVariant::Katarenga.standard_board().unwrap();
    let tile = board.tile((1, 1));
    board.set_occupant((1, 1), None).unwrap();
    board.set_occupant((1, 1), Some(Player::Two)).unwrap();
    assert_eq!(board.tile((1, 1)), tile);
    assert_eq!(board.occupant((1, 1)), Some(Player::Two));

    assert_eq!(
        board.set_occupant((0, 4), Some(Player::One)),
        Err(BoardError::Unplayable((0, 4)))
    );
    assert_eq!(
        board.set_occupant((10, 0), Some(Player::One)),
        Err(BoardError::OutOfBounds((10, 0)))
    );
    board.set_occupant((9, 0), Some(Player::One)).unwrap();
    assert_eq!(board.get((9, 0)), Some(Cell::new(Tile::BottomCorner, Some(Player::One))));

    let base = board.base();
    assert_eq!(base.occupied_count(), 0);
    assert_eq!(base.tile((1, 1)), tile);
}

#[test]
fn test_katarenga_setup() {
    let board = GameVariant::Katarenga.standard_board().unwrap();
    assert_eq!((board.rows(), board.cols()), (10, 10));
    for col in 1..=8 {
        assert_eq!(board.occupant((1, col)), Some(Player::One));
        assert_eq!(board.occupant((8, col)), Some(Player::Two));
    }
    assert_eq!(board.pieces(Player::One).len(), 8);
    assert_eq!(board.pieces(Player::Two).len(), 8);
    assert_eq!(board.occupant((0, 0)), None);
}

#[test]
fn test_congress_setup() {
    let board = GameVariant::Congress.standard_board().unwrap();
    assert_eq!((board.rows(), board.cols()), (8, 8));
    assert_eq!(
        board.pieces(Player::Two),
        vec![(0, 1), (0, 4), (1, 7), (3, 0), (4, 7), (6, 0), (7, 3), (7, 6)]
    );
    assert_eq!(
        board.pieces(Player::One),
        vec![(0, 3), (0, 6), (1, 0), (3, 7), (4, 0), (6, 7), (7, 1), (7, 4)]
    );
}

#[test]
fn test_isolation_setup_discards_pieces() {
    let mut layout = default_layout();
    layout.set_occupant((3, 3), Some(Player::One)).unwrap();
    let board = GameVariant::Isolation.setup(&layout).unwrap();
    assert_eq!(board.occupied_count(), 0);
    assert_eq!(board.tile((3, 3)), layout.tile((3, 3)));
}

#[test]
fn test_setup_rejects_bad_layouts() {
    let small = Board::filled(4, 8, Cell::empty(Tile::Blue));
    assert_eq!(
        GameVariant::Congress.setup(&small),
        Err(BoardError::WrongDimensions {
            expected: (8, 8),
            found: (4, 8)
        })
    );
    let bordered = default_layout().with_border();
    assert!(matches!(
        GameVariant::Katarenga.setup(&bordered),
        Err(BoardError::WrongDimensions { .. })
    ));

    // Any color mix is accepted, even a single color.
    let all_red = Board::filled(8, 8, Cell::empty(Tile::Red));
    assert!(GameVariant::Katarenga.setup(&all_red).is_ok());

    let mut rows: Vec<Vec<Cell>> = (0..8).map(|_| vec![Cell::empty(Tile::Red); 8]).collect();
    rows[0][0] = Cell::new(Tile::TopCorner, None);
    assert_eq!(
        GameVariant::Congress.setup(&Board::from_rows(rows).unwrap()),
        Err(BoardError::NotAColor((0, 0)))
    );

    let mut rows: Vec<Vec<Cell>> = (0..8).map(|_| vec![Cell::empty(Tile::Red); 8]).collect();
    rows[2][5] = Cell::BORDER;
    let holed = Board::from_rows(rows).unwrap();
    assert_eq!(
        GameVariant::Isolation.setup(&holed),
        Err(BoardError::NotAColor((2, 5)))
    );
}

#[test]
fn test_variant_ids() {
    for variant in GameVariant::ALL {
        assert_eq!(GameVariant::from_id(variant.id()), Some(variant));
    }
    assert_eq!(GameVariant::Katarenga.id(), 1);
    assert_eq!(GameVariant::Congress.id(), 2);
    assert_eq!(GameVariant::Isolation.id(), 3);
    assert_eq!(GameVariant::from_id(0), None);
    assert_eq!(GameVariant::from_id(4), None);
    assert_eq!(GameVariant::Katarenga.board_size(), (10, 10));
    assert_eq!(GameVariant::Isolation.board_size(), (8, 8));
}
