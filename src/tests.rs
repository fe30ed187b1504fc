use crate::{
    game::{
        board::Board,
        colour::Colour,
        piece::{Piece, PieceKind},
    },
    pgn::{load::collect_movetext, GameResult, MoveText, PlayerMove},
    replay::{Played, ReplayConfig, Replayer},
    square::{File, Rank, Square},
};

const FISCHER_SPASSKY: &str = r#"
[Event "F/S Return Match"]
[Site "Belgrade, Serbia JUG"]
[Date "1992.11.04"]
[Round "29"]
[White "Fischer, Robert J."]
[Black "Spassky, Boris V."]
[Result "1/2-1/2"]

1.e4 e5 2.Nf3 Nc6 3.Bb5 {This opening is called the Ruy Lopez.} a6
4.Ba4 Nf6 5.O-O Be7 6.Re1 b5 7.Bb3 d6 8.c3 O-O 9.h3 Nb8 10.d4 Nbd7
11.c4 c6 12.cxb5 axb5 13.Nc3 Bb7 14.Bg5 b4 15.Nb1 h6 16.Bh4 c5 17.dxe5
Nxe4 18.Bxe7 Qxe7 19.exd6 Qf6 20.Nbd2 Nxd6 21.Nc4 Nxc4 22.Bxc4 Nb6
23.Ne5 Rae8 24.Bxf7+ Rxf7 25.Nxf7 Rxe1+ 26.Qxe1 Kxf7 27.Qe3 Qg5 28.Qxg5
hxg5 29.b3 Ke6 30.a3 Kd6 31.axb4 cxb4 32.Ra5 Nd5 33.f3 Bc8 34.Kf2 Bf5
35.Ra7 g6 36.Ra6+ Kc5 37.Ke1 Nf4 38.g3 Nxh3 39.Kd2 Kb5 40.Rd6 Kc5 41.Ra6
Nf2 42.g4 Bd3 43.Re6 1/2-1/2
"#;

fn sq(s: &str) -> Square {
    s.parse().unwrap()
}

fn piece(code: &str) -> Piece {
    let colour = match &code[..1] {
        "w" => Colour::White,
        _ => Colour::Black,
    };
    let kind = match &code[1..] {
        "P" => PieceKind::Pawn,
        "N" => PieceKind::Knight,
        "B" => PieceKind::Bishop,
        "R" => PieceKind::Rook,
        "Q" => PieceKind::Queen,
        _ => PieceKind::King,
    };
    Piece::new(kind, colour)
}

fn occupied(board: &Board) -> Vec<Square> {
    Square::iter()
        .filter(|square| !board.is_empty_at(*square))
        .collect()
}

fn assert_position(board: &Board, expected: &[(&str, &str)]) {
    for (square, code) in expected {
        assert_eq!(
            board.piece_on(sq(square)),
            Some(piece(code)),
            "Wrong piece on {square}\n{board}"
        );
    }
    assert_eq!(occupied(board).len(), expected.len(), "\n{board}");
}

/// Plays a game one move at a time, checking that pieces only ever appear on
/// the squares a move targets.
fn replay_checked(movetext: &mut MoveText) -> Board {
    let mut replayer = Replayer::new(ReplayConfig::new());
    for mv in movetext.player_moves_mut() {
        let before = replayer.board().clone();
        let played = replayer.play(mv).unwrap();
        let after = replayer.board();
        let allowed: Vec<Square> = match played {
            Played::Moved { target, .. } => vec![target],
            Played::Castled(colour, side) => {
                let rank = if colour.is_white() {
                    Rank::One
                } else {
                    Rank::Eight
                };
                let (king_file, rook_file) = side.destination_files();
                vec![Square::new(king_file, rank), Square::new(rook_file, rank)]
            }
            Played::Nothing => vec![],
        };
        for square in Square::iter() {
            if before.is_empty_at(square) && !after.is_empty_at(square) {
                assert!(allowed.contains(&square), "{mv} filled {square}\n{after}");
            }
        }
        assert!(occupied(after).len() <= occupied(&before).len());
    }
    replayer.into_board()
}

#[test]
fn replay_full_game() {
    let movetext = collect_movetext(FISCHER_SPASSKY.as_bytes()).unwrap();
    let mut movetext = MoveText::from_annotated(&movetext).unwrap();
    assert_eq!(movetext.pairs.len(), 43);
    assert_eq!(movetext.result, Some(GameResult::Draw));
    assert_eq!(movetext.pairs[42].black, PlayerMove::NoMove);

    let board = replay_checked(&mut movetext);
    assert_position(
        &board,
        &[
            ("e6", "wR"),
            ("g6", "bP"),
            ("c5", "bK"),
            ("g5", "bP"),
            ("b4", "bP"),
            ("g4", "wP"),
            ("b3", "wP"),
            ("d3", "bB"),
            ("f3", "wP"),
            ("d2", "wK"),
            ("f2", "bN"),
        ],
    );

    // Every standard move now knows where it came from.
    for mv in movetext.player_moves() {
        if let PlayerMove::Standard(standard) = mv {
            assert!(standard.origin.square().is_some(), "{mv}");
        }
    }
}

#[test]
fn replay_castles_captures_and_promotion() {
    let mut movetext: MoveText = "1.d4 d5 2.Nc3 Nc6 3.Bf4 Bf5 4.Qd2 Qd7 5.O-O-O O-O-O \
        6.e4 dxe4 7.d5 e3 8.dxc6 exd2+ 9.Rxd2 Qxd2+ 10.Kxd2 e5 11.cxb7+ Kd7 \
        12.b8=Q Rxb8 13.Bxe5 Bxc2 14.Kxc2 Rb6 0-1"
        .parse()
        .unwrap();
    assert_eq!(movetext.result, Some(GameResult::BlackWins));

    let board = replay_checked(&mut movetext);
    assert_position(
        &board,
        &[
            ("f8", "bB"),
            ("g8", "bN"),
            ("h8", "bR"),
            ("a7", "bP"),
            ("c7", "bP"),
            ("d7", "bK"),
            ("f7", "bP"),
            ("g7", "bP"),
            ("h7", "bP"),
            ("b6", "bR"),
            ("e5", "wB"),
            ("c3", "wN"),
            ("a2", "wP"),
            ("b2", "wP"),
            ("c2", "wK"),
            ("f2", "wP"),
            ("g2", "wP"),
            ("h2", "wP"),
            ("f1", "wB"),
            ("g1", "wN"),
            ("h1", "wR"),
        ],
    );
}

#[test]
fn initial_board_display() {
    let expected = "\
8 bR|bN|bB|bQ|bK|bB|bN|bR
7 bP|bP|bP|bP|bP|bP|bP|bP
6   |  |  |  |  |  |  |  
5   |  |  |  |  |  |  |  
4   |  |  |  |  |  |  |  
3   |  |  |  |  |  |  |  
2 wP|wP|wP|wP|wP|wP|wP|wP
1 wR|wN|wB|wQ|wK|wB|wN|wR
  a  b  c  d  e  f  g  h";
    assert_eq!(format!("{}", Board::initial()).trim_end(), expected);
}

#[test]
fn npo_for_enums() {
    use std::mem::size_of;
    assert_eq!(size_of::<PieceKind>(), size_of::<Option<PieceKind>>());
    assert_eq!(size_of::<File>(), size_of::<Option<File>>());
    assert_eq!(size_of::<Rank>(), size_of::<Option<Rank>>());
    assert_eq!(size_of::<Square>(), size_of::<Option<Square>>());
    assert_eq!(size_of::<Piece>(), size_of::<Option<Piece>>());
}
