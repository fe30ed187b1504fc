//! Mailbox chessboard used to replay games.
//!
//! The board only knows about pseudo-legal piece movement: it can tell which
//! piece of a given colour and kind is able to reach a square, and it can move
//! pieces around. Checks, pins, en passant and castling rights are not tracked.

use thiserror::Error;

use crate::square::{File, Rank, Square, SquareHint};

use super::{
    colour::Colour,
    piece::{Piece, PieceKind},
};

const BACK_RANK: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Maximum number of squares that can pass disambiguation for a single move.
const MAX_CANDIDATES: usize = 64;

pub type CandidateList = heapless::Vec<Square, MAX_CANDIDATES>;

/// What to do when more than one piece can make the same move.
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq)]
pub enum AmbiguityPolicy {
    /// The last candidate in scan order (A1 to H8, rank by rank) is used, and a
    /// warning is logged.
    #[default]
    LastMatch,
    /// The move is rejected with [`ResolveError::Ambiguous`].
    Reject,
}

/// Tunable parts of the movement rules.
#[derive(Clone, Copy, Debug, Default, Hash, Eq, PartialEq)]
pub struct BoardRules {
    pub ambiguity: AmbiguityPolicy,
    /// When set, a pawn's double push also requires the square it jumps over to
    /// be empty.
    pub double_push_needs_clear_path: bool,
}

/// Side of the board a king castles to.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub enum CastlingSide {
    Kingside,
    Queenside,
}
impl CastlingSide {
    /// Files the king and rook land on, in that order.
    pub const fn destination_files(self) -> (File, File) {
        match self {
            Self::Kingside => (File::G, File::F),
            Self::Queenside => (File::C, File::D),
        }
    }

    /// File the rook starts from.
    pub const fn rook_file(self) -> File {
        match self {
            Self::Kingside => File::H,
            Self::Queenside => File::A,
        }
    }
}

/// Errors that may arise when looking for the origin of a move.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Error)]
pub enum ResolveError {
    #[error("No {piece} can move to {target}")]
    NotFound { piece: Piece, target: Square },
    #[error("{count} pieces {piece} can move to {target}, including {first} and {last}")]
    Ambiguous {
        piece: Piece,
        target: Square,
        first: Square,
        last: Square,
        count: usize,
    },
}

/// Errors that may arise when moving pieces on the board.
///
/// These only happen when a move is applied without being resolved first, or
/// when the movetext contradicts the board.
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq, Error)]
pub enum ApplyError {
    #[error("{target} is occupied by {occupant} but the move is not a capture")]
    OccupiedTarget { target: Square, occupant: Piece },
    #[error("No piece on {0}")]
    EmptySquare(Square),
}

/// An 8x8 board, indexed by rank then file with white's back rank first.
#[derive(Clone, Debug, Hash, Eq, PartialEq)]
pub struct Board {
    ranks: [[Option<Piece>; 8]; 8],
    rules: BoardRules,
}
impl Default for Board {
    fn default() -> Self {
        Self::initial()
    }
}
impl Board {
    /// A board with no pieces.
    pub fn empty() -> Self {
        Self {
            ranks: [[None; 8]; 8],
            rules: BoardRules::default(),
        }
    }

    /// The initial position of chess.
    pub fn initial() -> Self {
        let mut board = Self::empty();
        for (file, kind) in File::ALL.into_iter().zip(BACK_RANK) {
            board.place(Square::new(file, Rank::One), Piece::new(kind, Colour::White));
            board.place(
                Square::new(file, Rank::Two),
                Piece::new(PieceKind::Pawn, Colour::White),
            );
            board.place(
                Square::new(file, Rank::Seven),
                Piece::new(PieceKind::Pawn, Colour::Black),
            );
            board.place(Square::new(file, Rank::Eight), Piece::new(kind, Colour::Black));
        }
        board
    }

    /// Replaces the movement rules used by this board.
    pub fn with_rules(mut self, rules: BoardRules) -> Self {
        self.rules = rules;
        self
    }

    /// Movement rules used by this board.
    pub fn rules(&self) -> BoardRules {
        self.rules
    }

    /// All squares, rank by rank starting with the first rank.
    pub fn ranks(&self) -> &[[Option<Piece>; 8]; 8] {
        &self.ranks
    }

    /// Returns the piece sitting on a given square if any.
    #[inline]
    pub fn piece_on(&self, square: Square) -> Option<Piece> {
        self.ranks[square.rank.index() as usize][square.file.index() as usize]
    }

    /// Checks if no piece sits on the given square.
    #[inline]
    pub fn is_empty_at(&self, square: Square) -> bool {
        self.piece_on(square).is_none()
    }

    /// Puts a piece on a square, returning the piece that was there before.
    pub fn place(&mut self, square: Square, piece: Piece) -> Option<Piece> {
        self.slot_mut(square).replace(piece)
    }

    /// Clears a square, returning the piece that was there.
    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        self.slot_mut(square).take()
    }

    #[inline]
    fn slot_mut(&mut self, square: Square) -> &mut Option<Piece> {
        &mut self.ranks[square.rank.index() as usize][square.file.index() as usize]
    }

    /// Checks that no piece stands strictly between two squares on the same rank
    /// or file.
    ///
    /// # Panics
    /// Panics if the squares are distinct and share neither a rank nor a file.
    pub fn straight_path_clear(&self, from: Square, to: Square) -> bool {
        if from == to {
            return true;
        }
        let (file_delta, rank_delta) = from.delta_to(to);
        assert!(
            file_delta == 0 || rank_delta == 0,
            "straight path clearance checked on non-straight move {from}-{to}"
        );
        self.path_clear(from, to)
    }

    /// Checks that no piece stands strictly between two squares on the same
    /// diagonal.
    ///
    /// # Panics
    /// Panics if the squares are distinct and not on a common diagonal.
    pub fn diagonal_path_clear(&self, from: Square, to: Square) -> bool {
        if from == to {
            return true;
        }
        let (file_delta, rank_delta) = from.delta_to(to);
        assert!(
            file_delta.abs() == rank_delta.abs(),
            "diagonal path clearance checked on non-diagonal move {from}-{to}"
        );
        self.path_clear(from, to)
    }

    /// Walks from `from` to `to` one step at a time, both excluded.
    fn path_clear(&self, from: Square, to: Square) -> bool {
        let (file_delta, rank_delta) = from.delta_to(to);
        let step = (file_delta.signum(), rank_delta.signum());
        let mut current = from;
        while let Some(next) = current.translate(step.0, step.1) {
            if next == to {
                break;
            }
            if let Some(piece) = self.piece_on(next) {
                log::trace!("Path {from}-{to} blocked by {piece} on {next}");
                return false;
            }
            current = next;
        }
        true
    }

    /// Checks if a piece standing on `from` could move to `to`, ignoring whether
    /// its own king would be left in check.
    pub fn is_legal_move(&self, piece: Piece, from: Square, to: Square, is_capture: bool) -> bool {
        let (file_delta, rank_delta) = from.delta_to(to);
        let is_diagonal = file_delta != 0 && file_delta.abs() == rank_delta.abs();
        let is_straight = (file_delta == 0) != (rank_delta == 0);
        match piece.kind {
            // There only ever is one king per side, it is never ambiguous.
            PieceKind::King => true,
            PieceKind::Knight => matches!(
                (file_delta.abs(), rank_delta.abs()),
                (1, 2) | (2, 1)
            ),
            PieceKind::Bishop => is_diagonal && self.diagonal_path_clear(from, to),
            PieceKind::Rook => is_straight && self.straight_path_clear(from, to),
            PieceKind::Queen => {
                (is_straight && self.straight_path_clear(from, to))
                    || (is_diagonal && self.diagonal_path_clear(from, to))
            }
            PieceKind::Pawn => self.is_legal_pawn_move(piece.colour, from, to, is_capture),
        }
    }

    fn is_legal_pawn_move(&self, colour: Colour, from: Square, to: Square, is_capture: bool) -> bool {
        let (file_delta, rank_delta) = from.delta_to(to);
        let forward = colour.forward();
        if is_capture {
            return file_delta.abs() == 1 && rank_delta == forward;
        }
        if file_delta != 0 {
            return false;
        }
        if rank_delta == forward {
            return true;
        }
        let start_rank = if colour.is_white() {
            Rank::Two
        } else {
            Rank::Seven
        };
        if from.rank != start_rank || rank_delta != 2 * forward {
            return false;
        }
        !self.rules.double_push_needs_clear_path
            || from
                .translate(0, forward)
                .is_some_and(|skipped| self.is_empty_at(skipped))
    }

    /// Every square holding `piece` that matches `hint` and from which `piece`
    /// can legally reach `target`, in scan order.
    pub fn candidates(
        &self,
        piece: Piece,
        hint: SquareHint,
        target: Square,
        is_capture: bool,
    ) -> CandidateList {
        let mut candidates = CandidateList::new();
        for square in Square::iter() {
            if !hint.matches(square) || self.piece_on(square) != Some(piece) {
                continue;
            }
            if self.is_legal_move(piece, square, target, is_capture) {
                // At most one candidate per square, this cannot overflow.
                let _ = candidates.push(square);
            }
        }
        candidates
    }

    /// Finds the square the piece making a move comes from.
    ///
    /// When several squares qualify, the outcome depends on the board's
    /// [`AmbiguityPolicy`].
    ///
    /// # Errors
    /// Fails if no square qualifies, or if several do and ambiguous moves are
    /// rejected.
    pub fn resolve_source(
        &self,
        colour: Colour,
        kind: PieceKind,
        hint: SquareHint,
        target: Square,
        is_capture: bool,
    ) -> Result<Square, ResolveError> {
        let piece = Piece::new(kind, colour);
        let candidates = self.candidates(piece, hint, target, is_capture);
        match candidates.as_slice() {
            [] => Err(ResolveError::NotFound { piece, target }),
            [origin] => Ok(*origin),
            [first, .., last] => match self.rules.ambiguity {
                AmbiguityPolicy::LastMatch => {
                    log::warn!(
                        "{} pieces {piece} can move to {target}, using {last} over {first}",
                        candidates.len()
                    );
                    Ok(*last)
                }
                AmbiguityPolicy::Reject => Err(ResolveError::Ambiguous {
                    piece,
                    target,
                    first: *first,
                    last: *last,
                    count: candidates.len(),
                }),
            },
        }
    }

    /// Moves the piece on `from` to `to`, returning the captured piece if any.
    ///
    /// The move is not checked for legality, resolve it first.
    ///
    /// # Errors
    /// Fails without touching the board if `from` is empty, or if `to` is
    /// occupied and the move is not a capture.
    pub fn apply(
        &mut self,
        from: Square,
        to: Square,
        is_capture: bool,
    ) -> Result<Option<Piece>, ApplyError> {
        let piece = self.piece_on(from).ok_or(ApplyError::EmptySquare(from))?;
        if let Some(occupant) = self.piece_on(to) {
            if !is_capture {
                return Err(ApplyError::OccupiedTarget {
                    target: to,
                    occupant,
                });
            }
        }
        self.remove(from);
        Ok(self.place(to, piece))
    }

    /// Replaces the piece on a square by a piece of the same colour.
    ///
    /// # Errors
    /// Fails if the square is empty.
    pub fn promote(&mut self, square: Square, kind: PieceKind) -> Result<(), ApplyError> {
        let slot = self.slot_mut(square);
        let piece = slot.as_mut().ok_or(ApplyError::EmptySquare(square))?;
        piece.kind = kind;
        Ok(())
    }

    /// Castles for the given side: the king lands on the C or G file and the rook
    /// on the D or F file of its back rank.
    ///
    /// Castling rights, checks and intervening pieces are not verified.
    pub fn apply_castle(&mut self, colour: Colour, side: CastlingSide) {
        let rank = if colour.is_white() {
            Rank::One
        } else {
            Rank::Eight
        };
        let (king_file, rook_file) = side.destination_files();
        self.remove(Square::new(File::E, rank));
        self.remove(Square::new(side.rook_file(), rank));
        self.place(
            Square::new(king_file, rank),
            Piece::new(PieceKind::King, colour),
        );
        self.place(
            Square::new(rook_file, rank),
            Piece::new(PieceKind::Rook, colour),
        );
    }
}
impl std::fmt::Display for Board {
    /// One line per rank, eighth rank first, with `|`-separated two-letter piece
    /// codes. Empty squares are shown as two spaces.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for rank in Rank::ALL.into_iter().rev() {
            write!(f, "{rank} ")?;
            for file in File::ALL {
                if file != File::A {
                    write!(f, "|")?
                }
                match self.piece_on(Square::new(file, rank)) {
                    Some(piece) => write!(f, "{piece}")?,
                    None => write!(f, "  ")?,
                }
            }
            writeln!(f)?
        }
        for file in File::ALL {
            write!(f, "  {file}")?
        }
        writeln!(f)
    }
}
