//! Text rendering of the board and turn reports

use senet_core::board::{
    HOUSE_OF_HAPPINESS, HOUSE_OF_HORUS, HOUSE_OF_REBIRTH, HOUSE_OF_RE_ATOUM,
    HOUSE_OF_THREE_TRUTHS, HOUSE_OF_WATER,
};
use senet_core::{Board, Cell, LegalMove, Player, TurnReport};

/// Houses per printed row
const ROW_LEN: usize = 10;

fn piece_glyph(player: Player) -> char {
    match player {
        Player::Player1 => 'X',
        Player::Player2 => 'O',
    }
}

fn empty_glyph(house: usize) -> char {
    match house {
        HOUSE_OF_REBIRTH => 'R',
        HOUSE_OF_HAPPINESS => 'H',
        HOUSE_OF_WATER => '~',
        HOUSE_OF_THREE_TRUTHS | HOUSE_OF_RE_ATOUM | HOUSE_OF_HORUS => '*',
        _ => '.',
    }
}

fn render_house(board: &Board, house: usize) -> String {
    let glyph = match board.cell(house) {
        Cell::Empty => empty_glyph(house),
        Cell::Occupied(p) => piece_glyph(p),
    };
    format!("{:>2}{} ", house, glyph)
}

/// Three rows of ten, the middle row running right to left
pub fn render_board(board: &Board) -> String {
    let rows: [Vec<usize>; 3] = [
        (1..=ROW_LEN).collect(),
        (ROW_LEN + 1..=2 * ROW_LEN).rev().collect(),
        (2 * ROW_LEN + 1..=3 * ROW_LEN).collect(),
    ];

    let mut out = String::new();
    for row in &rows {
        for &house in row {
            out.push_str(&render_house(board, house));
        }
        out.push('\n');
    }
    out.push_str(&format!(
        "off: {} {}  {} {}\n",
        piece_glyph(Player::Player1),
        board.pieces_off(Player::Player1),
        piece_glyph(Player::Player2),
        board.pieces_off(Player::Player2),
    ));
    out
}

pub fn describe_move(mv: &LegalMove) -> String {
    match mv.to {
        Some(to) if !mv.offboard => format!("{}->{}", mv.from, to),
        _ => format!("{}->off", mv.from),
    }
}

pub fn describe_moves(moves: &[LegalMove]) -> String {
    moves.iter().map(describe_move).collect::<Vec<_>>().join(", ")
}

/// One-line summary of a turn
pub fn describe_turn(report: &TurnReport) -> String {
    let mut line = format!("{} threw {}", report.player, report.throw.steps);

    match report.played {
        None => line.push_str(": no legal move, turn passes"),
        Some(info) => {
            match info.dest {
                Some(dest) => line.push_str(&format!(", moved {} -> {}", info.start, dest)),
                None => line.push_str(&format!(", bore off from {}", info.start)),
            }
            if let Some(captured) = info.captured {
                line.push_str(&format!(" (captured on {}, sent to {})", captured, info.start));
            }
        }
    }
    if report.again {
        line.push_str(", throws again");
    }
    line
}
