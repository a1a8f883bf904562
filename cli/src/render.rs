use std::fmt::Write;

use minefield_core::{GameStatus, Session};

fn status_label(status: GameStatus) -> &'static str {
    match status {
        GameStatus::NotStarted => "ready",
        GameStatus::Playing => "playing",
        GameStatus::Won => "won",
        GameStatus::Lost => "lost",
    }
}

/// Draws the board with row and column indices, followed by the counters line.
pub fn render_board(session: &Session) -> String {
    let config = session.config();
    let mut out = String::new();

    out.push_str("   ");
    for col in 0..config.cols {
        let _ = write!(out, "{col:>3}");
    }
    out.push('\n');

    for row in 0..config.rows {
        let _ = write!(out, "{row:>3}");
        for col in 0..config.cols {
            let glyph = session
                .view_at((row, col))
                .map(|view| view.glyph())
                .unwrap_or(' ');
            let _ = write!(out, "{glyph:>3}");
        }
        out.push('\n');
    }

    let _ = write!(
        out,
        "mines left: {}  status: {}",
        session.mines_left(),
        status_label(session.status())
    );
    out
}
