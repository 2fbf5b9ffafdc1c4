use std::collections::HashMap;
use std::fmt::{self, Write};

use labyrinth_core::*;

const CHAOS_RULE: usize = 50;

/// Draws the whole session the way the terminal shows it between turns.
pub fn render(session: &GameSession, title: &str, out: &mut impl Write) -> fmt::Result {
    match session.playfield() {
        Playfield::Maze(run) => render_maze(run, title, out),
        Playfield::Classic(board) => render_classic(board, title, out),
        Playfield::Chaos(graph) => render_chaos(graph, title, out),
    }
}

fn render_maze(run: &MazeRun, title: &str, out: &mut impl Write) -> fmt::Result {
    let board = run.board();
    writeln!(out, "=== {} ===", title)?;
    writeln!(out, "HP: {} | Scans: {}", run.hp(), run.scans())?;
    writeln!(out, "Move: WASD | Flag: F+WASD | Radar: R | Goal: G")?;
    grid_header(board.size(), out)?;

    for y in 0..board.size() {
        write!(out, "{:2}|", y)?;
        for x in 0..board.size() {
            let coords = (x, y);
            let cover = board.cover_at(coords);
            if coords == run.player() {
                write!(out, "[{}]", board.hint_at(coords))?;
            } else if cover.is_flagged() {
                out.write_str(" F ")?;
            } else if coords == run.goal() {
                out.write_str(if cover.is_revealed() { " G " } else { " ?G" })?;
            } else {
                grid_cell(board, coords, " # ", out)?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

fn render_classic(board: &Board, title: &str, out: &mut impl Write) -> fmt::Result {
    writeln!(out, "=== {} ===", title)?;
    writeln!(
        out,
        "Mines: {} | Left: {}",
        board.layout().wall_count(),
        board.mines_left()
    )?;
    writeln!(out, "Reveal: x,y | Flag: fx,y")?;
    grid_header(board.size(), out)?;

    for y in 0..board.size() {
        write!(out, "{:2}|", y)?;
        for x in 0..board.size() {
            if board.cover_at((x, y)).is_flagged() {
                out.write_str(" F ")?;
            } else {
                grid_cell(board, (x, y), " * ", out)?;
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

fn grid_header(size: Coord, out: &mut impl Write) -> fmt::Result {
    writeln!(out, "{}", "-".repeat(usize::from(size) * 3 + 4))?;
    out.write_str("   ")?;
    for x in 0..size {
        write!(out, "{:2} ", x)?;
    }
    writeln!(out)
}

fn grid_cell(board: &Board, coords: Coord2, wall: &str, out: &mut impl Write) -> fmt::Result {
    if !board.cover_at(coords).is_revealed() {
        out.write_str(" ? ")
    } else if board.kind_at(coords).is_wall() {
        out.write_str(wall)
    } else {
        match board.hint_at(coords) {
            0 => out.write_str(" . "),
            hint => write!(out, " {} ", hint),
        }
    }
}

fn render_chaos(graph: &ChaosGraph, title: &str, out: &mut impl Write) -> fmt::Result {
    writeln!(out, "=== {} ===", title)?;
    writeln!(out, "Enter node ID to reveal, 'fID' to flag (e.g. '5' or 'f5')")?;
    writeln!(
        out,
        "Nodes: {} | Mines left: {}",
        graph.len(),
        graph.mines_left()
    )?;
    writeln!(out, "{}", "-".repeat(CHAOS_RULE))?;

    let by_position: HashMap<LatticePoint, usize> = graph
        .nodes()
        .iter()
        .enumerate()
        .map(|(id, node)| (node.position(), id))
        .collect();
    let ((min_x, min_y), (max_x, max_y)) = graph.bounds();

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let Some(&id) = by_position.get(&(x, y)) else {
                out.write_str("    ")?;
                continue;
            };
            let node = &graph.nodes()[id];
            match node.cover() {
                Cover::Flagged => out.write_str("[ F]")?,
                Cover::Hidden => write!(out, "[{:2}]", id)?,
                Cover::Revealed if node.is_mine() => out.write_str("[ *]")?,
                Cover::Revealed if node.hint() == 0 => out.write_str("[ .]")?,
                Cover::Revealed => write!(out, "[ {}]", node.hint())?,
            }
        }
        writeln!(out)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draw(session: &GameSession) -> String {
        let mut out = String::new();
        render(session, "TEST", &mut out).unwrap();
        out
    }

    #[test]
    fn maze_shows_player_goal_and_hidden_cells() {
        let layout = GridLayout::from_wall_coords(4, &[(1, 0)]).unwrap();
        let session = GameSession::from_playfield(Playfield::Maze(MazeRun::new(layout)));

        let text = draw(&session);
        let rows: Vec<&str> = text.lines().collect();

        assert_eq!(rows[0], "=== TEST ===");
        assert_eq!(rows[1], "HP: 3 | Scans: 3");
        assert_eq!(rows[5], " 0|[1] ?  ?  ? ");
        assert_eq!(rows[8], " 3| ?  ?  ?  ?G");
    }

    #[test]
    fn classic_reveals_mines_after_loss() {
        let fence: Vec<Coord2> = NeighborIter::new((3, 3), 7).collect();
        let layout = GridLayout::from_wall_coords(7, &fence).unwrap();
        let mut session = GameSession::from_playfield(Playfield::Classic(Board::new(layout)));
        assert!(draw(&session).lines().any(|row| row == " 3| .  3  ?  ?  ?  3  . "));

        session.execute(Command::Reveal((2, 2))).unwrap();

        let text = draw(&session);
        assert!(text.lines().any(|row| row == " 3| .  3  *  8  *  3  . "), "{}", text);
    }

    #[test]
    fn chaos_labels_hidden_nodes_by_id() {
        let points: Vec<LatticePoint> = (0..3).flat_map(|y| (0..3).map(move |x| (x, y))).collect();
        let graph = ChaosGraph::from_points(&points).unwrap().with_mines(&[4]).unwrap();
        let mut session = GameSession::from_playfield(Playfield::Chaos(graph));
        session.execute(Command::FlagNode(4)).unwrap();

        let text = draw(&session);
        let rows: Vec<&str> = text.lines().collect();

        assert_eq!(rows[2], "Nodes: 9 | Mines left: 0");
        assert_eq!(rows[4], "[ 1][ 1][ 1]");
        assert_eq!(rows[5], "[ 3][ F][ 5]");
    }

    #[test]
    fn chaos_leaves_gaps_between_nodes() {
        let graph = ChaosGraph::from_points(&[(0, 0), (2, 0), (0, 1)]).unwrap();
        let session = GameSession::from_playfield(Playfield::Chaos(graph));

        let text = draw(&session);
        let rows: Vec<&str> = text.lines().collect();

        assert_eq!(rows[4], "[ .]    [ .]");
        assert_eq!(rows[5], "[ .]        ");
    }
}
