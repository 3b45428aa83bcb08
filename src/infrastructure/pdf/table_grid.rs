//! Builds a cell grid from ruling lines and drops text into it.
//!
//! Only rules that cross each other form a grid. A title underline or a
//! footer bar touches no perpendicular rule, so it never adds a row or
//! column.

use super::page_layout::{Edge, Orientation, PageLayout, TextFragment};
use crate::application::ports::Table;

/// Edges closer than this are the same rule (double borders, thick lines
/// drawn as thin rectangles).
const SNAP_TOLERANCE: f32 = 3.0;
/// Slack when deciding whether a horizontal and a vertical rule meet.
const JOIN_TOLERANCE: f32 = 3.0;
/// Fragments whose baselines differ by less than this share a line.
const LINE_TOLERANCE: f32 = 2.0;

/// The topmost ruled grid on the page as a table, or `None` when no group
/// of crossing rules encloses at least one cell.
///
/// Every band between two row boundaries becomes a row, including bands
/// with no text, so row 0 is always the grid's first band.
pub fn detect_table(layout: &PageLayout) -> Option<Table> {
    let (columns, rows) = lattices(&layout.edges)
        .into_iter()
        .filter_map(|group| {
            let columns = boundaries(&group, Orientation::Vertical);
            let rows = boundaries(&group, Orientation::Horizontal);
            (columns.len() >= 2 && rows.len() >= 2).then_some((columns, rows))
        })
        .max_by(|(_, a), (_, b)| grid_top(a).total_cmp(&grid_top(b)))?;

    let grid: Vec<Vec<Option<String>>> = rows
        .windows(2)
        .rev()
        .map(|band| {
            let (bottom, top) = (band[0], band[1]);
            columns
                .windows(2)
                .map(|span| cell_text(&layout.fragments, span[0], span[1], bottom, top))
                .collect::<Vec<_>>()
        })
        .collect();

    Some(Table::new(grid))
}

fn grid_top(rows: &[f32]) -> f32 {
    rows.last().copied().unwrap_or(f32::MIN)
}

fn crosses(horizontal: &Edge, vertical: &Edge) -> bool {
    vertical.position >= horizontal.start - JOIN_TOLERANCE
        && vertical.position <= horizontal.end + JOIN_TOLERANCE
        && horizontal.position >= vertical.start - JOIN_TOLERANCE
        && horizontal.position <= vertical.end + JOIN_TOLERANCE
}

/// Splits the edges into groups connected through crossings.
fn lattices(edges: &[Edge]) -> Vec<Vec<Edge>> {
    let mut parent: Vec<usize> = (0..edges.len()).collect();

    fn root(parent: &mut [usize], mut i: usize) -> usize {
        while parent[i] != i {
            parent[i] = parent[parent[i]];
            i = parent[i];
        }
        i
    }

    for (i, a) in edges.iter().enumerate() {
        for (j, b) in edges.iter().enumerate().skip(i + 1) {
            let joined = match (a.orientation, b.orientation) {
                (Orientation::Horizontal, Orientation::Vertical) => crosses(a, b),
                (Orientation::Vertical, Orientation::Horizontal) => crosses(b, a),
                _ => false,
            };
            if joined {
                let (ra, rb) = (root(&mut parent, i), root(&mut parent, j));
                parent[ra] = rb;
            }
        }
    }

    let mut groups: Vec<(usize, Vec<Edge>)> = Vec::new();
    for (i, edge) in edges.iter().enumerate() {
        let r = root(&mut parent, i);
        match groups.iter_mut().find(|(group_root, _)| *group_root == r) {
            Some((_, members)) => members.push(*edge),
            None => groups.push((r, vec![*edge])),
        }
    }
    groups.into_iter().map(|(_, members)| members).collect()
}

/// Sorted, de-duplicated positions of the edges with the given orientation.
fn boundaries(edges: &[Edge], orientation: Orientation) -> Vec<f32> {
    let mut positions: Vec<f32> = edges
        .iter()
        .filter(|edge| edge.orientation == orientation)
        .map(|edge| edge.position)
        .collect();
    positions.sort_by(f32::total_cmp);

    let mut clustered: Vec<f32> = Vec::new();
    for position in positions {
        match clustered.last() {
            Some(last) if position - last <= SNAP_TOLERANCE => {}
            _ => clustered.push(position),
        }
    }
    clustered
}

fn cell_text(
    fragments: &[TextFragment],
    left: f32,
    right: f32,
    bottom: f32,
    top: f32,
) -> Option<String> {
    let mut inside: Vec<&TextFragment> = fragments
        .iter()
        .filter(|f| f.x >= left - LINE_TOLERANCE && f.x < right - LINE_TOLERANCE)
        .filter(|f| f.y > bottom && f.y <= top)
        .collect();
    if inside.is_empty() {
        return None;
    }
    inside.sort_by(|a, b| b.y.total_cmp(&a.y).then(a.x.total_cmp(&b.x)));

    let mut lines: Vec<(f32, Vec<&str>)> = Vec::new();
    for fragment in inside {
        match lines.last_mut() {
            Some((baseline, words)) if (*baseline - fragment.y).abs() < LINE_TOLERANCE => {
                words.push(fragment.text.trim());
            }
            _ => lines.push((fragment.y, vec![fragment.text.trim()])),
        }
    }

    let text = lines
        .into_iter()
        .map(|(_, words)| words.join(" "))
        .collect::<Vec<_>>()
        .join("\n");
    (!text.trim().is_empty()).then_some(text)
}
