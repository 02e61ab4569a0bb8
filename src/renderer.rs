//! ASCII view of a topology: one boxed column per node kind, bindings listed
//! underneath by label.

use unicode_width::UnicodeWidthStr;

use crate::model::{Edge, Node, NodeKind};
use crate::query::node_by_id;

const COLUMN_GAP: usize = 3;
const BOX_HEIGHT: usize = 3;
const ROW_GAP: usize = 1;

fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

struct Grid {
    cells: Vec<Vec<char>>,
    width: usize,
    height: usize,
}

impl Grid {
    fn new(width: usize, height: usize) -> Self {
        Self {
            cells: vec![vec![' '; width]; height],
            width,
            height,
        }
    }

    fn set(&mut self, row: usize, col: usize, ch: char) {
        if row < self.height && col < self.width {
            self.cells[row][col] = ch;
        }
    }

    fn write_str(&mut self, row: usize, col: usize, s: &str) {
        let mut offset = 0;
        for ch in s.chars() {
            self.set(row, col + offset, ch);
            let w = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(1);
            for j in 1..w {
                self.set(row, col + offset + j, '\0');
            }
            offset += w;
        }
    }

    fn render(&self) -> String {
        self.cells
            .iter()
            .map(|row| {
                let line: String = row.iter().filter(|&&ch| ch != '\0').collect();
                line.trim_end().to_string()
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn kind_header(kind: NodeKind) -> &'static str {
    match kind {
        NodeKind::Producer => "producers",
        NodeKind::Exchange => "exchanges",
        NodeKind::Queue => "queues",
        NodeKind::Consumer => "consumers",
    }
}

fn box_width(label: &str) -> usize {
    display_width(label) + 4
}

fn draw_box(grid: &mut Grid, row: usize, col: usize, label: &str) {
    let w = box_width(label);
    grid.set(row, col, '┌');
    grid.set(row + 2, col, '└');
    for i in 1..w - 1 {
        grid.set(row, col + i, '─');
        grid.set(row + 2, col + i, '─');
    }
    grid.set(row, col + w - 1, '┐');
    grid.set(row + 2, col + w - 1, '┘');
    grid.set(row + 1, col, '│');
    grid.set(row + 1, col + w - 1, '│');
    grid.write_str(row + 1, col + 2, label);
}

/// Renders nodes as kind columns in the fixed producer, exchange, queue,
/// consumer order, members stacked in input order, followed by the bindings
/// resolved to node labels. Empty input renders to an empty string.
pub fn render(nodes: &[Node], edges: &[Edge]) -> String {
    let groups: Vec<(NodeKind, Vec<&Node>)> = NodeKind::ORDERED
        .into_iter()
        .map(|kind| {
            let group: Vec<&Node> = nodes.iter().filter(|n| n.kind() == kind).collect();
            (kind, group)
        })
        .filter(|(_, group)| !group.is_empty())
        .collect();

    if groups.is_empty() {
        return String::new();
    }

    let col_widths: Vec<usize> = groups
        .iter()
        .map(|(kind, group)| {
            group
                .iter()
                .map(|n| box_width(n.label()))
                .max()
                .unwrap_or(0)
                .max(display_width(kind_header(*kind)))
        })
        .collect();

    let width = col_widths.iter().sum::<usize>() + COLUMN_GAP * (groups.len() - 1);
    let tallest = groups.iter().map(|(_, g)| g.len()).max().unwrap_or(0);
    // header line, blank line, then the stacked boxes
    let height = 2 + tallest * (BOX_HEIGHT + ROW_GAP) - ROW_GAP;

    let mut grid = Grid::new(width, height);
    let mut x = 0;
    for ((kind, group), col_width) in groups.iter().zip(&col_widths) {
        grid.write_str(0, x, kind_header(*kind));
        for (i, node) in group.iter().enumerate() {
            draw_box(&mut grid, 2 + i * (BOX_HEIGHT + ROW_GAP), x, node.label());
        }
        x += col_width + COLUMN_GAP;
    }

    let mut out = grid.render();
    if !edges.is_empty() {
        out.push_str("\n\nbindings:");
        for edge in edges {
            let source = node_by_id(nodes, &edge.source)
                .map(|n| n.label())
                .unwrap_or(&edge.source);
            let target = node_by_id(nodes, &edge.target)
                .map(|n| n.label())
                .unwrap_or(&edge.target);
            out.push_str(&format!("\n  {source} ──> {target}"));
            if let Some(key) = &edge.attrs.routing_key {
                out.push_str(&format!("  [{key}]"));
            }
        }
    }
    out
}
