//! Connection registry: decorative edges between shapes.
//!
//! `from`/`to` index the complete [`SHAPES`] table, not a breakpoint-filtered
//! list. Use [`visible_connections`] to resolve them against the shapes that
//! are actually on screen.

use hashbrown::HashMap;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::shapes::{Shape, SHAPES};

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize))]
pub struct Connection {
    pub id: &'static str,
    pub from: usize,
    pub to: usize,
    /// Problem lines render in the warning tone while disorganized.
    pub is_problem: bool,
    /// Signed bezier bend (px) in the chaos state.
    pub chaos_curve: f32,
}

const fn conn(id: &'static str, from: usize, to: usize, is_problem: bool, chaos_curve: f32) -> Connection {
    Connection {
        id,
        from,
        to,
        is_problem,
        chaos_curve,
    }
}

pub static CONNECTIONS: [Connection; 6] = [
    // Large blocks interconnected
    conn("conn-1", 0, 1, false, 40.0),
    conn("conn-2", 1, 2, true, -35.0),
    conn("conn-3", 0, 4, false, 25.0),
    // Medium blocks
    conn("conn-4", 4, 5, false, -30.0),
    conn("conn-5", 5, 6, true, 45.0),
    // Cross-group
    conn("conn-6", 2, 6, false, -20.0),
];

/// A connection whose endpoints were both found in the visible set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleConnection {
    pub connection: Connection,
    pub from_shape: Shape,
    pub to_shape: Shape,
    /// Index into the visible shape list (and therefore the progress set).
    pub from_idx: usize,
    pub to_idx: usize,
}

/// Resolve `connections` against `visible`, dropping any edge with an
/// endpoint that is not on screen (or that points outside the table).
pub fn visible_connections(connections: &[Connection], visible: &[Shape]) -> Vec<VisibleConnection> {
    let by_id: HashMap<&str, usize> = visible.iter().enumerate().map(|(i, s)| (s.id, i)).collect();

    connections
        .iter()
        .filter_map(|c| {
            let from_shape = SHAPES.get(c.from)?;
            let to_shape = SHAPES.get(c.to)?;
            let from_idx = *by_id.get(from_shape.id)?;
            let to_idx = *by_id.get(to_shape.id)?;
            Some(VisibleConnection {
                connection: *c,
                from_shape: *from_shape,
                to_shape: *to_shape,
                from_idx,
                to_idx,
            })
        })
        .collect()
}
