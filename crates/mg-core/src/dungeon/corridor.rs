//! Corridors between rooms in neighboring blocks
//!
//! Each corridor is three 1-cell-thick segments: an exit from each room out
//! to the shared block border, and a bridge along the border joining the
//! two exits. A room side carries at most one corridor.

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use super::adjacency::{AdjacencyIndex, Side};
use super::rect::Rect;
use super::room::Room;
use crate::rng::RandomSource;

/// A corridor from room `from` to room `to`, leaving `from` on `side`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Corridor {
    pub from: usize,
    pub to: usize,
    pub side: Side,
    /// Exit from `from`, exit from `to`, bridge
    pub segments: [Rect; 3],
}

/// Carve one corridor per eligible neighboring pair
///
/// Blocks are visited in order, sides top, bottom, left, right. A pair seen
/// from the other end is skipped, as is a pair where either room already
/// used the facing side. `rooms[i]` must belong to `blocks[i]`.
pub fn connect_rooms<R: RandomSource + ?Sized>(
    blocks: &[Rect],
    rooms: &mut [Room],
    adjacency: &AdjacencyIndex,
    rng: &mut R,
) -> Vec<Corridor> {
    let mut corridors = Vec::new();
    let mut visited: HashSet<(usize, usize)> = HashSet::new();

    for (crnt, neighbors) in adjacency.iter() {
        for side in Side::ALL {
            for &tget in neighbors.on(side) {
                if visited.contains(&(tget, crnt)) {
                    continue;
                }
                visited.insert((crnt, tget));

                let (Some(a), Some(b)) = (rooms.get(crnt).copied(), rooms.get(tget).copied())
                else {
                    continue;
                };
                if a.has_pass(side) || b.has_pass(side.opposite()) {
                    log::trace!("skip {crnt}->{tget} ({side}): side already used");
                    continue;
                }

                let segments = match side {
                    Side::Top | Side::Bottom => {
                        let a_off = a.rect.x + 1 + rng.random_int(a.rect.w - 2);
                        let b_off = b.rect.x + 1 + rng.random_int(b.rect.w - 2);
                        if side == Side::Top {
                            let [upper, lower, bridge] =
                                vertical_segments(&b.rect, b_off, &a.rect, a_off, blocks[crnt].y);
                            [lower, upper, bridge]
                        } else {
                            vertical_segments(&a.rect, a_off, &b.rect, b_off, blocks[tget].y)
                        }
                    }
                    Side::Left | Side::Right => {
                        let a_off = a.rect.y + 1 + rng.random_int(a.rect.h - 2);
                        let b_off = b.rect.y + 1 + rng.random_int(b.rect.h - 2);
                        if side == Side::Left {
                            let [left, right, bridge] =
                                horizontal_segments(&b.rect, b_off, &a.rect, a_off, blocks[crnt].x);
                            [right, left, bridge]
                        } else {
                            horizontal_segments(&a.rect, a_off, &b.rect, b_off, blocks[tget].x)
                        }
                    }
                };

                rooms[crnt].mark_pass(side);
                rooms[tget].mark_pass(side.opposite());
                log::debug!("corridor {crnt}->{tget} ({side}): {segments:?}");
                corridors.push(Corridor {
                    from: crnt,
                    to: tget,
                    side,
                    segments,
                });
            }
        }
    }

    corridors
}

/// Segments between a room above and a room below a horizontal border
///
/// Returns the upper exit, the lower exit and the bridge, which runs along
/// the border row just above `lower_block_y`.
fn vertical_segments(
    upper: &Rect,
    upper_off: i32,
    lower: &Rect,
    lower_off: i32,
    lower_block_y: i32,
) -> [Rect; 3] {
    let upper_exit = Rect::new(upper_off, upper.bottom(), 1, lower_block_y - upper.bottom());
    let lower_exit = Rect::new(lower_off, lower_block_y, 1, lower.y - lower_block_y);
    let bridge_x = upper_off.min(lower_off);
    let bridge = Rect::new(
        bridge_x,
        lower_block_y - 1,
        upper_off.max(lower_off) - bridge_x + 1,
        1,
    );
    [upper_exit, lower_exit, bridge]
}

/// Segments between a room on the left and a room on the right of a
/// vertical border; the bridge runs along the column left of `right_block_x`
fn horizontal_segments(
    left: &Rect,
    left_off: i32,
    right: &Rect,
    right_off: i32,
    right_block_x: i32,
) -> [Rect; 3] {
    let border = right_block_x - 1;
    let left_exit = Rect::new(left.right(), left_off, border - left.right(), 1);
    let right_exit = Rect::new(border, right_off, right.x - border, 1);
    let bridge_y = left_off.min(right_off);
    let bridge = Rect::new(
        border,
        bridge_y,
        1,
        left_off.max(right_off) - bridge_y + 1,
    );
    [left_exit, right_exit, bridge]
}
