//! Rooms placed inside partition blocks

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use super::adjacency::Side;
use super::rect::Rect;
use crate::config::GeneratorConfig;
use crate::rng::RandomSource;

bitflags! {
    /// Sides of a room that already carry a corridor
    #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
    pub struct Sides: u8 {
        const TOP = 0x01;
        const BOTTOM = 0x02;
        const LEFT = 0x04;
        const RIGHT = 0x08;
    }
}

// Manual serde impl for Sides
impl Serialize for Sides {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        self.bits().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Sides {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let bits = u8::deserialize(deserializer)?;
        Ok(Sides::from_bits_truncate(bits))
    }
}

impl From<Side> for Sides {
    fn from(side: Side) -> Self {
        match side {
            Side::Top => Sides::TOP,
            Side::Bottom => Sides::BOTTOM,
            Side::Left => Sides::LEFT,
            Side::Right => Sides::RIGHT,
        }
    }
}

/// A room and the sides its corridors leave from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Room {
    pub rect: Rect,
    pub passes: Sides,
}

impl Room {
    pub fn new(rect: Rect) -> Self {
        Self {
            rect,
            passes: Sides::empty(),
        }
    }

    pub fn has_pass(&self, side: Side) -> bool {
        self.passes.contains(side.into())
    }

    pub fn mark_pass(&mut self, side: Side) {
        self.passes.insert(side.into());
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.rect.contains(x, y)
    }
}

/// Size and position a room at random inside `block`
///
/// The room keeps `wall_height + 2` cells from every block edge. When the
/// block cannot fit a minimum-size room the draws collapse to zero and the
/// room is placed at its minimum size regardless.
pub fn place_room<R: RandomSource + ?Sized>(
    block: &Rect,
    config: &GeneratorConfig,
    rng: &mut R,
) -> Room {
    let min = config.min_room_size();
    let max = config.max_room_size().max(min);
    let margin = config.wall_margin();

    let w = (min + rng.random_int(block.w - margin * 2 - min - 2)).min(max);
    let h = (min + rng.random_int(block.h - margin * 2 - min - 2)).min(max);
    let x = block.x + margin + 1 + rng.random_int(block.w - w - margin * 2 - 1);
    let y = block.y + margin + 1 + rng.random_int(block.h - h - margin * 2 - 1);

    Room::new(Rect::new(x, y, w, h))
}
