use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use mg_core::host::{EventCatalog, EventTemplate};
use mg_core::{Layer, Symbol, SymbolTable, TileId, TileSource, LAYER_COUNT};

use crate::loader::AssetError;

/// Note tag holding the per-map spawn rate
pub const RATE_MAP_TAG: &str = "RateMap";

/// Note tag holding the per-room spawn rate
pub const RATE_ROOM_TAG: &str = "RateRoom";

/// An event authored on the template map.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct TemplateEvent {
    pub id: u32,
    #[serde(default)]
    pub name: String,
    pub x: i32,
    pub y: i32,
    /// Free text; `<Key: value>` tags carry generator settings.
    #[serde(default)]
    pub note: String,
}

/// An editor-exported map used as the generator's palette.
///
/// `data` holds `width × height × 6` tile ids, layer by layer then row by
/// row. `events` may contain holes where the editor deleted an event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct TemplateMap {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u32>,
    #[serde(default)]
    pub events: Vec<Option<TemplateEvent>>,
}

impl TemplateMap {
    /// Check the tile data against the declared size and the reference cells.
    pub fn check(&self) -> Result<(), AssetError> {
        let expected = self.width * self.height * LAYER_COUNT;
        if self.data.len() != expected {
            return Err(AssetError::MalformedData {
                expected,
                actual: self.data.len(),
            });
        }

        let (min_width, min_height) = Symbol::iter()
            .map(Symbol::reference_coord)
            .fold((0, 0), |(w, h), (x, y)| (w.max(x + 1), h.max(y + 1)));
        if self.width < min_width || self.height < min_height {
            return Err(AssetError::TemplateTooSmall {
                width: self.width,
                height: self.height,
                min_width,
                min_height,
            });
        }
        Ok(())
    }

    /// Events standing on a template cell, in authoring order.
    pub fn events_at(&self, x: i32, y: i32) -> impl Iterator<Item = &TemplateEvent> {
        self.events
            .iter()
            .flatten()
            .filter(move |event| event.x == x && event.y == y)
    }

    /// Base tiles read from the reference cells.
    pub fn symbol_table(&self) -> SymbolTable {
        SymbolTable::from_template(self)
    }

    /// Start and goal events from their reference cells, then every event
    /// tagged with a spawn rate.
    pub fn event_catalog(&self) -> EventCatalog {
        let at_reference = |symbol: Symbol| {
            let (x, y) = symbol.reference_coord();
            self.events_at(x as i32, y as i32).next().map(|event| event.id)
        };

        let events = self
            .events
            .iter()
            .flatten()
            .filter_map(|event| {
                let rate_map = rate_tag(event, RATE_MAP_TAG);
                let rate_room = rate_tag(event, RATE_ROOM_TAG);
                (rate_map.is_some() || rate_room.is_some()).then_some(EventTemplate {
                    id: event.id,
                    rate_map,
                    rate_room,
                })
            })
            .collect();

        EventCatalog {
            start: at_reference(Symbol::Start),
            goal: at_reference(Symbol::Goal),
            events,
        }
    }
}

impl TileSource for TemplateMap {
    fn tile_at(&self, x: usize, y: usize, layer: Layer) -> Option<TileId> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let index = (layer.index() * self.height + y) * self.width + x;
        self.data.get(index).copied().map(TileId)
    }
}

/// `<Key: value>` and `<Key>` tags in an event note.
///
/// Yields the key and the raw text after the colon, if any.
pub fn note_tags(note: &str) -> impl Iterator<Item = (&str, Option<&str>)> {
    note.split('<').skip(1).filter_map(|chunk| {
        let body = &chunk[..chunk.find('>')?];
        let (key, value) = match body.split_once(':') {
            Some((key, value)) => (key, Some(value)),
            None => (body, None),
        };
        (!key.is_empty()).then_some((key, value))
    })
}

fn rate_tag(event: &TemplateEvent, tag: &str) -> Option<f64> {
    let (_, value) = note_tags(&event.note).find(|(key, _)| *key == tag)?;
    let Some(value) = value else {
        log::warn!("event {} has <{tag}> without a rate", event.id);
        return None;
    };
    match value.trim().parse::<f64>() {
        Ok(rate) => Some(rate),
        Err(_) => {
            log::warn!("event {} has an unreadable <{tag}: {value}>", event.id);
            None
        }
    }
}
