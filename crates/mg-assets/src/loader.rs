use std::path::Path;

use mg_core::host::EventCatalog;
use mg_core::{GeneratorConfig, MapGenError, SymbolTable};
use thiserror::Error;

use crate::template::TemplateMap;

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
    #[error("Template is {width}x{height}, reference cells need {min_width}x{min_height}")]
    TemplateTooSmall {
        width: usize,
        height: usize,
        min_width: usize,
        min_height: usize,
    },
    #[error("Template holds {actual} tile ids, expected {expected}")]
    MalformedData { expected: usize, actual: usize },
    #[error("Invalid generator config: {0}")]
    Config(#[from] MapGenError),
}

/// Everything the generator needs from a template map.
#[derive(Debug, Clone, PartialEq)]
pub struct MapAssets {
    pub template: TemplateMap,
    pub table: SymbolTable,
    pub catalog: EventCatalog,
}

impl MapAssets {
    /// Derive the symbol table and event catalog from a checked template.
    pub fn from_template(template: TemplateMap) -> Result<Self, AssetError> {
        template.check()?;
        let table = template.symbol_table();
        let catalog = template.event_catalog();
        log::debug!(
            "template {}x{}: {} rated events, start {:?}, goal {:?}",
            template.width,
            template.height,
            catalog.events.len(),
            catalog.start,
            catalog.goal
        );
        Ok(Self {
            template,
            table,
            catalog,
        })
    }

    /// Load a template map from a JSON file.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, AssetError> {
        let content = std::fs::read_to_string(path)?;
        let template: TemplateMap = serde_json::from_str(&content)?;
        Self::from_template(template)
    }
}

/// Load generator settings from a JSON file.
///
/// Missing fields take their defaults; the result is normalized and
/// validated.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<GeneratorConfig, AssetError> {
    let content = std::fs::read_to_string(path)?;
    let config: GeneratorConfig = serde_json::from_str(&content)?;
    let config = config.normalized();
    config.validate()?;
    Ok(config)
}

/// Write generator settings as pretty-printed JSON.
pub fn save_config<P: AsRef<Path>>(config: &GeneratorConfig, path: P) -> Result<(), AssetError> {
    let content = serde_json::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}
