use std::{fs, path::Path};

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::CatalogError;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Backbar {
    pub backbar: String,
    pub spirits: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Section {
    pub name: String,
    pub backbars: Vec<Backbar>,
}

/// Sections, backbars and spirits available for counting, in the order
/// they appear in the source file. Read once at start and never mutated.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalog {
    sections: Vec<Section>,
}

impl Catalog {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)?;
        let catalog = Self::from_json(&raw)?;

        log::info!(
            "> Loaded {} sections from {}",
            catalog.sections.len(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn from_json(raw: &str) -> Result<Self, CatalogError> {
        let data: Map<String, Value> = serde_json::from_str(raw)?;

        let sections = data
            .into_iter()
            .map(|(name, backbars)| {
                let backbars: Vec<Backbar> = serde_json::from_value(backbars)?;
                Ok(Section { name, backbars })
            })
            .collect::<Result<Vec<_>, serde_json::Error>>()?;

        Ok(Self { sections })
    }

    pub fn section_names(&self) -> impl Iterator<Item = &str> {
        self.sections.iter().map(|section| section.name.as_str())
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|section| section.name == name)
    }
}
