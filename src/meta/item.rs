use crate::nbt::{Tag, TagCompound};
use serde_json::{Map, Value};

const DISPLAY: &str = "display";
const NAME: &str = "Name";
const LORE: &str = "Lore";

const DISPLAY_NAME_CONFIG: &str = "display-name";
const LORE_CONFIG: &str = "lore";

/// Item metadata every kind carries: display name and lore. This is the
/// state specialized metas build their own identity on top of.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ItemMetaBase {
    display_name: Option<String>,
    lore: Vec<String>,
}

impl ItemMetaBase {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_tag(tag: &TagCompound) -> Self {
        let Some(display) = tag.get_compound(DISPLAY) else {
            return Self::default();
        };

        let display_name = display.get_string(NAME).map(str::to_owned);
        let lore = match display.get(LORE) {
            Some(Tag::List(lines)) => lines
                .iter()
                .filter_map(|line| line.as_str().map(str::to_owned))
                .collect(),
            _ => Vec::new(),
        };
        Self { display_name, lore }
    }

    pub fn from_config(map: &Map<String, Value>) -> Self {
        let display_name = map
            .get(DISPLAY_NAME_CONFIG)
            .and_then(Value::as_str)
            .map(str::to_owned);
        let lore = map
            .get(LORE_CONFIG)
            .and_then(Value::as_array)
            .map(|lines| {
                lines
                    .iter()
                    .filter_map(|line| line.as_str().map(str::to_owned))
                    .collect()
            })
            .unwrap_or_default();
        Self { display_name, lore }
    }

    pub fn has_display_name(&self) -> bool {
        self.display_name.is_some()
    }

    pub fn display_name(&self) -> Option<&str> {
        self.display_name.as_deref()
    }

    pub fn set_display_name(&mut self, name: Option<&str>) {
        self.display_name = name.map(str::to_owned);
    }

    pub fn has_lore(&self) -> bool {
        !self.lore.is_empty()
    }

    pub fn lore(&self) -> &[String] {
        &self.lore
    }

    pub fn set_lore(&mut self, lore: Vec<String>) {
        self.lore = lore;
    }

    pub fn is_empty(&self) -> bool {
        self.display_name.is_none() && self.lore.is_empty()
    }

    /// Writes the `display` compound when there is anything to show.
    pub fn apply_to_tag(&self, tag: &mut TagCompound) {
        let mut display = TagCompound::new();
        if let Some(name) = &self.display_name {
            display.insert_string(NAME, name.clone());
        }
        if !self.lore.is_empty() {
            let lines = self.lore.iter().map(|line| Tag::String(line.clone())).collect();
            display.insert(LORE, Tag::List(lines));
        }

        if display.is_empty() {
            tag.remove(DISPLAY);
        } else {
            tag.insert(DISPLAY, Tag::Compound(display));
        }
    }

    pub fn serialize_config(&self, map: &mut Map<String, Value>) {
        if let Some(name) = &self.display_name {
            map.insert(DISPLAY_NAME_CONFIG.to_owned(), Value::String(name.clone()));
        }
        if !self.lore.is_empty() {
            let lines = self.lore.iter().map(|line| Value::String(line.clone())).collect();
            map.insert(LORE_CONFIG.to_owned(), Value::Array(lines));
        }
    }

    pub fn base_hash(&self) -> u64 {
        let mut hash: u64 = 3;
        if let Some(name) = &self.display_name {
            hash = hash.wrapping_mul(61).wrapping_add(super::hash_of(name));
        }
        if !self.lore.is_empty() {
            hash = hash.wrapping_mul(61).wrapping_add(super::hash_of(&self.lore));
        }
        hash
    }
}
