use std::fmt;

use super::{FeatureError, TerrainFlags};

/// Stable small integer naming a terrain type (its row in the terrain table).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FeatureId(pub u16);

impl FeatureId {
    #[inline]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for FeatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "feat#{}", self.0)
    }
}

/// Immutable terrain record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Feature {
    id: FeatureId,
    name: String,
    glyph: char,
    priority: u8,
    digging: u8,
    flags: TerrainFlags,
}

impl Feature {
    /// Creates a record; the id is assigned when the record joins a [`FeatureTable`].
    pub fn new(name: impl Into<String>, flags: TerrainFlags) -> Self {
        Self {
            id: FeatureId::default(),
            name: name.into(),
            glyph: ' ',
            priority: 0,
            digging: 0,
            flags,
        }
    }

    pub fn with_glyph(mut self, glyph: char) -> Self {
        self.glyph = glyph;
        self
    }

    pub fn with_priority(mut self, priority: u8) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_digging(mut self, digging: u8) -> Self {
        self.digging = digging;
        self
    }

    pub fn id(&self) -> FeatureId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn glyph(&self) -> char {
        self.glyph
    }

    /// Display priority used when several things compete for one square.
    pub fn priority(&self) -> u8 {
        self.priority
    }

    /// Tunnelling difficulty; 0 means the terrain cannot be dug.
    pub fn digging(&self) -> u8 {
        self.digging
    }

    pub fn flags(&self) -> TerrainFlags {
        self.flags
    }

    pub fn has(&self, flags: TerrainFlags) -> bool {
        self.flags.contains(flags)
    }
}

/// The loaded terrain table, indexed by [`FeatureId`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FeatureTable {
    features: Vec<Feature>,
}

impl FeatureTable {
    /// Builds the table, numbering records in load order.
    pub fn new(features: impl IntoIterator<Item = Feature>) -> Self {
        let features = features
            .into_iter()
            .enumerate()
            .map(|(index, mut feature)| {
                feature.id = FeatureId(index as u16);
                feature
            })
            .collect();
        Self { features }
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn get(&self, id: FeatureId) -> Option<&Feature> {
        self.features.get(id.index())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Feature> {
        self.features.iter()
    }

    /// Returns the flags of `id`, or no flags for an id outside the table.
    pub fn flags(&self, id: FeatureId) -> TerrainFlags {
        self.get(id).map(Feature::flags).unwrap_or_default()
    }

    /// Finds a terrain by its exact, case-sensitive name.
    pub fn lookup(&self, name: &str) -> Result<FeatureId, FeatureError> {
        self.features
            .iter()
            .find(|feature| feature.name == name)
            .map(Feature::id)
            .ok_or_else(|| FeatureError::NotFound {
                name: name.to_owned(),
            })
    }
}
