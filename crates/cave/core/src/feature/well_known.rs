use std::sync::OnceLock;

use strum::{EnumCount, IntoEnumIterator};

use super::{FeatureError, FeatureId, FeatureTable};

/// Terrain the engine refers to directly, by its canonical data-file name.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::IntoStaticStr,
    strum::EnumIter,
    strum::EnumCount,
)]
pub enum WellKnown {
    #[strum(serialize = "unknown grid")]
    Unknown,
    #[strum(serialize = "open floor")]
    Floor,
    #[strum(serialize = "closed door")]
    ClosedDoor,
    #[strum(serialize = "open door")]
    OpenDoor,
    #[strum(serialize = "broken door")]
    BrokenDoor,
    #[strum(serialize = "up staircase")]
    UpStaircase,
    #[strum(serialize = "down staircase")]
    DownStaircase,
    #[strum(serialize = "secret door")]
    SecretDoor,
    #[strum(serialize = "pile of rubble")]
    Rubble,
    #[strum(serialize = "pile of passable rubble")]
    PassableRubble,
    #[strum(serialize = "magma vein")]
    Magma,
    #[strum(serialize = "quartz vein")]
    Quartz,
    #[strum(serialize = "magma vein with treasure")]
    MagmaTreasure,
    #[strum(serialize = "quartz vein with treasure")]
    QuartzTreasure,
    #[strum(serialize = "granite wall")]
    Granite,
    #[strum(serialize = "permanent wall")]
    Permanent,
    #[strum(serialize = "lava")]
    Lava,
}

impl WellKnown {
    /// Name this terrain must carry in the terrain table.
    pub fn name(self) -> &'static str {
        self.into()
    }
}

/// Resolved ids for every [`WellKnown`] terrain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WellKnownFeatures {
    ids: [FeatureId; WellKnown::COUNT],
}

impl WellKnownFeatures {
    /// Looks every well-known name up in `table`, failing on the first miss.
    pub fn resolve(table: &FeatureTable) -> Result<Self, FeatureError> {
        let mut ids = [FeatureId::default(); WellKnown::COUNT];
        for terrain in WellKnown::iter() {
            ids[terrain as usize] = table.lookup(terrain.name())?;
        }
        Ok(Self { ids })
    }

    #[inline]
    pub fn get(&self, terrain: WellKnown) -> FeatureId {
        self.ids[terrain as usize]
    }

    /// Terrain of a square nobody has seen ("unknown grid").
    #[inline]
    pub fn unknown(&self) -> FeatureId {
        self.get(WellKnown::Unknown)
    }

    #[inline]
    pub fn floor(&self) -> FeatureId {
        self.get(WellKnown::Floor)
    }

    #[inline]
    pub fn granite(&self) -> FeatureId {
        self.get(WellKnown::Granite)
    }

    #[inline]
    pub fn permanent(&self) -> FeatureId {
        self.get(WellKnown::Permanent)
    }
}

static WELL_KNOWN: OnceLock<WellKnownFeatures> = OnceLock::new();

/// Resolves the well-known ids once per process.
///
/// Must run after the terrain table loads and before any chunk is built.
/// Later calls return the ids cached by the first successful call.
pub fn resolve_well_known_ids(
    table: &FeatureTable,
) -> Result<&'static WellKnownFeatures, FeatureError> {
    if let Some(resolved) = WELL_KNOWN.get() {
        return Ok(resolved);
    }

    let resolved = WellKnownFeatures::resolve(table)?;
    tracing::info!(
        terrains = WellKnown::COUNT,
        floor = %resolved.floor(),
        "resolved well-known terrain ids"
    );
    Ok(WELL_KNOWN.get_or_init(|| resolved))
}

/// Ids cached by [`resolve_well_known_ids`], if it has run.
pub fn well_known() -> Option<&'static WellKnownFeatures> {
    WELL_KNOWN.get()
}
