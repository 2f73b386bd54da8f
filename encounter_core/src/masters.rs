//! Masters and the level brackets they teach.

use log::debug;
use scene_rules::EntityId;
use serde::{Deserialize, Serialize};

use crate::error::{EncounterError, EncounterResult};

/// An immutable master record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Master {
    pub id: EntityId,
    pub name: String,
    /// Inclusive lower bound.
    pub min_level: u32,
    /// Inclusive upper bound.
    pub max_level: u32,
}

impl Master {
    /// A master with a stable id derived from the name.
    pub fn new(name: impl Into<String>, min_level: u32, max_level: u32) -> Self {
        let name = name.into();
        Self {
            id: EntityId::from_token(&name),
            name,
            min_level,
            max_level,
        }
    }

    pub fn display_name(&self) -> &str {
        &self.name
    }

    pub fn covers(&self, level: u32) -> bool {
        (self.min_level..=self.max_level).contains(&level)
    }
}

#[derive(Debug, Deserialize)]
struct MasterDef {
    name: String,
    min_level: u32,
    max_level: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct MasterTableDef {
    masters: Vec<MasterDef>,
}

/// Master roster, validated to cover every level in `1..=ceiling` exactly once.
#[derive(Debug, Clone, Serialize)]
pub struct MasterTable {
    masters: Vec<Master>,
}

impl MasterTable {
    /// Validate and sort a roster.
    pub fn new(mut masters: Vec<Master>, ceiling: u32) -> EncounterResult<Self> {
        masters.sort_by_key(|m| m.min_level);
        let table = Self { masters };
        table.validate(ceiling)?;
        Ok(table)
    }

    /// Check that the brackets are gap-free, non-overlapping and cover `1..=ceiling`.
    pub fn validate(&self, ceiling: u32) -> EncounterResult<()> {
        if self.masters.is_empty() {
            return Err(EncounterError::InvalidMasterTable("no masters".into()));
        }

        let mut expected = 1;
        for master in &self.masters {
            if master.max_level < master.min_level {
                return Err(EncounterError::InvalidMasterTable(format!(
                    "{} has an empty bracket {}..={}",
                    master.name, master.min_level, master.max_level
                )));
            }
            if master.min_level < expected {
                return Err(EncounterError::InvalidMasterTable(format!(
                    "{} overlaps level {}",
                    master.name, master.min_level
                )));
            }
            if master.min_level > expected {
                return Err(EncounterError::InvalidMasterTable(format!(
                    "no master for level {}",
                    expected
                )));
            }
            expected = master.max_level.saturating_add(1);
        }

        if expected <= ceiling {
            return Err(EncounterError::InvalidMasterTable(format!(
                "no master for level {}",
                expected
            )));
        }
        Ok(())
    }

    /// The classic roster, one master per level with the last one covering 14 and 15.
    pub fn classic() -> Self {
        let names = [
            "Mieraband",
            "Fie",
            "Glynyc",
            "Guth",
            "Unélith",
            "Adwares",
            "Gerrard",
            "Ceiloth",
            "Dwiredan",
            "Sensei Noetha",
            "Celith",
            "Gadriel the Elven Ranger",
            "Adoawyr",
        ];
        let mut masters: Vec<_> = names
            .iter()
            .zip(1..)
            .map(|(name, level)| Master::new(*name, level, level))
            .collect();
        masters.push(Master::new("Yoresh", 14, 15));
        Self { masters }
    }

    /// Load a roster from TOML `[[masters]]` entries. `max_level` defaults to `min_level`.
    pub fn from_toml_str(text: &str, ceiling: u32) -> EncounterResult<Self> {
        let def: MasterTableDef = toml::from_str(text)?;
        let masters = def
            .masters
            .into_iter()
            .map(|m| {
                let max_level = m.max_level.unwrap_or(m.min_level);
                Master::new(m.name, m.min_level, max_level)
            })
            .collect();
        Self::new(masters, ceiling)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Master> {
        self.masters.iter()
    }

    /// Highest level any master covers.
    pub fn max_level(&self) -> u32 {
        self.masters.last().map(|m| m.max_level).unwrap_or(0)
    }
}

/// Picks the master responsible for a level.
pub struct EncounterSelector {
    table: MasterTable,
}

impl EncounterSelector {
    pub fn new(table: MasterTable) -> Self {
        Self { table }
    }

    /// The single master for `level`.
    ///
    /// A level outside every bracket means the table is misconfigured; it is
    /// reported, never defaulted.
    pub fn select(&self, level: u32) -> EncounterResult<&Master> {
        let master = self
            .table
            .iter()
            .find(|m| m.covers(level))
            .ok_or(EncounterError::NoBracketMatch { level })?;
        debug!("level {} is taught by {}", level, master.name);
        Ok(master)
    }

    pub fn table(&self) -> &MasterTable {
        &self.table
    }
}
