//! Persistence for trained value tables.

use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

use serde::{Deserialize, Serialize};

use crate::{
    Error, Result,
    td::value_table::ValueTable,
    tictactoe::{Player, StateSpace},
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedValueTable {
    pub version: u32,
    pub dimension: usize,
    pub role: Player,
    values: Vec<f64>,
}

impl SavedValueTable {
    pub const VERSION: u32 = 1;

    pub fn new(table: &ValueTable, space: &StateSpace) -> Self {
        Self {
            version: Self::VERSION,
            dimension: space.dimension(),
            role: table.role(),
            values: table.values().to_vec(),
        }
    }

    /// Rebuild the table for `space`.
    ///
    /// The arena order of a state space is a pure function of its dimension,
    /// so a table saved against the same dimension lines up index for index.
    pub fn to_table(&self, space: &StateSpace) -> Result<ValueTable> {
        if self.version != Self::VERSION {
            return Err(Error::UnsupportedVersion {
                expected: Self::VERSION,
                got: self.version,
            });
        }
        if self.dimension != space.dimension() || self.values.len() != space.len() {
            return Err(Error::ValueTableMismatch {
                expected: space.len(),
                got: self.values.len(),
            });
        }
        Ok(ValueTable::from_parts(self.role, self.values.clone()))
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path).map_err(|source| Error::Io {
            operation: format!("create {}", path.display()),
            source,
        })?;
        let mut writer = BufWriter::new(file);
        rmp_serde::encode::write(&mut writer, self)?;
        writer.flush().map_err(|source| Error::Io {
            operation: format!("flush {}", path.display()),
            source,
        })?;
        Ok(())
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| Error::Io {
            operation: format!("open {}", path.display()),
            source,
        })?;
        let reader = BufReader::new(file);
        Ok(rmp_serde::decode::from_read(reader)?)
    }
}

#[cfg(test)]
mod tests {
    use tempfile::NamedTempFile;

    use super::*;
    use crate::{
        ports::Agent,
        td::{TdAgent, TdAgentConfig},
    };

    #[test]
    fn test_trained_table_survives_save_and_load() {
        let space = StateSpace::enumerate(3).unwrap();
        let mut agent = TdAgent::new(Player::O, &space, &TdAgentConfig::default());
        agent.observe(space.initial());
        agent.reward(0.0);
        let table = agent.into_value_table();

        let file = NamedTempFile::new().unwrap();
        SavedValueTable::new(&table, &space)
            .save_to_file(file.path())
            .unwrap();
        let loaded = SavedValueTable::load_from_file(file.path())
            .unwrap()
            .to_table(&space)
            .unwrap();

        assert_eq!(loaded, table);
        assert_eq!(loaded.role(), Player::O);
    }

    #[test]
    fn test_dimension_mismatch_rejected() {
        let small = StateSpace::enumerate(2).unwrap();
        let space = StateSpace::enumerate(3).unwrap();
        let saved = SavedValueTable::new(&ValueTable::for_role(&small, Player::X), &small);
        assert!(matches!(
            saved.to_table(&space),
            Err(Error::ValueTableMismatch { .. })
        ));
    }

    #[test]
    fn test_unknown_version_rejected() {
        let space = StateSpace::enumerate(2).unwrap();
        let mut saved = SavedValueTable::new(&ValueTable::for_role(&space, Player::X), &space);
        saved.version = 99;
        assert!(matches!(
            saved.to_table(&space),
            Err(Error::UnsupportedVersion { got: 99, .. })
        ));
    }
}
