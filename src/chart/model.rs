//! The generated type chart artifact: an N x N matchup grid plus the name -> index map.
//! Written by the parser, loaded read-only by the calculator and the server.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

use crate::chart::names::{fold_key, is_no_type_spelling, title_case};
use crate::error::{ChartError, HeaderAxis};

pub const DEFAULT_TYPE_CHART_PATH: &str = "data/type_chart.json";

#[derive(Debug, Clone, PartialEq)]
pub struct TypeChart {
    matchups: Vec<Vec<f64>>,
    type_index: HashMap<String, usize>,
    type_list: Vec<String>,
    creation_date: String,
    rom_version: Option<String>,
}

/// On-disk layout. Field names are part of the artifact format consumed by the front-end.
#[derive(Serialize)]
struct TypeChartFileRef<'a> {
    matchups: &'a [Vec<f64>],
    #[serde(serialize_with = "serialize_types_in_order")]
    types: &'a [String],
    #[serde(rename = "CREATION_DATE")]
    creation_date: &'a str,
    #[serde(rename = "LAST_KNOWN_ROM_VERSION")]
    rom_version: &'a Option<String>,
}

#[derive(Deserialize)]
struct TypeChartFile {
    matchups: Vec<Vec<f64>>,
    types: HashMap<String, usize>,
    #[serde(rename = "CREATION_DATE", default)]
    creation_date: String,
    #[serde(rename = "LAST_KNOWN_ROM_VERSION", default)]
    rom_version: Option<String>,
}

fn serialize_types_in_order<S: Serializer>(
    types: &&[String],
    serializer: S,
) -> Result<S::Ok, S::Error> {
    let mut map = serializer.serialize_map(Some(types.len()))?;
    for (index, name) in types.iter().enumerate() {
        map.serialize_entry(name, &index)?;
    }
    map.end()
}

impl TypeChart {
    /// Build a chart from names in index order and a matching square grid.
    /// Rejects anything that breaks the chart invariants.
    pub fn new(
        type_list: Vec<String>,
        matchups: Vec<Vec<f64>>,
        creation_date: impl Into<String>,
        rom_version: Option<String>,
    ) -> Result<Self, ChartError> {
        let size = type_list.len();
        if matchups.len() != size {
            return Err(ChartError::NotSquare {
                rows: matchups.len(),
                columns: size,
            });
        }
        for (row_index, row) in matchups.iter().enumerate() {
            if row.len() != size {
                return Err(ChartError::RaggedRow {
                    row: row_index + 1,
                    expected: size,
                    found: row.len(),
                });
            }
            for (col_index, &value) in row.iter().enumerate() {
                if !value.is_finite() || value < 0.0 {
                    return Err(ChartError::InvalidMultiplier {
                        attacking: type_list[row_index].clone(),
                        defending: type_list[col_index].clone(),
                        value,
                    });
                }
            }
        }

        let mut seen: HashMap<String, usize> = HashMap::with_capacity(size);
        let mut type_index = HashMap::with_capacity(size);
        for (index, name) in type_list.iter().enumerate() {
            if name.trim().is_empty() {
                return Err(ChartError::EmptyTypeName {
                    axis: HeaderAxis::Index,
                    position: index,
                });
            }
            if is_no_type_spelling(name) {
                return Err(ChartError::ReservedTypeName {
                    axis: HeaderAxis::Index,
                    name: name.clone(),
                });
            }
            let expected = title_case(name);
            if expected != *name {
                return Err(ChartError::NotTitleCased {
                    name: name.clone(),
                    expected,
                });
            }
            if seen.insert(fold_key(name), index).is_some() {
                return Err(ChartError::DuplicateTypeName {
                    axis: HeaderAxis::Index,
                    name: name.clone(),
                });
            }
            type_index.insert(name.clone(), index);
        }

        Ok(Self {
            matchups,
            type_index,
            type_list,
            creation_date: creation_date.into(),
            rom_version,
        })
    }

    pub fn len(&self) -> usize {
        self.type_list.len()
    }

    pub fn is_empty(&self) -> bool {
        self.type_list.is_empty()
    }

    pub fn matchups(&self) -> &[Vec<f64>] {
        &self.matchups
    }

    pub fn type_index(&self) -> &HashMap<String, usize> {
        &self.type_index
    }

    /// Type names in index order.
    pub fn types(&self) -> &[String] {
        &self.type_list
    }

    pub fn creation_date(&self) -> &str {
        &self.creation_date
    }

    pub fn rom_version(&self) -> Option<&str> {
        self.rom_version.as_deref()
    }

    /// Exact-name lookup; names are stored title-cased.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.type_index.get(name).copied()
    }

    /// Multiplier of `attacking` hitting `defending`, by exact name.
    pub fn matchup(&self, attacking: &str, defending: &str) -> Option<f64> {
        let row = self.index_of(attacking)?;
        let col = self.index_of(defending)?;
        Some(self.matchups[row][col])
    }

    pub fn matchup_at(&self, attacking: usize, defending: usize) -> Option<f64> {
        self.matchups.get(attacking)?.get(defending).copied()
    }

    pub fn to_json(&self) -> Result<String, ChartError> {
        Ok(serde_json::to_string(&self.file_ref())?)
    }

    pub fn to_json_pretty(&self) -> Result<String, ChartError> {
        Ok(serde_json::to_string_pretty(&self.file_ref())?)
    }

    /// Parse and validate an artifact. `typeList` is rebuilt from the `types` map.
    pub fn from_json(raw: &str) -> Result<Self, ChartError> {
        let file: TypeChartFile = serde_json::from_str(raw)?;
        let size = file.types.len();

        let mut slots: Vec<Option<String>> = vec![None; size];
        for (name, index) in file.types {
            let Some(slot) = slots.get_mut(index) else {
                return Err(ChartError::IndexOutOfRange { name, index, size });
            };
            if let Some(first) = slot.take() {
                return Err(ChartError::IndexCollision {
                    first,
                    second: name,
                    index,
                });
            }
            *slot = Some(name);
        }
        // Every slot is filled: `size` distinct keys landed on `size` distinct in-range indices.
        let type_list = slots.into_iter().flatten().collect();

        Self::new(type_list, file.matchups, file.creation_date, file.rom_version)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ChartError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ChartError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// Write the artifact, creating parent directories as needed.
    pub fn save(&self, path: impl AsRef<Path>, pretty: bool) -> Result<(), ChartError> {
        let path = path.as_ref();
        let payload = if pretty {
            self.to_json_pretty()?
        } else {
            self.to_json()?
        };
        let write_err = |source| ChartError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(write_err)?;
            }
        }
        fs::write(path, payload).map_err(write_err)
    }

    fn file_ref(&self) -> TypeChartFileRef<'_> {
        TypeChartFileRef {
            matchups: &self.matchups,
            types: &self.type_list,
            creation_date: &self.creation_date,
            rom_version: &self.rom_version,
        }
    }
}
