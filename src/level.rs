/// Level data: a rectangular grid of tile codes, plus the sources that
/// produce one grid per level index.
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::constants::{COLUMNS, ROWS, TILE_EMPTY, TILE_TYPES};
use crate::error::LevelError;

/// Validated grid of tile codes, indexed `[row][column]`.
///
/// Rows may be shorter than the widest one; missing cells read as empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LevelGrid {
    cells: Vec<Vec<i32>>,
}

impl LevelGrid {
    /// Checks map bounds and that every code is defined.
    pub fn new(cells: Vec<Vec<i32>>) -> Result<Self, LevelError> {
        let rows = cells.len();
        let columns = cells.iter().map(Vec::len).max().unwrap_or(0);
        if rows > ROWS || columns > COLUMNS {
            return Err(LevelError::TooLarge {
                rows,
                columns,
                max_rows: ROWS,
                max_columns: COLUMNS,
            });
        }
        for (row, line) in cells.iter().enumerate() {
            for (column, &code) in line.iter().enumerate() {
                if !(TILE_EMPTY..TILE_TYPES).contains(&code) {
                    return Err(LevelError::UnknownTileCode { row, column, code });
                }
            }
        }
        Ok(LevelGrid { cells })
    }

    /// Parses comma-separated rows of integers, one row per line.
    pub fn parse(text: &str) -> Result<Self, LevelError> {
        let mut cells = Vec::new();
        for (row, line) in text.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            let parsed = line
                .split(',')
                .enumerate()
                .map(|(column, value)| {
                    let value = value.trim();
                    value.parse::<i32>().map_err(|_| LevelError::Parse {
                        row,
                        column,
                        value: value.to_string(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            cells.push(parsed);
        }
        Self::new(cells)
    }

    pub fn rows(&self) -> usize {
        self.cells.len()
    }

    pub fn columns(&self) -> usize {
        self.cells.iter().map(Vec::len).max().unwrap_or(0)
    }

    pub fn get(&self, row: usize, column: usize) -> i32 {
        self.cells
            .get(row)
            .and_then(|line| line.get(column))
            .copied()
            .unwrap_or(TILE_EMPTY)
    }

    /// Every stored cell as `(row, column, code)`, row-major.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, i32)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, line)| {
            line.iter()
                .enumerate()
                .map(move |(column, &code)| (row, column, code))
        })
    }
}

/// Anything that can hand out the grid for a level index.
pub trait LevelSource {
    fn load(&self, level: u32) -> Result<LevelGrid, LevelError>;
}

/// Reads `level{N}_data.csv` files from a directory.
#[derive(Clone, Debug)]
pub struct DirLevelSource {
    dir: PathBuf,
}

impl DirLevelSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DirLevelSource { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path_for(&self, level: u32) -> PathBuf {
        self.dir.join(format!("level{level}_data.csv"))
    }
}

impl LevelSource for DirLevelSource {
    fn load(&self, level: u32) -> Result<LevelGrid, LevelError> {
        let path = self.path_for(level);
        debug!(level, path = %path.display(), "reading level file");
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(LevelError::NotFound { level });
            }
            Err(source) => return Err(LevelError::Io { path, source }),
        };
        LevelGrid::parse(&text)
    }
}

/// Levels held in memory, keyed by index.
#[derive(Clone, Debug, Default)]
pub struct InMemoryLevels {
    levels: BTreeMap<u32, LevelGrid>,
}

impl InMemoryLevels {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(mut self, level: u32, grid: LevelGrid) -> Self {
        self.levels.insert(level, grid);
        self
    }

    pub fn insert(&mut self, level: u32, grid: LevelGrid) {
        self.levels.insert(level, grid);
    }
}

impl LevelSource for InMemoryLevels {
    fn load(&self, level: u32) -> Result<LevelGrid, LevelError> {
        self.levels
            .get(&level)
            .cloned()
            .ok_or(LevelError::NotFound { level })
    }
}
