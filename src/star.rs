//! Star records - the one entity flowing through every pipeline
//!
//! A `Star` is built once per catalog row, optionally enriched with the
//! H3 cell it falls into (`CellStar`), and written out to SQLite.

use h3o::CellIndex;

/// Positional subset of a HYG catalog row.
#[derive(Debug, Clone, PartialEq)]
pub struct Star {
    /// Catalog id (`None` when the cell was empty)
    pub id: Option<i64>,
    /// Apparent magnitude; `f64::INFINITY` when unknown so it ranks dimmest
    pub mag: f64,
    /// Cartesian position in parsecs
    pub x: f64,
    pub y: f64,
    pub z: f64,
    /// Leading spectral class letter (O, B, A, F, G, K, M, ...)
    pub spect_class: Option<char>,
}

impl Star {
    pub fn new(id: Option<i64>, mag: f64, x: f64, y: f64, z: f64) -> Self {
        Self {
            id,
            mag,
            x,
            y,
            z,
            spect_class: None,
        }
    }

    /// Set the spectral class from a raw spectral type string
    pub fn with_spect(mut self, spect: &str) -> Self {
        self.spect_class = extract_spectral_class(spect);
        self
    }

    /// Id for log messages
    pub fn label(&self) -> String {
        match self.id {
            Some(id) => id.to_string(),
            None => "<no id>".to_string(),
        }
    }
}

/// A star together with the sky cell it was bucketed into.
#[derive(Debug, Clone, PartialEq)]
pub struct CellStar {
    pub star: Star,
    pub cell: CellIndex,
}

impl CellStar {
    pub fn spect_class_text(&self) -> Option<String> {
        self.star.spect_class.map(String::from)
    }

    pub fn cell_text(&self) -> String {
        self.cell.to_string()
    }
}

/// Extract the spectral class letter from a free-text spectral type.
///
/// Subdwarf (`sd`) and dwarf (`d`) prefixes are skipped before looking for the
/// first uppercase letter. Once a prefix matched, the search does not fall
/// back to the full string.
pub fn extract_spectral_class(spect: &str) -> Option<char> {
    let spect = spect.trim();
    if spect.is_empty() {
        return None;
    }

    let rest = if has_prefix(spect, "sd") && spect.len() > 2 {
        &spect[2..]
    } else if has_prefix(spect, "d") && spect.len() > 1 {
        &spect[1..]
    } else {
        spect
    };

    rest.chars().find(|c| c.is_uppercase())
}

fn has_prefix(s: &str, prefix: &str) -> bool {
    s.get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}
