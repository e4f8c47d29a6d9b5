//! HYG catalog loading and identifier lookup.
//!
//! The catalog is comma-delimited with a header row. Only three columns
//! matter: the HD identifier and the RA/declination text fields, all at
//! fixed positions. Rows with an empty identifier are skipped, and a
//! duplicated identifier keeps the last row seen. After loading, a small
//! patch set of stars absent from the HYG data is inserted through the
//! same conversion path, overwriting any earlier entry.

use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::info;

use crate::coords::{dec_degrees_to_rad, ra_hours_to_rad};
use crate::error::Error;

/// Column positions when a catalog row is split on commas.
const ID_COLUMN: usize = 2;
const RA_COLUMN: usize = 7;
const DEC_COLUMN: usize = 8;
const MIN_COLUMNS: usize = DEC_COLUMN + 1;

/// HD stars referenced by the constellation figures but missing from the
/// HYG data. Coordinates from wikisky.org.
const PATCH_SET: [(&str, &str, &str); 4] = [
    ("108249", "12.443472222200002", "-63.09944444399999"),
    ("24072", "3.8099722222", "-37.620555556"),
    ("18623", "2.9711944444666663", "-40.304444444"),
    ("68243", "8.158138888866668", "-47.345833333"),
];

/// A star position in radians: RA in [0, 2π), declination in [0, π].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Star {
    pub ra: f64,
    pub dec: f64,
}

impl Star {
    /// Convert raw catalog text fields into a star position.
    pub fn from_catalog_fields(ra_text: &str, dec_text: &str) -> Result<Self, Error> {
        Ok(Self {
            ra: ra_hours_to_rad(ra_text)?,
            dec: dec_degrees_to_rad(dec_text)?,
        })
    }
}

/// Identifier-keyed star index with last-write-wins load semantics.
#[derive(Debug, Default)]
pub struct StarCatalog {
    stars: HashMap<String, Star>,
}

impl StarCatalog {
    /// Load the catalog from a file and apply the patch set.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let reader = BufReader::new(File::open(path.as_ref())?);
        let catalog = Self::from_reader(reader)?;
        info!(
            "Loaded {} stars from {}",
            catalog.len(),
            path.as_ref().display()
        );
        Ok(catalog)
    }

    /// Load the catalog from any buffered source and apply the patch set.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, Error> {
        let mut stars = HashMap::new();

        for (number, line) in reader.lines().enumerate() {
            let line = line?;
            if number == 0 {
                // Header row.
                continue;
            }
            if line.trim().is_empty() {
                continue;
            }

            let fields: Vec<&str> = line.split(',').collect();
            if fields.len() < MIN_COLUMNS {
                return Err(Error::ShortRow {
                    line: number + 1,
                    found: fields.len(),
                    expected: MIN_COLUMNS,
                });
            }

            let id = fields[ID_COLUMN];
            if id.is_empty() {
                continue;
            }

            let star = Star::from_catalog_fields(fields[RA_COLUMN], fields[DEC_COLUMN])?;
            stars.insert(id.to_string(), star);
        }

        let mut catalog = Self { stars };
        catalog.apply_patches()?;
        Ok(catalog)
    }

    fn apply_patches(&mut self) -> Result<(), Error> {
        for (id, ra_text, dec_text) in PATCH_SET {
            let star = Star::from_catalog_fields(ra_text, dec_text)?;
            self.stars.insert(id.to_string(), star);
        }
        Ok(())
    }

    /// Look up a star by its catalog identifier.
    pub fn lookup(&self, id: &str) -> Option<&Star> {
        self.stars.get(id)
    }

    /// Number of distinct identifiers, patch set included.
    pub fn len(&self) -> usize {
        self.stars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }

    /// Iterate over all (identifier, star) entries in unspecified order.
    pub fn stars(&self) -> impl Iterator<Item = (&str, &Star)> {
        self.stars.iter().map(|(id, star)| (id.as_str(), star))
    }
}
