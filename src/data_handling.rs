//! Letter examples and the delimited-text dataset loader.
//!
//! Each input line holds a class label followed by 16 raw integer
//! attributes: `"T,2,8,3,5,1,8,13,0,6,6,10,8,0,8,0,8"`. Raw attribute
//! ordinals fall in `0..=15` and are scaled into `[0, 1]` on load; optional
//! per-feature standardization lives in [`crate::preprocessing`].
use std::path::Path;

use anyhow::{bail, Context, Result};
use csv::ReaderBuilder;
use log::debug;

use crate::math::Vector;
use crate::network::ATTRIBUTE_COUNT;

/// Raw attribute ordinals are divided by this on load.
const RAW_ATTRIBUTE_SCALE: f64 = 15.0;

/// One labelled example: a known class symbol plus its attribute vector.
#[derive(Debug, Clone, PartialEq)]
pub struct Letter {
    known_value: char,
    attributes: Vector,
}

impl Letter {
    /// Wraps an already-scaled attribute vector.
    ///
    /// Precondition: `known_value` is `'A'..='Z'` and `attributes` has
    /// `ATTRIBUTE_COUNT` entries.
    pub fn new(known_value: char, attributes: Vector) -> Self {
        assert!(known_value.is_ascii_uppercase(), "label must be 'A'..='Z'");
        assert_eq!(attributes.len(), ATTRIBUTE_COUNT);
        Letter {
            known_value,
            attributes,
        }
    }

    pub fn known_value(&self) -> char {
        self.known_value
    }

    pub fn attributes(&self) -> &Vector {
        &self.attributes
    }

    pub(crate) fn attributes_mut(&mut self) -> &mut Vector {
        &mut self.attributes
    }

    /// Parses a `"label,a1,...,a16"` record, scaling the raw ordinals.
    fn from_record(fields: &csv::StringRecord) -> Result<Letter> {
        if fields.len() != ATTRIBUTE_COUNT + 1 {
            bail!(
                "expected a label and {} attributes, found {} fields",
                ATTRIBUTE_COUNT,
                fields.len()
            );
        }

        let label = fields[0].trim();
        let known_value = match label.chars().next() {
            Some(c) if label.len() == 1 && c.is_ascii_uppercase() => c,
            _ => bail!("invalid class label {:?}", label),
        };

        let mut attributes = Vec::with_capacity(ATTRIBUTE_COUNT);
        for field in fields.iter().skip(1) {
            let raw: f64 = field
                .trim()
                .parse()
                .with_context(|| format!("invalid attribute value {:?}", field))?;
            attributes.push(raw / RAW_ATTRIBUTE_SCALE);
        }

        Ok(Letter {
            known_value,
            attributes: Vector::from_vec(attributes),
        })
    }
}

/// Loads one `Letter` per non-empty line of the file at `path`.
pub fn load_letters<P: AsRef<Path>>(path: P) -> Result<Vec<Letter>> {
    let path = path.as_ref();
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("failed to open letter data file {}", path.display()))?;

    let mut letters = Vec::new();
    for (line, record) in reader.records().enumerate() {
        let record = record
            .with_context(|| format!("failed to read record {} of {}", line + 1, path.display()))?;
        let letter = Letter::from_record(&record)
            .with_context(|| format!("malformed record {} of {}", line + 1, path.display()))?;
        letters.push(letter);
    }

    debug!("loaded {} letters from {}", letters.len(), path.display());
    Ok(letters)
}
