//! Driver profile: the `key=value` file handed to the driver at init.

use crate::error::{Result, ServerError};
use log::{debug, warn};
use sai_native::{ProfileCursor, ProfileServices};
use std::collections::BTreeMap;
use std::fs;
use std::ops::Bound;
use std::path::Path;

/// Profile key/value table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileMap {
    values: BTreeMap<String, String>,
}

impl ProfileMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a profile file. A missing file is an error.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ServerError::file_read(path, e))?;
        let profile = Self::parse(&content);
        debug!("Loaded {} profile values from {}", profile.len(), path.display());
        Ok(profile)
    }

    /// Parses `key=value` lines. `#` and `;` start comment lines; the first
    /// `=` splits; a later duplicate key wins.
    pub fn parse(content: &str) -> Self {
        let mut values = BTreeMap::new();
        for (number, line) in content.lines().enumerate() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }
            match line.split_once('=') {
                Some((key, value)) => {
                    values.insert(key.to_string(), value.to_string());
                }
                None => warn!("Skipping profile line {}: no '=' in '{}'", number + 1, line),
            }
        }
        Self { values }
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get_value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// A cursor positioned before the first key.
    pub fn cursor(&self) -> ProfileCursor {
        ProfileCursor::new()
    }

    /// The entry after the cursor, in key order.
    pub fn next_value(&self, cursor: &mut ProfileCursor) -> Option<(&str, &str)> {
        let lower = match cursor.position() {
            Some(last) => Bound::Excluded(last),
            None => Bound::Unbounded,
        };
        let (key, value) = self
            .values
            .range::<str, _>((lower, Bound::Unbounded))
            .next()?;
        cursor.advance(key);
        Some((key.as_str(), value.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl ProfileServices for ProfileMap {
    fn get_value(&self, key: &str) -> Option<String> {
        let value = ProfileMap::get_value(self, key).map(str::to_string);
        debug!("Profile get {} -> {:?}", key, value);
        value
    }

    fn next_value(&self, cursor: &mut ProfileCursor) -> Option<(String, String)> {
        ProfileMap::next_value(self, cursor).map(|(k, v)| (k.to_string(), v.to_string()))
    }
}
