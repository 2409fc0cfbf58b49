//! Home registry
//!
//! Holds every home with its beds in opening order and answers lookups by id.
//! Later phases read homes through the registry rather than carrying slices
//! around.

use std::collections::HashMap;

use crate::facility::home::{Bed, Home};
use crate::types::{BedId, HomeId};

/// A home together with the beds created for it
#[derive(Debug, Clone, PartialEq)]
pub struct HomeEntry {
    /// The home
    pub home: Home,
    /// Its beds, in room order
    pub beds: Vec<Bed>,
}

/// Homes in opening order with lookup by id
#[derive(Debug, Clone, Default)]
pub struct HomeRegistry {
    entries: Vec<HomeEntry>,
    home_index: HashMap<HomeId, usize>,
    bed_index: HashMap<BedId, (usize, usize)>,
}

impl HomeRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a home and its beds
    pub fn add_home(&mut self, home: Home, beds: Vec<Bed>) {
        let home_idx = self.entries.len();
        for (bed_idx, bed) in beds.iter().enumerate() {
            self.bed_index.insert(bed.id, (home_idx, bed_idx));
        }
        self.home_index.insert(home.id, home_idx);
        self.entries.push(HomeEntry { home, beds });
    }

    /// Get a home by id
    pub fn get_home(&self, home_id: HomeId) -> Option<&Home> {
        self.home_index.get(&home_id).map(|&idx| &self.entries[idx].home)
    }

    /// Get a bed by id
    pub fn get_bed(&self, bed_id: BedId) -> Option<&Bed> {
        self.bed_index
            .get(&bed_id)
            .map(|&(home_idx, bed_idx)| &self.entries[home_idx].beds[bed_idx])
    }

    /// Beds of a home, empty for an unknown home
    pub fn beds_of(&self, home_id: HomeId) -> &[Bed] {
        self.home_index
            .get(&home_id)
            .map(|&idx| self.entries[idx].beds.as_slice())
            .unwrap_or(&[])
    }

    /// Homes with their beds, in opening order
    pub fn entries(&self) -> &[HomeEntry] {
        &self.entries
    }

    /// Homes in opening order
    pub fn homes(&self) -> impl Iterator<Item = &Home> + '_ {
        self.entries.iter().map(|entry| &entry.home)
    }

    /// Every bed, home by home
    pub fn beds(&self) -> impl Iterator<Item = &Bed> + '_ {
        self.entries.iter().flat_map(|entry| entry.beds.iter())
    }

    /// Number of homes
    pub fn home_count(&self) -> usize {
        self.entries.len()
    }

    /// Number of beds across all homes
    pub fn bed_count(&self) -> usize {
        self.bed_index.len()
    }

    /// Check internal consistency: capacity matches bed count, beds point at
    /// their home, sequences run 1..=n
    pub fn validate(&self) -> Result<(), String> {
        for (idx, entry) in self.entries.iter().enumerate() {
            if entry.home.capacity != entry.beds.len() {
                return Err(format!(
                    "home {} has capacity {} but {} beds",
                    entry.home.name,
                    entry.home.capacity,
                    entry.beds.len()
                ));
            }
            if entry.home.sequence as usize != idx + 1 {
                return Err(format!(
                    "home {} has sequence {} at position {}",
                    entry.home.name,
                    entry.home.sequence,
                    idx + 1
                ));
            }
            if let Some(bed) = entry.beds.iter().find(|bed| bed.home_id != entry.home.id) {
                return Err(format!("bed {} is filed under the wrong home", bed.id));
            }
        }
        Ok(())
    }
}

impl FromIterator<(Home, Vec<Bed>)> for HomeRegistry {
    fn from_iter<I: IntoIterator<Item = (Home, Vec<Bed>)>>(iter: I) -> Self {
        let mut registry = Self::new();
        for (home, beds) in iter {
            registry.add_home(home, beds);
        }
        registry
    }
}
