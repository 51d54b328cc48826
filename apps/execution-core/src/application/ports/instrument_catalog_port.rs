//! Instrument Catalog Port (Driven Port)
//!
//! Interface for looking up instrument definitions.

use std::collections::HashMap;

use parking_lot::RwLock;

use crate::domain::shared::{Instrument, InstrumentId};

/// Port for instrument definitions (precision and quote currency).
pub trait InstrumentCatalogPort: Send + Sync {
    /// Look up an instrument.
    fn instrument(&self, id: &InstrumentId) -> Option<Instrument>;

    /// All known instruments, sorted by ID.
    fn instruments(&self) -> Vec<Instrument>;
}

/// In-memory implementation.
#[derive(Debug, Default)]
pub struct InMemoryInstrumentCatalog {
    instruments: RwLock<HashMap<InstrumentId, Instrument>>,
}

impl InMemoryInstrumentCatalog {
    /// Create a catalog holding `instruments`.
    #[must_use]
    pub fn new(instruments: impl IntoIterator<Item = Instrument>) -> Self {
        Self {
            instruments: RwLock::new(
                instruments
                    .into_iter()
                    .map(|i| (i.id().clone(), i))
                    .collect(),
            ),
        }
    }

    /// Add or replace an instrument.
    pub fn insert(&self, instrument: Instrument) {
        self.instruments
            .write()
            .insert(instrument.id().clone(), instrument);
    }
}

impl InstrumentCatalogPort for InMemoryInstrumentCatalog {
    fn instrument(&self, id: &InstrumentId) -> Option<Instrument> {
        self.instruments.read().get(id).cloned()
    }

    fn instruments(&self) -> Vec<Instrument> {
        let mut all: Vec<Instrument> = self.instruments.read().values().cloned().collect();
        all.sort_by(|a, b| a.id().cmp(b.id()));
        all
    }
}
