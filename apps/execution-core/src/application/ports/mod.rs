//! Application Ports (Driver and Driven)
//!
//! Ports define interfaces for interacting with external systems.
//! The clock, commission model and order repository ports live in the domain;
//! this layer adds the instrument catalog.

mod instrument_catalog_port;

pub use instrument_catalog_port::{InMemoryInstrumentCatalog, InstrumentCatalogPort};
