//! Infrastructure Layer
//!
//! This module contains all adapters (implementations) for the ports defined
//! in the domain and application layers. Following hexagonal architecture:
//!
//! - **Driven Adapters (Outbound)**
//!   - `clock/`: Live (tokio) and simulated clocks
//!   - `persistence/`: Order snapshot repository
//!
//! - **Wiring**
//!   - `config/`: Dependency injection container

pub mod clock;
pub mod config;
pub mod persistence;
