// onet-etl-core/src/lib.rs

#![allow(missing_docs)]
#![deny(unsafe_code)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::perf)]

// --- MODULES HEXAGONAUX ---

// Contrats vers les bases (Store)
pub mod ports;

// Tables en mémoire, nettoyage, recettes, requêtes. Ne dépend ni de l'infra ni de l'app.
pub mod domain;

// SQLite, fichiers de config, scripts SQL
pub mod infrastructure;

// Étapes du pipeline: extract, transform, insights, validate
pub mod application;

pub mod error;

pub use error::EtlError;
