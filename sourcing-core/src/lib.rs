#![warn(missing_docs)]
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

/// Core domain models for storage sourcing.
///
/// This module contains the data structures that flow into and out of an
/// allocation: candidate storage locations, purchase requests, and the
/// decisions computed for them.
///
/// The models are plain data with validation at their construction
/// boundary. They carry no knowledge of where the catalog lives or how
/// distances are measured.
pub mod models;

/// Interface traits for the collaborators an allocation depends on.
///
/// These are the "ports" in the hexagonal architecture pattern: the catalog
/// that knows which locations stock a product, and the service that reports
/// how far away a location is. Implementations live outside of this crate,
/// allowing the allocation logic to be tested against fixed inputs.
pub mod ports;
