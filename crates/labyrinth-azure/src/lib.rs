//! labyrinth-azure: Azure resource graph → Labyrinth graph specification.
//!
//! - Types: serde model of virtual networks, NICs, NSGs and public IPs
//! - Index: id dereferencing between resources
//! - Shortener: readable node keys from resource ids
//! - NSG: security rule verdicts as unions of boxes
//! - Convert: the emitted node/rule topology

pub mod convert;
pub mod index;
pub mod nsg;
pub mod shortener;
pub mod types;

pub use convert::{azure_symbols, AzureConverter, INTERNET_KEY};
pub use shortener::NameShortener;
pub use types::AzureResource;
