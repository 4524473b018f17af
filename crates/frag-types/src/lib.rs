//! Foundation types for the fragment content store.
//!
//! This crate provides the entity model and type-support tables used by
//! every other fragstore crate.
//!
//! # Key Types
//!
//! - [`Fragment`] — a stored content item: identity, owner, declared type,
//!   size, timestamps
//! - [`FragmentId`] — UUID v7 fragment identifier
//! - [`MediaType`] — parsed `type/subtype` with parameters stripped
//! - [`registry`] — the supported-type predicate and the conversion-closure
//!   table
//!
//! Type support is a hard validation gate: constructing a [`Fragment`] with
//! a type outside the registry fails with [`TypeError::UnsupportedType`].

pub mod error;
pub mod fragment;
pub mod media;
pub mod registry;

pub use error::TypeError;
pub use fragment::{Fragment, FragmentId};
pub use media::MediaType;
