#![doc = "lic-approval-core: core logic library for lic-approval."]

//! This crate holds the rule table, the document model and its assembly, and
//! the docx renderer for third party software license approval forms.
//! The CLI crate only parses arguments, loads configuration and calls
//! [`generate::generate`].
//!
//! # Usage
//! Resolve a [`rules::ContentVariant`], build a [`model::DocumentModel`] with
//! [`builder::build_document`] and hand it to a [`contract::Renderer`], or let
//! [`generate::generate`] do all of it.

pub mod builder;
pub mod config;
pub mod constants;
pub mod contract;
pub mod docx;
pub mod filename;
pub mod generate;
pub mod hyperlink;
pub mod model;
pub mod rules;
pub mod templates;
pub mod version_lookup;
