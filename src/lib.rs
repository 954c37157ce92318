#![doc = "llm-pack: pack a git working tree into one document for LLM readers."]

//! The pipeline is a fixed sequence of stages: [`patterns`] and [`ignore_policy`]
//! decide what is excluded, [`collect`] walks the tree, [`binary`] separates text
//! from binary files, [`tree`] renders the directory structure and [`pack`]
//! assembles the final document. [`contract`] is the seam to version control,
//! implemented for git by [`git`].

pub mod binary;
pub mod cli;
pub mod collect;
pub mod config;
pub mod contract;
pub mod git;
pub mod ignore_policy;
pub mod load_config;
pub mod pack;
pub mod patterns;
pub mod tree;

pub use contract::{Repository, VcsError};
pub use git::GitRepository;
pub use pack::{FileRecord, PackOptions, Packer};
