//! # syft-users
//!
//! Client for the user service of a Syft node. Every operation is a single
//! round trip through a remote call primitive ([`syft::SyftCall`]): build a
//! payload whose typed fields carry their fully-qualified remote name, send it
//! under an operation path such as `user.view`, and hand back the decoded
//! response.
//!
//! The library exposes the client and its collaborators; the `syft-users`
//! binary in [`cli`] wires them to command line arguments.

pub mod cli;
pub mod syft;
