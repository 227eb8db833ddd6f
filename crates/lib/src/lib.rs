//! pubwin-lib: Core types and logic for pubwin
//!
//! This crate drives an external publish toolchain for a Windows runtime:
//! - `BuildRequest`: the validated options for one publish run
//! - `PublishContext`: workspace root, project, toolchain and artifact name
//! - `PublishPlan`: the clean/publish invocations derived from a request
//! - `PublishReport`: what a successful run produced

pub mod artifact;
pub mod consts;
pub mod context;
pub mod error;
pub mod paths;
pub mod publish;
pub mod request;
pub mod target;
pub mod toolchain;

#[cfg(any(test, feature = "testutil"))]
pub mod testutil;
