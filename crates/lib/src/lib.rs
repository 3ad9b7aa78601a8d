//! jarsmith-lib: dependency classification and staged artifact generation
//! for Java modules.
//!
//! A build file declares Java libraries, binaries, prebuilts and source
//! generators. Each declaration becomes one module variant per target. The
//! crate turns those variants into a deterministic plan of build actions:
//! - `deps`: buckets each dependency edge into its classpath category
//! - `pipeline`: compile, merge, repackage and translate stages
//! - `jar`: the JarSpec descriptors every stage consumes and produces
//! - `workspace`: orders variants and collects the `BuildPlan`

pub mod action;
pub mod config;
pub mod deps;
pub mod eval;
pub mod jar;
pub mod module;
pub mod pipeline;
pub mod sdk;
pub mod source;
pub mod util;
pub mod workspace;
