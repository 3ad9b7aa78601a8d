//! End-to-end generation scenarios over whole workspaces.

mod common;

mod classpath_tests;
mod pipeline_tests;
