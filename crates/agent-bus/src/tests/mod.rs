//! Test suites for bootstrap and the command bus pipeline.

mod support;
