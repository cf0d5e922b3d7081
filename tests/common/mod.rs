#![allow(dead_code)]

pub use parlint_test_utils::{drive_all, drive_to_completion, fixtures, init_tracing};
