//! Integration tests for infostamp
//!
//! Each test builds a throwaway solution directory and drives the compiled
//! binary against it.

mod helpers;
mod test_info;
mod test_sonar;
mod test_version;
