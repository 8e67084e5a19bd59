//! Mock infrastructure for testing against an installer API
//!
//! This module provides a wiremock-based installer server and the
//! locale-aware responder used by the localized-pass tests.

#![allow(dead_code)]


pub use installer::*;
