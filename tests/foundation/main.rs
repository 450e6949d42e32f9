//! Integration tests for Layer 0: Foundation
//!
//! Tests for core types: Span, Type, Value, Item and Diagnostic.

mod diagnostics;
mod spans;
