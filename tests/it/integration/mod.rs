//! Integration tests for the diagram canvas.
//!
//! These tests drive the canvas the way a host does, with pointer, wheel and
//! timer input, and check the resulting graph, view and published events.

mod draw_workflow_tests;
mod link_workflow_tests;
mod selection_workflow_tests;
