//! Unit tests for the public building blocks

mod selection_test;
