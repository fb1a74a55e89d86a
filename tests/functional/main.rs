//! Functional tests: the full router against mocked upstreams

mod cors_test;
mod stock_test;
