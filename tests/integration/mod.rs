//! Integration tests for the dagfs client

mod add_recursive;
mod lazy_resolution;
mod store_roundtrip;
mod test_utils;
