//! Shared test utilities for integration tests

use std::fs;
use tempfile::TempDir;

/// A flat fixture: `{alpha.txt: "alpha", beta.txt: "beta"}`.
pub fn flat_fixture() -> TempDir {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("alpha.txt"), "alpha").unwrap();
    fs::write(temp.path().join("beta.txt"), "beta").unwrap();
    temp
}

/// A nested fixture: `{alpha.txt, beta.txt, x/{x.txt, y/{y.txt}}}`, each
/// file containing its own stem ("alpha", "x", "y", ...).
pub fn nested_fixture() -> TempDir {
    let temp = flat_fixture();
    let x = temp.path().join("x");
    let y = x.join("y");
    fs::create_dir_all(&y).unwrap();
    fs::write(x.join("x.txt"), "x").unwrap();
    fs::write(y.join("y.txt"), "y").unwrap();
    temp
}
