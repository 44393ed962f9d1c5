#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::Value;
use tempfile::TempDir;

pub const STATIC_DATA: &str = include_str!("../fixtures/static_test_data.json");

/// A scratch directory holding a config/defaults file pair.
pub struct Scratch {
    pub dir: TempDir,
}

impl Scratch {
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("create temp dir"),
        }
    }

    /// A scratch directory whose config file starts as the static fixture.
    pub fn with_static_data() -> Self {
        let scratch = Self::new();
        fs::write(scratch.config(), STATIC_DATA).expect("write fixture");
        scratch
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn config(&self) -> PathBuf {
        self.path("config.json")
    }

    pub fn defaults(&self) -> PathBuf {
        self.path("defaults.json")
    }
}

pub fn read_json(path: &Path) -> Value {
    let text = fs::read_to_string(path).expect("read json file");
    serde_json::from_str(&text).expect("parse json file")
}
