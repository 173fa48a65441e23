//! Passthrough Usage Checker.
//!
//! Both lookups are substring heuristics over text stores. An empty result
//! means "not mapped" / "not in use", never an error.

use std::fs;
use std::path::Path;

use pcislot_common::config::{SystemPaths, ToolSet};
use pcislot_common::error::Result;
use pcislot_common::pci::address::strip_default_domain;
use tracing::debug;

use crate::runner::{CommandRunner, run_checked};

const MAPPING_STORE: &str = "/cluster/mapping/pci";
const PASSTHROUGH_KEY: &str = "hostpci";

pub struct UsageChecker<'a> {
    runner: &'a dyn CommandRunner,
    tools: &'a ToolSet,
    paths: &'a SystemPaths,
}

impl<'a> UsageChecker<'a> {
    pub fn new(runner: &'a dyn CommandRunner, tools: &'a ToolSet, paths: &'a SystemPaths) -> Self {
        Self {
            runner,
            tools,
            paths,
        }
    }

    /// Lines of the cluster mapping dump mentioning `bus_address`.
    pub fn find_mapping(&self, bus_address: &str) -> Result<Vec<String>> {
        let needle = strip_default_domain(bus_address.trim());
        let dump = run_checked(
            self.runner,
            &self.tools.pvesh,
            &["get", MAPPING_STORE, "--output-format", "json-pretty"],
        )?;
        Ok(matching_lines(&dump, needle))
    }

    /// `path:line` hits of `hostpci` entries mentioning `bus_address`.
    pub fn find_vm_usage(&self, bus_address: &str) -> Vec<String> {
        let needle = strip_default_domain(bus_address.trim());
        let mut hits = Vec::new();
        scan_dir(&self.paths.vm_config_dir, needle, &mut hits);
        hits
    }
}

pub fn matching_lines(text: &str, needle: &str) -> Vec<String> {
    if needle.is_empty() {
        return Vec::new();
    }
    text.lines()
        .filter(|line| line.contains(needle))
        .map(|line| line.trim().to_string())
        .collect()
}

/// True for a `hostpciN: ...` line whose value mentions `needle`.
pub fn is_passthrough_line(line: &str, needle: &str) -> bool {
    match line.find(PASSTHROUGH_KEY) {
        Some(idx) => line[idx + PASSTHROUGH_KEY.len()..].contains(needle),
        None => false,
    }
}

fn scan_dir(dir: &Path, needle: &str, hits: &mut Vec<String>) {
    let Ok(entries) = fs::read_dir(dir) else {
        debug!(path = %dir.display(), "VM config directory not readable");
        return;
    };

    let mut entries: Vec<_> = entries.filter_map(|entry| entry.ok()).collect();
    entries.sort_by_key(|entry| entry.file_name());

    for entry in entries {
        let path = entry.path();
        let Ok(file_type) = entry.file_type() else {
            continue;
        };

        if file_type.is_dir() {
            scan_dir(&path, needle, hits);
        } else if file_type.is_file() {
            scan_file(&path, needle, hits);
        }
    }
}

fn scan_file(path: &Path, needle: &str, hits: &mut Vec<String>) {
    let Ok(content) = fs::read_to_string(path) else {
        debug!(path = %path.display(), "skipping unreadable file");
        return;
    };

    hits.extend(
        content
            .lines()
            .filter(|line| is_passthrough_line(line, needle))
            .map(|line| format!("{}:{}", path.display(), line)),
    );
}
