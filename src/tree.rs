// Copyright 2024 Google LLC
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//      http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Access to the input and output trees of a build.
//!
//! The build only needs to know which input files currently exist and
//! where to put its output. A host pipeline which tracks its own file
//! set can hand it over with [`PathListTree`]; otherwise [`FsTree`]
//! walks the input directory.

use crate::error::Result;
use log::debug;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// The files a build reads and the directory it writes to.
pub trait SourceTree {
    /// Directory holding the input files.
    fn input_root(&self) -> &Path;

    /// Directory receiving the output files.
    fn output_root(&self) -> &Path;

    /// Every input file below `subpath` of the input root.
    ///
    /// The returned paths are relative to `input_root().join(subpath)`
    /// and their order is the processing order of the build.
    fn input_paths(&self, subpath: &Path) -> Result<Vec<PathBuf>>;
}

/// A tree backed by two directories on disk.
#[derive(Debug, Clone)]
pub struct FsTree {
    input_root: PathBuf,
    output_root: PathBuf,
}

impl FsTree {
    pub fn new(input_root: impl Into<PathBuf>, output_root: impl Into<PathBuf>) -> Self {
        Self {
            input_root: input_root.into(),
            output_root: output_root.into(),
        }
    }
}

impl SourceTree for FsTree {
    fn input_root(&self) -> &Path {
        &self.input_root
    }

    fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Walk the scan directory. Entries are sorted by file name so
    /// that repeated builds see the same order.
    fn input_paths(&self, subpath: &Path) -> Result<Vec<PathBuf>> {
        let scan_root = self.input_root.join(subpath);
        if !scan_root.is_dir() {
            debug!("{} is not a directory, no input", scan_root.display());
            return Ok(Vec::new());
        }

        let mut paths = Vec::new();
        for entry in WalkDir::new(&scan_root)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            if let Ok(relative) = entry.path().strip_prefix(&scan_root) {
                paths.push(relative.to_path_buf());
            }
        }
        Ok(paths)
    }
}

/// A tree whose input files are listed up front by the host.
#[derive(Debug, Clone)]
pub struct PathListTree {
    input_root: PathBuf,
    output_root: PathBuf,
    paths: Vec<PathBuf>,
}

impl PathListTree {
    /// The `paths` are relative to `input_root` and kept in order.
    pub fn new(
        input_root: impl Into<PathBuf>,
        output_root: impl Into<PathBuf>,
        paths: Vec<PathBuf>,
    ) -> Self {
        Self {
            input_root: input_root.into(),
            output_root: output_root.into(),
            paths,
        }
    }
}

impl SourceTree for PathListTree {
    fn input_root(&self) -> &Path {
        &self.input_root
    }

    fn output_root(&self) -> &Path {
        &self.output_root
    }

    fn input_paths(&self, subpath: &Path) -> Result<Vec<PathBuf>> {
        Ok(self
            .paths
            .iter()
            .filter_map(|path| path.strip_prefix(subpath).ok())
            .filter(|path| !path.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .collect())
    }
}
