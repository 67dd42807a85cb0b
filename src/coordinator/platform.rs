// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Egviz and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Opaque platform services the coordinator depends on: a confirmation dialog, a file picker,
//! file reads, and the clipboard.

use std::io;
use std::path::{Path, PathBuf};

pub const JSON_MEDIA_TYPE: &str = "application/json";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilePurpose {
    Rules,
    Session,
}

impl FilePurpose {
    pub fn label(self) -> &'static str {
        match self {
            Self::Rules => "rules",
            Self::Session => "session",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickedFile {
    pub path: PathBuf,
    pub media_type: String,
}

impl PickedFile {
    pub fn new(path: impl Into<PathBuf>, media_type: impl Into<String>) -> Self {
        Self { path: path.into(), media_type: media_type.into() }
    }

    /// Media type from the file extension; only `.json` is recognised.
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let media_type = media_type_for(&path);
        Self { path, media_type: media_type.to_owned() }
    }

    pub fn is_json(&self) -> bool {
        self.media_type == JSON_MEDIA_TYPE
    }
}

fn media_type_for(path: &Path) -> &'static str {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => JSON_MEDIA_TYPE,
        _ => "application/octet-stream",
    }
}

/// First JSON-typed file of a selection; everything else is ignored.
pub fn first_json_file(files: &[PickedFile]) -> Option<&PickedFile> {
    files.iter().find(|file| file.is_json())
}

#[allow(async_fn_in_trait)]
pub trait Platform {
    /// Resolves once the user answered. Declining and dismissing are both `false`.
    async fn confirm(&self, prompt: &str) -> bool;

    /// Empty when the user cancelled the dialog.
    async fn pick_files(&self, purpose: FilePurpose) -> Vec<PickedFile>;

    async fn read_text(&self, file: &PickedFile) -> io::Result<String>;

    fn write_clipboard(&self, text: &str) -> Result<(), String>;
}
