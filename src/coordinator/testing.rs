// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Egviz and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, VecDeque};
use std::io;
use std::path::PathBuf;

use tokio::sync::oneshot;

use super::platform::{FilePurpose, PickedFile, Platform};

/// Platform double with scripted answers that records every interaction.
#[derive(Debug, Default)]
pub(crate) struct ScriptedPlatform {
    confirm_answers: RefCell<VecDeque<bool>>,
    deferred_confirm: RefCell<Option<oneshot::Receiver<bool>>>,
    prompts: RefCell<Vec<String>>,
    selection: RefCell<Vec<PickedFile>>,
    picks: RefCell<Vec<FilePurpose>>,
    contents: RefCell<BTreeMap<PathBuf, String>>,
    reads: RefCell<Vec<PathBuf>>,
    clipboard: RefCell<Vec<String>>,
    clipboard_fails: Cell<bool>,
}

impl ScriptedPlatform {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn answer_confirm(&self, answer: bool) {
        self.confirm_answers.borrow_mut().push_back(answer);
    }

    /// The next confirmation stays pending until the returned sender answers.
    pub(crate) fn defer_confirm(&self) -> oneshot::Sender<bool> {
        let (tx, rx) = oneshot::channel();
        *self.deferred_confirm.borrow_mut() = Some(rx);
        tx
    }

    pub(crate) fn select_files(&self, files: Vec<PickedFile>) {
        *self.selection.borrow_mut() = files;
    }

    /// Files without contents fail to read.
    pub(crate) fn put_file(&self, path: &str, contents: &str) {
        self.contents.borrow_mut().insert(PathBuf::from(path), contents.to_owned());
    }

    pub(crate) fn fail_clipboard(&self) {
        self.clipboard_fails.set(true);
    }

    pub(crate) fn prompts(&self) -> Vec<String> {
        self.prompts.borrow().clone()
    }

    pub(crate) fn picks(&self) -> Vec<FilePurpose> {
        self.picks.borrow().clone()
    }

    pub(crate) fn reads(&self) -> Vec<PathBuf> {
        self.reads.borrow().clone()
    }

    pub(crate) fn clipboard(&self) -> Vec<String> {
        self.clipboard.borrow().clone()
    }
}

impl Platform for ScriptedPlatform {
    async fn confirm(&self, prompt: &str) -> bool {
        self.prompts.borrow_mut().push(prompt.to_owned());
        let deferred = self.deferred_confirm.borrow_mut().take();
        if let Some(rx) = deferred {
            return rx.await.unwrap_or(false);
        }
        self.confirm_answers
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| panic!("unexpected confirmation: {prompt}"))
    }

    async fn pick_files(&self, purpose: FilePurpose) -> Vec<PickedFile> {
        self.picks.borrow_mut().push(purpose);
        self.selection.borrow().clone()
    }

    async fn read_text(&self, file: &PickedFile) -> io::Result<String> {
        self.reads.borrow_mut().push(file.path.clone());
        self.contents
            .borrow()
            .get(&file.path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no scripted contents"))
    }

    fn write_clipboard(&self, text: &str) -> Result<(), String> {
        if self.clipboard_fails.get() {
            return Err("clipboard unavailable".to_owned());
        }
        self.clipboard.borrow_mut().push(text.to_owned());
        Ok(())
    }
}
