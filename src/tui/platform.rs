// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Egviz and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Platform services backed by the terminal: modal prompts, `tokio::fs`, and OSC 52.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::io;
use std::rc::Rc;

use crossterm::{execute, style::Print};
use tokio::sync::oneshot;

use crate::coordinator::{FilePurpose, PickedFile, Platform};

/// A question the UI must answer before some action can continue.
#[derive(Debug)]
pub(crate) enum PendingPrompt {
    Confirm { message: String, reply: oneshot::Sender<bool> },
    FilePaths { purpose: FilePurpose, input: String, reply: oneshot::Sender<Vec<PickedFile>> },
}

/// FIFO of prompts shared between the platform and the UI. Only the front one is shown.
#[derive(Debug, Clone, Default)]
pub(crate) struct PromptQueue {
    inner: Rc<RefCell<VecDeque<PendingPrompt>>>,
}

impl PromptQueue {
    fn push(&self, prompt: PendingPrompt) {
        self.inner.borrow_mut().push_back(prompt);
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }

    #[cfg(test)]
    pub(crate) fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub(crate) fn with_front<R>(&self, f: impl FnOnce(&mut PendingPrompt) -> R) -> Option<R> {
        self.inner.borrow_mut().front_mut().map(f)
    }

    pub(crate) fn answer_confirm(&self, accepted: bool) -> bool {
        let mut queue = self.inner.borrow_mut();
        if !matches!(queue.front(), Some(PendingPrompt::Confirm { .. })) {
            return false;
        }
        if let Some(PendingPrompt::Confirm { reply, .. }) = queue.pop_front() {
            // The requester may be gone already; nothing to report then.
            let _ = reply.send(accepted);
        }
        true
    }

    /// Submits the typed paths, or resolves the pick as cancelled when `submit` is false.
    pub(crate) fn answer_paths(&self, submit: bool) -> bool {
        let mut queue = self.inner.borrow_mut();
        if !matches!(queue.front(), Some(PendingPrompt::FilePaths { .. })) {
            return false;
        }
        if let Some(PendingPrompt::FilePaths { input, reply, .. }) = queue.pop_front() {
            let files = if submit { parse_path_list(&input) } else { Vec::new() };
            let _ = reply.send(files);
        }
        true
    }
}

/// Comma separated paths; blanks are skipped.
pub(crate) fn parse_path_list(input: &str) -> Vec<PickedFile> {
    input
        .split(',')
        .map(str::trim)
        .filter(|path| !path.is_empty())
        .map(PickedFile::from_path)
        .collect()
}

#[derive(Debug, Clone)]
enum ClipboardSink {
    Osc52,
    #[cfg(test)]
    Capture(Rc<RefCell<Vec<String>>>),
}

#[derive(Debug, Clone)]
pub(crate) struct TuiPlatform {
    prompts: PromptQueue,
    clipboard: ClipboardSink,
}

impl TuiPlatform {
    pub(crate) fn new(prompts: PromptQueue) -> Self {
        Self { prompts, clipboard: ClipboardSink::Osc52 }
    }

    #[cfg(test)]
    pub(crate) fn capturing(prompts: PromptQueue, clipboard: Rc<RefCell<Vec<String>>>) -> Self {
        Self { prompts, clipboard: ClipboardSink::Capture(clipboard) }
    }
}

impl Platform for TuiPlatform {
    async fn confirm(&self, prompt: &str) -> bool {
        let (reply, answer) = oneshot::channel();
        self.prompts.push(PendingPrompt::Confirm { message: prompt.to_owned(), reply });
        answer.await.unwrap_or(false)
    }

    async fn pick_files(&self, purpose: FilePurpose) -> Vec<PickedFile> {
        let (reply, answer) = oneshot::channel();
        self.prompts.push(PendingPrompt::FilePaths { purpose, input: String::new(), reply });
        answer.await.unwrap_or_default()
    }

    async fn read_text(&self, file: &PickedFile) -> io::Result<String> {
        tokio::fs::read_to_string(&file.path).await
    }

    fn write_clipboard(&self, text: &str) -> Result<(), String> {
        match &self.clipboard {
            ClipboardSink::Osc52 => {
                let mut stdout = io::stdout();
                execute!(stdout, Print(osc52_sequence(text))).map_err(|err| err.to_string())
            }
            #[cfg(test)]
            ClipboardSink::Capture(buffer) => {
                buffer.borrow_mut().push(text.to_owned());
                Ok(())
            }
        }
    }
}

pub(crate) fn osc52_sequence(text: &str) -> String {
    use base64::engine::general_purpose::STANDARD;
    use base64::Engine as _;

    let encoded = STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{encoded}\x1b\\")
}
