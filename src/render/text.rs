// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Egviz and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

const TAB_WIDTH: usize = 4;

pub(crate) fn text_len(text: &str) -> usize {
    text.chars().count()
}

pub(crate) fn truncate_with_ellipsis(text: &str, max_len: usize) -> String {
    match max_len {
        0 => String::new(),
        _ if text_len(text) <= max_len => text.to_owned(),
        1 => "…".to_owned(),
        _ => {
            let mut out: String = text.chars().take(max_len - 1).collect();
            out.push('…');
            out
        }
    }
}

/// Server text is shown verbatim, except that tabs expand to spaces and control characters
/// are dropped so they cannot move the terminal cursor.
pub(crate) fn sanitize_line(line: &str) -> String {
    let mut out = String::with_capacity(line.len());
    for ch in line.chars() {
        match ch {
            '\t' => out.extend(std::iter::repeat(' ').take(TAB_WIDTH)),
            ch if ch.is_control() => {}
            ch => out.push(ch),
        }
    }
    out
}
