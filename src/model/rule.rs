// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Egviz and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Rewrite rules mirrored from the server and their checkbox selection.

use std::borrow::Borrow;
use std::fmt;

use smol_str::SmolStr;

/// Server-assigned rule identifier.
///
/// Ids arrive as strings (`"0"`, `"4"`, `"12"`) and are echoed back verbatim on `/applyrule`;
/// the client never parses, renumbers, or invents them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuleId(SmolStr);

impl RuleId {
    pub fn new(value: impl AsRef<str>) -> Self {
        Self(SmolStr::new(value.as_ref()))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for RuleId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Borrow<str> for RuleId {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl From<&str> for RuleId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteRule {
    id: RuleId,
    lhs: String,
    rhs: String,
}

impl RewriteRule {
    pub fn new(id: RuleId, lhs: impl Into<String>, rhs: impl Into<String>) -> Self {
        Self { id, lhs: lhs.into(), rhs: rhs.into() }
    }

    pub fn id(&self) -> &RuleId {
        &self.id
    }

    pub fn lhs(&self) -> &str {
        &self.lhs
    }

    pub fn rhs(&self) -> &str {
        &self.rhs
    }

    /// `lhs => rhs`, the form rules are listed in.
    pub fn display(&self) -> String {
        format!("{} => {}", self.lhs, self.rhs)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleRow {
    pub rule: RewriteRule,
    pub checked: bool,
}

/// Ordered rule list plus per-rule selection.
///
/// The list is only ever replaced wholesale by [`RuleRegistry::render`]; order and ids are
/// exactly what the server last reported.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleRegistry {
    rows: Vec<RuleRow>,
}

impl RuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the displayed list. Prior rows and their checkbox state are dropped first.
    pub fn render(&mut self, rules: impl IntoIterator<Item = RewriteRule>) {
        self.rows.clear();
        self.rows.extend(rules.into_iter().map(|rule| RuleRow { rule, checked: false }));
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    pub fn rows(&self) -> &[RuleRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Returns the new checked state, or `None` when the id is not listed.
    pub fn toggle(&mut self, id: &str) -> Option<bool> {
        let row = self.rows.iter_mut().find(|row| row.rule.id.as_str() == id)?;
        row.checked = !row.checked;
        Some(row.checked)
    }

    /// Ids of every checked rule at call time, in display order. Empty when nothing is checked.
    pub fn selected_ids(&self) -> Vec<RuleId> {
        self.rows.iter().filter(|row| row.checked).map(|row| row.rule.id.clone()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::{RewriteRule, RuleId, RuleRegistry};

    fn rule(id: &str, lhs: &str, rhs: &str) -> RewriteRule {
        RewriteRule::new(RuleId::new(id), lhs, rhs)
    }

    #[test]
    fn render_replaces_rows_and_drops_checkbox_state() {
        let mut registry = RuleRegistry::new();
        registry.render([rule("0", "(* x 2)", "(<< x 1)"), rule("1", "(/ x x)", "(1)")]);
        assert_eq!(registry.toggle("1"), Some(true));

        registry.render([rule("4", "(* x 1)", "(x)")]);

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.rows()[0].rule.id().as_str(), "4");
        assert_eq!(registry.toggle("1"), None);
        registry.toggle("4");
        assert_eq!(registry.selected_ids(), vec![RuleId::new("4")]);
        registry.render([rule("4", "(* x 1)", "(x)")]);
        assert!(registry.selected_ids().is_empty());
    }

    #[test]
    fn selected_ids_follow_display_order_and_skip_unchecked() {
        let mut registry = RuleRegistry::new();
        registry.render([rule("0", "a", "b"), rule("1", "c", "d"), rule("2", "e", "f")]);
        registry.toggle("2");
        registry.toggle("0");

        let ids = registry.selected_ids();
        let ids = ids.iter().map(RuleId::as_str).collect::<Vec<_>>();
        assert_eq!(ids, vec!["0", "2"]);
    }

    #[test]
    fn toggle_unknown_id_is_none() {
        let mut registry = RuleRegistry::new();
        registry.render([rule("0", "a", "b")]);
        assert_eq!(registry.toggle("9"), None);
        assert_eq!(registry.toggle("0"), Some(true));
        assert_eq!(registry.toggle("0"), Some(false));
    }

    #[test]
    fn display_joins_sides_with_arrow() {
        assert_eq!(rule("0", "a+b", "b+a").display(), "a+b => b+a");
    }
}
