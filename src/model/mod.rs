// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Egviz and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Client-side data model.
//!
//! Everything here is a mirror of server-owned state or purely local UI input; nothing in
//! this module talks to the network.

pub mod cursor;
pub mod notification;
pub mod rule;
pub mod session;

pub use cursor::{DebugCursor, Direction, ParseDirectionError};
pub use notification::{Notification, NotificationLog, Severity};
pub use rule::{RewriteRule, RuleId, RuleRegistry, RuleRow};
pub use session::{ExportFormat, InputFields, RenderedGraph, SessionState};
