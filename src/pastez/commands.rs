//! # Command Surface
//!
//! The fixed, ordered table of user commands. Each command carries:
//!
//! - the tags it requires before it can be clicked,
//! - a keyboard shortcut predicate,
//! - a label and shortcut description for hover hints.
//!
//! Availability is never stored per command. The surface keeps one set of
//! enabled commands, recomputed from the session's tags on every transition.
//!
//! Keyboard dispatch walks the table in declaration order and stops at the
//! first matching shortcut. The declaration order is the tie-break contract:
//! Save, New, Duplicate, Raw, Share.

use crate::session::{Phase, Session};
use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum CommandName {
    Save,
    New,
    Duplicate,
    Raw,
    Share,
}

impl fmt::Display for CommandName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CommandName::Save => "save",
            CommandName::New => "new",
            CommandName::Duplicate => "duplicate",
            CommandName::Raw => "raw",
            CommandName::Share => "share",
        };
        f.write_str(name)
    }
}

/// Facts about the current state that commands can require.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tag {
    Editing,
    HasContent,
    Locked,
    HasIdentifier,
    SharingEnabled,
}

pub type Tags = BTreeSet<Tag>;

/// Derives the tag set from a session and the deployment's sharing flag.
pub fn tags_for(session: &Session, sharing_enabled: bool) -> Tags {
    let mut tags = Tags::new();
    if session.phase() == Phase::Editing {
        tags.insert(Tag::Editing);
    }
    if session.has_content() {
        tags.insert(Tag::HasContent);
    }
    if session.is_locked() {
        tags.insert(Tag::Locked);
    }
    if session.identifier().is_some() {
        tags.insert(Tag::HasIdentifier);
    }
    if sharing_enabled {
        tags.insert(Tag::SharingEnabled);
    }
    tags
}

/// A key-down event. `key` is compared case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: char,
    pub ctrl: bool,
    pub shift: bool,
}

impl KeyEvent {
    pub fn plain(key: char) -> Self {
        Self {
            key,
            ctrl: false,
            shift: false,
        }
    }

    pub fn ctrl(key: char) -> Self {
        Self {
            ctrl: true,
            ..Self::plain(key)
        }
    }

    pub fn ctrl_shift(key: char) -> Self {
        Self {
            ctrl: true,
            shift: true,
            ..Self::plain(key)
        }
    }

    fn is(&self, key: char) -> bool {
        self.key.eq_ignore_ascii_case(&key)
    }
}

pub struct Command {
    pub name: CommandName,
    pub label: &'static str,
    pub shortcut_description: &'static str,
    pub requires: &'static [Tag],
    shortcut: fn(&KeyEvent, &Tags) -> bool,
}

impl Command {
    pub fn is_available(&self, tags: &Tags) -> bool {
        self.requires.iter().all(|t| tags.contains(t))
    }

    pub fn matches(&self, event: &KeyEvent, tags: &Tags) -> bool {
        (self.shortcut)(event, tags)
    }
}

pub const COMMANDS: &[Command] = &[
    Command {
        name: CommandName::Save,
        label: "Save",
        shortcut_description: "control + s",
        requires: &[Tag::Editing, Tag::HasContent],
        shortcut: |e, _| e.ctrl && e.is('s'),
    },
    Command {
        name: CommandName::New,
        label: "New",
        shortcut_description: "control + n",
        requires: &[],
        shortcut: |e, _| e.ctrl && e.is('n'),
    },
    Command {
        name: CommandName::Duplicate,
        label: "Duplicate & Edit",
        shortcut_description: "control + d",
        requires: &[Tag::Locked],
        shortcut: |e, tags| tags.contains(&Tag::Locked) && e.ctrl && e.is('d'),
    },
    Command {
        name: CommandName::Raw,
        label: "Just Text",
        shortcut_description: "control + shift + r",
        requires: &[Tag::HasIdentifier],
        shortcut: |e, _| e.ctrl && e.shift && e.is('r'),
    },
    Command {
        name: CommandName::Share,
        label: "Twitter",
        shortcut_description: "control + shift + t",
        requires: &[Tag::Locked, Tag::SharingEnabled],
        shortcut: |e, tags| {
            tags.contains(&Tag::SharingEnabled)
                && tags.contains(&Tag::Locked)
                && e.ctrl
                && e.shift
                && e.is('t')
        },
    },
];

pub fn command(name: CommandName) -> &'static Command {
    let index = match name {
        CommandName::Save => 0,
        CommandName::New => 1,
        CommandName::Duplicate => 2,
        CommandName::Raw => 3,
        CommandName::Share => 4,
    };
    &COMMANDS[index]
}

/// Label and shortcut shown while hovering a command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HoverHint {
    pub label: &'static str,
    pub shortcut: &'static str,
    pub enabled: bool,
}

#[derive(Debug, Clone, Default)]
pub struct CommandSurface {
    tags: Tags,
    enabled: BTreeSet<CommandName>,
}

impl CommandSurface {
    pub fn new(tags: Tags) -> Self {
        let mut surface = Self::default();
        surface.refresh(tags);
        surface
    }

    /// Recomputes the enabled set. Called on every session transition.
    pub fn refresh(&mut self, tags: Tags) {
        self.enabled = COMMANDS
            .iter()
            .filter(|c| c.is_available(&tags))
            .map(|c| c.name)
            .collect();
        self.tags = tags;
    }

    pub fn tags(&self) -> &Tags {
        &self.tags
    }

    pub fn enabled(&self) -> &BTreeSet<CommandName> {
        &self.enabled
    }

    pub fn is_enabled(&self, name: CommandName) -> bool {
        self.enabled.contains(&name)
    }

    /// First command whose shortcut matches, in declaration order.
    pub fn match_shortcut(&self, event: &KeyEvent) -> Option<CommandName> {
        COMMANDS
            .iter()
            .find(|c| c.matches(event, &self.tags))
            .map(|c| c.name)
    }

    /// Click guard: a command only fires while it carries the enabled tag.
    pub fn click(&self, name: CommandName) -> Option<CommandName> {
        self.is_enabled(name).then_some(name)
    }

    pub fn hover(&self, name: CommandName) -> HoverHint {
        let cmd = command(name);
        HoverHint {
            label: cmd.label,
            shortcut: cmd.shortcut_description,
            enabled: self.is_enabled(name),
        }
    }
}
