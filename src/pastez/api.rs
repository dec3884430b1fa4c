//! # API Facade
//!
//! [`PastezApi`] is the single owner of the current [`Session`] and the only
//! place sessions are replaced. Every replacement goes through one private
//! method that also refreshes the view and the command surface, so those two
//! can never disagree with the session.
//!
//! ## Entry points
//!
//! - **Direct operations** (`load_document`, `new_document`, `edit`, `save`,
//!   `duplicate`) return structured results so callers such as the CLI can
//!   report what happened.
//! - **Command dispatch** (`handle_key`, `click`) mirrors the interactive UI:
//!   unavailable commands are silent no-ops and outcomes are reported through
//!   notices and [`Effect`]s.
//!
//! ## Generic Over Store and Highlighter
//!
//! - Production: `PastezApi<HttpStore, TreeSitterHighlighter>`
//! - Testing: `PastezApi<InMemoryStore, StubHighlighter>`
//!
//! Taking `&mut self` for every transition serializes them; the `Saving`
//! phase is what keeps a second save from being submitted.

use crate::commands::{tags_for, CommandName, CommandSurface, HoverHint, KeyEvent};
use crate::config::PastezConfig;
use crate::error::{PastezError, Result};
use crate::highlight::Highlighter;
use crate::language::{language_for_extension, split_key};
use crate::session::Session;
use crate::store::DocumentStore;
use crate::sync::SyncClient;
use crate::view::{MessageLevel, Notifications, Transition, ViewState};

/// Something the front end has to do outside the page itself.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    None,
    /// Replace the current page with this URL.
    Navigate(String),
    /// Open this URL in a new window.
    OpenExternal(String),
}

pub struct PastezApi<S: DocumentStore, H: Highlighter> {
    sync: SyncClient<S, H>,
    config: PastezConfig,
    session: Session,
    surface: CommandSurface,
    view: ViewState,
    notices: Notifications,
}

impl<S: DocumentStore, H: Highlighter> PastezApi<S, H> {
    pub fn new(sync: SyncClient<S, H>, config: PastezConfig) -> Self {
        let session = Session::new();
        let mut view = ViewState::new(config.app_name.clone());
        view.sync(&session, Transition::Started { record_history: false });
        let surface = CommandSurface::new(tags_for(&session, config.sharing_enabled));

        Self {
            sync,
            config,
            session,
            surface,
            view,
            notices: Notifications::default(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn surface(&self) -> &CommandSurface {
        &self.surface
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn notices_mut(&mut self) -> &mut Notifications {
        &mut self.notices
    }

    pub fn sync(&self) -> &SyncClient<S, H> {
        &self.sync
    }

    pub fn config(&self) -> &PastezConfig {
        &self.config
    }

    fn replace(&mut self, session: Session, transition: Transition) {
        log::debug!("session {:?} -> {:?}", self.session.phase(), session.phase());
        self.session = session;
        self.view.sync(&self.session, transition);
        self.surface
            .refresh(tags_for(&self.session, self.config.sharing_enabled));
    }

    /// Opens `path` (`key` or `key.ext`). A document that cannot be loaded
    /// is replaced by a new one; the return value says which happened.
    pub fn load_document(&mut self, path: &str) -> bool {
        let (key, ext) = split_key(path);
        let hint = ext.map(language_for_extension);

        match Session::load(&self.sync, key, hint) {
            Ok(session) => {
                self.replace(session, Transition::Loaded);
                true
            }
            Err(e) => {
                log::debug!("could not load {}: {}", key, e);
                self.new_document(false);
                false
            }
        }
    }

    /// Discards the current session. `hide_history` skips the `/` history
    /// entry.
    pub fn new_document(&mut self, hide_history: bool) {
        self.replace(
            Session::new(),
            Transition::Started {
                record_history: !hide_history,
            },
        );
    }

    /// Replaces the text of the unsaved document.
    pub fn edit(&mut self, content: impl Into<String>) -> Result<()> {
        let edited = self.session.edit(content)?;
        self.replace(edited, Transition::Edited);
        Ok(())
    }

    /// Saves the current text. Store failures raise an error notice and
    /// leave the document editable.
    pub fn save(&mut self) -> Result<()> {
        let saving = self.session.begin_save()?;
        self.replace(saving, Transition::Edited);

        match self.sync.store_document(self.session.content()) {
            Ok(doc) => {
                let locked = self.session.lock(doc);
                self.replace(locked, Transition::Saved);
                Ok(())
            }
            Err(e) => {
                let reverted = self.session.revert();
                self.replace(reverted, Transition::Edited);
                let message = match &e {
                    PastezError::Store { message } => message.clone(),
                    other => other.to_string(),
                };
                self.notices.push(MessageLevel::Error, message);
                Err(e)
            }
        }
    }

    /// Starts an editable copy of the locked document.
    pub fn duplicate(&mut self) -> Result<()> {
        let copy = self.session.duplicate()?;
        self.replace(copy, Transition::Started { record_history: true });
        Ok(())
    }

    /// Absolute URL of the page currently shown.
    pub fn page_url(&self) -> String {
        format!("{}{}", self.config.server_url(), self.view.location())
    }

    pub fn raw_url(&self) -> Option<String> {
        self.session
            .identifier()
            .map(|id| format!("{}/raw/{}", self.config.server_url(), id))
    }

    pub fn share_url(&self) -> Option<String> {
        if !self.config.sharing_enabled || !self.session.is_locked() {
            return None;
        }
        Some(format!(
            "{}{}",
            self.config.share_endpoint,
            urlencoding::encode(&self.page_url())
        ))
    }

    /// Dispatches a key-down event. `Some` means a command claimed the
    /// event and its default behaviour should be suppressed.
    pub fn handle_key(&mut self, event: &KeyEvent) -> Option<Effect> {
        let name = self.surface.match_shortcut(event)?;
        log::debug!("shortcut {:?} -> {}", event, name);
        Some(self.run(name))
    }

    /// Clicks a command. Disabled commands do nothing.
    pub fn click(&mut self, name: CommandName) -> Effect {
        match self.surface.click(name) {
            Some(name) => self.run(name),
            None => Effect::None,
        }
    }

    pub fn hover(&self, name: CommandName) -> HoverHint {
        self.surface.hover(name)
    }

    fn run(&mut self, name: CommandName) -> Effect {
        match name {
            CommandName::Save => {
                if self.session.has_content() {
                    // Rejections are no-ops and store failures already
                    // raised a notice.
                    let _ = self.save();
                }
                Effect::None
            }
            CommandName::New => {
                let hide_history = self.session.identifier().is_none();
                self.new_document(hide_history);
                Effect::None
            }
            CommandName::Duplicate => {
                let _ = self.duplicate();
                Effect::None
            }
            CommandName::Raw => self.raw_url().map_or(Effect::None, Effect::Navigate),
            CommandName::Share => self.share_url().map_or(Effect::None, Effect::OpenExternal),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Rejection;
    use crate::highlight::fixtures::StubHighlighter;
    use crate::session::Phase;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;
    use crate::view::{HistoryEntry, Surface};
    use std::collections::BTreeSet;

    type TestApi = PastezApi<InMemoryStore, StubHighlighter>;

    fn config(sharing: bool) -> PastezConfig {
        PastezConfig {
            server: "http://paste.test".into(),
            sharing_enabled: sharing,
            ..PastezConfig::default()
        }
    }

    fn api_with(fixture: StoreFixture, highlighter: StubHighlighter, sharing: bool) -> TestApi {
        PastezApi::new(SyncClient::new(fixture.store, highlighter), config(sharing))
    }

    fn api() -> TestApi {
        api_with(
            StoreFixture::new(),
            StubHighlighter::new().detecting("python"),
            true,
        )
    }

    fn enabled(api: &TestApi) -> Vec<CommandName> {
        api.surface().enabled().iter().copied().collect()
    }

    #[test]
    fn starts_with_a_new_session() {
        let api = api();
        assert_eq!(api.session().phase(), Phase::New);
        assert_eq!(api.view().title(), "pastez");
        assert!(api.view().history().is_empty());
        assert_eq!(enabled(&api), [CommandName::New]);
    }

    #[test]
    fn missing_document_falls_back_to_new() {
        let mut api = api();
        assert!(!api.load_document("doesnotexist"));
        assert_eq!(api.session().phase(), Phase::New);
        assert!(api.notices_mut().drain().is_empty());
    }

    #[test]
    fn offline_store_falls_back_to_new() {
        let mut api = api_with(
            StoreFixture::new().with_document("abc", "x").offline(),
            StubHighlighter::new(),
            false,
        );
        assert!(!api.load_document("abc"));
        assert_eq!(api.session().phase(), Phase::New);
    }

    #[test]
    fn load_splits_the_extension_into_a_hint() {
        let mut api = api_with(
            StoreFixture::new().with_document("abc123", "print(1)\n"),
            StubHighlighter::new().detecting("ruby"),
            false,
        );
        assert!(api.load_document("abc123.py"));
        assert_eq!(api.sync().store().fetch_count(), 1);
        assert_eq!(
            api.sync().highlighter().requested.borrow().as_slice(),
            ["python"]
        );
        // Python is unknown to the stub, so detection decided.
        assert_eq!(api.session().language(), Some("ruby"));
        assert_eq!(api.session().identifier(), Some("abc123"));
        assert_eq!(api.view().location(), "/abc123.rb");
        assert_eq!(api.view().gutter().len(), 2);
    }

    #[test]
    fn save_locks_and_flips_availability() {
        let mut api = api();
        api.edit("print('hi')").unwrap();
        assert_eq!(enabled(&api), [CommandName::Save, CommandName::New]);

        api.save().unwrap();
        let id = api.session().identifier().unwrap().to_string();
        assert_eq!(api.session().phase(), Phase::Locked);
        assert_eq!(
            enabled(&api),
            [
                CommandName::New,
                CommandName::Duplicate,
                CommandName::Raw,
                CommandName::Share
            ]
        );
        assert_eq!(
            api.view().history(),
            [HistoryEntry {
                label: format!("pastez-{}", id),
                path: format!("/{}.py", id),
            }]
        );
        assert_eq!(api.view().title(), "pastez - py");
    }

    #[test]
    fn save_without_detected_language_has_bare_url() {
        let mut api = api_with(StoreFixture::new(), StubHighlighter::new(), false);
        api.edit("just words").unwrap();
        api.save().unwrap();
        let id = api.session().identifier().unwrap().to_string();
        assert_eq!(api.view().location(), format!("/{}", id));
    }

    #[test]
    fn second_save_is_rejected_without_network() {
        let mut api = api();
        api.edit("x = 1").unwrap();
        api.save().unwrap();
        assert!(matches!(
            api.save(),
            Err(PastezError::Rejected(Rejection::Locked))
        ));
        assert_eq!(api.sync().store().store_count(), 1);
        assert!(api.edit("y").is_err());
    }

    #[test]
    fn blank_save_is_rejected_without_network() {
        let mut api = api();
        api.edit("   \n").unwrap();
        assert!(matches!(
            api.save(),
            Err(PastezError::Rejected(Rejection::Blank))
        ));
        assert_eq!(api.click(CommandName::Save), Effect::None);
        assert_eq!(api.handle_key(&KeyEvent::ctrl('s')), Some(Effect::None));
        assert_eq!(api.sync().store().store_count(), 0);
        assert_eq!(api.session().phase(), Phase::Editing);
    }

    #[test]
    fn failed_save_raises_a_notice_and_keeps_text() {
        let mut api = api_with(
            StoreFixture::new().failing_saves("Document exceeds maximum length."),
            StubHighlighter::new(),
            false,
        );
        api.edit("long text").unwrap();
        assert!(api.save().is_err());
        assert_eq!(api.session().phase(), Phase::Editing);
        assert_eq!(api.session().content(), "long text");
        assert_eq!(enabled(&api), [CommandName::Save, CommandName::New]);

        let notices = api.notices_mut().drain();
        assert_eq!(notices.len(), 1);
        assert_eq!(notices[0].level, MessageLevel::Error);
        assert_eq!(notices[0].content, "Document exceeds maximum length.");
    }

    #[test]
    fn ctrl_s_saves_through_the_shortcut_table() {
        let mut api = api();
        api.edit("x = 1").unwrap();
        assert_eq!(api.handle_key(&KeyEvent::ctrl('s')), Some(Effect::None));
        assert!(api.session().is_locked());
        // A repeated Ctrl+S is claimed but does nothing.
        assert_eq!(api.handle_key(&KeyEvent::ctrl('s')), Some(Effect::None));
        assert_eq!(api.sync().store().store_count(), 1);
    }

    #[test]
    fn unmatched_keys_are_not_claimed() {
        let mut api = api();
        assert_eq!(api.handle_key(&KeyEvent::plain('a')), None);
        assert_eq!(api.handle_key(&KeyEvent::ctrl('d')), None);
    }

    #[test]
    fn duplicate_prefills_an_unsaved_copy() {
        let mut api = api_with(
            StoreFixture::new().with_document("k", "hello"),
            StubHighlighter::new(),
            false,
        );
        api.duplicate().unwrap_err();
        assert_eq!(api.click(CommandName::Duplicate), Effect::None);

        api.load_document("k");
        assert_eq!(api.click(CommandName::Duplicate), Effect::None);
        assert_eq!(api.session().phase(), Phase::Editing);
        assert_eq!(api.session().content(), "hello");
        assert_eq!(api.session().identifier(), None);
        assert_eq!(
            api.view().surface(),
            &Surface::Editor {
                text: "hello".into()
            }
        );
        assert_eq!(api.view().history().last().unwrap().path, "/");
        assert_eq!(api.sync().store().store_count(), 0);
    }

    #[test]
    fn duplicate_of_unlocked_session_is_a_no_op() {
        let mut api = api();
        api.edit("draft").unwrap();
        let before = api.session().clone();
        assert_eq!(api.handle_key(&KeyEvent::ctrl('d')), None);
        assert_eq!(api.click(CommandName::Duplicate), Effect::None);
        assert_eq!(api.session(), &before);
    }

    #[test]
    fn new_skips_history_for_unsaved_documents() {
        let mut api = api();
        api.edit("draft").unwrap();
        assert_eq!(api.click(CommandName::New), Effect::None);
        assert!(api.view().history().is_empty());

        api.edit("x = 1").unwrap();
        api.save().unwrap();
        api.handle_key(&KeyEvent::ctrl('n'));
        assert_eq!(api.session().phase(), Phase::New);
        assert_eq!(api.view().history().len(), 2);
        assert_eq!(api.view().history()[1].path, "/");
    }

    #[test]
    fn raw_and_share_targets() {
        let mut api = api_with(
            StoreFixture::new().with_document("abc", "x"),
            StubHighlighter::new().knowing("python"),
            true,
        );
        assert_eq!(api.click(CommandName::Raw), Effect::None);
        assert_eq!(api.click(CommandName::Share), Effect::None);

        api.load_document("abc.py");
        assert_eq!(
            api.click(CommandName::Raw),
            Effect::Navigate("http://paste.test/raw/abc".into())
        );
        assert_eq!(
            api.handle_key(&KeyEvent::ctrl_shift('t')),
            Some(Effect::OpenExternal(
                "https://twitter.com/share?url=http%3A%2F%2Fpaste.test%2Fabc.py".into()
            ))
        );
    }

    #[test]
    fn share_requires_the_deployment_flag() {
        let mut api = api_with(
            StoreFixture::new().with_document("abc", "x"),
            StubHighlighter::new(),
            false,
        );
        api.load_document("abc");
        assert_eq!(api.click(CommandName::Share), Effect::None);
        assert_eq!(api.share_url(), None);
        assert!(!api.hover(CommandName::Share).enabled);
        let expected: BTreeSet<_> = [CommandName::New, CommandName::Duplicate, CommandName::Raw]
            .into_iter()
            .collect();
        assert_eq!(api.surface().enabled(), &expected);
    }
}
