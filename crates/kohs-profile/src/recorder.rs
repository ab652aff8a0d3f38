use chrono::Utc;
use kohs_engine::{
    CompleteSessionError, GameType, SessionDifficulty, SessionId, SessionMetrics, SessionRecord,
    SessionRecorder,
};
use rand::Rng as _;
use tracing::{debug, error, info, warn};

use crate::{AnalyticsSummary, ProfileStore, UserProfile};

const BASE36: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const RANDOM_SUFFIX_LEN: usize = 7;

/// Records game sessions into a persisted [`UserProfile`].
///
/// At most one session is pending at a time. A pending session only reaches
/// the profile when it is completed; starting another session discards it.
/// Every change to the profile is saved immediately. Save failures are
/// logged and the in-memory profile stays authoritative for this run.
#[derive(Debug)]
pub struct ProfileRecorder {
    store: ProfileStore,
    profile: UserProfile,
    pending: Option<SessionRecord>,
}

impl ProfileRecorder {
    /// Loads the profile from `store`, assigning a temporary user id if it
    /// has none.
    #[must_use]
    pub fn open(mut store: ProfileStore) -> Self {
        let profile = store.load();
        let mut recorder = Self {
            store,
            profile,
            pending: None,
        };
        recorder.ensure_user_id();
        recorder
    }

    #[must_use]
    pub fn user_id(&self) -> &str {
        &self.profile.user_id
    }

    #[must_use]
    pub const fn profile(&self) -> &UserProfile {
        &self.profile
    }

    #[must_use]
    pub const fn store(&self) -> &ProfileStore {
        &self.store
    }

    /// The session started but not yet completed, if any.
    #[must_use]
    pub const fn pending(&self) -> Option<&SessionRecord> {
        self.pending.as_ref()
    }

    pub fn sessions_by_game(&self, game_type: GameType) -> impl Iterator<Item = &SessionRecord> {
        self.profile
            .sessions
            .iter()
            .filter(move |s| s.game_type == game_type)
    }

    #[must_use]
    pub fn analytics(&self) -> AnalyticsSummary {
        AnalyticsSummary::from_sessions(&self.profile.sessions)
    }

    /// Deletes every stored session and starts over with a new temporary id.
    pub fn clear_all_data(&mut self) {
        if let Err(e) = self.store.clear() {
            error!(store = %self.store, "failed to clear profile: {e}");
        }
        self.profile = UserProfile::default();
        self.ensure_user_id();
        info!(user = %self.profile.user_id, "profile data cleared");
    }

    fn ensure_user_id(&mut self) {
        if self.profile.has_user_id() {
            return;
        }
        let now = Utc::now().timestamp_millis();
        self.profile.user_id = format!("temp_{now}_{}", random_suffix());
        self.profile.created_at = now;
        debug!(user = %self.profile.user_id, "assigned temporary user id");
        self.persist();
    }

    fn persist(&mut self) {
        if let Err(e) = self.store.save(&self.profile) {
            error!(store = %self.store, "failed to save profile: {e}");
        }
    }
}

impl SessionRecorder for ProfileRecorder {
    fn start_session(&mut self, game_type: GameType, difficulty: SessionDifficulty) -> SessionId {
        let timestamp = Utc::now().timestamp_millis();
        let id = SessionId(format!("{game_type}_{timestamp}_{}", random_suffix()));
        if let Some(previous) = &self.pending {
            debug!(session = %previous.id, "discarding unfinished session");
        }
        self.pending = Some(SessionRecord {
            id: id.clone(),
            game_type,
            difficulty,
            timestamp,
            completed: false,
            time_seconds: 0.0,
            rotations: None,
            drags: None,
            errors: None,
        });
        info!(session = %id, %game_type, %difficulty, "session started");
        id
    }

    fn complete_session(&mut self, metrics: SessionMetrics) -> Result<(), CompleteSessionError> {
        let Some(mut session) = self.pending.take() else {
            warn!("no active session to complete");
            return Err(CompleteSessionError::NoActiveSession);
        };

        session.completed = true;
        session.time_seconds = metrics.time_seconds;
        session.rotations = metrics.rotations;
        session.drags = metrics.drags;
        session.errors = metrics.errors;
        info!(
            session = %session.id,
            time_seconds = session.time_seconds,
            "session completed"
        );

        self.profile.sessions.push(session);
        self.persist();
        Ok(())
    }

    fn sessions(&self) -> Vec<SessionRecord> {
        self.profile.sessions.clone()
    }
}

fn random_suffix() -> String {
    let mut rng = rand::rng();
    (0..RANDOM_SUFFIX_LEN)
        .map(|_| char::from(BASE36[rng.random_range(0..BASE36.len())]))
        .collect()
}
