pub mod actor;
pub mod actor_client;

use rand::distributions::{Alphanumeric, DistString};
use std::collections::HashMap;
use std::sync::Arc;

use crate::config::GameSettings;
use crate::dictionary::{Dictionary, OutcomeImages};
use crate::error::domain_error::DomainError;
use crate::error::Error;
use crate::session::actor::SessionActor;
use crate::session::actor_client::SessionClient;
use crate::session::Session;
use crate::session_factory::actor_client::SessionFactoryClient;
use crate::storage::KeyValueStore;

pub struct SessionFactory {
    session_channels: HashMap<String, SessionClient>,
    game_settings: GameSettings,
    dictionary: Arc<Dictionary>,
    images: OutcomeImages,
    store: Arc<dyn KeyValueStore>,
}

impl SessionFactory {
    pub const DEFAULT_PROFILE: &'static str = "default";

    pub fn new(
        game_settings: GameSettings,
        dictionary: Arc<Dictionary>,
        images: OutcomeImages,
        store: Arc<dyn KeyValueStore>,
    ) -> Self {
        SessionFactory {
            session_channels: HashMap::default(),
            game_settings,
            dictionary,
            images,
            store,
        }
    }

    pub fn create_new_session(
        &mut self,
        profile: Option<&str>,
        session_factory: SessionFactoryClient,
    ) -> Result<String, Error> {
        let profile = profile
            .map(str::trim)
            .filter(|profile| !profile.is_empty())
            .unwrap_or(SessionFactory::DEFAULT_PROFILE);
        let session = Session::create(
            profile,
            self.dictionary.clone(),
            self.images.clone(),
            self.store.clone(),
            self.game_settings.clone(),
        )?;

        let id = self.create_unique_session_id();
        self.session_channels.insert(
            id.clone(),
            SessionActor::spawn(&id, session, self.game_settings.clone(), session_factory),
        );
        log::info!("Session created. SessionId: '{id}', Profile: '{profile}'.");

        Ok(id)
    }

    pub fn remove_session(&mut self, session_id: &str) -> Option<SessionClient> {
        self.session_channels.remove(session_id)
    }

    pub fn get_session(&self, session_id: &str) -> Result<&SessionClient, Error> {
        match self.session_channels.get(session_id) {
            Some(session) => Ok(session),
            None => Err(Error::Domain(DomainError::SessionDoesNotExist(
                session_id.to_string(),
            ))),
        }
    }

    fn create_unique_session_id(&self) -> String {
        loop {
            let id = Alphanumeric
                .sample_string(&mut rand::thread_rng(), 5)
                .replace('O', "P")
                .replace('0', "1")
                .replace('I', "J")
                .replace('l', "m");
            if !self.session_channels.contains_key(&id) {
                return id;
            }
        }
    }
}
