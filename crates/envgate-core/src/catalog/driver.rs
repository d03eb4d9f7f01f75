use std::collections::VecDeque;

use tracing::{debug, warn};
use url::Url;

use super::{Catalog, Effect, Event};
use crate::error::EnvgateResult;
use crate::handoff::HandoffDispatcher;
use crate::EnvironmentDirectory;

/// Result of carrying out one effect
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Remote result to feed back into the catalog
    Feedback(Event),
    /// Selection stored and navigation issued
    HandedOff(Url),
}

/// Async driver executing catalog effects against the directory backend and
/// the handoff dispatcher
pub struct CatalogSession<'a> {
    directory: &'a dyn EnvironmentDirectory,
    handoff: &'a HandoffDispatcher,
}

impl<'a> CatalogSession<'a> {
    pub fn new(directory: &'a dyn EnvironmentDirectory, handoff: &'a HandoffDispatcher) -> Self {
        Self { directory, handoff }
    }

    /// Carry out a single effect. Directory failures become failure events;
    /// only a failed handoff (storage or navigation) is returned as an error.
    pub async fn perform(&self, effect: Effect) -> EnvgateResult<Outcome> {
        let event = match effect {
            Effect::Load { generation } => {
                let result = self.directory.list().await.map_err(|e| {
                    warn!("Failed to load environments: {}", e);
                    e.user_message().to_string()
                });
                Event::Loaded { generation, result }
            }
            Effect::Create {
                submission,
                display_name,
                description,
            } => Event::Created {
                submission,
                result: self
                    .directory
                    .create(&display_name, &description)
                    .await
                    .map_err(|e| {
                        warn!("Failed to create environment {}: {}", display_name, e);
                        e.user_message().to_string()
                    }),
            },
            Effect::Update {
                submission,
                name,
                display_name,
                description,
            } => Event::Updated {
                submission,
                result: self
                    .directory
                    .update(&name, &display_name, &description)
                    .await
                    .map_err(|e| {
                        warn!("Failed to update environment {}: {}", name, e);
                        e.user_message().to_string()
                    }),
            },
            Effect::Delete { submission, name } => Event::Deleted {
                submission,
                result: self.directory.delete(&name).await.map_err(|e| {
                    warn!("Failed to delete environment {}: {}", name, e);
                    e.user_message().to_string()
                }),
            },
            Effect::Handoff { environment } => {
                return Ok(Outcome::HandedOff(self.handoff.dispatch(&environment)?));
            }
        };
        Ok(Outcome::Feedback(event))
    }

    /// Apply `event` and run every effect it causes, feeding results back
    /// until the catalog settles. Returns the handoff URL when the flow ended
    /// by navigating away.
    pub async fn dispatch(&self, catalog: &mut Catalog, event: Event) -> EnvgateResult<Option<Url>> {
        let mut pending = VecDeque::from([event]);
        let mut handed_off = None;

        while let Some(event) = pending.pop_front() {
            for effect in catalog.update(event) {
                debug!("Performing {:?}", effect);
                match self.perform(effect).await? {
                    Outcome::Feedback(event) => pending.push_back(event),
                    Outcome::HandedOff(url) => handed_off = Some(url),
                }
            }
        }

        Ok(handed_off)
    }
}
