use dddb_client_core::reduce;
use iced::Task as Command;
use tracing::{debug, warn};

use super::{DddbApp, Message};

impl DddbApp {
    pub fn update(&mut self, message: Message) -> Command<Message> {
        match message {
            Message::CoreAction(action) => {
                if let Some(err) = action.api_error() {
                    warn!(error = %err, "backend call failed");
                }
                let (new_state, effects) = reduce(&self.state, &action);
                self.state = new_state;

                debug!(effects = effects.len(), page = ?self.state.page, "reduced action");
                crate::effects::handle_effects(&self.api, &self.settings.download_dir, effects)
            }

            Message::Tick | Message::Idle => Command::none(),
        }
    }
}
