//! Command dispatch: decides the state change and reply for each command.

use crate::domain::{Command, Response, ResponseKind, RollCall, RollCallResponse};
use crate::error::BotError;
use crate::render::render_roll_call;
use crate::store::DataStore;

const NO_ROLL_CALL: &str = "No roll call in progress";
const STARTED: &str = "Roll call started";
const ENDED: &str = "Roll call ended";
const QUIET: &str = "Ok fine, I'll be quiet. 🤐";

/// Commands the bot understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotCommand {
    StartRollCall,
    EndRollCall,
    Respond(ResponseKind),
    WhosIn,
    Shh,
}

impl BotCommand {
    /// Look up a command by its keyword.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "start_roll_call" => Some(Self::StartRollCall),
            "end_roll_call" => Some(Self::EndRollCall),
            "in" => Some(Self::Respond(ResponseKind::In)),
            "out" => Some(Self::Respond(ResponseKind::Out)),
            "maybe" => Some(Self::Respond(ResponseKind::Maybe)),
            "whos_in" => Some(Self::WhosIn),
            "shh" => Some(Self::Shh),
            _ => None,
        }
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::StartRollCall => "start_roll_call",
            Self::EndRollCall => "end_roll_call",
            Self::Respond(kind) => kind.as_str(),
            Self::WhosIn => "whos_in",
            Self::Shh => "shh",
        }
    }
}

/// The roll call bot, generic over where roll calls are kept.
#[derive(Debug)]
pub struct WhosInBot<S> {
    store: S,
}

impl<S: DataStore> WhosInBot<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Dispatch a command and build the reply for its chat.
    ///
    /// # Errors
    ///
    /// `UnrecognizedCommand` for names outside the command table, or the
    /// store's error if a read or write fails.
    pub fn handle_command(&mut self, command: &Command) -> Result<Response, BotError> {
        let _span =
            tracing::info_span!("command", name = %command.name, chat_id = command.chat_id)
                .entered();

        let Some(kind) = BotCommand::from_name(&command.name) else {
            tracing::warn!("not a bot command");
            return Err(BotError::UnrecognizedCommand {
                name: command.name.clone(),
            });
        };
        tracing::info!(command = kind.name(), "handling command");

        match kind {
            BotCommand::StartRollCall => self.handle_start(command),
            BotCommand::EndRollCall => self.handle_end(command),
            BotCommand::Respond(status) => self.handle_response(command, status),
            BotCommand::WhosIn => self.handle_whos_in(command),
            BotCommand::Shh => self.handle_shh(command),
        }
    }

    fn handle_start(&mut self, command: &Command) -> Result<Response, BotError> {
        let roll_call = RollCall::new(command.chat_id, command.params_string());
        self.store.start_roll_call(roll_call)?;
        Ok(Response::new(command.chat_id, STARTED))
    }

    fn handle_end(&mut self, command: &Command) -> Result<Response, BotError> {
        let Some(roll_call) = self.active_roll_call(command)? else {
            return Ok(Response::new(command.chat_id, NO_ROLL_CALL));
        };
        self.store.end_roll_call(&roll_call)?;
        Ok(Response::new(command.chat_id, ENDED))
    }

    fn handle_shh(&mut self, command: &Command) -> Result<Response, BotError> {
        let Some(roll_call) = self.active_roll_call(command)? else {
            return Ok(Response::new(command.chat_id, NO_ROLL_CALL));
        };
        self.store.set_quiet(&roll_call, true)?;
        Ok(Response::new(command.chat_id, QUIET))
    }

    fn handle_whos_in(&self, command: &Command) -> Result<Response, BotError> {
        let Some(roll_call) = self.active_roll_call(command)? else {
            return Ok(Response::new(command.chat_id, NO_ROLL_CALL));
        };
        Ok(Response::new(command.chat_id, render_roll_call(&roll_call)))
    }

    fn handle_response(
        &mut self,
        command: &Command,
        status: ResponseKind,
    ) -> Result<Response, BotError> {
        let Some(mut roll_call) = self.active_roll_call(command)? else {
            return Ok(Response::new(command.chat_id, NO_ROLL_CALL));
        };

        let response = RollCallResponse {
            chat_id: command.chat_id,
            user_id: command.from.user_id,
            name: command.from.username.clone(),
            response: status,
            reason: command.params_string(),
        };
        self.store.set_response(response.clone())?;

        // Render from the snapshot we already hold rather than reading again.
        roll_call.record(response);
        Ok(Response::new(command.chat_id, render_roll_call(&roll_call)))
    }

    fn active_roll_call(&self, command: &Command) -> Result<Option<RollCall>, BotError> {
        let roll_call = self.store.get_roll_call(command.chat_id)?;
        if roll_call.is_none() {
            tracing::debug!("no roll call in progress");
        }
        Ok(roll_call)
    }
}
