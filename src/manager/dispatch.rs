//! Bridge call dispatch.
//!
//! Errors are reported here and never propagate further: the manager stays
//! usable whatever the JavaScript side sends.

use tracing::{debug, error, warn};

use super::UiManager;
use crate::bridge::{Call, Command};
use crate::error::UiError;

impl UiManager {
    /// Decode and execute one raw bridge call, reporting any error.
    ///
    /// A query that fails to decode still answers its callback, if one can be
    /// read, with an empty response.
    pub fn dispatch_call(&mut self, call: &Call) {
        match Command::decode_call(call) {
            Ok(command) => self.dispatch(command),
            Err(err) => {
                if let (Some(callback), Some(bridge)) = (call.callback_id(), self.bridge()) {
                    bridge.response_block(callback).respond_empty();
                }
                report(&err);
            }
        }
    }

    /// Execute a command, reporting any error.
    pub fn dispatch(&mut self, command: Command) {
        if let Err(err) = self.execute(command) {
            report(&err);
        }
    }

    /// Execute a command and return its outcome.
    ///
    /// Queries need an attached bridge to answer through; without one they
    /// fail with [`UiError::NotAttached`] and no response is possible.
    pub fn execute(&mut self, command: Command) -> Result<(), UiError> {
        match command {
            Command::CreateView {
                tag,
                view_name,
                root_tag,
                props,
            } => self.create_view(tag, &view_name, root_tag, &props).map(|_| ()),
            Command::UpdateView {
                tag,
                view_name,
                props,
            } => self.update_view(tag, &view_name, &props),
            Command::ManageChildren {
                container_tag,
                update,
            } => self.manage_children(container_tag, &update),
            Command::RemoveSubviewsFromContainer { container_tag } => {
                self.remove_subviews_from_container(container_tag)
            }
            Command::Measure { tag, callback } => {
                let response = self
                    .bridge()
                    .map(|bridge| bridge.response_block(callback))
                    .ok_or(UiError::NotAttached)?;
                self.measure(tag, response)
            }
            Command::FindSubviewIn {
                tag,
                point,
                callback,
            } => {
                let response = self
                    .bridge()
                    .map(|bridge| bridge.response_block(callback))
                    .ok_or(UiError::NotAttached)?;
                self.find_subview_in(tag, point, response)
            }
            Command::SetJsResponder {
                tag,
                block_native_responder,
            } => {
                debug!(tag, block_native_responder, "setJSResponder");
                Ok(())
            }
            Command::ClearJsResponder => {
                debug!("clearJSResponder");
                Ok(())
            }
            Command::Blur { tag } => {
                debug!(tag, "blur");
                Ok(())
            }
        }
    }
}

fn report(err: &UiError) {
    if err.is_critical() {
        error!(%err, "UI manager command failed");
    } else {
        warn!(%err, "UI manager command failed");
    }
}
