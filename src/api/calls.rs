//! Calls: `/communications/calls`, call actions and per-call collections
//!
//! Call control is only available to applications with the calling
//! permissions; a delegated token gets a 403 for most of these.

use serde_json::Value;

use super::client::GraphClient;
use super::query::ODataQuery;
use super::under;
use crate::error::{require, Result};
use crate::models::{
    AnswerRequest, AudioRoutingGroup, Call, CallParticipant, ChangeScreenSharingRoleRequest,
    ClientContextRequest, CommsOperation, ContentSharingSession, InviteParticipantsRequest,
    LogTeleconferenceDeviceQualityRequest, PlayPromptRequest, RecordResponseRequest,
    RedirectRequest, RejectRequest, SendDtmfTonesRequest, StartHoldMusicRequest, TransferRequest,
    UpdateRecordingStatusRequest,
};

const CALLS: [&str; 2] = ["communications", "calls"];

pub struct CallsApi<'a> {
    client: &'a GraphClient,
}

fn call_path(call_id: &str) -> Result<[&str; 3]> {
    let call_id = require("call_id", call_id)?;
    Ok(["communications", "calls", call_id])
}

/// `/communications/calls/{call_id}/{collection}/{item_id}`
fn call_item<'p>(
    call_id: &'p str,
    collection: &'p str,
    item_name: &'static str,
    item_id: &'p str,
) -> Result<[&'p str; 5]> {
    let [c, k, call_id] = call_path(call_id)?;
    let item_id = require(item_name, item_id)?;
    Ok([c, k, call_id, collection, item_id])
}

impl<'a> CallsApi<'a> {
    pub(crate) fn new(client: &'a GraphClient) -> Self {
        Self { client }
    }

    // -- Calls --

    pub async fn list_calls(&self, query: &ODataQuery) -> Result<Value> {
        self.client.get(&CALLS, query).await
    }

    pub async fn count_calls(&self, query: &ODataQuery) -> Result<u64> {
        self.client
            .get_count(&under(&CALLS, &["$count"]), query)
            .await
    }

    /// Place an outgoing call or join a meeting as a bot.
    pub async fn create_call(&self, call: &Call) -> Result<Value> {
        self.client.post(&CALLS, call).await
    }

    pub async fn get_call(&self, call_id: &str, query: &ODataQuery) -> Result<Value> {
        let path = call_path(call_id)?;
        self.client.get(&path, query).await
    }

    pub async fn update_call(&self, call_id: &str, call: &Call) -> Result<Value> {
        let path = call_path(call_id)?;
        self.client.patch(&path, call).await
    }

    /// Hang up.
    pub async fn delete_call(&self, call_id: &str) -> Result<()> {
        let path = call_path(call_id)?;
        self.client.delete(&path).await
    }

    pub async fn log_teleconference_device_quality(
        &self,
        body: &LogTeleconferenceDeviceQualityRequest,
    ) -> Result<Value> {
        self.client
            .post(&under(&CALLS, &["logTeleconferenceDeviceQuality"]), body)
            .await
    }

    // -- Call actions --

    pub async fn add_large_gallery_view(
        &self,
        call_id: &str,
        body: &ClientContextRequest,
    ) -> Result<Value> {
        self.action(call_id, "addLargeGalleryView", body).await
    }

    /// Answer an incoming call. Media and modalities are required by the service.
    pub async fn answer(&self, call_id: &str, body: &AnswerRequest) -> Result<Value> {
        self.action(call_id, "answer", body).await
    }

    pub async fn cancel_media_processing(
        &self,
        call_id: &str,
        body: &ClientContextRequest,
    ) -> Result<Value> {
        self.action(call_id, "cancelMediaProcessing", body).await
    }

    pub async fn change_screen_sharing_role(
        &self,
        call_id: &str,
        body: &ChangeScreenSharingRoleRequest,
    ) -> Result<Value> {
        self.action(call_id, "changeScreenSharingRole", body).await
    }

    /// Must be sent at least every 45 minutes or the service ends the call.
    pub async fn keep_alive(&self, call_id: &str) -> Result<Value> {
        let path = call_path(call_id)?;
        self.client.post_empty(&under(&path, &["keepAlive"])).await
    }

    pub async fn mute(&self, call_id: &str, body: &ClientContextRequest) -> Result<Value> {
        self.action(call_id, "mute", body).await
    }

    pub async fn play_prompt(&self, call_id: &str, body: &PlayPromptRequest) -> Result<Value> {
        self.action(call_id, "playPrompt", body).await
    }

    pub async fn record_response(
        &self,
        call_id: &str,
        body: &RecordResponseRequest,
    ) -> Result<Value> {
        self.action(call_id, "recordResponse", body).await
    }

    pub async fn redirect(&self, call_id: &str, body: &RedirectRequest) -> Result<Value> {
        self.action(call_id, "redirect", body).await
    }

    pub async fn reject(&self, call_id: &str, body: &RejectRequest) -> Result<Value> {
        self.action(call_id, "reject", body).await
    }

    pub async fn send_dtmf_tones(
        &self,
        call_id: &str,
        body: &SendDtmfTonesRequest,
    ) -> Result<Value> {
        self.action(call_id, "sendDtmfTones", body).await
    }

    pub async fn subscribe_to_tone(
        &self,
        call_id: &str,
        body: &ClientContextRequest,
    ) -> Result<Value> {
        self.action(call_id, "subscribeToTone", body).await
    }

    pub async fn transfer(&self, call_id: &str, body: &TransferRequest) -> Result<Value> {
        self.action(call_id, "transfer", body).await
    }

    pub async fn unmute(&self, call_id: &str, body: &ClientContextRequest) -> Result<Value> {
        self.action(call_id, "unmute", body).await
    }

    pub async fn update_recording_status(
        &self,
        call_id: &str,
        body: &UpdateRecordingStatusRequest,
    ) -> Result<Value> {
        self.action(call_id, "updateRecordingStatus", body).await
    }

    async fn action<B>(&self, call_id: &str, action: &str, body: &B) -> Result<Value>
    where
        B: serde::Serialize + ?Sized,
    {
        let path = call_path(call_id)?;
        self.client.post(&under(&path, &[action]), body).await
    }

    // -- Audio routing groups --

    pub async fn list_audio_routing_groups(
        &self,
        call_id: &str,
        query: &ODataQuery,
    ) -> Result<Value> {
        self.list_in(call_id, "audioRoutingGroups", query).await
    }

    pub async fn count_audio_routing_groups(
        &self,
        call_id: &str,
        query: &ODataQuery,
    ) -> Result<u64> {
        self.count_in(call_id, "audioRoutingGroups", query).await
    }

    pub async fn create_audio_routing_group(
        &self,
        call_id: &str,
        group: &AudioRoutingGroup,
    ) -> Result<Value> {
        self.create_in(call_id, "audioRoutingGroups", group).await
    }

    pub async fn get_audio_routing_group(
        &self,
        call_id: &str,
        group_id: &str,
        query: &ODataQuery,
    ) -> Result<Value> {
        let path = call_item(call_id, "audioRoutingGroups", "group_id", group_id)?;
        self.client.get(&path, query).await
    }

    pub async fn update_audio_routing_group(
        &self,
        call_id: &str,
        group_id: &str,
        group: &AudioRoutingGroup,
    ) -> Result<Value> {
        let path = call_item(call_id, "audioRoutingGroups", "group_id", group_id)?;
        self.client.patch(&path, group).await
    }

    pub async fn delete_audio_routing_group(&self, call_id: &str, group_id: &str) -> Result<()> {
        let path = call_item(call_id, "audioRoutingGroups", "group_id", group_id)?;
        self.client.delete(&path).await
    }

    // -- Content sharing sessions --

    pub async fn list_content_sharing_sessions(
        &self,
        call_id: &str,
        query: &ODataQuery,
    ) -> Result<Value> {
        self.list_in(call_id, "contentSharingSessions", query).await
    }

    pub async fn count_content_sharing_sessions(
        &self,
        call_id: &str,
        query: &ODataQuery,
    ) -> Result<u64> {
        self.count_in(call_id, "contentSharingSessions", query)
            .await
    }

    pub async fn create_content_sharing_session(
        &self,
        call_id: &str,
        session: &ContentSharingSession,
    ) -> Result<Value> {
        self.create_in(call_id, "contentSharingSessions", session)
            .await
    }

    pub async fn get_content_sharing_session(
        &self,
        call_id: &str,
        session_id: &str,
        query: &ODataQuery,
    ) -> Result<Value> {
        let path = call_item(call_id, "contentSharingSessions", "session_id", session_id)?;
        self.client.get(&path, query).await
    }

    pub async fn update_content_sharing_session(
        &self,
        call_id: &str,
        session_id: &str,
        session: &ContentSharingSession,
    ) -> Result<Value> {
        let path = call_item(call_id, "contentSharingSessions", "session_id", session_id)?;
        self.client.patch(&path, session).await
    }

    pub async fn delete_content_sharing_session(
        &self,
        call_id: &str,
        session_id: &str,
    ) -> Result<()> {
        let path = call_item(call_id, "contentSharingSessions", "session_id", session_id)?;
        self.client.delete(&path).await
    }

    // -- Operations --

    pub async fn list_operations(&self, call_id: &str, query: &ODataQuery) -> Result<Value> {
        self.list_in(call_id, "operations", query).await
    }

    pub async fn count_operations(&self, call_id: &str, query: &ODataQuery) -> Result<u64> {
        self.count_in(call_id, "operations", query).await
    }

    pub async fn create_operation(
        &self,
        call_id: &str,
        operation: &CommsOperation,
    ) -> Result<Value> {
        self.create_in(call_id, "operations", operation).await
    }

    /// Status of an asynchronous call action.
    pub async fn get_operation(
        &self,
        call_id: &str,
        operation_id: &str,
        query: &ODataQuery,
    ) -> Result<Value> {
        let path = call_item(call_id, "operations", "operation_id", operation_id)?;
        self.client.get(&path, query).await
    }

    pub async fn update_operation(
        &self,
        call_id: &str,
        operation_id: &str,
        operation: &CommsOperation,
    ) -> Result<Value> {
        let path = call_item(call_id, "operations", "operation_id", operation_id)?;
        self.client.patch(&path, operation).await
    }

    pub async fn delete_operation(&self, call_id: &str, operation_id: &str) -> Result<()> {
        let path = call_item(call_id, "operations", "operation_id", operation_id)?;
        self.client.delete(&path).await
    }

    // -- Participants --

    pub async fn list_participants(&self, call_id: &str, query: &ODataQuery) -> Result<Value> {
        self.list_in(call_id, "participants", query).await
    }

    pub async fn count_participants(&self, call_id: &str, query: &ODataQuery) -> Result<u64> {
        self.count_in(call_id, "participants", query).await
    }

    pub async fn create_participant(
        &self,
        call_id: &str,
        participant: &CallParticipant,
    ) -> Result<Value> {
        self.create_in(call_id, "participants", participant).await
    }

    pub async fn get_participant(
        &self,
        call_id: &str,
        participant_id: &str,
        query: &ODataQuery,
    ) -> Result<Value> {
        let path = call_item(call_id, "participants", "participant_id", participant_id)?;
        self.client.get(&path, query).await
    }

    pub async fn update_participant(
        &self,
        call_id: &str,
        participant_id: &str,
        participant: &CallParticipant,
    ) -> Result<Value> {
        let path = call_item(call_id, "participants", "participant_id", participant_id)?;
        self.client.patch(&path, participant).await
    }

    /// Remove a participant from the call.
    pub async fn delete_participant(&self, call_id: &str, participant_id: &str) -> Result<()> {
        let path = call_item(call_id, "participants", "participant_id", participant_id)?;
        self.client.delete(&path).await
    }

    pub async fn invite_participants(
        &self,
        call_id: &str,
        body: &InviteParticipantsRequest,
    ) -> Result<Value> {
        let path = call_path(call_id)?;
        self.client
            .post(&under(&path, &["participants", "invite"]), body)
            .await
    }

    pub async fn mute_participant(
        &self,
        call_id: &str,
        participant_id: &str,
        body: &ClientContextRequest,
    ) -> Result<Value> {
        let path = call_item(call_id, "participants", "participant_id", participant_id)?;
        self.client.post(&under(&path, &["mute"]), body).await
    }

    pub async fn start_hold_music(
        &self,
        call_id: &str,
        participant_id: &str,
        body: &StartHoldMusicRequest,
    ) -> Result<Value> {
        let path = call_item(call_id, "participants", "participant_id", participant_id)?;
        self.client
            .post(&under(&path, &["startHoldMusic"]), body)
            .await
    }

    pub async fn stop_hold_music(
        &self,
        call_id: &str,
        participant_id: &str,
        body: &ClientContextRequest,
    ) -> Result<Value> {
        let path = call_item(call_id, "participants", "participant_id", participant_id)?;
        self.client
            .post(&under(&path, &["stopHoldMusic"]), body)
            .await
    }

    async fn list_in(&self, call_id: &str, collection: &str, query: &ODataQuery) -> Result<Value> {
        let path = call_path(call_id)?;
        self.client.get(&under(&path, &[collection]), query).await
    }

    async fn count_in(&self, call_id: &str, collection: &str, query: &ODataQuery) -> Result<u64> {
        let path = call_path(call_id)?;
        self.client
            .get_count(&under(&path, &[collection, "$count"]), query)
            .await
    }

    async fn create_in<B>(&self, call_id: &str, collection: &str, body: &B) -> Result<Value>
    where
        B: serde::Serialize + ?Sized,
    {
        let path = call_path(call_id)?;
        self.client.post(&under(&path, &[collection]), body).await
    }
}
