//! Chats: `/chats` and its navigation properties other than messages
//!
//! Covers the chat itself, chat-level actions, installed apps, the last
//! message preview, members, resource-specific permission grants, pinned
//! messages and tabs.

use serde_json::Value;

use super::client::GraphClient;
use super::query::ODataQuery;
use crate::error::{require, Result};
use crate::models::{
    ActivityNotification, AddMembersRequest, Chat, ChatMessageInfo, ChatUserRequest,
    ConversationMember, MarkChatUnreadRequest, PinnedChatMessageInfo, RemoveMembersRequest,
    ResourceSpecificPermissionGrant, TeamsAppInstallation, TeamsTab, UpgradeAppRequest,
};

pub struct ChatsApi<'a> {
    client: &'a GraphClient,
}

impl<'a> ChatsApi<'a> {
    pub(crate) fn new(client: &'a GraphClient) -> Self {
        Self { client }
    }

    // -- Chat --

    /// List chats the signed-in user is part of.
    pub async fn list_chats(&self, query: &ODataQuery) -> Result<Value> {
        self.client.get(&["chats"], query).await
    }

    pub async fn count_chats(&self, query: &ODataQuery) -> Result<u64> {
        self.client.get_count(&["chats", "$count"], query).await
    }

    /// Create a one-on-one or group chat.
    pub async fn create_chat(&self, chat: &Chat) -> Result<Value> {
        self.client.post(&["chats"], chat).await
    }

    pub async fn get_chat(&self, chat_id: &str, query: &ODataQuery) -> Result<Value> {
        let chat_id = require("chat_id", chat_id)?;
        self.client.get(&["chats", chat_id], query).await
    }

    /// Update chat properties. Only the fields set on `chat` are sent.
    pub async fn update_chat(&self, chat_id: &str, chat: &Chat) -> Result<Value> {
        let chat_id = require("chat_id", chat_id)?;
        self.client.patch(&["chats", chat_id], chat).await
    }

    pub async fn delete_chat(&self, chat_id: &str) -> Result<()> {
        let chat_id = require("chat_id", chat_id)?;
        self.client.delete(&["chats", chat_id]).await
    }

    /// Messages across all chats of the tenant (`getAllMessages()`).
    pub async fn get_all_messages(&self, query: &ODataQuery) -> Result<Value> {
        self.client.get(&["chats", "getAllMessages()"], query).await
    }

    // -- Chat actions --

    pub async fn hide_for_user(&self, chat_id: &str, body: &ChatUserRequest) -> Result<Value> {
        self.chat_action(chat_id, "hideForUser", body).await
    }

    pub async fn unhide_for_user(&self, chat_id: &str, body: &ChatUserRequest) -> Result<Value> {
        self.chat_action(chat_id, "unhideForUser", body).await
    }

    pub async fn mark_chat_read_for_user(
        &self,
        chat_id: &str,
        body: &ChatUserRequest,
    ) -> Result<Value> {
        self.chat_action(chat_id, "markChatReadForUser", body).await
    }

    pub async fn mark_chat_unread_for_user(
        &self,
        chat_id: &str,
        body: &MarkChatUnreadRequest,
    ) -> Result<Value> {
        let chat_id = require("chat_id", chat_id)?;
        self.client
            .post(&["chats", chat_id, "markChatUnreadForUser"], body)
            .await
    }

    /// Send an activity feed notification scoped to the chat.
    pub async fn send_activity_notification(
        &self,
        chat_id: &str,
        body: &ActivityNotification,
    ) -> Result<Value> {
        let chat_id = require("chat_id", chat_id)?;
        self.client
            .post(&["chats", chat_id, "sendActivityNotification"], body)
            .await
    }

    pub async fn remove_all_access_for_user(
        &self,
        chat_id: &str,
        body: &ChatUserRequest,
    ) -> Result<Value> {
        self.chat_action(chat_id, "removeAllAccessForUser", body)
            .await
    }

    async fn chat_action(
        &self,
        chat_id: &str,
        action: &str,
        body: &ChatUserRequest,
    ) -> Result<Value> {
        let chat_id = require("chat_id", chat_id)?;
        self.client.post(&["chats", chat_id, action], body).await
    }

    // -- Installed apps --

    pub async fn list_installed_apps(&self, chat_id: &str, query: &ODataQuery) -> Result<Value> {
        let chat_id = require("chat_id", chat_id)?;
        self.client
            .get(&["chats", chat_id, "installedApps"], query)
            .await
    }

    pub async fn count_installed_apps(&self, chat_id: &str, query: &ODataQuery) -> Result<u64> {
        let chat_id = require("chat_id", chat_id)?;
        self.client
            .get_count(&["chats", chat_id, "installedApps", "$count"], query)
            .await
    }

    /// Install an app into the chat. See [`TeamsAppInstallation::for_app`].
    pub async fn install_app(
        &self,
        chat_id: &str,
        installation: &TeamsAppInstallation,
    ) -> Result<Value> {
        let chat_id = require("chat_id", chat_id)?;
        self.client
            .post(&["chats", chat_id, "installedApps"], installation)
            .await
    }

    pub async fn get_installed_app(
        &self,
        chat_id: &str,
        installation_id: &str,
        query: &ODataQuery,
    ) -> Result<Value> {
        let chat_id = require("chat_id", chat_id)?;
        let installation_id = require("installation_id", installation_id)?;
        self.client
            .get(&["chats", chat_id, "installedApps", installation_id], query)
            .await
    }

    pub async fn update_installed_app(
        &self,
        chat_id: &str,
        installation_id: &str,
        installation: &TeamsAppInstallation,
    ) -> Result<Value> {
        let chat_id = require("chat_id", chat_id)?;
        let installation_id = require("installation_id", installation_id)?;
        self.client
            .patch(
                &["chats", chat_id, "installedApps", installation_id],
                installation,
            )
            .await
    }

    pub async fn uninstall_app(&self, chat_id: &str, installation_id: &str) -> Result<()> {
        let chat_id = require("chat_id", chat_id)?;
        let installation_id = require("installation_id", installation_id)?;
        self.client
            .delete(&["chats", chat_id, "installedApps", installation_id])
            .await
    }

    /// Upgrade an installed app to the latest catalog version.
    pub async fn upgrade_installed_app(
        &self,
        chat_id: &str,
        installation_id: &str,
        body: &UpgradeAppRequest,
    ) -> Result<Value> {
        let chat_id = require("chat_id", chat_id)?;
        let installation_id = require("installation_id", installation_id)?;
        self.client
            .post(
                &["chats", chat_id, "installedApps", installation_id, "upgrade"],
                body,
            )
            .await
    }

    pub async fn get_installed_app_teams_app(
        &self,
        chat_id: &str,
        installation_id: &str,
        query: &ODataQuery,
    ) -> Result<Value> {
        let chat_id = require("chat_id", chat_id)?;
        let installation_id = require("installation_id", installation_id)?;
        self.client
            .get(
                &["chats", chat_id, "installedApps", installation_id, "teamsApp"],
                query,
            )
            .await
    }

    pub async fn get_installed_app_definition(
        &self,
        chat_id: &str,
        installation_id: &str,
        query: &ODataQuery,
    ) -> Result<Value> {
        let chat_id = require("chat_id", chat_id)?;
        let installation_id = require("installation_id", installation_id)?;
        self.client
            .get(
                &[
                    "chats",
                    chat_id,
                    "installedApps",
                    installation_id,
                    "teamsAppDefinition",
                ],
                query,
            )
            .await
    }

    // -- Last message preview --

    pub async fn get_last_message_preview(
        &self,
        chat_id: &str,
        query: &ODataQuery,
    ) -> Result<Value> {
        let chat_id = require("chat_id", chat_id)?;
        self.client
            .get(&["chats", chat_id, "lastMessagePreview"], query)
            .await
    }

    pub async fn update_last_message_preview(
        &self,
        chat_id: &str,
        preview: &ChatMessageInfo,
    ) -> Result<Value> {
        let chat_id = require("chat_id", chat_id)?;
        self.client
            .patch(&["chats", chat_id, "lastMessagePreview"], preview)
            .await
    }

    pub async fn delete_last_message_preview(&self, chat_id: &str) -> Result<()> {
        let chat_id = require("chat_id", chat_id)?;
        self.client
            .delete(&["chats", chat_id, "lastMessagePreview"])
            .await
    }

    // -- Members --

    pub async fn list_members(&self, chat_id: &str, query: &ODataQuery) -> Result<Value> {
        let chat_id = require("chat_id", chat_id)?;
        self.client.get(&["chats", chat_id, "members"], query).await
    }

    pub async fn count_members(&self, chat_id: &str, query: &ODataQuery) -> Result<u64> {
        let chat_id = require("chat_id", chat_id)?;
        self.client
            .get_count(&["chats", chat_id, "members", "$count"], query)
            .await
    }

    /// Add one member. See [`ConversationMember::aad_user`].
    pub async fn add_member(&self, chat_id: &str, member: &ConversationMember) -> Result<Value> {
        let chat_id = require("chat_id", chat_id)?;
        self.client
            .post(&["chats", chat_id, "members"], member)
            .await
    }

    pub async fn get_member(
        &self,
        chat_id: &str,
        membership_id: &str,
        query: &ODataQuery,
    ) -> Result<Value> {
        let chat_id = require("chat_id", chat_id)?;
        let membership_id = require("membership_id", membership_id)?;
        self.client
            .get(&["chats", chat_id, "members", membership_id], query)
            .await
    }

    pub async fn update_member(
        &self,
        chat_id: &str,
        membership_id: &str,
        member: &ConversationMember,
    ) -> Result<Value> {
        let chat_id = require("chat_id", chat_id)?;
        let membership_id = require("membership_id", membership_id)?;
        self.client
            .patch(&["chats", chat_id, "members", membership_id], member)
            .await
    }

    pub async fn remove_member(&self, chat_id: &str, membership_id: &str) -> Result<()> {
        let chat_id = require("chat_id", chat_id)?;
        let membership_id = require("membership_id", membership_id)?;
        self.client
            .delete(&["chats", chat_id, "members", membership_id])
            .await
    }

    /// Add several members in one call (`members/add`).
    pub async fn add_members(&self, chat_id: &str, body: &AddMembersRequest) -> Result<Value> {
        let chat_id = require("chat_id", chat_id)?;
        self.client
            .post(&["chats", chat_id, "members", "add"], body)
            .await
    }

    /// Remove several members in one call (`members/remove`).
    pub async fn remove_members(
        &self,
        chat_id: &str,
        body: &RemoveMembersRequest,
    ) -> Result<Value> {
        let chat_id = require("chat_id", chat_id)?;
        self.client
            .post(&["chats", chat_id, "members", "remove"], body)
            .await
    }

    // -- Permission grants --

    pub async fn list_permission_grants(
        &self,
        chat_id: &str,
        query: &ODataQuery,
    ) -> Result<Value> {
        let chat_id = require("chat_id", chat_id)?;
        self.client
            .get(&["chats", chat_id, "permissionGrants"], query)
            .await
    }

    pub async fn count_permission_grants(
        &self,
        chat_id: &str,
        query: &ODataQuery,
    ) -> Result<u64> {
        let chat_id = require("chat_id", chat_id)?;
        self.client
            .get_count(&["chats", chat_id, "permissionGrants", "$count"], query)
            .await
    }

    pub async fn create_permission_grant(
        &self,
        chat_id: &str,
        grant: &ResourceSpecificPermissionGrant,
    ) -> Result<Value> {
        let chat_id = require("chat_id", chat_id)?;
        self.client
            .post(&["chats", chat_id, "permissionGrants"], grant)
            .await
    }

    pub async fn get_permission_grant(
        &self,
        chat_id: &str,
        grant_id: &str,
        query: &ODataQuery,
    ) -> Result<Value> {
        let chat_id = require("chat_id", chat_id)?;
        let grant_id = require("grant_id", grant_id)?;
        self.client
            .get(&["chats", chat_id, "permissionGrants", grant_id], query)
            .await
    }

    pub async fn update_permission_grant(
        &self,
        chat_id: &str,
        grant_id: &str,
        grant: &ResourceSpecificPermissionGrant,
    ) -> Result<Value> {
        let chat_id = require("chat_id", chat_id)?;
        let grant_id = require("grant_id", grant_id)?;
        self.client
            .patch(&["chats", chat_id, "permissionGrants", grant_id], grant)
            .await
    }

    pub async fn delete_permission_grant(&self, chat_id: &str, grant_id: &str) -> Result<()> {
        let chat_id = require("chat_id", chat_id)?;
        let grant_id = require("grant_id", grant_id)?;
        self.client
            .delete(&["chats", chat_id, "permissionGrants", grant_id])
            .await
    }

    // -- Pinned messages --

    pub async fn list_pinned_messages(&self, chat_id: &str, query: &ODataQuery) -> Result<Value> {
        let chat_id = require("chat_id", chat_id)?;
        self.client
            .get(&["chats", chat_id, "pinnedMessages"], query)
            .await
    }

    pub async fn count_pinned_messages(&self, chat_id: &str, query: &ODataQuery) -> Result<u64> {
        let chat_id = require("chat_id", chat_id)?;
        self.client
            .get_count(&["chats", chat_id, "pinnedMessages", "$count"], query)
            .await
    }

    /// Pin a message. See [`PinnedChatMessageInfo::for_message`].
    pub async fn pin_message(&self, chat_id: &str, pin: &PinnedChatMessageInfo) -> Result<Value> {
        let chat_id = require("chat_id", chat_id)?;
        self.client
            .post(&["chats", chat_id, "pinnedMessages"], pin)
            .await
    }

    pub async fn get_pinned_message(
        &self,
        chat_id: &str,
        pinned_id: &str,
        query: &ODataQuery,
    ) -> Result<Value> {
        let chat_id = require("chat_id", chat_id)?;
        let pinned_id = require("pinned_id", pinned_id)?;
        self.client
            .get(&["chats", chat_id, "pinnedMessages", pinned_id], query)
            .await
    }

    pub async fn update_pinned_message(
        &self,
        chat_id: &str,
        pinned_id: &str,
        pin: &PinnedChatMessageInfo,
    ) -> Result<Value> {
        let chat_id = require("chat_id", chat_id)?;
        let pinned_id = require("pinned_id", pinned_id)?;
        self.client
            .patch(&["chats", chat_id, "pinnedMessages", pinned_id], pin)
            .await
    }

    pub async fn unpin_message(&self, chat_id: &str, pinned_id: &str) -> Result<()> {
        let chat_id = require("chat_id", chat_id)?;
        let pinned_id = require("pinned_id", pinned_id)?;
        self.client
            .delete(&["chats", chat_id, "pinnedMessages", pinned_id])
            .await
    }

    /// The chat message a pin points at.
    pub async fn get_pinned_message_message(
        &self,
        chat_id: &str,
        pinned_id: &str,
        query: &ODataQuery,
    ) -> Result<Value> {
        let chat_id = require("chat_id", chat_id)?;
        let pinned_id = require("pinned_id", pinned_id)?;
        self.client
            .get(
                &["chats", chat_id, "pinnedMessages", pinned_id, "message"],
                query,
            )
            .await
    }

    // -- Tabs --

    pub async fn list_tabs(&self, chat_id: &str, query: &ODataQuery) -> Result<Value> {
        let chat_id = require("chat_id", chat_id)?;
        self.client.get(&["chats", chat_id, "tabs"], query).await
    }

    pub async fn count_tabs(&self, chat_id: &str, query: &ODataQuery) -> Result<u64> {
        let chat_id = require("chat_id", chat_id)?;
        self.client
            .get_count(&["chats", chat_id, "tabs", "$count"], query)
            .await
    }

    pub async fn create_tab(&self, chat_id: &str, tab: &TeamsTab) -> Result<Value> {
        let chat_id = require("chat_id", chat_id)?;
        self.client.post(&["chats", chat_id, "tabs"], tab).await
    }

    pub async fn get_tab(&self, chat_id: &str, tab_id: &str, query: &ODataQuery) -> Result<Value> {
        let chat_id = require("chat_id", chat_id)?;
        let tab_id = require("tab_id", tab_id)?;
        self.client
            .get(&["chats", chat_id, "tabs", tab_id], query)
            .await
    }

    pub async fn update_tab(&self, chat_id: &str, tab_id: &str, tab: &TeamsTab) -> Result<Value> {
        let chat_id = require("chat_id", chat_id)?;
        let tab_id = require("tab_id", tab_id)?;
        self.client
            .patch(&["chats", chat_id, "tabs", tab_id], tab)
            .await
    }

    pub async fn delete_tab(&self, chat_id: &str, tab_id: &str) -> Result<()> {
        let chat_id = require("chat_id", chat_id)?;
        let tab_id = require("tab_id", tab_id)?;
        self.client
            .delete(&["chats", chat_id, "tabs", tab_id])
            .await
    }

    pub async fn get_tab_teams_app(
        &self,
        chat_id: &str,
        tab_id: &str,
        query: &ODataQuery,
    ) -> Result<Value> {
        let chat_id = require("chat_id", chat_id)?;
        let tab_id = require("tab_id", tab_id)?;
        self.client
            .get(&["chats", chat_id, "tabs", tab_id, "teamsApp"], query)
            .await
    }
}
