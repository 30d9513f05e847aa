//! Chat messages: `/chats/{chat-id}/messages`, replies and hosted contents
//!
//! Replies share the message operations, so both go through the same private
//! helpers keyed by the item path (`.../messages/{id}` or
//! `.../messages/{id}/replies/{id}`).

use bytes::Bytes;
use serde_json::Value;

use super::client::GraphClient;
use super::query::ODataQuery;
use super::under;
use crate::error::{require, Result};
use crate::models::{ChatMessage, ChatMessageHostedContent, ReactionRequest};

pub struct ChatMessagesApi<'a> {
    client: &'a GraphClient,
}

fn messages_path<'p>(chat_id: &'p str) -> Result<[&'p str; 3]> {
    let chat_id = require("chat_id", chat_id)?;
    Ok(["chats", chat_id, "messages"])
}

fn message_path<'p>(chat_id: &'p str, message_id: &'p str) -> Result<[&'p str; 4]> {
    let chat_id = require("chat_id", chat_id)?;
    let message_id = require("message_id", message_id)?;
    Ok(["chats", chat_id, "messages", message_id])
}

fn reply_path<'p>(
    chat_id: &'p str,
    message_id: &'p str,
    reply_id: &'p str,
) -> Result<[&'p str; 6]> {
    let [c, chat_id, m, message_id] = message_path(chat_id, message_id)?;
    let reply_id = require("reply_id", reply_id)?;
    Ok([c, chat_id, m, message_id, "replies", reply_id])
}

impl<'a> ChatMessagesApi<'a> {
    pub(crate) fn new(client: &'a GraphClient) -> Self {
        Self { client }
    }

    // -- Messages --

    /// List messages in a chat. Graph caps `$top` at 50 here.
    pub async fn list_messages(&self, chat_id: &str, query: &ODataQuery) -> Result<Value> {
        let path = messages_path(chat_id)?;
        self.client.get(&path, query).await
    }

    pub async fn count_messages(&self, chat_id: &str, query: &ODataQuery) -> Result<u64> {
        let path = messages_path(chat_id)?;
        self.client
            .get_count(&under(&path, &["$count"]), query)
            .await
    }

    /// Send a new message. See [`ChatMessage::text`] and [`ChatMessage::html`].
    pub async fn send_message(&self, chat_id: &str, message: &ChatMessage) -> Result<Value> {
        let path = messages_path(chat_id)?;
        self.client.post(&path, message).await
    }

    pub async fn get_message(
        &self,
        chat_id: &str,
        message_id: &str,
        query: &ODataQuery,
    ) -> Result<Value> {
        let path = message_path(chat_id, message_id)?;
        self.client.get(&path, query).await
    }

    pub async fn update_message(
        &self,
        chat_id: &str,
        message_id: &str,
        message: &ChatMessage,
    ) -> Result<Value> {
        let path = message_path(chat_id, message_id)?;
        self.client.patch(&path, message).await
    }

    pub async fn delete_message(&self, chat_id: &str, message_id: &str) -> Result<()> {
        let path = message_path(chat_id, message_id)?;
        self.client.delete(&path).await
    }

    /// Incremental changes to the chat's messages. Follow the returned
    /// `@odata.nextLink`/`@odata.deltaLink` with [`GraphClient::get_link`].
    pub async fn messages_delta(&self, chat_id: &str, query: &ODataQuery) -> Result<Value> {
        let path = messages_path(chat_id)?;
        self.client.get(&under(&path, &["delta()"]), query).await
    }

    pub async fn soft_delete_message(&self, chat_id: &str, message_id: &str) -> Result<Value> {
        let path = message_path(chat_id, message_id)?;
        self.client.post_empty(&under(&path, &["softDelete"])).await
    }

    pub async fn undo_soft_delete_message(
        &self,
        chat_id: &str,
        message_id: &str,
    ) -> Result<Value> {
        let path = message_path(chat_id, message_id)?;
        self.client
            .post_empty(&under(&path, &["undoSoftDelete"]))
            .await
    }

    pub async fn set_reaction(
        &self,
        chat_id: &str,
        message_id: &str,
        reaction: &ReactionRequest,
    ) -> Result<Value> {
        let path = message_path(chat_id, message_id)?;
        self.client
            .post(&under(&path, &["setReaction"]), reaction)
            .await
    }

    pub async fn unset_reaction(
        &self,
        chat_id: &str,
        message_id: &str,
        reaction: &ReactionRequest,
    ) -> Result<Value> {
        let path = message_path(chat_id, message_id)?;
        self.client
            .post(&under(&path, &["unsetReaction"]), reaction)
            .await
    }

    // -- Message hosted contents --

    pub async fn list_hosted_contents(
        &self,
        chat_id: &str,
        message_id: &str,
        query: &ODataQuery,
    ) -> Result<Value> {
        let path = message_path(chat_id, message_id)?;
        self.list_hosted_contents_at(&path, query).await
    }

    pub async fn count_hosted_contents(
        &self,
        chat_id: &str,
        message_id: &str,
        query: &ODataQuery,
    ) -> Result<u64> {
        let path = message_path(chat_id, message_id)?;
        self.count_hosted_contents_at(&path, query).await
    }

    pub async fn create_hosted_content(
        &self,
        chat_id: &str,
        message_id: &str,
        content: &ChatMessageHostedContent,
    ) -> Result<Value> {
        let path = message_path(chat_id, message_id)?;
        self.create_hosted_content_at(&path, content).await
    }

    pub async fn get_hosted_content(
        &self,
        chat_id: &str,
        message_id: &str,
        hosted_content_id: &str,
        query: &ODataQuery,
    ) -> Result<Value> {
        let path = message_path(chat_id, message_id)?;
        self.get_hosted_content_at(&path, hosted_content_id, query)
            .await
    }

    pub async fn update_hosted_content(
        &self,
        chat_id: &str,
        message_id: &str,
        hosted_content_id: &str,
        content: &ChatMessageHostedContent,
    ) -> Result<Value> {
        let path = message_path(chat_id, message_id)?;
        self.update_hosted_content_at(&path, hosted_content_id, content)
            .await
    }

    pub async fn delete_hosted_content(
        &self,
        chat_id: &str,
        message_id: &str,
        hosted_content_id: &str,
    ) -> Result<()> {
        let path = message_path(chat_id, message_id)?;
        self.delete_hosted_content_at(&path, hosted_content_id)
            .await
    }

    /// Raw bytes of a hosted content (`$value`).
    pub async fn get_hosted_content_value(
        &self,
        chat_id: &str,
        message_id: &str,
        hosted_content_id: &str,
    ) -> Result<Bytes> {
        let path = message_path(chat_id, message_id)?;
        let hosted_content_id = require("hosted_content_id", hosted_content_id)?;
        self.client
            .get_bytes(&under(&path, &["hostedContents", hosted_content_id, "$value"]))
            .await
    }

    pub async fn put_hosted_content_value(
        &self,
        chat_id: &str,
        message_id: &str,
        hosted_content_id: &str,
        content: impl Into<Bytes>,
    ) -> Result<Value> {
        let path = message_path(chat_id, message_id)?;
        let hosted_content_id = require("hosted_content_id", hosted_content_id)?;
        self.client
            .put_bytes(
                &under(&path, &["hostedContents", hosted_content_id, "$value"]),
                content,
            )
            .await
    }

    pub async fn delete_hosted_content_value(
        &self,
        chat_id: &str,
        message_id: &str,
        hosted_content_id: &str,
    ) -> Result<()> {
        let path = message_path(chat_id, message_id)?;
        let hosted_content_id = require("hosted_content_id", hosted_content_id)?;
        self.client
            .delete(&under(&path, &["hostedContents", hosted_content_id, "$value"]))
            .await
    }

    // -- Replies --

    pub async fn list_replies(
        &self,
        chat_id: &str,
        message_id: &str,
        query: &ODataQuery,
    ) -> Result<Value> {
        let path = message_path(chat_id, message_id)?;
        self.client.get(&under(&path, &["replies"]), query).await
    }

    pub async fn count_replies(
        &self,
        chat_id: &str,
        message_id: &str,
        query: &ODataQuery,
    ) -> Result<u64> {
        let path = message_path(chat_id, message_id)?;
        self.client
            .get_count(&under(&path, &["replies", "$count"]), query)
            .await
    }

    pub async fn create_reply(
        &self,
        chat_id: &str,
        message_id: &str,
        reply: &ChatMessage,
    ) -> Result<Value> {
        let path = message_path(chat_id, message_id)?;
        self.client.post(&under(&path, &["replies"]), reply).await
    }

    pub async fn get_reply(
        &self,
        chat_id: &str,
        message_id: &str,
        reply_id: &str,
        query: &ODataQuery,
    ) -> Result<Value> {
        let path = reply_path(chat_id, message_id, reply_id)?;
        self.client.get(&path, query).await
    }

    pub async fn update_reply(
        &self,
        chat_id: &str,
        message_id: &str,
        reply_id: &str,
        reply: &ChatMessage,
    ) -> Result<Value> {
        let path = reply_path(chat_id, message_id, reply_id)?;
        self.client.patch(&path, reply).await
    }

    pub async fn delete_reply(
        &self,
        chat_id: &str,
        message_id: &str,
        reply_id: &str,
    ) -> Result<()> {
        let path = reply_path(chat_id, message_id, reply_id)?;
        self.client.delete(&path).await
    }

    pub async fn replies_delta(
        &self,
        chat_id: &str,
        message_id: &str,
        query: &ODataQuery,
    ) -> Result<Value> {
        let path = message_path(chat_id, message_id)?;
        self.client
            .get(&under(&path, &["replies", "delta()"]), query)
            .await
    }

    pub async fn soft_delete_reply(
        &self,
        chat_id: &str,
        message_id: &str,
        reply_id: &str,
    ) -> Result<Value> {
        let path = reply_path(chat_id, message_id, reply_id)?;
        self.client.post_empty(&under(&path, &["softDelete"])).await
    }

    pub async fn undo_soft_delete_reply(
        &self,
        chat_id: &str,
        message_id: &str,
        reply_id: &str,
    ) -> Result<Value> {
        let path = reply_path(chat_id, message_id, reply_id)?;
        self.client
            .post_empty(&under(&path, &["undoSoftDelete"]))
            .await
    }

    pub async fn set_reply_reaction(
        &self,
        chat_id: &str,
        message_id: &str,
        reply_id: &str,
        reaction: &ReactionRequest,
    ) -> Result<Value> {
        let path = reply_path(chat_id, message_id, reply_id)?;
        self.client
            .post(&under(&path, &["setReaction"]), reaction)
            .await
    }

    pub async fn unset_reply_reaction(
        &self,
        chat_id: &str,
        message_id: &str,
        reply_id: &str,
        reaction: &ReactionRequest,
    ) -> Result<Value> {
        let path = reply_path(chat_id, message_id, reply_id)?;
        self.client
            .post(&under(&path, &["unsetReaction"]), reaction)
            .await
    }

    // -- Reply hosted contents --

    pub async fn list_reply_hosted_contents(
        &self,
        chat_id: &str,
        message_id: &str,
        reply_id: &str,
        query: &ODataQuery,
    ) -> Result<Value> {
        let path = reply_path(chat_id, message_id, reply_id)?;
        self.list_hosted_contents_at(&path, query).await
    }

    pub async fn count_reply_hosted_contents(
        &self,
        chat_id: &str,
        message_id: &str,
        reply_id: &str,
        query: &ODataQuery,
    ) -> Result<u64> {
        let path = reply_path(chat_id, message_id, reply_id)?;
        self.count_hosted_contents_at(&path, query).await
    }

    pub async fn create_reply_hosted_content(
        &self,
        chat_id: &str,
        message_id: &str,
        reply_id: &str,
        content: &ChatMessageHostedContent,
    ) -> Result<Value> {
        let path = reply_path(chat_id, message_id, reply_id)?;
        self.create_hosted_content_at(&path, content).await
    }

    pub async fn get_reply_hosted_content(
        &self,
        chat_id: &str,
        message_id: &str,
        reply_id: &str,
        hosted_content_id: &str,
        query: &ODataQuery,
    ) -> Result<Value> {
        let path = reply_path(chat_id, message_id, reply_id)?;
        self.get_hosted_content_at(&path, hosted_content_id, query)
            .await
    }

    pub async fn update_reply_hosted_content(
        &self,
        chat_id: &str,
        message_id: &str,
        reply_id: &str,
        hosted_content_id: &str,
        content: &ChatMessageHostedContent,
    ) -> Result<Value> {
        let path = reply_path(chat_id, message_id, reply_id)?;
        self.update_hosted_content_at(&path, hosted_content_id, content)
            .await
    }

    pub async fn delete_reply_hosted_content(
        &self,
        chat_id: &str,
        message_id: &str,
        reply_id: &str,
        hosted_content_id: &str,
    ) -> Result<()> {
        let path = reply_path(chat_id, message_id, reply_id)?;
        self.delete_hosted_content_at(&path, hosted_content_id)
            .await
    }

    pub async fn get_reply_hosted_content_value(
        &self,
        chat_id: &str,
        message_id: &str,
        reply_id: &str,
        hosted_content_id: &str,
    ) -> Result<Bytes> {
        let path = reply_path(chat_id, message_id, reply_id)?;
        let hosted_content_id = require("hosted_content_id", hosted_content_id)?;
        self.client
            .get_bytes(&under(&path, &["hostedContents", hosted_content_id, "$value"]))
            .await
    }

    pub async fn put_reply_hosted_content_value(
        &self,
        chat_id: &str,
        message_id: &str,
        reply_id: &str,
        hosted_content_id: &str,
        content: impl Into<Bytes>,
    ) -> Result<Value> {
        let path = reply_path(chat_id, message_id, reply_id)?;
        let hosted_content_id = require("hosted_content_id", hosted_content_id)?;
        self.client
            .put_bytes(
                &under(&path, &["hostedContents", hosted_content_id, "$value"]),
                content,
            )
            .await
    }

    pub async fn delete_reply_hosted_content_value(
        &self,
        chat_id: &str,
        message_id: &str,
        reply_id: &str,
        hosted_content_id: &str,
    ) -> Result<()> {
        let path = reply_path(chat_id, message_id, reply_id)?;
        let hosted_content_id = require("hosted_content_id", hosted_content_id)?;
        self.client
            .delete(&under(&path, &["hostedContents", hosted_content_id, "$value"]))
            .await
    }

    // -- Shared by messages and replies --

    async fn list_hosted_contents_at(&self, item: &[&str], query: &ODataQuery) -> Result<Value> {
        self.client
            .get(&under(item, &["hostedContents"]), query)
            .await
    }

    async fn count_hosted_contents_at(&self, item: &[&str], query: &ODataQuery) -> Result<u64> {
        self.client
            .get_count(&under(item, &["hostedContents", "$count"]), query)
            .await
    }

    async fn create_hosted_content_at(
        &self,
        item: &[&str],
        content: &ChatMessageHostedContent,
    ) -> Result<Value> {
        self.client
            .post(&under(item, &["hostedContents"]), content)
            .await
    }

    async fn get_hosted_content_at(
        &self,
        item: &[&str],
        hosted_content_id: &str,
        query: &ODataQuery,
    ) -> Result<Value> {
        let hosted_content_id = require("hosted_content_id", hosted_content_id)?;
        self.client
            .get(&under(item, &["hostedContents", hosted_content_id]), query)
            .await
    }

    async fn update_hosted_content_at(
        &self,
        item: &[&str],
        hosted_content_id: &str,
        content: &ChatMessageHostedContent,
    ) -> Result<Value> {
        let hosted_content_id = require("hosted_content_id", hosted_content_id)?;
        self.client
            .patch(&under(item, &["hostedContents", hosted_content_id]), content)
            .await
    }

    async fn delete_hosted_content_at(&self, item: &[&str], hosted_content_id: &str) -> Result<()> {
        let hosted_content_id = require("hosted_content_id", hosted_content_id)?;
        self.client
            .delete(&under(item, &["hostedContents", hosted_content_id]))
            .await
    }
}
