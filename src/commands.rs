//! CLI commands: call the library and print to stdout

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Duration, Utc};
use graph_teams::models::{
    Activity, Availability, Chat, ChatMessage, Collection, ConversationMember, LearningProvider,
    OnlineMeeting, Presence, SetUserPreferredPresenceRequest,
};
use graph_teams::{GraphClient, ODataQuery};
use serde_json::Value;

/// Strip HTML tags from content for CLI display.
fn strip_html(html: &str) -> String {
    let mut result = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => result.push(ch),
            _ => {}
        }
    }
    result
        .replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
}

/// Display name for a chat: topic, else the member names, else the id.
fn chat_name(chat: &Chat) -> String {
    if let Some(topic) = chat.topic.as_deref().filter(|t| !t.is_empty()) {
        return topic.to_string();
    }
    if let Some(ref members) = chat.members {
        let names: Vec<&str> = members
            .iter()
            .filter_map(|m| m.display_name.as_deref())
            .collect();
        if !names.is_empty() {
            return names.join(", ");
        }
    }
    chat.id.as_deref().unwrap_or("[unknown]").to_string()
}

fn sender_name(msg: &ChatMessage) -> &str {
    msg.from
        .as_ref()
        .and_then(|from| from.user.as_ref().or(from.application.as_ref()))
        .and_then(|identity| identity.display_name.as_deref())
        .unwrap_or("?")
}

/// Map a CLI status word to a preferred presence pair.
fn parse_status(status: &str) -> Result<(Availability, Activity)> {
    let pair = match status.to_lowercase().as_str() {
        "available" => (Availability::Available, Activity::Available),
        "busy" => (Availability::Busy, Activity::Busy),
        "dnd" | "donotdisturb" => (Availability::DoNotDisturb, Activity::DoNotDisturb),
        "brb" | "berightback" => (Availability::BeRightBack, Activity::BeRightBack),
        "away" => (Availability::Away, Activity::Away),
        "offline" => (Availability::Offline, Activity::OffWork),
        other => bail!(
            "Unknown status: {}. Use: available, busy, dnd, brb, away, offline",
            other
        ),
    };
    Ok(pair)
}

/// Split a user supplied path like `/chats/19:x/members` into segments.
fn path_segments(path: &str) -> Vec<&str> {
    path.split('/').filter(|s| !s.is_empty()).collect()
}

fn parse<T: serde::de::DeserializeOwned>(value: Value, what: &str) -> Result<T> {
    serde_json::from_value(value).with_context(|| format!("Failed to parse {} response", what))
}

/// List recent chats (prints to stdout).
pub async fn list_chats(client: &GraphClient, limit: u32) -> Result<()> {
    let query = ODataQuery::new()
        .top(limit)
        .expand(["members", "lastMessagePreview"])
        .orderby("lastMessagePreview/createdDateTime desc");
    let page: Collection<Chat> = parse(client.chats().list_chats(&query).await?, "chats")?;

    println!("\nRecent Chats:");
    println!("{:-<60}", "");

    if page.value.is_empty() {
        println!("  (no chats found)");
        return Ok(());
    }

    for chat in &page.value {
        println!("{}", chat_name(chat));
        println!("  ID: {}", chat.id.as_deref().unwrap_or("?"));

        if let Some(ref preview) = chat.last_message_preview {
            if let Some(time) = preview.created_date_time {
                println!("  Last: {}", time.format("%Y-%m-%d %H:%M"));
            }
            let text = preview
                .body
                .as_ref()
                .and_then(|b| b.content.as_deref())
                .map(strip_html)
                .unwrap_or_default();
            if !text.trim().is_empty() {
                let sender = preview
                    .from
                    .as_ref()
                    .and_then(|f| f.user.as_ref())
                    .and_then(|u| u.display_name.as_deref())
                    .unwrap_or("?");
                println!("  [{}]: {}", sender, text.trim());
            }
        }

        println!();
    }

    Ok(())
}

/// Read messages from a chat, oldest first (prints to stdout).
pub async fn read_messages(client: &GraphClient, chat_id: &str, limit: u32) -> Result<()> {
    let query = ODataQuery::new()
        .top(limit.min(50))
        .orderby("createdDateTime desc");
    let page: Collection<ChatMessage> = parse(
        client.chat_messages().list_messages(chat_id, &query).await?,
        "messages",
    )?;

    let msgs: Vec<&ChatMessage> = page
        .value
        .iter()
        .filter(|m| m.message_type.as_deref().unwrap_or("message") == "message")
        .collect();

    if msgs.is_empty() {
        println!("(no messages)");
        return Ok(());
    }

    for msg in msgs.iter().rev() {
        let timestamp = msg
            .created_date_time
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        let content = msg
            .body
            .as_ref()
            .and_then(|b| b.content.as_deref())
            .map(strip_html)
            .unwrap_or_default();
        println!("[{}] {}: {}", timestamp, sender_name(msg), content.trim());
    }

    Ok(())
}

pub async fn send_message(client: &GraphClient, chat_id: &str, message: &str) -> Result<()> {
    client
        .chat_messages()
        .send_message(chat_id, &ChatMessage::text(message))
        .await?;
    println!("Message sent.");
    Ok(())
}

pub async fn list_members(client: &GraphClient, chat_id: &str) -> Result<()> {
    let page: Collection<ConversationMember> = parse(
        client
            .chats()
            .list_members(chat_id, &ODataQuery::new())
            .await?,
        "members",
    )?;

    println!("\nMembers:");
    for member in &page.value {
        let roles = member
            .roles
            .as_ref()
            .filter(|r| !r.is_empty())
            .map(|r| format!(" ({})", r.join(", ")))
            .unwrap_or_default();
        println!(
            "  {}{}",
            member.display_name.as_deref().unwrap_or("[unknown]"),
            roles
        );
        if let Some(ref email) = member.email {
            println!("    {}", email);
        }
    }

    Ok(())
}

/// Get current presence status
pub async fn get_presence(client: &GraphClient, user_id: &str) -> Result<()> {
    let presence: Presence = parse(
        client
            .communications()
            .get_presence(user_id, &ODataQuery::new())
            .await?,
        "presence",
    )?;

    println!("\nPresence Status:");
    if let Some(availability) = presence.availability {
        println!("  Availability: {:?}", availability);
    }
    if let Some(activity) = presence.activity {
        println!("  Activity: {:?}", activity);
    }

    Ok(())
}

/// Set presence status
pub async fn set_presence(client: &GraphClient, user_id: &str, status: &str) -> Result<()> {
    let (availability, activity) = parse_status(status)?;
    let body = SetUserPreferredPresenceRequest {
        availability,
        activity,
        expiration_duration: Some("PT1H".to_string()),
    };

    client
        .communications()
        .set_user_preferred_presence(user_id, &body)
        .await?;

    println!("Presence set to: {}", status);
    Ok(())
}

/// `[start, start + minutes)` for a new meeting.
fn meeting_window(start: DateTime<Utc>, minutes: i64) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    if minutes <= 0 {
        bail!("Meeting length must be positive, got {}", minutes);
    }
    let end = Duration::try_minutes(minutes)
        .and_then(|length| start.checked_add_signed(length))
        .with_context(|| format!("Meeting length of {} minutes is out of range", minutes))?;
    Ok((start, end))
}

/// The `days` (at least one) leading up to `to`.
fn lookback_window(to: DateTime<Utc>, days: i64) -> Result<(DateTime<Utc>, DateTime<Utc>)> {
    let from = Duration::try_days(days.max(1))
        .and_then(|span| to.checked_sub_signed(span))
        .with_context(|| format!("Look-back of {} days is out of range", days))?;
    Ok((from, to))
}

pub async fn create_meeting(client: &GraphClient, subject: &str, minutes: i64) -> Result<()> {
    let (start, end) = meeting_window(Utc::now(), minutes)?;
    let meeting = OnlineMeeting::new(subject, start, end);
    let created: OnlineMeeting = parse(
        client
            .online_meetings()
            .create_online_meeting(&meeting)
            .await?,
        "meeting",
    )?;

    println!("Meeting created: {}", subject);
    if let Some(ref url) = created.join_web_url {
        println!("  Join: {}", url);
    }
    Ok(())
}

pub async fn pstn_calls(client: &GraphClient, days: i64) -> Result<()> {
    let (from, to) = lookback_window(Utc::now(), days)?;
    let page: Collection<Value> = parse(
        client
            .call_records()
            .get_pstn_calls(from, to, &ODataQuery::new())
            .await?,
        "PSTN calls",
    )?;

    if page.value.is_empty() {
        println!("(no PSTN calls)");
        return Ok(());
    }

    for row in &page.value {
        let field = |name: &str| row.get(name).and_then(Value::as_str).unwrap_or("-");
        println!(
            "[{}] {} {} -> {} ({}s)",
            field("startDateTime"),
            field("callType"),
            field("callerNumber"),
            field("calleeNumber"),
            row.get("duration").and_then(Value::as_i64).unwrap_or(0)
        );
    }

    Ok(())
}

pub async fn learning_providers(client: &GraphClient) -> Result<()> {
    let page: Collection<LearningProvider> = parse(
        client
            .learning_providers()
            .list_learning_providers(&ODataQuery::new())
            .await?,
        "learning providers",
    )?;

    println!("\nLearning Providers:");
    for provider in &page.value {
        println!(
            "  {} ({})",
            provider.display_name.as_deref().unwrap_or("[unnamed]"),
            provider.id.as_deref().unwrap_or("?")
        );
    }

    Ok(())
}

pub async fn hang_up(client: &GraphClient, call_id: &str) -> Result<()> {
    client.calls().delete_call(call_id).await?;
    println!("Call ended.");
    Ok(())
}

pub async fn get_raw(client: &GraphClient, path: &str) -> Result<()> {
    let segments = path_segments(path);
    if segments.is_empty() {
        bail!("Path is empty");
    }
    let value = client.get(&segments, &ODataQuery::new()).await?;
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn test_strip_html() {
        assert_eq!(
            strip_html("<p>Fish &amp; chips&nbsp;<b>now</b></p>"),
            "Fish & chips now"
        );
    }

    #[test]
    fn test_chat_name_fallbacks() {
        let mut chat = Chat {
            id: Some("19:abc".to_string()),
            ..Chat::default()
        };
        assert_eq!(chat_name(&chat), "19:abc");

        chat.members = Some(vec![ConversationMember {
            display_name: Some("Ada".to_string()),
            ..ConversationMember::default()
        }]);
        assert_eq!(chat_name(&chat), "Ada");

        chat.topic = Some("Release".to_string());
        assert_eq!(chat_name(&chat), "Release");
    }

    #[test]
    fn test_parse_status() {
        assert_eq!(
            parse_status("DND").unwrap(),
            (Availability::DoNotDisturb, Activity::DoNotDisturb)
        );
        assert_eq!(
            parse_status("offline").unwrap(),
            (Availability::Offline, Activity::OffWork)
        );
        assert!(parse_status("sleeping").is_err());
    }

    #[test]
    fn test_path_segments() {
        assert_eq!(
            path_segments("/chats/19:x@thread.v2/members/"),
            vec!["chats", "19:x@thread.v2", "members"]
        );
        assert!(path_segments("///").is_empty());
    }

    #[test]
    fn test_sender_name_prefers_user() {
        let msg: ChatMessage = serde_json::from_value(json!({
            "from": { "user": { "id": "u1", "displayName": "Ada" } },
            "body": { "contentType": "text", "content": "hi" }
        }))
        .unwrap();
        assert_eq!(sender_name(&msg), "Ada");
        assert_eq!(sender_name(&ChatMessage::default()), "?");
    }

    #[test]
    fn test_meeting_window() {
        let start = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let (from, to) = meeting_window(start, 90).unwrap();
        assert_eq!(from, start);
        assert_eq!(to, Utc.with_ymd_and_hms(2024, 3, 1, 10, 30, 0).unwrap());

        assert!(meeting_window(start, 0).is_err());
        assert!(meeting_window(start, -5).is_err());
        assert!(meeting_window(start, i64::MAX).is_err());
        // Representable as a duration but past the last DateTime.
        assert!(meeting_window(start, i64::MAX / 60_000).is_err());
    }

    #[test]
    fn test_lookback_window() {
        let to = Utc.with_ymd_and_hms(2024, 3, 8, 0, 0, 0).unwrap();
        let (from, end) = lookback_window(to, 7).unwrap();
        assert_eq!(end, to);
        assert_eq!(from, Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap());

        let (from, _) = lookback_window(to, 0).unwrap();
        assert_eq!(from, Utc.with_ymd_and_hms(2024, 3, 7, 0, 0, 0).unwrap());
        assert!(lookback_window(to, i64::MAX).is_err());
        assert!(lookback_window(to, i64::MAX / 86_400_000).is_err());
    }
}
