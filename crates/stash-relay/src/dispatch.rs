//! Translates relay commands into REST calls against the stash API.

use anyhow::Context;
use serde_json::{json, Value};

use crate::protocol::{Command, Reply};

/// Parses a raw client frame and executes it. Never fails: every error path
/// collapses into a failure reply so the session stays open.
pub async fn dispatch(client: &reqwest::Client, api_base: &str, raw: &str) -> Reply {
    let command: Command = match serde_json::from_str(raw) {
        Ok(command) => command,
        Err(e) => {
            tracing::warn!("unparseable client frame: {}", e);
            return Reply::failure_with_error("Error processing request", &e.to_string());
        }
    };

    match run(client, api_base, &command).await {
        Ok(reply) => reply,
        Err(e) => {
            tracing::error!("command failed: {:#}", e);
            return Reply::failure_with_error("Error processing request", &e.to_string());
        }
    }
}

async fn run(
    client: &reqwest::Client,
    api_base: &str,
    command: &Command,
) -> anyhow::Result<Reply> {
    match command.action.as_deref() {
        Some("add") => add(client, api_base, command.todo.as_deref()).await,
        Some("list") => list(client, api_base).await,
        Some("complete") => complete(client, api_base, command.id.as_deref()).await,
        Some("delete") => delete(client, api_base, command.id.as_deref()).await,
        Some("count") => count(client, api_base).await,
        Some(other) => Ok(Reply::failure(&format!("Unknown action: {}", other))),
        None => Ok(Reply::failure("Missing action")),
    }
}

async fn add(
    client: &reqwest::Client,
    api_base: &str,
    todo: Option<&str>,
) -> anyhow::Result<Reply> {
    let text = match todo.map(str::trim).filter(|t| !t.is_empty()) {
        Some(text) => text,
        None => return Ok(Reply::failure("Todo text is required")),
    };

    let created: Value = client
        .post(format!("{}/todos", api_base))
        .json(&json!({ "text": text }))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await
        .context("decoding created todo")?;
    Ok(Reply::ok("add", created))
}

async fn list(client: &reqwest::Client, api_base: &str) -> anyhow::Result<Reply> {
    Ok(Reply::ok("list", fetch_todos(client, api_base).await?))
}

async fn complete(
    client: &reqwest::Client,
    api_base: &str,
    id: Option<&str>,
) -> anyhow::Result<Reply> {
    let id = match id.map(str::trim).filter(|i| !i.is_empty()) {
        Some(id) => id,
        None => return Ok(Reply::failure("Todo ID is required")),
    };

    let updated: Value = client
        .put(format!("{}/todos/{}", api_base, id))
        .json(&json!({ "completed": true }))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await
        .context("decoding updated todo")?;
    Ok(Reply::ok("complete", updated))
}

async fn delete(
    client: &reqwest::Client,
    api_base: &str,
    id: Option<&str>,
) -> anyhow::Result<Reply> {
    let id = match id.map(str::trim).filter(|i| !i.is_empty()) {
        Some(id) => id,
        None => return Ok(Reply::failure("Todo ID is required")),
    };

    client
        .delete(format!("{}/todos/{}", api_base, id))
        .send()
        .await?
        .error_for_status()?;
    Ok(Reply::ok_message("delete", "Todo deleted successfully"))
}

/// The REST API exposes no count endpoint, so count is derived from the list.
async fn count(client: &reqwest::Client, api_base: &str) -> anyhow::Result<Reply> {
    let todos = fetch_todos(client, api_base).await?;
    let total = todos.as_array().map(Vec::len).unwrap_or(0) as u64;
    Ok(Reply::ok_count("count", total))
}

async fn fetch_todos(client: &reqwest::Client, api_base: &str) -> anyhow::Result<Value> {
    client
        .get(format!("{}/todos", api_base))
        .send()
        .await?
        .error_for_status()?
        .json()
        .await
        .context("decoding todo list")
}
