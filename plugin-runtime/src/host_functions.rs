use anyhow::Result;

/// Host functions that will be exposed to WASM plugins
/// These provide the capability API that plugins can call

pub mod platform {
    use super::*;
    use uuid::Uuid;
    
    /// Trigger a judging job for a submission
    pub async fn trigger_judging(submission_id: Uuid) -> Result<()> {
        // TODO: Implement judging job queuing
        tracing::info!("trigger_judging called for submission: {}", submission_id);
        Ok(())
    }
    
    /// Emit an event to the event bus
    pub async fn emit_event(event_name: &str, payload: &[u8]) -> Result<()> {
        // TODO: Implement event emission
        tracing::info!("emit_event called: {} with {} bytes", event_name, payload.len());
        Ok(())
    }
}

pub mod db {
    use super::*;
    
    /// Execute SQL in plugin's private database schema
    pub async fn execute_private_sql(plugin_id: &str, sql: &str, _params: &[u8]) -> Result<Vec<u8>> {
        // TODO: Implement private SQL execution
        tracing::info!("execute_private_sql called for plugin: {} with query: {}", plugin_id, sql);
        Ok(vec![])
    }
}

pub mod ws {
    use super::*;
    use uuid::Uuid;
    
    /// Send WebSocket message to specific user
    pub async fn send_message(user_id: Uuid, message: &[u8]) -> Result<()> {
        // TODO: Implement WebSocket message sending
        tracing::info!("send_message called for user: {} with {} bytes", user_id, message.len());
        Ok(())
    }
}