use anyhow::Result;
use async_trait::async_trait;
use event_bus::{Event, EventBus};
use evaluation_engine::legacy_queue::{JobQueue, EvaluationJob};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

pub mod database;
pub mod messaging;
pub mod platform;
pub mod websocket;

/// The Capability Provider exposes host functions to WASM plugins
/// This is the core interface between the kernel and plugins

#[async_trait]
pub trait CapabilityProvider {
    // Platform capabilities
    async fn trigger_judging(&self, submission_id: Uuid) -> Result<()>;
    async fn emit_event(&self, event: Event) -> Result<()>;
    
    // Database capabilities
    async fn execute_private_sql(&self, plugin_id: Uuid, sql: &str, params: &[u8]) -> Result<Vec<u8>>;
    
    // WebSocket capabilities
    async fn send_message(&self, user_id: Uuid, message: &[u8]) -> Result<()>;
}

pub struct JudiciaCapabilityProvider {
    db_pool: Arc<PgPool>,
    event_bus: Arc<dyn EventBus + Send + Sync>,
    job_queue: Arc<dyn JobQueue + Send + Sync>,
    // TODO: Add WebSocket connection manager
}

impl JudiciaCapabilityProvider {
    pub fn new(
        db_pool: Arc<PgPool>,
        event_bus: Arc<dyn EventBus + Send + Sync>,
        job_queue: Arc<dyn JobQueue + Send + Sync>,
    ) -> Self {
        Self {
            db_pool,
            event_bus,
            job_queue,
        }
    }
}

#[async_trait]
impl CapabilityProvider for JudiciaCapabilityProvider {
    async fn trigger_judging(&self, submission_id: Uuid) -> Result<()> {
        // TODO: Query database to get submission details
        // For now, create a basic evaluation job with mock data
        let job = EvaluationJob {
            id: Uuid::new_v4(),
            submission_id,
            problem_id: Uuid::new_v4(), // TODO: Get from database
            language_id: Uuid::new_v4(), // TODO: Get from database
            source_code: "// Plugin-triggered evaluation job".to_string(), // TODO: Get from database
            priority: 1,
            timeout_ms: 5000,
            memory_limit_kb: 256 * 1024, // 256 MB
            test_case_count: 10, // TODO: Get from problem data
            created_at: chrono::Utc::now(),
            retry_count: 0,
            max_retries: 3,
            metadata: serde_json::json!({
                "triggered_by": "plugin",
                "submission_id": submission_id
            }),
        };
        
        // Submit job to queue
        self.job_queue.submit_job(job).await?;
        
        // Also emit event for other subscribers
        let event = Event {
            id: Uuid::new_v4(),
            event_type: "judging.requested".to_string(),
            source_plugin_id: None,
            timestamp: chrono::Utc::now(),
            payload: serde_json::json!({
                "submission_id": submission_id
            }),
        };
        
        self.event_bus.publish(event).await?;
        tracing::info!("Triggered judging for submission: {}", submission_id);
        Ok(())
    }
    
    async fn emit_event(&self, event: Event) -> Result<()> {
        self.event_bus.publish(event).await
    }
    
    async fn execute_private_sql(&self, plugin_id: Uuid, sql: &str, _params: &[u8]) -> Result<Vec<u8>> {
        // TODO: Implement plugin-specific database schema isolation
        // Each plugin gets its own schema: plugin_{plugin_id}
        
        tracing::debug!("Executing private SQL for plugin {}: {}", plugin_id, sql);
        
        // For now, return empty result
        // In full implementation, this would:
        // 1. Validate SQL safety
        // 2. Execute in plugin's private schema
        // 3. Return serialized results
        Ok(vec![])
    }
    
    async fn send_message(&self, user_id: Uuid, message: &[u8]) -> Result<()> {
        // TODO: Implement WebSocket message sending
        tracing::debug!("Sending message to user {}: {} bytes", user_id, message.len());
        Ok(())
    }
}

/// Configuration for capability access control
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CapabilityPermissions {
    pub plugin_id: Uuid,
    pub allowed_capabilities: Vec<String>,
    pub database_access_level: DatabaseAccessLevel,
    pub rate_limits: RateLimits,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DatabaseAccessLevel {
    None,
    ReadOnly,
    ReadWrite,
    SchemaAdmin,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateLimits {
    pub requests_per_second: u32,
    pub max_database_queries_per_minute: u32,
    pub max_events_per_minute: u32,
}

// Mock implementation for testing
pub struct MockCapabilityProvider {
    job_queue: Arc<dyn JobQueue + Send + Sync>,
}

impl MockCapabilityProvider {
    pub fn new(job_queue: Arc<dyn JobQueue + Send + Sync>) -> Self {
        Self { job_queue }
    }
}

#[async_trait]
impl CapabilityProvider for MockCapabilityProvider {
    async fn trigger_judging(&self, submission_id: Uuid) -> Result<()> {
        tracing::debug!("Mock: Triggered judging for submission: {}", submission_id);
        
        // Create and submit a mock evaluation job
        let job = EvaluationJob {
            id: Uuid::new_v4(),
            submission_id,
            problem_id: Uuid::new_v4(),
            language_id: Uuid::new_v4(),
            source_code: "// Mock evaluation job".to_string(),
            priority: 1,
            timeout_ms: 5000,
            memory_limit_kb: 256 * 1024,
            test_case_count: 5,
            created_at: chrono::Utc::now(),
            retry_count: 0,
            max_retries: 3,
            metadata: serde_json::json!({
                "triggered_by": "mock_plugin",
                "submission_id": submission_id
            }),
        };
        
        self.job_queue.submit_job(job).await?;
        Ok(())
    }
    
    async fn emit_event(&self, event: Event) -> Result<()> {
        tracing::debug!("Mock: Emitted event {} ({})", event.event_type, event.id);
        Ok(())
    }
    
    async fn execute_private_sql(&self, plugin_id: Uuid, sql: &str, _params: &[u8]) -> Result<Vec<u8>> {
        tracing::debug!("Mock: Executed SQL for plugin {}: {}", plugin_id, sql);
        Ok(vec![])
    }
    
    async fn send_message(&self, user_id: Uuid, message: &[u8]) -> Result<()> {
        tracing::debug!("Mock: Sent message to user {}: {} bytes", user_id, message.len());
        Ok(())
    }
}