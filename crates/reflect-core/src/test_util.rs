//! Test utilities for the reflect-core crate

use std::sync::Once;

use parking_lot::Mutex;
use reflect_memory_storage::ReflectMemoryStorage;
use reflect_storage_traits::nonces::types::Nonce;
use reflect_storage_traits::test_utils::identity;
use reflect_storage_traits::{MessageId, Timestamp};
use serde_json::json;
use tracing_subscriber::EnvFilter;

use crate::ReflectEngine;
use crate::callback::{GroupCallStartInfo, ReflectCallback};
use crate::envelope::{ConversationId, CspE2eMessageType, OutgoingMessage};

/// Identity of the user the test engine runs for
pub const OWN_IDENTITY: &str = "OWNIDENT";

/// Creation time of every envelope built by [`outgoing_message`]
pub const TEST_CREATED_AT: Timestamp = Timestamp::from_millis(1_700_000_100_000);

static INIT_TRACING: Once = Once::new();

/// Install a fmt subscriber honoring `RUST_LOG`
pub fn init_tracing() {
    INIT_TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Creates an engine over fresh memory storage
pub fn create_test_engine() -> ReflectEngine<ReflectMemoryStorage> {
    init_tracing();
    ReflectEngine::new(ReflectMemoryStorage::default(), identity(OWN_IDENTITY))
}

/// Creates an envelope without nonces
pub fn outgoing_message(
    message_type: CspE2eMessageType,
    message_id: u64,
    conversation: ConversationId,
    body: Vec<u8>,
) -> OutgoingMessage {
    OutgoingMessage {
        message_type: message_type.code(),
        message_id: MessageId::new(message_id),
        created_at: TEST_CREATED_AT,
        nonces: Vec::new(),
        conversation,
        body,
    }
}

/// Builder helpers for envelopes
pub trait OutgoingMessageExt {
    /// Replace the nonces of the envelope
    fn with_nonces(self, nonces: Vec<Nonce>) -> Self;
}

impl OutgoingMessageExt for OutgoingMessage {
    fn with_nonces(mut self, nonces: Vec<Nonce>) -> Self {
        self.nonces = nonces;
        self
    }
}

/// JSON body of a file message
pub fn file_body(file_name: &str) -> Vec<u8> {
    json!({
        "b": "0102030405060708090a0b0c0d0e0f10",
        "k": "ab".repeat(32),
        "m": "application/pdf",
        "n": file_name,
        "s": 4096,
        "j": 0
    })
    .to_string()
    .into_bytes()
}

/// Body of a delivery receipt
pub fn delivery_receipt_body(status: u8, message_ids: &[u64]) -> Vec<u8> {
    let mut body = vec![status];
    for id in message_ids {
        body.extend_from_slice(&MessageId::new(*id).to_le_bytes());
    }
    body
}

/// Body of a set-profile-picture message
pub fn set_profile_picture_body(blob_id: [u8; 16], size: u32) -> Vec<u8> {
    let mut body = blob_id.to_vec();
    body.extend_from_slice(&size.to_le_bytes());
    body.extend_from_slice(&[0x42; 32]);
    body
}

/// JSON body of a group call start message
pub fn group_call_start_body(sfu_base_url: &str) -> Vec<u8> {
    json!({
        "protocolVersion": 1,
        "gck": "cd".repeat(32),
        "sfuBaseUrl": sfu_base_url
    })
    .to_string()
    .into_bytes()
}

/// Callback that records every event
#[derive(Debug, Default)]
pub struct RecordingCallback {
    group_calls: Mutex<Vec<GroupCallStartInfo>>,
}

impl RecordingCallback {
    /// Group call starts seen so far
    pub fn group_calls(&self) -> Vec<GroupCallStartInfo> {
        self.group_calls.lock().clone()
    }
}

impl ReflectCallback for RecordingCallback {
    fn on_group_call_started(&self, info: &GroupCallStartInfo) {
        self.group_calls.lock().push(info.clone());
    }
}
