//! Reflected outgoing message tasks
//!
//! Every supported message type is processed by a [`ReflectedOutgoingTask`]: a
//! [`TaskBase`] holding the envelope and its dependencies, combined with an
//! [`OutgoingMessageHandler`] for the type-specific part. Running a task always
//! follows the same steps:
//!
//! 1. Record the envelope's nonces (unless the handler opts out)
//! 2. Process the message (type-specific)
//! 3. Mark the conversation as updated (if the handler asks for it)
//!
//! [`get_reflected_outgoing_message_task`] selects the task for an envelope.

use std::fmt;

use once_cell::unsync::OnceCell;
use reflect_storage_traits::messages::MessageStorage;
use reflect_storage_traits::messages::types::{Message, MessageBody, MessageState};
use reflect_storage_traits::{IdentityString, ReflectStorageProvider, Timestamp};

mod delivery_receipt;
mod file;
mod group_call;
pub mod nonce_guard;
mod placeholder;
mod profile_picture;
mod text;

pub use self::delivery_receipt::DeliveryReceiptHandler;
pub use self::file::FileMessageHandler;
pub use self::group_call::GroupCallStartHandler;
use self::nonce_guard::NonceGuardOutcome;
pub use self::placeholder::PlaceholderHandler;
pub use self::profile_picture::{
    DeleteProfilePictureHandler, RequestProfilePictureHandler, SetProfilePictureHandler,
};
pub use self::text::TextMessageHandler;
use crate::ReflectConfig;
use crate::callback::ReflectCallback;
use crate::envelope::{ConversationId, CspE2eMessageType, OutgoingMessage};
use crate::error::Error;
use crate::receiver::MessageReceiver;

pub(crate) type Result<T> = std::result::Result<T, Error>;

/// Dependencies a task runs against
pub struct TaskContext<'a, S> {
    /// Storage for nonces, conversations and messages
    pub storage: &'a S,
    /// Identity of this device's user
    pub own_identity: &'a IdentityString,
    /// Engine configuration
    pub config: &'a ReflectConfig,
    /// Optional event callback
    pub callback: Option<&'a dyn ReflectCallback>,
}

impl<S> Clone for TaskContext<'_, S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for TaskContext<'_, S> {}

/// Summary of a processed envelope, including conditions that were absorbed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReflectedOutgoingReport {
    /// Type of the processed message
    pub message_type: CspE2eMessageType,
    /// What happened to the envelope's nonces
    pub nonces: NonceGuardOutcome,
    /// Whether the conversation's last update was bumped
    pub bumped_last_update: bool,
}

/// A task that replays one reflected outgoing message
pub trait ReflectedOutgoingMessageTask {
    /// Type of the message this task processes
    fn message_type(&self) -> CspE2eMessageType;

    /// Whether the envelope's nonces are recorded
    fn store_nonces(&self) -> bool;

    /// Whether successful processing marks the conversation as updated
    fn should_bump_last_update(&self) -> bool;

    /// Run all steps of the task
    fn execute(&self) -> Result<ReflectedOutgoingReport>;
}

/// Type-specific part of a reflected outgoing message task
pub trait OutgoingMessageHandler<S>: fmt::Debug
where
    S: ReflectStorageProvider,
{
    /// Whether nonces of this message type are recorded
    fn store_nonces(&self) -> bool {
        true
    }

    /// Whether successful processing marks the conversation as updated
    fn should_bump_last_update(&self) -> bool;

    /// Apply the effects of the message to local state
    fn process_outgoing_message(&self, task: &TaskBase<'_, S>) -> Result<()>;
}

/// State shared by every task: the envelope, its dependencies and the lazily
/// resolved receiver
pub struct TaskBase<'a, S> {
    ctx: TaskContext<'a, S>,
    message: &'a OutgoingMessage,
    message_type: CspE2eMessageType,
    receiver: OnceCell<MessageReceiver>,
}

impl<'a, S> TaskBase<'a, S>
where
    S: ReflectStorageProvider,
{
    /// Create the base of a task for `message_type`.
    ///
    /// Fails if the envelope carries another type or addresses a conversation kind
    /// that the type cannot be sent to.
    pub fn new(
        ctx: TaskContext<'a, S>,
        message: &'a OutgoingMessage,
        message_type: CspE2eMessageType,
    ) -> Result<Self> {
        if message.message_type != message_type.code() {
            return Err(Error::TypeMismatch {
                expected: message_type,
                actual: message.message_type,
            });
        }

        let is_group_conversation = matches!(message.conversation, ConversationId::Group { .. });
        if message_type.is_group_message() != is_group_conversation {
            return Err(Error::ConversationMismatch {
                message_type,
                conversation: message.conversation.kind(),
            });
        }

        Ok(Self {
            ctx,
            message,
            message_type,
            receiver: OnceCell::new(),
        })
    }

    /// The reflected envelope
    pub fn message(&self) -> &OutgoingMessage {
        self.message
    }

    /// Type of the reflected message
    pub fn message_type(&self) -> CspE2eMessageType {
        self.message_type
    }

    /// Storage the task runs against
    pub fn storage(&self) -> &'a S {
        self.ctx.storage
    }

    /// Identity of this device's user
    pub fn own_identity(&self) -> &'a IdentityString {
        self.ctx.own_identity
    }

    /// Optional event callback
    pub fn callback(&self) -> Option<&'a dyn ReflectCallback> {
        self.ctx.callback
    }

    /// The conversation the message was sent to, resolved at most once
    pub fn receiver(&self) -> Result<&MessageReceiver> {
        self.receiver
            .get_or_try_init(|| MessageReceiver::resolve(self.ctx.storage, &self.message.conversation))
    }

    /// Build a message model with the fields every reflected outgoing message shares
    pub fn new_outgoing_message(&self, body: MessageBody) -> Result<Message> {
        let receiver = self.receiver()?;
        Ok(Message {
            api_message_id: self.message.message_id,
            conversation: receiver.conversation_key(),
            identity: self.ctx.own_identity.clone(),
            body,
            is_saved: true,
            is_outbox: true,
            state: MessageState::Sending,
            created_at: self.message.created_at,
            edited_at: None,
            read_at: None,
        })
    }

    /// Save a new outgoing message unless the same message is already stored.
    ///
    /// Returns whether the message was saved.
    pub fn save_outgoing_message(&self, body: MessageBody) -> Result<bool> {
        let message = self.new_outgoing_message(body)?;

        if self
            .storage()
            .find_message_by_api_id(&message.conversation, &message.api_message_id)?
            .is_some()
        {
            tracing::info!(
                target: "reflect_core::tasks::save_outgoing_message",
                "Message {} already exists in {}, skipping",
                message.api_message_id.to_api_string(),
                message.conversation
            );
            return Ok(false);
        }

        tracing::debug!(
            target: "reflect_core::tasks::save_outgoing_message",
            "Saving reflected outgoing {} message {} in {}",
            self.message_type,
            message.api_message_id.to_api_string(),
            message.conversation
        );
        self.storage().save_message(message)?;
        Ok(true)
    }
}

/// A reflected outgoing message task: shared steps plus a type-specific handler
pub struct ReflectedOutgoingTask<'a, S, H> {
    base: TaskBase<'a, S>,
    handler: H,
}

impl<'a, S, H> ReflectedOutgoingTask<'a, S, H>
where
    S: ReflectStorageProvider,
    H: OutgoingMessageHandler<S>,
{
    /// Create a task processing `message` as a message of `message_type`
    pub fn new(
        ctx: TaskContext<'a, S>,
        message: &'a OutgoingMessage,
        message_type: CspE2eMessageType,
        handler: H,
    ) -> Result<Self> {
        Ok(Self {
            base: TaskBase::new(ctx, message, message_type)?,
            handler,
        })
    }

    /// Shared task state
    pub fn base(&self) -> &TaskBase<'a, S> {
        &self.base
    }
}

impl<S, H> ReflectedOutgoingMessageTask for ReflectedOutgoingTask<'_, S, H>
where
    S: ReflectStorageProvider,
    H: OutgoingMessageHandler<S>,
{
    fn message_type(&self) -> CspE2eMessageType {
        self.base.message_type
    }

    fn store_nonces(&self) -> bool {
        self.handler.store_nonces()
    }

    fn should_bump_last_update(&self) -> bool {
        self.handler.should_bump_last_update()
    }

    fn execute(&self) -> Result<ReflectedOutgoingReport> {
        let message = self.base.message;

        let nonces = if self.store_nonces() {
            nonce_guard::store_nonces(
                self.base.ctx.storage,
                self.base.ctx.config.nonce_scope,
                &message.nonces,
            )
        } else {
            tracing::debug!(
                target: "reflect_core::tasks::nonce_guard",
                "Do not store nonces for message of type {}",
                self.base.message_type
            );
            NonceGuardOutcome {
                not_stored_by_policy: message.nonces.len(),
                ..Default::default()
            }
        };

        self.handler.process_outgoing_message(&self.base)?;

        let bumped_last_update = if self.should_bump_last_update() {
            self.base
                .receiver()?
                .bump_last_update(self.base.ctx.storage, Timestamp::now())?;
            true
        } else {
            false
        };

        Ok(ReflectedOutgoingReport {
            message_type: self.base.message_type,
            nonces,
            bumped_last_update,
        })
    }
}

/// Select the task that processes a reflected outgoing message.
///
/// Every protocol message type is decided here explicitly, so a new type cannot be
/// added without choosing how reflected outgoing messages of it are handled.
pub fn get_reflected_outgoing_message_task<'a, S>(
    ctx: TaskContext<'a, S>,
    message: &'a OutgoingMessage,
) -> Result<Box<dyn ReflectedOutgoingMessageTask + 'a>>
where
    S: ReflectStorageProvider + 'a,
{
    let message_type = message.csp_message_type().inspect_err(|e| {
        tracing::error!(target: "reflect_core::tasks::dispatch", "{}", e);
    })?;

    let task: Result<Box<dyn ReflectedOutgoingMessageTask + 'a>> = match message_type {
        CspE2eMessageType::Text | CspE2eMessageType::GroupText => {
            boxed(ctx, message, message_type, TextMessageHandler)
        }
        CspE2eMessageType::DeliveryReceipt | CspE2eMessageType::GroupDeliveryReceipt => {
            boxed(ctx, message, message_type, DeliveryReceiptHandler)
        }
        CspE2eMessageType::File | CspE2eMessageType::GroupFile => {
            boxed(ctx, message, message_type, FileMessageHandler)
        }
        CspE2eMessageType::PollSetup
        | CspE2eMessageType::PollVote
        | CspE2eMessageType::GroupPollSetup
        | CspE2eMessageType::GroupPollVote => Err(Error::NotYetImplemented(message_type)),
        CspE2eMessageType::GroupCallStart => {
            boxed(ctx, message, message_type, GroupCallStartHandler)
        }
        CspE2eMessageType::CallOffer
        | CspE2eMessageType::CallRinging
        | CspE2eMessageType::CallAnswer
        | CspE2eMessageType::CallHangup => boxed(
            ctx,
            message,
            message_type,
            PlaceholderHandler::new(format!(
                "Reflected message of type {} was received as outgoing",
                message_type
            )),
        ),
        CspE2eMessageType::CallIceCandidate => Err(Error::ForbiddenOutgoingType(message_type)),
        CspE2eMessageType::ContactRequestProfilePicture => {
            boxed(ctx, message, message_type, RequestProfilePictureHandler)
        }
        CspE2eMessageType::ContactSetProfilePicture => {
            boxed(ctx, message, message_type, SetProfilePictureHandler)
        }
        CspE2eMessageType::ContactDeleteProfilePicture => {
            boxed(ctx, message, message_type, DeleteProfilePictureHandler)
        }
        CspE2eMessageType::DeprecatedImage
        | CspE2eMessageType::Location
        | CspE2eMessageType::DeprecatedVideo
        | CspE2eMessageType::DeprecatedAudio
        | CspE2eMessageType::GroupLocation
        | CspE2eMessageType::GroupImage
        | CspE2eMessageType::GroupVideo
        | CspE2eMessageType::GroupAudio
        | CspE2eMessageType::GroupSetup
        | CspE2eMessageType::GroupName
        | CspE2eMessageType::GroupLeave
        | CspE2eMessageType::GroupJoinRequest
        | CspE2eMessageType::GroupJoinResponse
        | CspE2eMessageType::GroupSetProfilePicture
        | CspE2eMessageType::GroupSyncRequest
        | CspE2eMessageType::GroupDeleteProfilePicture
        | CspE2eMessageType::TypingIndicator
        | CspE2eMessageType::EditMessage
        | CspE2eMessageType::DeleteMessage
        | CspE2eMessageType::GroupEditMessage
        | CspE2eMessageType::GroupDeleteMessage
        | CspE2eMessageType::ForwardSecurityEnvelope
        | CspE2eMessageType::Empty
        | CspE2eMessageType::WebSessionResume => {
            Err(Error::UnsupportedOutgoingType(message_type))
        }
    };

    task.inspect_err(|e| {
        tracing::error!(target: "reflect_core::tasks::dispatch", "{}", e);
    })
}

fn boxed<'a, S, H>(
    ctx: TaskContext<'a, S>,
    message: &'a OutgoingMessage,
    message_type: CspE2eMessageType,
    handler: H,
) -> Result<Box<dyn ReflectedOutgoingMessageTask + 'a>>
where
    S: ReflectStorageProvider + 'a,
    H: OutgoingMessageHandler<S> + 'a,
{
    Ok(Box::new(ReflectedOutgoingTask::new(
        ctx,
        message,
        message_type,
        handler,
    )?))
}
