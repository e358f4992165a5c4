//! Telegram transport.
//!
//! Normalizes teloxide updates into [`InboundMessage`]s, hands them to the
//! dispatcher, and delivers any reply threaded onto the original message.

use std::sync::Arc;

use teloxide::dispatching::{Dispatcher as TgDispatcher, UpdateFilterExt};
use teloxide::dptree;
use teloxide::payloads::SendMessageSetters;
use teloxide::prelude::ResponseResult;
use teloxide::requests::Requester;
use teloxide::types::{Message, MessageId, ReplyParameters, Update};
use teloxide::Bot;
use tracing::{error, info};

use crate::app::Dispatcher;
use crate::domain::message::{ConversationKind, InboundMessage};

/// Run the long-polling loop until shutdown.
pub async fn run(bot: Bot, engine: Arc<Dispatcher>) {
    info!("telegram transport starting");
    let handler = Update::filter_message().endpoint(on_message);
    TgDispatcher::builder(bot, handler)
        .dependencies(dptree::deps![engine])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;
    info!("telegram transport stopped");
}

async fn on_message(bot: Bot, msg: Message, engine: Arc<Dispatcher>) -> ResponseResult<()> {
    let Some(inbound) = normalize(&msg) else {
        return Ok(());
    };

    if let Some(reply) = engine.handle(&inbound).await {
        let request = bot
            .send_message(msg.chat.id, reply.text)
            .reply_parameters(ReplyParameters::new(MessageId(reply.in_reply_to)));
        if let Err(e) = request.await {
            error!(conversation = %reply.conversation, error = %e, "failed to send reply");
        }
    }
    Ok(())
}

/// Build the engine's view of a Telegram message. Non-text updates are
/// dropped here.
fn normalize(msg: &Message) -> Option<InboundMessage> {
    let text = msg.text()?.to_string();
    let kind = if msg.chat.is_private() {
        ConversationKind::Private
    } else {
        ConversationKind::Group
    };
    let replied = msg.reply_to_message();

    Some(InboundMessage {
        conversation: msg.chat.id.0.to_string().into(),
        kind,
        text,
        message_id: msg.id.0,
        sender_username: msg.from.as_ref().and_then(|u| u.username.clone()),
        reply_to_text: replied.and_then(|r| r.text().map(ToString::to_string)),
        reply_to_author: replied
            .and_then(|r| r.from.as_ref())
            .and_then(|u| u.username.clone()),
    })
}
