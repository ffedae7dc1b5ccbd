//! Runners: convert teloxide updates to core types and hand them to the handler chain or the callback handler.
//! Interacts with teloxide REPL / Dispatcher, handler_chain::HandlerChain and dbot_core::CallbackHandler.

use anyhow::Result;
use dbot_core::{CallbackHandler, ToCoreCallback, ToCoreMessage};
use handler_chain::HandlerChain;
use std::sync::Arc;
use teloxide::prelude::*;
use tracing::{debug, error, info, instrument};

use super::adapters::{TelegramCallbackWrapper, TelegramMessageWrapper};

/// Runs the message through the chain; the chain's LoggingHandler logs its content. Chain failures are
/// logged, never propagated.
async fn dispatch_message(chain: &HandlerChain, msg: &teloxide::types::Message) {
    let core_msg = TelegramMessageWrapper(msg).to_core();

    debug!(
        chat_id = core_msg.chat.id,
        message_type = %core_msg.message_type,
        "Dispatching message to handler chain"
    );

    if let Err(e) = chain.handle(&core_msg).await {
        error!(error = %e, user_id = core_msg.user.id, "Handler chain failed");
    }
}

/// Starts a message-only REPL. Each message becomes a core::Message and goes to `chain.handle`.
/// Updates of one chat are processed in arrival order.
#[instrument(skip(bot, handler_chain))]
pub async fn run_repl(bot: teloxide::Bot, handler_chain: HandlerChain) -> Result<()> {
    info!(handlers = handler_chain.len(), "Starting REPL");

    let chain = handler_chain;
    teloxide::repl(bot, move |msg: teloxide::types::Message| {
        let chain = chain.clone();
        async move {
            dispatch_message(&chain, &msg).await;
            respond(())
        }
    })
    .await;

    info!("REPL stopped");
    Ok(())
}

/// Starts a dispatcher with two branches: messages go to the chain, callback queries to `callbacks`.
/// Stops on Ctrl-C.
#[instrument(skip(bot, handler_chain, callbacks))]
pub async fn run_dispatcher(
    bot: teloxide::Bot,
    handler_chain: HandlerChain,
    callbacks: Arc<dyn CallbackHandler>,
) -> Result<()> {
    info!(handlers = handler_chain.len(), "Starting dispatcher");

    let chain = handler_chain;
    let on_message = move |msg: teloxide::types::Message| {
        let chain = chain.clone();
        async move {
            dispatch_message(&chain, &msg).await;
            respond(())
        }
    };

    let on_callback = move |query: teloxide::types::CallbackQuery| {
        let callbacks = callbacks.clone();
        async move {
            let event = TelegramCallbackWrapper(&query).to_core();
            info!(
                user_id = event.user.id,
                chat_id = event.chat.id,
                callback_data = %event.data,
                "Received callback"
            );
            if let Err(e) = callbacks.handle_callback(&event).await {
                error!(error = %e, user_id = event.user.id, "Callback handler failed");
            }
            respond(())
        }
    };

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(on_message))
        .branch(Update::filter_callback_query().endpoint(on_callback));

    Dispatcher::builder(bot, handler)
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("Dispatcher stopped");
    Ok(())
}
