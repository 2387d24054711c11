//! WebSocket client session management.

use futures_util::{SinkExt, StreamExt, stream::SplitSink};
use parley_server::infrastructure::dto::websocket::{ClientEvent, ServerEvent};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::{net::TcpStream, sync::mpsc};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async,
    tungstenite::{self, protocol::Message},
};

use crate::{
    domain::{UserInput, auto_reply, join_event, parse_input},
    error::ClientError,
    formatter::MessageFormatter,
    ui::{prompt, redisplay_prompt},
};

type WsSink = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;

/// Run the WebSocket client session
///
/// Sends `join-chat` as soon as the connection is open, so every new session
/// goes back into matchmaking.
///
/// # Returns
///
/// * `Ok(())` - The user left (`/quit`, Ctrl+C or Ctrl+D)
/// * `Err(ClientError)` - The connection failed or was lost
pub async fn run_client_session(url: &str, display_name: Option<&str>) -> Result<(), ClientError> {
    let (ws_stream, _response) = match connect_async(url).await {
        Ok(result) => result,
        Err(tungstenite::Error::Http(response)) => {
            return Err(ClientError::ServerRejected(response.status().to_string()));
        }
        Err(e) => return Err(ClientError::ConnectionError(e.to_string())),
    };

    tracing::info!("Connected to {}", url);
    println!(
        "\nYou are '{}'. Waiting to be matched... Type /quit to exit.\n",
        display_name.unwrap_or("Anonymous")
    );

    let (mut write, mut read) = ws_stream.split();

    // Events the client answers on its own (e.g. declining voice calls)
    let (reply_tx, mut reply_rx) = mpsc::unbounded_channel::<ClientEvent>();

    let name_for_read = display_name.map(str::to_string);
    let mut read_task = tokio::spawn(async move {
        let mut connection_error = false;

        while let Some(message) = read.next().await {
            match message {
                Ok(Message::Text(text)) => {
                    match serde_json::from_str::<ServerEvent>(text.as_str()) {
                        Ok(event) => {
                            if let Some(reply) = auto_reply(&event) {
                                reply_tx.send(reply).ok();
                            }
                            if let Some(formatted) = MessageFormatter::format_event(&event) {
                                print!("{}", formatted);
                                redisplay_prompt(name_for_read.as_deref());
                            }
                        }
                        Err(_) => {
                            print!("{}", MessageFormatter::format_raw_message(text.as_str()));
                            redisplay_prompt(name_for_read.as_deref());
                        }
                    }
                }
                Ok(Message::Close(_)) => {
                    tracing::info!("Server closed the connection");
                    connection_error = true;
                    break;
                }
                Err(e) => {
                    tracing::warn!("WebSocket read error: {}", e);
                    connection_error = true;
                    break;
                }
                _ => {}
            }
        }

        connection_error
    });

    // Create channel for rustyline input
    let (input_tx, mut input_rx) = mpsc::unbounded_channel::<String>();

    // Spawn a blocking thread for rustyline (synchronous readline)
    let readline_prompt = prompt(display_name);
    let _readline_handle = std::thread::spawn(move || {
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(e) => {
                eprintln!("Failed to initialize readline: {}", e);
                return;
            }
        };

        loop {
            match rl.readline(&readline_prompt) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        rl.add_history_entry(line.trim()).ok();
                    }
                    if input_tx.send(line).is_err() {
                        // Channel closed, exit thread
                        break;
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    // Ctrl+C
                    tracing::info!("Interrupted");
                    break;
                }
                Err(ReadlineError::Eof) => {
                    // Ctrl+D
                    tracing::info!("EOF");
                    break;
                }
                Err(err) => {
                    tracing::error!("Readline error: {}", err);
                    break;
                }
            }
        }
    });

    let join = join_event(display_name);
    let mut write_task = tokio::spawn(async move {
        if send_event(&mut write, &join).await.is_err() {
            return true;
        }

        loop {
            let event = tokio::select! {
                line = input_rx.recv() => match line.as_deref().map(parse_input) {
                    None | Some(UserInput::Quit) => break,
                    Some(UserInput::Empty) => continue,
                    Some(UserInput::Message(text)) => ClientEvent::Message { message: Some(text) },
                },
                Some(reply) = reply_rx.recv() => reply,
            };

            let is_chat = matches!(event, ClientEvent::Message { .. });
            if send_event(&mut write, &event).await.is_err() {
                return true;
            }
            if is_chat {
                print!("{}", MessageFormatter::format_sent_confirmation());
            }
        }

        let _ = write.close().await;
        false
    });

    // If any one of the tasks completes, abort the other
    tokio::select! {
        read_result = &mut read_task => {
            write_task.abort();
            if read_result.unwrap_or(false) {
                return Err(ClientError::ConnectionError("Connection lost".to_string()));
            }
        }
        write_result = &mut write_task => {
            read_task.abort();
            if write_result.unwrap_or(false) {
                return Err(ClientError::ConnectionError("Connection lost".to_string()));
            }
        }
    }

    Ok(())
}

async fn send_event(write: &mut WsSink, event: &ClientEvent) -> Result<(), tungstenite::Error> {
    let json = match serde_json::to_string(event) {
        Ok(json) => json,
        Err(e) => {
            tracing::error!("Failed to serialize event: {}", e);
            return Ok(());
        }
    };
    write.send(Message::text(json)).await.map_err(|e| {
        tracing::warn!("Failed to send event: {}", e);
        e
    })
}
