//! The text-input helper: reads one request from stdin, shows a small
//! prompt window and writes whatever the user submits to stdout.
//!
//! Stdout carries the answer only, so logging goes to stderr.

use std::error::Error;
use std::io::{self, BufRead, Write};

use serde::Deserialize;
use tao::dpi::LogicalSize;
use tao::event::{Event, WindowEvent};
use tao::event_loop::{ControlFlow, EventLoopBuilder};
use tao::window::WindowBuilder;
use wry::WebViewBuilder;

use super::modal::ModalRequest;
use crate::core::logging::{debug, error, info, init_stderr_logger, trace};

const WIDTH: u32 = 420;
const HEIGHT: u32 = 150;

#[derive(Debug)]
enum HelperEvent {
    Finished,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum Message {
    Submit { text: String },
    Cancel,
}

pub fn run() -> Result<(), Box<dyn Error>> {
    init_stderr_logger();

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    if line.trim().is_empty() {
        debug!("Stdin closed before a request arrived");
        return Ok(());
    }
    let request: ModalRequest = serde_json::from_str(&line)?;
    info!("Prompting: {}", request.prompt);

    let event_loop = EventLoopBuilder::<HelperEvent>::with_user_event().build();
    let proxy = event_loop.create_proxy();

    let window = WindowBuilder::new()
        .with_title(&request.title)
        .with_inner_size(LogicalSize::new(WIDTH, HEIGHT))
        .with_resizable(false)
        .build(&event_loop)?;

    let web_view = WebViewBuilder::new()
        .with_html(page(&request)?)
        .with_ipc_handler(move |message| {
            let body = message.body();
            trace!("ipc_handler message: {}", body);

            match serde_json::from_str::<Message>(body) {
                Ok(Message::Submit { text }) => {
                    if let Err(e) = write_answer(&text) {
                        error!("Failed to write answer: {}", e);
                    }
                }
                Ok(Message::Cancel) => debug!("Prompt cancelled"),
                Err(e) => {
                    error!("JSON parse error: {:?}; Problematic JSON: {}", e, body)
                }
            }

            let _ = proxy.send_event(HelperEvent::Finished);
        })
        .build(&window)?;

    event_loop.run(move |event, _, control_flow| {
        *control_flow = ControlFlow::Wait;

        // Owned by the loop so the page lives as long as the window.
        let _ = &web_view;

        match event {
            Event::UserEvent(HelperEvent::Finished)
            | Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                *control_flow = ControlFlow::Exit;
            }
            _ => {}
        }
    });
}

fn write_answer(text: &str) -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    stdout.write_all(text.as_bytes())?;
    stdout.flush()
}

fn page(request: &ModalRequest) -> serde_json::Result<String> {
    let prompt = serde_json::to_string(&request.prompt)?.replace("</", "<\\/");
    Ok(PAGE.replace("__PROMPT__", &prompt))
}

const PAGE: &str = r#"<!doctype html>
<html>
<head>
<meta charset="utf-8">
<style>
  body { font: 14px sans-serif; margin: 16px; }
  #prompt { margin-bottom: 10px; }
  input { width: 100%; box-sizing: border-box; padding: 4px; }
  .buttons { margin-top: 12px; text-align: right; }
</style>
</head>
<body>
<div id="prompt"></div>
<input id="text" autofocus>
<div class="buttons">
  <button id="cancel">Cancel</button>
  <button id="ok">OK</button>
</div>
<script>
  const send = (message) => window.ipc.postMessage(JSON.stringify(message));
  const input = document.getElementById("text");
  const submit = () => send({ kind: "submit", text: input.value });
  document.getElementById("prompt").textContent = __PROMPT__;
  document.getElementById("ok").onclick = submit;
  document.getElementById("cancel").onclick = () => send({ kind: "cancel" });
  input.addEventListener("keydown", (e) => {
    if (e.key === "Enter") submit();
    if (e.key === "Escape") send({ kind: "cancel" });
  });
  input.focus();
</script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_is_embedded_as_a_script_string() {
        let html = page(&ModalRequest::new("T", "say </script> \"hi\"")).unwrap();
        assert!(html.contains(r#""say <\/script> \"hi\"""#));
        assert!(!html.contains("__PROMPT__"));
    }

    #[test]
    fn messages_parse() {
        let submit: Message =
            serde_json::from_str(r#"{"kind":"submit","text":"abc"}"#).unwrap();
        assert!(matches!(submit, Message::Submit { text } if text == "abc"));
        let cancel: Message = serde_json::from_str(r#"{"kind":"cancel"}"#).unwrap();
        assert!(matches!(cancel, Message::Cancel));
    }
}
