//! Interactive chat view.

use super::output::Output;
use super::prompt::Prompter;
use crate::{AppState, Result, ViewDriver};
use homehelp_core::{Conversation, Message, MessageKind, Sender, SessionContext};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::io::AsyncBufRead;

/// Leaves the chat at once, dropping replies still on their way.
pub const QUIT_COMMAND: &str = "/quit";

type ChatDriver = ViewDriver<Conversation<StdRng>>;

/// Open conversation `id` and relay lines until `/quit` or end of input.
///
/// At end of input the view stays mounted until every pending reply has
/// arrived, so piped input sees the whole exchange. `/quit` unmounts
/// immediately. Returns the transcript as displayed.
pub async fn run<R: AsyncBufRead + Unpin>(
    state: &AppState,
    id: &str,
    viewer: SessionContext,
    prompter: &mut Prompter<R>,
    output: &Output,
) -> Result<Vec<Message>> {
    let conversation = Conversation::open(
        id,
        viewer,
        chrono::Utc::now(),
        state.timings(),
        StdRng::from_os_rng(),
    );
    let counterpart = conversation.counterpart();
    let driver = ChatDriver::mount(conversation);
    let mut fired = driver.subscribe();

    output.header(&format!("{} - {}", counterpart.name, counterpart.title));
    output.kv("Status", counterpart.status);
    output.hint(&format!("Type a message and press enter, {} to leave", QUIT_COMMAND));

    let mut shown = print_new(&driver, 0, output);
    loop {
        tokio::select! {
            line = prompter.next_line() => {
                match line? {
                    Some(line) if line == QUIT_COMMAND => break,
                    Some(line) => {
                        if let Err(e) = driver.update(|c, now| c.send(&line, now).map(|_| ())) {
                            output.error(&e.to_string());
                        }
                        shown = print_new(&driver, shown, output);
                    }
                    None => {
                        while driver.with(|c| c.pending_replies()) > 0 {
                            if fired.changed().await.is_err() {
                                break;
                            }
                            shown = print_new(&driver, shown, output);
                        }
                        break;
                    }
                }
            }
            changed = fired.changed() => {
                if changed.is_err() {
                    break;
                }
                shown = print_new(&driver, shown, output);
            }
        }
    }

    driver.update(|c, _| c.close());
    tracing::debug!(chat_id = id, "chat left");
    Ok(driver.with(|c| c.messages().to_vec()))
}

/// Print messages from index `shown` on; returns the new count.
fn print_new(driver: &ChatDriver, shown: usize, output: &Output) -> usize {
    driver.with(|c| {
        let own = Sender::of(c.viewer());
        let counterpart = c.counterpart();
        for message in c.messages().iter().skip(shown) {
            let time = message
                .created_at
                .with_timezone(&chrono::Local)
                .format("%H:%M")
                .to_string();
            let author = match message.sender {
                sender if sender == own => "You",
                Sender::System => "",
                _ => counterpart.name,
            };
            output.chat_line(
                &time,
                author,
                &message.body,
                message.sender == own,
                message.kind == MessageKind::System,
            );
        }
        c.messages().len()
    })
}
