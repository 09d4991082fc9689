#![forbid(unsafe_code)]

//! Minimal text input demonstrating paste handling and focus reporting.
//!
//! Run with: cargo run --example textinput --features async=false

use matcha::{quit, BlurMsg, Cmd, FocusMsg, KeyMsg, KeyType, Message, Model, PasteMsg, Program};

struct App {
    value: String,
    submitted: bool,
    focused: bool,
}

impl App {
    const fn new() -> Self {
        Self {
            value: String::new(),
            submitted: false,
            focused: true,
        }
    }
}

impl Model for App {
    fn update(&mut self, msg: Message) -> Option<Cmd> {
        if msg.is::<FocusMsg>() {
            self.focused = true;
            return None;
        }
        if msg.is::<BlurMsg>() {
            self.focused = false;
            return None;
        }
        if let Some(PasteMsg(text)) = msg.downcast_ref::<PasteMsg>().cloned() {
            self.value.push_str(&text);
            return None;
        }

        if let Some(key) = msg.downcast_ref::<KeyMsg>() {
            match key.key_type {
                KeyType::Enter => {
                    if self.submitted {
                        return Some(quit());
                    }
                    self.submitted = true;
                }
                KeyType::Backspace => {
                    self.value.pop();
                }
                KeyType::Runes => {
                    for &c in &key.runes {
                        self.value.push(c);
                    }
                }
                KeyType::CtrlC | KeyType::Esc => return Some(quit()),
                _ => {}
            }
        }
        None
    }

    fn view(&self) -> String {
        if self.submitted {
            format!("Hello, {}!\n\nPress Enter to quit.", self.value)
        } else {
            let focus_marker = if self.focused { "" } else { " (unfocused)" };
            format!(
                "What's your name?{focus_marker}\n\n> {}\n\nPress Enter to submit, Esc to quit.",
                self.value
            )
        }
    }
}

fn main() -> Result<(), matcha::Error> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_writer(std::io::stderr)
        .init();

    Program::new(App::new()).with_report_focus().run()?;
    Ok(())
}
