//! Interactive session: one query per line, results re-rendered in place.

use std::future::Future;
use std::io::Write;

use haggle_core::{HaggleError, NegotiationStrength, StrengthSelector};
use haggle_present::ResultsView;
use haggle_sdk::{HttpTransport, RequestController, RequestState};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use tracing::debug;

use crate::render::Renderer;

const HELP: &str = "\
Type what you want (e.g. \"iPhone under $900 NYC pickup\") and press enter.
  :strength <quick|standard|max-savings>  choose how hard to negotiate
  :log                                    show/hide the negotiation transcript
  :help                                   this message
  :quit                                   leave";

/// A parsed input line.
#[derive(Debug, PartialEq)]
pub enum Command {
    Blank,
    Query(String),
    Strength(Result<NegotiationStrength, HaggleError>),
    ToggleLog,
    Help,
    Quit,
    Unknown(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Command::Blank;
        }

        let Some(rest) = line.strip_prefix(':') else {
            return Command::Query(line.to_string());
        };

        let (name, arg) = rest.split_once(char::is_whitespace).unwrap_or((rest, ""));
        match name {
            "strength" | "s" => Command::Strength(arg.parse()),
            "log" | "l" => Command::ToggleLog,
            "help" | "h" | "?" => Command::Help,
            "quit" | "q" | "exit" => Command::Quit,
            other => Command::Unknown(other.to_string()),
        }
    }
}

/// One line read from the terminal, or why reading stopped.
#[derive(Debug, PartialEq)]
pub enum Input {
    Line(String),
    Interrupted,
    Closed,
}

/// Read the next line, giving up when `interrupt` fires first.
pub async fn next_input<R, F, T>(lines: &mut Lines<R>, interrupt: F) -> std::io::Result<Input>
where
    R: AsyncBufRead + Unpin,
    F: Future<Output = T>,
{
    tokio::select! {
        line = lines.next_line() => Ok(line?.map_or(Input::Closed, Input::Line)),
        _ = interrupt => Ok(Input::Interrupted),
    }
}

/// What the shell is currently showing, kept in step with the controller.
pub struct Session {
    renderer: Renderer,
    selector: StrengthSelector,
    view: Option<ResultsView>,
}

impl Session {
    pub fn new(renderer: Renderer, selector: StrengthSelector) -> Self {
        Self {
            renderer,
            selector,
            view: None,
        }
    }

    pub fn selected(&self) -> NegotiationStrength {
        self.selector.selected()
    }

    pub fn select(&mut self, strength: NegotiationStrength) -> String {
        self.selector.select(strength);
        format!("Negotiation strength: {} ({} rounds)", strength, strength.max_rounds())
    }

    pub fn toggle_log(&mut self) -> String {
        match self.view.as_mut() {
            Some(current) if current.show_transcript_toggle() => {
                current.toggle_transcript();
                self.renderer.results(current)
            }
            Some(_) => "This result has no negotiation transcript.".to_string(),
            None => "Nothing to show yet.".to_string(),
        }
    }

    /// A query was accepted for submission; the displayed result goes away.
    pub fn begin(&mut self) {
        self.view = None;
    }

    /// Show how a submission settled.
    pub fn settle(&mut self, state: Result<RequestState, HaggleError>) -> Option<String> {
        match state {
            Ok(RequestState::Success(result)) => {
                let current = ResultsView::from_result(&result);
                let text = self.renderer.results(&current);
                self.view = Some(current);
                Some(text)
            }
            Ok(RequestState::Error(message)) => Some(self.renderer.failure(&message)),
            Ok(other) => {
                debug!(?other, "Submission settled without a result");
                None
            }
            Err(err) => Some(err.to_string()),
        }
    }
}

/// Run the interactive loop until `:quit`, Ctrl-C at the prompt, or end of input.
pub async fn run(
    controller: RequestController<HttpTransport>,
    renderer: Renderer,
    selector: StrengthSelector,
) -> anyhow::Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut session = Session::new(renderer, selector);

    println!("{}", HELP);
    prompt(session.selected())?;

    loop {
        let line = match next_input(&mut lines, tokio::signal::ctrl_c()).await? {
            Input::Line(line) => line,
            Input::Interrupted => {
                println!();
                break;
            }
            Input::Closed => break,
        };

        match Command::parse(&line) {
            Command::Blank => {}
            Command::Quit => break,
            Command::Help => println!("{}", HELP),
            Command::Unknown(name) => println!("Unknown command ':{}'. Try :help", name),
            Command::Strength(Ok(strength)) => println!("{}", session.select(strength)),
            Command::Strength(Err(err)) => println!("{}", err),
            Command::ToggleLog => println!("{}", session.toggle_log()),
            Command::Query(query) => {
                println!("Negotiating with stores and services…");
                session.begin();

                let state = tokio::select! {
                    state = controller.submit(&query, session.selected()) => Some(state),
                    _ = tokio::signal::ctrl_c() => None,
                };
                match state {
                    Some(state) => {
                        if let Some(text) = session.settle(state) {
                            println!("{}", text);
                        }
                    }
                    None => println!("Cancelled."),
                }
            }
        }

        prompt(session.selected())?;
    }

    controller.close().await;
    Ok(())
}

fn prompt(strength: NegotiationStrength) -> std::io::Result<()> {
    print!("\n[{}] > ", strength);
    std::io::stdout().flush()
}
