//! Line-oriented terminal front end.
//!
//! Lines starting with `:` are commands; anything else answers the pending
//! question (or, in learning mode, looks up an example).

use crate::commands::{
    self, AnswerFeedback, CommandError, ExampleView, ProgressSummary, Question, QuestionKind,
    TableSection,
};
use crate::state::AppState;
use crossterm::style::{StyledContent, Stylize};
use kana_core::{Answer, Category, MasteryTier, Mode, QuizType, ScriptMode};
use std::collections::BTreeSet;
use std::io::{BufRead, Write};

const HELP: &str = "\
commands:
  :learn :quiz :listen      switch mode
  :script <m>               hiragana, katakana or mixed
  :cat <list>               categories, e.g. basic,voiced
  :toggle <cat>             add or remove one category
  :type <t>                 multiple-choice or input
  :rate <r>                 speech rate, 0.7 to 1.3
  :example <id>             example word for an item
  :say <id>                 speak an item
  :replay                   hear the current question again
  :table                    show the kana table
  :stats :legend            progress overview, tier legend
  :next                     skip to another question (enter after a
                            listening answer also moves on)
  :reset                    forget all progress
  :help :quit
anything else answers the current question: an option number for
multiple choice, romaji for typed questions.";

/// One parsed input line.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Switch(Mode),
    Script(ScriptMode),
    Categories(BTreeSet<Category>),
    Toggle(Category),
    QuizType(QuizType),
    Rate(f64),
    Example(String),
    Say(String),
    Replay,
    Table,
    Stats,
    Legend,
    Reset,
    Next,
    Help,
    Quit,
    Answer(String),
    Empty,
}

/// Parse a line of user input. Errors are usage messages.
pub fn parse_line(line: &str) -> Result<Input, String> {
    let line = line.trim();
    let Some(command) = line.strip_prefix(':') else {
        return Ok(if line.is_empty() {
            Input::Empty
        } else {
            Input::Answer(line.to_string())
        });
    };

    let (name, arg) = match command.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (command, ""),
    };

    let input = match name.to_lowercase().as_str() {
        "learn" => Input::Switch(Mode::Learning),
        "quiz" => Input::Switch(Mode::Quiz),
        "listen" => Input::Switch(Mode::Listening),
        "script" => ScriptMode::from_str(arg)
            .map(Input::Script)
            .ok_or("usage: :script hiragana|katakana|mixed")?,
        "cat" => Input::Categories(parse_categories(arg)?),
        "toggle" => Category::from_str(arg)
            .map(Input::Toggle)
            .ok_or_else(|| unknown_category(arg))?,
        "type" => QuizType::from_str(arg)
            .map(Input::QuizType)
            .ok_or("usage: :type multiple-choice|input")?,
        "rate" => arg
            .parse()
            .map(Input::Rate)
            .map_err(|_| "usage: :rate <number>, e.g. :rate 0.9".to_string())?,
        "example" | "ex" => Input::Example(required(arg, ":example <id>")?),
        "say" => Input::Say(required(arg, ":say <id>")?),
        "replay" | "r" => Input::Replay,
        "table" => Input::Table,
        "stats" => Input::Stats,
        "legend" => Input::Legend,
        "reset" => Input::Reset,
        "next" | "n" => Input::Next,
        "help" | "h" | "?" => Input::Help,
        "quit" | "q" | "exit" => Input::Quit,
        other => return Err(format!("unknown command :{other}, try :help")),
    };
    Ok(input)
}

fn parse_categories(arg: &str) -> Result<BTreeSet<Category>, String> {
    arg.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| Category::from_str(s).ok_or_else(|| unknown_category(s)))
        .collect()
}

fn unknown_category(s: &str) -> String {
    format!("unknown category '{s}' (basic, voiced, semi-voiced, contracted)")
}

fn required(arg: &str, usage: &str) -> Result<String, String> {
    if arg.is_empty() {
        Err(format!("usage: {usage}"))
    } else {
        Ok(arg.to_string())
    }
}

/// Run the interactive loop until `:quit` or end of input.
pub fn run_repl<R: BufRead, W: Write>(state: &mut AppState, input: R, out: W) -> anyhow::Result<()> {
    let mut repl = Repl::new(state, out);
    repl.start()?;

    for line in input.lines() {
        match parse_line(&line?) {
            Ok(Input::Quit) => break,
            Ok(input) => repl.handle(input)?,
            Err(usage) => writeln!(repl.out, "{}", usage.yellow())?,
        }
        repl.prompt()?;
    }

    writeln!(repl.out, "さようなら")?;
    repl.out.flush()?;
    Ok(())
}

struct Repl<'a, W: Write> {
    state: &'a mut AppState,
    out: W,
    pending: Option<Question>,
    /// Last listening question, kept for replay until the next draw.
    answered: Option<Question>,
}

impl<'a, W: Write> Repl<'a, W> {
    fn new(state: &'a mut AppState, out: W) -> Self {
        Self {
            state,
            out,
            pending: None,
            answered: None,
        }
    }

    fn start(&mut self) -> anyhow::Result<()> {
        writeln!(self.out, "{}", "kana trainer".bold())?;
        writeln!(self.out, "type :help for commands")?;
        if !self.state.speech_available() {
            writeln!(self.out, "{}", "speech unavailable, listening mode will be silent".dark_grey())?;
        }
        self.enter(self.state.prefs.last_mode)?;
        self.prompt()
    }

    fn prompt(&mut self) -> anyhow::Result<()> {
        write!(self.out, "> ")?;
        self.out.flush()?;
        Ok(())
    }

    fn handle(&mut self, input: Input) -> anyhow::Result<()> {
        match input {
            Input::Switch(mode) => self.enter(mode)?,
            Input::Script(script) => {
                commands::set_script_mode(self.state, script);
                writeln!(self.out, "script: {}", script.as_str())?;
                self.refresh()?;
            }
            Input::Categories(categories) => {
                match commands::set_categories(self.state, categories) {
                    Ok(()) => self.after_pool_change()?,
                    Err(e) => self.error(&e)?,
                }
            }
            Input::Toggle(category) => match commands::toggle_category(self.state, category) {
                Ok(_) => self.after_pool_change()?,
                Err(e) => self.error(&e)?,
            },
            Input::QuizType(quiz_type) => {
                commands::set_quiz_type(self.state, quiz_type);
                writeln!(self.out, "quiz type: {}", quiz_type.as_str())?;
                if self.state.prefs.last_mode == Mode::Quiz {
                    self.ask()?;
                }
            }
            Input::Rate(rate) => {
                let stored = commands::set_speech_rate(self.state, rate);
                writeln!(self.out, "speech rate: {stored:.2}")?;
            }
            Input::Example(id) => match commands::show_example(self.state, &id) {
                Ok(view) => self.render_example(&view)?,
                Err(e) => self.error(&e)?,
            },
            Input::Say(id) => match commands::speak_item(self.state, &id) {
                Ok(()) => self.speech_hint()?,
                Err(e) => self.error(&e)?,
            },
            Input::Replay => match self.pending.as_ref().or(self.answered.as_ref()).cloned() {
                Some(question) => {
                    commands::replay(self.state, &question)?;
                    self.speech_hint()?;
                }
                None => writeln!(self.out, "nothing to replay")?,
            },
            Input::Table => self.render_table()?,
            Input::Stats => {
                let summary = commands::progress_summary(self.state);
                self.render_summary(&summary)?;
            }
            Input::Legend => self.render_legend()?,
            Input::Reset => {
                commands::reset_progress(self.state);
                writeln!(self.out, "progress reset")?;
            }
            Input::Next => match self.state.prefs.last_mode {
                Mode::Learning => writeln!(self.out, "no questions in learning mode, try :quiz")?,
                _ => self.ask()?,
            },
            Input::Help => writeln!(self.out, "{HELP}")?,
            Input::Answer(text) => self.answer(&text)?,
            Input::Empty => {
                if self.state.prefs.last_mode != Mode::Learning && self.pending.is_none() {
                    self.ask()?;
                }
            }
            Input::Quit => {}
        }
        Ok(())
    }

    fn enter(&mut self, mode: Mode) -> anyhow::Result<()> {
        commands::set_mode(self.state, mode);
        self.pending = None;
        self.answered = None;
        writeln!(self.out, "{}", format!("[{}]", mode.as_str()).bold())?;
        match mode {
            Mode::Learning => {
                self.render_table()?;
                writeln!(self.out, "type an id (e.g. ka) for an example word")?;
                Ok(())
            }
            Mode::Quiz | Mode::Listening => self.ask(),
        }
    }

    /// Redraw whatever the current mode shows.
    fn refresh(&mut self) -> anyhow::Result<()> {
        match self.state.prefs.last_mode {
            Mode::Learning => self.render_table(),
            Mode::Quiz | Mode::Listening => self.ask(),
        }
    }

    fn after_pool_change(&mut self) -> anyhow::Result<()> {
        let names: Vec<&str> = self
            .state
            .prefs
            .selected_categories
            .iter()
            .map(|c| c.as_str())
            .collect();
        writeln!(self.out, "categories: {}", names.join(", "))?;
        self.refresh()
    }

    fn ask(&mut self) -> anyhow::Result<()> {
        let drawn = match self.state.prefs.last_mode {
            Mode::Listening => commands::next_listening_question(self.state),
            _ => commands::next_question(self.state),
        };
        match drawn {
            Ok(question) => {
                self.render_question(&question)?;
                self.pending = Some(question);
                self.answered = None;
            }
            Err(e) => {
                self.pending = None;
                self.error(&e)?;
            }
        }
        Ok(())
    }

    fn answer(&mut self, text: &str) -> anyhow::Result<()> {
        if self.state.prefs.last_mode == Mode::Learning {
            return self.handle(Input::Example(text.to_string()));
        }
        let Some(question) = self.pending.clone() else {
            writeln!(self.out, "no question pending, press enter or type :next")?;
            return Ok(());
        };

        let answer = match question.kind {
            QuestionKind::Typed => Answer::Typed(text.to_string()),
            QuestionKind::MultipleChoice | QuestionKind::Listening => {
                match text.parse().ok().and_then(|n| question.option_id(n)) {
                    Some(id) => Answer::Choice(id.to_string()),
                    None => {
                        let msg = format!("pick an option from 1 to {}", question.options.len());
                        writeln!(self.out, "{}", msg.yellow())?;
                        return Ok(());
                    }
                }
            }
        };

        match commands::submit_answer(self.state, &question, &answer) {
            Ok(feedback) => self.render_feedback(&feedback)?,
            Err(e) => self.error(&e)?,
        }

        // Listening feedback is still playing; the next draw waits for enter or :next.
        if question.kind == QuestionKind::Listening {
            self.pending = None;
            self.answered = Some(question);
            writeln!(self.out, "press enter for the next question")?;
            return Ok(());
        }
        self.ask()
    }

    fn error(&mut self, e: &CommandError) -> anyhow::Result<()> {
        writeln!(self.out, "{}", e.message.as_str().red())?;
        Ok(())
    }

    fn speech_hint(&mut self) -> anyhow::Result<()> {
        if !self.state.speech_available() {
            writeln!(self.out, "{}", "(speech unavailable)".dark_grey())?;
        }
        Ok(())
    }

    fn render_question(&mut self, question: &Question) -> anyhow::Result<()> {
        match question.kind {
            QuestionKind::MultipleChoice => {
                writeln!(self.out, "which kana is {}?", question.prompt.as_str().bold())?;
            }
            QuestionKind::Typed => {
                writeln!(self.out, "type the romaji for {}", question.prompt.as_str().bold())?;
            }
            QuestionKind::Listening => {
                if self.state.speech_available() {
                    writeln!(self.out, "listen and pick the kana (:replay to hear it again)")?;
                } else {
                    writeln!(self.out, "pick the kana")?;
                }
            }
        }
        for (i, option) in question.options.iter().enumerate() {
            writeln!(self.out, "  {}) {}", i + 1, option.label)?;
        }
        Ok(())
    }

    fn render_feedback(&mut self, feedback: &AnswerFeedback) -> anyhow::Result<()> {
        let verdict = if feedback.is_correct {
            "correct".green()
        } else {
            "wrong".red()
        };
        let mastery = format!(
            "{:.0}% {}",
            feedback.mastery * 100.0,
            feedback.tier.label()
        );
        writeln!(
            self.out,
            "{verdict}: {} is {}  [{}]",
            feedback.correct_glyph,
            feedback.correct_romaji,
            tier_style(feedback.tier, mastery)
        )?;
        Ok(())
    }

    fn render_table(&mut self) -> anyhow::Result<()> {
        let sections: Vec<TableSection> = commands::kana_table(self.state);
        for section in &sections {
            writeln!(self.out, "{}", section.category.as_str().bold())?;
            for row in &section.rows {
                let mut line = String::new();
                for cell in row {
                    match cell {
                        Some(cell) => {
                            let text = format!("{} {:<4}", cell.glyph, cell.romaji);
                            line.push_str(&format!("{} ", tier_style(cell.tier, text)));
                        }
                        None => line.push_str(&" ".repeat(8)),
                    }
                }
                writeln!(self.out, "  {}", line.trim_end())?;
            }
        }
        Ok(())
    }

    fn render_example(&mut self, view: &ExampleView) -> anyhow::Result<()> {
        writeln!(
            self.out,
            "{} {}: {} ({}) {}",
            view.glyph,
            view.romaji,
            view.word.as_str().bold(),
            view.reading,
            view.meaning
        )?;
        Ok(())
    }

    fn render_summary(&mut self, summary: &ProgressSummary) -> anyhow::Result<()> {
        writeln!(
            self.out,
            "{}/{} seen, {} correct, {} wrong, average mastery {:.0}%",
            summary.seen,
            summary.pool_size,
            summary.total_correct,
            summary.total_wrong,
            summary.average_mastery * 100.0
        )?;
        for tier in &summary.tiers {
            let label = format!("{:<11}", tier.label);
            writeln!(self.out, "  {} {}", tier_style(tier.tier, label), tier.count)?;
        }
        let weakest: Vec<String> = summary
            .weakest
            .iter()
            .map(|w| format!("{} ({:.0}%)", w.romaji, w.mastery * 100.0))
            .collect();
        writeln!(self.out, "weakest: {}", weakest.join(", "))?;
        Ok(())
    }

    fn render_legend(&mut self) -> anyhow::Result<()> {
        for tier in MasteryTier::legend() {
            let label = format!("{:<11}", tier.label());
            writeln!(self.out, "  {} {}", tier_style(tier, label), tier_range(tier))?;
        }
        Ok(())
    }
}

fn tier_style(tier: MasteryTier, text: String) -> StyledContent<String> {
    match tier {
        MasteryTier::NeedsWork => text.red(),
        MasteryTier::Basic => text.dark_yellow(),
        MasteryTier::Improving => text.yellow(),
        MasteryTier::Proficient => text.cyan(),
        MasteryTier::Mastered => text.green(),
    }
}

fn tier_range(tier: MasteryTier) -> &'static str {
    match tier {
        MasteryTier::NeedsWork => "up to 25%",
        MasteryTier::Basic => "above 25%",
        MasteryTier::Improving => "above 45%",
        MasteryTier::Proficient => "above 65%",
        MasteryTier::Mastered => "above 85%",
    }
}
