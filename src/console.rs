//! The interactive menu. Reads whitespace separated tokens from any [`BufRead`] and writes
//! prompts and listings to any [`Write`], so a session can be scripted.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use tracing::debug;

use crate::record::Date;
use crate::store::Store;

const MENU: &str = "Options Menu:
1. Enter person's data
2. Remove person's data
3. Show the list of birthdays
4. Save data to file
5. Load data from file
6. Quit the program";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Choice {
    Add,
    Remove,
    Show,
    Save,
    Load,
    Quit,
}

impl Choice {
    fn from_token(token: &str) -> Option<Self> {
        match token {
            "1" => Some(Self::Add),
            "2" => Some(Self::Remove),
            "3" => Some(Self::Show),
            "4" => Some(Self::Save),
            "5" => Some(Self::Load),
            "6" => Some(Self::Quit),
            _ => None,
        }
    }
}

/// A menu session over one input and one output stream.
pub struct Console<R, W> {
    input: R,
    output: W,
    pending: VecDeque<String>,
    path: PathBuf,
}

impl<R: BufRead, W: Write> Console<R, W> {
    /// A session that saves to and loads from `path`.
    pub fn new(input: R, output: W, path: impl Into<PathBuf>) -> Self {
        Self {
            input,
            output,
            pending: VecDeque::new(),
            path: path.into(),
        }
    }

    /// Shows the menu and carries out choices until the user quits or the input runs out.
    /// Only failures of the streams themselves are errors.
    pub fn run(&mut self, store: &mut Store) -> io::Result<()> {
        loop {
            writeln!(self.output, "{MENU}")?;
            self.prompt("Enter your choice: ")?;
            let Some(token) = self.next_token()? else {
                break;
            };

            debug!(choice = %token, "menu");
            match Choice::from_token(&token) {
                Some(Choice::Add) => self.add(store)?,
                Some(Choice::Remove) => self.remove(store)?,
                Some(Choice::Show) => {
                    writeln!(self.output, "Birthdays:")?;
                    store.print_all(&mut self.output)?;
                }
                Some(Choice::Save) => {
                    let written = store.persist(&self.path);
                    writeln!(
                        self.output,
                        "Saved {written} record(s) to {}.",
                        self.path.display()
                    )?;
                }
                Some(Choice::Load) => {
                    let report = store.restore(&self.path);
                    writeln!(
                        self.output,
                        "Loaded {} record(s) from {}.",
                        report.inserted,
                        self.path.display()
                    )?;
                }
                Some(Choice::Quit) => break,
                None => writeln!(self.output, "Invalid choice. Please try again.")?,
            }
        }

        writeln!(self.output, "Exiting the program.")?;
        self.output.flush()
    }

    fn add(&mut self, store: &mut Store) -> io::Result<()> {
        self.prompt("Enter name: ")?;
        let Some(name) = self.next_token()? else {
            return Ok(());
        };
        self.prompt("Enter birthday (MM DD YYYY): ")?;
        let Some(birthday) = self.next_date()? else {
            self.pending.clear();
            return writeln!(self.output, "Invalid birthday, expected MM DD YYYY.");
        };

        if !store.add_record(name.as_str(), birthday) {
            writeln!(self.output, "{name} is already in the book.")?;
        }
        Ok(())
    }

    fn remove(&mut self, store: &mut Store) -> io::Result<()> {
        self.prompt("Enter name to remove: ")?;
        let Some(name) = self.next_token()? else {
            return Ok(());
        };

        if store.delete_record(&name).is_none() {
            writeln!(self.output, "{name} is not in the book.")?;
        }
        Ok(())
    }

    fn prompt(&mut self, text: &str) -> io::Result<()> {
        write!(self.output, "{text}")?;
        self.output.flush()
    }

    /// Three integer tokens, or `None` if the input ran out or one of them isn't a number.
    fn next_date(&mut self) -> io::Result<Option<Date>> {
        let mut fields = [0; 3];
        for field in &mut fields {
            match self.next_token()?.map(|token| token.parse::<i32>()) {
                Some(Ok(value)) => *field = value,
                _ => return Ok(None),
            }
        }
        let [month, day, year] = fields;
        Ok(Some(Date::new(month, day, year)))
    }

    fn next_token(&mut self) -> io::Result<Option<String>> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(Some(token));
            }
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(None);
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_owned));
        }
    }
}
