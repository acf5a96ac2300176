//! Interactive menu loop.
//!
//! The shell is generic over its input and output so a whole session can be
//! scripted from a byte buffer in tests.

use crate::csv_io::export_csv;
use crate::dates;
use crate::error::{InventoryError, Result};
use crate::formatters::format_product;
use crate::lookup::lookup;
use crate::models::{title_case, NewProduct, Product};
use crate::upsert::{upsert, OverwritePrompt, UpsertMode, UpsertOutcome};
use chrono::NaiveDateTime;
use rusqlite::Connection;
use std::io::{BufRead, Write};
use std::path::PathBuf;

const MENU: &str = "\nV) View a record using its ID number\n\
                    A) Add a product to the inventory database\n\
                    B) Back up the database to a CSV file\n\
                    Q) Quit\n\n\
                    What would you like to do? ";
const UNKNOWN_OPTION: &str =
    "\nPlease enter V, A, B or Q. All actions are described in the following menu:";
const INVALID_ENTRY: &str = "\nInvalid entry. Ensure the name isn't empty, the quantity is a number, \
                             and the price is in cents (type $1.23 as 123)";
const FAREWELL: &str = "\nThank you for using the database program! Have a nice day!";

/// Line-oriented prompt over any reader/writer pair
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Prints `prompt` and reads one line. `None` means end of input.
    pub fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    pub fn say(&mut self, msg: &str) -> Result<()> {
        writeln!(self.output, "{msg}")?;
        Ok(())
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> OverwritePrompt for Console<R, W> {
    /// Anything but an explicit "n" counts as yes; end of input counts as no.
    fn confirm_overwrite(&mut self, existing: &Product) -> Result<bool> {
        let answer = self.ask(&format!(
            "\nRecord already exists. Overwrite existing record? (ID: {}) (Y/N) ",
            existing.id
        ))?;
        Ok(matches!(answer, Some(a) if a.trim().to_lowercase() != "n"))
    }
}

/// The interactive inventory menu
pub struct Shell<R, W> {
    conn: Connection,
    console: Console<R, W>,
    backup_path: PathBuf,
    clock: fn() -> NaiveDateTime,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(conn: Connection, input: R, output: W, backup_path: impl Into<PathBuf>) -> Self {
        Self {
            conn,
            console: Console::new(input, output),
            backup_path: backup_path.into(),
            clock: dates::now,
        }
    }

    /// Replaces the clock used to timestamp interactively added products
    pub fn with_clock(mut self, clock: fn() -> NaiveDateTime) -> Self {
        self.clock = clock;
        self
    }

    pub fn into_parts(self) -> (Connection, W) {
        (self.conn, self.console.into_output())
    }

    /// Runs the menu until the user quits or input ends.
    pub fn run(&mut self) -> Result<()> {
        loop {
            let Some(choice) = self.console.ask(MENU)? else {
                log::debug!("Input closed, leaving menu");
                return Ok(());
            };
            match choice.trim().to_lowercase().as_str() {
                "v" => self.view()?,
                "a" => self.add()?,
                "b" => self.backup()?,
                "q" => {
                    self.console.say(FAREWELL)?;
                    return Ok(());
                }
                _ => self.console.say(UNKNOWN_OPTION)?,
            }
        }
    }

    fn view(&mut self) -> Result<()> {
        loop {
            let Some(text) = self.console.ask("\nProduct ID number: ")? else {
                return Ok(());
            };
            match lookup(&self.conn, &text) {
                Ok((position, product)) => {
                    self.console
                        .say(&format!("\n{}", format_product(position, &product)))?;
                    return Ok(());
                }
                Err(InventoryError::OutOfRange { position: 0, .. }) => {
                    self.console.say("\nID numbers start at 1.")?
                }
                Err(InventoryError::OutOfRange { .. }) => self.console.say(
                    "\nID number too high. Please use a number no higher than the number of database records.",
                )?,
                Err(InventoryError::Format(_)) => self.console.say("\nPlease type a whole number.")?,
                Err(e) => return Err(e),
            }
        }
    }

    /// Collects a product from the user. `None` means the entry was invalid.
    fn read_new_product(&mut self) -> Result<Option<NewProduct>> {
        let Some(name) = self.console.ask("\nWhat is the name of the product?\t\t")? else {
            return Ok(None);
        };
        let name = title_case(name.trim());
        if name.is_empty() {
            return Ok(None);
        }

        let Some(quantity) = self.console.ask("How much of the product is on hand?\t\t")? else {
            return Ok(None);
        };
        let quantity = match quantity.trim().parse::<f64>() {
            Ok(q) if q.is_finite() => q.abs(),
            _ => return Ok(None),
        };

        let Some(price) = self
            .console
            .ask("How much does a single unit cost, in cents?\t")?
        else {
            return Ok(None);
        };
        let price_cents = match price.trim().parse::<i64>().ok().and_then(i64::checked_abs) {
            Some(p) => p as u64,
            None => return Ok(None),
        };

        Ok(Some(NewProduct::new(name, quantity, price_cents, (self.clock)())))
    }

    fn add(&mut self) -> Result<()> {
        let Some(candidate) = self.read_new_product()? else {
            return self.console.say(INVALID_ENTRY);
        };

        let outcome = upsert(
            &self.conn,
            &candidate,
            UpsertMode::Confirm(&mut self.console),
        );
        match outcome {
            Ok(UpsertOutcome::Inserted { position, .. }) => self
                .console
                .say(&format!("\nProduct stored with ID number {position}")),
            Ok(UpsertOutcome::Overwritten { .. }) => self.console.say("Record overwritten."),
            Ok(UpsertOutcome::Declined { .. } | UpsertOutcome::Discarded { .. }) => Ok(()),
            Err(InventoryError::Io(e)) => Err(InventoryError::Io(e)),
            Err(e) => {
                log::error!("Failed to store '{}': {}", candidate.name, e);
                self.console.say(&format!("\nCould not store product: {e}"))
            }
        }
    }

    fn backup(&mut self) -> Result<()> {
        match export_csv(&self.conn, &self.backup_path) {
            Ok(_) => self.console.say(&format!(
                "\nBackup successful. File name: {}",
                self.backup_path.display()
            )),
            Err(e) => {
                log::error!("Backup to {} failed: {}", self.backup_path.display(), e);
                self.console.say(&format!("\nBackup failed: {e}"))
            }
        }
    }
}
