// Interactive player registration.
//
// Generic over the reader and writer so the prompts can be driven from
// stdin/stdout at runtime and from byte buffers in tests.

use std::io::{self, BufRead, Write};

use crate::game::Player;

pub const MIN_AGE: i64 = 1;
pub const MAX_AGE: i64 = 119;

pub struct Registry<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Registry<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Read one trimmed line. End of input is an error so a closed stdin
    /// cannot re-prompt forever.
    fn read_line(&mut self) -> io::Result<String> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed during registration",
            ));
        }
        Ok(line.trim().to_string())
    }

    fn prompt(&mut self, text: &str) -> io::Result<String> {
        writeln!(self.output, "{text}")?;
        self.output.flush()?;
        self.read_line()
    }

    /// Prompt until a non-negative whole number is entered.
    pub fn read_count(&mut self, what: &str) -> io::Result<i64> {
        loop {
            let answer = self.prompt(&format!("Enter the number of {what}:"))?;
            match answer.parse::<i64>() {
                Ok(n) if n >= 0 => return Ok(n),
                _ => writeln!(self.output, "Please enter a whole number of {what} (0 or more).")?,
            }
        }
    }

    fn read_name(&mut self, number: usize) -> io::Result<String> {
        loop {
            let name = self.prompt(&format!("Enter the name of Player {number}:"))?;
            if !name.is_empty() {
                return Ok(name);
            }
            writeln!(self.output, "Name cannot be empty. Please enter a valid name.")?;
        }
    }

    fn read_age(&mut self, number: usize) -> io::Result<i64> {
        loop {
            let answer = self.prompt(&format!("Enter the Age of Player {number}:"))?;
            match answer.parse::<i64>() {
                Ok(age) if (MIN_AGE..=MAX_AGE).contains(&age) => return Ok(age),
                _ => writeln!(
                    self.output,
                    "Error Invalid age: please enter valid age between {MIN_AGE} - {MAX_AGE}"
                )?,
            }
        }
    }

    /// Collect `count` players, re-prompting on every invalid answer.
    pub fn register_players(&mut self, count: usize) -> io::Result<Vec<Player>> {
        let mut players = Vec::new();
        for i in 1..=count {
            let name = self.read_name(i)?;
            let age = self.read_age(i)?;
            players.push(Player::new(name, age));
        }
        Ok(players)
    }
}
