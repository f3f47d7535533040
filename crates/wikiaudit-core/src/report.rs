//! Flat text report of publicly creatable wikis.
//!
//! ```text
//! Date: 18-10-2026
//! GitHub account octocat [3] repositories.
//!  	 Public wiki found:
//! 		 https://github.com/octocat/hello
//! ```
//!
//! Every line is flushed as it is written so an aborted scan still leaves
//! the accounts it finished.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use chrono::NaiveDate;

pub struct ReportWriter<W: Write> {
    out: W,
}

impl ReportWriter<BufWriter<File>> {
    /// Create (or truncate) the report file at `path`.
    pub fn create(path: &Path) -> io::Result<Self> {
        let file = File::create(path)?;
        Ok(Self::new(BufWriter::new(file)))
    }
}

impl<W: Write> ReportWriter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn write_header(&mut self, date: NaiveDate) -> io::Result<()> {
        writeln!(self.out, "Date: {}", date.format("%d-%m-%Y"))?;
        self.out.flush()
    }

    pub fn write_account(&mut self, handle: &str, repositories: usize) -> io::Result<()> {
        write!(
            self.out,
            "GitHub account {} [{}] repositories.\n \t Public wiki found: \n",
            handle, repositories
        )?;
        self.out.flush()
    }

    pub fn write_public_wiki(&mut self, repo_url: &str) -> io::Result<()> {
        writeln!(self.out, "\t\t {}", repo_url)?;
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
