use crate::session::{Session, SessionReport};
use clap::Args;
use std::{
    fs::File,
    io::{BufReader, BufWriter, Write, stdin, stdout},
    path::PathBuf,
    str::FromStr,
};

/// Where sessions are read from and where reports are written to
#[derive(Args)]
pub struct IOArgs {
    /// The sessions JSON file ("-" implies stdin)
    #[arg(default_value = "-", value_parser = clap::value_parser!(Stream))]
    sessions: Stream,

    /// The report file ("-" implies stdout)
    #[arg(short, long, default_value = "-", value_parser = clap::value_parser!(Stream))]
    output: Stream,
}

impl IOArgs {
    /// Parse the list of customer-sessions
    pub fn read_sessions(&self) -> anyhow::Result<Vec<Session>> {
        let sessions: Vec<Session> = match &self.sessions {
            Stream::File(path) => serde_json::from_reader(BufReader::new(File::open(path)?))?,
            Stream::Std => serde_json::from_reader(stdin().lock())?,
        };
        Ok(sessions)
    }

    /// Write the reports as pretty-printed JSON, followed by a newline
    pub fn write_reports(&self, reports: &[SessionReport]) -> anyhow::Result<()> {
        match &self.output {
            Stream::File(path) => emit(BufWriter::new(File::create(path)?), reports),
            Stream::Std => emit(stdout().lock(), reports),
        }
    }
}

fn emit(mut writer: impl Write, reports: &[SessionReport]) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut writer, reports)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

#[derive(Clone, Debug, PartialEq)]
enum Stream {
    File(PathBuf),
    Std,
}

impl FromStr for Stream {
    type Err = <PathBuf as FromStr>::Err;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "-" => Ok(Self::Std),
            path => Ok(Self::File(path.parse()?)),
        }
    }
}
