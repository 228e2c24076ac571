use std::{
    fs::File,
    io::{self, Read, Stdin, Stdout, Write, stdin, stdout},
};

/// Output path given on the command line, `-` for standard output
#[derive(Debug, Clone)]
pub enum FileOrStdout {
    FilePath(String),
    Stdout,
}

impl ::core::fmt::Display for FileOrStdout {
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        match self {
            Self::Stdout => write!(f, "-"),
            Self::FilePath(value) => write!(f, "{value}"),
        }
    }
}

impl From<String> for FileOrStdout {
    fn from(value: String) -> Self {
        if &value == "-" {
            Self::Stdout
        } else {
            Self::FilePath(value)
        }
    }
}

impl FileOrStdout {
    pub fn create(&self) -> io::Result<FileOrStdoutWriter> {
        match self {
            Self::FilePath(fp) => Ok(FileOrStdoutWriter::File(File::create(fp)?)),
            Self::Stdout => Ok(FileOrStdoutWriter::Stdout(stdout())),
        }
    }
}

pub enum FileOrStdoutWriter {
    File(File),
    Stdout(Stdout),
}

impl io::Write for FileOrStdoutWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::File(f) => f.write(buf),
            Self::Stdout(fd) => {
                let mut lock = fd.lock();
                lock.write(buf)
            }
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::File(f) => f.flush(),
            Self::Stdout(fd) => {
                let mut lock = fd.lock();
                lock.flush()
            }
        }
    }
}

/// Input path given on the command line, `-` for standard input
#[derive(Debug, Clone)]
pub enum FileOrStdin {
    FilePath(String),
    Stdin,
}

impl ::core::fmt::Display for FileOrStdin {
    fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
        match self {
            Self::Stdin => write!(f, "-"),
            Self::FilePath(value) => write!(f, "{value}"),
        }
    }
}

impl From<String> for FileOrStdin {
    fn from(value: String) -> Self {
        if &value == "-" {
            Self::Stdin
        } else {
            Self::FilePath(value)
        }
    }
}

impl FileOrStdin {
    pub fn open(&self) -> io::Result<FileOrStdinReader> {
        match self {
            Self::FilePath(fp) => Ok(FileOrStdinReader::File(File::open(fp)?)),
            Self::Stdin => Ok(FileOrStdinReader::Stdin(stdin())),
        }
    }

    /// Check if moves are typed by a person rather than read from a file
    pub const fn is_interactive(&self) -> bool {
        matches!(self, Self::Stdin)
    }
}

pub enum FileOrStdinReader {
    File(File),
    Stdin(Stdin),
}

impl io::Read for FileOrStdinReader {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            Self::File(f) => f.read(buf),
            Self::Stdin(fd) => {
                let mut lock = fd.lock();
                lock.read(buf)
            }
        }
    }
}
