//! Lets io::Write-generic writers (see Sexp::write_list) target a
//! fmt::Formatter.

use std::str::from_utf8;
use std::{fmt, io};


pub struct FmtIoBridge<'a, F: fmt::Write> {
    inner: &'a mut F,
}

impl<'a, F: fmt::Write> FmtIoBridge<'a, F> {
    pub fn new(inner: &'a mut F) -> Self {
        Self { inner }
    }
}


impl<'a, F: fmt::Write> io::Write for FmtIoBridge<'a, F> {
    fn write(&mut self, bytes: &[u8]) -> io::Result<usize> {
        let s = from_utf8(bytes).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))?;
        self.inner
            .write_str(s)
            .map_err(|err| io::Error::new(io::ErrorKind::Other, err))?;
        Ok(s.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
