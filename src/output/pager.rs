use anyhow::Result;
use minus::Pager;
use std::fmt::Write as FmtWrite;
use std::io::Write as IoWrite;

/// Lines of output above which a terminal listing is paged
const PAGE_THRESHOLD: usize = 40;

pub enum OutputDestination {
    Pager(Pager),
    Direct(Vec<u8>),
}

impl OutputDestination {
    /// Create a new output destination
    /// - Uses pager if: stdout is TTY AND no_pager=false
    /// - Uses direct output if: stdout is piped OR no_pager=true
    pub fn new(no_pager: bool) -> Self {
        let is_tty = atty::is(atty::Stream::Stdout);

        if !no_pager && is_tty {
            OutputDestination::Pager(Pager::new())
        } else {
            OutputDestination::Direct(Vec::new())
        }
    }

    /// Pick a destination for `text`: short output never needs a pager
    pub fn for_text(text: &str, no_pager: bool) -> Self {
        Self::new(no_pager || text.lines().count() <= PAGE_THRESHOLD)
    }

    pub fn write_str(&mut self, s: &str) -> Result<()> {
        match self {
            OutputDestination::Pager(pager) => {
                write!(pager, "{}", s).map_err(|e| anyhow::anyhow!("Pager write error: {}", e))?;
                if !s.ends_with('\n') {
                    writeln!(pager).map_err(|e| anyhow::anyhow!("Pager write error: {}", e))?;
                }
                Ok(())
            }
            OutputDestination::Direct(buffer) => {
                buffer.write_all(s.as_bytes())?;
                if !s.ends_with('\n') {
                    buffer.write_all(b"\n")?;
                }
                Ok(())
            }
        }
    }

    /// Flush and display the output
    pub fn finish(self) -> Result<()> {
        match self {
            OutputDestination::Pager(pager) => {
                // Blocks until the user quits the pager
                minus::page_all(pager).map_err(|e| anyhow::anyhow!("Pager error: {}", e))?;
                Ok(())
            }
            OutputDestination::Direct(buffer) => {
                std::io::stdout().write_all(&buffer)?;
                Ok(())
            }
        }
    }
}

/// Write `text` to stdout, through the pager when it is long and stdout is a terminal
pub fn emit(text: &str, no_pager: bool) -> Result<()> {
    let mut destination = OutputDestination::for_text(text, no_pager);
    destination.write_str(text)?;
    destination.finish()
}
