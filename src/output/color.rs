use crate::output::width::get_line_width;
use std::io::{self, Write};
use termcolor::{Buffer, Color, ColorSpec, WriteColor};

/// Buffered writer for human output; colours are dropped with `--no-color` or `NO_COLOR`.
pub struct ColorWriter {
    buffer: Buffer,
    no_color: bool,
}

impl ColorWriter {
    pub fn new(no_color: bool) -> Self {
        let colors_enabled = !no_color && std::env::var("NO_COLOR").is_err();

        Self {
            buffer: if colors_enabled { Buffer::ansi() } else { Buffer::no_color() },
            no_color: !colors_enabled,
        }
    }

    /// Get the buffer contents as a string
    pub fn into_string(self) -> Result<String, std::io::Error> {
        String::from_utf8(self.buffer.into_inner())
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }

    fn styled(&mut self, text: &str, spec: &ColorSpec) -> io::Result<()> {
        if !self.no_color {
            self.buffer.set_color(spec)?;
        }
        write!(self.buffer, "{}", text)?;
        if !self.no_color {
            self.buffer.reset()?;
        }
        Ok(())
    }

    /// Print text in a specific color
    pub fn print_colored(&mut self, text: &str, color: Color) -> io::Result<()> {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(color));
        self.styled(text, &spec)
    }

    pub fn print_bold(&mut self, text: &str) -> io::Result<()> {
        let mut spec = ColorSpec::new();
        spec.set_bold(true);
        self.styled(text, &spec)
    }

    /// Print a header (bold + color) followed by a newline
    pub fn print_header(&mut self, text: &str) -> io::Result<()> {
        let mut spec = ColorSpec::new();
        spec.set_fg(Some(Color::Cyan)).set_bold(true);
        self.styled(text, &spec)?;
        writeln!(self.buffer)
    }

    /// Print a label: value pair
    pub fn print_field(&mut self, label: &str, value: &str) -> io::Result<()> {
        self.print_colored(label, Color::Blue)?;
        write!(self.buffer, ": ")?;
        writeln!(self.buffer, "{}", value)
    }

    pub fn print_success(&mut self, text: &str) -> io::Result<()> {
        self.print_colored("✓ ", Color::Green)?;
        writeln!(self.buffer, "{}", text)
    }

    pub fn print_error(&mut self, text: &str) -> io::Result<()> {
        self.print_colored("✗ ", Color::Red)?;
        writeln!(self.buffer, "{}", text)
    }

    /// Print separator line sized to the terminal
    pub fn print_separator(&mut self) -> io::Result<()> {
        self.print_colored(&"─".repeat(get_line_width()), Color::White)?;
        writeln!(self.buffer)
    }

    /// Print a `width`-cell progress bar filled to `percentage`
    pub fn print_bar(&mut self, percentage: f64, width: usize) -> io::Result<()> {
        let filled = ((percentage.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
        let color = if percentage >= 90.0 {
            Color::Red
        } else if percentage >= 75.0 {
            Color::Yellow
        } else {
            Color::Green
        };

        write!(self.buffer, "[")?;
        self.print_colored(&"█".repeat(filled), color)?;
        write!(self.buffer, "{}", "░".repeat(width - filled))?;
        write!(self.buffer, "]")
    }

    /// Write text without newline
    pub fn write(&mut self, text: &str) -> io::Result<()> {
        write!(self.buffer, "{}", text)
    }

    pub fn writeln(&mut self) -> io::Result<()> {
        writeln!(self.buffer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_color_output_is_plain() {
        let mut writer = ColorWriter::new(true);
        writer.print_field("Name", "report.pdf").unwrap();
        writer.print_success("done").unwrap();
        assert_eq!(writer.into_string().unwrap(), "Name: report.pdf\n✓ done\n");
    }

    #[test]
    fn test_bar_fills_proportionally() {
        let mut writer = ColorWriter::new(true);
        writer.print_bar(50.0, 10).unwrap();
        assert_eq!(writer.into_string().unwrap(), "[█████░░░░░]");

        let mut writer = ColorWriter::new(true);
        writer.print_bar(250.0, 4).unwrap();
        assert_eq!(writer.into_string().unwrap(), "[████]");
    }
}
