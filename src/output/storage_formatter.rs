use crate::models::storage::StorageInfo;
use crate::output::color::ColorWriter;
use crate::output::size::format_bytes;
use std::io::Result;

const BAR_WIDTH: usize = 30;

pub fn format_storage(info: &StorageInfo, writer: &mut ColorWriter) -> Result<()> {
    writer.print_header("Storage")?;
    writer.print_separator()?;

    writer.print_bar(info.bar_percentage(), BAR_WIDTH)?;
    writer.write(&format!(" {:.1}%", info.percentage))?;
    writer.writeln()?;

    writer.write(&format!(
        "{} of {} used",
        format_bytes(info.used),
        format_bytes(info.quota)
    ))?;
    writer.writeln()?;

    if info.quota > info.used {
        writer.print_field("Available", &format_bytes(info.quota - info.used))?;
    } else {
        writer.print_error("Storage quota exceeded")?;
    }

    Ok(())
}
