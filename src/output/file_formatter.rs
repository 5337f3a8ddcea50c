use crate::dashboard::{Dashboard, Listing, View};
use crate::models::file::{File, FileKind};
use crate::models::folder::Folder;
use crate::output::color::ColorWriter;
use crate::output::size::format_bytes;
use crate::output::width::{name_width, truncate};
use std::io::Result;
use termcolor::Color;

/// Columns taken by the id, kind and size columns of a file row
const FILE_ROW_RESERVED: usize = 36;

pub fn format_listing(dashboard: &Dashboard, listing: &Listing, writer: &mut ColorWriter) -> Result<()> {
    let mut title = dashboard.view.title().to_string();
    if let Some(folder_id) = dashboard.current_folder {
        title.push_str(&format!(" › folder #{}", folder_id));
    }
    if let Some(search) = &dashboard.search {
        title.push_str(&format!(" (search: \"{}\")", search));
    }
    writer.print_header(&title)?;
    writer.print_separator()?;

    if listing.is_empty() {
        writer.print_colored("No files or folders yet", Color::White)?;
        writer.writeln()?;
        if dashboard.view != View::Trash {
            writer.write("Upload files to get started: opendrive files upload <PATH>")?;
            writer.writeln()?;
        }
        if dashboard.view.allows_new_folder() {
            writer.write("Create a folder: opendrive folders create <NAME>")?;
            writer.writeln()?;
        }
        return Ok(());
    }

    for folder in &listing.folders {
        format_folder_row(folder, writer)?;
    }

    if !listing.folders.is_empty() && !listing.files.is_empty() {
        writer.writeln()?;
    }

    for file in &listing.files {
        format_file_row(file, writer)?;
    }

    writer.writeln()?;
    writer.print_colored(
        &format!(
            "{} folder(s), {} file(s)",
            listing.folders.len(),
            listing.files.len()
        ),
        Color::White,
    )?;
    writer.writeln()?;

    Ok(())
}

pub fn format_folder_row(folder: &Folder, writer: &mut ColorWriter) -> Result<()> {
    writer.print_colored(&format!("{:>6}  ", folder.id), Color::White)?;
    writer.print_colored("▸ ", Color::Blue)?;
    writer.print_bold(&truncate(&folder.name, name_width(FILE_ROW_RESERVED)))?;
    writer.write("  ")?;
    writer.print_colored(
        &format!(
            "{} files · {} folders",
            folder.file_count, folder.subfolder_count
        ),
        Color::White,
    )?;
    writer.writeln()
}

pub fn format_file_row(file: &File, writer: &mut ColorWriter) -> Result<()> {
    let kind = file.kind();
    let kind_color = match kind {
        FileKind::Image => Color::Magenta,
        FileKind::Document => Color::Yellow,
        FileKind::Other => Color::White,
    };

    writer.print_colored(&format!("{:>6}  ", file.id), Color::White)?;
    writer.print_colored(&format!("{:<8}", kind.label()), kind_color)?;
    writer.write(&format!("{:>10}  ", format_bytes(file.size)))?;
    writer.print_colored(&truncate(&file.name, name_width(FILE_ROW_RESERVED)), Color::Cyan)?;

    if file.is_trashed {
        writer.write(" ")?;
        writer.print_colored("(trashed)", Color::Red)?;
    }

    writer.writeln()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_file() -> File {
        File {
            id: 7,
            name: "report.pdf".to_string(),
            file: Some("uploads/report.pdf".to_string()),
            url: None,
            folder: Some(3),
            size: 1536,
            file_type: ".pdf".to_string(),
            is_trashed: false,
            created_at: None,
            updated_at: None,
        }
    }

    fn create_test_folder() -> Folder {
        Folder {
            id: 3,
            name: "Taxes".to_string(),
            parent: None,
            file_count: 2,
            subfolder_count: 1,
            created_at: None,
            updated_at: None,
        }
    }

    fn render(dashboard: &Dashboard, listing: &Listing) -> String {
        let mut writer = ColorWriter::new(true);
        format_listing(dashboard, listing, &mut writer).unwrap();
        writer.into_string().unwrap()
    }

    #[test]
    fn test_format_listing() {
        let listing = Listing {
            folders: vec![create_test_folder()],
            files: vec![create_test_file()],
        };
        let output = render(&Dashboard::default(), &listing);

        assert!(output.starts_with("My Drive\n"));
        assert!(output.contains("Taxes  2 files · 1 folders"));
        assert!(output.contains("1.5 KB"));
        assert!(output.contains("report.pdf"));
        assert!(output.contains("1 folder(s), 1 file(s)"));
    }

    #[test]
    fn test_empty_trash_has_no_upload_hint() {
        let output = render(&Dashboard::new(View::Trash, None, None), &Listing::default());
        assert!(output.contains("No files or folders yet"));
        assert!(!output.contains("Upload files"));
        assert!(!output.contains("folders create"));
    }

    #[test]
    fn test_folder_hint_only_in_drive_view() {
        let drive = render(&Dashboard::default(), &Listing::default());
        assert!(drive.contains("Create a folder: opendrive folders create <NAME>"));

        let recent = render(&Dashboard::new(View::Recent, None, None), &Listing::default());
        assert!(recent.contains("Upload files"));
        assert!(!recent.contains("folders create"));
    }

    #[test]
    fn test_title_includes_folder_and_search() {
        let dashboard = Dashboard::new(View::Recent, Some(3), Some("tax".to_string()));
        let output = render(&dashboard, &Listing::default());
        assert!(output.starts_with("Recent Files › folder #3 (search: \"tax\")\n"));
    }
}
