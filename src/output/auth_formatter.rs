use crate::models::user::User;
use crate::output::color::ColorWriter;
use std::io::Result;

pub fn format_user(user: &User, api_url: &str, writer: &mut ColorWriter) -> Result<()> {
    writer.print_header(&format!("Signed in as {}", user.username))?;
    writer.print_separator()?;

    writer.print_field("User ID", &user.id.to_string())?;
    if let Some(name) = user.full_name() {
        writer.print_field("Name", &name)?;
    }
    if !user.email.is_empty() {
        writer.print_field("Email", &user.email)?;
    }
    writer.print_field("Server", api_url)
}
