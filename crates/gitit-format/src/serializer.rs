//! Serializer for writing ticket files.

use crate::types::{DATE_FORMAT, TicketRecord};
use std::fmt::Write;

/// Serialize a ticket to its on-disk text.
///
/// The headers always come in the same order, followed by one blank line
/// and the body exactly as stored. `id` and `release` are not written;
/// they are implied by where the file is saved.
pub fn serialize_ticket(ticket: &TicketRecord) -> String {
    let mut output = String::new();

    write_header(&mut output, "Subject", &ticket.title);
    write_header(&mut output, "Issuer", &ticket.issuer);
    write_header(
        &mut output,
        "Date",
        &ticket.created_at.format(DATE_FORMAT).to_string(),
    );
    write_header(&mut output, "Type", ticket.kind.as_str());
    write_header(&mut output, "Priority", &ticket.priority.to_string());
    write_header(&mut output, "Weight", &ticket.weight.to_string());
    write_header(&mut output, "Status", ticket.status.as_str());
    write_header(&mut output, "Assigned to", &ticket.assigned_to);

    output.push('\n');
    output.push_str(&ticket.body);

    output
}

fn write_header(output: &mut String, key: &str, value: &str) {
    // Writing into a String cannot fail.
    let _ = writeln!(output, "{key}: {value}");
}
