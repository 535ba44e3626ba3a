//! Built-in weights for Windows Security log event ids.

use super::SeverityEntry;

pub fn windows_security_entries() -> Vec<SeverityEntry> {
    vec![
        SeverityEntry::new(4670, 4, "Permissions on an object were changed"),
        SeverityEntry::new(1102, 10, "Audit log cleared"),
        SeverityEntry::new(5156, 5, "Windows Filtering Platform has allowed a connection"),
        SeverityEntry::new(5158, 5, "Windows Filtering Platform has blocked a connection"),
        SeverityEntry::new(4720, 3, "A user account was created"),
        SeverityEntry::new(4726, 3, "A user account was deleted"),
    ]
}
