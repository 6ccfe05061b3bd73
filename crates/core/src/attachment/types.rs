//! Attachment types.

use chrono::{DateTime, Utc};
use expensa_shared::types::{AttachmentId, ExpenseId};
use serde::{Deserialize, Serialize};

/// Metadata of a file attached to an expense.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    /// Attachment ID.
    pub id: AttachmentId,
    /// Original file name.
    pub file_name: String,
    /// Location of the stored file.
    pub file_path: String,
    /// MIME type.
    pub mime_type: String,
    /// File size in bytes.
    pub size: i64,
    /// Owning expense.
    pub expense_id: ExpenseId,
    /// When the attachment was recorded.
    pub created_at: DateTime<Utc>,
}
