//! PDF merge tags.
//!
//! Notification and confirmation text can embed `{<label>:pdf:<pdf_id>}`
//! tokens. Resolving the text swaps each token for the PDF's download URL,
//! or for nothing when the PDF doesn't exist, is inactive, or its
//! conditional logic excludes the entry. Who may actually open the link is
//! decided later, when it is clicked, by the access middleware.

mod resolver;
mod tag;
mod url;

pub use resolver::{MergeTagResolver, ResolveOptions};
pub use tag::{available_tags, parse_tags, MergeTag, TagDescriptor};
pub use url::{encode_ampersands, PdfAction, PdfUrlBuilder};
