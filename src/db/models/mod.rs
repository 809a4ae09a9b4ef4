pub mod lead;
pub mod package;
pub mod partner;

pub use lead::{Lead, LeadDraft, LeadStatus};
pub use package::{Package, PackageDraft};
pub use partner::Partner;
