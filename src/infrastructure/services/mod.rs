mod portal_inbox;
mod system;

pub use portal_inbox::{ChannelPortalInbox, PortalSubmissionSender, portal_submission_sender};
pub use system::EspSystemControl;
