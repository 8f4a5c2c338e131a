use embassy_sync::{
    blocking_mutex::raw::CriticalSectionRawMutex,
    channel::{Channel, Sender},
};

use crate::domain::entity::WifiCredentials;
use crate::domain::ports::PortalInbox;

/// A submission is acted on right away, so one slot is enough
const SUBMISSION_QUEUE_SIZE: usize = 1;

type SubmissionChannel = Channel<CriticalSectionRawMutex, WifiCredentials, SUBMISSION_QUEUE_SIZE>;

static PORTAL_SUBMISSIONS: SubmissionChannel = Channel::new();

pub type PortalSubmissionSender =
    Sender<'static, CriticalSectionRawMutex, WifiCredentials, SUBMISSION_QUEUE_SIZE>;

pub fn portal_submission_sender() -> PortalSubmissionSender {
    PORTAL_SUBMISSIONS.sender()
}

/// Main-loop side of the portal submission queue
#[derive(Debug, Default)]
pub struct ChannelPortalInbox;

impl PortalInbox for ChannelPortalInbox {
    fn take_submission(&mut self) -> Option<WifiCredentials> {
        PORTAL_SUBMISSIONS.try_receive().ok()
    }
}
