use super::{PortalReply, route_request};
use crate::{
    core::net::http::{HttpConnection, HttpResult},
    infrastructure::services::PortalSubmissionSender,
};

/// Serves portal requests and forwards accepted credentials to the main loop
pub struct PortalHttpController {
    submissions: PortalSubmissionSender,
}

impl PortalHttpController {
    pub fn new(submissions: PortalSubmissionSender) -> Self {
        Self { submissions }
    }

    pub(crate) async fn handle_request(&self, conn: HttpConnection<'_>) -> HttpResult {
        let (method, path) = conn.route();
        let reply = route_request(method, path, conn.body());
        match &reply {
            PortalReply::Saved(credentials) => {
                log::info!("portal: credentials for '{}' received", credentials.ssid);
            }
            PortalReply::Rejected(e) => log::warn!("portal: form rejected: {e:?}"),
            PortalReply::NotFound => log::debug!("portal: {method:?} {path} not found"),
            PortalReply::Form => {}
        }

        let (headers, body) = reply.response();
        conn.respond(&headers, body).await?;

        if let PortalReply::Saved(credentials) = reply {
            self.submissions.send(credentials).await;
        }
        Ok(())
    }
}
