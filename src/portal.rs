//! Captive-portal request routing for update mode.

use crate::config::AccessPointConfig;

/// Where an HTTP request on the access point goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortalRoute {
    /// Served by the firmware upload handler.
    Upload,

    /// Answered with a redirect to this path.
    Redirect(&'static str),
}

/// Routes a request path. Anything but the update path is redirected to it,
/// so any URL a client opens lands on the upload page.
pub fn route(path: &str, access_point: &AccessPointConfig) -> PortalRoute {
    let path = path.split(['?', '#']).next().unwrap_or(path);

    if path == access_point.update_path {
        PortalRoute::Upload
    } else {
        PortalRoute::Redirect(access_point.update_path)
    }
}
