// capture/portal.rs - Screenshot Portal Response Decoding
//
// Platform-independent part of the portal path: what a Response signal
// means. The D-Bus plumbing lives in capture/linux.rs.

use std::fmt;

use crate::error::CaptureError;

/// Response code of an `org.freedesktop.portal.Request::Response` signal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PortalStatus {
    Success,
    /// The user dismissed the portal dialog
    Cancelled,
    Other(u32),
}

impl From<u32> for PortalStatus {
    fn from(code: u32) -> Self {
        match code {
            0 => PortalStatus::Success,
            1 => PortalStatus::Cancelled,
            other => PortalStatus::Other(other),
        }
    }
}

impl fmt::Display for PortalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PortalStatus::Success => f.write_str("request succeeded"),
            PortalStatus::Cancelled => f.write_str("request was cancelled by the user"),
            PortalStatus::Other(code) => write!(f, "request failed (status {code})"),
        }
    }
}

/// A decoded screenshot response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenshotResponse {
    pub status: PortalStatus,
    /// `results["uri"]` when it was present and a string
    pub uri: Option<String>,
}

impl ScreenshotResponse {
    pub fn new(code: u32, uri: Option<String>) -> Self {
        Self {
            status: PortalStatus::from(code),
            uri,
        }
    }

    /// The file URI of a successful capture. A failed or cancelled request
    /// never yields a URI, even if the portal sent one.
    pub fn into_uri(self) -> Result<String, CaptureError> {
        match self.status {
            PortalStatus::Success => self.uri.ok_or(CaptureError::PortalMissingUri),
            status => Err(CaptureError::PortalResponseError { status }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_surfaces_uri() {
        let response = ScreenshotResponse::new(0, Some("file:///tmp/x.png".into()));
        assert_eq!(response.into_uri().unwrap(), "file:///tmp/x.png");
    }

    #[test]
    fn non_zero_status_never_surfaces_uri() {
        for code in [1, 2, 7] {
            let response = ScreenshotResponse::new(code, Some("file:///tmp/x.png".into()));
            match response.into_uri() {
                Err(CaptureError::PortalResponseError { status }) => {
                    assert_eq!(status, PortalStatus::from(code))
                }
                other => panic!("expected portal error for {code}, got {other:?}"),
            }
        }
    }

    #[test]
    fn success_without_uri_is_an_error() {
        let response = ScreenshotResponse::new(0, None);
        assert!(matches!(
            response.into_uri(),
            Err(CaptureError::PortalMissingUri)
        ));
    }

    #[test]
    fn status_codes() {
        assert_eq!(PortalStatus::from(0), PortalStatus::Success);
        assert_eq!(PortalStatus::from(1), PortalStatus::Cancelled);
        assert_eq!(PortalStatus::from(2), PortalStatus::Other(2));
        assert_eq!(
            PortalStatus::Other(2).to_string(),
            "request failed (status 2)"
        );
    }
}
